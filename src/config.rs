//! JSON run configuration for the `vectorize` binary.
//!
//! Threshold and cache sections are optional; absent fields fall back to
//! the library defaults via `resolve`/`options`.
use crate::cache::CacheOptions;
use crate::vectorizer::VectorizeParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct VectorizeToolConfig {
    pub inputs: Vec<InputSpec>,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub output: OutputConfig,
}

/// One named image to vectorize.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub image: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdConfig {
    pub alpha: Option<u8>,
    pub color: Option<i32>,
    pub angle_tolerance: Option<f32>,
}

impl ThresholdConfig {
    /// Overlay the configured values onto the library defaults.
    pub fn resolve(&self) -> VectorizeParams {
        let mut p = VectorizeParams::default();
        if let Some(v) = self.alpha {
            p.alpha_threshold = v;
        }
        if let Some(v) = self.color {
            p.color_threshold = v;
        }
        if let Some(v) = self.angle_tolerance {
            p.angle_tolerance = v;
        }
        p
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    /// Artifact directory. Defaults to `.cache` under the output directory.
    pub dir: Option<PathBuf>,
    /// Reference asset whose mtime invalidates stored artifacts. Defaults
    /// to each input's own image file.
    pub asset: Option<PathBuf>,
    pub disabled: bool,
    /// Input names to revectorize even when their artifact is fresh.
    pub force: Vec<String>,
}

impl CacheConfig {
    pub fn options(&self) -> CacheOptions {
        CacheOptions {
            disabled: self.disabled,
            force: self.force.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub summary: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<VectorizeToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
