//! Outline caching with pluggable persistence.
//!
//! `OutlineCache` resolves an outline in three steps: an in-memory map for
//! repeat requests within a run, then a persistent `OutlineStore` whose
//! artifact is still fresh, and finally the supplied compute closure. Stale
//! artifacts are removed before recomputing so a dead file cannot be picked
//! up later. Persistence failures are logged and swallowed; the cache
//! degrades to recomputation rather than failing the request.
use crate::image::{read_json_file, write_json_file};
use crate::types::ShapeOutline;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Persistent artifact storage for computed outlines, keyed by asset name.
pub trait OutlineStore {
    /// Load the stored outline for `name`, if one exists and parses.
    fn load(&self, name: &str) -> Option<ShapeOutline>;
    /// Persist the outline for `name`, replacing any previous artifact.
    fn store(&mut self, name: &str, outline: &ShapeOutline) -> Result<(), String>;
    /// Delete the artifact for `name` if present.
    fn remove(&mut self, name: &str) -> Result<(), String>;
}

/// Staleness oracle for stored artifacts.
pub trait Freshness {
    /// Whether the artifact for `name` may be served instead of recomputed.
    fn is_fresh(&self, name: &str) -> bool;
}

/// Caching policy switches.
#[derive(Clone, Debug, Default)]
pub struct CacheOptions {
    /// Skip the persistent store entirely; every request recomputes.
    pub disabled: bool,
    /// Names whose artifacts are never served, only rewritten.
    pub force: Vec<String>,
}

impl CacheOptions {
    pub fn is_forced(&self, name: &str) -> bool {
        self.force.iter().any(|n| n == name)
    }
}

/// Compare artifact and reference-asset modification times.
///
/// Freshness is the default: an artifact only goes stale when the asset is
/// strictly newer. Missing metadata on either side trusts the artifact.
pub fn fresh_against(artifact: Option<SystemTime>, asset: Option<SystemTime>) -> bool {
    match (artifact, asset) {
        (Some(artifact), Some(asset)) => asset <= artifact,
        _ => true,
    }
}

/// `OutlineStore` backed by a directory of `<name>.outline.json` files.
///
/// Staleness compares each artifact's mtime against a single configured
/// reference asset, typically the source image or an asset bundle.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
    asset: Option<PathBuf>,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            asset: None,
        }
    }

    /// Set the reference asset whose mtime invalidates stored artifacts.
    pub fn with_asset(mut self, asset: impl Into<PathBuf>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.outline.json"))
    }

    fn mtime(path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }
}

impl OutlineStore for DirectoryStore {
    fn load(&self, name: &str) -> Option<ShapeOutline> {
        let path = self.artifact_path(name);
        if !path.exists() {
            return None;
        }
        match read_json_file(&path) {
            Ok(outline) => Some(outline),
            Err(e) => {
                debug!("discarding unreadable outline artifact: {e}");
                None
            }
        }
    }

    fn store(&mut self, name: &str, outline: &ShapeOutline) -> Result<(), String> {
        write_json_file(&self.artifact_path(name), outline)
    }

    fn remove(&mut self, name: &str) -> Result<(), String> {
        let path = self.artifact_path(name);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| format!("Failed to remove {}: {e}", path.display()))
    }
}

impl Freshness for DirectoryStore {
    fn is_fresh(&self, name: &str) -> bool {
        let path = self.artifact_path(name);
        if !path.exists() {
            return false;
        }
        let asset_mtime = self.asset.as_deref().and_then(Self::mtime);
        fresh_against(Self::mtime(&path), asset_mtime)
    }
}

/// Memory-first outline cache over a persistent store.
pub struct OutlineCache<S> {
    store: S,
    options: CacheOptions,
    memory: HashMap<String, ShapeOutline>,
}

impl<S: OutlineStore + Freshness> OutlineCache<S> {
    pub fn new(store: S, options: CacheOptions) -> Self {
        Self {
            store,
            options,
            memory: HashMap::new(),
        }
    }

    /// Resolve the outline for `name`, computing it via `compute` only when
    /// neither the in-memory map nor a fresh stored artifact can serve it.
    pub fn outline_for<E, F>(&mut self, name: &str, compute: F) -> Result<ShapeOutline, E>
    where
        F: FnOnce() -> Result<ShapeOutline, E>,
    {
        if let Some(outline) = self.memory.get(name) {
            debug!("outline cache: memory hit for {name}");
            return Ok(outline.clone());
        }

        let out_of_date = self.options.disabled || !self.store.is_fresh(name);
        if out_of_date {
            if let Err(e) = self.store.remove(name) {
                debug!("outline cache: {e}");
            }
        } else if !self.options.is_forced(name) {
            if let Some(outline) = self.store.load(name) {
                debug!("outline cache: store hit for {name}");
                self.memory.insert(name.to_string(), outline.clone());
                return Ok(outline);
            }
        }

        debug!("outline cache: computing {name}");
        let outline = compute()?;
        self.memory.insert(name.to_string(), outline.clone());
        if !self.options.disabled {
            if let Err(e) = self.store.store(name, &outline) {
                debug!("outline cache: {e}");
            }
        }
        Ok(outline)
    }
}
