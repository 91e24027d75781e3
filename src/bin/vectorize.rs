use outline_tracer::cache::{CacheOptions, DirectoryStore, OutlineCache};
use outline_tracer::config::{self, InputSpec};
use outline_tracer::image::io::{load_rgba_image, write_json_file};
use outline_tracer::{VectorizeParams, Vectorizer};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let params = config.thresholds.resolve();
    let cache_dir = config
        .cache
        .dir
        .clone()
        .unwrap_or_else(|| config.output.dir.join(".cache"));
    let options = config.cache.options();

    let reports: Result<Vec<InputReport>, String> = config
        .inputs
        .par_iter()
        .map(|input| {
            process_input(
                input,
                &params,
                &cache_dir,
                config.cache.asset.as_deref(),
                &options,
                &config.output.dir,
            )
        })
        .collect();
    let reports = reports?;

    for report in &reports {
        println!(
            "{}: {} contours, {} points -> {}",
            report.name,
            report.contours,
            report.points,
            report.outline_json.display()
        );
    }

    let summary = RunSummary {
        total_contours: reports.iter().map(|r| r.contours).sum(),
        total_points: reports.iter().map(|r| r.points).sum(),
        inputs: reports,
    };
    if let Some(path) = &config.output.summary {
        write_json_file(path, &summary)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

fn process_input(
    input: &InputSpec,
    params: &VectorizeParams,
    cache_dir: &Path,
    asset: Option<&Path>,
    options: &CacheOptions,
    out_dir: &Path,
) -> Result<InputReport, String> {
    // Artifacts go stale against the configured reference asset, or against
    // the input's own image when none is configured.
    let store =
        DirectoryStore::new(cache_dir).with_asset(asset.unwrap_or(input.image.as_path()));
    let mut cache = OutlineCache::new(store, options.clone());
    let vectorizer = Vectorizer::new(params.clone());

    let outline = cache.outline_for(&input.name, || {
        let rgba = load_rgba_image(&input.image)?;
        vectorizer
            .vectorize(rgba.as_view())
            .map_err(|e| format!("Failed to vectorize {}: {e}", input.image.display()))
    })?;

    let outline_json = out_dir.join(format!("{}.json", input.name));
    write_json_file(&outline_json, &outline)?;

    Ok(InputReport {
        name: input.name.clone(),
        image: input.image.clone(),
        outline_json,
        contours: outline.polylines.len(),
        points: outline.total_points(),
    })
}

fn usage() -> String {
    "Usage: vectorize <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    inputs: Vec<InputReport>,
    total_contours: usize,
    total_points: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InputReport {
    name: String,
    image: PathBuf,
    outline_json: PathBuf,
    contours: usize,
    points: usize,
}
