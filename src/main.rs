use anyhow::Context;
use gearsynth::{
    init_logging, CancelToken, Config, DxfExporter, GearPipeline, SynthesisProgress, BUILD_DATE,
    VERSION,
};
use gearsynth_core::ProgressCallback;
use std::path::PathBuf;
use tracing::{info, warn};

fn load_config() -> anyhow::Result<Config> {
    if let Some(arg) = std::env::args_os().nth(1) {
        let path = PathBuf::from(arg);
        info!("Loading configuration from {}", path.display());
        return Config::load_from_file(&path)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    match Config::default_path() {
        Ok(path) if path.exists() => {
            info!("Loading configuration from {}", path.display());
            Config::load_from_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))
        }
        Ok(_) => {
            info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Could not locate the configuration directory: {}", e);
            Ok(Config::default())
        }
    }
}

/// Logs every tenth of the run.
fn progress_logger() -> ProgressCallback {
    Box::new(|done, total| {
        let tenth = (total / 10).max(1);
        if done % tenth == 0 || done == total {
            info!("Hobbing {}/{} ({:.0}%)", done, total, done as f64 * 100.0 / total as f64);
        }
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("GearSynth {} (built {})", VERSION, BUILD_DATE);

    let config = load_config()?;
    let mut pipeline = GearPipeline::from_config(&config)?;

    let report = progress_logger();
    let cancel = CancelToken::new();
    let mating = pipeline
        .run(
            &mut |p: &SynthesisProgress| report(p.step as u64 + 1, p.total_steps as u64),
            &cancel,
        )?
        .clone();

    let driver = pipeline
        .profile()
        .context("pipeline finished without a driving profile")?
        .cutter_polygon(pipeline.profile_kind())
        .rotated(mating.alignment);

    std::fs::create_dir_all(&config.export.output_directory).with_context(|| {
        format!(
            "failed to create {}",
            config.export.output_directory.display()
        )
    })?;

    let exporter = DxfExporter::new();
    exporter.write_polygon(&driver, &config.driver_path())?;
    exporter.write_fixed(&mating.path, mating.scale, &config.mating_path())?;

    info!(
        "Center distance {:.4}, mating profile {} vertices, bounding radius {:.4}",
        mating.center_distance,
        mating.path.len(),
        mating.bounding_radius()
    );
    Ok(())
}
