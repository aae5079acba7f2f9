// End-to-end run: config file in, DXF pair out

use gearsynth_core::CancelToken;
use gearsynth_designer::{DxfExporter, GearPipeline, ProfileKind};
use gearsynth_settings::Config;
use tempfile::TempDir;

#[test]
fn test_friction_disc_pair_from_config_file() {
    let dir = TempDir::new().unwrap();

    let mut config = Config::default();
    config.profile.teeth = 6;
    config.profile.samples_per_tooth = 4;
    config.profile.kind = ProfileKind::FrictionDisc;
    config.export.output_directory = dir.path().join("out");

    let config_path = dir.path().join("config.toml");
    config.save_to_file(&config_path).unwrap();
    let config = Config::load_from_file(&config_path).unwrap();

    let mut pipeline = GearPipeline::from_config(&config).unwrap();
    let mating = pipeline
        .run(&mut |_| {}, &CancelToken::new())
        .unwrap()
        .clone();
    let driver = pipeline
        .profile()
        .unwrap()
        .cutter_polygon(pipeline.profile_kind());
    assert_eq!(driver.len(), 24);

    std::fs::create_dir_all(&config.export.output_directory).unwrap();
    let exporter = DxfExporter::new();
    exporter.write_polygon(&driver, &config.driver_path()).unwrap();
    exporter
        .write_fixed(&mating.path, mating.scale, &config.mating_path())
        .unwrap();

    assert!(config.driver_path().ends_with("gear1.dxf"));
    assert!(std::fs::metadata(config.driver_path()).unwrap().len() > 0);
    assert!(std::fs::metadata(config.mating_path()).unwrap().len() > 0);
}
