// Integration tests for DXF export

use dxf::entities::EntityType;
use dxf::Drawing;
use gearsynth_core::{IntPath, IntPoint};
use gearsynth_designer::{DxfExporter, Point, Polygon};
use std::io::Cursor;
use tempfile::TempDir;

fn read_lines(bytes: &[u8]) -> Vec<(String, [f64; 4])> {
    let drawing = Drawing::load(&mut Cursor::new(bytes)).unwrap();
    drawing
        .entities()
        .filter_map(|e| match &e.specific {
            EntityType::Line(l) => Some((
                e.common.layer.clone(),
                [l.p1.x, l.p1.y, l.p2.x, l.p2.y],
            )),
            _ => None,
        })
        .collect()
}

fn pentagon() -> Polygon {
    Polygon::regular(25.0, std::f64::consts::TAU / 5.0)
}

#[test]
fn test_export_reads_back() {
    let polygon = pentagon();
    let bytes = DxfExporter::new().to_bytes(&polygon).unwrap();
    let lines = read_lines(&bytes);

    assert_eq!(lines.len(), 5);
    for (segment, (layer, line)) in polygon.segments().zip(&lines) {
        assert_eq!(layer, "0");
        assert!((segment.p0.x - line[0]).abs() < 1e-6);
        assert!((segment.p0.y - line[1]).abs() < 1e-6);
        assert!((segment.p1.x - line[2]).abs() < 1e-6);
        assert!((segment.p1.y - line[3]).abs() < 1e-6);
    }
    // Closing edge returns to the first vertex
    assert!((lines[4].1[2] - 25.0).abs() < 1e-6);
}

#[test]
fn test_export_to_file_with_layer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gear1.dxf");

    DxfExporter::with_layer("DRIVER")
        .write_polygon(&pentagon(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let lines = read_lines(&bytes);
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|(layer, _)| layer == "DRIVER"));
}

#[test]
fn test_fixed_outline_is_unscaled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gear2.dxf");
    let outline = IntPath::new(vec![
        IntPoint::new(0, 0),
        IntPoint::new(150_000, 0),
        IntPoint::new(150_000, 250_000),
    ]);

    DxfExporter::new()
        .write_fixed(&outline, 100_000.0, &path)
        .unwrap();

    let lines = read_lines(&std::fs::read(&path).unwrap());
    assert_eq!(lines.len(), 3);
    assert!((lines[1].1[0] - 1.5).abs() < 1e-9);
    assert!((lines[1].1[3] - 2.5).abs() < 1e-9);
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("gear.dxf");
    let result = DxfExporter::new().write_polygon(&Polygon::new(vec![Point::origin(); 3]), &path);
    assert!(matches!(result, Err(gearsynth_core::ExportError::Io(_))));
}
