//! Renderer collaborator
//!
//! Everything the host draws is reduced to batches of line segments tagged
//! with a draw mode and a color. The host implements [`SceneRenderer`]; the
//! builders here turn pipeline state into batches.

use crate::conjugate::SynthesisProgress;
use crate::pipeline::GearPipeline;
use gearsynth_core::{Point, Polygon, Segment};

/// How the host should connect the segments of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Independent segments
    Lines,
    /// Segments forming one closed outline
    LineLoop,
}

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const GRID: Rgba = Rgba::new(0.25, 0.25, 0.25, 1.0);
    pub const AXIS: Rgba = Rgba::new(0.5, 0.5, 0.5, 1.0);
    pub const CONTROL: Rgba = Rgba::new(1.0, 0.5, 0.0, 1.0);
    pub const PITCH: Rgba = Rgba::new(0.3, 0.6, 1.0, 1.0);
    pub const DRIVER: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const MATING: Rgba = Rgba::new(1.0, 0.2, 0.2, 1.0);
}

/// Ordered segments sharing a draw mode and color
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentBatch {
    pub mode: DrawMode,
    pub color: Rgba,
    pub segments: Vec<Segment>,
}

impl SegmentBatch {
    pub fn new(mode: DrawMode, color: Rgba) -> Self {
        Self {
            mode,
            color,
            segments: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Host-side drawing surface
pub trait SceneRenderer {
    fn draw(&mut self, layer: &str, batch: SegmentBatch);
    fn clear(&mut self);
}

/// Renderer that keeps every batch, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub batches: Vec<(String, SegmentBatch)>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches drawn on `layer`, in draw order.
    pub fn layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a SegmentBatch> + 'a {
        self.batches
            .iter()
            .filter(move |(name, _)| name == layer)
            .map(|(_, batch)| batch)
    }

    pub fn segment_count(&self) -> usize {
        self.batches.iter().map(|(_, b)| b.len()).sum()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn draw(&mut self, layer: &str, batch: SegmentBatch) {
        self.batches.push((layer.to_string(), batch));
    }

    fn clear(&mut self) {
        self.batches.clear();
    }
}

pub const LAYER_GRID: &str = "grid";
pub const LAYER_CONTROL: &str = "control";
pub const LAYER_PITCH: &str = "pitch";
pub const LAYER_DRIVER: &str = "driver";
pub const LAYER_MATING: &str = "mating";
pub const LAYER_AXES: &str = "axes";

/// Square reference grid centered on the origin.
pub fn grid(extent: f64, spacing: f64) -> SegmentBatch {
    let mut batch = SegmentBatch::new(DrawMode::Lines, Rgba::GRID);
    if !(spacing > 0.0 && extent > 0.0) {
        return batch;
    }
    let lines = (extent / spacing).floor() as i64;
    for k in -lines..=lines {
        let offset = k as f64 * spacing;
        batch.segments.push(Segment::new(
            Point::new(offset, -extent),
            Point::new(offset, extent),
        ));
        batch.segments.push(Segment::new(
            Point::new(-extent, offset),
            Point::new(extent, offset),
        ));
    }
    batch
}

fn ring(center: Point, radius: f64, sides: usize) -> Vec<Segment> {
    Polygon::regular(radius, std::f64::consts::TAU / sides as f64)
        .segments()
        .map(|s| s.translated(center))
        .collect()
}

/// Three concentric rings around each control point.
pub fn control_markers(points: &[Point], radius: f64) -> SegmentBatch {
    let mut batch = SegmentBatch::new(DrawMode::Lines, Rgba::CONTROL);
    for p in points {
        for scale in [1.0, 2.0, 3.0] {
            batch.segments.extend(ring(*p, radius * scale / 3.0, 16));
        }
    }
    batch
}

/// Closed outline of a polygon.
pub fn outline(polygon: &Polygon, color: Rgba) -> SegmentBatch {
    SegmentBatch {
        mode: DrawMode::LineLoop,
        color,
        segments: polygon.segments().collect(),
    }
}

/// Cross marking a rotation axis.
pub fn axis_cross(center: Point, size: f64) -> SegmentBatch {
    let mut batch = SegmentBatch::new(DrawMode::Lines, Rgba::AXIS);
    batch.segments.push(Segment::new(
        center + Point::new(-size, 0.0),
        center + Point::new(size, 0.0),
    ));
    batch.segments.push(Segment::new(
        center + Point::new(0.0, -size),
        center + Point::new(0.0, size),
    ));
    batch
}

/// Draws the current pipeline outputs in the driver frame.
///
/// The mating body is placed on its own axis at the solved center distance,
/// turned back by the alignment applied during synthesis so it meshes with
/// the driver as drawn.
pub fn render_pipeline(pipeline: &GearPipeline, renderer: &mut dyn SceneRenderer) {
    renderer.clear();

    let positions = pipeline.path().positions();
    let extent = positions
        .iter()
        .map(Point::length)
        .fold(0.0, f64::max)
        .max(10.0);
    let marker = extent / 40.0;

    renderer.draw(LAYER_GRID, grid(extent * 2.0, extent / 5.0));
    renderer.draw(LAYER_AXES, axis_cross(Point::origin(), marker * 2.0));

    if let Some(profile) = pipeline.profile() {
        renderer.draw(LAYER_PITCH, outline(&profile.pitch_polygon(), Rgba::PITCH));
        renderer.draw(
            LAYER_DRIVER,
            outline(&profile.cutter_polygon(pipeline.profile_kind()), Rgba::DRIVER),
        );
    }

    if let Some(mating) = pipeline.mating() {
        let center = Point::new(mating.center_distance, 0.0).rotated(-mating.alignment);
        let polygon = mating
            .polygon()
            .rotated(-mating.alignment)
            .translated(center);
        renderer.draw(LAYER_MATING, outline(&polygon, Rgba::MATING));
        renderer.draw(LAYER_AXES, axis_cross(center, marker * 2.0));
    }

    renderer.draw(LAYER_CONTROL, control_markers(&positions, marker));
}

/// Draws one hobbing step in the mating frame.
pub fn render_progress(progress: &SynthesisProgress, renderer: &mut dyn SceneRenderer) {
    renderer.clear();

    let d = progress.center_distance;
    let driver_axis = Point::new(-d, 0.0);
    let marker = d / 40.0;

    renderer.draw(
        LAYER_MATING,
        outline(
            &progress.accumulator.to_polygon(progress.scale),
            Rgba::MATING,
        ),
    );
    renderer.draw(
        LAYER_DRIVER,
        outline(&progress.driver.translated(driver_axis), Rgba::DRIVER),
    );
    renderer.draw(LAYER_AXES, axis_cross(Point::origin(), marker));
    renderer.draw(LAYER_AXES, axis_cross(driver_axis, marker));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let batch = grid(10.0, 5.0);
        // offsets -10, -5, 0, 5, 10 in both directions
        assert_eq!(batch.len(), 10);
        assert_eq!(batch.mode, DrawMode::Lines);
        assert!(grid(10.0, 0.0).is_empty());
    }

    #[test]
    fn test_control_markers_have_three_rings() {
        let batch = control_markers(&[Point::new(1.0, 1.0), Point::new(5.0, 5.0)], 3.0);
        assert_eq!(batch.len(), 2 * 3 * 16);
        let outer = batch.segments[32].p0;
        assert!((outer.distance_to(&Point::new(1.0, 1.0)) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_outline_closes_polygon() {
        let triangle = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        let batch = outline(&triangle, Rgba::DRIVER);
        assert_eq!(batch.mode, DrawMode::LineLoop);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.segments[2].p1, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_recording_renderer_layers() {
        let mut renderer = RecordingRenderer::new();
        renderer.draw(LAYER_AXES, axis_cross(Point::origin(), 1.0));
        renderer.draw(LAYER_GRID, grid(1.0, 1.0));
        assert_eq!(renderer.layer(LAYER_AXES).count(), 1);
        assert_eq!(renderer.segment_count(), 2 + 6);

        renderer.clear();
        assert!(renderer.batches.is_empty());
    }
}
