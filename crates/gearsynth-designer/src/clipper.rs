//! Polygon boolean collaborator
//!
//! The synthesizer only needs a difference of two closed integer paths. The
//! [`PolygonClipper`] trait keeps that seam explicit so hosts and tests can
//! plug in another boolean engine; [`CsgClipper`] is the default, backed by
//! `csgrs` sketches.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use gearsynth_core::{IntPath, IntPoint};
use std::panic;
use tracing::warn;

/// Winding rule deciding which regions of a path count as inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Boolean difference on fixed-point paths
pub trait PolygonClipper {
    /// Returns the outer rings of `subject` minus `clip`, in the same integer
    /// coordinate space. An empty vector means nothing remained.
    fn difference(
        &self,
        subject: &IntPath,
        clip: &IntPath,
        subject_fill: FillRule,
        clip_fill: FillRule,
    ) -> Vec<IntPath>;
}

/// `csgrs` backed clipper.
///
/// The underlying boolean engine resolves overlaps itself and does not take a
/// fill rule. For simple (non self-intersecting) rings, which is what the
/// blank and the cutters are, non-zero and even-odd select the same regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgClipper;

impl CsgClipper {
    fn to_sketch(path: &IntPath) -> Sketch<()> {
        let points: Vec<[f64; 2]> = path
            .points
            .iter()
            .map(|p| [p.x as f64, p.y as f64])
            .collect();
        Sketch::polygon(&points, None)
    }

    fn sketch_to_paths(sketch: &Sketch<()>) -> Vec<IntPath> {
        let mp = sketch.to_multipolygon();
        let mut paths = Vec::new();
        for poly in mp.0 {
            let mut points: Vec<IntPoint> = Vec::new();
            for p in poly.exterior().0.iter() {
                let point = IntPoint::new(p.x.round() as i64, p.y.round() as i64);
                if points.last() != Some(&point) {
                    points.push(point);
                }
            }
            // Rings come back closed
            if points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() >= 3 {
                paths.push(IntPath::new(points));
            }
        }
        paths
    }
}

impl PolygonClipper for CsgClipper {
    fn difference(
        &self,
        subject: &IntPath,
        clip: &IntPath,
        _subject_fill: FillRule,
        _clip_fill: FillRule,
    ) -> Vec<IntPath> {
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            let remaining = Self::to_sketch(subject).difference(&Self::to_sketch(clip));
            Self::sketch_to_paths(&remaining)
        }));

        match result {
            Ok(paths) => paths,
            Err(_) => {
                warn!("Boolean difference panicked, treating the result as empty");
                Vec::new()
            }
        }
    }
}

/// Picks the piece with the most vertices as the main body.
///
/// Slivers split off by a cut have few vertices. Ties keep the earliest piece.
pub fn select_main_body(paths: Vec<IntPath>) -> Option<IntPath> {
    let mut best: Option<IntPath> = None;
    for path in paths {
        match &best {
            Some(current) if current.len() >= path.len() => {}
            _ => best = Some(path),
        }
    }
    best
}
