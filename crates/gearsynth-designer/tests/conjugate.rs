// Integration tests for virtual hobbing

use gearsynth_core::{CancelToken, IntPath, SynthesisError};
use gearsynth_designer::{
    CenterDistance, CenterDistanceSolver, ConjugateProfileSynthesizer, ControlPath, CsgClipper,
    DrivingProfile, FillRule, Point, PolygonClipper, ProfileKind, SplineEvaluator, SplineParams,
    SynthesisProgress, SynthesisSettings, ToothParams, ToothProfileGenerator,
};
use std::cell::Cell;

/// Returns the subject untouched.
struct PassThrough;

impl PolygonClipper for PassThrough {
    fn difference(&self, subject: &IntPath, _: &IntPath, _: FillRule, _: FillRule) -> Vec<IntPath> {
        vec![subject.clone()]
    }
}

/// Removes everything.
struct Swallow;

impl PolygonClipper for Swallow {
    fn difference(&self, _: &IntPath, _: &IntPath, _: FillRule, _: FillRule) -> Vec<IntPath> {
        Vec::new()
    }
}

/// Counts calls and then defers to the subject.
struct Counting<'a>(&'a Cell<usize>);

impl PolygonClipper for Counting<'_> {
    fn difference(&self, subject: &IntPath, _: &IntPath, _: FillRule, _: FillRule) -> Vec<IntPath> {
        self.0.set(self.0.get() + 1);
        vec![subject.clone()]
    }
}

fn triangle_profile() -> (DrivingProfile, CenterDistance) {
    let path = ControlPath::from_points([
        Point::new(100.0, 0.0),
        Point::new(-50.0, 80.0),
        Point::new(-50.0, -80.0),
    ]);
    let spline = SplineEvaluator::new(&path, SplineParams::default()).unwrap();
    let profile = ToothProfileGenerator::new(ToothParams::new(6, 4))
        .generate(&spline)
        .unwrap();
    let center = CenterDistanceSolver::default()
        .solve(&profile.pitch_polygon())
        .unwrap();
    (profile, center)
}

#[test]
fn test_rotations_close_one_revolution() {
    let (profile, center) = triangle_profile();
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), PassThrough);

    let mut steps = Vec::new();
    let mating = synthesizer
        .synthesize(
            &profile,
            &center,
            &mut |p: &SynthesisProgress| steps.push((p.step, p.total_steps)),
            &CancelToken::new(),
        )
        .unwrap();

    assert_eq!(steps.len(), 24);
    assert_eq!(steps[0], (0, 24));
    assert_eq!(steps[23], (23, 24));
    assert_eq!(mating.steps, 24);
    assert!((mating.driver_rotation.to_degrees() - 360.0).abs() < 1e-6);
    assert!((mating.conjugate_rotation.to_degrees() - 360.0).abs() <= 0.005 + 1e-9);
}

#[test]
fn test_first_pitch_vertex_is_aligned_with_x_axis() {
    let (profile, center) = triangle_profile();
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), PassThrough);
    let mating = synthesizer
        .synthesize(&profile, &center, &mut |_| {}, &CancelToken::new())
        .unwrap();

    let first = profile.pitch_polygon().vertices[0].rotated(mating.alignment);
    assert!(first.y.abs() < 1e-9);
    assert!(first.x > 0.0);
}

#[test]
fn test_empty_difference_fails_on_first_step() {
    let (profile, center) = triangle_profile();
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), Swallow);
    let result = synthesizer.synthesize(&profile, &center, &mut |_| {}, &CancelToken::new());
    assert!(matches!(result, Err(SynthesisError::EmptyClipResult { step: 0 })));
}

#[test]
fn test_cancelled_before_start() {
    let (profile, center) = triangle_profile();
    let calls = Cell::new(0);
    let synthesizer =
        ConjugateProfileSynthesizer::new(SynthesisSettings::default(), Counting(&calls));

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = synthesizer.synthesize(&profile, &center, &mut |_| {}, &cancel);

    assert!(matches!(result, Err(SynthesisError::Cancelled { step: 0 })));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_cancel_from_progress_stops_after_that_step() {
    let (profile, center) = triangle_profile();
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), PassThrough);
    let cancel = CancelToken::new();
    let handle = cancel.clone();

    let result = synthesizer.synthesize(
        &profile,
        &center,
        &mut |p: &SynthesisProgress| {
            if p.step == 4 {
                handle.cancel();
            }
        },
        &cancel,
    );
    assert!(matches!(result, Err(SynthesisError::Cancelled { step: 5 })));
}

#[test]
fn test_invalid_center_distance() {
    let (profile, _) = triangle_profile();
    let center = CenterDistance {
        distance: f64::NAN,
        iterations: 0,
        error_deg: 0.0,
    };
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), PassThrough);
    let result = synthesizer.synthesize(&profile, &center, &mut |_| {}, &CancelToken::new());
    assert!(matches!(result, Err(SynthesisError::InvalidParameter { .. })));
}

#[test]
fn test_distance_inside_profile_is_degenerate() {
    let (profile, _) = triangle_profile();
    let center = CenterDistance {
        distance: 60.0,
        iterations: 0,
        error_deg: 0.0,
    };
    let synthesizer = ConjugateProfileSynthesizer::new(SynthesisSettings::default(), PassThrough);
    let result = synthesizer.synthesize(&profile, &center, &mut |_| {}, &CancelToken::new());
    assert!(matches!(result, Err(SynthesisError::DegenerateRadius { .. })));
}

#[test]
fn test_hobbing_only_removes_material() {
    let (profile, center) = triangle_profile();
    let settings = SynthesisSettings {
        kind: ProfileKind::FrictionDisc,
        ..SynthesisSettings::default()
    };
    let synthesizer = ConjugateProfileSynthesizer::new(settings, CsgClipper);

    let blank_area = std::f64::consts::PI * center.distance * center.distance;
    let mut areas = Vec::new();
    let mating = synthesizer
        .synthesize(
            &profile,
            &center,
            &mut |p: &SynthesisProgress| areas.push((p.area_before, p.area_after)),
            &CancelToken::new(),
        )
        .unwrap();

    assert_eq!(areas.len(), 24);
    for (before, after) in &areas {
        assert!(*after <= before * (1.0 + 1e-6));
    }
    assert!(mating.area() < blank_area);
    assert!(mating.area() > 0.0);
    assert!(mating.bounding_radius() <= center.distance * (1.0 + 1e-6));
}
