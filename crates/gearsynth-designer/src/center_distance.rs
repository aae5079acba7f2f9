//! Center distance solver
//!
//! Finds the axis distance `D` at which the mating body turns exactly once
//! while the driving body turns once. For each profile segment the driver
//! turns by the angle the segment subtends, and the mating body turns by
//! that angle times `r1 / (D - r1)`. A PD loop adjusts `D` until the summed
//! mating rotation closes at 360°.

use gearsynth_core::{angle_between, Polygon, SynthesisError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Minimum vertex count of a profile the solver accepts.
pub const MIN_PROFILE_VERTICES: usize = 3;

/// PD gains and stopping criteria
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub kp: f64,
    pub kd: f64,
    /// Accepted closure error in degrees
    pub tolerance_deg: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            kp: 0.1,
            kd: 0.02,
            tolerance_deg: 0.005,
            max_iterations: 1000,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), SynthesisError> {
        for (name, value) in [
            ("kp", self.kp),
            ("kd", self.kd),
            ("tolerance_deg", self.tolerance_deg),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SynthesisError::invalid_parameter(name, "must be > 0"));
            }
        }
        if self.max_iterations == 0 {
            return Err(SynthesisError::invalid_parameter(
                "max_iterations",
                "must be > 0",
            ));
        }
        Ok(())
    }
}

/// Proportional-derivative controller. Created fresh for every solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdController {
    pub kp: f64,
    pub kd: f64,
    pub prev_error: f64,
}

impl PdController {
    pub fn new(kp: f64, kd: f64) -> Self {
        Self {
            kp,
            kd,
            prev_error: 0.0,
        }
    }

    /// Returns the correction for the current error and remembers it.
    pub fn step(&mut self, setpoint: f64, measured: f64) -> f64 {
        let error = setpoint - measured;
        let derivative = error - self.prev_error;
        self.prev_error = error;
        self.kp * error + self.kd * derivative
    }
}

/// Solved center distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterDistance {
    pub distance: f64,
    /// PD corrections applied before the closure error met tolerance
    pub iterations: usize,
    /// Remaining closure error in degrees
    pub error_deg: f64,
}

/// Total mating rotation in radians for one driver revolution at distance `d`.
///
/// Fails with `DegenerateRadius` as soon as a vertex reaches or passes `d`.
pub fn conjugate_angle(profile: &Polygon, d: f64) -> Result<f64, SynthesisError> {
    let n = profile.len();
    let mut total = 0.0;
    for (i, vertex) in profile.vertices.iter().enumerate() {
        let next = &profile.vertices[(i + 1) % n];
        let r1 = vertex.length();
        let r2 = d - r1;
        if r2 <= 0.0 {
            return Err(SynthesisError::DegenerateRadius {
                index: i,
                radius: r1,
                center_distance: d,
            });
        }
        total += angle_between(vertex, next) * r1 / r2;
    }
    Ok(total)
}

/// Iterative PD solver for the center distance
#[derive(Debug, Clone, Default)]
pub struct CenterDistanceSolver {
    settings: SolverSettings,
}

impl CenterDistanceSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Solves starting from twice the mean vertex radius.
    pub fn solve(&self, profile: &Polygon) -> Result<CenterDistance, SynthesisError> {
        self.solve_from(profile, 2.0 * profile.mean_radius())
    }

    pub fn solve_from(
        &self,
        profile: &Polygon,
        initial_guess: f64,
    ) -> Result<CenterDistance, SynthesisError> {
        self.settings.validate()?;
        if profile.len() < MIN_PROFILE_VERTICES {
            return Err(SynthesisError::invalid_parameter(
                "profile",
                format!(
                    "{} vertices, at least {} required",
                    profile.len(),
                    MIN_PROFILE_VERTICES
                ),
            ));
        }

        let mut controller = PdController::new(self.settings.kp, self.settings.kd);
        let mut distance = initial_guess;
        let mut iterations = 0;

        loop {
            let total_deg = conjugate_angle(profile, distance)?.to_degrees();
            let error_deg = 360.0 - total_deg;

            if !error_deg.is_finite() || !distance.is_finite() {
                warn!("Center distance solver diverged at iteration {}", iterations);
                return Err(SynthesisError::ConvergenceFailure {
                    iterations,
                    last_error_deg: error_deg,
                    center_distance: distance,
                });
            }

            debug!(
                "Solver iteration {}: distance {:.6}, error {:.6}°",
                iterations, distance, error_deg
            );

            if error_deg.abs() <= self.settings.tolerance_deg {
                info!(
                    "Center distance {:.6} converged in {} iterations (error {:.6}°)",
                    distance, iterations, error_deg
                );
                return Ok(CenterDistance {
                    distance,
                    iterations,
                    error_deg,
                });
            }

            if iterations >= self.settings.max_iterations {
                warn!(
                    "Center distance did not converge after {} iterations (error {:.6}°)",
                    iterations, error_deg
                );
                return Err(SynthesisError::ConvergenceFailure {
                    iterations,
                    last_error_deg: error_deg,
                    center_distance: distance,
                });
            }

            distance -= controller.step(360.0, total_deg);
            iterations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearsynth_core::Point;

    #[test]
    fn test_pd_controller_step() {
        let mut controller = PdController::new(0.1, 0.02);
        // first step: derivative equals the error
        let out = controller.step(360.0, 350.0);
        assert!((out - (0.1 * 10.0 + 0.02 * 10.0)).abs() < 1e-12);
        assert_eq!(controller.prev_error, 10.0);

        let out = controller.step(360.0, 356.0);
        assert!((out - (0.1 * 4.0 + 0.02 * -6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_conjugate_angle_of_circle_at_twice_radius() {
        let circle = Polygon::regular(50.0, 5f64.to_radians());
        let total = conjugate_angle(&circle, 100.0).unwrap();
        assert!((total - std::f64::consts::TAU).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_radius() {
        let profile = Polygon::new(vec![
            Point::new(10.0, 0.0),
            Point::new(0.0, 30.0),
            Point::new(-10.0, 0.0),
        ]);
        match conjugate_angle(&profile, 20.0) {
            Err(SynthesisError::DegenerateRadius { index, radius, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(radius, 30.0);
            }
            other => panic!("expected degenerate radius, got {:?}", other),
        }
    }

    #[test]
    fn test_small_profile_rejected() {
        let profile = Polygon::new(vec![Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        let result = CenterDistanceSolver::default().solve(&profile);
        assert!(matches!(result, Err(SynthesisError::InvalidParameter { .. })));
    }
}
