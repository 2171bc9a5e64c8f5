//! Per-segment steady-state speed model
//!
//! Power delivered to the wheel balances the work done against gravity,
//! rolling resistance and aerodynamic drag:
//!
//! ```text
//! (1 - loss)·P = G·W·(rise/hyp + Crr·run/hyp)·v + ½·CdA·ρ·v³
//! ```

use crate::config::ModelConfig;
use crate::geodesy::GroundDistance;
use crate::models::TrackPoint;
use crate::solver::{Cubic, RootSolver};

const MPS_TO_KPH: f64 = 3.6;

/// Rise, run and true 3-D length of the stretch between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentGeometry {
    /// Signed elevation change in meters, positive when climbing
    pub rise: f64,
    /// Ground distance in meters
    pub run: f64,
    pub hypotenuse: f64,
}

impl SegmentGeometry {
    pub fn from_rise_run(rise: f64, run: f64) -> Self {
        Self {
            rise,
            run,
            hypotenuse: (rise * rise + run * run).sqrt(),
        }
    }

    pub fn between<D>(current: &TrackPoint, next: &TrackPoint, distance: &D) -> Self
    where
        D: GroundDistance + ?Sized,
    {
        Self::from_rise_run(
            next.elevation - current.elevation,
            distance.ground_distance(current, next),
        )
    }

    /// Duplicate points produce a zero-length segment
    pub fn is_degenerate(&self) -> bool {
        self.hypotenuse == 0.0
    }
}

/// Computes the clamped sustainable velocity for a segment
#[derive(Debug, Clone)]
pub struct SegmentModel<'a> {
    config: &'a ModelConfig,
    solver: RootSolver,
}

impl<'a> SegmentModel<'a> {
    pub fn new(config: &'a ModelConfig) -> Self {
        Self::with_solver(config, RootSolver::default())
    }

    /// Use a solver with a non-default bracket or tolerance
    pub fn with_solver(config: &'a ModelConfig, solver: RootSolver) -> Self {
        Self { config, solver }
    }

    pub fn config(&self) -> &'a ModelConfig {
        self.config
    }

    /// Power balance rearranged as `a·v³ + c·v + d = 0`, v in m/s
    pub fn power_balance(&self, geometry: &SegmentGeometry) -> Cubic {
        let cfg = self.config;
        let hyp = geometry.hypotenuse;

        let a = 0.5 * cfg.drag_coefficient * cfg.physics.air_density;
        let c = cfg.physics.gravity
            * cfg.rider_weight
            * (geometry.rise / hyp + cfg.rolling_resistance * geometry.run / hyp);
        let d = -(1.0 - cfg.drivetrain_loss) * cfg.power;

        Cubic::new(a, c, d)
    }

    /// Velocity in kph, clamped to the configured floor and ceiling.
    ///
    /// The floor keeps near-vertical climbs from producing near-infinite
    /// durations, the ceiling models freewheeling on descents.
    pub fn velocity_kph(&self, geometry: &SegmentGeometry) -> f64 {
        debug_assert!(!geometry.is_degenerate(), "degenerate segment");

        let cubic = self.power_balance(geometry);
        let raw = MPS_TO_KPH * self.solver.largest_root(&cubic);

        self.config
            .velocity_floor()
            .max(self.config.velocity_ceiling().min(raw))
    }
}
