//! # Column Interaction Points
//!
//! For a rectangular column each neutral-axis depth gives one point
//! `(Pu, Mu)` of the axial load / moment interaction diagram. Moments are
//! taken about mid-depth so that `Mu = Pu · e`.
//!
//! ```text
//!        Pu
//!        │╲
//!        │  ╲         xu > D  (whole section compressed)
//!        │    ╲
//!        │     │      balanced region
//!        │    ╱
//!        │  ╱         xu small (tension governs)
//!        └──────── Mu
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::section::Section;
use super::solver::{find_root, EquilibriumSolution, SolverSettings};
use crate::errors::{CalcError, CalcResult};
use crate::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};

/// One point of the interaction diagram
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionPoint {
    pub xu: f64,
    /// Axial load, compression positive
    pub pu: KiloNewtons,
    /// Moment about mid-depth
    pub mu: KiloNewtonMeters,
    /// Mu / Pu (mm), None for zero axial load
    pub eccentricity: Option<f64>,
}

impl Section {
    fn require_column(&self) -> CalcResult<()> {
        if self.shape.is_column() {
            Ok(())
        } else {
            Err(CalcError::invalid_input(
                "shape",
                self.shape.name(),
                "Interaction points are only defined for columns",
            ))
        }
    }

    /// Axial load and moment about mid-depth at neutral-axis depth `xu`.
    pub fn interaction_point(&self, xu: f64, ec_max: f64) -> CalcResult<InteractionPoint> {
        self.require_column()?;
        let half = self.depth() / 2.0;

        let (concrete_force, concrete_moment_na) = self.concrete_resultant(xu, ec_max)?;
        let layers = self.rebar_resultant(xu, ec_max)?;

        // Concrete centroid lies at xu − M_na / C from the compressed edge
        let mut pu = concrete_force;
        let mut mu = concrete_force * (half - xu) + concrete_moment_na;
        for state in &layers {
            pu += state.force;
            mu += state.force * (half - state.position);
        }

        let eccentricity = if pu.abs() > f64::EPSILON { Some(mu / pu) } else { None };
        Ok(InteractionPoint {
            xu,
            pu: Newtons(pu).into(),
            mu: NewtonMillimeters(mu).into(),
            eccentricity,
        })
    }

    /// Neutral-axis depth at which the section carries axial load `pu`.
    ///
    /// # Errors
    ///
    /// `EquilibriumNotFound` when `pu` exceeds what the section can carry
    /// anywhere in the search range.
    pub fn equilibrium_xu_for_axial(
        &self,
        pu: KiloNewtons,
        ec_max: f64,
        settings: &SolverSettings,
    ) -> CalcResult<EquilibriumSolution> {
        self.require_column()?;
        self.validate()?;
        let target = Newtons::from(pu).0;
        let (lower, upper) = self.search_range(settings);
        debug!(
            "{}: solving for Pu = {:.3} kN on [{:.3}, {:.3}] mm",
            self.label, pu.0, lower, upper
        );
        find_root(
            &self.label,
            |xu| Ok(self.net_force(xu, ec_max)? - target),
            lower,
            upper,
            settings,
        )
    }
}
