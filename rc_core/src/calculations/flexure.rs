//! # Flexural Capacity
//!
//! Neutral-axis depth at force equilibrium and the ultimate moment of
//! resistance about it.
//!
//! ## Method (IS 456 cl. 38.1)
//!
//! 1. Find `xu` where concrete compression + compression steel = tension steel.
//! 2. Sum moments of every resultant about the neutral axis:
//!    `Mu = Σ F · (xu − xc)`. Tension forces are negative and sit below the
//!    axis, so every resultant adds to `Mu`.
//! 3. For beams, compare `xu` with the limiting depth
//!    `xu,max = εcu / (εcu + fd/Es + 0.002) · d`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::section::Section;
use super::solver::{find_root, EquilibriumSolution, SolverSettings};
use crate::equations::stress_block::EC_ULTIMATE;
use crate::errors::CalcResult;
use crate::reinforcement::LayerStress;
use crate::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};

/// One force resultant of the section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resultant {
    pub name: String,
    /// Compression positive
    pub force: KiloNewtons,
    /// About the neutral axis
    pub moment: KiloNewtonMeters,
}

impl Resultant {
    fn new(name: impl Into<String>, force_n: f64, moment_nmm: f64) -> Self {
        Resultant {
            name: name.into(),
            force: Newtons(force_n).into(),
            moment: NewtonMillimeters(moment_nmm).into(),
        }
    }
}

/// Flexural capacity of a section at a given neutral-axis depth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexureCapacity {
    pub xu: f64,
    pub ec_max: f64,
    pub compression: Vec<Resultant>,
    pub tension: Vec<Resultant>,
    pub total_compression: KiloNewtons,
    /// Magnitude of the tension resultants
    pub total_tension: KiloNewtons,
    /// Compression minus tension; zero at equilibrium
    pub net_force: KiloNewtons,
    pub mu: KiloNewtonMeters,
    /// Centroid of the tension steel from the compressed edge (mm)
    pub effective_depth: Option<f64>,
    /// Limiting neutral-axis depth (beams only, mm)
    pub xu_max: Option<f64>,
    /// True when xu ≤ xu,max
    pub ductile: Option<bool>,
}

/// Limiting neutral-axis depth for effective depth `d` and steel limiting strain
#[inline]
pub fn limiting_depth(d: f64, steel_limiting_strain: f64) -> f64 {
    EC_ULTIMATE / (EC_ULTIMATE + steel_limiting_strain) * d
}

impl Section {
    /// Search range for the neutral axis (mm)
    pub fn search_range(&self, settings: &SolverSettings) -> (f64, f64) {
        let depth = self.depth();
        let upper = if self.shape.is_column() {
            settings.column_upper_factor * depth
        } else {
            depth
        };
        (settings.scan_start_fraction * depth, upper)
    }

    /// Neutral-axis depth at which the net section force vanishes.
    ///
    /// # Errors
    ///
    /// `EquilibriumNotFound` when the net force does not change sign in the
    /// search range.
    pub fn equilibrium_xu(&self, ec_max: f64, settings: &SolverSettings) -> CalcResult<EquilibriumSolution> {
        self.validate()?;
        let (lower, upper) = self.search_range(settings);
        debug!("{}: solving equilibrium on [{:.3}, {:.3}] mm", self.label, lower, upper);
        find_root(&self.label, |xu| self.net_force(xu, ec_max), lower, upper, settings)
    }

    /// Resultants and moment of resistance at neutral-axis depth `xu`.
    pub fn flexure_capacity(&self, xu: f64, ec_max: f64) -> CalcResult<FlexureCapacity> {
        let blocks = self.concrete_blocks(xu, ec_max)?;
        let layers = self.rebar_resultant(xu, ec_max)?;

        let mut compression: Vec<Resultant> = blocks
            .iter()
            .map(|b| Resultant::new(b.name.clone(), b.force, b.moment))
            .collect();
        let mut tension = Vec::new();
        for state in &layers {
            let name = format!("{} @ {}", state.bar_list, state.position);
            match state.stress_type {
                LayerStress::Compression => compression.push(Resultant::new(name, state.force, state.moment)),
                LayerStress::Tension => tension.push(Resultant::new(name, state.force, state.moment)),
                LayerStress::Neutral => {}
            }
        }

        let compression_n: f64 = blocks.iter().map(|b| b.force).sum::<f64>()
            + layers
                .iter()
                .filter(|s| s.stress_type == LayerStress::Compression)
                .map(|s| s.force)
                .sum::<f64>();
        let tension_n: f64 = -layers
            .iter()
            .filter(|s| s.stress_type == LayerStress::Tension)
            .map(|s| s.force)
            .sum::<f64>();
        let mu_nmm: f64 =
            blocks.iter().map(|b| b.moment).sum::<f64>() + layers.iter().map(|s| s.moment).sum::<f64>();

        let effective_depth = self.effective_depth(xu);
        let xu_max = if self.shape.is_column() {
            None
        } else {
            effective_depth.map(|d| limiting_depth(d, self.main_steel.rebar.limiting_strain()))
        };

        let total_compression: KiloNewtons = Newtons(compression_n).into();
        let total_tension: KiloNewtons = Newtons(tension_n).into();
        Ok(FlexureCapacity {
            xu,
            ec_max,
            compression,
            tension,
            total_compression,
            total_tension,
            net_force: total_compression - total_tension,
            mu: NewtonMillimeters(mu_nmm).into(),
            effective_depth,
            xu_max,
            ductile: xu_max.map(|limit| xu <= limit),
        })
    }
}
