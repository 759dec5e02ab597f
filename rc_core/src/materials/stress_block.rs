//! # Concrete Stress Block
//!
//! Strain profiles across the depth of a section at a trial neutral-axis
//! depth, and the concrete force/moment integrals over them.
//!
//! ```text
//!   compressed edge  ──┬── ε_edge
//!                      │\
//!                      │ \      strain(x) = slope · x
//!                      │  \
//!        neutral axis ─┼───●─── x = 0
//!                      │    \
//! ```
//!
//! Two code cases exist:
//!
//! - **Flexure** (cl. 38.1): the edge strain is `ε_max` at the compressed edge.
//! - **Axial + flexure** (cl. 39.1): identical while the neutral axis lies
//!   within the section; once `xu > D` the profile pivots about the fibre at
//!   `(1 − εcy/εmax)·D` from the compressed edge, where the strain is fixed
//!   at `εcy`. With `εmax = εcu` that is the familiar `3D/7`. At `xu = D`
//!   both cases give `slope = εmax/D`, so the profile and every force built
//!   on it are continuous in `xu`.

use serde::{Deserialize, Serialize};

use crate::equations::stress_block::{block_area, block_moment, EC_ULTIMATE, EC_YIELD};
use crate::errors::{CalcError, CalcResult};
use crate::materials::concrete::STRAIN_EPSILON;

/// Which code case governs the strain distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressBlock {
    /// Pure flexure, strain εmax at the compressed edge
    Flexure,
    /// Combined axial load and flexure, pivoting about the εcy fibre once xu > D
    AxialFlexure,
}

/// Linear strain distribution for one trial neutral-axis depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainProfile {
    /// Neutral-axis depth from the compressed edge (mm)
    pub xu: f64,
    /// Strain per mm of distance from the neutral axis
    pub slope: f64,
}

impl StressBlock {
    /// Build the strain profile at depth `xu` for a section of overall depth `depth`.
    ///
    /// `ec_max` must lie in `(0, εcu]`, and in `[εcy, εcu]` for
    /// [`StressBlock::AxialFlexure`], whose pivot fibre only exists when the
    /// edge strain at `xu = D` reaches `εcy`.
    pub fn profile(self, xu: f64, depth: f64, ec_max: f64) -> CalcResult<StrainProfile> {
        if !(xu > 0.0 && xu.is_finite()) {
            return Err(CalcError::invalid_input(
                "xu",
                xu.to_string(),
                "Neutral axis depth must be positive",
            ));
        }
        if !(ec_max > 0.0 && ec_max <= EC_ULTIMATE + STRAIN_EPSILON) {
            return Err(CalcError::strain_out_of_range(ec_max, 0.0, EC_ULTIMATE));
        }
        if self == StressBlock::AxialFlexure && ec_max < EC_YIELD - STRAIN_EPSILON {
            return Err(CalcError::strain_out_of_range(ec_max, EC_YIELD, EC_ULTIMATE));
        }

        let slope = match self {
            StressBlock::AxialFlexure if xu > depth => {
                // Depth of the εcy fibre below the compressed edge
                let pivot = (1.0 - EC_YIELD / ec_max).max(0.0) * depth;
                EC_YIELD / (xu - pivot)
            }
            _ => ec_max / xu,
        };
        Ok(StrainProfile { xu, slope })
    }
}

impl StrainProfile {
    /// Strain at distance `x` from the neutral axis (positive toward the compressed edge)
    #[inline]
    pub fn strain_at(&self, x: f64) -> f64 {
        self.slope * x
    }

    /// Strain at the highly compressed edge
    pub fn edge_strain(&self) -> f64 {
        self.strain_at(self.xu)
    }

    /// Strain at the least compressed (or tension) edge
    pub fn least_strain(&self, depth: f64) -> f64 {
        self.strain_at(self.xu - depth)
    }

    /// Distance from the neutral axis at which the parabola reaches its plateau
    pub fn yield_distance(&self) -> f64 {
        EC_YIELD / self.slope
    }

    fn check_range(&self, x1: f64, x2: f64) -> CalcResult<()> {
        for strain in [self.strain_at(x1), self.strain_at(x2)] {
            if !(-STRAIN_EPSILON..=EC_ULTIMATE + STRAIN_EPSILON).contains(&strain) {
                return Err(CalcError::strain_out_of_range(strain, 0.0, EC_ULTIMATE));
            }
        }
        Ok(())
    }

    /// Integral of σ/fd over `[x1, x2]` (mm)
    pub fn area(&self, x1: f64, x2: f64) -> CalcResult<f64> {
        self.check_range(x1, x2)?;
        Ok(block_area(self.slope, x1, x2))
    }

    /// First moment of σ/fd about the neutral axis over `[x1, x2]` (mm²)
    pub fn moment(&self, x1: f64, x2: f64) -> CalcResult<f64> {
        self.check_range(x1, x2)?;
        Ok(block_moment(self.slope, x1, x2))
    }
}
