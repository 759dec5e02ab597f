//! # Unit Types
//!
//! Type-safe wrappers for the forces and moments a section reports. These are
//! plain f64 newtypes so JSON stays clean (just numbers) and arithmetic costs
//! nothing at runtime.
//!
//! ## Internal Units
//!
//! All calculations run in a single consistent set:
//! - Length: millimetres (mm)
//! - Area: square millimetres (mm²)
//! - Stress: newtons per square millimetre (N/mm² = MPa)
//! - Force: newtons (N)
//! - Moment: newton-millimetres (N·mm)
//!
//! Lengths, areas and stresses stay bare `f64` inside the formulas. Force and
//! moment resultants are summed as [`Newtons`] and [`NewtonMillimeters`] and
//! cross the public boundary in kilonewtons and kilonewton-metres, converted
//! through `From`.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::units::{KiloNewtonMeters, NewtonMillimeters};
//!
//! let mu = NewtonMillimeters(78.48e6);
//! let mu_knm: KiloNewtonMeters = mu.into();
//! assert!((mu_knm.0 - 78.48).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl From<NewtonMillimeters> for KiloNewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KiloNewtonMeters(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }
    };
}

impl_arithmetic!(Newtons);
impl_arithmetic!(KiloNewtons);
