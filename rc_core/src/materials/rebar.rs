//! # Reinforcing Steel
//!
//! Mild steel (Fe 250) follows a bilinear curve; cold-worked high yield
//! strength deformed bars (Fe 415, Fe 500, ...) follow the tabulated curve of
//! IS 456 Fig. 23A. Both are odd in strain, so tension comes back negative.

use serde::{Deserialize, Serialize};

use crate::equations::stress_block::{
    hysd_points, hysd_stress, mild_steel_stress, GAMMA_STEEL, STEEL_ELASTIC_MODULUS,
    STEEL_PLASTIC_STRAIN,
};
use crate::errors::{CalcError, CalcResult};

/// Default unit weight of steel (kN/m³)
pub const STEEL_DENSITY: f64 = 78.5;

/// Stress-strain curve family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebarKind {
    /// Hot rolled mild steel, bilinear
    MildSteel,
    /// High yield strength deformed bars, piecewise linear past 0.8 fd
    Hysd,
}

/// Reinforcing steel grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebarMaterial {
    /// Display label, e.g. "Fe 415"
    pub label: String,
    /// Characteristic yield (or 0.2% proof) strength fy (N/mm²)
    pub fy: f64,
    /// Partial safety factor γm
    #[serde(default = "default_gamma")]
    pub gamma_m: f64,
    /// Elastic modulus Es (N/mm²)
    #[serde(default = "default_modulus")]
    pub elastic_modulus: f64,
    /// Unit weight (kN/m³)
    #[serde(default = "default_density")]
    pub density: f64,
    pub kind: RebarKind,
}

fn default_gamma() -> f64 {
    GAMMA_STEEL
}

fn default_modulus() -> f64 {
    STEEL_ELASTIC_MODULUS
}

fn default_density() -> f64 {
    STEEL_DENSITY
}

impl RebarMaterial {
    /// Create a rebar grade with the default γm, Es and density.
    pub fn new(label: impl Into<String>, fy: f64, kind: RebarKind) -> CalcResult<Self> {
        let rebar = RebarMaterial {
            label: label.into(),
            fy,
            gamma_m: GAMMA_STEEL,
            elastic_modulus: STEEL_ELASTIC_MODULUS,
            density: STEEL_DENSITY,
            kind,
        };
        rebar.validate()?;
        Ok(rebar)
    }

    /// HYSD grade, e.g. `RebarMaterial::hysd(415.0)` is "Fe 415"
    pub fn hysd(fy: f64) -> CalcResult<Self> {
        RebarMaterial::new(format!("Fe {}", fy), fy, RebarKind::Hysd)
    }

    /// Mild steel grade, e.g. `RebarMaterial::mild_steel(250.0)` is "Fe 250"
    pub fn mild_steel(fy: f64) -> CalcResult<Self> {
        RebarMaterial::new(format!("Fe {}", fy), fy, RebarKind::MildSteel)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fy > 0.0 && self.fy.is_finite()) {
            return Err(CalcError::invalid_input(
                "fy",
                self.fy.to_string(),
                "Yield strength must be positive",
            ));
        }
        if !(self.gamma_m >= 1.0 && self.gamma_m.is_finite()) {
            return Err(CalcError::invalid_input(
                "gamma_m",
                self.gamma_m.to_string(),
                "Partial safety factor must be at least 1.0",
            ));
        }
        if !(self.elastic_modulus > 0.0 && self.elastic_modulus.is_finite()) {
            return Err(CalcError::invalid_input(
                "elastic_modulus",
                self.elastic_modulus.to_string(),
                "Elastic modulus must be positive",
            ));
        }
        Ok(())
    }

    /// Design strength fy / γm
    pub fn design_strength(&self) -> f64 {
        self.fy / self.gamma_m
    }

    /// Strain at which the design strength is first reached
    pub fn yield_strain(&self) -> f64 {
        match self.kind {
            RebarKind::MildSteel => self.design_strength() / self.elastic_modulus,
            RebarKind::Hysd => hysd_points(self.design_strength(), self.elastic_modulus)[5].1,
        }
    }

    /// Limiting tension strain fd / Es + 0.002 (IS 456 cl. 38.1 f)
    pub fn limiting_strain(&self) -> f64 {
        self.design_strength() / self.elastic_modulus + STEEL_PLASTIC_STRAIN
    }

    /// Signed design stress for a signed strain (compression positive)
    pub fn stress(&self, strain: f64) -> f64 {
        let fd = self.design_strength();
        match self.kind {
            RebarKind::MildSteel => mild_steel_stress(fd, self.elastic_modulus, strain),
            RebarKind::Hysd => hysd_stress(fd, self.elastic_modulus, strain),
        }
    }
}
