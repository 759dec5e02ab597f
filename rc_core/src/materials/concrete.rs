//! # Concrete
//!
//! Characteristic-strength based concrete grades (M15, M20, ...) with the
//! limit-state stress block of IS 456 cl. 38.1.

use serde::{Deserialize, Serialize};

use crate::equations::stress_block::{
    concrete_design_strength, concrete_elastic_modulus, concrete_stress_ratio, EC_ULTIMATE,
    GAMMA_CONCRETE,
};
use crate::errors::{CalcError, CalcResult};

/// Tolerance on strain limits, absorbs round-off in `slope · x`
pub(crate) const STRAIN_EPSILON: f64 = 1e-12;

/// Default unit weight of reinforced concrete (kN/m³)
pub const CONCRETE_DENSITY: f64 = 25.0;

/// Concrete grade with its partial safety factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concrete {
    /// Display label, e.g. "M20"
    pub label: String,
    /// Characteristic cube strength fck (N/mm²)
    pub fck: f64,
    /// Partial safety factor γm
    #[serde(default = "default_gamma")]
    pub gamma_m: f64,
    /// Unit weight (kN/m³)
    #[serde(default = "default_density")]
    pub density: f64,
}

fn default_gamma() -> f64 {
    GAMMA_CONCRETE
}

fn default_density() -> f64 {
    CONCRETE_DENSITY
}

impl Concrete {
    /// Create a concrete grade with the default γm = 1.5.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::materials::Concrete;
    ///
    /// let m20 = Concrete::new("M20", 20.0).unwrap();
    /// assert!((m20.design_strength() - 8.933).abs() < 1e-3);
    /// ```
    pub fn new(label: impl Into<String>, fck: f64) -> CalcResult<Self> {
        let concrete = Concrete {
            label: label.into(),
            fck,
            gamma_m: GAMMA_CONCRETE,
            density: CONCRETE_DENSITY,
        };
        concrete.validate()?;
        Ok(concrete)
    }

    /// Standard grade named after its strength, e.g. `Concrete::grade(25.0)` is "M25"
    pub fn grade(fck: f64) -> CalcResult<Self> {
        Concrete::new(format!("M{}", fck), fck)
    }

    /// Check material properties
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fck > 0.0 && self.fck.is_finite()) {
            return Err(CalcError::invalid_input(
                "fck",
                self.fck.to_string(),
                "Characteristic strength must be positive",
            ));
        }
        if !(self.gamma_m >= 1.0 && self.gamma_m.is_finite()) {
            return Err(CalcError::invalid_input(
                "gamma_m",
                self.gamma_m.to_string(),
                "Partial safety factor must be at least 1.0",
            ));
        }
        Ok(())
    }

    /// Design strength of the stress block, 0.67 fck / γm
    pub fn design_strength(&self) -> f64 {
        concrete_design_strength(self.fck, self.gamma_m)
    }

    /// Short-term elastic modulus (N/mm²)
    pub fn elastic_modulus(&self) -> f64 {
        concrete_elastic_modulus(self.fck)
    }

    /// Stress ratio σ/fd for a compressive strain in `[0, εcu]`.
    pub fn stress_ratio(&self, strain: f64) -> CalcResult<f64> {
        if !(-STRAIN_EPSILON..=EC_ULTIMATE + STRAIN_EPSILON).contains(&strain) {
            return Err(CalcError::strain_out_of_range(strain, 0.0, EC_ULTIMATE));
        }
        Ok(concrete_stress_ratio(strain))
    }

    /// Design stress for a compressive strain in `[0, εcu]`.
    pub fn stress(&self, strain: f64) -> CalcResult<f64> {
        Ok(self.design_strength() * self.stress_ratio(strain)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_values() {
        let m20 = Concrete::grade(20.0).unwrap();
        assert_eq!(m20.label, "M20");
        assert!((m20.design_strength() - 0.67 * 20.0 / 1.5).abs() < 1e-12);
        assert!((m20.elastic_modulus() - 22_360.68).abs() < 0.01);
    }

    #[test]
    fn test_stress_curve() {
        let m25 = Concrete::grade(25.0).unwrap();
        let fd = m25.design_strength();
        assert_eq!(m25.stress(0.0).unwrap(), 0.0);
        assert!((m25.stress(0.001).unwrap() - 0.75 * fd).abs() < 1e-12);
        assert!((m25.stress(EC_ULTIMATE).unwrap() - fd).abs() < 1e-12);
    }

    #[test]
    fn test_strain_out_of_range() {
        let m20 = Concrete::grade(20.0).unwrap();
        assert!(matches!(m20.stress(0.004), Err(CalcError::StrainOutOfRange { .. })));
        assert!(matches!(m20.stress(-0.001), Err(CalcError::StrainOutOfRange { .. })));
    }

    #[test]
    fn test_invalid_grade() {
        assert!(Concrete::new("M0", 0.0).is_err());
        assert!(Concrete::new("bad", f64::NAN).is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let concrete: Concrete = serde_json::from_str(r#"{"label": "M30", "fck": 30.0}"#).unwrap();
        assert_eq!(concrete.gamma_m, GAMMA_CONCRETE);
        assert_eq!(concrete.density, CONCRETE_DENSITY);
    }
}
