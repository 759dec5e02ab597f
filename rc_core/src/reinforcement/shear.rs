//! # Shear Reinforcement
//!
//! Stirrups and bent-up bars (IS 456 cl. 40.4). Each component reports the
//! shear it carries for a given effective depth.

use serde::{Deserialize, Serialize};

use super::bar_area;
use crate::equations::shear::{series_capacity, single_group_capacity};
use crate::errors::{CalcError, CalcResult};
use crate::materials::RebarMaterial;

const MIN_ANGLE_DEG: f64 = 45.0;
const MAX_ANGLE_DEG: f64 = 90.0;

fn validate_angle(angle_deg: f64) -> CalcResult<()> {
    if !(MIN_ANGLE_DEG..=MAX_ANGLE_DEG).contains(&angle_deg) {
        return Err(CalcError::invalid_input(
            "angle_deg",
            angle_deg.to_string(),
            "Shear bars must be inclined between 45 and 90 degrees",
        ));
    }
    Ok(())
}

/// Closed stirrups with `legs` vertical (or inclined) legs at spacing `spacing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stirrups {
    pub rebar: RebarMaterial,
    pub legs: u32,
    pub bar_diameter: f64,
    /// Spacing along the member (mm)
    pub spacing: f64,
    /// Inclination to the member axis (degrees)
    #[serde(default = "vertical")]
    pub angle_deg: f64,
}

fn vertical() -> f64 {
    90.0
}

impl Stirrups {
    pub fn new(rebar: RebarMaterial, legs: u32, bar_diameter: f64, spacing: f64, angle_deg: f64) -> CalcResult<Self> {
        let stirrups = Stirrups {
            rebar,
            legs,
            bar_diameter,
            spacing,
            angle_deg,
        };
        stirrups.validate()?;
        Ok(stirrups)
    }

    /// Vertical stirrups
    pub fn vertical(rebar: RebarMaterial, legs: u32, bar_diameter: f64, spacing: f64) -> CalcResult<Self> {
        Stirrups::new(rebar, legs, bar_diameter, spacing, 90.0)
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.rebar.validate()?;
        if self.legs == 0 {
            return Err(CalcError::invalid_input("legs", "0", "Stirrups need at least one leg"));
        }
        if !(self.bar_diameter > 0.0 && self.bar_diameter.is_finite()) {
            return Err(CalcError::invalid_input(
                "bar_diameter",
                self.bar_diameter.to_string(),
                "Bar diameter must be positive",
            ));
        }
        if !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(CalcError::invalid_input(
                "spacing",
                self.spacing.to_string(),
                "Stirrup spacing must be positive",
            ));
        }
        validate_angle(self.angle_deg)
    }

    /// Area of one set of legs, Asv (mm²)
    pub fn area(&self) -> f64 {
        self.legs as f64 * bar_area(self.bar_diameter)
    }

    /// Shear carried (N) at effective depth `d`
    pub fn capacity(&self, d: f64) -> f64 {
        series_capacity(self.rebar.design_strength(), self.area(), d, self.spacing, self.angle_deg)
    }

    pub fn label(&self) -> String {
        format!("{}L-{}@{}", self.legs, self.bar_diameter, self.spacing)
    }
}

/// Bent-up longitudinal bars. A spacing of zero means a single group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BentUpBars {
    pub rebar: RebarMaterial,
    pub bar_diameters: Vec<f64>,
    #[serde(default = "default_bent_angle")]
    pub angle_deg: f64,
    #[serde(default)]
    pub spacing: f64,
}

fn default_bent_angle() -> f64 {
    45.0
}

impl BentUpBars {
    pub fn new(rebar: RebarMaterial, bar_diameters: Vec<f64>, angle_deg: f64, spacing: f64) -> CalcResult<Self> {
        let bars = BentUpBars {
            rebar,
            bar_diameters,
            angle_deg,
            spacing,
        };
        bars.validate()?;
        Ok(bars)
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.rebar.validate()?;
        if self.bar_diameters.is_empty() {
            return Err(CalcError::invalid_input(
                "bar_diameters",
                "[]",
                "Bent-up bars need at least one bar",
            ));
        }
        if let Some(bad) = self.bar_diameters.iter().find(|d| !(**d > 0.0 && d.is_finite())) {
            return Err(CalcError::invalid_input(
                "bar_diameters",
                bad.to_string(),
                "Bar diameters must be positive",
            ));
        }
        if !(self.spacing >= 0.0 && self.spacing.is_finite()) {
            return Err(CalcError::invalid_input(
                "spacing",
                self.spacing.to_string(),
                "Spacing must be zero (single group) or positive",
            ));
        }
        validate_angle(self.angle_deg)
    }

    pub fn is_single_group(&self) -> bool {
        self.spacing == 0.0
    }

    pub fn area(&self) -> f64 {
        self.bar_diameters.iter().map(|&d| bar_area(d)).sum()
    }

    /// Shear carried (N) at effective depth `d`
    pub fn capacity(&self, d: f64) -> f64 {
        let fd = self.rebar.design_strength();
        if self.is_single_group() {
            single_group_capacity(fd, self.area(), self.angle_deg)
        } else {
            series_capacity(fd, self.area(), d, self.spacing, self.angle_deg)
        }
    }

    pub fn label(&self) -> String {
        let bars = self
            .bar_diameters
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if self.is_single_group() {
            format!("bent-up {} @{}°", bars, self.angle_deg)
        } else {
            format!("bent-up {} @{}° s={}", bars, self.angle_deg, self.spacing)
        }
    }
}

/// One shear reinforcement component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShearReinforcement {
    Stirrups(Stirrups),
    BentUpBars(BentUpBars),
}

impl ShearReinforcement {
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            ShearReinforcement::Stirrups(s) => s.validate(),
            ShearReinforcement::BentUpBars(b) => b.validate(),
        }
    }

    pub fn capacity(&self, d: f64) -> f64 {
        match self {
            ShearReinforcement::Stirrups(s) => s.capacity(d),
            ShearReinforcement::BentUpBars(b) => b.capacity(d),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ShearReinforcement::Stirrups(s) => s.label(),
            ShearReinforcement::BentUpBars(b) => b.label(),
        }
    }
}

/// Zero or more shear reinforcement components of one section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShearReinforcementGroup {
    pub items: Vec<ShearReinforcement>,
}

impl ShearReinforcementGroup {
    pub fn new(items: Vec<ShearReinforcement>) -> CalcResult<Self> {
        let group = ShearReinforcementGroup { items };
        group.validate()?;
        Ok(group)
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.items.iter().try_for_each(ShearReinforcement::validate)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total shear carried (N) at effective depth `d`
    pub fn capacity(&self, d: f64) -> f64 {
        self.items.iter().map(|item| item.capacity(d)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe415() -> RebarMaterial {
        RebarMaterial::hysd(415.0).unwrap()
    }

    #[test]
    fn test_vertical_stirrups() {
        let stirrups = Stirrups::vertical(fe415(), 2, 8.0, 150.0).unwrap();
        assert!((stirrups.area() - 100.531).abs() < 1e-3);
        assert!((stirrups.capacity(415.0) / 1000.0 - 100.37).abs() < 0.01);
        assert_eq!(stirrups.label(), "2L-8@150");
    }

    #[test]
    fn test_inclined_stirrups_carry_more() {
        let vertical = Stirrups::vertical(fe415(), 2, 8.0, 150.0).unwrap();
        let inclined = Stirrups::new(fe415(), 2, 8.0, 150.0, 60.0).unwrap();
        assert!(inclined.capacity(415.0) > vertical.capacity(415.0));
    }

    #[test]
    fn test_stirrup_validation() {
        assert!(Stirrups::vertical(fe415(), 0, 8.0, 150.0).is_err());
        assert!(Stirrups::vertical(fe415(), 2, 8.0, 0.0).is_err());
        assert!(Stirrups::new(fe415(), 2, 8.0, 150.0, 30.0).is_err());
    }

    #[test]
    fn test_bent_up_single_group() {
        let bars = BentUpBars::new(fe415(), vec![16.0], 45.0, 0.0).unwrap();
        assert!(bars.is_single_group());
        let expected = 415.0 / 1.15 * bar_area(16.0) * (45.0f64).to_radians().sin();
        assert!((bars.capacity(415.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bent_up_series() {
        let bars = BentUpBars::new(fe415(), vec![16.0, 16.0], 45.0, 300.0).unwrap();
        let expected = series_capacity(415.0 / 1.15, 2.0 * bar_area(16.0), 415.0, 300.0, 45.0);
        assert!((bars.capacity(415.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_group_total() {
        let stirrups = Stirrups::vertical(fe415(), 2, 8.0, 150.0).unwrap();
        let bent = BentUpBars::new(fe415(), vec![16.0], 45.0, 0.0).unwrap();
        let group = ShearReinforcementGroup::new(vec![
            ShearReinforcement::Stirrups(stirrups.clone()),
            ShearReinforcement::BentUpBars(bent.clone()),
        ])
        .unwrap();
        let total = stirrups.capacity(415.0) + bent.capacity(415.0);
        assert!((group.capacity(415.0) - total).abs() < 1e-9);
        assert_eq!(ShearReinforcementGroup::default().capacity(415.0), 0.0);
    }

    #[test]
    fn test_tagged_serialization() {
        let item = ShearReinforcement::Stirrups(Stirrups::vertical(fe415(), 2, 8.0, 150.0).unwrap());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Stirrups\""));
        let roundtrip: ShearReinforcement = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
    }
}
