//! # Shear Capacity
//!
//! Ultimate shear resistance of a section at a given neutral-axis depth:
//!
//! ```text
//! Vu = min(Vuc + Σ Vus, τc,max · bw · d)
//! Vuc = τc · bw · d
//! ```
//!
//! The neutral axis fixes which layers are in tension, and so the effective
//! depth `d` and the steel percentage `pt` used with Table 19.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::equations::shear::{series_spacing, steel_percentage, tau_c, tau_c_max};
use crate::errors::{CalcError, CalcResult};
use crate::reinforcement::ShearReinforcement;
use crate::units::{KiloNewtons, Newtons};

/// Shear carried by one reinforcement component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearComponent {
    pub label: String,
    pub vus: KiloNewtons,
}

/// Shear capacity breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearCapacity {
    pub xu: f64,
    /// Effective depth (mm)
    pub effective_depth: f64,
    pub web_breadth: f64,
    /// Tension steel area (mm²)
    pub tension_steel_area: f64,
    /// Steel percentage after clamping to Table 19 limits
    pub pt: f64,
    /// Design shear strength of concrete (N/mm²)
    pub tau_c: f64,
    /// Maximum shear stress (N/mm²), None below M15
    pub tau_c_max: Option<f64>,
    pub vuc: KiloNewtons,
    pub components: Vec<ShearComponent>,
    pub vus: KiloNewtons,
    pub vu: KiloNewtons,
    /// True when τc,max · bw · d governs
    pub capped: bool,
}

impl Section {
    /// Shear capacity with the neutral axis at `xu`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when no layer is in tension at `xu`, since the
    /// effective depth is then undefined.
    pub fn shear_capacity(&self, xu: f64) -> CalcResult<ShearCapacity> {
        let depth = self.depth();
        let d = self.effective_depth(xu).ok_or_else(|| {
            CalcError::invalid_input(
                "xu",
                xu.to_string(),
                format!("No tension reinforcement below the neutral axis of '{}'", self.label),
            )
        })?;

        let bw = self.shape.web_breadth();
        let ast = self.main_steel.tension_area(xu, depth);
        let pt = steel_percentage(ast, bw, d);
        let tc = tau_c(self.concrete.fck, pt);
        let tc_max = tau_c_max(self.concrete.fck);

        let vuc = Newtons(tc * bw * d);
        let components: Vec<ShearComponent> = self
            .shear_steel
            .items
            .iter()
            .map(|item| ShearComponent {
                label: item.label(),
                vus: Newtons(item.capacity(d)).into(),
            })
            .collect();
        let vus = Newtons(self.shear_steel.capacity(d));

        let uncapped = vuc + vus;
        let (vu, capped) = match tc_max.map(|limit| Newtons(limit * bw * d)) {
            Some(cap) if uncapped > cap => (cap, true),
            _ => (uncapped, false),
        };

        Ok(ShearCapacity {
            xu,
            effective_depth: d,
            web_breadth: bw,
            tension_steel_area: ast,
            pt,
            tau_c: tc,
            tau_c_max: tc_max,
            vuc: vuc.into(),
            components,
            vus: vus.into(),
            vu: vu.into(),
            capped,
        })
    }
}

/// Spacing at which `template` carries `target_vus` at effective depth `d` (mm).
///
/// Only series reinforcement has a spacing; a single group of bent-up bars
/// is rejected.
pub fn required_spacing(target_vus: KiloNewtons, template: &ShearReinforcement, d: f64) -> CalcResult<f64> {
    let vus = Newtons::from(target_vus).0;
    if !(vus > 0.0 && vus.is_finite()) {
        return Err(CalcError::invalid_input(
            "target_vus",
            target_vus.0.to_string(),
            "Target shear must be positive",
        ));
    }
    if !(d > 0.0 && d.is_finite()) {
        return Err(CalcError::invalid_input("d", d.to_string(), "Effective depth must be positive"));
    }

    match template {
        ShearReinforcement::Stirrups(s) => Ok(series_spacing(
            s.rebar.design_strength(),
            s.area(),
            d,
            vus,
            s.angle_deg,
        )),
        ShearReinforcement::BentUpBars(b) if !b.is_single_group() => Ok(series_spacing(
            b.rebar.design_strength(),
            b.area(),
            d,
            vus,
            b.angle_deg,
        )),
        ShearReinforcement::BentUpBars(_) => Err(CalcError::invalid_input(
            "template",
            "single group of bent-up bars",
            "A single group of bent-up bars has no spacing",
        )),
    }
}
