//! # Reinforcement Layout
//!
//! Longitudinal bars are arranged in layers. A layer is a set of bars at one
//! distance from an edge of the section:
//!
//! ```text
//!   ┌─────────────┐  ← highly compressed edge
//!   │  o       o  │  distance = +35   (measured from the compressed edge)
//!   │             │
//!   │             │
//!   │  o   o   o  │  distance = -35   (measured from the tension edge)
//!   └─────────────┘
//! ```
//!
//! Whether a layer is in compression or tension depends on the trial
//! neutral-axis depth, so layer states are computed per call and never stored.
//!
//! Shear reinforcement lives in [`shear`].

pub mod shear;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{Concrete, RebarMaterial, StrainProfile};

pub use shear::{BentUpBars, ShearReinforcement, ShearReinforcementGroup, Stirrups};

/// Relative tolerance for a layer sitting on the neutral axis
const NEUTRAL_TOLERANCE: f64 = 1e-9;

/// Area of a single bar of diameter `d` (mm²)
#[inline]
pub fn bar_area(d: f64) -> f64 {
    PI / 4.0 * d * d
}

/// Stress state of a layer relative to the neutral axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerStress {
    Compression,
    Tension,
    Neutral,
}

/// Classify a layer at depth `xc` from the compressed edge for a neutral axis at `xu`.
pub fn classify(xc: f64, xu: f64) -> LayerStress {
    if (xc - xu).abs() <= NEUTRAL_TOLERANCE * xu.abs().max(1.0) {
        LayerStress::Neutral
    } else if xc < xu {
        LayerStress::Compression
    } else {
        LayerStress::Tension
    }
}

/// One row of longitudinal bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayer {
    /// Bar diameters in this layer (mm)
    pub diameters: Vec<f64>,
    /// Distance to the bar centres (mm): positive from the compressed edge,
    /// negative from the tension edge
    pub distance: f64,
}

impl ReinforcementLayer {
    /// Create a layer from its bar diameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::reinforcement::ReinforcementLayer;
    ///
    /// let layer = ReinforcementLayer::new(vec![16.0, 20.0, 20.0], -35.0).unwrap();
    /// assert_eq!(layer.bar_list(), "1-16;2-20");
    /// ```
    pub fn new(diameters: Vec<f64>, distance: f64) -> CalcResult<Self> {
        let layer = ReinforcementLayer { diameters, distance };
        layer.validate()?;
        Ok(layer)
    }

    /// `count` bars of one diameter
    pub fn uniform(count: usize, diameter: f64, distance: f64) -> CalcResult<Self> {
        ReinforcementLayer::new(vec![diameter; count], distance)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.diameters.is_empty() {
            return Err(CalcError::invalid_input(
                "diameters",
                "[]",
                "A layer needs at least one bar",
            ));
        }
        if let Some(bad) = self.diameters.iter().find(|d| !(**d > 0.0 && d.is_finite())) {
            return Err(CalcError::invalid_input(
                "diameters",
                bad.to_string(),
                "Bar diameters must be positive",
            ));
        }
        if !self.distance.is_finite() {
            return Err(CalcError::invalid_input(
                "distance",
                self.distance.to_string(),
                "Layer distance must be finite",
            ));
        }
        Ok(())
    }

    /// Total bar area (mm²)
    pub fn area(&self) -> f64 {
        self.diameters.iter().map(|&d| bar_area(d)).sum()
    }

    pub fn max_diameter(&self) -> f64 {
        self.diameters.iter().copied().fold(0.0, f64::max)
    }

    /// Bar list grouped by diameter, ascending: "3-16", "1-16;2-20"
    pub fn bar_list(&self) -> String {
        let mut sorted = self.diameters.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mut groups: Vec<(f64, usize)> = Vec::new();
        for d in sorted {
            match groups.last_mut() {
                Some((last, count)) if *last == d => *count += 1,
                _ => groups.push((d, 1)),
            }
        }

        groups
            .iter()
            .map(|(d, count)| format!("{}-{}", count, d))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Depth of the bar centres from the compressed edge of a section of depth `depth`
    pub fn position(&self, depth: f64) -> f64 {
        if self.distance >= 0.0 {
            self.distance
        } else {
            depth + self.distance
        }
    }
}

/// Per-trial state of one layer. Forces in N, moments in N·mm about the neutral axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    pub bar_list: String,
    pub area: f64,
    /// Depth from the compressed edge (mm)
    pub position: f64,
    pub stress_type: LayerStress,
    pub strain: f64,
    /// Steel stress (N/mm², compression positive)
    pub stress: f64,
    /// Concrete stress displaced by the bars (zero unless in compression)
    pub concrete_stress: f64,
    /// Net force, compression positive
    pub force: f64,
    /// Moment about the neutral axis, F · (xu − xc)
    pub moment: f64,
}

/// Longitudinal layers sharing one rebar material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementGroup {
    pub rebar: RebarMaterial,
    pub layers: Vec<ReinforcementLayer>,
}

impl ReinforcementGroup {
    pub fn new(rebar: RebarMaterial, layers: Vec<ReinforcementLayer>) -> CalcResult<Self> {
        let group = ReinforcementGroup { rebar, layers };
        group.validate()?;
        Ok(group)
    }

    /// Build a group from layers that each name their material.
    ///
    /// All layers must use the same material, otherwise `MixedRebar`.
    pub fn from_tagged_layers(tagged: Vec<(RebarMaterial, ReinforcementLayer)>) -> CalcResult<Self> {
        let mut iter = tagged.into_iter();
        let (rebar, first) = iter.next().ok_or_else(|| {
            CalcError::invalid_input("layers", "[]", "A reinforcement group needs at least one layer")
        })?;

        let mut layers = vec![first];
        for (material, layer) in iter {
            if material != rebar {
                return Err(CalcError::mixed_rebar(rebar.label.clone(), material.label));
            }
            layers.push(layer);
        }
        ReinforcementGroup::new(rebar, layers)
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.rebar.validate()?;
        if self.layers.is_empty() {
            return Err(CalcError::invalid_input(
                "layers",
                "[]",
                "A reinforcement group needs at least one layer",
            ));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    /// Total area of all layers (mm²)
    pub fn area(&self) -> f64 {
        self.layers.iter().map(ReinforcementLayer::area).sum()
    }

    /// Bar list of every layer, joined
    pub fn bar_list(&self) -> String {
        self.layers
            .iter()
            .map(ReinforcementLayer::bar_list)
            .collect::<Vec<_>>()
            .join(";")
    }

    fn layers_in(&self, xu: f64, depth: f64, kind: LayerStress) -> impl Iterator<Item = &ReinforcementLayer> {
        self.layers
            .iter()
            .filter(move |layer| classify(layer.position(depth), xu) == kind)
    }

    /// Area of layers in tension at `xu`
    pub fn tension_area(&self, xu: f64, depth: f64) -> f64 {
        self.layers_in(xu, depth, LayerStress::Tension).map(|l| l.area()).sum()
    }

    /// Area of layers in compression at `xu`
    pub fn compression_area(&self, xu: f64, depth: f64) -> f64 {
        self.layers_in(xu, depth, LayerStress::Compression).map(|l| l.area()).sum()
    }

    /// Centroid of the tension layers from the compressed edge, i.e. the effective depth
    pub fn tension_centroid(&self, xu: f64, depth: f64) -> Option<f64> {
        let (area, first_moment) = self
            .layers_in(xu, depth, LayerStress::Tension)
            .fold((0.0, 0.0), |(a, m), layer| {
                let area = layer.area();
                (a + area, m + area * layer.position(depth))
            });
        if area > 0.0 {
            Some(first_moment / area)
        } else {
            None
        }
    }

    /// Force and moment of every layer for one strain profile
    pub fn layer_states(
        &self,
        profile: &StrainProfile,
        depth: f64,
        concrete: &Concrete,
    ) -> CalcResult<Vec<LayerState>> {
        let xu = profile.xu;
        self.layers
            .iter()
            .map(|layer| -> CalcResult<LayerState> {
                let position = layer.position(depth);
                let stress_type = classify(position, xu);
                let lever = xu - position;
                let strain = match stress_type {
                    LayerStress::Neutral => 0.0,
                    _ => profile.strain_at(lever),
                };
                let stress = self.rebar.stress(strain);
                let concrete_stress = match stress_type {
                    LayerStress::Compression => concrete.stress(strain)?,
                    _ => 0.0,
                };
                let area = layer.area();
                let force = area * (stress - concrete_stress);
                Ok(LayerState {
                    bar_list: layer.bar_list(),
                    area,
                    position,
                    stress_type,
                    strain,
                    stress,
                    concrete_stress,
                    force,
                    moment: force * lever,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::stress_block::EC_ULTIMATE;
    use crate::materials::StressBlock;

    fn fe415() -> RebarMaterial {
        RebarMaterial::hysd(415.0).unwrap()
    }

    #[test]
    fn test_layer_area_and_label() {
        let layer = ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap();
        assert!((layer.area() - 603.186).abs() < 1e-3);
        assert_eq!(layer.bar_list(), "3-16");
        assert_eq!(layer.max_diameter(), 16.0);
    }

    #[test]
    fn test_mixed_diameter_label() {
        let layer = ReinforcementLayer::new(vec![20.0, 16.0, 20.0], 35.0).unwrap();
        assert_eq!(layer.bar_list(), "1-16;2-20");
    }

    #[test]
    fn test_position() {
        let bottom = ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap();
        let top = ReinforcementLayer::uniform(2, 16.0, 35.0).unwrap();
        assert_eq!(bottom.position(450.0), 415.0);
        assert_eq!(top.position(450.0), 35.0);
    }

    #[test]
    fn test_invalid_layers() {
        assert!(ReinforcementLayer::new(vec![], -35.0).is_err());
        assert!(ReinforcementLayer::new(vec![16.0, -2.0], -35.0).is_err());
        assert!(ReinforcementLayer::new(vec![16.0], f64::INFINITY).is_err());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(35.0, 100.0), LayerStress::Compression);
        assert_eq!(classify(415.0, 100.0), LayerStress::Tension);
        assert_eq!(classify(100.0, 100.0), LayerStress::Neutral);
    }

    #[test]
    fn test_from_tagged_layers_rejects_mixed() {
        let bottom = ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap();
        let top = ReinforcementLayer::uniform(2, 12.0, 35.0).unwrap();
        let mild = RebarMaterial::mild_steel(250.0).unwrap();

        let result = ReinforcementGroup::from_tagged_layers(vec![(fe415(), bottom.clone()), (mild, top.clone())]);
        assert!(matches!(result, Err(CalcError::MixedRebar { .. })));

        let group = ReinforcementGroup::from_tagged_layers(vec![(fe415(), bottom), (fe415(), top)]).unwrap();
        assert_eq!(group.layers.len(), 2);
    }

    #[test]
    fn test_tension_and_compression_totals() {
        let group = ReinforcementGroup::new(
            fe415(),
            vec![
                ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap(),
                ReinforcementLayer::uniform(2, 16.0, 35.0).unwrap(),
            ],
        )
        .unwrap();
        let area_16 = bar_area(16.0);
        assert!((group.tension_area(100.0, 450.0) - 3.0 * area_16).abs() < 1e-9);
        assert!((group.compression_area(100.0, 450.0) - 2.0 * area_16).abs() < 1e-9);
        assert!((group.tension_centroid(100.0, 450.0).unwrap() - 415.0).abs() < 1e-9);
        // Neutral axis below both layers: nothing in tension
        assert!(group.tension_centroid(430.0, 450.0).is_none());
    }

    #[test]
    fn test_layer_states_signs() {
        let concrete = Concrete::grade(20.0).unwrap();
        let group = ReinforcementGroup::new(
            fe415(),
            vec![
                ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap(),
                ReinforcementLayer::uniform(2, 16.0, 35.0).unwrap(),
            ],
        )
        .unwrap();
        let profile = StressBlock::Flexure.profile(100.0, 450.0, EC_ULTIMATE).unwrap();
        let states = group.layer_states(&profile, 450.0, &concrete).unwrap();

        let tension = &states[0];
        assert_eq!(tension.stress_type, LayerStress::Tension);
        assert!(tension.force < 0.0);
        assert!(tension.moment > 0.0);
        assert!((tension.stress + 415.0 / 1.15).abs() < 1e-9);

        let compression = &states[1];
        assert_eq!(compression.stress_type, LayerStress::Compression);
        assert!(compression.force > 0.0);
        assert!(compression.moment > 0.0);
        assert!(compression.concrete_stress > 0.0);
    }
}
