//! # Section Calculations
//!
//! Everything that evaluates a [`Section`]:
//!
//! - [`section`] - Section shapes, concrete blocks and rebar resultants
//! - [`solver`] - Bracket-and-bisect search for the neutral axis
//! - [`flexure`] - Equilibrium depth and moment of resistance
//! - [`shear`] - Concrete and reinforcement shear capacity
//! - [`column`] - Axial load / moment interaction points
//!
//! Results are returned per call; nothing derived is stored on the section.
//!
//! ## Example
//!
//! ```rust
//! use rc_core::calculations::Section;
//! use rc_core::materials::{Concrete, RebarMaterial};
//! use rc_core::project::AnalysisSettings;
//! use rc_core::reinforcement::{ReinforcementGroup, ReinforcementLayer};
//!
//! let steel = ReinforcementGroup::new(
//!     RebarMaterial::hysd(415.0).unwrap(),
//!     vec![ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap()],
//! ).unwrap();
//! let beam = Section::rectangular_beam("B1", 230.0, 450.0, Concrete::grade(20.0).unwrap(), steel).unwrap();
//!
//! let analysis = beam.analyse(&AnalysisSettings::default()).unwrap();
//! println!("xu = {:.2} mm, Mu = {:.2} kN·m", analysis.equilibrium.xu, analysis.flexure.mu.0);
//! ```

pub mod column;
pub mod flexure;
pub mod section;
pub mod shear;
pub mod solver;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::project::AnalysisSettings;

pub use column::InteractionPoint;
pub use flexure::{limiting_depth, FlexureCapacity, Resultant};
pub use section::{ConcreteBlock, Section, SectionShape};
pub use shear::{required_spacing, ShearCapacity, ShearComponent};
pub use solver::{EquilibriumSolution, SolveStatus, SolverSettings};

/// Combined results for one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub label: String,
    pub shape: String,
    pub equilibrium: EquilibriumSolution,
    pub flexure: FlexureCapacity,
    /// Present when tension steel exists at the equilibrium depth
    pub shear: Option<ShearCapacity>,
    /// Pure-bending point, columns only
    pub interaction: Option<InteractionPoint>,
}

impl Section {
    /// Equilibrium, flexure and shear in one pass.
    pub fn analyse(&self, settings: &AnalysisSettings) -> CalcResult<SectionAnalysis> {
        settings.validate()?;
        let equilibrium = self.equilibrium_xu(settings.ec_max, &settings.solver)?;
        let flexure = self.flexure_capacity(equilibrium.xu, settings.ec_max)?;

        let shear = match self.effective_depth(equilibrium.xu) {
            Some(_) => Some(self.shear_capacity(equilibrium.xu)?),
            None => None,
        };
        let interaction = if self.shape.is_column() {
            Some(self.interaction_point(equilibrium.xu, settings.ec_max)?)
        } else {
            None
        };

        info!(
            "{}: xu = {:.3} mm, Mu = {:.3} kN·m{}",
            self.label,
            equilibrium.xu,
            flexure.mu.0,
            shear
                .as_ref()
                .map(|s| format!(", Vu = {:.3} kN", s.vu.0))
                .unwrap_or_default()
        );

        Ok(SectionAnalysis {
            label: self.label.clone(),
            shape: self.shape.name().to_string(),
            equilibrium,
            flexure,
            shear,
            interaction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Concrete, RebarMaterial};
    use crate::reinforcement::{
        ReinforcementGroup, ReinforcementLayer, ShearReinforcement, ShearReinforcementGroup, Stirrups,
    };

    #[test]
    fn test_analyse_reference_beam() {
        let fe415 = RebarMaterial::hysd(415.0).unwrap();
        let steel =
            ReinforcementGroup::new(fe415.clone(), vec![ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap()]).unwrap();
        let stirrups = ShearReinforcementGroup::new(vec![ShearReinforcement::Stirrups(
            Stirrups::vertical(fe415, 2, 8.0, 150.0).unwrap(),
        )])
        .unwrap();
        let beam = Section::rectangular_beam("B1", 230.0, 450.0, Concrete::grade(20.0).unwrap(), steel)
            .unwrap()
            .with_shear_steel(stirrups)
            .unwrap();

        let analysis = beam.analyse(&AnalysisSettings::default()).unwrap();
        assert_eq!(analysis.shape, "Rectangular beam");
        assert!((analysis.equilibrium.xu - 130.867).abs() < 0.01);
        assert!((analysis.flexure.mu.0 - 78.484).abs() < 0.01);
        let shear = analysis.shear.unwrap();
        assert!((shear.vu.0 - 150.44).abs() < 0.05);
        assert!(analysis.interaction.is_none());
    }

    #[test]
    fn test_analysis_serializes() {
        let steel = ReinforcementGroup::new(
            RebarMaterial::hysd(500.0).unwrap(),
            vec![ReinforcementLayer::uniform(4, 20.0, -40.0).unwrap()],
        )
        .unwrap();
        let beam = Section::rectangular_beam("B3", 300.0, 600.0, Concrete::grade(25.0).unwrap(), steel).unwrap();
        let analysis = beam.analyse(&AnalysisSettings::default()).unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"label\":\"B3\""));
        let roundtrip: SectionAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.label, "B3");
    }
}
