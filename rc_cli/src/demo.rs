//! Built-in demo project: the worked beams and a short column.

use rc_core::calculations::Section;
use rc_core::materials::{Concrete, RebarMaterial};
use rc_core::reinforcement::{
    ReinforcementGroup, ReinforcementLayer, ShearReinforcement, ShearReinforcementGroup, Stirrups,
};
use rc_core::{CalcResult, Project};

pub fn demo_project() -> CalcResult<Project> {
    let mut project = Project::new("Demo Engineer", "DEMO-001", "Demo Client");

    let m20 = Concrete::grade(20.0)?;
    let fe415 = RebarMaterial::hysd(415.0)?;
    let stirrups = ShearReinforcementGroup::new(vec![ShearReinforcement::Stirrups(Stirrups::vertical(
        fe415.clone(),
        2,
        8.0,
        150.0,
    )?)])?;

    let singly = ReinforcementGroup::new(fe415.clone(), vec![ReinforcementLayer::uniform(3, 16.0, -35.0)?])?;
    project.add_item(
        Section::rectangular_beam("B1 singly reinforced", 230.0, 450.0, m20.clone(), singly)?
            .with_shear_steel(stirrups.clone())?
            .with_clear_cover(25.0)?,
    )?;

    let doubly = ReinforcementGroup::new(
        fe415.clone(),
        vec![
            ReinforcementLayer::uniform(3, 16.0, -35.0)?,
            ReinforcementLayer::uniform(2, 16.0, 35.0)?,
        ],
    )?;
    project.add_item(
        Section::rectangular_beam("B2 doubly reinforced", 230.0, 450.0, m20.clone(), doubly)?
            .with_shear_steel(stirrups.clone())?
            .with_clear_cover(25.0)?,
    )?;

    let flanged = ReinforcementGroup::new(fe415.clone(), vec![ReinforcementLayer::uniform(3, 20.0, -35.0)?])?;
    project.add_item(
        Section::flanged_beam("T1 flanged", 230.0, 450.0, 900.0, 150.0, m20, flanged)?
            .with_shear_steel(stirrups)?
            .with_clear_cover(25.0)?,
    )?;

    let column_steel = ReinforcementGroup::new(
        fe415,
        vec![
            ReinforcementLayer::uniform(3, 20.0, 50.0)?,
            ReinforcementLayer::uniform(3, 20.0, -50.0)?,
        ],
    )?;
    project.add_item(
        Section::rectangular_column("C1 column", 300.0, 400.0, Concrete::grade(25.0)?, column_steel)?
            .with_clear_cover(40.0)?,
    )?;

    Ok(project)
}
