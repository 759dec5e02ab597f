//! # Section Definitions and Resultants
//!
//! A [`Section`] combines a shape, a concrete grade and its reinforcement.
//! For a trial neutral-axis depth it produces the concrete compression
//! blocks, the per-layer rebar states and the net axial force.
//!
//! ## Shapes
//!
//! ```text
//!  RectangularBeam     FlangedBeam              RectangularColumn
//!   ┌────b────┐      ┌───────bf────────┐         ┌────b────┐
//!   │         │      │      Df         │         │ o     o │
//!   │         D      └────┐       ┌────┘         │         D
//!   │ o  o  o │           │  bw   │ D            │ o     o │
//!   └─────────┘           │ o o o │              └─────────┘
//!                         └───────┘
//! ```
//!
//! Distances are measured from the highly compressed edge. Concrete is
//! assumed cracked (no tension) everywhere below the neutral axis.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{Concrete, StrainProfile, StressBlock};
use crate::reinforcement::{LayerState, ReinforcementGroup, ShearReinforcementGroup};

/// Cross-section geometry (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionShape {
    RectangularBeam {
        breadth: f64,
        depth: f64,
    },
    FlangedBeam {
        web_breadth: f64,
        depth: f64,
        flange_breadth: f64,
        flange_depth: f64,
    },
    RectangularColumn {
        breadth: f64,
        depth: f64,
    },
}

impl SectionShape {
    /// Overall depth D
    pub fn depth(&self) -> f64 {
        match *self {
            SectionShape::RectangularBeam { depth, .. }
            | SectionShape::FlangedBeam { depth, .. }
            | SectionShape::RectangularColumn { depth, .. } => depth,
        }
    }

    /// Breadth resisting shear (web breadth for flanged sections)
    pub fn web_breadth(&self) -> f64 {
        match *self {
            SectionShape::RectangularBeam { breadth, .. }
            | SectionShape::RectangularColumn { breadth, .. } => breadth,
            SectionShape::FlangedBeam { web_breadth, .. } => web_breadth,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, SectionShape::RectangularColumn { .. })
    }

    pub fn stress_block(&self) -> StressBlock {
        if self.is_column() {
            StressBlock::AxialFlexure
        } else {
            StressBlock::Flexure
        }
    }

    /// Gross concrete area (mm²)
    pub fn gross_area(&self) -> f64 {
        match *self {
            SectionShape::RectangularBeam { breadth, depth }
            | SectionShape::RectangularColumn { breadth, depth } => breadth * depth,
            SectionShape::FlangedBeam {
                web_breadth,
                depth,
                flange_breadth,
                flange_depth,
            } => web_breadth * depth + (flange_breadth - web_breadth) * flange_depth,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionShape::RectangularBeam { .. } => "Rectangular beam",
            SectionShape::FlangedBeam { .. } => "Flanged beam",
            SectionShape::RectangularColumn { .. } => "Rectangular column",
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        fn positive(field: &str, value: f64) -> CalcResult<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"))
            }
        }

        match *self {
            SectionShape::RectangularBeam { breadth, depth }
            | SectionShape::RectangularColumn { breadth, depth } => {
                positive("breadth", breadth)?;
                positive("depth", depth)
            }
            SectionShape::FlangedBeam {
                web_breadth,
                depth,
                flange_breadth,
                flange_depth,
            } => {
                positive("web_breadth", web_breadth)?;
                positive("depth", depth)?;
                positive("flange_breadth", flange_breadth)?;
                positive("flange_depth", flange_depth)?;
                if flange_breadth < web_breadth {
                    return Err(CalcError::invalid_input(
                        "flange_breadth",
                        flange_breadth.to_string(),
                        format!(
                            "Flange breadth must be at least the web breadth ({})",
                            web_breadth
                        ),
                    ));
                }
                if flange_depth >= depth {
                    return Err(CalcError::invalid_input(
                        "flange_depth",
                        flange_depth.to_string(),
                        format!("Flange depth must be less than the overall depth ({})", depth),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// One rectangular strip of compressed concrete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteBlock {
    pub name: String,
    pub breadth: f64,
    /// Lower and upper bound, distance from the neutral axis (mm)
    pub x1: f64,
    pub x2: f64,
    /// Force (N, compression positive)
    pub force: f64,
    /// Moment about the neutral axis (N·mm)
    pub moment: f64,
}

/// A reinforced-concrete cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    pub shape: SectionShape,
    pub concrete: Concrete,
    pub main_steel: ReinforcementGroup,
    #[serde(default)]
    pub shear_steel: ShearReinforcementGroup,
    /// Clear cover to the outermost bars (mm)
    #[serde(default)]
    pub clear_cover: f64,
}

impl Section {
    /// Create and validate a section.
    pub fn new(
        label: impl Into<String>,
        shape: SectionShape,
        concrete: Concrete,
        main_steel: ReinforcementGroup,
    ) -> CalcResult<Self> {
        let section = Section {
            label: label.into(),
            shape,
            concrete,
            main_steel,
            shear_steel: ShearReinforcementGroup::default(),
            clear_cover: 0.0,
        };
        section.validate()?;
        Ok(section)
    }

    /// Rectangular beam b × D
    ///
    /// # Example
    ///
    /// ```rust
    /// use rc_core::calculations::Section;
    /// use rc_core::materials::{Concrete, RebarMaterial};
    /// use rc_core::reinforcement::{ReinforcementGroup, ReinforcementLayer};
    ///
    /// let steel = ReinforcementGroup::new(
    ///     RebarMaterial::hysd(415.0).unwrap(),
    ///     vec![ReinforcementLayer::uniform(3, 16.0, -35.0).unwrap()],
    /// ).unwrap();
    /// let beam = Section::rectangular_beam("B1", 230.0, 450.0, Concrete::grade(20.0).unwrap(), steel).unwrap();
    /// assert_eq!(beam.depth(), 450.0);
    /// ```
    pub fn rectangular_beam(
        label: impl Into<String>,
        breadth: f64,
        depth: f64,
        concrete: Concrete,
        main_steel: ReinforcementGroup,
    ) -> CalcResult<Self> {
        Section::new(label, SectionShape::RectangularBeam { breadth, depth }, concrete, main_steel)
    }

    /// Flanged (T) beam with the flange on the compressed side
    pub fn flanged_beam(
        label: impl Into<String>,
        web_breadth: f64,
        depth: f64,
        flange_breadth: f64,
        flange_depth: f64,
        concrete: Concrete,
        main_steel: ReinforcementGroup,
    ) -> CalcResult<Self> {
        Section::new(
            label,
            SectionShape::FlangedBeam {
                web_breadth,
                depth,
                flange_breadth,
                flange_depth,
            },
            concrete,
            main_steel,
        )
    }

    /// Rectangular column b × D, bending about the axis parallel to b
    pub fn rectangular_column(
        label: impl Into<String>,
        breadth: f64,
        depth: f64,
        concrete: Concrete,
        main_steel: ReinforcementGroup,
    ) -> CalcResult<Self> {
        Section::new(
            label,
            SectionShape::RectangularColumn { breadth, depth },
            concrete,
            main_steel,
        )
    }

    pub fn with_shear_steel(mut self, shear_steel: ShearReinforcementGroup) -> CalcResult<Self> {
        shear_steel.validate()?;
        self.shear_steel = shear_steel;
        Ok(self)
    }

    pub fn with_clear_cover(mut self, clear_cover: f64) -> CalcResult<Self> {
        self.clear_cover = clear_cover;
        self.validate()?;
        Ok(self)
    }

    pub fn depth(&self) -> f64 {
        self.shape.depth()
    }

    /// Validate geometry, materials and bar positions.
    pub fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::invalid_input("label", "", "Label cannot be empty"));
        }
        self.shape.validate()?;
        self.concrete.validate()?;
        self.main_steel.validate()?;
        self.shear_steel.validate()?;

        if !(self.clear_cover >= 0.0 && self.clear_cover.is_finite()) {
            return Err(CalcError::invalid_input(
                "clear_cover",
                self.clear_cover.to_string(),
                "Clear cover cannot be negative",
            ));
        }

        let depth = self.depth();
        for layer in &self.main_steel.layers {
            let position = layer.position(depth);
            if !(0.0..=depth).contains(&position) {
                return Err(CalcError::invalid_input(
                    "distance",
                    layer.distance.to_string(),
                    format!("Layer {} lies outside the section depth {}", layer.bar_list(), depth),
                ));
            }
        }
        Ok(())
    }

    /// Strain profile at trial depth `xu`
    pub fn strain_profile(&self, xu: f64, ec_max: f64) -> CalcResult<StrainProfile> {
        self.shape.stress_block().profile(xu, self.depth(), ec_max)
    }

    /// Compressed concrete blocks at trial depth `xu`.
    ///
    /// With `xu > D` the whole depth is compressed and each block stops at the
    /// least compressed edge, `xu − D` from the neutral axis.
    pub fn concrete_blocks(&self, xu: f64, ec_max: f64) -> CalcResult<Vec<ConcreteBlock>> {
        let profile = self.strain_profile(xu, ec_max)?;
        let fd = self.concrete.design_strength();

        let block = |name: &str, breadth: f64, x1: f64, x2: f64| -> CalcResult<ConcreteBlock> {
            Ok(ConcreteBlock {
                name: name.to_string(),
                breadth,
                x1,
                x2,
                force: breadth * fd * profile.area(x1, x2)?,
                moment: breadth * fd * profile.moment(x1, x2)?,
            })
        };

        // Concrete below the least compressed edge does not exist
        let x_low = (xu - self.depth()).max(0.0);
        match self.shape {
            SectionShape::RectangularBeam { breadth, .. }
            | SectionShape::RectangularColumn { breadth, .. } => {
                Ok(vec![block("concrete", breadth, x_low, xu)?])
            }
            SectionShape::FlangedBeam {
                web_breadth,
                flange_breadth,
                flange_depth,
                ..
            } => {
                let web = block("web", web_breadth, x_low, xu)?;
                let flange = block(
                    "flange",
                    flange_breadth - web_breadth,
                    xu - xu.min(flange_depth),
                    xu,
                )?;
                Ok(vec![web, flange])
            }
        }
    }

    /// Total concrete (force, moment about the neutral axis)
    pub fn concrete_resultant(&self, xu: f64, ec_max: f64) -> CalcResult<(f64, f64)> {
        Ok(self
            .concrete_blocks(xu, ec_max)?
            .iter()
            .fold((0.0, 0.0), |(f, m), b| (f + b.force, m + b.moment)))
    }

    /// Per-layer rebar states at trial depth `xu`
    pub fn rebar_resultant(&self, xu: f64, ec_max: f64) -> CalcResult<Vec<LayerState>> {
        let profile = self.strain_profile(xu, ec_max)?;
        self.main_steel.layer_states(&profile, self.depth(), &self.concrete)
    }

    /// Net axial force (N), compression positive. Zero at flexural equilibrium.
    pub fn net_force(&self, xu: f64, ec_max: f64) -> CalcResult<f64> {
        let (concrete, _) = self.concrete_resultant(xu, ec_max)?;
        let steel: f64 = self.rebar_resultant(xu, ec_max)?.iter().map(|s| s.force).sum();
        Ok(concrete + steel)
    }

    /// Effective depth: centroid of the tension layers at `xu`
    pub fn effective_depth(&self, xu: f64) -> Option<f64> {
        self.main_steel.tension_centroid(xu, self.depth())
    }
}
