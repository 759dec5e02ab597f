//! # rc_core - Reinforced Concrete Section Capacity Engine
//!
//! `rc_core` computes the ultimate flexural and shear capacity of reinforced
//! concrete cross-sections by the limit state method of IS 456:2000. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Sections are immutable; every analysis returns fresh values
//! - **Exact integrals**: The concrete stress block is integrated in closed form
//! - **Bounded search**: The neutral axis is bracketed, then bisected with a hard cap
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
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
//! let settings = AnalysisSettings::default();
//! let eq = beam.equilibrium_xu(settings.ec_max, &settings.solver).unwrap();
//! let flexure = beam.flexure_capacity(eq.xu, settings.ec_max).unwrap();
//! assert!((flexure.mu.0 - 78.48).abs() < 0.01);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Sections, equilibrium solver, flexure, shear and column analyses
//! - [`reinforcement`] - Longitudinal layers and shear reinforcement
//! - [`materials`] - Concrete, rebar and the concrete stress block
//! - [`equations`] - Closed-form code formulas
//! - [`project`] - Project container, metadata and analysis settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic saves and validated loads

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod reinforcement;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Section, SectionAnalysis, SectionShape};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project};
pub use project::{AnalysisSettings, Project, ProjectMetadata};
