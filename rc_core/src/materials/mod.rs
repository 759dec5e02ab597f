//! # Materials
//!
//! Material definitions and their limit-state stress-strain models.
//!
//! ## Material Types
//!
//! - **Concrete**: Grades M15 upward, parabolic-rectangular stress block
//! - **Rebar**: Mild steel (bilinear) and HYSD (IS 456 Fig. 23A)
//! - **Stress block**: Strain profiles for flexure and axial-plus-flexure
//!
//! ## Example
//!
//! ```rust
//! use rc_core::materials::{Concrete, RebarMaterial};
//!
//! let concrete = Concrete::grade(20.0).unwrap();
//! let steel = RebarMaterial::hysd(415.0).unwrap();
//!
//! println!("fd = {:.2} N/mm², fyd = {:.1} N/mm²",
//!     concrete.design_strength(), steel.design_strength());
//! ```

pub mod concrete;
pub mod rebar;
pub mod stress_block;

pub use concrete::Concrete;
pub use rebar::{RebarKind, RebarMaterial};
pub use stress_block::{StrainProfile, StressBlock};
