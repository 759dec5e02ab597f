//! # Code Equations
//!
//! Closed-form IS 456:2000 formulas used by the section engine. Keeping them
//! here, free of any section or material types, makes each one easy to check
//! against the code clause it implements.
//!
//! ## Modules
//!
//! - [`stress_block`] - Material constants, concrete stress block integrals,
//!   mild steel and HYSD stress-strain curves
//! - [`shear`] - Table 19 / Table 20 shear stresses and shear reinforcement capacity
//!
//! ## Sign Conventions
//!
//! - **Strain**: Positive in compression
//! - **Distance `x`**: Measured from the neutral axis toward the compressed edge
//! - **Force**: Positive in compression
//!
//! ## References
//!
//! - IS 456:2000 Plain and Reinforced Concrete - Code of Practice
//! - SP 16:1980 Design Aids for Reinforced Concrete to IS 456

pub mod shear;
pub mod stress_block;

pub use shear::{
    series_capacity,
    series_spacing,
    single_group_capacity,
    steel_percentage,
    tau_c,
    tau_c_max,
};

pub use stress_block::{
    block_area,
    block_moment,
    concrete_design_strength,
    concrete_elastic_modulus,
    concrete_stress_ratio,
    hysd_points,
    hysd_stress,
    mild_steel_stress,
    EC_ULTIMATE,
    EC_YIELD,
    GAMMA_CONCRETE,
    GAMMA_STEEL,
    STEEL_ELASTIC_MODULUS,
};
