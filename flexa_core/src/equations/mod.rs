//! # Bending Design Equations
//!
//! This module contains every formula used by the rectangular-section
//! bending method. Having equations in one place enables:
//! - Easy verification against EN 1992-1-1
//! - Documentation of assumptions and unit conventions
//! - A single source for the derivation trace and `EQUATIONS.md`
//!
//! ## Modules
//!
//! - [`concrete`] - Derived concrete properties (fcm, fcd, fctm, Ecm)
//! - [`steel`] - Design yield strength and steel stress-strain laws
//! - [`flexure`] - Reduced moment, compression zone, strains and areas
//! - [`checked`] - Domain-checked counterparts returning [`crate::CalcResult`]
//! - [`registry`] - Equation metadata for traces and documentation
//!
//! ## Unit Conventions
//!
//! - **Lengths**: m
//! - **Stresses**: MPa (MN/m²)
//! - **Moments**: kN·m at the interface, MN·m inside formulas
//! - **Areas**: m²
//! - **Strains**: dimensionless, compression positive for concrete
//!
//! ## References
//!
//! - EN 1992-1-1:2004 Eurocode 2, Design of concrete structures
//! - EN 206:2013 Concrete, Annex F (limiting values for exposure classes)

pub mod checked;
pub mod concrete;
pub mod flexure;
pub mod registry;
pub mod steel;

pub use concrete::{
    design_compressive_strength,
    mean_compressive_strength,
    mean_tensile_strength,
    secant_modulus,
    GAMMA_C,
};

pub use steel::{
    design_yield_strength,
    elastic_steel_stress,
    limiting_strain_ratio,
    plastic_steel_stress,
    steel_stress,
    steel_stress_class_b,
    StressLaw,
    CONCRETE_ULTIMATE_STRAIN,
    GAMMA_S,
    HARDENING_LIMIT_STRAIN,
    HARDENING_RATIO,
};

pub use flexure::{
    balanced_moment,
    compressed_steel_area,
    compressed_steel_strain,
    compression_depth,
    compression_parameter,
    doubly_reinforced_tensile_area,
    governing_area,
    is_under_reinforced,
    lever_arm,
    minimum_tensile_area,
    reduced_moment,
    required_tensile_area,
    residual_moment,
    tensile_steel_strain,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
