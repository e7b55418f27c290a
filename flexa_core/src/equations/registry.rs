//! # Equation Registry
//!
//! Central registry of every formula used by the bending design method.
//! Each equation has metadata including code references, formulas, and
//! variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for the derivation trace and audit documentation
//! - Serialization support for JSON export
//!
//! ## Usage
//!
//! ```rust
//! use flexa_core::equations::registry::Equation;
//!
//! let meta = Equation::ReducedMoment.metadata();
//! assert_eq!(meta.formula_plain, "mu = Med / (b * d^2 * fcd)");
//! println!("Reference: {}", meta.reference.citation());
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a design code or standard.
///
/// All equations should cite their source for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// EN 1992-1-1 - Eurocode 2: Design of concrete structures
    Eurocode2 { section: &'static str },
    /// EN 206 - Concrete: specification, performance, production and conformity
    En206 { table: &'static str },
    /// Fundamental mechanics (plane sections, equilibrium)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Eurocode2 { section } => format!("EN 1992-1-1 {}", section),
            CodeReference::En206 { table } => format!("EN 206 {}", table),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Eurocode2 { .. } => "EC2",
            CodeReference::En206 { .. } => "EN 206",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Exposure class to concrete grade
    Durability,
    /// Derived concrete and steel properties
    MaterialProperties,
    /// Reduced moment, compression zone, lever arm
    SectionAnalysis,
    /// Strain compatibility (plane sections)
    Strains,
    /// Steel stress-strain laws
    SteelStresses,
    /// Moments and reinforcement areas
    Reinforcement,
    /// Branch selection and minimum reinforcement
    DesignChecks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Durability => "Durability",
            EquationCategory::MaterialProperties => "Material Properties",
            EquationCategory::SectionAnalysis => "Section Analysis",
            EquationCategory::Strains => "Strains",
            EquationCategory::SteelStresses => "Steel Stresses",
            EquationCategory::Reinforcement => "Reinforcement",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Durability => 1,
            EquationCategory::MaterialProperties => 2,
            EquationCategory::SectionAnalysis => 3,
            EquationCategory::Strains => 4,
            EquationCategory::SteelStresses => 5,
            EquationCategory::Reinforcement => 6,
            EquationCategory::DesignChecks => 7,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "mu", "fcd")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "MPa", "m", "kN·m")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a design equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Reduced Moment")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in LaTeX math notation
    pub formula_latex: &'static str,
    /// The formula in plain text for markdown (human-readable)
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation (for linking)
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All design equations used in Flexa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Durability
    // -------------------------------------------------------------------------
    /// fck = max over selected exposure classes
    StructuralClassResolution,

    // -------------------------------------------------------------------------
    // Material Properties
    // -------------------------------------------------------------------------
    /// fcm = fck + 8
    MeanCompressiveStrength,
    /// fcd = fck / 1.5
    DesignCompressiveStrength,
    /// fctm = 0.3 fck^(2/3)
    MeanTensileStrength,
    /// Ecm = 22000 (fcm/10)^0.3
    SecantModulus,
    /// fyd = fyk / 1.15
    DesignYieldStrength,
    /// ξy = εc / (εc + εy)
    LimitingStrainRatio,

    // -------------------------------------------------------------------------
    // Section Analysis
    // -------------------------------------------------------------------------
    /// μ = Med / (b d² fcd)
    ReducedMoment,
    /// ξ = 1.25 (1 − √(1 − 2μ))
    CompressionParameter,
    /// x = ξ d
    CompressionDepth,
    /// z = d − 0.4x
    LeverArm,

    // -------------------------------------------------------------------------
    // Strains
    // -------------------------------------------------------------------------
    /// εs = (d − x)/x εc
    TensileSteelStrain,
    /// ε's = (ξ − d'/d)/ξ εc
    CompressedSteelStrain,

    // -------------------------------------------------------------------------
    // Steel Stresses
    // -------------------------------------------------------------------------
    /// σs = fyd (k + (εs − εuk)(k − 1)/(εuk − εy))
    SteelStressClassB,
    /// σs = fyd
    PlasticSteelStress,
    /// σs = fyd εs / εy
    ElasticSteelStress,

    // -------------------------------------------------------------------------
    // Reinforcement
    // -------------------------------------------------------------------------
    /// As = Med / (σs z)
    RequiredTensileArea,
    /// Mu1 = 0.8 b x fcd z
    BalancedMoment,
    /// Mu2 = Med − Mu1
    ResidualMoment,
    /// A's = Mu2 / (σ's (d − d'))
    CompressedSteelArea,
    /// As = Mu1/(σs z) + Mu2/(σs (d − d'))
    DoublyReinforcedTensileArea,

    // -------------------------------------------------------------------------
    // Design Checks
    // -------------------------------------------------------------------------
    /// μ ≤ μlim
    BranchSelection,
    /// As,min = 0.26 b d fctm / fyk
    MinimumTensileArea,
    /// As,th = max(As, As,min)
    GoverningArea,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::StructuralClassResolution => EquationMetadata {
                name: "Governing Concrete Grade",
                description: "Highest minimum strength class required by the selected exposure classes",
                formula_latex: r"f_{ck} = \max_{i} f_{ck}(X_i, \text{mode}, \text{specimen})",
                formula_plain: "fck = max(fck(X_i, mode, specimen))",
                reference: CodeReference::En206 { table: "Annex F" },
                variables: vec![
                    Variable::new("X_i", "Selected exposure class", "-"),
                    Variable::new("fck", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec![
                    "Ties go to the first class in selection order",
                    "No class selected leaves the grade undetermined (fck = 0)",
                ],
                category: EquationCategory::Durability,
                source_module: "materials/exposure.rs",
                source_function: "ExposureSelection::resolve",
            },

            Equation::MeanCompressiveStrength => EquationMetadata {
                name: "Mean Compressive Strength",
                description: "Mean concrete cylinder strength at 28 days",
                formula_latex: r"f_{cm} = f_{ck} + 8",
                formula_plain: "fcm = fck + 8",
                reference: CodeReference::Eurocode2 { section: "Table 3.1" },
                variables: vec![
                    Variable::new("fcm", "Mean compressive strength", "MPa"),
                    Variable::new("fck", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec!["Normal weight concrete"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/concrete.rs",
                source_function: "mean_compressive_strength",
            },

            Equation::DesignCompressiveStrength => EquationMetadata {
                name: "Design Compressive Strength",
                description: "Characteristic strength divided by the concrete partial factor",
                formula_latex: r"f_{cd} = \frac{f_{ck}}{\gamma_c} = \frac{f_{ck}}{1.5}",
                formula_plain: "fcd = fck / 1.5",
                reference: CodeReference::Eurocode2 { section: "§3.1.6" },
                variables: vec![
                    Variable::new("fcd", "Design compressive strength", "MPa"),
                    Variable::new("gamma_c", "Partial factor for concrete", "-"),
                ],
                assumptions: vec!["alpha_cc = 1.0", "Persistent and transient design situations"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/concrete.rs",
                source_function: "design_compressive_strength",
            },

            Equation::MeanTensileStrength => EquationMetadata {
                name: "Mean Tensile Strength",
                description: "Mean axial tensile strength of concrete",
                formula_latex: r"f_{ctm} = 0.3 \cdot f_{ck}^{2/3}",
                formula_plain: "fctm = 0.3 * fck^(2/3)",
                reference: CodeReference::Eurocode2 { section: "Table 3.1" },
                variables: vec![
                    Variable::new("fctm", "Mean tensile strength", "MPa"),
                    Variable::new("fck", "Characteristic compressive strength", "MPa"),
                ],
                assumptions: vec!["fck <= 50 MPa", "fck >= 0"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/concrete.rs",
                source_function: "mean_tensile_strength",
            },

            Equation::SecantModulus => EquationMetadata {
                name: "Secant Modulus of Elasticity",
                description: "Secant modulus of concrete between 0 and 0.4 fcm",
                formula_latex: r"E_{cm} = 22000 \cdot \left(\frac{f_{cm}}{10}\right)^{0.3}",
                formula_plain: "Ecm = 22000 * (fcm/10)^0.3",
                reference: CodeReference::Eurocode2 { section: "Table 3.1" },
                variables: vec![
                    Variable::new("Ecm", "Secant modulus", "MPa"),
                    Variable::new("fcm", "Mean compressive strength", "MPa"),
                ],
                assumptions: vec!["Quartzite aggregates"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/concrete.rs",
                source_function: "secant_modulus",
            },

            Equation::DesignYieldStrength => EquationMetadata {
                name: "Design Yield Strength",
                description: "Characteristic yield strength divided by the steel partial factor",
                formula_latex: r"f_{yd} = \frac{f_{yk}}{\gamma_s} = \frac{f_{yk}}{1.15}",
                formula_plain: "fyd = fyk / 1.15",
                reference: CodeReference::Eurocode2 { section: "§3.2.7" },
                variables: vec![
                    Variable::new("fyd", "Design yield strength", "MPa"),
                    Variable::new("fyk", "Characteristic yield strength", "MPa"),
                ],
                assumptions: vec!["Persistent and transient design situations"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/steel.rs",
                source_function: "design_yield_strength",
            },

            Equation::LimitingStrainRatio => EquationMetadata {
                name: "Limiting Compression Zone Ratio",
                description: "Relative compression depth at which the tension steel just yields",
                formula_latex: r"\xi_y = \frac{\varepsilon_c}{\varepsilon_c + \varepsilon_y}",
                formula_plain: "xi_y = ec / (ec + ey)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("xi_y", "Limiting relative depth", "-"),
                    Variable::new("ec", "Ultimate concrete strain (3.5e-3)", "-"),
                    Variable::new("ey", "Steel yield strain", "-"),
                ],
                assumptions: vec!["Plane sections remain plane"],
                category: EquationCategory::MaterialProperties,
                source_module: "equations/steel.rs",
                source_function: "limiting_strain_ratio",
            },

            Equation::ReducedMoment => EquationMetadata {
                name: "Reduced Moment",
                description: "Applied moment relative to the flexural capacity of the concrete",
                formula_latex: r"\mu = \frac{M_{Ed}}{b \cdot d^2 \cdot f_{cd}}",
                formula_plain: "mu = Med / (b * d^2 * fcd)",
                reference: CodeReference::Eurocode2 { section: "§6.1" },
                variables: vec![
                    Variable::new("mu", "Reduced moment", "-"),
                    Variable::new("Med", "Ultimate bending moment", "kN·m"),
                    Variable::new("b", "Section width", "m"),
                    Variable::new("d", "Effective depth", "m"),
                    Variable::new("fcd", "Design compressive strength", "MPa"),
                ],
                assumptions: vec!["Rectangular section", "Med converted to MN·m"],
                category: EquationCategory::SectionAnalysis,
                source_module: "equations/flexure.rs",
                source_function: "reduced_moment",
            },

            Equation::CompressionParameter => EquationMetadata {
                name: "Relative Compression Depth",
                description: "Relative depth of the compression zone from the reduced moment",
                formula_latex: r"\xi = 1.25 \cdot \left(1 - \sqrt{1 - 2\mu}\right)",
                formula_plain: "xi = 1.25 * (1 - sqrt(1 - 2mu))",
                reference: CodeReference::Eurocode2 { section: "§3.1.7(3)" },
                variables: vec![
                    Variable::new("xi", "Relative compression depth x/d", "-"),
                    Variable::new("mu", "Reduced moment", "-"),
                ],
                assumptions: vec!["Rectangular stress block, lambda = 0.8", "mu <= 0.5"],
                category: EquationCategory::SectionAnalysis,
                source_module: "equations/flexure.rs",
                source_function: "compression_parameter",
            },

            Equation::CompressionDepth => EquationMetadata {
                name: "Compression Zone Depth",
                description: "Depth of the neutral axis below the compressed face",
                formula_latex: r"x = \xi \cdot d",
                formula_plain: "x = xi * d",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("x", "Neutral axis depth", "m"),
                    Variable::new("d", "Effective depth", "m"),
                ],
                assumptions: vec![],
                category: EquationCategory::SectionAnalysis,
                source_module: "equations/flexure.rs",
                source_function: "compression_depth",
            },

            Equation::LeverArm => EquationMetadata {
                name: "Lever Arm",
                description: "Distance between the concrete compression resultant and the tension steel",
                formula_latex: r"z = d - 0.4 \cdot x",
                formula_plain: "z = d - 0.4x",
                reference: CodeReference::Eurocode2 { section: "§3.1.7(3)" },
                variables: vec![
                    Variable::new("z", "Lever arm", "m"),
                    Variable::new("x", "Neutral axis depth", "m"),
                ],
                assumptions: vec!["Rectangular stress block of depth 0.8x"],
                category: EquationCategory::SectionAnalysis,
                source_module: "equations/flexure.rs",
                source_function: "lever_arm",
            },

            Equation::TensileSteelStrain => EquationMetadata {
                name: "Tension Steel Strain",
                description: "Strain in the tension reinforcement from strain compatibility",
                formula_latex: r"\varepsilon_s = \frac{d - x}{x} \cdot \varepsilon_c",
                formula_plain: "es = (d - x) / x * ec",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("es", "Tension steel strain", "-"),
                    Variable::new("ec", "Ultimate concrete strain (3.5e-3)", "-"),
                ],
                assumptions: vec!["Plane sections remain plane", "x > 0"],
                category: EquationCategory::Strains,
                source_module: "equations/flexure.rs",
                source_function: "tensile_steel_strain",
            },

            Equation::CompressedSteelStrain => EquationMetadata {
                name: "Compression Steel Strain",
                description: "Strain in the compression reinforcement at depth d'",
                formula_latex: r"\varepsilon'_s = \frac{\xi - d'/d}{\xi} \cdot \varepsilon_c",
                formula_plain: "es' = (xi - d'/d) / xi * ec",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("es'", "Compression steel strain", "-"),
                    Variable::new("d'", "Depth of compression steel (0.1h)", "m"),
                ],
                assumptions: vec!["Plane sections remain plane", "xi > 0"],
                category: EquationCategory::Strains,
                source_module: "equations/flexure.rs",
                source_function: "compressed_steel_strain",
            },

            Equation::SteelStressClassB => EquationMetadata {
                name: "Hardening Steel Stress",
                description: "Stress on the inclined top branch of the class B stress-strain diagram",
                formula_latex: r"\sigma_s = f_{yd} \cdot \left(k + \frac{(\varepsilon_s - \varepsilon_{uk})(k - 1)}{\varepsilon_{uk} - \varepsilon_y}\right)",
                formula_plain: "ss = fyd * (k + (es - euk)(k - 1) / (euk - ey))",
                reference: CodeReference::Eurocode2 { section: "Figure 3.8" },
                variables: vec![
                    Variable::new("k", "Hardening ratio (1.08)", "-"),
                    Variable::new("euk", "Hardening limit strain (5e-3)", "-"),
                    Variable::new("ss", "Steel stress", "MPa"),
                ],
                assumptions: vec!["es clamped to euk", "Applies past yield only"],
                category: EquationCategory::SteelStresses,
                source_module: "equations/steel.rs",
                source_function: "steel_stress_class_b",
            },

            Equation::PlasticSteelStress => EquationMetadata {
                name: "Plastic Steel Stress",
                description: "Horizontal top branch of the stress-strain diagram",
                formula_latex: r"\sigma_s = f_{yd}",
                formula_plain: "ss = fyd",
                reference: CodeReference::Eurocode2 { section: "Figure 3.8" },
                variables: vec![Variable::new("ss", "Steel stress", "MPa")],
                assumptions: vec!["Applies past yield only"],
                category: EquationCategory::SteelStresses,
                source_module: "equations/steel.rs",
                source_function: "plastic_steel_stress",
            },

            Equation::ElasticSteelStress => EquationMetadata {
                name: "Elastic Steel Stress",
                description: "Linear branch of the stress-strain diagram below yield",
                formula_latex: r"\sigma_s = f_{yd} \cdot \frac{\varepsilon_s}{\varepsilon_y}",
                formula_plain: "ss = fyd * es / ey",
                reference: CodeReference::Eurocode2 { section: "Figure 3.8" },
                variables: vec![Variable::new("ss", "Steel stress", "MPa")],
                assumptions: vec!["es < ey"],
                category: EquationCategory::SteelStresses,
                source_module: "equations/steel.rs",
                source_function: "elastic_steel_stress",
            },

            Equation::RequiredTensileArea => EquationMetadata {
                name: "Required Tension Steel",
                description: "Tension steel area balancing the design moment",
                formula_latex: r"A_s = \frac{M_{Ed}}{\sigma_s \cdot z}",
                formula_plain: "As = Med / (ss * z)",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("As", "Tension steel area", "m²"),
                    Variable::new("z", "Lever arm", "m"),
                ],
                assumptions: vec!["Singly reinforced section"],
                category: EquationCategory::Reinforcement,
                source_module: "equations/flexure.rs",
                source_function: "required_tensile_area",
            },

            Equation::BalancedMoment => EquationMetadata {
                name: "Balanced Moment",
                description: "Moment carried by the concrete block and tension steel at the limiting depth",
                formula_latex: r"M_{u1} = 0.8 \cdot b \cdot x_y \cdot f_{cd} \cdot z_y",
                formula_plain: "Mu1 = 0.8 * b * x * fcd * z",
                reference: CodeReference::Eurocode2 { section: "§3.1.7(3)" },
                variables: vec![
                    Variable::new("Mu1", "Balanced moment", "kN·m"),
                    Variable::new("x_y", "Limiting neutral axis depth", "m"),
                ],
                assumptions: vec!["Doubly reinforced section"],
                category: EquationCategory::Reinforcement,
                source_module: "equations/flexure.rs",
                source_function: "balanced_moment",
            },

            Equation::ResidualMoment => EquationMetadata {
                name: "Residual Moment",
                description: "Moment left for the steel couple formed by the compression steel",
                formula_latex: r"M_{u2} = M_{Ed} - M_{u1}",
                formula_plain: "Mu2 = Med - Mu1",
                reference: CodeReference::Mechanics,
                variables: vec![Variable::new("Mu2", "Residual moment", "kN·m")],
                assumptions: vec!["Doubly reinforced section"],
                category: EquationCategory::Reinforcement,
                source_module: "equations/flexure.rs",
                source_function: "residual_moment",
            },

            Equation::CompressedSteelArea => EquationMetadata {
                name: "Compression Steel Area",
                description: "Compression reinforcement carrying the residual moment",
                formula_latex: r"A'_s = \frac{M_{u2}}{\sigma'_s \cdot (d - d')}",
                formula_plain: "As' = Mu2 / (ss' * (d - d'))",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("As'", "Compression steel area", "m²"),
                    Variable::new("ss'", "Compression steel stress", "MPa"),
                ],
                assumptions: vec!["d' = 0.1h"],
                category: EquationCategory::Reinforcement,
                source_module: "equations/flexure.rs",
                source_function: "compressed_steel_area",
            },

            Equation::DoublyReinforcedTensileArea => EquationMetadata {
                name: "Tension Steel of a Doubly Reinforced Section",
                description: "Balanced contribution plus residual-moment contribution",
                formula_latex: r"A_s = \frac{M_{u1}}{\sigma_s \cdot z} + \frac{M_{u2}}{\sigma_s \cdot (d - d')}",
                formula_plain: "As = Mu1 / (ss * z) + Mu2 / (ss * (d - d'))",
                reference: CodeReference::Mechanics,
                variables: vec![
                    Variable::new("As", "Tension steel area", "m²"),
                    Variable::new("d'", "Depth of compression steel (0.1h)", "m"),
                ],
                assumptions: vec!["Doubly reinforced section"],
                category: EquationCategory::Reinforcement,
                source_module: "equations/flexure.rs",
                source_function: "doubly_reinforced_tensile_area",
            },

            Equation::BranchSelection => EquationMetadata {
                name: "Compression Reinforcement Check",
                description: "Section needs no compression steel when the reduced moment stays below the grade limit",
                formula_latex: r"\mu \leq \mu_{lim}",
                formula_plain: "mu <= mu_lim",
                reference: CodeReference::Eurocode2 { section: "§5.6.3" },
                variables: vec![
                    Variable::new("mu_lim", "Limiting reduced moment of the steel grade", "-"),
                ],
                assumptions: vec!["Equality resolves to the singly reinforced branch"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/flexure.rs",
                source_function: "is_under_reinforced",
            },

            Equation::MinimumTensileArea => EquationMetadata {
                name: "Minimum Tension Reinforcement",
                description: "Minimum area preventing brittle failure at cracking",
                formula_latex: r"A_{s,min} = \frac{0.26 \cdot b \cdot d \cdot f_{ctm}}{f_{yk}}",
                formula_plain: "As,min = 0.26 * b * d * fctm / fyk",
                reference: CodeReference::Eurocode2 { section: "§9.2.1.1" },
                variables: vec![
                    Variable::new("As,min", "Minimum tension area", "m²"),
                    Variable::new("fctm", "Mean tensile strength", "MPa"),
                ],
                assumptions: vec!["Rectangular section, b = bt"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/flexure.rs",
                source_function: "minimum_tensile_area",
            },

            Equation::GoverningArea => EquationMetadata {
                name: "Theoretical Tension Reinforcement",
                description: "Larger of the required and minimum tension areas",
                formula_latex: r"A_{s,th} = \max(A_s, A_{s,min})",
                formula_plain: "As,th = max(As, As,min)",
                reference: CodeReference::Eurocode2 { section: "§9.2.1.1" },
                variables: vec![Variable::new("As,th", "Theoretical tension area", "m²")],
                assumptions: vec![],
                category: EquationCategory::DesignChecks,
                source_module: "equations/flexure.rs",
                source_function: "governing_area",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories that contain at least one equation
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            Durability,
            MaterialProperties,
            SectionAnalysis,
            Strains,
            SteelStresses,
            Reinforcement,
            DesignChecks,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::StructuralClassResolution,
    // Materials
    Equation::MeanCompressiveStrength,
    Equation::DesignCompressiveStrength,
    Equation::MeanTensileStrength,
    Equation::SecantModulus,
    Equation::DesignYieldStrength,
    Equation::LimitingStrainRatio,
    // Section analysis
    Equation::ReducedMoment,
    Equation::CompressionParameter,
    Equation::CompressionDepth,
    Equation::LeverArm,
    // Strains
    Equation::TensileSteelStrain,
    Equation::CompressedSteelStrain,
    // Steel stresses
    Equation::SteelStressClassB,
    Equation::PlasticSteelStress,
    Equation::ElasticSteelStress,
    // Reinforcement
    Equation::RequiredTensileArea,
    Equation::BalancedMoment,
    Equation::ResidualMoment,
    Equation::CompressedSteelArea,
    Equation::DoublyReinforcedTensileArea,
    // Checks
    Equation::BranchSelection,
    Equation::MinimumTensileArea,
    Equation::GoverningArea,
];

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate a complete EQUATIONS.md file for documentation.
///
/// Lists all equations in the registry, organized by category, with
/// formulas, references, and source code links.
///
/// # Example
///
/// ```rust
/// use flexa_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Flexa Equations Reference"));
/// assert!(markdown.contains("Section Analysis"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Flexa Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists all formulas used by the Flexa bending design method.
Each equation includes its formula, code reference, source location, and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Lengths | m |
| Stresses | MPa |
| Moments | kN·m (converted to MN·m inside formulas) |
| Areas | m² (reported in cm²) |
| Strains | m/m |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol, var.description, var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
