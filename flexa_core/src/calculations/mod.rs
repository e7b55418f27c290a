//! # Design Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(...) -> CalcResult<...>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`flexure`] - Rectangular reinforced-concrete section in simple bending
//! - [`trace`] - Step-by-step derivation attached to every design

pub mod flexure;
pub mod trace;

use serde::{Deserialize, Serialize};

pub use flexure::{
    BeamGeometry, DesignBranch, EffectiveDepthRatio, FlexureDesign, FlexureInput, FlexureResult,
};
pub use trace::{CalculationStep, DesignTrace};

/// Enum wrapper for all calculation types stored in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Rectangular beam bending design
    Flexure(FlexureInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Flexure(f) => &f.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Flexure(_) => "Flexure",
        }
    }

    /// Run the design for this item
    pub fn design(&self) -> crate::CalcResult<FlexureDesign> {
        match self {
            CalculationItem::Flexure(f) => f.design(),
        }
    }
}
