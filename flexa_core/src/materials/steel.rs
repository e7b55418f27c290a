//! Reinforcing Steel Grades
//!
//! The two high-bond bar grades supported by the design method, with their
//! tabulated yield strain, limiting reduced moment and stress-strain law.
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::materials::steel::SteelGrade;
//!
//! let props = SteelGrade::S500.properties();
//! assert!((props.fyd - 434.78).abs() < 0.01);
//! assert_eq!(props.mu_limit, 0.372);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::steel::{design_yield_strength, limiting_strain_ratio, StressLaw};
use crate::errors::{CalcError, CalcResult};

/// Reinforcing steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    /// fyk = 400 MPa
    S400,
    /// fyk = 500 MPa
    #[default]
    S500,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 2] = [SteelGrade::S400, SteelGrade::S500];

    /// Characteristic yield strength fyk (MPa)
    pub fn fyk(&self) -> f64 {
        match self {
            SteelGrade::S400 => 400.0,
            SteelGrade::S500 => 500.0,
        }
    }

    /// Tabulated yield strain εy
    pub fn yield_strain(&self) -> f64 {
        match self {
            SteelGrade::S400 => 1.74e-3,
            SteelGrade::S500 => 2.17e-3,
        }
    }

    /// Tabulated limiting reduced moment μlim
    pub fn mu_limit(&self) -> f64 {
        match self {
            SteelGrade::S400 => 0.392,
            SteelGrade::S500 => 0.372,
        }
    }

    /// Stress-strain law past yield
    pub fn stress_law(&self) -> StressLaw {
        match self {
            SteelGrade::S400 => StressLaw::Plastic,
            SteelGrade::S500 => StressLaw::StrainHardening,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::S400 => "S400",
            SteelGrade::S500 => "S500",
        }
    }

    /// Parse from common string representations ("S500", "500", "fe500")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().replace([' ', '-'], "").as_str() {
            "S400" | "400" | "FE400" | "B400" => Ok(SteelGrade::S400),
            "S500" | "500" | "FE500" | "B500" => Ok(SteelGrade::S500),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Derived design properties
    pub fn properties(&self) -> SteelProperties {
        let ey = self.yield_strain();
        SteelProperties {
            grade: *self,
            fyk: self.fyk(),
            fyd: design_yield_strength(self.fyk()),
            ey,
            mu_limit: self.mu_limit(),
            xi_limit: limiting_strain_ratio(ey),
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Design properties of a steel grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelProperties {
    pub grade: SteelGrade,
    /// Characteristic yield strength (MPa)
    pub fyk: f64,
    /// Design yield strength (MPa)
    pub fyd: f64,
    /// Yield strain
    pub ey: f64,
    /// Limiting reduced moment
    pub mu_limit: f64,
    /// Relative compression depth at which the steel just yields
    pub xi_limit: f64,
}

impl SteelProperties {
    /// Stress in a bar at strain `es` following this grade's law (MPa)
    pub fn stress(&self, es: f64) -> CalcResult<f64> {
        crate::equations::checked::steel_stress(self.grade.stress_law(), self.fyd, es, self.ey)
    }
}

impl Default for SteelProperties {
    fn default() -> Self {
        SteelGrade::default().properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_tables() {
        let s400 = SteelGrade::S400.properties();
        assert_eq!(s400.fyk, 400.0);
        assert!((s400.fyd - 347.826).abs() < 1e-3);
        assert_eq!(s400.ey, 1.74e-3);
        assert_eq!(s400.mu_limit, 0.392);

        let s500 = SteelGrade::S500.properties();
        assert!((s500.xi_limit - 0.617284).abs() < 1e-6);
        assert_eq!(SteelGrade::S500.stress_law(), StressLaw::StrainHardening);
    }

    #[test]
    fn test_stress_past_yield() {
        let s400 = SteelGrade::S400.properties();
        assert_eq!(s400.stress(0.01).unwrap(), s400.fyd);

        let s500 = SteelGrade::S500.properties();
        let capped = s500.stress(0.05).unwrap();
        assert!((capped - 1.08 * s500.fyd).abs() < 1e-9);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("s400").unwrap(), SteelGrade::S400);
        assert_eq!(SteelGrade::from_str_flexible("500").unwrap(), SteelGrade::S500);
        assert!(SteelGrade::from_str_flexible("S235").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&SteelGrade::S400).unwrap();
        assert_eq!(json, "\"S400\"");
    }
}
