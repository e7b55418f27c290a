//! Concrete Properties and Resolved Material State
//!
//! [`ConcreteProperties`] derives fcm, fcd, fctm and Ecm from `fck`.
//! [`MaterialState`] bundles the exposure selection, the governing grade,
//! the concrete properties and the steel grade that a design consumes.
//!
//! Derivation failures never escape [`MaterialState::resolve`]: the
//! properties reset to zero and the error is handed back as a diagnostic.
//!
//! ```rust
//! use flexa_core::materials::{MaterialState, SteelGrade};
//!
//! let resolution = MaterialState::from_characteristic_strength(25.0, SteelGrade::S500);
//! assert!(resolution.diagnostic.is_none());
//! assert!((resolution.state.concrete.fcd - 16.6667).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{checked, concrete};
use crate::errors::{CalcError, CalcResult};
use crate::materials::exposure::{ExposureSelection, StructuralClass};
use crate::materials::steel::{SteelGrade, SteelProperties};

/// Concrete properties derived from the characteristic strength (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConcreteProperties {
    pub fck: f64,
    pub fcm: f64,
    pub fcd: f64,
    pub fctm: f64,
    pub ecm: f64,
}

impl ConcreteProperties {
    /// Derive all properties from `fck`.
    ///
    /// `fck == 0` is the undetermined grade and yields all zeros.
    pub fn derive(fck: f64) -> CalcResult<Self> {
        if !fck.is_finite() || fck < 0.0 {
            return Err(CalcError::out_of_domain("fck", fck, "fck must be finite and >= 0"));
        }
        if fck == 0.0 {
            return Ok(Self::default());
        }

        let fcm = concrete::mean_compressive_strength(fck);
        Ok(Self {
            fck,
            fcm,
            fcd: concrete::design_compressive_strength(fck),
            fctm: checked::mean_tensile_strength(fck)?,
            ecm: checked::secant_modulus(fcm)?,
        })
    }

    pub fn is_determined(&self) -> bool {
        self.fck > 0.0
    }
}

/// Everything a flexural design needs to know about its materials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialState {
    /// Exposure classes the grade was resolved from
    pub exposure: ExposureSelection,
    /// Governing concrete grade
    pub structural_class: StructuralClass,
    pub concrete: ConcreteProperties,
    pub steel: SteelProperties,
}

/// Outcome of resolving materials: always a state, plus the error that
/// forced a reset if derivation failed.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialResolution {
    pub state: MaterialState,
    pub diagnostic: Option<CalcError>,
}

impl MaterialState {
    /// Resolve the governing grade of `selection` and derive the properties.
    pub fn resolve(selection: &ExposureSelection, grade: SteelGrade) -> MaterialResolution {
        Self::build(selection.clone(), selection.resolve(), grade)
    }

    /// Use `fck` directly instead of an exposure selection.
    pub fn from_characteristic_strength(fck: f64, grade: SteelGrade) -> MaterialResolution {
        let structural_class = StructuralClass {
            fck,
            governing_class: None,
        };
        Self::build(ExposureSelection::default(), structural_class, grade)
    }

    fn build(
        exposure: ExposureSelection,
        structural_class: StructuralClass,
        grade: SteelGrade,
    ) -> MaterialResolution {
        let (concrete, structural_class, diagnostic) =
            match ConcreteProperties::derive(structural_class.fck) {
                Ok(concrete) => (concrete, structural_class, None),
                Err(err) => (ConcreteProperties::default(), StructuralClass::default(), Some(err)),
            };

        MaterialResolution {
            state: MaterialState {
                exposure,
                structural_class,
                concrete,
                steel: grade.properties(),
            },
            diagnostic,
        }
    }

    /// True once a positive `fck` has been resolved
    pub fn is_determined(&self) -> bool {
        self.concrete.is_determined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::exposure::{ExposureClass, FabricationMode, SpecimenType};

    #[test]
    fn test_derive_c25() {
        let props = ConcreteProperties::derive(25.0).unwrap();
        assert_eq!(props.fcm, 33.0);
        assert!((props.fcd - 16.666_667).abs() < 1e-6);
        assert!((props.fctm - 2.564_964).abs() < 1e-6);
        assert!((props.ecm - 31_475.8).abs() < 0.1);
    }

    #[test]
    fn test_derive_zero_is_undetermined() {
        let props = ConcreteProperties::derive(0.0).unwrap();
        assert_eq!(props, ConcreteProperties::default());
        assert!(!props.is_determined());
    }

    #[test]
    fn test_derive_negative_fck() {
        let err = ConcreteProperties::derive(-5.0).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_DOMAIN");
    }

    #[test]
    fn test_resolve_from_exposure() {
        let selection = ExposureSelection::new(
            [ExposureClass::X0, ExposureClass::XC1],
            FabricationMode::CastInPlace,
            SpecimenType::Cylindrical,
        );
        let resolution = MaterialState::resolve(&selection, SteelGrade::S500);
        assert!(resolution.diagnostic.is_none());

        let state = resolution.state;
        assert_eq!(state.structural_class.fck, 20.0);
        assert_eq!(state.structural_class.label(), "XC1");
        assert_eq!(state.concrete.fck, 20.0);
        assert!(state.is_determined());
        assert_eq!(state.steel.grade, SteelGrade::S500);
    }

    #[test]
    fn test_empty_selection_resolves_to_zero_state() {
        let resolution = MaterialState::resolve(&ExposureSelection::default(), SteelGrade::S400);
        assert!(resolution.diagnostic.is_none());
        assert!(!resolution.state.is_determined());
        assert_eq!(resolution.state.concrete, ConcreteProperties::default());
        assert_eq!(resolution.state.structural_class.label(), "");
    }

    #[test]
    fn test_invalid_override_resets_with_diagnostic() {
        let resolution = MaterialState::from_characteristic_strength(-10.0, SteelGrade::S500);
        assert!(matches!(resolution.diagnostic, Some(CalcError::OutOfDomain { .. })));
        assert_eq!(resolution.state.concrete, ConcreteProperties::default());
        assert!(!resolution.state.is_determined());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let selection = ExposureSelection::new(
            [ExposureClass::XD3, ExposureClass::XS1],
            FabricationMode::Precast,
            SpecimenType::Cubic,
        );
        let first = MaterialState::resolve(&selection, SteelGrade::S500);
        let second = MaterialState::resolve(&selection, SteelGrade::S500);
        assert_eq!(first, second);
    }
}
