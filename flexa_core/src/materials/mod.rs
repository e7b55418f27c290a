//! # Materials
//!
//! Concrete grade resolution and reinforcing steel definitions.
//!
//! ## Material Types
//!
//! - **Exposure**: EN 206 exposure classes and the minimum `fck` they impose
//! - **Concrete**: Derived properties (fcm, fcd, fctm, Ecm) from `fck`
//! - **Steel**: S400 and S500 reinforcing bars
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::materials::{
//!     ExposureClass, ExposureSelection, FabricationMode, MaterialState, SpecimenType, SteelGrade,
//! };
//!
//! let selection = ExposureSelection::new(
//!     [ExposureClass::XC2, ExposureClass::XD1],
//!     FabricationMode::CastInPlace,
//!     SpecimenType::Cylindrical,
//! );
//! let resolution = MaterialState::resolve(&selection, SteelGrade::S500);
//! assert_eq!(resolution.state.structural_class.label(), "XD1");
//! assert_eq!(resolution.state.concrete.fck, 30.0);
//! ```

pub mod concrete;
pub mod exposure;
pub mod steel;

pub use concrete::{ConcreteProperties, MaterialResolution, MaterialState};
pub use exposure::{
    minimum_strength, ExposureClass, ExposureSelection, FabricationMode, SpecimenType,
    StructuralClass,
};
pub use steel::{SteelGrade, SteelProperties};
