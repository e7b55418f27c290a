//! # flexa_core - Reinforced Concrete Bending Design Engine
//!
//! `flexa_core` sizes the reinforcement of rectangular reinforced-concrete
//! beams under simple bending following EN 1992-1-1. All inputs and outputs
//! are JSON-serializable, and every design comes with a step-by-step
//! derivation.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types instead of NaN
//! - **Traceable**: Every formula cites its code clause
//!
//! ## Quick Start
//!
//! ```rust
//! use flexa_core::calculations::flexure::{calculate, BeamGeometry};
//! use flexa_core::materials::{
//!     ExposureClass, ExposureSelection, FabricationMode, MaterialState, SpecimenType, SteelGrade,
//! };
//!
//! let exposure = ExposureSelection::new(
//!     [ExposureClass::X0, ExposureClass::XC1],
//!     FabricationMode::CastInPlace,
//!     SpecimenType::Cylindrical,
//! );
//! let materials = MaterialState::resolve(&exposure, SteelGrade::S500);
//! assert_eq!(materials.state.structural_class.label(), "XC1");
//!
//! let design = calculate(&BeamGeometry::new(0.30, 0.50, 80.0), &materials.state).unwrap();
//! println!("{}", design.render_text());
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Formula library and equation registry
//! - [`materials`] - Exposure classes, concrete properties, steel grades
//! - [`calculations`] - Bending design and derivation trace
//! - [`project`] - Project container, metadata, and settings
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{BeamGeometry, FlexureDesign, FlexureInput, FlexureResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use materials::{ExposureSelection, MaterialState, SteelGrade};
pub use project::{GlobalSettings, Project, ProjectMetadata};
