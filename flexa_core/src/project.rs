//! # Project Data Structures
//!
//! The `Project` struct is the root container for all design data.
//! Projects serialize to `.flx` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (design code, default materials)
//! └── items: HashMap<Uuid, CalculationItem> (all beam designs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//!
//! // Serialize to JSON (see file_io for atomic saves)
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("EN 1992-1-1"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    BeamGeometry, CalculationItem, EffectiveDepthRatio, FlexureDesign, FlexureInput,
};
use crate::errors::CalcResult;
use crate::materials::{
    ExposureClass, ExposureSelection, FabricationMode, SpecimenType, SteelGrade,
};

/// Current schema version for .flx files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Global settings (design code, default materials)
    pub settings: GlobalSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use flexa_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    ///
    /// ```rust
    /// use flexa_core::project::Project;
    /// use flexa_core::calculations::{BeamGeometry, CalculationItem};
    /// use flexa_core::materials::ExposureClass;
    ///
    /// let mut project = Project::new("Engineer", "25-001", "Client");
    /// let beam = project.settings.new_flexure_input(
    ///     "B-1",
    ///     BeamGeometry::new(0.30, 0.50, 100.0),
    ///     [ExposureClass::XC1],
    /// );
    ///
    /// let id = project.add_item(CalculationItem::Flexure(beam));
    /// assert!(project.items.contains_key(&id));
    /// ```
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Get a mutable reference to a calculation item by UUID.
    ///
    /// Marks the project as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut CalculationItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items sorted by label, for stable listings
    pub fn items_by_label(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(b.0)));
        items
    }

    /// Design every item, in label order. One failing item does not stop the others.
    pub fn design_all(&self) -> Vec<(Uuid, String, CalcResult<FlexureDesign>)> {
        self.items_by_label()
            .into_iter()
            .map(|(id, item)| (*id, item.label().to_string(), item.design()))
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Global project settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Design code (e.g., "EN 1992-1-1")
    pub code: String,

    /// Defaults for new designs
    #[serde(default)]
    pub defaults: DesignDefaults,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            code: "EN 1992-1-1".to_string(),
            defaults: DesignDefaults::default(),
        }
    }
}

impl GlobalSettings {
    /// New design input using the project defaults
    pub fn new_flexure_input(
        &self,
        label: impl Into<String>,
        geometry: BeamGeometry,
        classes: impl IntoIterator<Item = ExposureClass>,
    ) -> FlexureInput {
        FlexureInput {
            label: label.into(),
            geometry: geometry.with_depth_ratio(self.defaults.depth_ratio),
            exposure: ExposureSelection::new(
                classes,
                self.defaults.fabrication_mode,
                self.defaults.specimen_type,
            ),
            steel_grade: self.defaults.steel_grade,
            fck_override: None,
        }
    }
}

/// Default materials and geometry options for new designs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignDefaults {
    pub steel_grade: SteelGrade,
    pub fabrication_mode: FabricationMode,
    pub specimen_type: SpecimenType,
    pub depth_ratio: EffectiveDepthRatio,
}
