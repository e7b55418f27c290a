//! Exposure Classes and Minimum Concrete Grades (EN 206, Annex F)
//!
//! Maps each environmental exposure class, for a given fabrication mode and
//! test specimen, to the minimum characteristic strength `fck` (MPa). A
//! selection of several classes is governed by the most demanding one.
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::materials::exposure::{ExposureClass, ExposureSelection};
//!
//! let mut selection = ExposureSelection::default();
//! selection.insert(ExposureClass::X0);
//! selection.insert(ExposureClass::XC1);
//!
//! let class = selection.resolve();
//! assert_eq!(class.fck, 20.0);
//! assert_eq!(class.label(), "XC1");
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{CalcError, CalcResult};

/// Environmental exposure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureClass {
    X0,
    XC1,
    XC2,
    XC3,
    XC4,
    XD1,
    XD2,
    XD3,
    XS1,
    XS2,
    XS3,
    XF1,
    XF2,
    XF3,
    XF4,
    XA1,
    XA2,
    XA3,
}

impl ExposureClass {
    /// All exposure classes in catalogue order
    pub const ALL: [ExposureClass; 18] = [
        ExposureClass::X0,
        ExposureClass::XC1,
        ExposureClass::XC2,
        ExposureClass::XC3,
        ExposureClass::XC4,
        ExposureClass::XD1,
        ExposureClass::XD2,
        ExposureClass::XD3,
        ExposureClass::XS1,
        ExposureClass::XS2,
        ExposureClass::XS3,
        ExposureClass::XF1,
        ExposureClass::XF2,
        ExposureClass::XF3,
        ExposureClass::XF4,
        ExposureClass::XA1,
        ExposureClass::XA2,
        ExposureClass::XA3,
    ];

    /// Class code (e.g., "XC1")
    pub fn code(&self) -> &'static str {
        match self {
            ExposureClass::X0 => "X0",
            ExposureClass::XC1 => "XC1",
            ExposureClass::XC2 => "XC2",
            ExposureClass::XC3 => "XC3",
            ExposureClass::XC4 => "XC4",
            ExposureClass::XD1 => "XD1",
            ExposureClass::XD2 => "XD2",
            ExposureClass::XD3 => "XD3",
            ExposureClass::XS1 => "XS1",
            ExposureClass::XS2 => "XS2",
            ExposureClass::XS3 => "XS3",
            ExposureClass::XF1 => "XF1",
            ExposureClass::XF2 => "XF2",
            ExposureClass::XF3 => "XF3",
            ExposureClass::XF4 => "XF4",
            ExposureClass::XA1 => "XA1",
            ExposureClass::XA2 => "XA2",
            ExposureClass::XA3 => "XA3",
        }
    }

    /// Parse from common string representations ("xc1", "XC-1", " XD2 ")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-', '_'], "");
        ExposureClass::ALL
            .iter()
            .copied()
            .find(|class| class.code() == normalized)
            .ok_or_else(|| CalcError::material_not_found(format!("exposure class '{}'", s)))
    }

    /// Environment the class describes
    pub fn description(&self) -> &'static str {
        match self {
            ExposureClass::X0 => "No risk of corrosion or attack; very dry for reinforced concrete",
            ExposureClass::XC1 => "Carbonation: dry or permanently wet",
            ExposureClass::XC2 => "Carbonation: wet, rarely dry",
            ExposureClass::XC3 => "Carbonation: moderate humidity",
            ExposureClass::XC4 => "Carbonation: cyclic wet and dry",
            ExposureClass::XD1 => "Chlorides: moderate humidity",
            ExposureClass::XD2 => "Chlorides: wet, rarely dry",
            ExposureClass::XD3 => "Chlorides: cyclic wet and dry",
            ExposureClass::XS1 => "Sea water: airborne salt, no direct contact",
            ExposureClass::XS2 => "Sea water: permanently submerged",
            ExposureClass::XS3 => "Sea water: tidal, splash and spray zones",
            ExposureClass::XF1 => "Freeze/thaw: moderate saturation, no de-icing agent",
            ExposureClass::XF2 => "Freeze/thaw: moderate saturation, with de-icing agent",
            ExposureClass::XF3 => "Freeze/thaw: high saturation, no de-icing agent",
            ExposureClass::XF4 => "Freeze/thaw: high saturation, with de-icing agent or sea water",
            ExposureClass::XA1 => "Chemical attack: slightly aggressive environment",
            ExposureClass::XA2 => "Chemical attack: moderately aggressive environment",
            ExposureClass::XA3 => "Chemical attack: highly aggressive environment",
        }
    }

    /// Typical members in this class
    pub fn examples(&self) -> &'static str {
        match self {
            ExposureClass::X0 => "Concrete inside buildings with very low air humidity",
            ExposureClass::XC1 => "Interior concrete with low humidity; concrete permanently under water",
            ExposureClass::XC2 => "Surfaces in long-term contact with water; many foundations",
            ExposureClass::XC3 => "Interior concrete with moderate or high humidity; external concrete sheltered from rain",
            ExposureClass::XC4 => "Surfaces in contact with water, outside class XC2",
            ExposureClass::XD1 => "Surfaces exposed to airborne chlorides",
            ExposureClass::XD2 => "Swimming pools; members exposed to industrial waters containing chlorides",
            ExposureClass::XD3 => "Bridge members exposed to chloride spray; pavements; car park slabs",
            ExposureClass::XS1 => "Structures near or on the coast",
            ExposureClass::XS2 | ExposureClass::XS3 => "Parts of marine structures",
            ExposureClass::XF1 => "Vertical surfaces exposed to rain and freezing",
            ExposureClass::XF2 => "Vertical surfaces of road structures exposed to freezing and airborne de-icing agents",
            ExposureClass::XF3 => "Horizontal surfaces exposed to rain and freezing",
            ExposureClass::XF4 => "Road and bridge decks exposed to de-icing agents; marine splash zones exposed to freezing",
            ExposureClass::XA1 | ExposureClass::XA2 | ExposureClass::XA3 => "Natural soils and ground water",
        }
    }
}

impl std::fmt::Display for ExposureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How the member is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FabricationMode {
    /// Poured on site
    #[default]
    CastInPlace,
    /// Produced in a plant
    Precast,
}

impl FabricationMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            FabricationMode::CastInPlace => "Cast in place",
            FabricationMode::Precast => "Precast",
        }
    }
}

/// Test specimen the strength is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpecimenType {
    /// 150 × 300 mm cylinder
    #[default]
    Cylindrical,
    /// 150 mm cube
    Cubic,
}

impl SpecimenType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SpecimenType::Cylindrical => "Cylinder",
            SpecimenType::Cubic => "Cube",
        }
    }
}

/// Minimum strengths of one class: `[cast in place, precast] × [cylinder, cube]`
type StrengthRow = [[f64; 2]; 2];

static MINIMUM_STRENGTHS: Lazy<HashMap<ExposureClass, StrengthRow>> = Lazy::new(|| {
    use ExposureClass::*;
    HashMap::from([
        (X0, [[0.0, 0.0], [20.0, 25.0]]),
        (XC1, [[20.0, 25.0], [25.0, 30.0]]),
        (XC2, [[25.0, 30.0], [30.0, 37.0]]),
        (XC3, [[30.0, 37.0], [35.0, 45.0]]),
        (XC4, [[30.0, 37.0], [35.0, 45.0]]),
        (XD1, [[30.0, 37.0], [35.0, 45.0]]),
        (XD2, [[30.0, 37.0], [40.0, 50.0]]),
        (XD3, [[35.0, 45.0], [35.0, 45.0]]),
        (XS1, [[30.0, 37.0], [40.0, 50.0]]),
        (XS2, [[35.0, 45.0], [40.0, 50.0]]),
        (XS3, [[35.0, 45.0], [35.0, 45.0]]),
        (XF1, [[30.0, 37.0], [35.0, 45.0]]),
        (XF2, [[30.0, 37.0], [35.0, 45.0]]),
        (XF3, [[30.0, 37.0], [35.0, 45.0]]),
        (XF4, [[30.0, 37.0], [35.0, 45.0]]),
        (XA1, [[30.0, 37.0], [40.0, 50.0]]),
        (XA2, [[35.0, 45.0], [40.0, 50.0]]),
        (XA3, [[40.0, 50.0], [40.0, 50.0]]),
    ])
});

/// Minimum characteristic strength (MPa) required by one exposure class
pub fn minimum_strength(class: ExposureClass, mode: FabricationMode, specimen: SpecimenType) -> f64 {
    let row = match mode {
        FabricationMode::CastInPlace => 0,
        FabricationMode::Precast => 1,
    };
    let column = match specimen {
        SpecimenType::Cylindrical => 0,
        SpecimenType::Cubic => 1,
    };
    MINIMUM_STRENGTHS
        .get(&class)
        .map(|strengths| strengths[row][column])
        .unwrap_or(0.0)
}

/// Governing concrete grade of an exposure selection.
///
/// `fck == 0` with no governing class means the grade is undetermined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuralClass {
    /// Characteristic compressive strength (MPa)
    pub fck: f64,
    /// Class that set `fck`
    pub governing_class: Option<ExposureClass>,
}

impl StructuralClass {
    /// Code of the governing class, empty when undetermined
    pub fn label(&self) -> &'static str {
        self.governing_class.map(|class| class.code()).unwrap_or("")
    }

    pub fn is_determined(&self) -> bool {
        self.fck > 0.0
    }
}

/// Selected exposure classes plus the production context they apply to.
///
/// Classes keep their selection order and are never duplicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "StoredSelection")]
pub struct ExposureSelection {
    classes: Vec<ExposureClass>,
    /// Fabrication mode
    pub fabrication_mode: FabricationMode,
    /// Specimen type
    pub specimen_type: SpecimenType,
}

/// On-disk form; rebuilt through [`ExposureSelection::new`] so duplicates collapse
#[derive(Deserialize)]
struct StoredSelection {
    #[serde(default)]
    classes: Vec<ExposureClass>,
    #[serde(default)]
    fabrication_mode: FabricationMode,
    #[serde(default)]
    specimen_type: SpecimenType,
}

impl From<StoredSelection> for ExposureSelection {
    fn from(stored: StoredSelection) -> Self {
        ExposureSelection::new(stored.classes, stored.fabrication_mode, stored.specimen_type)
    }
}

impl ExposureSelection {
    pub fn new(
        classes: impl IntoIterator<Item = ExposureClass>,
        fabrication_mode: FabricationMode,
        specimen_type: SpecimenType,
    ) -> Self {
        let mut selection = Self {
            classes: Vec::new(),
            fabrication_mode,
            specimen_type,
        };
        for class in classes {
            selection.insert(class);
        }
        selection
    }

    /// Parse a comma-separated list such as "XC1,XD2"
    pub fn parse_classes(list: &str) -> CalcResult<Vec<ExposureClass>> {
        list.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(ExposureClass::from_str_flexible)
            .collect()
    }

    /// Selected classes in selection order
    pub fn classes(&self) -> &[ExposureClass] {
        &self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Add a class; returns false if it was already selected
    pub fn insert(&mut self, class: ExposureClass) -> bool {
        if self.classes.contains(&class) {
            return false;
        }
        self.classes.push(class);
        true
    }

    /// Remove a class; returns false if it was not selected
    pub fn remove(&mut self, class: ExposureClass) -> bool {
        let before = self.classes.len();
        self.classes.retain(|selected| *selected != class);
        self.classes.len() != before
    }

    /// Select the class if absent, deselect it otherwise
    pub fn toggle(&mut self, class: ExposureClass) {
        if !self.remove(class) {
            self.classes.push(class);
        }
    }

    /// Governing grade: the highest minimum strength over the selection.
    ///
    /// Ties keep the first class reaching the maximum in selection order.
    pub fn resolve(&self) -> StructuralClass {
        let mut governing = StructuralClass::default();
        for &class in &self.classes {
            let fck = minimum_strength(class, self.fabrication_mode, self.specimen_type);
            if fck > governing.fck {
                governing = StructuralClass {
                    fck,
                    governing_class: Some(class),
                };
            }
        }
        governing
    }
}
