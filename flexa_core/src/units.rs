//! # Unit Types
//!
//! Type-safe wrappers for the units used by the bending design method.
//! These keep the kN·m / MN·m and m² / cm² conventions explicit while
//! remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - The design method uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## SI Units (Primary)
//!
//! Flexa follows the Eurocode conventions:
//! - Length: meters (m)
//! - Stress: megapascals (MPa = N/mm² = MN/m²)
//! - Moment: kilonewton-meters (kN·m) for input, meganewton-meters (MN·m)
//!   inside formulas so that moment / (MPa · m³) is dimensionless
//! - Area: square meters (m²) internally, square centimeters (cm²) for display
//!
//! ## Example
//!
//! ```rust
//! use flexa_core::units::{KilonewtonMeters, MeganewtonMeters, SquareCentimeters, SquareMeters};
//!
//! let med = KilonewtonMeters(100.0);
//! let med_mnm: MeganewtonMeters = med.into();
//! assert!((med_mnm.0 - 0.1).abs() < 1e-12);
//!
//! let area = SquareMeters(4.99e-4);
//! let area_cm2: SquareCentimeters = area.into();
//! assert!((area_cm2.0 - 4.99).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

/// Moment in meganewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeganewtonMeters(pub f64);

/// kN·m → MN·m
pub const KNM_TO_MNM: f64 = 1.0e-3;

impl From<KilonewtonMeters> for MeganewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        MeganewtonMeters(knm.0 * KNM_TO_MNM)
    }
}

impl From<MeganewtonMeters> for KilonewtonMeters {
    fn from(mnm: MeganewtonMeters) -> Self {
        KilonewtonMeters(mnm.0 / KNM_TO_MNM)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Area in square centimeters (display unit for reinforcement)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareCentimeters(pub f64);

/// m² → cm²
pub const M2_TO_CM2: f64 = 1.0e4;

impl From<SquareMeters> for SquareCentimeters {
    fn from(m2: SquareMeters) -> Self {
        SquareCentimeters(m2.0 * M2_TO_CM2)
    }
}

impl From<SquareCentimeters> for SquareMeters {
    fn from(cm2: SquareCentimeters) -> Self {
        SquareMeters(cm2.0 / M2_TO_CM2)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(KilonewtonMeters);
impl_arithmetic!(MeganewtonMeters);
impl_arithmetic!(SquareMeters);
impl_arithmetic!(SquareCentimeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_conversion() {
        let med = KilonewtonMeters(250.0);
        let mnm: MeganewtonMeters = med.into();
        assert!((mnm.0 - 0.25).abs() < 1e-12);

        let back: KilonewtonMeters = mnm.into();
        assert!((back.0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_conversion() {
        let area = SquareMeters(1.8e-4);
        let cm2: SquareCentimeters = area.into();
        assert!((cm2.0 - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(0.5);
        let b = Meters(0.05);
        assert!(((a - b).0 - 0.45).abs() < 1e-12);
        assert!(((a + b).0 - 0.55).abs() < 1e-12);
        assert_eq!((a * 2.0).0, 1.0);
        assert_eq!((a / 2.0).0, 0.25);
    }

    #[test]
    fn test_serialization() {
        let fcd = MegaPascals(16.5);
        let json = serde_json::to_string(&fcd).unwrap();
        assert_eq!(json, "16.5");

        let roundtrip: MegaPascals = serde_json::from_str(&json).unwrap();
        assert_eq!(fcd, roundtrip);
    }
}
