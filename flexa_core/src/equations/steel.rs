//! # Reinforcing Steel Formulas
//!
//! Design strength, limiting strain ratio and the stress-strain laws used
//! for tension and compression reinforcement (EN 1992-1-1, §3.2.7).
//!
//! ## Notation
//!
//! - `fyk` = Characteristic yield strength (MPa)
//! - `fyd` = Design yield strength (MPa)
//! - `εs` = Steel strain (m/m)
//! - `εy` = Yield strain of the grade (m/m)
//! - `εc` = Ultimate concrete compressive strain, 3.5‰
//! - `k` = Hardening ratio ft/fy for class B steel
//! - `εuk` = Strain at which the hardening branch reaches k·fyd
//!
//! ## Stress-Strain Law
//!
//! ```text
//!   σs
//!   k·fyd ┤            ┌──────────  (hardening grade, capped at εuk)
//!   fyd   ┤     ╱‾‾‾‾‾‾             (plastic grade stays at fyd)
//!         │   ╱
//!         │ ╱
//!         └──┴─────────┴──────────  εs
//!           εy        εuk
//! ```

use serde::{Deserialize, Serialize};

/// Partial safety factor for reinforcing steel, γs
pub const GAMMA_S: f64 = 1.15;

/// Ultimate concrete compressive strain εcu2 (m/m)
pub const CONCRETE_ULTIMATE_STRAIN: f64 = 3.5e-3;

/// Hardening ratio k = (ft/fy)k for class B steel
pub const HARDENING_RATIO: f64 = 1.08;

/// Strain at which the hardening branch reaches k·fyd (m/m)
pub const HARDENING_LIMIT_STRAIN: f64 = 5.0e-3;

/// Which branch of the stress-strain law a steel grade follows past yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressLaw {
    /// Horizontal top branch: σs = fyd beyond yield
    Plastic,
    /// Inclined top branch rising from fyd at εy to k·fyd at εuk
    StrainHardening,
}

/// Design yield strength
///
/// # Formula (EN 1992-1-1, §3.2.7)
/// fyd = fyk / γs = fyk / 1.15
#[inline]
pub fn design_yield_strength(fyk: f64) -> f64 {
    fyk / GAMMA_S
}

/// Relative depth of the compression zone when the steel just yields
///
/// # Formula
/// ξy = εc / (εc + εy)
#[inline]
pub fn limiting_strain_ratio(ey: f64) -> f64 {
    CONCRETE_ULTIMATE_STRAIN / (CONCRETE_ULTIMATE_STRAIN + ey)
}

/// Stress on the inclined (hardening) branch for class B steel
///
/// # Formula
/// σs = fyd · (k + (εs − εuk)(k − 1) / (εuk − εy))
///
/// Equals fyd at εs = εy and k·fyd at εs = εuk.
#[inline]
pub fn steel_stress_class_b(fyd: f64, es: f64, ey: f64) -> f64 {
    let k = HARDENING_RATIO;
    let euk = HARDENING_LIMIT_STRAIN;
    fyd * (k + (es - euk) * (k - 1.0) / (euk - ey))
}

/// Stress on the horizontal branch (no hardening)
///
/// # Formula
/// σs = fyd
#[inline]
pub fn plastic_steel_stress(fyd: f64) -> f64 {
    fyd
}

/// Stress on the linear branch below yield
///
/// # Formula
/// σs = fyd · εs / εy
#[inline]
pub fn elastic_steel_stress(fyd: f64, es: f64, ey: f64) -> f64 {
    fyd * es / ey
}

/// Steel stress for a given strain following the grade's law
///
/// Below εy the stress is linear up to fyd. Past yield the plastic law
/// holds fyd, the hardening law follows [`steel_stress_class_b`] with the
/// strain capped at εuk.
pub fn steel_stress(law: StressLaw, fyd: f64, es: f64, ey: f64) -> f64 {
    if es < ey {
        return elastic_steel_stress(fyd, es, ey);
    }
    match law {
        StressLaw::Plastic => plastic_steel_stress(fyd),
        StressLaw::StrainHardening => {
            steel_stress_class_b(fyd, es.min(HARDENING_LIMIT_STRAIN), ey)
        }
    }
}
