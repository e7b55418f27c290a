//! # Rectangular Section Bending Formulas
//!
//! Simplified rectangular stress block (λ = 0.8, η = 1) for a rectangular
//! section under simple bending, with or without compression reinforcement.
//!
//! ## Notation
//!
//! - `Med` = Ultimate design bending moment (kN·m)
//! - `b` = Section width (m)
//! - `d` = Effective depth to the tension steel (m)
//! - `d'` = Depth of the compression steel from the compressed face (m)
//! - `μ` = Reduced moment
//! - `ξ` = Relative depth of the compression zone x/d
//! - `x` = Depth of the compression zone (m)
//! - `z` = Lever arm of the internal forces (m)
//! - `σs`, `σ's` = Stress in the tension / compression steel (MPa)
//!
//! Moments enter in kN·m and are converted to MN·m so that
//! MN·m / (MPa · m³) is dimensionless and MN·m / (MPa · m) gives m².
//!
//! ```text
//!    ┌─────────────┐ ─┬─          0.8x
//!    │ ● ● A's   ● │  │ d'      ┌──────┐ Fc = 0.8·b·x·fcd
//!    │- - - - - - -│  x         │      │
//!    │             │  │         └──────┘
//!    │             │ ─┴─            ↕ z = d − 0.4x
//!    │             │
//!    │ ● ● As    ● │ ── d       Fs = As·σs
//!    └─────────────┘
//! ```

use crate::equations::steel::CONCRETE_ULTIMATE_STRAIN;
use crate::units::{KilonewtonMeters, MeganewtonMeters};

/// Depth factor λ of the rectangular stress block
pub const STRESS_BLOCK_DEPTH: f64 = 0.8;

/// Ratio of the compression-steel depth to the total height, d' = 0.1·h
pub const COMPRESSION_STEEL_COVER_RATIO: f64 = 0.1;

/// kN·m → MN·m, the moment unit the formulas divide by MPa
#[inline]
fn in_mnm(knm: f64) -> f64 {
    MeganewtonMeters::from(KilonewtonMeters(knm)).0
}

/// Reduced moment
///
/// # Formula
/// μ = Med / (b · d² · fcd)
#[inline]
pub fn reduced_moment(med: f64, b: f64, d: f64, fcd: f64) -> f64 {
    in_mnm(med) / (b * d.powi(2) * fcd)
}

/// Branch predicate: no compression reinforcement needed
///
/// # Formula
/// μ ≤ μlim
#[inline]
pub fn is_under_reinforced(mu: f64, mu_limit: f64) -> bool {
    mu <= mu_limit
}

/// Relative depth of the compression zone
///
/// # Formula
/// ξ = 1.25 · (1 − √(1 − 2μ))
///
/// Defined for μ ≤ 0.5.
#[inline]
pub fn compression_parameter(mu: f64) -> f64 {
    1.25 * (1.0 - (1.0 - 2.0 * mu).sqrt())
}

/// Depth of the compression zone
///
/// # Formula
/// x = d · ξ
#[inline]
pub fn compression_depth(d: f64, xi: f64) -> f64 {
    d * xi
}

/// Lever arm of the internal forces
///
/// # Formula
/// z = d − 0.4 · x
#[inline]
pub fn lever_arm(d: f64, x: f64) -> f64 {
    d - 0.4 * x
}

/// Strain in the tension steel (plane sections, εc = 3.5‰ at the top fiber)
///
/// # Formula
/// εs = (d − x) / x · εc
#[inline]
pub fn tensile_steel_strain(d: f64, x: f64) -> f64 {
    (d - x) / x * CONCRETE_ULTIMATE_STRAIN
}

/// Strain in the compression steel located at depth d'
///
/// # Formula
/// ε's = (ξ − d'/d) / ξ · εc
#[inline]
pub fn compressed_steel_strain(xi: f64, d_prime: f64, d: f64) -> f64 {
    (xi - d_prime / d) / xi * CONCRETE_ULTIMATE_STRAIN
}

/// Tension steel area required for a moment
///
/// # Formula
/// As = Med / (σs · z)
#[inline]
pub fn required_tensile_area(med: f64, sigma_s: f64, z: f64) -> f64 {
    in_mnm(med) / (sigma_s * z)
}

/// Minimum tension reinforcement (EN 1992-1-1, §9.2.1.1)
///
/// # Formula
/// As,min = 0.26 · b · d · fctm / fyk
#[inline]
pub fn minimum_tensile_area(b: f64, d: f64, fctm: f64, fyk: f64) -> f64 {
    0.26 * b * d * fctm / fyk
}

/// Governing tension area
///
/// # Formula
/// As,th = max(As, As,min)
#[inline]
pub fn governing_area(as_calc: f64, as_min: f64) -> f64 {
    as_calc.max(as_min)
}

/// Moment carried by the concrete block and the tension steel at the balanced limit (kN·m)
///
/// # Formula
/// Mu1 = 0.8 · b · x · fcd · z
#[inline]
pub fn balanced_moment(b: f64, x: f64, fcd: f64, z: f64) -> f64 {
    KilonewtonMeters::from(MeganewtonMeters(STRESS_BLOCK_DEPTH * b * x * fcd * z)).0
}

/// Moment left over for the compression steel couple (kN·m)
///
/// # Formula
/// Mu2 = Med − Mu1
#[inline]
pub fn residual_moment(med: f64, mu1: f64) -> f64 {
    med - mu1
}

/// Compression steel area
///
/// # Formula
/// A's = Mu2 / (σ's · (d − d'))
#[inline]
pub fn compressed_steel_area(mu2: f64, sigma_s_prime: f64, steel_lever_arm: f64) -> f64 {
    in_mnm(mu2) / (sigma_s_prime * steel_lever_arm)
}

/// Tension steel area of a doubly reinforced section
///
/// # Formula
/// As = Mu1 / (σs · z) + Mu2 / (σs · (d − d'))
#[inline]
pub fn doubly_reinforced_tensile_area(mu1: f64, mu2: f64, sigma_s: f64, z: f64, steel_lever_arm: f64) -> f64 {
    required_tensile_area(mu1, sigma_s, z) + required_tensile_area(mu2, sigma_s, steel_lever_arm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_moment() {
        // 100 kN·m on 0.30 x 0.45 with fcd = 25/1.5
        let mu = reduced_moment(100.0, 0.30, 0.45, 25.0 / 1.5);
        assert!((mu - 0.098765).abs() < 1e-6);
    }

    #[test]
    fn test_branch_threshold() {
        assert!(is_under_reinforced(0.2, 0.372));
        assert!(is_under_reinforced(0.372, 0.372));
        assert!(!is_under_reinforced(0.3721, 0.372));
    }

    #[test]
    fn test_compression_parameter_range() {
        assert_eq!(compression_parameter(0.0), 0.0);
        assert_eq!(compression_parameter(0.5), 1.25);

        let mut previous = compression_parameter(0.0);
        for step in 1..=50 {
            let current = compression_parameter(step as f64 * 0.01);
            assert!(current > previous);
            assert!((0.0..=1.25).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn test_compression_parameter_above_half_is_nan() {
        assert!(compression_parameter(0.51).is_nan());
    }

    #[test]
    fn test_zone_depth_and_lever_arm() {
        let x = compression_depth(0.45, 0.2);
        assert!((x - 0.09).abs() < 1e-12);
        assert!((lever_arm(0.45, x) - 0.414).abs() < 1e-12);
    }

    #[test]
    fn test_tensile_strain_at_balanced_depth() {
        // At ξ = εc / (εc + εy) the tension steel sits exactly at εy
        let ey = 2.17e-3;
        let xi = CONCRETE_ULTIMATE_STRAIN / (CONCRETE_ULTIMATE_STRAIN + ey);
        let es = tensile_steel_strain(0.45, 0.45 * xi);
        assert!((es - ey).abs() < 1e-12);
    }

    #[test]
    fn test_tensile_strain_at_zero_depth_is_infinite() {
        assert!(tensile_steel_strain(0.45, 0.0).is_infinite());
    }

    #[test]
    fn test_compressed_strain() {
        let es = compressed_steel_strain(0.617284, 0.05, 0.45);
        assert!((es - 2.87e-3).abs() < 1e-6);
    }

    #[test]
    fn test_minimum_area() {
        let as_min = minimum_tensile_area(0.30, 0.45, 2.565, 500.0);
        assert!((as_min - 1.8007e-4).abs() < 1e-7);
    }

    #[test]
    fn test_governing_area_is_max() {
        for (a, b) in [(1.0e-4, 2.0e-4), (5.0e-4, 1.8e-4), (3.0e-4, 3.0e-4), (0.0, 0.0)] {
            let g = governing_area(a, b);
            assert!(g >= a && g >= b);
            assert!(g == a || g == b);
        }
    }

    #[test]
    fn test_balanced_moment_matches_reduced_moment_limit() {
        // Mu1 / (b d² fcd) recovers 0.8 ξ (1 − 0.4 ξ)
        let (b, d, fcd, xi) = (0.30, 0.45, 25.0 / 1.5, 0.617284);
        let x = compression_depth(d, xi);
        let mu1 = balanced_moment(b, x, fcd, lever_arm(d, x));
        let mu = reduced_moment(mu1, b, d, fcd);
        assert!((mu - 0.8 * xi * (1.0 - 0.4 * xi)).abs() < 1e-12);
        assert!((mu1 - 376.543).abs() < 1e-3);
    }

    #[test]
    fn test_doubly_reinforced_area_sums_contributions() {
        let total = doubly_reinforced_tensile_area(376.543, 73.457, 434.78, 0.338889, 0.40);
        let balanced = required_tensile_area(376.543, 434.78, 0.338889);
        let residual = required_tensile_area(73.457, 434.78, 0.40);
        assert!((total - (balanced + residual)).abs() < 1e-15);
        assert!((total - 2.978e-3).abs() < 1e-6);
    }

    #[test]
    fn test_residual_and_compressed_area() {
        let mu2 = residual_moment(450.0, 376.543);
        assert!((mu2 - 73.457).abs() < 1e-9);
        let a_s_prime = compressed_steel_area(mu2, 443.386, 0.40);
        assert!((a_s_prime - 4.1418e-4).abs() < 1e-7);
    }
}
