//! # Concrete Material Formulas
//!
//! Derived concrete properties from the characteristic cylinder strength
//! `fck` (EN 1992-1-1, Table 3.1 and §3.1.6).
//!
//! ## Notation
//!
//! - `fck` = Characteristic compressive cylinder strength at 28 days (MPa)
//! - `fcm` = Mean compressive strength (MPa)
//! - `fcd` = Design compressive strength (MPa)
//! - `fctm` = Mean axial tensile strength (MPa)
//! - `Ecm` = Secant modulus of elasticity (MPa)
//!
//! All functions are raw formulas. Callers that cannot guarantee the
//! domain should go through [`crate::equations::checked`].

/// Partial safety factor for concrete, γc (persistent and transient situations)
pub const GAMMA_C: f64 = 1.5;

/// Mean compressive strength
///
/// # Formula (EN 1992-1-1, Table 3.1)
/// fcm = fck + 8
#[inline]
pub fn mean_compressive_strength(fck: f64) -> f64 {
    fck + 8.0
}

/// Design compressive strength
///
/// # Formula (EN 1992-1-1, §3.1.6 with αcc = 1)
/// fcd = fck / γc = fck / 1.5
#[inline]
pub fn design_compressive_strength(fck: f64) -> f64 {
    fck / GAMMA_C
}

/// Mean axial tensile strength
///
/// # Formula (EN 1992-1-1, Table 3.1, fck ≤ C50/60)
/// fctm = 0.3 · fck^(2/3)
///
/// Undefined for `fck < 0` (negative base to a fractional power yields NaN).
#[inline]
pub fn mean_tensile_strength(fck: f64) -> f64 {
    0.3 * fck.powf(2.0 / 3.0)
}

/// Secant modulus of elasticity
///
/// # Formula (EN 1992-1-1, Table 3.1)
/// Ecm = 22000 · (fcm / 10)^0.3
#[inline]
pub fn secant_modulus(fcm: f64) -> f64 {
    22000.0 * (fcm / 10.0).powf(0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c25_properties() {
        assert_eq!(mean_compressive_strength(25.0), 33.0);
        assert!((design_compressive_strength(25.0) - 16.6667).abs() < 1e-4);
        assert!((mean_tensile_strength(25.0) - 2.565).abs() < 1e-3);
        // Table 3.1 lists Ecm = 31 GPa for C25/30
        assert!((secant_modulus(33.0) - 31476.0).abs() < 1.0);
    }

    #[test]
    fn test_tensile_strength_matches_closed_form() {
        for fck in [0.0, 12.0, 20.0, 30.0, 45.0, 50.0] {
            let expected = 0.3 * f64::powf(fck, 2.0 / 3.0);
            assert_eq!(mean_tensile_strength(fck), expected);
        }
    }

    #[test]
    fn test_tensile_strength_monotonic() {
        let mut previous = mean_tensile_strength(0.0);
        assert_eq!(previous, 0.0);
        for step in 1..=100 {
            let current = mean_tensile_strength(step as f64 * 0.5);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_negative_fck_is_nan() {
        assert!(mean_tensile_strength(-5.0).is_nan());
    }
}
