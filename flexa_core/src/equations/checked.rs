//! # Checked Formulas
//!
//! Precondition layer in front of the raw formulas. Every function here
//! validates its operands, evaluates the raw formula and refuses to return
//! a non-finite value, so that domain violations surface as
//! [`CalcError::OutOfDomain`] or [`CalcError::ZeroDivision`] instead of
//! `NaN`/`inf` flowing through the rest of a design.
//!
//! ```rust
//! use flexa_core::equations::checked;
//! use flexa_core::errors::CalcError;
//!
//! assert!(checked::compression_parameter(0.2).is_ok());
//! assert!(matches!(
//!     checked::compression_parameter(0.6),
//!     Err(CalcError::OutOfDomain { .. })
//! ));
//! ```

use crate::equations::{concrete, flexure, steel};
use crate::errors::{CalcError, CalcResult};

fn finite_input(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::out_of_domain(quantity, value, "must be finite"))
    }
}

fn nonzero_divisor(quantity: &str, divisor: f64) -> CalcResult<()> {
    if divisor == 0.0 {
        Err(CalcError::zero_division(quantity))
    } else {
        Ok(())
    }
}

fn finite_output(quantity: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            quantity,
            format!("result is not finite ({})", value),
        ))
    }
}

/// fctm = 0.3 · fck^(2/3), requires fck ≥ 0
pub fn mean_tensile_strength(fck: f64) -> CalcResult<f64> {
    finite_input("fck", fck)?;
    if fck < 0.0 {
        return Err(CalcError::out_of_domain("fck", fck, "fck must be >= 0"));
    }
    finite_output("fctm", concrete::mean_tensile_strength(fck))
}

/// Ecm = 22000 · (fcm / 10)^0.3, requires fcm ≥ 0
pub fn secant_modulus(fcm: f64) -> CalcResult<f64> {
    finite_input("fcm", fcm)?;
    if fcm < 0.0 {
        return Err(CalcError::out_of_domain("fcm", fcm, "fcm must be >= 0"));
    }
    finite_output("Ecm", concrete::secant_modulus(fcm))
}

/// μ = Med / (b · d² · fcd), requires b, d, fcd ≠ 0
pub fn reduced_moment(med: f64, b: f64, d: f64, fcd: f64) -> CalcResult<f64> {
    finite_input("Med", med)?;
    nonzero_divisor("mu (b = 0)", finite_input("b", b)?)?;
    nonzero_divisor("mu (d = 0)", finite_input("d", d)?)?;
    nonzero_divisor("mu (fcd = 0)", finite_input("fcd", fcd)?)?;
    finite_output("mu", flexure::reduced_moment(med, b, d, fcd))
}

/// ξ = 1.25 · (1 − √(1 − 2μ)), requires 0 ≤ μ ≤ 0.5
pub fn compression_parameter(mu: f64) -> CalcResult<f64> {
    finite_input("mu", mu)?;
    if 1.0 - 2.0 * mu < 0.0 {
        return Err(CalcError::out_of_domain(
            "mu",
            mu,
            "1 - 2mu must be >= 0 (mu <= 0.5); section is over-reinforced",
        ));
    }
    if mu < 0.0 {
        return Err(CalcError::out_of_domain("mu", mu, "mu must be >= 0"));
    }
    finite_output("xi", flexure::compression_parameter(mu))
}

/// εs = (d − x) / x · εc, requires x ≠ 0
pub fn tensile_steel_strain(d: f64, x: f64) -> CalcResult<f64> {
    finite_input("d", d)?;
    nonzero_divisor("epsilon_s (x = 0)", finite_input("x", x)?)?;
    finite_output("epsilon_s", flexure::tensile_steel_strain(d, x))
}

/// ε's = (ξ − d'/d) / ξ · εc, requires ξ ≠ 0 and d ≠ 0
pub fn compressed_steel_strain(xi: f64, d_prime: f64, d: f64) -> CalcResult<f64> {
    finite_input("d'", d_prime)?;
    nonzero_divisor("epsilon_s' (xi = 0)", finite_input("xi", xi)?)?;
    nonzero_divisor("epsilon_s' (d = 0)", finite_input("d", d)?)?;
    finite_output("epsilon_s'", flexure::compressed_steel_strain(xi, d_prime, d))
}

/// Grade-dependent steel stress, requires εy ≠ 0
pub fn steel_stress(law: steel::StressLaw, fyd: f64, es: f64, ey: f64) -> CalcResult<f64> {
    finite_input("fyd", fyd)?;
    finite_input("epsilon_s", es)?;
    nonzero_divisor("sigma_s (epsilon_y = 0)", finite_input("epsilon_y", ey)?)?;
    finite_output("sigma_s", steel::steel_stress(law, fyd, es, ey))
}

/// As = Med / (σs · z), requires σs · z ≠ 0
pub fn required_tensile_area(med: f64, sigma_s: f64, z: f64) -> CalcResult<f64> {
    finite_input("Med", med)?;
    nonzero_divisor("As (sigma_s * z = 0)", finite_input("sigma_s", sigma_s)? * finite_input("z", z)?)?;
    finite_output("As", flexure::required_tensile_area(med, sigma_s, z))
}

/// As,min = 0.26 · b · d · fctm / fyk, requires fyk ≠ 0
pub fn minimum_tensile_area(b: f64, d: f64, fctm: f64, fyk: f64) -> CalcResult<f64> {
    finite_input("b", b)?;
    finite_input("d", d)?;
    finite_input("fctm", fctm)?;
    nonzero_divisor("As,min (fyk = 0)", finite_input("fyk", fyk)?)?;
    finite_output("As,min", flexure::minimum_tensile_area(b, d, fctm, fyk))
}

/// A's = Mu2 / (σ's · (d − d')), requires σ's · (d − d') ≠ 0
pub fn compressed_steel_area(mu2: f64, sigma_s_prime: f64, steel_lever_arm: f64) -> CalcResult<f64> {
    finite_input("Mu2", mu2)?;
    nonzero_divisor(
        "A's (sigma_s' * (d - d') = 0)",
        finite_input("sigma_s'", sigma_s_prime)? * finite_input("d - d'", steel_lever_arm)?,
    )?;
    finite_output("A's", flexure::compressed_steel_area(mu2, sigma_s_prime, steel_lever_arm))
}

/// As = Mu1 / (σs · z) + Mu2 / (σs · (d − d')), requires σs · z ≠ 0 and σs · (d − d') ≠ 0
pub fn doubly_reinforced_tensile_area(
    mu1: f64,
    mu2: f64,
    sigma_s: f64,
    z: f64,
    steel_lever_arm: f64,
) -> CalcResult<f64> {
    let balanced = required_tensile_area(mu1, sigma_s, z)?;
    let residual = required_tensile_area(mu2, sigma_s, steel_lever_arm)?;
    finite_output("As", balanced + residual)
}
