// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Elliptic
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Complete elliptic integrals K(m) and E(m).
//!
//! Computed from the converged AGM sequence:
//!   K(m) = π / (2 a_n)
//!   E(m) = K(m) · (1 − Σ_{j=0..n} 2^{j−1} c_j²)
//! Parameter convention matches scipy: m = k^2 where 0 <= m <= 1.

use crate::agm::agm_sequence;
use ellip_types::config::EvaluatorConfig;
use ellip_types::error::{EllipError, EllipResult};
use std::f64::consts::FRAC_PI_2;

fn check_modulus(m: f64) -> EllipResult<()> {
    if !(0.0..=1.0).contains(&m) {
        return Err(EllipError::InvalidArgument(format!(
            "modulus must lie in [0, 1], got {m}"
        )));
    }
    Ok(())
}

/// Both complete integrals (K(m), E(m)) from a single AGM run.
///
/// K(1) = +∞ and E(1) = 1.
pub fn complete_integrals(m: f64, config: &EvaluatorConfig) -> EllipResult<(f64, f64)> {
    check_modulus(m)?;
    if m == 1.0 {
        return Ok((f64::INFINITY, 1.0));
    }

    let agm = agm_sequence(m, config.tolerance, config.max_agm_iterations)?;
    let k = FRAC_PI_2 / agm.a_final();

    let mut weight = 0.5;
    let mut sum = 0.0;
    for &c in &agm.c {
        sum += weight * c * c;
        weight *= 2.0;
    }

    Ok((k, k * (1.0 - sum)))
}

/// Complete elliptic integral of the first kind K(m).
///
/// Matches `scipy.special.ellipk(m)`; K(1) = +∞.
pub fn ellipk(m: f64) -> EllipResult<f64> {
    complete_integrals(m, &EvaluatorConfig::default()).map(|(k, _)| k)
}

/// Complete elliptic integral of the second kind E(m).
///
/// Matches `scipy.special.ellipe(m)`; E(1) = 1.
pub fn ellipe(m: f64) -> EllipResult<f64> {
    complete_integrals(m, &EvaluatorConfig::default()).map(|(_, e)| e)
}
