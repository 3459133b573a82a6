// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — AGM
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Arithmetic-geometric mean sequence for a single modulus.
//!
//! Starting from (a₀, b₀, c₀) = (1, √(1−m), √m):
//!   aᵢ = (aᵢ₋₁ + bᵢ₋₁) / 2
//!   bᵢ = √(aᵢ₋₁ bᵢ₋₁)
//!   cᵢ = (aᵢ₋₁ − bᵢ₋₁) / 2
//! until |cᵢ| <= tolerance. The index of that first converged term is the
//! AGM depth n. Convergence is quadratic, so n stays below ~8 in double
//! precision for every m in (0, 1).

use ellip_types::constants::AGM_CAPACITY_HINT;
use ellip_types::error::{EllipError, EllipResult};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Full AGM history for one modulus: a, b, c each hold depth + 1 terms.
#[derive(Debug, Clone)]
pub struct AgmSequence {
    pub modulus: f64,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
}

impl AgmSequence {
    /// Index of the first term with |c| <= tolerance.
    pub fn depth(&self) -> usize {
        self.c.len() - 1
    }

    /// Number of descending Landen steps applied to a phase.
    pub fn landen_steps(&self) -> usize {
        self.depth().saturating_sub(1)
    }

    /// Converged arithmetic mean a_n.
    pub fn a_final(&self) -> f64 {
        self.a[self.depth()]
    }
}

/// Run the AGM for modulus `m` until |c_i| <= `tolerance`.
///
/// Fails with `ComputationFailed` when more than `max_iterations` steps
/// would be needed. At m = 1 the geometric mean stays at zero and a_n → 0,
/// so callers handle that modulus in closed form.
pub fn agm_sequence(m: f64, tolerance: f64, max_iterations: usize) -> EllipResult<AgmSequence> {
    if !(0.0..=1.0).contains(&m) {
        return Err(EllipError::InvalidArgument(format!(
            "modulus must lie in [0, 1], got {m}"
        )));
    }
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(EllipError::InvalidArgument(format!(
            "tolerance must be finite and > 0, got {tolerance}"
        )));
    }

    let mut a = Vec::with_capacity(AGM_CAPACITY_HINT);
    let mut b = Vec::with_capacity(AGM_CAPACITY_HINT);
    let mut c = Vec::with_capacity(AGM_CAPACITY_HINT);
    a.push(1.0);
    b.push((1.0 - m).sqrt());
    c.push(m.sqrt());

    let mut i = 0usize;
    while c[i].abs() > tolerance {
        if i >= max_iterations {
            warn!(modulus = m, tolerance, iterations = i, "AGM iteration cap reached");
            return Err(EllipError::ComputationFailed {
                iterations: i,
                message: format!(
                    "AGM for m = {m} did not reach |c| <= {tolerance:e} (last |c| = {:e})",
                    c[i].abs()
                ),
            });
        }
        let (ap, bp) = (a[i], b[i]);
        a.push(0.5 * (ap + bp));
        b.push((ap * bp).sqrt());
        c.push(0.5 * (ap - bp));
        i += 1;
    }

    debug!(modulus = m, depth = i, "AGM converged");
    Ok(AgmSequence {
        modulus: m,
        a,
        b,
        c,
    })
}

/// Multiple of π nearest to `x`: π·k with k the integer closest to x/π.
///
/// Exact ties (x/π = k + ½) round toward −∞. Those ties only arise for
/// x = (k + ½)·π̂ with π̂ the rounded-down `f64` π, which sits just below
/// the pole of tan, where `atan(r·tan x)` has already reached +π/2.
/// Rounding the tie upward would add an extra π to the unwrapped phase.
pub fn nearest_multiple_of_pi(x: f64) -> f64 {
    PI * (x / PI - 0.5).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_agm_zero_modulus_has_zero_depth() {
        let seq = agm_sequence(0.0, f64::EPSILON, 64).unwrap();
        assert_eq!(seq.depth(), 0);
        assert_eq!(seq.landen_steps(), 0);
        assert_eq!(seq.a_final(), 1.0);
    }

    #[test]
    fn test_agm_invariants() {
        for &m in &[1e-12, 0.1, 0.5, 0.9, 0.999_999] {
            let seq = agm_sequence(m, f64::EPSILON, 64).unwrap();
            let n = seq.depth();
            assert!(n >= 1 && n < 12, "depth {n} for m = {m}");
            for i in 0..=n {
                // a and b may cross by an ulp once they agree to machine precision
                assert!(seq.a[i] + 4.0 * f64::EPSILON >= seq.b[i], "a < b at i={i}, m={m}");
                assert!(seq.b[i] >= 0.0);
            }
            for i in 2..=n {
                assert!(
                    seq.c[i].abs() <= seq.c[i - 1].abs(),
                    "|c| not decreasing at i={i}, m={m}"
                );
            }
            assert!(seq.c[n].abs() <= f64::EPSILON);
            assert!(seq.c[n - 1].abs() > f64::EPSILON);
        }
    }

    #[test]
    fn test_agm_half_modulus_mean() {
        // AGM(1, 1/√2) = π / (2 K(0.5))
        let seq = agm_sequence(0.5, f64::EPSILON, 64).unwrap();
        let expected = std::f64::consts::PI / (2.0 * 1.854_074_677_301_372);
        assert!((seq.a_final() - expected).abs() < 1e-14);
    }

    #[test]
    fn test_agm_cap_reports_computation_failed() {
        match agm_sequence(0.5, f64::EPSILON, 2) {
            Err(EllipError::ComputationFailed { iterations, .. }) => assert_eq!(iterations, 2),
            other => panic!("expected ComputationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_agm_rejects_bad_inputs() {
        assert!(agm_sequence(1.5, f64::EPSILON, 64).is_err());
        assert!(agm_sequence(-0.1, f64::EPSILON, 64).is_err());
        assert!(agm_sequence(f64::NAN, f64::EPSILON, 64).is_err());
        assert!(agm_sequence(0.5, 0.0, 64).is_err());
    }

    #[test]
    fn test_nearest_multiple_of_pi() {
        assert_eq!(nearest_multiple_of_pi(0.0), 0.0);
        assert_eq!(nearest_multiple_of_pi(1.0), 0.0);
        assert_eq!(nearest_multiple_of_pi(2.0), PI);
        assert_eq!(nearest_multiple_of_pi(3.0 * PI + 0.1), 3.0 * PI);
        assert_eq!(nearest_multiple_of_pi(-2.0), -PI);
    }

    #[test]
    fn test_nearest_multiple_of_pi_ties_round_down() {
        assert_eq!(nearest_multiple_of_pi(FRAC_PI_2), 0.0);
        assert_eq!(nearest_multiple_of_pi(FRAC_PI_2 + 1e-12), PI);
    }
}
