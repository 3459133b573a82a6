// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Incomplete Elliptic Integrals
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Incomplete elliptic integrals F(u|m), E(u|m) and Jacobi Zeta Z(u|m).
//!
//! AGM iteration followed by descending Landen back-substitution:
//!   φ₀ = |u|
//!   φⱼ₊₁ = atan((bⱼ/aⱼ)·tan φⱼ) + nearest_multiple_of_pi(φⱼ) + φⱼ
//!   F = φ_N / (2^N a_n),   N = max(n − 1, 0)
//!   E = Cp + (1 − C/2)·F,  C = Σ_{j=0..N} 2ʲ cⱼ²,  Cp = Σ cⱼ₊₁ sin φⱼ₊₁
//!   Z = Cp
//! The sign of u is restored at the end, so F and Z are exactly odd in u.
//! m = 0 and m = 1 are evaluated in closed form.

use crate::agm::{agm_sequence, nearest_multiple_of_pi, AgmSequence};
use ellip_types::config::{EvaluatorConfig, Strategy};
use ellip_types::error::{EllipError, EllipResult};
use ndarray::Array1;
use num_complex::Complex64;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use tracing::debug;

/// Scalar types accepted as phase or modulus operands.
///
/// Only real operands can be evaluated; complex operands are rejected
/// with `InvalidArgument`.
pub trait RealOperand: Copy {
    fn to_real(self) -> EllipResult<f64>;
}

impl RealOperand for f64 {
    fn to_real(self) -> EllipResult<f64> {
        Ok(self)
    }
}

impl RealOperand for f32 {
    fn to_real(self) -> EllipResult<f64> {
        Ok(f64::from(self))
    }
}

impl RealOperand for Complex64 {
    fn to_real(self) -> EllipResult<f64> {
        Err(EllipError::InvalidArgument(format!(
            "complex operand {self} is not supported by the real evaluator; use the complex variant"
        )))
    }
}

/// F, E and Z for one (phase, modulus) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticTriple {
    pub f: f64,
    pub e: f64,
    pub z: f64,
}

/// F, E and Z for a batch of pairs, one entry per broadcast index.
#[derive(Debug, Clone)]
pub struct EllipticIntegrals {
    pub f: Array1<f64>,
    pub e: Array1<f64>,
    pub z: Array1<f64>,
}

impl EllipticIntegrals {
    fn zeros(n: usize) -> Self {
        EllipticIntegrals {
            f: Array1::zeros(n),
            e: Array1::zeros(n),
            z: Array1::zeros(n),
        }
    }

    fn set(&mut self, i: usize, triple: EllipticTriple) {
        self.f[i] = triple.f;
        self.e[i] = triple.e;
        self.z[i] = triple.z;
    }

    pub fn len(&self) -> usize {
        self.f.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<EllipticTriple> {
        if i >= self.len() {
            return None;
        }
        Some(EllipticTriple {
            f: self.f[i],
            e: self.e[i],
            z: self.z[i],
        })
    }
}

/// Length of the broadcast of two operand sequences.
///
/// A length-1 operand broadcasts against the other; otherwise lengths
/// must match.
pub fn broadcast_len(n_phases: usize, n_moduli: usize) -> EllipResult<usize> {
    if n_phases == n_moduli {
        Ok(n_phases)
    } else if n_phases == 1 {
        Ok(n_moduli)
    } else if n_moduli == 1 {
        Ok(n_phases)
    } else {
        Err(EllipError::InvalidArgument(format!(
            "phase and modulus lengths must match or one must be scalar, got {n_phases} and {n_moduli}"
        )))
    }
}

fn real_phases<T: RealOperand>(phases: &[T]) -> EllipResult<Vec<f64>> {
    phases
        .iter()
        .map(|&p| {
            let u = p.to_real()?;
            if !u.is_finite() {
                return Err(EllipError::InvalidArgument(format!(
                    "phase must be finite, got {u}"
                )));
            }
            Ok(u)
        })
        .collect()
}

fn real_moduli<T: RealOperand>(moduli: &[T]) -> EllipResult<Vec<f64>> {
    moduli
        .iter()
        .map(|&v| {
            let m = v.to_real()?;
            if !(0.0..=1.0).contains(&m) {
                return Err(EllipError::InvalidArgument(format!(
                    "modulus must lie in [0, 1], got {m}"
                )));
            }
            Ok(m)
        })
        .collect()
}

fn at(values: &[f64], i: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[i]
    }
}

fn phase_sign(u: f64) -> f64 {
    if u < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Closed form at m = 1, where the integrand reduces to |cos θ|.
fn unit_modulus(u: f64) -> EllipticTriple {
    let s = phase_sign(u);
    let a = u.abs();
    let quadrants = ((a + FRAC_PI_2) / PI).floor();
    let parity = if quadrants % 2.0 == 0.0 { 1.0 } else { -1.0 };

    // ln(tan(π/4 + a/2)) written as ln(1 + sin a) − ln(cos a), exact at a = 0
    let f = if a < FRAC_PI_2 {
        s * (a.sin().ln_1p() - a.cos().ln())
    } else {
        s * f64::INFINITY
    };

    EllipticTriple {
        f,
        e: s * (parity * a.sin() + 2.0 * quadrants),
        z: s * parity * a.sin(),
    }
}

/// Descending Landen back-substitution of one phase through `agm`.
fn descend(u: f64, agm: &AgmSequence) -> EllipticTriple {
    let s = phase_sign(u);
    let mut phi = u.abs();
    let mut c_sum = 0.0;
    let mut cp_sum = 0.0;
    let mut weight = 1.0;

    let steps = agm.landen_steps();
    for j in 0..steps {
        phi = (agm.b[j] / agm.a[j] * phi.tan()).atan() + nearest_multiple_of_pi(phi) + phi;
        c_sum += weight * agm.c[j] * agm.c[j];
        cp_sum += agm.c[j + 1] * phi.sin();
        weight *= 2.0;
    }
    // last retained term of Σ 2ʲ cⱼ², j = N
    c_sum += weight * agm.c[steps] * agm.c[steps];

    let f = phi / (weight * agm.a_final());
    EllipticTriple {
        f: s * f,
        e: s * (cp_sum + (1.0 - 0.5 * c_sum) * f),
        z: s * cp_sum,
    }
}

fn evaluate_pair(u: f64, m: f64, agm: Option<&AgmSequence>) -> EllipResult<EllipticTriple> {
    if m == 0.0 {
        return Ok(EllipticTriple { f: u, e: u, z: 0.0 });
    }
    if m == 1.0 {
        return Ok(unit_modulus(u));
    }
    agm.map(|seq| descend(u, seq))
        .ok_or_else(|| EllipError::ComputationFailed {
            iterations: 0,
            message: format!("no AGM sequence available for m = {m}"),
        })
}

fn needs_agm(m: f64) -> bool {
    m > 0.0 && m < 1.0
}

/// Evaluate F, E, Z with an explicit configuration.
pub fn evaluate_with<T: RealOperand>(
    phases: &[T],
    moduli: &[T],
    config: &EvaluatorConfig,
) -> EllipResult<EllipticIntegrals> {
    config.validate()?;
    let n = broadcast_len(phases.len(), moduli.len())?;
    let phases = real_phases(phases)?;
    let moduli = real_moduli(moduli)?;
    let mut out = EllipticIntegrals::zeros(n);

    match config.strategy {
        Strategy::Grouped => {
            let mut groups: HashMap<u64, AgmSequence> = HashMap::new();
            for &m in moduli.iter().filter(|&&m| needs_agm(m)) {
                if let Entry::Vacant(slot) = groups.entry(m.to_bits()) {
                    slot.insert(agm_sequence(
                        m,
                        config.tolerance,
                        config.max_agm_iterations,
                    )?);
                }
            }
            debug!(pairs = n, groups = groups.len(), "evaluating grouped by modulus");

            for i in 0..n {
                let m = at(&moduli, i);
                let triple = evaluate_pair(at(&phases, i), m, groups.get(&m.to_bits()))?;
                out.set(i, triple);
            }
        }
        Strategy::PerPair => {
            debug!(pairs = n, "evaluating per pair");
            for i in 0..n {
                let m = at(&moduli, i);
                let agm = if needs_agm(m) {
                    Some(agm_sequence(m, config.tolerance, config.max_agm_iterations)?)
                } else {
                    None
                };
                out.set(i, evaluate_pair(at(&phases, i), m, agm.as_ref())?);
            }
        }
    }

    Ok(out)
}

/// Evaluate F, E, Z with a caller-supplied AGM tolerance.
pub fn evaluate<T: RealOperand>(
    phases: &[T],
    moduli: &[T],
    tolerance: f64,
) -> EllipResult<EllipticIntegrals> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(EllipError::InvalidArgument(format!(
            "tolerance must be finite and > 0, got {tolerance}"
        )));
    }
    evaluate_with(phases, moduli, &EvaluatorConfig::with_tolerance(tolerance))
}

/// Evaluate F, E, Z at machine-epsilon tolerance.
pub fn evaluate_default<T: RealOperand>(
    phases: &[T],
    moduli: &[T],
) -> EllipResult<EllipticIntegrals> {
    evaluate_with(phases, moduli, &EvaluatorConfig::default())
}

/// Evaluate every pair with its own AGM sequence.
pub fn evaluate_pairwise<T: RealOperand>(
    phases: &[T],
    moduli: &[T],
    tolerance: f64,
) -> EllipResult<EllipticIntegrals> {
    let config = EvaluatorConfig {
        strategy: Strategy::PerPair,
        ..EvaluatorConfig::with_tolerance(tolerance)
    };
    if let Err(EllipError::ConfigError(msg)) = config.validate() {
        return Err(EllipError::InvalidArgument(msg));
    }
    evaluate_with(phases, moduli, &config)
}

/// Single (phase, modulus) pair at machine-epsilon tolerance.
pub fn evaluate_scalar(u: f64, m: f64) -> EllipResult<EllipticTriple> {
    let out = evaluate_default(&[u], &[m])?;
    out.get(0).ok_or_else(|| {
        EllipError::InvalidArgument("scalar evaluation produced no result".to_string())
    })
}
