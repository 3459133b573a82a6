// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Arc Length
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Exact arc length of an ellipse between two angular parameters.
//!
//! For x = a cos θ, y = b sin θ the line element is
//!   ds = √(a² sin²θ + b² cos²θ) dθ.
//! With b the larger axis this is b·√(1 − m sin²θ), m = 1 − (a/b)², so the
//! arc is b·(E(θ₁|m) − E(θ₀|m)). With a the larger axis the modulus would be
//! negative; substituting θ → π/2 − θ swaps the roles of the axes and the
//! reversed orientation flips the operand order:
//!   s = a·(E(π/2 − θ₀|m') − E(π/2 − θ₁|m')),  m' = 1 − (b/a)².

use ellip_math::incomplete::{broadcast_len, evaluate_with};
use ellip_types::config::EvaluatorConfig;
use ellip_types::error::{EllipError, EllipResult};
use ndarray::Array1;
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::debug;

/// Which axis plays the role of the AGM's `b` for a given ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Substitution {
    /// a == b: s = a·(θ₁ − θ₀).
    Circle,
    /// a < b: E evaluated at θ with m = 1 − (a/b)², scaled by b.
    Direct { modulus: f64, scale: f64 },
    /// a > b: E evaluated at π/2 − θ with m = 1 − (b/a)², scaled by a.
    Complementary { modulus: f64, scale: f64 },
}

impl Substitution {
    pub fn select(a: f64, b: f64) -> Self {
        if a == b {
            Substitution::Circle
        } else if a < b {
            let ratio = a / b;
            Substitution::Direct {
                modulus: 1.0 - ratio * ratio,
                scale: b,
            }
        } else {
            let ratio = b / a;
            Substitution::Complementary {
                modulus: 1.0 - ratio * ratio,
                scale: a,
            }
        }
    }
}

fn check_axes(a: f64, b: f64) -> EllipResult<()> {
    if !a.is_finite() || a <= 0.0 || !b.is_finite() || b <= 0.0 {
        return Err(EllipError::InvalidArgument(format!(
            "semi-axes must be finite and > 0, got a = {a}, b = {b}"
        )));
    }
    Ok(())
}

fn at(values: &[f64], i: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[i]
    }
}

/// Batched arc lengths from `theta0s[i]` to `theta1s[i]`.
///
/// A single-element bound broadcasts against the other. All bounds are
/// evaluated in one evaluator call sharing one AGM sequence.
pub fn arc_lengths_with(
    a: f64,
    b: f64,
    theta0s: &[f64],
    theta1s: &[f64],
    config: &EvaluatorConfig,
) -> EllipResult<Array1<f64>> {
    check_axes(a, b)?;
    let n = broadcast_len(theta0s.len(), theta1s.len())?;
    if let Some(bad) = theta0s.iter().chain(theta1s).find(|t| !t.is_finite()) {
        return Err(EllipError::InvalidArgument(format!(
            "angular bounds must be finite, got {bad}"
        )));
    }

    let substitution = Substitution::select(a, b);
    debug!(a, b, bounds = n, ?substitution, "ellipse arc length");

    let (modulus, scale, complement) = match substitution {
        Substitution::Circle => {
            return Ok(Array1::from_shape_fn(n, |i| {
                a * (at(theta1s, i) - at(theta0s, i))
            }));
        }
        Substitution::Direct { modulus, scale } => (modulus, scale, false),
        Substitution::Complementary { modulus, scale } => (modulus, scale, true),
    };

    // upper bounds in [0, n), lower bounds in [n, 2n)
    let to_phase = |theta: f64| if complement { FRAC_PI_2 - theta } else { theta };
    let phases: Vec<f64> = (0..n)
        .map(|i| to_phase(at(theta1s, i)))
        .chain((0..n).map(|i| to_phase(at(theta0s, i))))
        .collect();
    let integrals = evaluate_with(&phases, &[modulus], config)?;
    let e = &integrals.e;

    Ok(Array1::from_shape_fn(n, |i| {
        let (e1, e0) = (e[i], e[n + i]);
        if complement {
            scale * (e0 - e1)
        } else {
            scale * (e1 - e0)
        }
    }))
}

/// Batched arc lengths at machine-epsilon tolerance.
pub fn arc_lengths(a: f64, b: f64, theta0s: &[f64], theta1s: &[f64]) -> EllipResult<Array1<f64>> {
    arc_lengths_with(a, b, theta0s, theta1s, &EvaluatorConfig::default())
}

/// Arc length from `theta0` to `theta1` with an explicit evaluator config.
pub fn arc_length_with(
    a: f64,
    b: f64,
    theta0: f64,
    theta1: f64,
    config: &EvaluatorConfig,
) -> EllipResult<f64> {
    let out = arc_lengths_with(a, b, &[theta0], &[theta1], config)?;
    Ok(out[0])
}

/// Arc length of the ellipse with semi-axes `a` (along θ = 0) and `b`,
/// from `theta0` to `theta1`.
///
/// Signed: swapping the bounds negates the result.
pub fn arc_length(a: f64, b: f64, theta0: f64, theta1: f64) -> EllipResult<f64> {
    arc_length_with(a, b, theta0, theta1, &EvaluatorConfig::default())
}

/// Full perimeter, the arc from 0 to 2π.
pub fn perimeter(a: f64, b: f64) -> EllipResult<f64> {
    arc_length(a, b, 0.0, TAU)
}

/// Positional entry point: `[a, b]` gives the perimeter,
/// `[a, b, theta0, theta1]` the arc between the bounds.
pub fn arc_length_from_args(args: &[f64]) -> EllipResult<f64> {
    match *args {
        [a, b] => perimeter(a, b),
        [a, b, theta0, theta1] => arc_length(a, b, theta0, theta1),
        _ => Err(EllipError::InvalidArgument(format!(
            "expected 2 arguments (a, b) or 4 arguments (a, b, theta0, theta1), got {}",
            args.len()
        ))),
    }
}

/// Axis-aligned ellipse centred at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    a: f64,
    b: f64,
}

impl Ellipse {
    /// `a` lies along θ = 0, `b` along θ = π/2.
    pub fn new(a: f64, b: f64) -> EllipResult<Self> {
        check_axes(a, b)?;
        Ok(Ellipse { a, b })
    }

    pub fn semi_axes(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    pub fn substitution(&self) -> Substitution {
        Substitution::select(self.a, self.b)
    }

    pub fn point_at(&self, theta: f64) -> (f64, f64) {
        (self.a * theta.cos(), self.b * theta.sin())
    }

    pub fn arc_length(&self, theta0: f64, theta1: f64) -> EllipResult<f64> {
        arc_length(self.a, self.b, theta0, theta1)
    }

    pub fn perimeter(&self) -> EllipResult<f64> {
        perimeter(self.a, self.b)
    }

    pub fn eccentricity(&self) -> f64 {
        let (major, minor) = self.major_minor();
        let ratio = minor / major;
        (1.0 - ratio * ratio).sqrt()
    }

    /// Half the focal chord: minor² / major.
    pub fn semi_latus_rectum(&self) -> f64 {
        let (major, minor) = self.major_minor();
        minor * minor / major
    }

    fn major_minor(&self) -> (f64, f64) {
        if self.a >= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}
