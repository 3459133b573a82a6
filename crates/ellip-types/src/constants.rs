// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Default AGM convergence tolerance: machine epsilon of `f64`.
pub const DEFAULT_TOLERANCE: f64 = f64::EPSILON;

/// Safety cap on AGM iterations.
/// Quadratic convergence reaches |c| <= eps in ~6 steps for double precision.
pub const MAX_AGM_ITERATIONS: usize = 64;

/// Initial capacity of the per-modulus AGM buffers.
pub const AGM_CAPACITY_HINT: usize = 16;
