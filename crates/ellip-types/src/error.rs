// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EllipError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Computation failed after {iterations} iterations: {message}")]
    ComputationFailed { iterations: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type EllipResult<T> = Result<T, EllipError>;
