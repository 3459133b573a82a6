// ─────────────────────────────────────────────────────────────────────
// SCPN Elliptic Arc — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_TOLERANCE, MAX_AGM_ITERATIONS};
use crate::error::{EllipError, EllipResult};
use serde::{Deserialize, Serialize};

/// How the evaluator shares AGM state between input pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One AGM sequence per distinct modulus, shared by every phase using it.
    #[default]
    Grouped,
    /// Independent AGM sequence for every (phase, modulus) pair.
    PerPair,
}

/// Evaluator settings.
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Stop the AGM once |c_i| <= tolerance (default: f64::EPSILON)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration cap before reporting ComputationFailed (default: 64)
    #[serde(default = "default_max_agm_iterations")]
    pub max_agm_iterations: usize,
    #[serde(default)]
    pub strategy: Strategy,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_max_agm_iterations() -> usize {
    MAX_AGM_ITERATIONS
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            tolerance: default_tolerance(),
            max_agm_iterations: default_max_agm_iterations(),
            strategy: Strategy::default(),
        }
    }
}

impl EvaluatorConfig {
    /// Config with a custom tolerance and defaults elsewhere.
    pub fn with_tolerance(tolerance: f64) -> Self {
        EvaluatorConfig {
            tolerance,
            ..Self::default()
        }
    }

    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> EllipResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EllipResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(EllipError::ConfigError(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        if self.max_agm_iterations == 0 {
            return Err(EllipError::ConfigError(
                "max_agm_iterations must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/ellip-types/, configs/ lives two levels up.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> String {
        project_root().join(relative).to_string_lossy().to_string()
    }

    #[test]
    fn test_default_config() {
        let cfg = EvaluatorConfig::default();
        assert_eq!(cfg.tolerance, f64::EPSILON);
        assert_eq!(cfg.max_agm_iterations, 64);
        assert_eq!(cfg.strategy, Strategy::Grouped);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_default_evaluator_config() {
        let cfg = EvaluatorConfig::from_file(&config_path("configs/default_evaluator.json"))
            .unwrap();
        assert_eq!(cfg.tolerance, f64::EPSILON);
        assert_eq!(cfg.max_agm_iterations, 64);
        assert_eq!(cfg.strategy, Strategy::Grouped);
    }

    #[test]
    fn test_load_per_pair_config() {
        let cfg = EvaluatorConfig::from_file(&config_path("configs/per_pair_loose.json")).unwrap();
        assert_eq!(cfg.strategy, Strategy::PerPair);
        assert!((cfg.tolerance - 1e-12).abs() < 1e-24);
        assert_eq!(cfg.max_agm_iterations, 32);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let cfg: EvaluatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.tolerance, f64::EPSILON);
        assert_eq!(cfg.max_agm_iterations, 64);
        assert_eq!(cfg.strategy, Strategy::Grouped);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EvaluatorConfig::from_file(&config_path("configs/does_not_exist.json"))
            .unwrap_err();
        assert!(matches!(err, EllipError::Io(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(EvaluatorConfig::with_tolerance(0.0).validate().is_err());
        assert!(EvaluatorConfig::with_tolerance(-1e-10).validate().is_err());
        assert!(EvaluatorConfig::with_tolerance(f64::NAN).validate().is_err());
        let cfg = EvaluatorConfig {
            max_agm_iterations: 0,
            ..EvaluatorConfig::default()
        };
        match cfg.validate() {
            Err(EllipError::ConfigError(msg)) => assert!(msg.contains("max_agm_iterations")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = EvaluatorConfig::from_file(&config_path("configs/per_pair_loose.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: EvaluatorConfig = serde_json::from_str(&json).unwrap();
        assert!((cfg.tolerance - cfg2.tolerance).abs() < 1e-24);
        assert_eq!(cfg.max_agm_iterations, cfg2.max_agm_iterations);
        assert_eq!(cfg.strategy, cfg2.strategy);
    }
}
