use std::time::Duration;

use lorenz_diffeq::errors::OdeErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LorenzErrors {
    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: ParameterIssue,
    },
    #[error("invalid time grid: t_increment={t_increment}, t_max={t_max} (both must be finite and > 0)")]
    InvalidGrid { t_increment: f64, t_max: f64 },
    #[error("integration diverged at sample {index} (t={t})")]
    IntegrationDiverged { index: usize, t: f64 },
    #[error("integration exceeded its {limit:?} budget at sample {index}")]
    IntegrationTimeout { limit: Duration, index: usize },
    #[error("grid needs {required} samples but the budget allows {limit}")]
    SampleBudgetExceeded { required: usize, limit: usize },
    #[error("cannot allocate storage for {samples} samples")]
    StorageExhausted { samples: usize },
    #[error("{0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterIssue {
    NotFinite,
    NotADuration,
    OutOfRange { min: f64, max: f64 },
}

impl std::fmt::Display for ParameterIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterIssue::NotFinite => write!(f, "value must be finite"),
            ParameterIssue::NotADuration => write!(f, "value must be a non-negative number of seconds"),
            ParameterIssue::OutOfRange { min, max } => {
                write!(f, "value must lie within [{min}, {max}]")
            }
        }
    }
}

impl From<OdeErrors> for LorenzErrors {
    fn from(value: OdeErrors) -> Self {
        match value {
            OdeErrors::InvalidGrid { t_increment, t_max } => {
                LorenzErrors::InvalidGrid { t_increment, t_max }
            }
            OdeErrors::Diverged { index, t } => LorenzErrors::IntegrationDiverged { index, t },
            OdeErrors::Timeout { limit, index } => LorenzErrors::IntegrationTimeout { limit, index },
            OdeErrors::SampleBudgetExceeded { required, limit } => {
                LorenzErrors::SampleBudgetExceeded { required, limit }
            }
            OdeErrors::StorageExhausted { samples } => LorenzErrors::StorageExhausted { samples },
        }
    }
}
