use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OdeErrors {
    #[error("invalid time grid: t_increment={t_increment}, t_max={t_max} (both must be finite and > 0)")]
    InvalidGrid { t_increment: f64, t_max: f64 },
    #[error("state became non-finite at sample {index} (t={t})")]
    Diverged { index: usize, t: f64 },
    #[error("grid needs {required} samples but the budget allows {limit}")]
    SampleBudgetExceeded { required: usize, limit: usize },
    #[error("cannot allocate storage for {samples} samples")]
    StorageExhausted { samples: usize },
    #[error("integration exceeded its {limit:?} wall-clock budget at sample {index}")]
    Timeout { limit: Duration, index: usize },
}
