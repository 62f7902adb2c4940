use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::errors::{LorenzErrors, ParameterIssue};

pub const RHO_MIN: f64 = 0.5;
pub const RHO_MAX: f64 = 40.0;
pub const RHO_STEP: f64 = 2.0;

pub const BETA_MIN: f64 = 0.1;
pub const BETA_MAX: f64 = 10.0;
pub const BETA_STEP: f64 = 0.2;

pub const SIGMA: f64 = 10.0;
pub const RHO: f64 = 28.0;
pub const BETA: f64 = 8.0 / 3.0;

/// Bounds of a user adjustable parameter, as exposed to range controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterRange {
    pub const RHO: Self = Self {
        min: RHO_MIN,
        max: RHO_MAX,
        step: RHO_STEP,
    };
    pub const BETA: Self = Self {
        min: BETA_MIN,
        max: BETA_MAX,
        step: BETA_STEP,
    };

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Whether rho and beta must respect their declared ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Any finite value is accepted.
    #[default]
    Unchecked,
    /// rho and beta outside `ParameterRange::RHO` / `ParameterRange::BETA` are rejected.
    Enforce,
}

/// Parameters of the Lorenz vector field. Immutable for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemParameters {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            sigma: SIGMA,
            rho: RHO,
            beta: BETA,
        }
    }
}

impl SystemParameters {
    pub fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        Self { sigma, rho, beta }
    }

    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Rejects non-finite values, and out of range rho/beta under `RangePolicy::Enforce`.
    pub fn validate(&self, policy: RangePolicy) -> Result<(), LorenzErrors> {
        for (name, value) in [("sigma", self.sigma), ("rho", self.rho), ("beta", self.beta)] {
            if !value.is_finite() {
                return Err(LorenzErrors::InvalidParameter {
                    name,
                    value,
                    reason: ParameterIssue::NotFinite,
                });
            }
        }

        if policy == RangePolicy::Enforce {
            for (name, value, range) in [
                ("rho", self.rho, ParameterRange::RHO),
                ("beta", self.beta, ParameterRange::BETA),
            ] {
                if !range.contains(value) {
                    return Err(LorenzErrors::InvalidParameter {
                        name,
                        value,
                        reason: ParameterIssue::OutOfRange {
                            min: range.min,
                            max: range.max,
                        },
                    });
                }
            }
        }
        Ok(())
    }
}

impl Display for SystemParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\u{03C3}: {:.3}, \u{03C1}: {:.3}, \u{03B2}: {:.3}",
            self.sigma, self.rho, self.beta
        )
    }
}
