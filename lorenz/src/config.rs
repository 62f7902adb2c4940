use std::{fs, path::Path, time::Duration};

use lorenz_diffeq::{Solver, stepping::SolveBudget};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{LorenzErrors, ParameterIssue},
    parameters::{RangePolicy, SystemParameters},
    simulation::{GridSpec, Simulation},
    state::State,
};

/// Limits applied to every run, as written in a scenario file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub max_samples: Option<usize>,
    pub max_seconds: Option<f64>,
}

impl BudgetConfig {
    pub fn to_budget(&self) -> Result<SolveBudget, LorenzErrors> {
        let mut budget = SolveBudget::default();
        if let Some(max_samples) = self.max_samples {
            budget = budget.with_max_samples(max_samples);
        }
        if let Some(max_seconds) = self.max_seconds {
            let duration = Duration::try_from_secs_f64(max_seconds).map_err(|_| {
                LorenzErrors::InvalidParameter {
                    name: "budget.max_seconds",
                    value: max_seconds,
                    reason: ParameterIssue::NotADuration,
                }
            })?;
            budget = budget.with_max_duration(duration);
        }
        Ok(budget)
    }
}

/// A comparison scenario: shared settings plus the two initial points.
///
/// Every field may be left out of the file, in which case the dashboard
/// defaults apply (system B enabled and pinned at (1, 1, 1)).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub parameters: SystemParameters,
    pub system_a: State,
    pub system_b: Option<State>,
    pub grid: GridSpec,
    pub solver: Solver,
    pub range_policy: RangePolicy,
    pub budget: BudgetConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            parameters: SystemParameters::default(),
            system_a: State::INITIAL,
            system_b: Some(State::INITIAL),
            grid: GridSpec::default(),
            solver: Solver::default(),
            range_policy: RangePolicy::default(),
            budget: BudgetConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, LorenzErrors> {
        Ok(ron::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LorenzErrors> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn simulation(&self) -> Result<Simulation, LorenzErrors> {
        Ok(Simulation::new(self.parameters)
            .with_grid(self.grid)
            .with_solver(self.solver)
            .with_range_policy(self.range_policy)
            .with_budget(self.budget.to_budget()?))
    }
}
