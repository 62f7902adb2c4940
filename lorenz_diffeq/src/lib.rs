use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Submodules for core ODE system components.
pub mod errors;
pub mod rk;
pub mod saving;
pub mod state;
pub mod stepping;
pub mod tableau;

use errors::OdeErrors;
use rk::RungeKutta;
use saving::MemoryResult;
use state::Integrable;
use stepping::{SolveBudget, TimeGrid};
use tableau::ButcherTableau;

/// Trait for defining a dynamical system model that can be numerically integrated.
///
/// Types implementing this trait must define how to compute the derivative (or RHS function)
/// of the ODE at a given time and state. Models are evaluated through a shared reference,
/// so a single model can serve any number of solves.
pub trait OdeModel: Debug {
    type State: Integrable;
    /// Compute the derivative at time `t` and state `state`, storing the result in `derivative`.
    fn f(&self, t: f64, state: &Self::State, derivative: &mut Self::State);
}

/// Fixed-step methods supported by the framework.
///
/// Only methods of at least fourth order are offered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Solver {
    /// Classical Runge-Kutta 4th-order method.
    #[default]
    Rk4,
    /// 5th-order Dormand-Prince weights, stepped without error control.
    DormandPrince5,
}

impl Solver {
    pub fn order(&self) -> usize {
        match self {
            Solver::Rk4 => ButcherTableau::<4>::RK4.order,
            Solver::DormandPrince5 => ButcherTableau::<7>::DORMANDPRINCE5.order,
        }
    }

    fn solve_fixed<Model, State>(
        &self,
        model: &Model,
        x0: &State,
        grid: &TimeGrid,
        budget: &SolveBudget,
    ) -> Result<MemoryResult<State>, OdeErrors>
    where
        Model: OdeModel<State = State>,
        State: Integrable,
    {
        match self {
            Solver::Rk4 => {
                RungeKutta::new(ButcherTableau::<4>::RK4).solve_fixed(model, x0, grid, budget)
            }
            Solver::DormandPrince5 => RungeKutta::new(ButcherTableau::<7>::DORMANDPRINCE5)
                .solve_fixed(model, x0, grid, budget),
        }
    }
}

/// Container for an ODE simulation problem: the model plus the limits the
/// solve has to respect.
#[derive(Debug)]
pub struct OdeProblem<Model>
where
    Model: OdeModel,
{
    model: Model,
    budget: SolveBudget,
}

impl<Model> OdeProblem<Model>
where
    Model: OdeModel,
{
    pub fn new(model: Model) -> Self {
        Self {
            model,
            budget: SolveBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: SolveBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Solves the problem on a fixed time grid starting from `x0` at t = 0.
    ///
    /// The result holds exactly `grid.len()` entries, the first one being `x0`.
    /// Any failure discards everything computed so far.
    pub fn solve_fixed(
        &self,
        x0: &Model::State,
        grid: &TimeGrid,
        solver: Solver,
    ) -> Result<MemoryResult<Model::State>, OdeErrors> {
        let result = self.budget.check_samples(grid.len()).and_then(|()| {
            debug!(
                samples = grid.len(),
                dt = grid.t_increment(),
                ?solver,
                "starting fixed-step solve"
            );
            solver.solve_fixed(&self.model, x0, grid, &self.budget)
        });
        match &result {
            Ok(result) => debug!(samples = result.len(), "fixed-step solve finished"),
            Err(e) => warn!(error = %e, "fixed-step solve failed"),
        }
        result
    }
}
