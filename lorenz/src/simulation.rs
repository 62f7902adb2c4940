use lorenz_diffeq::{
    OdeProblem, Solver,
    stepping::{SolveBudget, TimeGrid},
};

use crate::{
    errors::LorenzErrors,
    field::LorenzField,
    parameters::{RangePolicy, SystemParameters},
    state::State,
    trajectory::Trajectory,
};

/// Grid settings as supplied by a caller, validated when a run starts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub t_increment: f64,
    pub t_max: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            t_increment: TimeGrid::DEFAULT_T_INCREMENT,
            t_max: TimeGrid::DEFAULT_T_MAX,
        }
    }
}

impl GridSpec {
    pub fn new(t_increment: f64, t_max: f64) -> Self {
        Self { t_increment, t_max }
    }

    pub fn to_grid(&self) -> Result<TimeGrid, LorenzErrors> {
        Ok(TimeGrid::new(self.t_increment, self.t_max)?)
    }
}

/// Everything a run needs apart from its initial point.
///
/// A `Simulation` holds no mutable state, so one value can drive any number
/// of independent runs, e.g. system A and system B of a comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Simulation {
    pub params: SystemParameters,
    pub grid: GridSpec,
    pub solver: Solver,
    pub range_policy: RangePolicy,
    pub budget: SolveBudget,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SystemParameters::default())
    }
}

impl Simulation {
    pub fn new(params: SystemParameters) -> Self {
        Self {
            params,
            grid: GridSpec::default(),
            solver: Solver::default(),
            range_policy: RangePolicy::default(),
            budget: SolveBudget::default(),
        }
    }

    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_range_policy(mut self, range_policy: RangePolicy) -> Self {
        self.range_policy = range_policy;
        self
    }

    pub fn with_budget(mut self, budget: SolveBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Integrates the Lorenz system from `initial` over the configured grid.
    ///
    /// Inputs are validated before any step is taken. The trajectory holds one
    /// sample per grid time, the first being `initial` at t = 0.
    pub fn run(&self, initial: State) -> Result<Trajectory, LorenzErrors> {
        self.params.validate(self.range_policy)?;
        initial.validate()?;
        let grid = self.grid.to_grid()?;

        let problem = OdeProblem::new(LorenzField::new(self.params)).with_budget(self.budget);
        let result = problem.solve_fixed(&initial, &grid, self.solver)?;
        Ok(Trajectory::from_result(result))
    }
}

/// Integrates `field` from `initial` on `grid` with classical RK4.
///
/// The parameters of `field` are used as given; see `Simulation` for range
/// enforcement, other methods and budgets.
pub fn integrate(
    field: &LorenzField,
    initial: State,
    grid: GridSpec,
) -> Result<Trajectory, LorenzErrors> {
    Simulation::new(field.params).with_grid(grid).run(initial)
}

/// Runs the system with `params` from `initial` on the default grid.
pub fn simulate(params: SystemParameters, initial: State) -> Result<Trajectory, LorenzErrors> {
    Simulation::new(params).run(initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::time::Duration;

    #[test]
    fn test_default_scenario() {
        let traj = simulate(SystemParameters::default(), State::INITIAL).unwrap();
        assert_eq!(traj.len(), 4000);

        let first = traj.first().unwrap();
        assert_eq!((first.x, first.y, first.z, first.t), (1.0, 1.0, 1.0, 0.0));

        // chaotic but bounded
        assert!(traj.iter().all(|s| s.state().norm() < 100.0));
    }

    #[test]
    fn test_length_matches_grid() {
        let field = LorenzField::default();
        for (dt, t_max) in [(0.01, 40.0), (0.3, 1.0), (0.05, 3.0), (0.007, 2.5), (5.0, 1.0)] {
            let traj = integrate(&field, State::INITIAL, GridSpec::new(dt, t_max)).unwrap();
            assert_eq!(traj.len(), (t_max / dt).ceil() as usize);
        }
    }

    #[test]
    fn test_time_column_spacing() {
        let traj = simulate(SystemParameters::default(), State::INITIAL).unwrap();
        let t = traj.column("t").unwrap();
        assert_eq!(t[0], 0.0);
        for pair in t.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_abs_diff_eq!(pair[1] - pair[0], 0.01, epsilon = 1e-9);
        }
        assert!(*t.last().unwrap() < 40.0);
    }

    #[test]
    fn test_deterministic() {
        let sim = Simulation::new(SystemParameters::default().with_rho(21.0));
        let a = sim.run(State::new(-2.0, 3.0, 10.0)).unwrap();
        let b = sim.run(State::new(-2.0, 3.0, 10.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sensitive_dependence() {
        let params = SystemParameters::default();
        let a = simulate(params, State::new(1.0, 1.0, 1.0)).unwrap();
        let b = simulate(params, State::new(1.0, 1.0, 1.00001)).unwrap();
        let separation = a.separation(&b);

        // indistinguishable early on
        assert!(separation[..100].iter().all(|d| *d < 1e-2));
        // visibly apart around t = 20
        let late = separation[1500..2500].iter().cloned().fold(0.0, f64::max);
        assert!(late > 1.0, "max separation in [15, 25) was {late}");
        let t_sep = a.separation_time(&b, 1.0).unwrap();
        assert!(t_sep < 25.0);
    }

    #[test]
    fn test_decay_below_bifurcation() {
        // with rho < 1 the origin is the only fixed point and is globally attracting
        let params = SystemParameters::default().with_rho(0.5);
        let initial = State::new(0.1, -0.05, 0.1);
        let traj = simulate(params, initial).unwrap();
        assert!(traj.last().unwrap().state().norm() < 1e-6);

        // at rho = 1 the decay is slow but the orbit must not grow
        let params = SystemParameters::default().with_rho(1.0);
        let initial = State::new(0.01, 0.01, 0.01);
        let traj = simulate(params, initial).unwrap();
        for s in traj.iter().filter(|s| s.t > 5.0) {
            assert!(s.state().norm() < initial.norm());
        }
    }

    #[test]
    fn test_methods_agree_over_short_horizon() {
        let sim = Simulation::default().with_grid(GridSpec::new(0.001, 1.0));
        let rk4 = sim.run(State::INITIAL).unwrap();
        let dp5 = sim.with_solver(Solver::DormandPrince5).run(State::INITIAL).unwrap();
        for d in rk4.separation(&dp5) {
            assert!(d < 1e-6);
        }
    }

    #[test]
    fn test_invalid_grid() {
        for grid in [
            GridSpec::new(0.0, 40.0),
            GridSpec::new(-0.01, 40.0),
            GridSpec::new(0.01, 0.0),
            GridSpec::new(0.01, -40.0),
            // too many samples to ever store
            GridSpec::new(1e-12, 1e7),
        ] {
            let err = integrate(&LorenzField::default(), State::INITIAL, grid).unwrap_err();
            assert!(matches!(err, LorenzErrors::InvalidGrid { .. }));
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let err = simulate(SystemParameters::default().with_rho(f64::NAN), State::INITIAL)
            .unwrap_err();
        assert!(matches!(err, LorenzErrors::InvalidParameter { name: "rho", .. }));

        let err = simulate(SystemParameters::default(), State::new(1.0, f64::INFINITY, 1.0))
            .unwrap_err();
        assert!(matches!(err, LorenzErrors::InvalidParameter { name: "initial.y", .. }));

        let sim = Simulation::new(SystemParameters::default().with_beta(12.0))
            .with_range_policy(RangePolicy::Enforce);
        let err = sim.run(State::INITIAL).unwrap_err();
        assert!(matches!(err, LorenzErrors::InvalidParameter { name: "beta", .. }));
    }

    #[test]
    fn test_large_finite_values_are_not_errors() {
        // far outside the attractor, no clamping is applied
        let initial = State::new(1e3, -1e3, 1e3);
        let sim = Simulation::default().with_grid(GridSpec::new(1e-5, 1e-3));
        let traj = sim.run(initial).unwrap();
        assert_eq!(traj.len(), 100);
        assert_eq!(traj.first().unwrap().state(), initial);
        assert!(traj.iter().all(|s| s.state().norm() > 100.0));
    }

    #[test]
    fn test_divergence_fails_without_partial_output() {
        // a step far too large for the dynamics overflows
        let sim = Simulation::new(SystemParameters::new(10.0, 28.0, 8.0 / 3.0))
            .with_grid(GridSpec::new(1.0, 100.0));
        match sim.run(State::INITIAL) {
            Err(LorenzErrors::IntegrationDiverged { index, t }) => {
                assert!(index > 0);
                assert_abs_diff_eq!(t, index as f64, epsilon = 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_budgets() {
        let sim = Simulation::default().with_budget(SolveBudget::default().with_max_samples(1000));
        assert!(matches!(
            sim.run(State::INITIAL),
            Err(LorenzErrors::SampleBudgetExceeded {
                required: 4000,
                limit: 1000
            })
        ));

        let sim = Simulation::default()
            .with_budget(SolveBudget::default().with_max_duration(Duration::ZERO));
        assert!(matches!(
            sim.run(State::INITIAL),
            Err(LorenzErrors::IntegrationTimeout { .. })
        ));
    }
}
