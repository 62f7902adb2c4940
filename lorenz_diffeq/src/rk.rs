use std::{array, time::Instant};

use crate::{
    OdeModel,
    errors::OdeErrors,
    saving::MemoryResult,
    state::Integrable,
    stepping::{SolveBudget, TimeGrid},
    tableau::ButcherTableau,
};

// preallocated buffers for intermediate calculations
struct RKBuffers<State: Integrable, const STAGES: usize> {
    k: [State; STAGES],
    state: State,
    derivative: State,
}

impl<State: Integrable, const STAGES: usize> Default for RKBuffers<State, STAGES> {
    fn default() -> Self {
        Self {
            k: array::from_fn(|_| State::default()),
            state: State::default(),
            derivative: State::default(),
        }
    }
}

/// Explicit Runge-Kutta integrator for any tableau.
pub struct RungeKutta<State: Integrable, const STAGES: usize> {
    x: State,
    y: State,
    tableau: ButcherTableau<STAGES>,
    active_stages: usize,
    buffers: RKBuffers<State, STAGES>,
}

impl<State: Integrable, const STAGES: usize> RungeKutta<State, STAGES> {
    pub fn new(tableau: ButcherTableau<STAGES>) -> Self {
        Self {
            active_stages: tableau.active_stages(),
            x: State::default(),
            y: State::default(),
            tableau,
            buffers: RKBuffers::default(),
        }
    }

    /// Integrates over every sample of `grid`, starting from `x0` at t = 0.
    ///
    /// Fails on the first non-finite state or when the wall-clock budget
    /// runs out. Nothing is returned in either case.
    pub fn solve_fixed<Model: OdeModel<State = State>>(
        &mut self,
        model: &Model,
        x0: &State,
        grid: &TimeGrid,
        budget: &SolveBudget,
    ) -> Result<MemoryResult<State>, OdeErrors> {
        let n = grid.len();
        let dt = grid.t_increment();
        let start = Instant::now();

        let mut result = MemoryResult::new(n)?;
        self.x.clone_from(x0);
        if !self.x.is_finite() {
            return Err(OdeErrors::Diverged { index: 0, t: 0.0 });
        }
        result.insert(grid.time(0), &self.x);

        for i in 1..n {
            if let Some(limit) = budget.max_duration {
                if start.elapsed() >= limit {
                    return Err(OdeErrors::Timeout { limit, index: i });
                }
            }

            self.step(model, grid.time(i - 1), dt);

            let t = grid.time(i);
            if !self.y.is_finite() {
                return Err(OdeErrors::Diverged { index: i, t });
            }
            result.insert(t, &self.y);
            std::mem::swap(&mut self.x, &mut self.y);
        }

        Ok(result)
    }

    /// Advances `self.x` by one step of size `h`, storing the result in `self.y`.
    pub fn step<Model: OdeModel<State = State>>(&mut self, model: &Model, t: f64, h: f64) {
        let k = &mut self.buffers.k;

        // k0
        model.f(t, &self.x, &mut k[0]);

        // k1 - ks
        for s in 1..self.active_stages {
            // in place calculation of intermediate points
            self.buffers.state *= 0.0;
            // sum previous ks with appropriate scaling from tableau
            for i in 0..s {
                let a = self.tableau.a[s][i];
                if a == 0.0 {
                    continue;
                }
                self.buffers.derivative.clone_from(&k[i]);
                self.buffers.derivative *= a;
                self.buffers.state += &self.buffers.derivative;
            }
            self.buffers.state *= h;
            self.buffers.state += &self.x;

            model.f(t + self.tableau.c[s] * h, &self.buffers.state, &mut k[s]);
        }

        self.y.clone_from(&self.x);
        for s in 0..self.active_stages {
            let b = self.tableau.b[s];
            if b == 0.0 {
                continue;
            }
            self.buffers.derivative.clone_from(&k[s]);
            self.buffers.derivative *= b * h;
            self.y += &self.buffers.derivative;
        }
    }
}
