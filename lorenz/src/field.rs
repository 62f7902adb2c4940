use lorenz_diffeq::OdeModel;

use crate::{parameters::SystemParameters, state::State};

/// Evaluates the Lorenz vector field at `state`.
pub fn field(state: &State, params: &SystemParameters) -> State {
    State {
        x: params.sigma * (state.y - state.x),
        y: state.x * (params.rho - state.z) - state.y,
        z: state.x * state.y - params.beta * state.z,
    }
}

/// The Lorenz system as an ODE model.
///
/// The system is autonomous, so the time argument of `f` is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LorenzField {
    pub params: SystemParameters,
}

impl LorenzField {
    pub fn new(params: SystemParameters) -> Self {
        Self { params }
    }
}

impl OdeModel for LorenzField {
    type State = State;

    fn f(&self, _t: f64, x: &State, dx: &mut State) {
        *dx = field(x, &self.params);
    }
}
