use std::ops::{AddAssign, MulAssign};

use lorenz_diffeq::state::Integrable;
use serde::{Deserialize, Serialize};

use crate::errors::{LorenzErrors, ParameterIssue};

/// A point (x, y, z) in the phase space of the Lorenz system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl State {
    /// Default initial point of system A and system B.
    pub const INITIAL: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f64 {
        State::new(self.x - other.x, self.y - other.y, self.z - other.z).norm()
    }

    /// Rejects initial points with NaN or infinite components.
    pub fn validate(&self) -> Result<(), LorenzErrors> {
        for (name, value) in [("initial.x", self.x), ("initial.y", self.y), ("initial.z", self.z)] {
            if !value.is_finite() {
                return Err(LorenzErrors::InvalidParameter {
                    name,
                    value,
                    reason: ParameterIssue::NotFinite,
                });
            }
        }
        Ok(())
    }
}

impl From<[f64; 3]> for State {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl AddAssign<&Self> for State {
    fn add_assign(&mut self, rhs: &Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl MulAssign<f64> for State {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Integrable for State {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
