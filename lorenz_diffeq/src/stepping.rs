use std::time::Duration;

use crate::errors::OdeErrors;

/// Fixed-step time grid.
///
/// Sample times are `t_i = i * t_increment` for `i` in `0..len()`, with
/// `len() == ceil(t_max / t_increment)`. The grid is half-open, so `t_max`
/// itself is never a sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGrid {
    t_increment: f64,
    t_max: f64,
    n: usize,
}

impl TimeGrid {
    pub const DEFAULT_T_INCREMENT: f64 = 0.01;
    pub const DEFAULT_T_MAX: f64 = 40.0;
    /// Largest sample count whose time column fits in a single allocation.
    pub const MAX_SAMPLES: usize = isize::MAX as usize / size_of::<f64>();

    /// Constructs a new grid, rejecting non-finite or non-positive values.
    pub fn new(t_increment: f64, t_max: f64) -> Result<Self, OdeErrors> {
        let invalid = OdeErrors::InvalidGrid { t_increment, t_max };
        if !(t_increment.is_finite() && t_increment > 0.0 && t_max.is_finite() && t_max > 0.0) {
            return Err(invalid);
        }
        let n = (t_max / t_increment).ceil();
        if !n.is_finite() || n >= Self::MAX_SAMPLES as f64 {
            return Err(invalid);
        }
        Ok(Self {
            t_increment,
            t_max,
            n: n as usize,
        })
    }

    pub fn t_increment(&self) -> f64 {
        self.t_increment
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Number of samples on the grid.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false, a valid grid holds at least the initial sample.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Time of sample `i`.
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.t_increment
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n).map(|i| self.time(i))
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            t_increment: Self::DEFAULT_T_INCREMENT,
            t_max: Self::DEFAULT_T_MAX,
            n: (Self::DEFAULT_T_MAX / Self::DEFAULT_T_INCREMENT).ceil() as usize,
        }
    }
}

/// Resource limits for a single solve.
///
/// Neither limit interrupts a step. The sample limit is checked before any
/// work is done and the wall-clock limit between steps, and both fail the
/// whole solve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveBudget {
    /// Optional maximum number of samples.
    pub max_samples: Option<usize>,
    /// Optional maximum wall-clock duration.
    pub max_duration: Option<Duration>,
}

impl SolveBudget {
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    pub(crate) fn check_samples(&self, required: usize) -> Result<(), OdeErrors> {
        match self.max_samples {
            Some(limit) if required > limit => {
                Err(OdeErrors::SampleBudgetExceeded { required, limit })
            }
            _ => Ok(()),
        }
    }
}
