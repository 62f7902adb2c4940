use crate::{errors::OdeErrors, state::Integrable};

/// In-memory storage of solver output. Each entry stores the time and the
/// state value at that time.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryResult<State>
where
    State: Integrable,
{
    /// Recorded times.
    pub t: Vec<f64>,
    /// Recorded states.
    pub y: Vec<State>,
}

impl<State: Integrable> MemoryResult<State> {
    /// Constructs an empty result with room for `n` entries, failing instead
    /// of aborting when that much memory is not available.
    pub fn new(n: usize) -> Result<Self, OdeErrors> {
        let mut t: Vec<f64> = Vec::new();
        let mut y: Vec<State> = Vec::new();
        t.try_reserve_exact(n)
            .and_then(|()| y.try_reserve_exact(n))
            .map_err(|_| OdeErrors::StorageExhausted { samples: n })?;
        Ok(Self { t, y })
    }

    pub(crate) fn insert(&mut self, t: f64, x: &State) {
        self.t.push(t);
        self.y.push(x.clone());
    }

    /// Number of saved entries.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Iterates over `(t, state)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> {
        self.t.iter().copied().zip(self.y.iter())
    }
}
