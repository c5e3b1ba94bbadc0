use crate::{
    Error, Result,
    held_karp::state::{MAX_BITMASK_CITIES, State},
};

/// Minimum cost to finish the tour from each state, laid out as one row of
/// `n` cities per visited subset.
///
/// Owned by a single solve. Entries are written once and never invalidated.
#[derive(Clone, Debug)]
pub struct MemoTable {
    n: usize,
    values: Vec<f64>,
    computed: usize,
}

impl MemoTable {
    /// Number of slots (`n · 2^n`) an `n`-city table needs, or `None` when that
    /// does not fit in `usize`.
    pub fn slots_for(n: usize) -> Option<usize> {
        let subsets = 1usize.checked_shl(u32::try_from(n).ok()?)?;
        subsets.checked_mul(n)
    }

    pub(crate) fn allocate(n: usize) -> Result<Self> {
        if n == 0 || n > MAX_BITMASK_CITIES {
            return Err(Error::invalid_dimension(format!(
                "memo table needs 1..={MAX_BITMASK_CITIES} cities, got {n}"
            )));
        }
        let slots = Self::slots_for(n).ok_or_else(|| {
            Error::resource_exhausted(format!("state space n*2^n overflows for n={n}"))
        })?;

        let mut values = Vec::new();
        values.try_reserve_exact(slots).map_err(|e| {
            Error::resource_exhausted(format!(
                "cannot allocate memo table of {slots} states for n={n}: {e}"
            ))
        })?;
        values.resize(slots, f64::NAN);

        Ok(Self {
            n,
            values,
            computed: 0,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of states computed so far.
    pub fn len(&self) -> usize {
        self.computed
    }

    pub fn is_empty(&self) -> bool {
        self.computed == 0
    }

    /// Remaining cost from `state`, or `None` for a state the recurrence never
    /// reaches in this table's dimension.
    pub fn get(&self, state: State) -> Option<f64> {
        state
            .is_reachable(self.n)
            .then(|| self.values[self.slot(state)])
    }

    /// Optimal tour cost: the value of the start state.
    pub fn min_cost(&self) -> Option<f64> {
        self.get(State::start())
    }

    #[inline]
    pub(crate) fn value(&self, state: State) -> f64 {
        self.values[self.slot(state)]
    }

    #[inline]
    pub(crate) fn insert(&mut self, state: State, value: f64) {
        let slot = self.slot(state);
        self.values[slot] = value;
        self.computed += 1;
    }

    #[inline]
    fn slot(&self, state: State) -> usize {
        state.visited.index() * self.n + state.current
    }
}

#[cfg(test)]
mod tests {
    use super::MemoTable;
    use crate::{
        Error,
        held_karp::state::{State, VisitedSet},
    };

    #[test]
    fn slots_for_is_n_times_two_to_the_n() {
        assert_eq!(MemoTable::slots_for(1), Some(2));
        assert_eq!(MemoTable::slots_for(4), Some(64));
        assert_eq!(MemoTable::slots_for(20), Some(20 << 20));
        assert_eq!(MemoTable::slots_for(usize::BITS as usize), None);
    }

    #[test]
    fn allocate_rejects_zero_and_too_wide_dimensions() {
        let err = MemoTable::allocate(0).expect_err("zero cities");
        assert!(matches!(err, Error::InvalidDimension(_)));

        let err = MemoTable::allocate(33).expect_err("wider than mask");
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn get_returns_inserted_values_for_reachable_states_only() {
        let mut memo = MemoTable::allocate(3).expect("small table");
        assert!(memo.is_empty());

        let state = State::new(2, VisitedSet::from_bits(0b101));
        memo.insert(state, 12.5);

        assert_eq!(memo.get(state), Some(12.5));
        assert_eq!(memo.len(), 1);
        assert_eq!(memo.get(State::new(2, VisitedSet::from_bits(0b100))), None);
        assert_eq!(memo.get(State::new(5, VisitedSet::full(3))), None);
    }
}
