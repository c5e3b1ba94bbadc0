use std::fmt;

/// Widest city count a [`VisitedSet`] can encode.
pub const MAX_BITMASK_CITIES: usize = u32::BITS as usize;

/// Subset of cities encoded one bit per city; bit `i` set means city `i` was
/// visited.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct VisitedSet(u32);

impl VisitedSet {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Start of every tour: only the origin visited.
    pub const fn origin() -> Self {
        Self(1)
    }

    /// Every city in `0..n` visited. `n` must be at most [`MAX_BITMASK_CITIES`].
    pub const fn full(n: usize) -> Self {
        if n >= MAX_BITMASK_CITIES {
            Self(u32::MAX)
        } else {
            Self((1u32 << n as u32) - 1)
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, city: usize) -> bool {
        city < MAX_BITMASK_CITIES && self.0 & (1u32 << city as u32) != 0
    }

    pub const fn with(self, city: usize) -> Self {
        Self(self.0 | (1u32 << city as u32))
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Table slot of this set among the `2^n` subsets.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// Position in the search: the city we stand on and everything seen so far,
/// `current` included.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct State {
    pub current: usize,
    pub visited: VisitedSet,
}

impl State {
    pub const fn new(current: usize, visited: VisitedSet) -> Self {
        Self { current, visited }
    }

    pub const fn start() -> Self {
        Self::new(0, VisitedSet::origin())
    }

    /// Move to `next`, marking it visited.
    pub const fn advance(self, next: usize) -> Self {
        Self::new(next, self.visited.with(next))
    }

    /// True for states the recurrence can actually reach in an `n`-city
    /// problem: origin visited, `current` visited, and the origin only occupied
    /// before leaving it or once the tour is complete.
    pub const fn is_reachable(self, n: usize) -> bool {
        if self.current >= n || self.visited.bits() & !VisitedSet::full(n).bits() != 0 {
            return false;
        }
        if !self.visited.contains(0) || !self.visited.contains(self.current) {
            return false;
        }
        self.current != 0
            || self.visited.bits() == VisitedSet::origin().bits()
            || self.visited.bits() == VisitedSet::full(n).bits()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(current={}, visited={})", self.current, self.visited)
    }
}
