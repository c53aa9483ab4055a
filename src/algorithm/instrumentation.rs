//! Solution and access counting wrapped around the constraint store

use crate::algorithm::bitset::{OccupancyBits, OccupancySet};
use crate::algorithm::state::{BoardState, Vector};
use std::fmt;

/// Kind of elementary access made by the search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Test, set or clear of an occupancy bit
    BitVector,
    /// Read or write of the assignment table
    Assignment,
}

/// Which elementary accesses contribute to the access count
///
/// Published reference figures differ on whether the occupancy vectors are
/// counted at all: a packed implementation keeps them in registers and
/// counts only assignment-table traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum AccessPolicy {
    /// Count bit-vector and assignment-table accesses
    #[default]
    Full,
    /// Count bit-vector accesses only
    BitVectors,
    /// Count assignment-table accesses only
    Assignment,
}

impl AccessPolicy {
    /// Whether an access of `kind` is counted under this policy
    pub const fn counts(self, kind: AccessKind) -> bool {
        match self {
            Self::Full => true,
            Self::BitVectors => matches!(kind, AccessKind::BitVector),
            Self::Assignment => matches!(kind, AccessKind::Assignment),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::BitVectors => write!(f, "bit-vectors"),
            Self::Assignment => write!(f, "assignment"),
        }
    }
}

/// Per-search counters
///
/// Both counters only ever grow.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    policy: AccessPolicy,
    solutions: u64,
    accesses: u64,
}

impl Counters {
    /// Create zeroed counters using `policy`
    pub const fn new(policy: AccessPolicy) -> Self {
        Self {
            policy,
            solutions: 0,
            accesses: 0,
        }
    }

    /// Count one access if the policy includes its kind
    pub const fn record_access(&mut self, kind: AccessKind) {
        if self.policy.counts(kind) {
            self.accesses += 1;
        }
    }

    /// Count one complete solution
    pub const fn record_solution(&mut self) {
        self.solutions += 1;
    }

    /// Solutions counted so far
    pub const fn solutions(&self) -> u64 {
        self.solutions
    }

    /// Accesses counted so far
    pub const fn accesses(&self) -> u64 {
        self.accesses
    }

    /// Policy in effect
    pub const fn policy(&self) -> AccessPolicy {
        self.policy
    }
}

/// Access layer through which the search reaches the constraint store
///
/// Every operation forwards to [`BoardState`] and reports one access to the
/// counters.
#[derive(Clone, Debug)]
pub struct InstrumentedState<S: OccupancySet = OccupancyBits> {
    state: BoardState<S>,
    counters: Counters,
}

impl<S: OccupancySet> InstrumentedState<S> {
    /// Create a zeroed store for an `size`-wide board
    pub fn new(size: usize, policy: AccessPolicy) -> Self {
        Self {
            state: BoardState::new(size),
            counters: Counters::new(policy),
        }
    }

    /// Counted occupancy test
    pub fn test_bit(&mut self, vector: Vector, index: usize) -> bool {
        self.counters.record_access(AccessKind::BitVector);
        self.state.test_bit(vector, index)
    }

    /// Counted occupancy set
    pub fn set_bit(&mut self, vector: Vector, index: usize) {
        self.counters.record_access(AccessKind::BitVector);
        self.state.set_bit(vector, index);
    }

    /// Counted occupancy clear
    pub fn clear_bit(&mut self, vector: Vector, index: usize) {
        self.counters.record_access(AccessKind::BitVector);
        self.state.clear_bit(vector, index);
    }

    /// Counted assignment-table write
    pub fn assign(&mut self, level: usize, column: usize) {
        self.counters.record_access(AccessKind::Assignment);
        self.state.assign(level, column);
    }

    /// Counted assignment-table read
    pub fn assigned(&mut self, level: usize) -> usize {
        self.counters.record_access(AccessKind::Assignment);
        self.state.assigned(level)
    }

    /// Count one complete solution
    pub const fn record_solution(&mut self) {
        self.counters.record_solution();
    }

    /// Uncounted view of the underlying store
    pub const fn state(&self) -> &BoardState<S> {
        &self.state
    }

    /// Current counter values
    pub const fn counters(&self) -> &Counters {
        &self.counters
    }
}
