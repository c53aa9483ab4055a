//! Backtracking automaton that counts N-queens solutions
//!
//! The search is an explicit state machine stepped by a loop. Each call to
//! [`BacktrackSearch::step`] performs exactly one transition, so callers can
//! interleave progress reporting or stop between transitions without
//! altering the automaton.

use crate::algorithm::bitset::{OccupancyBits, OccupancyBytes, OccupancySet, Representation};
use crate::algorithm::instrumentation::{AccessPolicy, InstrumentedState};
use crate::algorithm::state::{BoardState, Vector};
use crate::io::configuration::MAX_BOARD_SIZE;
use crate::io::error::{Result, invalid_board_size};
use tracing::{debug, trace};

/// Automaton states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not started
    Init,
    /// Entering the current level
    EnterLevel,
    /// Testing the current column at the current level
    TryColumn,
    /// Moving to the next column
    AdvanceColumn,
    /// Retreating one level and undoing its placement
    Backtrack,
    /// Search space exhausted
    Done,
}

/// Options for a single search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Which accesses are counted
    pub policy: AccessPolicy,
    /// Occupancy storage layout
    pub representation: Representation,
}

/// Final counts of a completed search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchReport {
    size: usize,
    policy: AccessPolicy,
    solution_count: u64,
    access_count: u64,
}

impl SearchReport {
    /// Board width searched
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Access policy the count was taken under
    pub const fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Number of complete non-attacking placements
    pub const fn solution_count(&self) -> u64 {
        self.solution_count
    }

    /// Number of counted elementary accesses
    pub const fn access_count(&self) -> u64 {
        self.access_count
    }
}

/// Snapshot of a search between transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchProgress {
    /// Current level
    pub level: usize,
    /// Transitions taken so far
    pub transitions: u64,
    /// Solutions counted so far
    pub solutions: u64,
    /// Accesses counted so far
    pub accesses: u64,
}

/// One exhaustive N-queens search
///
/// Owns its constraint store and counters, so independent searches share
/// nothing and may run on separate threads.
#[derive(Clone, Debug)]
pub struct BacktrackSearch<S: OccupancySet = OccupancyBits> {
    store: InstrumentedState<S>,
    size: usize,
    phase: Phase,
    level: usize,
    column: usize,
    transitions: u64,
}

impl<S: OccupancySet> BacktrackSearch<S> {
    /// Prepare a search of an `size`-wide board
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardSize` if `size` is 0 or exceeds `MAX_BOARD_SIZE`
    pub fn new(size: usize, policy: AccessPolicy) -> Result<Self> {
        validate_board_size(size)?;
        Ok(Self {
            store: InstrumentedState::new(size, policy),
            size,
            phase: Phase::Init,
            level: 0,
            column: 0,
            transitions: 0,
        })
    }

    /// Perform one transition and return the state entered
    ///
    /// Stepping a finished search is a no-op returning [`Phase::Done`].
    pub fn step(&mut self) -> Phase {
        let next = match self.phase {
            Phase::Init => {
                self.level = 1;
                Phase::EnterLevel
            }
            Phase::EnterLevel => {
                if self.level > self.size {
                    self.store.record_solution();
                    trace!(
                        solutions = self.store.counters().solutions(),
                        "solution found"
                    );
                    Phase::Backtrack
                } else {
                    self.column = 1;
                    Phase::TryColumn
                }
            }
            Phase::TryColumn => {
                if self.conflicts() {
                    Phase::AdvanceColumn
                } else {
                    self.commit();
                    Phase::EnterLevel
                }
            }
            Phase::AdvanceColumn => {
                if self.column < self.size {
                    self.column += 1;
                    Phase::TryColumn
                } else {
                    Phase::Backtrack
                }
            }
            Phase::Backtrack => {
                self.level -= 1;
                if self.level > 0 {
                    self.undo();
                    Phase::AdvanceColumn
                } else {
                    Phase::Done
                }
            }
            Phase::Done => return Phase::Done,
        };

        self.transitions += 1;
        self.phase = next;
        next
    }

    /// Step until the search space is exhausted
    pub fn run(&mut self) -> SearchReport {
        self.run_with(|_| {})
    }

    /// Step until the search space is exhausted, passing a snapshot to
    /// `observe` after every transition
    pub fn run_with(&mut self, mut observe: impl FnMut(&SearchProgress)) -> SearchReport {
        while self.step() != Phase::Done {
            observe(&self.progress());
        }
        self.build_report()
    }

    /// Final counts, available once the search is done
    pub fn report(&self) -> Option<SearchReport> {
        (self.phase == Phase::Done).then(|| self.build_report())
    }

    /// Counters and position between transitions
    pub const fn progress(&self) -> SearchProgress {
        SearchProgress {
            level: self.level,
            transitions: self.transitions,
            solutions: self.store.counters().solutions(),
            accesses: self.store.counters().accesses(),
        }
    }

    /// Current automaton state
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current level (0 before start and after completion)
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Board width
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Uncounted view of the constraint store
    pub const fn state(&self) -> &BoardState<S> {
        self.store.state()
    }

    // Tests stop at the first occupied vector
    fn conflicts(&mut self) -> bool {
        let (ascending, descending) = self.diagonals();
        self.store.test_bit(Vector::Column, self.column)
            || self.store.test_bit(Vector::Ascending, ascending)
            || self.store.test_bit(Vector::Descending, descending)
    }

    fn commit(&mut self) {
        let (ascending, descending) = self.diagonals();
        self.store.set_bit(Vector::Column, self.column);
        self.store.set_bit(Vector::Ascending, ascending);
        self.store.set_bit(Vector::Descending, descending);
        self.store.assign(self.level, self.column);
        self.level += 1;
    }

    // Reverse of commit for the level just re-entered
    fn undo(&mut self) {
        self.column = self.store.assigned(self.level);
        let (ascending, descending) = self.diagonals();
        self.store.clear_bit(Vector::Descending, descending);
        self.store.clear_bit(Vector::Ascending, ascending);
        self.store.clear_bit(Vector::Column, self.column);
    }

    // 1 <= level, column <= size keeps both indices in 1..=2 * size - 1
    const fn diagonals(&self) -> (usize, usize) {
        (
            self.column + self.level - 1,
            self.column + self.size - self.level,
        )
    }

    const fn build_report(&self) -> SearchReport {
        SearchReport {
            size: self.size,
            policy: self.store.counters().policy(),
            solution_count: self.store.counters().solutions(),
            access_count: self.store.counters().accesses(),
        }
    }
}

/// Check a board width against the supported range
///
/// # Errors
///
/// Returns `InvalidBoardSize` if `size` is 0 or exceeds `MAX_BOARD_SIZE`
pub const fn validate_board_size(size: usize) -> Result<()> {
    if size == 0 || size > MAX_BOARD_SIZE {
        Err(invalid_board_size(size))
    } else {
        Ok(())
    }
}

/// Count all solutions for an `size`-wide board with default options
///
/// # Errors
///
/// Returns `InvalidBoardSize` if `size` is 0 or exceeds `MAX_BOARD_SIZE`
pub fn solve(size: usize) -> Result<SearchReport> {
    solve_with(size, SearchConfig::default())
}

/// Count all solutions for an `size`-wide board
///
/// # Errors
///
/// Returns `InvalidBoardSize` if `size` is 0 or exceeds `MAX_BOARD_SIZE`
pub fn solve_with(size: usize, config: SearchConfig) -> Result<SearchReport> {
    validate_board_size(size)?;
    debug!(
        size,
        policy = %config.policy,
        representation = %config.representation,
        "starting search"
    );

    let report = match config.representation {
        Representation::Bits => BacktrackSearch::<OccupancyBits>::new(size, config.policy)?.run(),
        Representation::Bytes => {
            BacktrackSearch::<OccupancyBytes>::new(size, config.policy)?.run()
        }
    };

    debug!(
        size,
        solutions = report.solution_count(),
        accesses = report.access_count(),
        "search complete"
    );
    Ok(report)
}
