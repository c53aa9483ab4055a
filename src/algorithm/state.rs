//! Constraint store for one N-queens search: three occupancy vectors and the
//! per-level assignment table
//!
//! Index derivation is the caller's job. For level `l` and column `t` (both
//! 1-based) on an `n`-wide board the indices are `t` for the column vector,
//! `t + l - 1` for the ascending diagonal and `t - l + n` for the descending
//! diagonal. The diagonal vectors therefore span `1..=2n - 1`.

use crate::algorithm::bitset::{OccupancyBits, OccupancySet};
use std::fmt;

/// Which occupancy vector an access targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vector {
    /// Column occupancy, indexed by `t`
    Column,
    /// Constant row + column diagonals, indexed by `t + l - 1`
    Ascending,
    /// Constant row - column diagonals, indexed by `t - l + n`
    Descending,
}

impl Vector {
    /// All vectors in commit order
    pub const ALL: [Self; 3] = [Self::Column, Self::Ascending, Self::Descending];
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => write!(f, "column"),
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Occupancy vectors plus assignment table for an `n`-wide board
///
/// Created zeroed. Accessors here are uncounted; the search reaches them
/// through [`crate::algorithm::instrumentation::InstrumentedState`].
#[derive(Clone, Debug)]
pub struct BoardState<S: OccupancySet = OccupancyBits> {
    size: usize,
    columns: S,
    ascending: S,
    descending: S,
    /// Column committed at each level; slot 0 is unused
    assignment: Vec<usize>,
}

impl<S: OccupancySet> BoardState<S> {
    /// Create an empty store for an `size`-wide board
    ///
    /// `size` must already satisfy `validate_board_size`; packed vectors
    /// reject wider boards in debug builds.
    pub fn new(size: usize) -> Self {
        let diagonals = (2 * size).saturating_sub(1);
        Self {
            size,
            columns: S::with_capacity(size),
            ascending: S::with_capacity(diagonals),
            descending: S::with_capacity(diagonals),
            assignment: vec![0; size + 1],
        }
    }

    /// Board width this store was created for
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Test whether `index` is occupied in `vector`
    pub fn test_bit(&self, vector: Vector, index: usize) -> bool {
        self.vector(vector).contains(index)
    }

    /// Mark `index` occupied in `vector`
    pub fn set_bit(&mut self, vector: Vector, index: usize) {
        self.vector_mut(vector).write(index, true);
    }

    /// Mark `index` free in `vector`
    pub fn clear_bit(&mut self, vector: Vector, index: usize) {
        self.vector_mut(vector).write(index, false);
    }

    /// Record `column` as the choice made at `level`
    pub fn assign(&mut self, level: usize, column: usize) {
        if let Some(slot) = self.assignment.get_mut(level) {
            *slot = column;
        }
    }

    /// Column recorded at `level`, or 0 if none was ever written
    pub fn assigned(&self, level: usize) -> usize {
        self.assignment.get(level).copied().unwrap_or(0)
    }

    /// Number of occupied indices in `vector`
    pub fn occupied(&self, vector: Vector) -> usize {
        self.vector(vector).count()
    }

    /// Test if all three vectors are empty
    pub fn is_clear(&self) -> bool {
        Vector::ALL
            .iter()
            .all(|&vector| self.vector(vector).is_empty())
    }

    const fn vector(&self, vector: Vector) -> &S {
        match vector {
            Vector::Column => &self.columns,
            Vector::Ascending => &self.ascending,
            Vector::Descending => &self.descending,
        }
    }

    const fn vector_mut(&mut self, vector: Vector) -> &mut S {
        match vector {
            Vector::Column => &mut self.columns,
            Vector::Ascending => &mut self.ascending,
            Vector::Descending => &mut self.descending,
        }
    }
}
