use crate::io::configuration::{OCCUPANCY_CAPACITY, OCCUPANCY_WORDS};
use bitvec::prelude::*;
use std::fmt;

/// Set-membership contract over 1-based occupancy indices
///
/// Implementations are fixed-capacity: indices outside `1..=capacity` are
/// never members and writes to them are ignored. Callers derive indices so
/// that they are always in range.
pub trait OccupancySet: Clone + fmt::Debug + Send {
    /// Create an empty set holding indices `1..=capacity`
    ///
    /// Board sizes must pass `validate_board_size` first; the packed layout
    /// cannot hold more than [`OccupancyBits::MAX_CAPACITY`] indices.
    fn with_capacity(capacity: usize) -> Self;

    /// Test membership of an index
    fn contains(&self, index: usize) -> bool;

    /// Mark an index occupied or free
    fn write(&mut self, index: usize, occupied: bool);

    /// Number of occupied indices
    fn count(&self) -> usize;

    /// Test if no index is occupied
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Occupancy packed into machine words
///
/// Uses 1-based indexing, storing index `i` at bit `i - 1`. The backing
/// storage is sized for the largest supported board, so one type serves
/// every board size up to the configured maximum.
#[derive(Clone, Debug)]
pub struct OccupancyBits {
    bits: BitArray<[u64; OCCUPANCY_WORDS], Lsb0>,
    capacity: usize,
}

impl OccupancyBits {
    /// Largest index any instance can hold
    pub const MAX_CAPACITY: usize = OCCUPANCY_CAPACITY;

    /// Configured capacity of this set
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Extract occupied indices in ascending order
    ///
    /// Returns 1-based indices matching the board coordinate system
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().map(|index| index + 1).collect()
    }
}

impl OccupancySet for OccupancyBits {
    fn with_capacity(capacity: usize) -> Self {
        debug_assert!(
            capacity <= Self::MAX_CAPACITY,
            "capacity {capacity} exceeds packed limit {}",
            Self::MAX_CAPACITY
        );
        Self {
            bits: BitArray::new([0; OCCUPANCY_WORDS]),
            capacity: capacity.min(Self::MAX_CAPACITY),
        }
    }

    fn contains(&self, index: usize) -> bool {
        if index > 0 && index <= self.capacity {
            self.bits.get(index - 1).as_deref() == Some(&true)
        } else {
            false
        }
    }

    // Clear-then-set: the target bit takes `occupied`, all others are kept
    fn write(&mut self, index: usize, occupied: bool) {
        if index > 0 && index <= self.capacity {
            if let Some(mut bit) = self.bits.get_mut(index - 1) {
                *bit = occupied;
            }
        }
    }

    fn count(&self) -> usize {
        self.bits.count_ones()
    }

    fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}

impl fmt::Display for OccupancyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OccupancyBits({} occupied: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}

/// Occupancy stored as one byte per index
///
/// The plain-array rendition of the same constraint store. Slot 0 is
/// unused so indices address the array directly.
#[derive(Clone, Debug)]
pub struct OccupancyBytes {
    cells: Vec<u8>,
}

impl OccupancySet for OccupancyBytes {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity + 1],
        }
    }

    fn contains(&self, index: usize) -> bool {
        index > 0 && self.cells.get(index).is_some_and(|&cell| cell != 0)
    }

    fn write(&mut self, index: usize, occupied: bool) {
        if index > 0 {
            if let Some(cell) = self.cells.get_mut(index) {
                *cell = u8::from(occupied);
            }
        }
    }

    fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }
}

/// Storage layout for the occupancy vectors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Representation {
    /// Packed words, one bit per index
    #[default]
    Bits,
    /// One byte per index
    Bytes,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits => write!(f, "bits"),
            Self::Bytes => write!(f, "bytes"),
        }
    }
}
