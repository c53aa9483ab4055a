//! Search limits and runtime configuration defaults

// Diagonals reach 2 * 63 - 1 = 125, so packed vectors take two words
/// Largest supported board width
pub const MAX_BOARD_SIZE: usize = 63;

/// Highest occupancy index any vector needs (diagonals span `1..=2n - 1`)
pub const OCCUPANCY_CAPACITY: usize = 2 * MAX_BOARD_SIZE - 1;

/// Number of 64-bit words backing a packed occupancy vector
pub const OCCUPANCY_WORDS: usize = OCCUPANCY_CAPACITY.div_ceil(u64::BITS as usize);

// Default values for configurable parameters
/// Board width searched when none is given
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Tracing filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Progress display settings
/// Automaton transitions between progress refreshes
pub const PROGRESS_REPORT_INTERVAL: u64 = 1 << 20;
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Known solution counts indexed by board width (OEIS A000170)
pub const KNOWN_SOLUTION_COUNTS: [u64; 28] = [
    1,
    1,
    0,
    0,
    2,
    10,
    4,
    40,
    92,
    352,
    724,
    2_680,
    14_200,
    73_712,
    365_596,
    2_279_184,
    14_772_512,
    95_815_104,
    666_090_624,
    4_968_057_848,
    39_029_188_884,
    314_666_222_712,
    2_691_008_701_644,
    24_233_937_684_440,
    227_514_171_973_736,
    2_207_893_435_808_352,
    22_317_699_616_364_044,
    234_907_967_154_122_528,
];

/// Known solution count for a board width, if tabulated
pub fn known_solution_count(size: usize) -> Option<u64> {
    KNOWN_SOLUTION_COUNTS.get(size).copied()
}
