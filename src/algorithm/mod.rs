/// Fixed-capacity occupancy sets in packed and byte-per-index layouts
pub mod bitset;
/// Counting access layer over the constraint store
pub mod instrumentation;
/// Backtracking automaton and solve entry points
pub mod search;
/// Occupancy vectors and assignment table for one search
pub mod state;
