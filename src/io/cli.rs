//! Command-line interface for counting solutions over one or more board sizes

use crate::algorithm::bitset::{OccupancyBits, OccupancyBytes, OccupancySet, Representation};
use crate::algorithm::instrumentation::AccessPolicy;
use crate::algorithm::search::{BacktrackSearch, SearchReport};
use crate::io::configuration::{
    DEFAULT_BOARD_SIZE, DEFAULT_LOG_LEVEL, PROGRESS_REPORT_INTERVAL, known_solution_count,
};
use crate::io::error::{QueensError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tracing::{info, warn};

/// Inclusive range of board widths given as `N` or `START-END`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeRange {
    start: usize,
    end: usize,
}

impl SizeRange {
    /// Range covering a single width
    pub const fn single(size: usize) -> Self {
        Self {
            start: size,
            end: size,
        }
    }

    /// Widths in ascending order
    pub const fn sizes(self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl FromStr for SizeRange {
    type Err = QueensError;

    fn from_str(text: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|error| invalid_parameter("size", &text, &error))
        };

        let Some((start, end)) = text.split_once('-') else {
            return parse(text).map(Self::single);
        };

        let (start, end) = (parse(start)?, parse(end)?);
        if start > end {
            return Err(invalid_parameter(
                "size",
                &text,
                &"range start exceeds range end",
            ));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for SizeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[derive(Parser)]
#[command(name = "bitqueens")]
#[command(
    author,
    version,
    about = "Count N-queens solutions with bit-vector backtracking"
)]
/// Command-line arguments for the solution counter
pub struct Cli {
    /// Board widths to search, as N or START-END
    #[arg(value_name = "SIZE", default_values_t = [SizeRange::single(DEFAULT_BOARD_SIZE)])]
    pub sizes: Vec<SizeRange>,

    /// Which elementary accesses are counted
    #[arg(short, long, value_enum, default_value_t = AccessPolicy::Full)]
    pub policy: AccessPolicy,

    /// Occupancy storage layout
    #[arg(short, long, value_enum, default_value_t = Representation::Bits)]
    pub representation: Representation,

    /// Check each solution count against the known sequence
    #[arg(long)]
    pub verify: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Tracing filter used when `RUST_LOG` is unset
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// All requested widths in command-line order
    pub fn board_sizes(&self) -> Vec<usize> {
        self.sizes.iter().copied().flat_map(SizeRange::sizes).collect()
    }
}

/// Runs one search per requested board width and reports the counts
pub struct SearchRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SearchRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Search every requested width in order, printing one line per width
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardSize` for a width outside the supported range,
    /// or `SolutionMismatch` when verification is enabled and a count
    /// disagrees with the known sequence
    pub fn run(&mut self) -> Result<Vec<SearchReport>> {
        let sizes = self.cli.board_sizes();

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sizes.len());
        }

        // Stops at the first failure; the displays are cleared either way
        let outcome = sizes
            .into_iter()
            .map(|size| {
                let report = self.search_size(size)?;
                Self::print_report(&report);
                Ok(report)
            })
            .collect::<Result<Vec<_>>>();

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        outcome
    }

    /// Progress display, absent in quiet mode
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    fn search_size(&self, size: usize) -> Result<SearchReport> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_size(size);
        }

        let report = match self.cli.representation {
            Representation::Bits => self.drive(BacktrackSearch::<OccupancyBits>::new(
                size,
                self.cli.policy,
            )?),
            Representation::Bytes => self.drive(BacktrackSearch::<OccupancyBytes>::new(
                size,
                self.cli.policy,
            )?),
        };

        info!(
            size,
            policy = %report.policy(),
            representation = %self.cli.representation,
            solutions = report.solution_count(),
            accesses = report.access_count(),
            "search complete"
        );

        if self.cli.verify {
            Self::verify(&report)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_size(&report);
        }

        Ok(report)
    }

    // Steps the automaton directly so the spinner can follow it
    fn drive<S: OccupancySet>(&self, mut search: BacktrackSearch<S>) -> SearchReport {
        let Some(ref pm) = self.progress_manager else {
            return search.run();
        };

        search.run_with(|progress| {
            if progress.transitions % PROGRESS_REPORT_INTERVAL == 0 {
                pm.update_search(progress);
            }
        })
    }

    fn verify(report: &SearchReport) -> Result<()> {
        let size = report.size();
        let Some(expected) = known_solution_count(size) else {
            warn!(size, "no known solution count to verify against");
            return Ok(());
        };

        if expected == report.solution_count() {
            Ok(())
        } else {
            Err(QueensError::SolutionMismatch {
                size,
                expected,
                found: report.solution_count(),
            })
        }
    }

    #[allow(clippy::print_stdout)]
    fn print_report(report: &SearchReport) {
        println!(
            "N={} solutions={} accesses={}",
            report.size(),
            report.solution_count(),
            report.access_count()
        );
    }
}
