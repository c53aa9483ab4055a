//! Tests for the backtracking automaton and the solve entry points

#[cfg(test)]
mod tests {
    use bitqueens::algorithm::bitset::{OccupancyBytes, Representation};
    use bitqueens::algorithm::instrumentation::AccessPolicy;
    use bitqueens::algorithm::search::{
        BacktrackSearch, Phase, SearchConfig, solve, solve_with, validate_board_size,
    };
    use bitqueens::algorithm::state::Vector;
    use bitqueens::io::configuration::MAX_BOARD_SIZE;
    use bitqueens::QueensError;
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};
    use tracing::Level;

    // Collects formatted log output for inspection
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(action: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, action);
        buffer.contents()
    }

    fn search(size: usize) -> BacktrackSearch {
        BacktrackSearch::new(size, AccessPolicy::Full).expect("valid board size")
    }

    // Verifies the single-queen board walks every state exactly as tabled
    // Verified by skipping the undo on backtrack
    #[test]
    fn test_single_queen_trace() {
        let mut search = search(1);
        assert_eq!(search.phase(), Phase::Init);

        let trace: Vec<Phase> = (0..7).map(|_| search.step()).collect();

        assert_eq!(
            trace,
            vec![
                Phase::EnterLevel,
                Phase::TryColumn,
                Phase::EnterLevel,
                Phase::Backtrack,
                Phase::AdvanceColumn,
                Phase::Backtrack,
                Phase::Done,
            ]
        );

        let report = search.report().expect("search finished");
        assert_eq!(report.solution_count(), 1);
        // 3 tests, 3 sets, 1 write, 1 read, 3 clears
        assert_eq!(report.access_count(), 11);
    }

    // Tests stepping a finished search changes nothing
    // Verified by letting Done fall through to Init
    #[test]
    fn test_done_is_terminal() {
        let mut search = search(4);
        let report = search.run();
        let transitions = search.progress().transitions;

        assert_eq!(search.step(), Phase::Done);
        assert_eq!(search.progress().transitions, transitions);
        assert_eq!(search.report(), Some(report));
    }

    // Tests counts are withheld until the automaton reaches Done
    // Verified by returning a report from any phase
    #[test]
    fn test_report_only_after_done() {
        let mut search = search(5);
        assert!(search.report().is_none());
        for _ in 0..10 {
            search.step();
        }
        assert!(search.report().is_none());
        assert_eq!(search.run().solution_count(), 10);
        assert!(search.report().is_some());
    }

    // Tests each vector holds exactly one bit per committed row at every level entry
    // Verified by skipping the ascending-diagonal set on commit
    #[test]
    fn test_occupancy_matches_depth() {
        let mut search = search(6);
        while search.step() != Phase::Done {
            if search.phase() != Phase::EnterLevel {
                continue;
            }
            let level = search.level();
            let state = search.state();
            for vector in Vector::ALL {
                assert_eq!(state.occupied(vector), level - 1, "{vector} at level {level}");
            }
            for row in 1..level {
                let column = state.assigned(row);
                assert!(state.test_bit(Vector::Column, column));
                assert!(state.test_bit(Vector::Ascending, column + row - 1));
                assert!(state.test_bit(Vector::Descending, column + 6 - row));
            }
        }
    }

    // Tests every placement is undone once the search finishes
    // Verified by leaving the column bit set on backtrack
    #[test]
    fn test_state_cleared_after_done() {
        let mut search = search(7);
        let report = search.run();
        assert_eq!(report.solution_count(), 40);
        assert_eq!(search.level(), 0);
        assert!(search.state().is_clear());
    }

    // Tests the access counter never decreases and ends positive
    // Verified by resetting the counter on backtrack
    #[test]
    fn test_access_count_monotone() {
        let mut search = search(5);
        let mut previous = 0;
        while search.step() != Phase::Done {
            let accesses = search.progress().accesses;
            assert!(accesses >= previous);
            previous = accesses;
        }
        assert!(previous > 0);
    }

    // Tests columns are tried in increasing order by checking the first solution
    // Verified by scanning columns from N down to 1
    #[test]
    fn test_first_solution_is_lexicographic() {
        for (size, expected) in [(4, vec![2, 4, 1, 3]), (8, vec![1, 5, 8, 6, 3, 7, 2, 4])] {
            let mut search = search(size);
            while search.progress().solutions == 0 {
                search.step();
            }
            assert_eq!(search.phase(), Phase::Backtrack);
            let placement: Vec<usize> = (1..=size).map(|row| search.state().assigned(row)).collect();
            assert_eq!(placement, expected);
        }
    }

    // Tests both representations produce identical traces of counts
    // Verified by counting an extra read in the byte layout
    #[test]
    fn test_representations_agree() {
        for size in 1..=8 {
            let mut bits = search(size);
            let mut bytes: BacktrackSearch<OccupancyBytes> =
                BacktrackSearch::new(size, AccessPolicy::Full).expect("valid board size");
            assert_eq!(bits.run(), bytes.run());
            assert_eq!(bits.progress(), bytes.progress());
        }
    }

    // Tests reference access counts for the eight-queens board per policy
    // Verified by counting assignment reads under the bit-vector policy
    #[test]
    fn test_reference_access_counts() {
        let expectations = [
            (AccessPolicy::Full, 41_096),
            (AccessPolicy::BitVectors, 36_984),
            (AccessPolicy::Assignment, 4_112),
        ];
        for (policy, accesses) in expectations {
            for representation in [Representation::Bits, Representation::Bytes] {
                let report = solve_with(
                    8,
                    SearchConfig {
                        policy,
                        representation,
                    },
                )
                .expect("valid board size");
                assert_eq!(report.solution_count(), 92);
                assert_eq!(report.access_count(), accesses, "{policy} {representation}");
                assert_eq!(report.policy(), policy);
            }
        }
    }

    // Tests the board size precondition at both ends
    // Verified by allowing size 64
    #[test]
    fn test_board_size_bounds() {
        assert!(validate_board_size(1).is_ok());
        assert!(validate_board_size(MAX_BOARD_SIZE).is_ok());

        for size in [0, MAX_BOARD_SIZE + 1] {
            assert_eq!(
                solve(size),
                Err(QueensError::InvalidBoardSize {
                    size,
                    max: MAX_BOARD_SIZE
                })
            );
            assert!(BacktrackSearch::<OccupancyBytes>::new(size, AccessPolicy::Full).is_err());
        }
    }

    // Tests the widest board places its first rows using the high diagonal bits
    // Verified by sizing the diagonal store to the board width
    #[test]
    fn test_widest_board_first_descent() {
        // Twenty queens attack at most 60 of 63 cells in a row, so no backtracking yet
        let mut search = search(MAX_BOARD_SIZE);
        while search.level() <= 20 {
            search.step();
        }
        assert_eq!(search.level(), 21);
        for vector in Vector::ALL {
            assert_eq!(search.state().occupied(vector), 20);
        }
        let column = search.state().assigned(20);
        assert!(
            search
                .state()
                .test_bit(Vector::Descending, column + MAX_BOARD_SIZE - 20)
        );
    }

    // Tests the observer sees every transition and the result matches run
    // Verified by calling the observer only on the final transition
    #[test]
    fn test_run_with_observes_each_transition() {
        let mut observed = Vec::new();
        let report = search(5).run_with(|progress| observed.push(*progress));

        assert_eq!(report, search(5).run());
        let last = observed.last().expect("at least one transition");
        assert_eq!(last.transitions, observed.len() as u64);
        assert_eq!(last.solutions, report.solution_count());
        assert_eq!(last.accesses, report.access_count());
        assert!(
            observed
                .windows(2)
                .all(|pair| pair[1].transitions == pair[0].transitions + 1)
        );
    }

    // Tests a rejected size never announces a search
    // Verified by logging the start before validating the size
    #[test]
    fn test_invalid_size_logs_no_search() {
        let rejected = captured_logs(|| {
            assert!(solve(0).is_err());
            assert!(solve(MAX_BOARD_SIZE + 1).is_err());
        });
        assert!(!rejected.contains("starting search"), "{rejected}");

        let accepted = captured_logs(|| {
            assert!(solve(4).is_ok());
        });
        assert!(accepted.contains("starting search"), "{accepted}");
        assert!(accepted.contains("search complete"), "{accepted}");
    }
}
