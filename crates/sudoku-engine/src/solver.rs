//! Depth-first backtracking search with a wall-clock deadline.
//!
//! The search walks cells in row-major order through a linear cursor,
//! trying candidates in ascending order and undoing each placement that
//! leads nowhere. The deadline is an explicit parameter threaded through
//! the recursion, so independent solves never share timing state.

use crate::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Default wall-clock budget for one solve.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(5);

/// Final outcome of a solve.
///
/// `Unsolvable` means the search space was exhausted; `TimedOut` means the
/// engine gave up at the deadline and says nothing about solvability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    Solved,
    Unsolvable,
    TimedOut,
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Solved => write!(f, "solved"),
            SolveOutcome::Unsolvable => write!(f, "unsolvable"),
            SolveOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// What a solve reported back: the outcome and the time it took.
///
/// On timeout the elapsed time is the full configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub elapsed: Duration,
}

impl SolveReport {
    /// Collapsed boolean view: `Unsolvable` and `TimedOut` both read as
    /// not solved.
    pub fn solved(&self) -> bool {
        self.outcome == SolveOutcome::Solved
    }
}

/// Result of one recursion level, checked explicitly by the caller.
/// `Aborted` unwinds the whole search without further mutation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStatus {
    Solved,
    Exhausted,
    Aborted,
}

/// Backtracking solver with a configurable time budget.
pub struct Solver {
    budget: Duration,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a solver with the default five-second budget.
    pub fn new() -> Self {
        Self { budget: DEFAULT_BUDGET }
    }

    /// Create a solver with a custom budget.
    pub fn with_budget(budget: Duration) -> Self {
        Self { budget }
    }

    /// Solve the puzzle in place.
    ///
    /// On success the grid holds the full solution. On failure or timeout
    /// it is left in whatever partially-filled state the search reached;
    /// every value placed was constraint-consistent at the time it was
    /// written. Candidate and cursor order are fixed, so a puzzle with
    /// several solutions always yields the same one.
    pub fn solve(&self, grid: &mut Grid) -> SolveReport {
        let start = Instant::now();
        let deadline = start + self.budget;
        match search(grid, 0, deadline) {
            SearchStatus::Solved => SolveReport {
                outcome: SolveOutcome::Solved,
                elapsed: start.elapsed(),
            },
            SearchStatus::Exhausted => SolveReport {
                outcome: SolveOutcome::Unsolvable,
                elapsed: start.elapsed(),
            },
            SearchStatus::Aborted => SolveReport {
                outcome: SolveOutcome::TimedOut,
                elapsed: self.budget,
            },
        }
    }

    /// Solve a copy of the puzzle, leaving the original untouched.
    pub fn solution(&self, grid: &Grid) -> Option<Grid> {
        let mut working = grid.clone();
        if self.solve(&mut working).solved() {
            Some(working)
        } else {
            None
        }
    }
}

/// One step of the search at linear cursor `pos` (row-major, 0..=N²).
///
/// The deadline is polled before any other work, so the worst-case overrun
/// is the cost of a single step past the deadline.
fn search(grid: &mut Grid, pos: usize, deadline: Instant) -> SearchStatus {
    if Instant::now() >= deadline {
        return SearchStatus::Aborted;
    }

    let n = grid.dimension();
    if pos == n * n {
        return SearchStatus::Solved;
    }

    let cell = Position::new(pos / n, pos % n);
    if grid.get(cell).is_some() {
        // Pre-filled by the puzzle, nothing to try here
        return search(grid, pos + 1, deadline);
    }

    for value in grid.values() {
        if grid.can_place(cell, value) {
            grid.set(cell, value);
            match search(grid, pos + 1, deadline) {
                SearchStatus::Solved => return SearchStatus::Solved,
                SearchStatus::Aborted => return SearchStatus::Aborted,
                SearchStatus::Exhausted => grid.clear(cell),
            }
        }
    }

    // Unconditional undo before reporting failure to the parent
    grid.clear(cell);
    SearchStatus::Exhausted
}
