//! Backtracking sudoku engine.
//!
//! Solves standard 9×9 puzzles (and any N×N grid whose dimension is a
//! perfect square of the sub-grid size) by exhaustive depth-first search
//! with constraint checks at every placement, bounded by a wall-clock
//! budget. The solve mutates the grid in place and reports a three-valued
//! outcome: solved, unsolvable, or timed out.

mod grid;
mod solver;

pub use grid::{is_well_formed, Grid, ParseError, Position, DEFAULT_PUZZLE};
pub use solver::{SolveOutcome, SolveReport, Solver, DEFAULT_BUDGET};
