//! Thin command-line wrapper around the sudoku engine: parse the puzzle
//! string, run one bounded solve, print the result.

use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;
use std::time::Duration;
use sudoku_engine::{Grid, SolveOutcome, Solver, DEFAULT_PUZZLE};

#[derive(Parser)]
#[command(name = "sudoku", version, about = "Solve sudoku puzzles by backtracking search")]
struct Cli {
    /// 81-character puzzle, digits 1-9 with '.' (or '0') for empty cells.
    /// Uses a built-in puzzle when omitted.
    puzzle: Option<String>,

    /// Wall-clock budget for the search, in seconds
    #[arg(long, default_value_t = 5.0)]
    budget: f64,

    /// Print the solution as a single compact line instead of a grid
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.budget.is_finite() || cli.budget < 0.0 {
        eprintln!("Invalid budget: {}", cli.budget);
        return ExitCode::from(2);
    }

    let puzzle = cli.puzzle.as_deref().unwrap_or(DEFAULT_PUZZLE);
    let mut grid = match Grid::from_string(puzzle) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid puzzle: {}", e);
            return ExitCode::from(2);
        }
    };

    if !cli.compact {
        println!("{}", grid);
        println!();
    }

    let solver = Solver::with_budget(Duration::from_secs_f64(cli.budget));
    debug!("starting search with a {:.1}s budget", cli.budget);
    let report = solver.solve(&mut grid);
    info!("search finished: {} in {:?}", report.outcome, report.elapsed);

    match report.outcome {
        SolveOutcome::Solved => {
            if cli.compact {
                println!("{}", grid.to_string_compact());
            } else {
                println!("{}", grid);
                println!("\nSolved in {:?}", report.elapsed);
            }
            ExitCode::SUCCESS
        }
        SolveOutcome::Unsolvable => {
            eprintln!("No solution exists for this puzzle");
            ExitCode::FAILURE
        }
        SolveOutcome::TimedOut => {
            eprintln!("Gave up after {:?}", report.elapsed);
            ExitCode::FAILURE
        }
    }
}
