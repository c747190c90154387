//! Basic example of using the sudoku engine

use sudoku_engine::{Grid, Solver, DEFAULT_PUZZLE};

fn main() {
    let mut grid = Grid::from_string(DEFAULT_PUZZLE).expect("built-in puzzle is well formed");

    println!("Puzzle:");
    println!("{}", grid);
    println!();
    println!("Given cells: {}", grid.given_count());
    println!("Empty cells: {}", grid.empty_count());

    let solver = Solver::new();
    let report = solver.solve(&mut grid);
    println!("\nOutcome: {} in {:?}\n", report.outcome, report.elapsed);

    if report.solved() {
        println!("{}", grid);
        println!("\nCompact: {}", grid.to_string_compact());
    }
}
