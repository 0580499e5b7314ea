//! Basic walkthrough: generate, solve, hint, validate.

use sudoku_engine::{validate, Difficulty, Generator, Grid, Solver};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate a puzzle
    println!("Generating a Medium difficulty puzzle...\n");
    let mut generator = Generator::new();
    let puzzle = generator.generate(Difficulty::Medium)?;

    println!("Generated puzzle:");
    println!("{}", puzzle.grid);
    println!("Clue cells: {}", puzzle.clue_count);
    println!("Empty cells: {}\n", puzzle.grid.empty_count());

    // Solve it, with the full deduction trace
    println!("Solving...\n");
    let solver = Solver::new();
    let solution = solver.solve(&puzzle.grid)?;
    println!("Solution:");
    println!("{}", solution.grid);
    println!("First deduction: {}", solution.steps[0].message);

    // Get a hint for the original puzzle
    let hint = solver.hint(&puzzle.grid)?;
    println!("\nHint ({}): {}", hint.technique, hint.message);

    // Parse a puzzle from a string and check its uniqueness
    println!("\n--- Parsing a puzzle from string ---\n");
    let line = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let grid = Grid::from_line_str(line)?;
    println!("{}", grid);
    println!("Unique solution: {}", solver.has_unique_solution(&grid)?);
    println!("Valid so far: {}", validate(&grid, false).is_valid());

    Ok(())
}
