//! Command-line glue over the Sudoku engine.
//!
//! The engine itself is pure computation; everything here is boundary work:
//! argument parsing, JSON output in the boundary shapes, the history store,
//! and the caller-side time budget for long solves.

mod store;

use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use store::{HistoryRecord, HistoryStore, RecordKind};
use sudoku_engine::{
    validate, CancelToken, Difficulty, GenerateError, Generator, Grid, Solution, SolveError,
    Solver,
};

#[derive(Parser)]
#[command(name = "sudoku", version, about = "Generate, solve, and explain 9x9 Sudoku puzzles")]
struct Cli {
    /// Override the history store location
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a puzzle with a guaranteed unique solution
    Generate {
        /// Puzzle difficulty: easy, medium, or hard
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Print the boundary JSON instead of a board
        #[arg(long)]
        json: bool,
    },
    /// Solve a puzzle and explain every step
    Solve {
        /// 81-character puzzle line ('.' or '0' for empty), or '-' for stdin
        puzzle: String,
        /// Print the step-by-step deduction trace
        #[arg(long)]
        steps: bool,
        /// Give up after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Print the boundary JSON instead of a board
        #[arg(long)]
        json: bool,
    },
    /// Show one justified next move
    Hint {
        /// 81-character puzzle line ('.' or '0' for empty), or '-' for stdin
        puzzle: String,
        /// Print the boundary JSON instead of prose
        #[arg(long)]
        json: bool,
    },
    /// Check a puzzle against the Sudoku rules
    Validate {
        /// 81-character puzzle line ('.' or '0' for empty), or '-' for stdin
        puzzle: String,
        /// Also require every cell to be filled
        #[arg(long)]
        complete: bool,
        /// Print the boundary JSON instead of prose
        #[arg(long)]
        json: bool,
    },
    /// Show aggregated play history
    Stats {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (mut history, store_path) = HistoryStore::load(cli.store.as_deref());
    match cli.command {
        Command::Generate {
            difficulty,
            seed,
            json,
        } => {
            let mut generator = match seed {
                Some(seed) => Generator::with_seed(seed),
                None => Generator::new(),
            };
            let puzzle = match generator.generate(difficulty) {
                Ok(puzzle) => puzzle,
                // The closest achieved puzzle is still unique; warn and use it.
                Err(err) => {
                    eprintln!("warning: {err}");
                    let GenerateError::ClueTargetMissed { best, .. } = err;
                    *best
                }
            };
            history.record(HistoryRecord {
                kind: RecordKind::Generated,
                puzzle: puzzle.grid.to_line_string(),
                difficulty: Some(difficulty),
                clue_count: puzzle.clue_count,
                timestamp: HistoryStore::now_timestamp(),
            });
            history.save(&store_path);

            if json {
                let out = json!({
                    "puzzle": puzzle.grid,
                    "difficulty": difficulty,
                    "clue_count": puzzle.clue_count,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", puzzle.grid);
                println!("Difficulty: {}  Clues: {}", difficulty, puzzle.clue_count);
                println!("{}", puzzle.grid.to_line_string());
            }
        }
        Command::Solve {
            puzzle,
            steps,
            timeout_secs,
            json,
        } => {
            let grid = read_puzzle(&puzzle)?;
            let solution = solve_with_budget(&grid, timeout_secs.map(Duration::from_secs))?;
            history.record(HistoryRecord {
                kind: RecordKind::Solved,
                puzzle: grid.to_line_string(),
                difficulty: None,
                clue_count: grid.clue_count(),
                timestamp: HistoryStore::now_timestamp(),
            });
            history.save(&store_path);

            if json {
                let out = json!({
                    "solution": solution.grid,
                    "steps": solution.steps,
                    "is_valid": true,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", solution.grid);
                if steps {
                    for (number, step) in solution.steps.iter().enumerate() {
                        println!("{:3}. [{}] {}", number + 1, step.technique, step.message);
                    }
                } else {
                    println!("Solved in {} steps.", solution.steps.len());
                }
            }
        }
        Command::Hint { puzzle, json } => {
            let grid = read_puzzle(&puzzle)?;
            let hint = Solver::new().hint(&grid)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&hint)?);
            } else {
                println!(
                    "Row {}, column {}: place {}",
                    hint.pos.row + 1,
                    hint.pos.col + 1,
                    hint.value
                );
                println!("{}", hint.message);
            }
        }
        Command::Validate {
            puzzle,
            complete,
            json,
        } => {
            let grid = read_puzzle(&puzzle)?;
            let report = validate(&grid, complete);
            if json {
                let out = json!({
                    "is_valid": report.is_valid(),
                    "violations": report.violations,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if report.is_valid() {
                println!("Grid is valid.");
            } else {
                for violation in &report.violations {
                    println!("{violation}");
                }
            }
        }
        Command::Stats { json } => {
            let stats = history.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Generated: {}", stats.total_generated);
                println!("Solved:    {}", stats.total_solved);
                if !stats.by_difficulty.is_empty() {
                    println!("By difficulty:");
                    for (difficulty, count) in &stats.by_difficulty {
                        println!("  {:7} {}", difficulty, count);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Read a puzzle argument: an inline 81-character line, or stdin for `-`.
fn read_puzzle(arg: &str) -> Result<Grid, Box<dyn std::error::Error>> {
    let line = if arg == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.trim().to_string()
    } else {
        arg.to_string()
    };
    Ok(Grid::from_line_str(&line)?)
}

/// Run a solve under a wall-clock budget.
///
/// The engine only promises cooperative cancellation, so the budget lives
/// here: the solve runs in a worker holding one half of a [`CancelToken`],
/// and on deadline the token is set and the outcome reported as
/// [`SolveError::Timeout`].
fn solve_with_budget(grid: &Grid, budget: Option<Duration>) -> Result<Solution, SolveError> {
    let Some(budget) = budget else {
        return Solver::new().solve(grid);
    };
    let token = CancelToken::new();
    let worker_token = token.clone();
    let worker_grid = grid.clone();
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = Solver::with_cancel_token(worker_token).solve(&worker_grid);
        let _ = sender.send(result);
    });
    match receiver.recv_timeout(budget) {
        Ok(result) => result,
        Err(_) => {
            token.cancel();
            log::debug!("solve exceeded {:?}, cancelled", budget);
            Err(SolveError::Timeout)
        }
    }
}
