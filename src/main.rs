//! IQ Fit Puzzle Enumerator
//!
//! Enumerates every way to finish a 5x10 IQ Fit board from a starting
//! configuration, using depth-first backtracking with dead-region pruning.
//! Solutions are saved to disk and can be rendered in color on the console.

use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use iqfit::pieces::{standard_catalog, IqFitBoard, Puzzle, BLANK_BOARD, BOARD_120};
use iqfit::{persistence, solver, visualization};

/// Enumerates all solutions of an IQ Fit board.
#[derive(Parser)]
#[command(name = "iqfit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a board preset and save the solutions to disk.
    Solve {
        /// Starting board.
        #[arg(long, value_enum, default_value_t = Preset::Board120)]
        board: Preset,
        /// Fan the top-level search branches out over all cores.
        #[arg(long)]
        parallel: bool,
        /// Stop after this many solutions (sequential engine only).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Render saved solutions in color on the console.
    Display {
        /// Render at most this many solutions.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the number of saved solutions.
    Count,
}

/// Starting boards from the instruction booklet.
#[derive(Copy, Clone, ValueEnum)]
enum Preset {
    /// Empty board, all ten pieces available.
    Blank,
    /// Board #120, pieces 1 and 4 pre-placed.
    Board120,
}

impl Preset {
    fn board(self) -> IqFitBoard {
        match self {
            Preset::Blank => BLANK_BOARD,
            Preset::Board120 => BOARD_120,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve {
            board,
            parallel,
            limit,
        }) => run_solve(board, parallel, limit),
        Some(Command::Display { limit }) => run_display(limit),
        Some(Command::Count) => run_count(),
        None => run_solve(Preset::Board120, false, None),
    }
}

/// Solves a preset, reports timing, and saves the solutions.
fn run_solve(preset: Preset, parallel: bool, limit: Option<usize>) {
    let catalog = standard_catalog();
    let puzzle = match Puzzle::new(preset.board(), &catalog) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Invalid board configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("Initial board:");
    print!("{}", visualization::render(&puzzle.board));
    println!(
        "Placing {} remaining pieces...",
        puzzle.remaining.len()
    );

    if parallel && limit.is_some() {
        eprintln!("--limit is ignored with --parallel");
    }

    let start = Instant::now();
    let solutions = if parallel {
        puzzle.solve_parallel()
    } else {
        puzzle.solve(limit)
    };
    let elapsed = start.elapsed();

    println!(
        "Found {} solutions ({} distinct boards) in {:.3} seconds",
        solutions.len(),
        solver::distinct_boards(&solutions),
        elapsed.as_secs_f64()
    );

    if let Err(e) = persistence::save(&solutions) {
        eprintln!("Failed to save solutions: {}", e);
    } else {
        println!("Wrote solutions.txt and solutions.bin");
    }

    if let Some(first) = solutions.first() {
        println!("First solution:");
        print!("{}", visualization::render(first));
        println!("Run 'iqfit display' to browse the rest.");
    }
}

/// Loads saved solutions and renders them in color.
fn run_display(limit: Option<usize>) {
    match persistence::load_all::<5, 10>() {
        Some(solutions) => {
            let shown = limit.unwrap_or(solutions.len()).min(solutions.len());
            println!("Loaded {} solutions", solutions.len());
            for (i, solution) in solutions.iter().take(shown).enumerate() {
                println!("Solution {}:", i + 1);
                print!("{}", visualization::render(solution));
            }
        }
        None => {
            eprintln!("No solutions.bin found. Run 'iqfit solve' first.");
        }
    }
}

/// Prints the count of saved solutions.
fn run_count() {
    match persistence::count() {
        Some(count) => println!("{} solutions", count),
        None => eprintln!("No solutions.bin found. Run 'iqfit solve' first."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqfit::grid::format_board;

    #[test]
    fn test_board_120_layout() {
        let output = format_board(&BOARD_120);
        insta::assert_snapshot!("board_120_layout", output);
    }

    #[test]
    fn test_board_120_leaves_eight_pieces() {
        let puzzle = Puzzle::new(BOARD_120, &standard_catalog()).unwrap();
        assert_eq!(puzzle.remaining.len(), 8);
    }
}
