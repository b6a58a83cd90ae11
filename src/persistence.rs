//! File I/O for saving and loading solved boards.
//!
//! Binary format for `solutions.bin` (little endian):
//! - u32: solution count
//! - u32: board rows
//! - u32: board cols
//! - repeat per solution: rows * cols cell bytes, row-major
//!   (0 = empty, otherwise the 1-based piece id)

use std::fs::File;
use std::io::{Read, Write};

use crate::grid::{format_board, Board};

const SOLUTIONS_BIN: &str = "solutions.bin";
const SOLUTIONS_TXT: &str = "solutions.txt";

/// Saves solutions to both binary and text files.
pub fn save<const R: usize, const C: usize>(solutions: &[Board<R, C>]) -> std::io::Result<()> {
    save_text(solutions)?;
    save_binary(solutions)?;
    Ok(())
}

/// Saves solutions in human-readable text format.
fn save_text<const R: usize, const C: usize>(solutions: &[Board<R, C>]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_TXT)?;
    writeln!(file, "Found {} solutions:\n", solutions.len())?;
    for (i, solution) in solutions.iter().enumerate() {
        writeln!(file, "Solution {}:", i + 1)?;
        write!(file, "{}", format_board(solution))?;
        writeln!(file)?;
    }
    Ok(())
}

/// Saves solutions in compact binary format for fast loading.
fn save_binary<const R: usize, const C: usize>(solutions: &[Board<R, C>]) -> std::io::Result<()> {
    let mut file = File::create(SOLUTIONS_BIN)?;

    file.write_all(&(solutions.len() as u32).to_le_bytes())?;
    file.write_all(&(R as u32).to_le_bytes())?;
    file.write_all(&(C as u32).to_le_bytes())?;

    for solution in solutions {
        file.write_all(&solution.cell_bytes())?;
    }

    Ok(())
}

/// Loads all solutions from the binary file.
///
/// Returns `None` when the file is missing, truncated, or was written for
/// different board dimensions.
pub fn load_all<const R: usize, const C: usize>() -> Option<Vec<Board<R, C>>> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let solution_count = u32::from_le_bytes(u32_buffer) as usize;

    file.read_exact(&mut u32_buffer).ok()?;
    let rows = u32::from_le_bytes(u32_buffer) as usize;
    file.read_exact(&mut u32_buffer).ok()?;
    let cols = u32::from_le_bytes(u32_buffer) as usize;
    if rows != R || cols != C {
        return None;
    }

    let mut solutions = Vec::with_capacity(solution_count);
    let mut cell_buffer = vec![0u8; R * C];

    for _ in 0..solution_count {
        file.read_exact(&mut cell_buffer).ok()?;
        solutions.push(Board::from_cell_bytes(&cell_buffer)?);
    }

    Some(solutions)
}

/// Returns the number of saved solutions without loading them all.
pub fn count() -> Option<usize> {
    let mut file = File::open(SOLUTIONS_BIN).ok()?;
    let mut u32_buffer = [0u8; 4];
    file.read_exact(&mut u32_buffer).ok()?;
    Some(u32::from_le_bytes(u32_buffer) as usize)
}
