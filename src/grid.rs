//! Board representation and operations for flat piece-packing puzzles.
//!
//! Generic over board shape (`R` rows, `C` columns). The board is a fixed
//! 2D array where each cell contains a piece id (1-based) or 0 for empty.
//! Boards are `Copy` value snapshots: every branch of the search tree owns
//! its own board, so sibling branches never observe each other's writes.

use crate::pieces::Shape;

/// A fixed-size rectangular board of piece ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board<const R: usize, const C: usize> {
    cells: [[u8; C]; R],
}

impl<const R: usize, const C: usize> Board<R, C> {
    /// An all-empty board.
    pub const fn empty() -> Self {
        Self {
            cells: [[0; C]; R],
        }
    }

    /// Creates a board from explicit rows of cell values.
    pub const fn from_rows(cells: [[u8; C]; R]) -> Self {
        Self { cells }
    }

    /// Returns the value at (row, col): 0 for empty, a piece id otherwise.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != 0)
            .count()
    }

    /// True when every cell is occupied.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != 0)
    }

    /// Sorted, deduplicated ids of the pieces already on the board.
    pub fn piece_ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self
            .cells
            .iter()
            .flatten()
            .copied()
            .filter(|&cell| cell != 0)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Tests whether `shape` can be placed with its top-left corner at
    /// (row, col) without overlapping any occupied cell.
    ///
    /// Equivalent to checking that the nonzero supports of the board region
    /// and the shape are disjoint: the union's nonzero count equals the sum
    /// of both counts exactly when no cell is nonzero in both. No side
    /// effects. The bounding box must lie within the board; the solver
    /// guarantees this by construction.
    pub fn fits(&self, shape: &Shape, row: usize, col: usize) -> bool {
        debug_assert!(row + shape.rows() <= R && col + shape.cols() <= C);
        for sr in 0..shape.rows() {
            for sc in 0..shape.cols() {
                if shape.get(sr, sc) != 0 && self.cells[row + sr][col + sc] != 0 {
                    return false;
                }
            }
        }
        true
    }

    /// Returns a new board with `shape` merged in at (row, col).
    ///
    /// `fits` has already guaranteed disjointness, so the bitwise union
    /// writes each piece cell without overwriting anything.
    pub fn place(&self, shape: &Shape, row: usize, col: usize) -> Self {
        debug_assert!(self.fits(shape, row, col));
        let mut next = *self;
        for sr in 0..shape.rows() {
            for sc in 0..shape.cols() {
                next.cells[row + sr][col + sc] |= shape.get(sr, sc);
            }
        }
        next
    }

    /// Sizes of all 4-connected regions of empty cells.
    ///
    /// The regions partition the empty-cell set: every empty cell belongs to
    /// exactly one region and the sizes sum to the total empty count. The
    /// flood fill marks a separate visited grid, leaving the board untouched.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut visited = [[false; C]; R];
        let mut sizes = Vec::new();
        for row in 0..R {
            for col in 0..C {
                if self.cells[row][col] == 0 && !visited[row][col] {
                    sizes.push(self.flood_region(&mut visited, row, col));
                }
            }
        }
        sizes
    }

    /// Returns true if any empty region is too small to hold any piece.
    ///
    /// `min_piece_cells` is the smallest cell count among the orientations of
    /// the active catalog. A region below that size can never be filled, so
    /// the board is unwinnable. This is sound but incomplete: a large enough
    /// region may still be unfillable if no orientation matches its shape.
    pub fn has_dead_region(&self, min_piece_cells: usize) -> bool {
        let mut visited = [[false; C]; R];
        for row in 0..R {
            for col in 0..C {
                if self.cells[row][col] == 0
                    && !visited[row][col]
                    && self.flood_region(&mut visited, row, col) < min_piece_cells
                {
                    return true;
                }
            }
        }
        false
    }

    /// Iterative flood fill from one empty seed cell. Returns the region size.
    fn flood_region(&self, visited: &mut [[bool; C]; R], row: usize, col: usize) -> usize {
        let mut stack = vec![(row, col)];
        visited[row][col] = true;
        let mut size = 0;
        while let Some((r, c)) = stack.pop() {
            size += 1;
            if r > 0 && self.cells[r - 1][c] == 0 && !visited[r - 1][c] {
                visited[r - 1][c] = true;
                stack.push((r - 1, c));
            }
            if r + 1 < R && self.cells[r + 1][c] == 0 && !visited[r + 1][c] {
                visited[r + 1][c] = true;
                stack.push((r + 1, c));
            }
            if c > 0 && self.cells[r][c - 1] == 0 && !visited[r][c - 1] {
                visited[r][c - 1] = true;
                stack.push((r, c - 1));
            }
            if c + 1 < C && self.cells[r][c + 1] == 0 && !visited[r][c + 1] {
                visited[r][c + 1] = true;
                stack.push((r, c + 1));
            }
        }
        size
    }

    /// Row-major cell bytes, for the binary persistence format.
    pub fn cell_bytes(&self) -> Vec<u8> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Rebuilds a board from row-major cell bytes. `None` on length mismatch.
    pub fn from_cell_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != R * C {
            return None;
        }
        let mut board = Self::empty();
        for row in 0..R {
            for col in 0..C {
                board.cells[row][col] = bytes[row * C + col];
            }
        }
        Some(board)
    }
}

/// Formats a board as a plain-text grid.
///
/// Empty cells show as '.', piece ids as digits, hex letters from id 10 up.
pub fn format_board<const R: usize, const C: usize>(board: &Board<R, C>) -> String {
    let mut output = String::new();
    for row in 0..R {
        for col in 0..C {
            let id = board.get(row, col);
            let display_char = if id == 0 {
                '.'
            } else if id < 10 {
                char::from(b'0' + id)
            } else {
                char::from(b'A' + id - 10)
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross() -> Shape {
        Shape::from_mask(1, &[&[1, 0, 1], &[1, 1, 1]])
    }

    #[test]
    fn test_fits_around_existing_piece() {
        // the gap in the shape lines up with the occupied cell
        let board: Board<2, 3> = Board::from_rows([[0, 2, 0], [0, 0, 0]]);
        assert!(board.fits(&cross(), 0, 0));
    }

    #[test]
    fn test_fits_rejects_overlap() {
        let board: Board<2, 3> = Board::from_rows([[2, 0, 0], [0, 0, 0]]);
        assert!(!board.fits(&cross(), 0, 0));
    }

    #[test]
    fn test_place_adds_exactly_the_shape_cells() {
        let board: Board<2, 3> = Board::from_rows([[0, 2, 0], [0, 0, 0]]);
        let shape = cross();
        let placed = board.place(&shape, 0, 0);
        assert_eq!(
            placed.filled_count(),
            board.filled_count() + shape.cell_count()
        );
        assert!(placed.is_complete());
        // the original snapshot is untouched
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_region_sizes_partition_empty_cells() {
        let board: Board<3, 5> =
            Board::from_rows([[0, 1, 0, 1, 0], [0, 1, 1, 1, 0], [0, 0, 0, 0, 0]]);
        let mut sizes = board.region_sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 9]);
        let empty = 3 * 5 - board.filled_count();
        assert_eq!(sizes.iter().sum::<usize>(), empty);
    }

    #[test]
    fn test_dead_region_detection() {
        let board: Board<3, 5> =
            Board::from_rows([[0, 1, 0, 1, 0], [0, 1, 1, 1, 0], [0, 0, 0, 0, 0]]);
        // the single trapped cell at (0, 2) can never be filled
        assert!(board.has_dead_region(4));
        // every region holds at least one cell
        assert!(!board.has_dead_region(1));
    }

    #[test]
    fn test_full_board_has_no_dead_region() {
        let board: Board<2, 2> = Board::from_rows([[1, 1], [1, 1]]);
        assert!(!board.has_dead_region(4));
        assert!(board.region_sizes().is_empty());
        assert!(board.is_complete());
    }

    #[test]
    fn test_piece_ids_sorted_unique() {
        let board: Board<2, 3> = Board::from_rows([[4, 0, 1], [4, 1, 0]]);
        assert_eq!(board.piece_ids(), vec![1, 4]);
    }

    #[test]
    fn test_cell_bytes_roundtrip() {
        let board: Board<2, 3> = Board::from_rows([[4, 0, 1], [4, 1, 0]]);
        let restored = Board::<2, 3>::from_cell_bytes(&board.cell_bytes()).unwrap();
        assert_eq!(restored, board);
        assert!(Board::<2, 3>::from_cell_bytes(&[0u8; 5]).is_none());
    }

    #[test]
    fn test_format_board() {
        let board: Board<2, 3> = Board::from_rows([[10, 0, 1], [0, 2, 0]]);
        assert_eq!(format_board(&board), "A.1\n.2.\n");
    }
}
