//! Backtracking enumeration of exact board tilings.
//!
//! One recursion level per catalog piece: depth d tries every orientation
//! variant of piece d at every in-bounds anchor, gated by the overlap test
//! and the dead-region prune, then recurses on a fresh board snapshot.
//! Because each branch owns its snapshot, the top-level branches are
//! independent and can be fanned out over rayon; the branch counts sum to
//! the same total in any order.

use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::geometry::all_orientations;
use crate::grid::Board;
use crate::pieces::{Catalog, Shape};

/// One catalog entry expanded for search: its eight orientation variants.
struct SearchPiece {
    orientations: Vec<Shape>,
}

/// Expands the remaining catalog into per-depth orientation lists.
fn expand_catalog(catalog: &Catalog) -> Vec<SearchPiece> {
    catalog
        .pieces()
        .iter()
        .map(|piece| SearchPiece {
            orientations: all_orientations(piece),
        })
        .collect()
}

/// Checks whether a complete board is reachable at all from the cell totals.
///
/// Faces of one piece may differ in footprint, so the reachable totals form
/// a range rather than a single value. A board whose cell count cannot land
/// exactly on R*C has zero solutions, no search required.
fn completion_possible<const R: usize, const C: usize>(
    board: &Board<R, C>,
    pieces: &[SearchPiece],
) -> bool {
    let filled = board.filled_count();
    let min_total: usize = filled
        + pieces
            .iter()
            .map(|piece| {
                piece
                    .orientations
                    .iter()
                    .map(Shape::cell_count)
                    .min()
                    .unwrap_or(0)
            })
            .sum::<usize>();
    let max_total: usize = filled
        + pieces
            .iter()
            .map(|piece| {
                piece
                    .orientations
                    .iter()
                    .map(Shape::cell_count)
                    .max()
                    .unwrap_or(0)
            })
            .sum::<usize>();
    (min_total..=max_total).contains(&(R * C))
}

/// Recursive count-only search. Used by both count entry points.
fn count_subtree<const R: usize, const C: usize>(
    board: &Board<R, C>,
    pieces: &[SearchPiece],
    depth: usize,
    min_piece_cells: usize,
) -> u64 {
    if depth == pieces.len() {
        // faces differ in footprint, so a full-depth board can still be
        // short of complete; that is a dead end, not an error
        return u64::from(board.is_complete());
    }

    let mut count = 0;
    for shape in &pieces[depth].orientations {
        let (Some(row_max), Some(col_max)) =
            (R.checked_sub(shape.rows()), C.checked_sub(shape.cols()))
        else {
            continue;
        };
        for row in 0..=row_max {
            for col in 0..=col_max {
                if !board.fits(shape, row, col) {
                    continue;
                }
                let next = board.place(shape, row, col);
                if next.has_dead_region(min_piece_cells) {
                    continue;
                }
                count += count_subtree(&next, pieces, depth + 1, min_piece_cells);
            }
        }
    }
    count
}

/// Collecting search with an early-stop flag for `max_solutions`.
struct Search<'a, const R: usize, const C: usize> {
    pieces: &'a [SearchPiece],
    min_piece_cells: usize,
    max_solutions: Option<usize>,
    solutions: Vec<Board<R, C>>,
    stopped: bool,
}

impl<const R: usize, const C: usize> Search<'_, R, C> {
    fn run(&mut self, board: &Board<R, C>, depth: usize) -> u64 {
        if self.stopped {
            return 0;
        }
        if depth == self.pieces.len() {
            if !board.is_complete() {
                return 0;
            }
            self.solutions.push(*board);
            if let Some(max) = self.max_solutions {
                if self.solutions.len() >= max {
                    self.stopped = true;
                }
            }
            return 1;
        }

        let mut count = 0;
        for shape in &self.pieces[depth].orientations {
            let (Some(row_max), Some(col_max)) =
                (R.checked_sub(shape.rows()), C.checked_sub(shape.cols()))
            else {
                continue;
            };
            for row in 0..=row_max {
                for col in 0..=col_max {
                    if !board.fits(shape, row, col) {
                        continue;
                    }
                    let next = board.place(shape, row, col);
                    if next.has_dead_region(self.min_piece_cells) {
                        continue;
                    }
                    count += self.run(&next, depth + 1);
                    if self.stopped {
                        return count;
                    }
                }
            }
        }
        count
    }
}

/// Shared entry gates. Returns the prepared pieces when search is worth
/// starting, `None` when the answer is already zero.
fn prepare<const R: usize, const C: usize>(
    board: &Board<R, C>,
    catalog: &Catalog,
) -> Option<(Vec<SearchPiece>, usize)> {
    let pieces = expand_catalog(catalog);
    let min_piece_cells = catalog.min_piece_cells();
    if !completion_possible(board, &pieces) {
        debug!("cell totals cannot reach a complete board, skipping search");
        return None;
    }
    if board.has_dead_region(min_piece_cells) {
        debug!("initial board already contains a dead region, skipping search");
        return None;
    }
    Some((pieces, min_piece_cells))
}

/// Collects solution boards for `board` using the remaining `catalog`.
///
/// Every successful placement path counts as one solution; geometrically
/// identical final boards reached along different paths are all kept.
/// `max_solutions` stops the search early once enough are collected.
pub fn solve<const R: usize, const C: usize>(
    board: &Board<R, C>,
    catalog: &Catalog,
    max_solutions: Option<usize>,
) -> Vec<Board<R, C>> {
    let Some((pieces, min_piece_cells)) = prepare(board, catalog) else {
        return Vec::new();
    };
    let mut search = Search {
        pieces: &pieces,
        min_piece_cells,
        max_solutions,
        solutions: Vec::new(),
        stopped: false,
    };
    search.run(board, 0);
    search.solutions
}

/// Counts all solutions sequentially.
pub fn count_solutions<const R: usize, const C: usize>(
    board: &Board<R, C>,
    catalog: &Catalog,
) -> u64 {
    let Some((pieces, min_piece_cells)) = prepare(board, catalog) else {
        return 0;
    };
    count_subtree(board, &pieces, 0, min_piece_cells)
}

/// Boards reached by every surviving depth-0 placement of the first piece.
fn first_level_branches<const R: usize, const C: usize>(
    board: &Board<R, C>,
    first: &SearchPiece,
    min_piece_cells: usize,
) -> Vec<Board<R, C>> {
    let mut branches = Vec::new();
    for shape in &first.orientations {
        let (Some(row_max), Some(col_max)) =
            (R.checked_sub(shape.rows()), C.checked_sub(shape.cols()))
        else {
            continue;
        };
        for row in 0..=row_max {
            for col in 0..=col_max {
                if board.fits(shape, row, col) {
                    let next = board.place(shape, row, col);
                    if !next.has_dead_region(min_piece_cells) {
                        branches.push(next);
                    }
                }
            }
        }
    }
    branches
}

/// Counts all solutions, distributing the depth-0 branches over rayon.
///
/// Each branch owns an independent board snapshot and the catalog is
/// read-only, so no synchronization is needed; the per-branch counts sum
/// associatively to the same total as the sequential engine.
pub fn count_solutions_parallel<const R: usize, const C: usize>(
    board: &Board<R, C>,
    catalog: &Catalog,
) -> u64 {
    let Some((pieces, min_piece_cells)) = prepare(board, catalog) else {
        return 0;
    };
    if pieces.is_empty() {
        return u64::from(board.is_complete());
    }
    first_level_branches(board, &pieces[0], min_piece_cells)
        .par_iter()
        .map(|branch| count_subtree(branch, &pieces, 1, min_piece_cells))
        .sum()
}

/// Collects all solution boards in parallel. No early-stop support; use
/// `solve` with `max_solutions` when only a few are needed.
pub fn solve_parallel<const R: usize, const C: usize>(
    board: &Board<R, C>,
    catalog: &Catalog,
) -> Vec<Board<R, C>> {
    let Some((pieces, min_piece_cells)) = prepare(board, catalog) else {
        return Vec::new();
    };
    if pieces.is_empty() {
        return if board.is_complete() {
            vec![*board]
        } else {
            Vec::new()
        };
    }
    first_level_branches(board, &pieces[0], min_piece_cells)
        .into_par_iter()
        .map(|branch| {
            let mut search = Search {
                pieces: &pieces,
                min_piece_cells,
                max_solutions: None,
                solutions: Vec::new(),
                stopped: false,
            };
            search.run(&branch, 1);
            search.solutions
        })
        .reduce(Vec::new, |mut all, mut chunk| {
            all.append(&mut chunk);
            all
        })
}

/// Number of geometrically distinct final boards among the solutions.
///
/// Enumeration counts placement paths, so symmetric pieces reach the same
/// board along several paths; this gives the deduplicated figure for
/// reporting without changing the enumeration semantics.
pub fn distinct_boards<const R: usize, const C: usize>(solutions: &[Board<R, C>]) -> usize {
    let distinct: FxHashSet<&Board<R, C>> = solutions.iter().collect();
    distinct.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Catalog, Piece, Puzzle, Shape};

    fn square_piece(id: u8) -> Piece {
        let face = Shape::from_mask(id, &[&[1, 1], &[1, 1]]);
        Piece {
            id,
            faces: [face.clone(), face],
        }
    }

    fn two_squares_catalog() -> Catalog {
        Catalog::new(vec![square_piece(1), square_piece(2)]).unwrap()
    }

    #[test]
    fn test_two_square_blocks_on_2x4_board() {
        // Depth 0: anchors at columns 0 and 2 survive (an anchor at column 1
        // splits the rest into two 2-cell dead regions), times 8 orientation
        // variants of the symmetric square. Depth 1: the single remaining
        // gap, times 8 variants. 2 * 8 * 8 = 128 placement paths.
        let board: Board<2, 4> = Board::empty();
        let catalog = two_squares_catalog();
        assert_eq!(count_solutions(&board, &catalog), 128);

        let solutions = solve(&board, &catalog, None);
        assert_eq!(solutions.len(), 128);
        // every path lands on one of the two distinct final boards
        assert_eq!(distinct_boards(&solutions), 2);
        for solution in &solutions {
            assert!(solution.is_complete());
        }
    }

    #[test]
    fn test_parallel_count_matches_sequential() {
        let board: Board<2, 4> = Board::empty();
        let catalog = two_squares_catalog();
        assert_eq!(count_solutions_parallel(&board, &catalog), 128);
        assert_eq!(solve_parallel(&board, &catalog).len(), 128);
    }

    #[test]
    fn test_max_solutions_stops_early() {
        let board: Board<2, 4> = Board::empty();
        let catalog = two_squares_catalog();
        assert_eq!(solve(&board, &catalog, Some(5)).len(), 5);
    }

    #[test]
    fn test_complete_board_with_no_pieces_is_one_solution() {
        let board: Board<2, 2> = Board::from_rows([[1, 1], [1, 1]]);
        let puzzle = Puzzle::new(board, &Catalog::new(vec![square_piece(1)]).unwrap()).unwrap();
        assert!(puzzle.remaining.is_empty());
        assert_eq!(puzzle.count_solutions(), 1);
        assert_eq!(puzzle.solve(None), vec![board]);
        assert_eq!(puzzle.count_solutions_parallel(), 1);
    }

    #[test]
    fn test_trapped_cell_returns_zero_without_search() {
        // the center cell is walled off on all four sides
        let board: Board<3, 3> = Board::from_rows([[1, 1, 1], [1, 0, 1], [1, 1, 1]]);
        assert!(board.has_dead_region(4));
        let catalog = Catalog::new(vec![square_piece(1), square_piece(2)]).unwrap();
        let puzzle = Puzzle::new(board, &catalog).unwrap();
        assert_eq!(puzzle.count_solutions(), 0);
        assert!(puzzle.solve(None).is_empty());
    }

    #[test]
    fn test_infeasible_cell_totals_return_zero() {
        // one 4-cell piece can never cover 8 empty cells
        let board: Board<2, 4> = Board::empty();
        let catalog = Catalog::new(vec![square_piece(1)]).unwrap();
        assert_eq!(count_solutions(&board, &catalog), 0);
        assert_eq!(count_solutions_parallel(&board, &catalog), 0);
    }

    #[test]
    fn test_oversized_piece_contributes_nothing() {
        // a 3x3 shape cannot be anchored anywhere on a 2x4 board
        let face = Shape::from_mask(1, &[&[1, 1, 1], &[1, 1, 1], &[1, 1, 0]]);
        let big = Piece {
            id: 1,
            faces: [face.clone(), face],
        };
        let board: Board<2, 4> = Board::empty();
        let catalog = Catalog::new(vec![big]).unwrap();
        assert_eq!(count_solutions(&board, &catalog), 0);
    }

    #[test]
    fn test_unsolvable_board_is_zero_not_error() {
        // totals match (two 4-cell pieces, 8 empty cells) and both regions
        // pass the size prune, but the L-shaped region cannot hold a square
        let board: Board<2, 6> =
            Board::from_rows([[0, 0, 0, 3, 0, 0], [0, 3, 3, 3, 0, 0]]);
        let catalog = Catalog::new(vec![square_piece(1), square_piece(2)]).unwrap();
        assert_eq!(count_solutions(&board, &catalog), 0);
    }
}
