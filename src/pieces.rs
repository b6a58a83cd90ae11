//! Piece shapes, the validated catalog, and puzzle setup.
//!
//! Each piece is a flat projection of a physical IQ Fit piece: it has two
//! mirror base faces (the piece can lie on either side), and each face can
//! additionally be rotated in 90 degree steps on the board. Faces of the
//! same piece may cover a different number of cells, because part of the
//! physical piece hides under the board on one side.

use log::info;
use thiserror::Error;

use crate::grid::Board;
use crate::solver;

/// Canonical IQ Fit board shape.
pub const IQ_FIT_ROWS: usize = 5;
pub const IQ_FIT_COLS: usize = 10;

/// The 5x10 board used by the boxed game.
pub type IqFitBoard = Board<IQ_FIT_ROWS, IQ_FIT_COLS>;

/// A small rectangular grid describing one orientation of a piece.
///
/// Nonzero cells all carry the owning piece's id. Shape identity is purely
/// the grid content; shapes are immutable once built.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Shape {
    /// Builds a shape from a 0/1 mask, tagging occupied cells with `id`.
    pub fn from_mask(id: u8, mask: &[&[u8]]) -> Self {
        let rows = mask.len();
        let cols = mask.first().map_or(0, |row| row.len());
        let mut cells = Vec::with_capacity(rows * cols);
        for row in mask {
            debug_assert_eq!(row.len(), cols);
            for &cell in *row {
                cells.push(if cell != 0 { id } else { 0 });
            }
        }
        Self { rows, cols, cells }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell value at (row, col): 0 or the piece id.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    /// Number of occupied cells in this orientation.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Piece id carried by the occupied cells, or 0 for an empty shape.
    pub fn piece_id(&self) -> u8 {
        self.cells.iter().copied().find(|&cell| cell != 0).unwrap_or(0)
    }
}

/// A puzzle piece: an id plus its two mirror base faces.
#[derive(Clone, Debug)]
pub struct Piece {
    pub id: u8,
    pub faces: [Shape; 2],
}

/// Configuration errors caught when building a catalog or puzzle.
///
/// These are load-time failures; the search itself never raises them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("piece id 0 is reserved for empty cells")]
    ReservedId,
    #[error("duplicate piece id {0} in catalog")]
    DuplicateId(u8),
    #[error("piece {id} face {face} has no occupied cells")]
    EmptyFace { id: u8, face: usize },
    #[error("piece {id} face {face} contains cell value {found}, expected 0 or {id}")]
    MistaggedCell { id: u8, face: usize, found: u8 },
    #[error("board references piece id {0} which is not in the catalog")]
    UnknownBoardPiece(u8),
}

/// An immutable, validated set of pieces.
///
/// The catalog is a value: removing pre-placed pieces produces a filtered
/// snapshot, it never mutates shared state.
#[derive(Clone, Debug)]
pub struct Catalog {
    pieces: Vec<Piece>,
}

impl Catalog {
    /// Validates and wraps a piece list.
    pub fn new(pieces: Vec<Piece>) -> Result<Self, CatalogError> {
        let mut seen = Vec::with_capacity(pieces.len());
        for piece in &pieces {
            if piece.id == 0 {
                return Err(CatalogError::ReservedId);
            }
            if seen.contains(&piece.id) {
                return Err(CatalogError::DuplicateId(piece.id));
            }
            seen.push(piece.id);
            for (face_index, face) in piece.faces.iter().enumerate() {
                if face.cell_count() == 0 {
                    return Err(CatalogError::EmptyFace {
                        id: piece.id,
                        face: face_index,
                    });
                }
                if let Some(&found) = face
                    .cells
                    .iter()
                    .find(|&&cell| cell != 0 && cell != piece.id)
                {
                    return Err(CatalogError::MistaggedCell {
                        id: piece.id,
                        face: face_index,
                        found,
                    });
                }
            }
        }
        Ok(Self { pieces })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, id: u8) -> bool {
        self.pieces.iter().any(|piece| piece.id == id)
    }

    /// Smallest cell count among all piece orientations, 0 for an empty
    /// catalog. Rotation preserves cell counts, so the faces suffice.
    pub fn min_piece_cells(&self) -> usize {
        self.pieces
            .iter()
            .flat_map(|piece| piece.faces.iter().map(Shape::cell_count))
            .min()
            .unwrap_or(0)
    }

    /// A snapshot of this catalog with the listed ids removed.
    pub fn without_ids(&self, ids: &[u8]) -> Self {
        Self {
            pieces: self
                .pieces
                .iter()
                .filter(|piece| !ids.contains(&piece.id))
                .cloned()
                .collect(),
        }
    }
}

/// A solvable instance: an initial board plus the pieces still available.
///
/// Ids already on the board are removed from the catalog snapshot at
/// construction, so search depth d always corresponds to `remaining[d]`.
pub struct Puzzle<const R: usize, const C: usize> {
    pub board: Board<R, C>,
    pub remaining: Catalog,
}

impl<const R: usize, const C: usize> Puzzle<R, C> {
    /// Validates the board against the catalog and filters out placed pieces.
    pub fn new(board: Board<R, C>, catalog: &Catalog) -> Result<Self, CatalogError> {
        let placed = board.piece_ids();
        for &id in &placed {
            if !catalog.contains(id) {
                return Err(CatalogError::UnknownBoardPiece(id));
            }
        }
        for &id in &placed {
            info!("piece {id} is already on the board, removed from the available pieces");
        }
        Ok(Self {
            board,
            remaining: catalog.without_ids(&placed),
        })
    }

    /// Collects solution boards, stopping after `max_solutions` if set.
    pub fn solve(&self, max_solutions: Option<usize>) -> Vec<Board<R, C>> {
        solver::solve(&self.board, &self.remaining, max_solutions)
    }

    /// Counts all solutions with the sequential engine.
    pub fn count_solutions(&self) -> u64 {
        solver::count_solutions(&self.board, &self.remaining)
    }

    /// Counts all solutions, fanning the top-level branches out over rayon.
    pub fn count_solutions_parallel(&self) -> u64 {
        solver::count_solutions_parallel(&self.board, &self.remaining)
    }

    /// Collects all solution boards in parallel.
    pub fn solve_parallel(&self) -> Vec<Board<R, C>> {
        solver::solve_parallel(&self.board, &self.remaining)
    }
}

/// The ten pieces of the boxed IQ Fit game.
///
/// Face masks match the physical pieces; ids double as color indices for
/// rendering. Validation of this fixed data is exercised in tests.
pub fn standard_catalog() -> Catalog {
    let face = Shape::from_mask;
    Catalog {
        pieces: vec![
            // light green
            Piece {
                id: 1,
                faces: [
                    face(1, &[&[1, 0, 1], &[1, 1, 1]]),
                    face(1, &[&[1, 1, 1], &[1, 0, 0]]),
                ],
            },
            // dark green
            Piece {
                id: 2,
                faces: [
                    face(2, &[&[0, 1, 0], &[1, 1, 1]]),
                    face(2, &[&[1, 1, 1], &[1, 1, 0]]),
                ],
            },
            // yellow
            Piece {
                id: 3,
                faces: [
                    face(3, &[&[1, 1, 1, 1], &[0, 0, 0, 1]]),
                    face(3, &[&[1, 1, 1, 1], &[0, 0, 1, 1]]),
                ],
            },
            // orange
            Piece {
                id: 4,
                faces: [
                    face(4, &[&[0, 1, 0, 1], &[1, 1, 1, 1]]),
                    face(4, &[&[0, 0, 1, 0], &[1, 1, 1, 1]]),
                ],
            },
            // red
            Piece {
                id: 5,
                faces: [
                    face(5, &[&[1, 1, 1, 1], &[1, 0, 0, 1]]),
                    face(5, &[&[0, 0, 0, 1], &[1, 1, 1, 1]]),
                ],
            },
            // blue
            Piece {
                id: 6,
                faces: [
                    face(6, &[&[0, 1, 0], &[1, 1, 1]]),
                    face(6, &[&[1, 1, 1], &[1, 0, 1]]),
                ],
            },
            // purple
            Piece {
                id: 7,
                faces: [
                    face(7, &[&[1, 0, 0], &[1, 1, 1]]),
                    face(7, &[&[1, 1, 1], &[0, 1, 1]]),
                ],
            },
            // light blue
            Piece {
                id: 8,
                faces: [
                    face(8, &[&[1, 1, 1, 1], &[1, 0, 0, 0]]),
                    face(8, &[&[1, 0, 1, 0], &[1, 1, 1, 1]]),
                ],
            },
            // pink
            Piece {
                id: 9,
                faces: [
                    face(9, &[&[0, 1, 0, 0], &[1, 1, 1, 1]]),
                    face(9, &[&[1, 1, 1, 1], &[1, 1, 0, 0]]),
                ],
            },
            // cyan
            Piece {
                id: 10,
                faces: [
                    face(10, &[&[0, 0, 1, 0], &[1, 1, 1, 1]]),
                    face(10, &[&[1, 1, 1, 1], &[0, 1, 1, 0]]),
                ],
            },
        ],
    }
}

/// An empty 5x10 playing board.
pub const BLANK_BOARD: IqFitBoard = IqFitBoard::empty();

/// Board #120 from the instruction booklet, pieces 1 and 4 pre-placed.
pub const BOARD_120: IqFitBoard = IqFitBoard::from_rows([
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 4, 4, 0, 0, 0],
    [0, 0, 1, 0, 0, 4, 4, 4, 4, 0],
    [0, 0, 1, 1, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
]);
