//! Shape rotation and orientation expansion.
//!
//! A flat piece reaches the board in one of two mirror faces, and each face
//! can be rotated by 0/90/180/270 degrees: eight orientation variants per
//! piece. Symmetric pieces produce coinciding variants; they are kept, so
//! enumeration counts placement paths rather than distinct boards (see
//! `distinct_orientation_count` for the geometric figure).

use rustc_hash::FxHashSet;

use crate::pieces::{Piece, Shape};

/// Rotates a shape 90 degrees counterclockwise.
///
/// The output has swapped dimensions; `out[i][j] = in[j][cols - 1 - i]`.
pub fn rotate90(shape: &Shape) -> Shape {
    let (rows, cols) = (shape.rows(), shape.cols());
    let mut cells = Vec::with_capacity(rows * cols);
    for i in 0..cols {
        for j in 0..rows {
            cells.push(shape.get(j, cols - 1 - i));
        }
    }
    Shape::from_cells(cols, rows, cells)
}

/// All eight orientation variants of a piece, in a fixed order:
/// face 0 at 0/90/180/270 degrees, then face 1 likewise.
pub fn all_orientations(piece: &Piece) -> Vec<Shape> {
    let mut orientations = Vec::with_capacity(8);
    for base_face in &piece.faces {
        let mut shape = base_face.clone();
        for _ in 0..4 {
            let next = rotate90(&shape);
            orientations.push(shape);
            shape = next;
        }
    }
    orientations
}

/// Number of geometrically distinct orientations of a piece.
pub fn distinct_orientation_count(piece: &Piece) -> usize {
    let distinct: FxHashSet<Shape> = all_orientations(piece).into_iter().collect();
    distinct.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::standard_catalog;

    #[test]
    fn test_rotate90_swaps_dimensions() {
        let shape = Shape::from_mask(1, &[&[1, 0, 1], &[1, 1, 1]]);
        let rotated = rotate90(&shape);
        assert_eq!((rotated.rows(), rotated.cols()), (3, 2));
        // rightmost column becomes the top row
        assert_eq!(rotated, Shape::from_mask(1, &[&[1, 1], &[0, 1], &[1, 1]]));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for piece in standard_catalog().pieces() {
            for base_face in &piece.faces {
                let mut shape = base_face.clone();
                for _ in 0..4 {
                    shape = rotate90(&shape);
                }
                assert_eq!(&shape, base_face);
            }
        }
    }

    #[test]
    fn test_rotation_preserves_cell_count() {
        for piece in standard_catalog().pieces() {
            for orientation in all_orientations(piece) {
                assert_eq!(
                    orientation.cell_count(),
                    rotate90(&orientation).cell_count()
                );
            }
        }
    }

    #[test]
    fn test_every_piece_has_eight_variants() {
        for piece in standard_catalog().pieces() {
            assert_eq!(all_orientations(piece).len(), 8);
        }
    }

    #[test]
    fn test_symmetric_square_collapses_to_one_distinct_orientation() {
        let square = Shape::from_mask(1, &[&[1, 1], &[1, 1]]);
        let piece = Piece {
            id: 1,
            faces: [square.clone(), square],
        };
        assert_eq!(distinct_orientation_count(&piece), 1);
    }
}
