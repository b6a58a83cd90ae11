//! IQ Fit Puzzle Enumerator Library
//!
//! Enumerates all exact tilings of a rectangular board with a catalog of
//! flat puzzle pieces, each placeable in two mirror faces and four 90 degree
//! rotations. The search is plain depth-first backtracking over board value
//! snapshots, pruned by a dead-region flood fill.

pub mod geometry;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod solver;
pub mod visualization;

pub use grid::Board;
pub use pieces::{Catalog, CatalogError, Piece, Puzzle, Shape};
