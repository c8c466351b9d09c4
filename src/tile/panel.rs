//! Borrowing panel view
//!
//! A panel is a one-tile-wide slice of a matrix undergoing one elimination
//! step. The view addresses a scalar sub-range of the tile column, so the
//! same kernel serves both whole-tile panels and the shifted sub-panels of
//! an unblocked panel factorization.

use super::Tile;
use crate::dtype::Scalar;

/// The part of a panel view that lives in one tile
///
/// Rows `row_off .. row_off + rows` and columns `col_off .. col_off + cols`
/// of the borrowed tile belong to the view. Segments borrow disjoint tiles,
/// so a task batch may hand each segment to a different worker.
pub struct PanelSeg<'a, T: Scalar> {
    /// The borrowed tile
    pub tile: &'a mut Tile<T>,
    /// First tile row inside the view
    pub row_off: usize,
    /// View rows in this tile
    pub rows: usize,
    /// First tile column inside the view
    pub col_off: usize,
    /// View columns (same for every segment of a panel)
    pub cols: usize,
}

impl<T: Scalar> PanelSeg<'_, T> {
    /// Element at view-local `(i, j)` within this segment
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.rows && j < self.cols);
        self.tile.get(self.row_off + i, self.col_off + j)
    }

    /// Overwrite element at view-local `(i, j)` within this segment
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        debug_assert!(i < self.rows && j < self.cols);
        self.tile.set(self.row_off + i, self.col_off + j, value);
    }
}

/// Mutable view of a tile-distributed panel
///
/// Segments are ordered top to bottom; view row `r` of the panel lives in
/// the first segment whose cumulative row count exceeds `r`. An empty view
/// (zero rows or zero columns) is legal and makes every kernel a no-op.
pub struct PanelMut<'a, T: Scalar> {
    segs: Vec<PanelSeg<'a, T>>,
    m: usize,
    n: usize,
}

impl<'a, T: Scalar> PanelMut<'a, T> {
    /// Assemble a view from per-tile segments (top to bottom)
    pub fn from_segs(segs: Vec<PanelSeg<'a, T>>, n: usize) -> Self {
        let m = segs.iter().map(|s| s.rows).sum();
        debug_assert!(segs.iter().all(|s| s.cols == n));
        Self { segs, m, n }
    }

    /// Total view rows
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// View columns
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// True when the view covers no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.m == 0 || self.n == 0
    }

    /// Segments, top to bottom
    #[inline]
    pub fn segs(&self) -> &[PanelSeg<'a, T>] {
        &self.segs
    }

    /// Segments, mutable
    #[inline]
    pub fn segs_mut(&mut self) -> &mut [PanelSeg<'a, T>] {
        &mut self.segs
    }
}
