//! Hermitian (symmetric) tiled matrix, lower triangle stored

use super::panel::{PanelMut, PanelSeg};
use super::{Tile, TileMatrix};
use crate::dtype::Scalar;
use crate::grid::DistRef;

/// An n x n Hermitian matrix with only the lower-triangle tiles resident
///
/// Tile `(i, j)` exists only for `i >= j`; diagonal tiles are stored full
/// but only their lower part is meaningful. Element reads above the diagonal
/// mirror through the conjugate of the stored entry, so callers can treat
/// the container as a full matrix. For real scalars conjugation is the
/// identity and this is an ordinary symmetric matrix.
pub struct HermitianMatrix<T: Scalar> {
    store: TileMatrix<T>,
}

impl<T: Scalar> HermitianMatrix<T> {
    /// Create an empty n x n container
    pub fn new(n: usize, nb: usize, dist: DistRef, rank: usize) -> Self {
        Self {
            store: TileMatrix::new(n, n, nb, dist, rank),
        }
    }

    /// Matrix order
    #[inline]
    pub fn n(&self) -> usize {
        self.store.n()
    }

    /// Tile size
    #[inline]
    pub fn nb(&self) -> usize {
        self.store.nb()
    }

    /// Number of tile rows (== tile columns)
    #[inline]
    pub fn nt(&self) -> usize {
        self.store.nt()
    }

    /// Rows in tile row `i`
    #[inline]
    pub fn tile_mb(&self, i: usize) -> usize {
        self.store.tile_mb(i)
    }

    /// Columns in tile column `j`
    #[inline]
    pub fn tile_nb(&self, j: usize) -> usize {
        self.store.tile_nb(j)
    }

    /// This process's rank
    #[inline]
    pub fn rank(&self) -> usize {
        self.store.rank()
    }

    /// The injected distribution
    #[inline]
    pub fn dist(&self) -> &DistRef {
        self.store.dist()
    }

    /// Is lower-triangle tile `(i, j)` owned by this rank?
    #[inline]
    pub fn tile_is_local(&self, i: usize, j: usize) -> bool {
        debug_assert!(i >= j, "only lower-triangle tiles are stored");
        self.store.tile_is_local(i, j)
    }

    /// Allocate every lower-triangle tile this rank owns
    pub fn insert_local_tiles(&mut self) {
        for j in 0..self.store.nt() {
            for i in j..self.store.mt() {
                if self.store.tile_is_local(i, j) {
                    self.store.insert_tile(i, j);
                }
            }
        }
    }

    /// Borrow the local lower-triangle tile at `(i, j)`
    pub fn at(&self, i: usize, j: usize) -> &Tile<T> {
        assert!(i >= j, "only lower-triangle tiles are stored");
        self.store.at(i, j)
    }

    /// Mutably borrow the local lower-triangle tile at `(i, j)`
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut Tile<T> {
        assert!(i >= j, "only lower-triangle tiles are stored");
        self.store.at_mut(i, j)
    }

    /// Read element `(i, j)` anywhere in the logical matrix
    ///
    /// Upper-triangle reads return the conjugate of the stored mirror.
    pub fn get(&self, i: usize, j: usize) -> T {
        if i >= j {
            self.store.get(i, j)
        } else {
            self.store.get(j, i).conj()
        }
    }

    /// Write element `(i, j)`; upper-triangle writes store the conjugate
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        if i >= j {
            self.store.set(i, j, value);
        } else {
            self.store.set(j, i, value.conj());
        }
    }

    /// Copy global column `col`, rows `row_start..n`, into a dense vector
    ///
    /// The requested range must lie in the stored triangle
    /// (`row_start >= col`).
    pub fn column_segment(&self, col: usize, row_start: usize) -> Vec<T> {
        assert!(row_start >= col, "column segment crosses the diagonal");
        let mut v = Vec::with_capacity(self.n() - row_start);
        for i in row_start..self.n() {
            v.push(self.store.get(i, col));
        }
        v
    }

    /// Mutable panel view: tile column `block_col`, global rows
    /// `row_start..n`, global columns `col_start..` to the end of the tile
    /// column
    ///
    /// Every tile in the range must be local; the panel-locality
    /// precondition is enforced upstream by the process-grid choice and
    /// revalidated here by panicking on a non-resident tile.
    pub fn panel_mut(&mut self, block_col: usize, row_start: usize, col_start: usize) -> PanelMut<'_, T> {
        let nb = self.store.nb();
        assert!(
            row_start >= (block_col + 1) * nb,
            "panel must start below its diagonal tile"
        );
        debug_assert!(col_start >= block_col * nb);
        let col_off = col_start - block_col * nb;
        let cols = self.store.tile_nb(block_col).saturating_sub(col_off);
        let n_rows = self.store.m();
        let rank = self.store.rank();
        let first_block_row = row_start / nb;
        let mut segs = Vec::new();
        if row_start < n_rows {
            for (bi, tile) in self.store.block_col_tiles_mut(block_col, first_block_row) {
                let tile_top = bi * nb;
                let row_off = row_start.saturating_sub(tile_top);
                let rows = tile.mb() - row_off;
                segs.push(PanelSeg {
                    tile,
                    row_off,
                    rows,
                    col_off,
                    cols,
                });
            }
            let covered: usize = segs.iter().map(|s| s.rows).sum();
            assert!(
                covered == n_rows - row_start,
                "panel rows {}..{} not fully resident on rank {}",
                row_start,
                n_rows,
                rank
            );
        }
        PanelMut::from_segs(segs, cols)
    }

    /// Resident lower-triangle tiles with both block indices `>= min_block`,
    /// mutable
    pub fn trailing_tiles_mut(&mut self, min_block: usize) -> Vec<((usize, usize), &mut Tile<T>)> {
        self.store
            .local_tiles_mut()
            .filter(|((i, j), _)| *j >= min_block && *i >= *j)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex128;
    use crate::grid::SingleProcess;
    use std::sync::Arc;

    #[test]
    fn test_mirror_reads_conjugate() {
        let mut a = HermitianMatrix::<Complex128>::new(4, 2, Arc::new(SingleProcess), 0);
        a.insert_local_tiles();
        a.set(3, 1, Complex128::new(2.0, -5.0));
        assert_eq!(a.get(3, 1), Complex128::new(2.0, -5.0));
        assert_eq!(a.get(1, 3), Complex128::new(2.0, 5.0));
    }

    #[test]
    fn test_panel_view_covers_rows_below_diagonal_block() {
        let mut a = HermitianMatrix::<f64>::new(7, 3, Arc::new(SingleProcess), 0);
        a.insert_local_tiles();
        for i in 0..7 {
            for j in 0..=i {
                a.set(i, j, (10 * i + j) as f64);
            }
        }
        let panel = a.panel_mut(0, 3, 1);
        assert_eq!(panel.m(), 4);
        assert_eq!(panel.n(), 2);
        // first view element is A[3, 1]
        assert_eq!(panel.segs()[0].get(0, 0), 31.0);
        // last view element is A[6, 2]
        assert_eq!(panel.segs()[1].get(0, 1), 62.0);
    }

    #[test]
    fn test_column_segment_matches_elements() {
        let mut a = HermitianMatrix::<f64>::new(5, 2, Arc::new(SingleProcess), 0);
        a.insert_local_tiles();
        for i in 0..5 {
            for j in 0..=i {
                a.set(i, j, (i + 10 * j) as f64);
            }
        }
        assert_eq!(a.column_segment(1, 2), vec![12.0, 13.0, 14.0]);
    }
}
