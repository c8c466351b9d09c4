//! Hermitian band matrix, one tile of bandwidth each side of the diagonal

use super::Tile;
use crate::dtype::Scalar;
use crate::grid::DistRef;
use std::collections::BTreeMap;

/// An n x n Hermitian band matrix with bandwidth `kd`, lower storage
///
/// Resident tiles are the diagonal blocks `(k, k)` and first sub-diagonal
/// blocks `(k+1, k)`; with `kd <= nb` every element of the band falls into
/// one of those two blocks, and exactly one of them. The container is the
/// destination of the redistribution stage and the workspace of the
/// band-to-tridiagonal stage.
pub struct BandMatrix<T: Scalar> {
    n: usize,
    kd: usize,
    nb: usize,
    dist: DistRef,
    rank: usize,
    tiles: BTreeMap<(usize, usize), Tile<T>>,
}

impl<T: Scalar> BandMatrix<T> {
    /// Create an empty band container
    pub fn new(n: usize, kd: usize, nb: usize, dist: DistRef, rank: usize) -> Self {
        assert!(nb > 0, "tile size must be nonzero");
        assert!(
            kd <= nb,
            "bandwidth {} exceeds the one-tile band this container stores (nb = {})",
            kd,
            nb
        );
        Self {
            n,
            kd,
            nb,
            dist,
            rank,
            tiles: BTreeMap::new(),
        }
    }

    /// Matrix order
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Bandwidth (number of sub-diagonals that may be nonzero)
    #[inline]
    pub fn kd(&self) -> usize {
        self.kd
    }

    /// Tile size
    #[inline]
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Number of tile rows (== tile columns)
    #[inline]
    pub fn nt(&self) -> usize {
        self.n.div_ceil(self.nb)
    }

    /// Rows in tile row `i`
    #[inline]
    pub fn tile_mb(&self, i: usize) -> usize {
        debug_assert!(i < self.nt());
        (self.n - i * self.nb).min(self.nb)
    }

    /// Rank owning tile `(i, j)`
    #[inline]
    pub fn owner(&self, i: usize, j: usize) -> usize {
        self.dist.owner(i, j)
    }

    /// Is tile `(i, j)` owned by this rank?
    #[inline]
    pub fn tile_is_local(&self, i: usize, j: usize) -> bool {
        self.owner(i, j) == self.rank
    }

    /// This process's rank
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Does `(i, j)` lie inside the stored band (lower triangle)?
    #[inline]
    pub fn in_band(&self, i: usize, j: usize) -> bool {
        i >= j && i - j <= self.kd
    }

    /// Tile coordinates of the in-band element `(i, j)` with `i >= j`
    #[inline]
    fn locate(&self, i: usize, j: usize) -> (usize, usize) {
        debug_assert!(self.in_band(i, j));
        (i / self.nb, j / self.nb)
    }

    /// Allocate every band tile this rank owns
    pub fn insert_local_tiles(&mut self) {
        for k in 0..self.nt() {
            if self.tile_is_local(k, k) {
                let mb = self.tile_mb(k);
                self.tiles.entry((k, k)).or_insert_with(|| Tile::zeroed(mb, mb));
            }
            if k + 1 < self.nt() && self.tile_is_local(k + 1, k) {
                let mb = self.tile_mb(k + 1);
                let nb = self.tile_mb(k);
                self.tiles
                    .entry((k + 1, k))
                    .or_insert_with(|| Tile::zeroed(mb, nb));
            }
        }
    }

    /// Borrow the local band tile at `(i, j)`; panics if non-local or missing
    pub fn at(&self, i: usize, j: usize) -> &Tile<T> {
        self.tiles
            .get(&(i, j))
            .unwrap_or_else(|| panic!("band tile ({}, {}) is not resident on rank {}", i, j, self.rank))
    }

    /// Mutably borrow the local band tile at `(i, j)`
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut Tile<T> {
        let rank = self.rank;
        self.tiles
            .get_mut(&(i, j))
            .unwrap_or_else(|| panic!("band tile ({}, {}) is not resident on rank {}", i, j, rank))
    }

    /// Read element `(i, j)`; mirror reads conjugate, out-of-band reads are
    /// zero
    pub fn get(&self, i: usize, j: usize) -> T {
        if i < j {
            return self.get(j, i).conj();
        }
        if i - j > self.kd {
            return T::zero();
        }
        let (ti, tj) = self.locate(i, j);
        self.at(ti, tj).get(i - ti * self.nb, j - tj * self.nb)
    }

    /// Write element `(i, j)` inside the band; mirror writes conjugate
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        if i < j {
            return self.set(j, i, value.conj());
        }
        assert!(
            i - j <= self.kd,
            "element ({}, {}) outside bandwidth {}",
            i,
            j,
            self.kd
        );
        let (ti, tj) = self.locate(i, j);
        let nb = self.nb;
        self.at_mut(ti, tj).set(i - ti * nb, j - tj * nb, value);
    }
}
