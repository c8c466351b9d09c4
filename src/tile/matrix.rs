//! General tiled matrix container

use super::Tile;
use crate::dtype::Scalar;
use crate::grid::DistRef;
use std::collections::BTreeMap;

/// An m x n matrix partitioned into `nb x nb` tiles
///
/// Only tiles owned by this rank (per the injected distribution) are
/// resident; touching a non-local or missing tile panics. Tiles are kept in
/// an ordered map so every traversal of local tiles is deterministic.
pub struct TileMatrix<T: Scalar> {
    m: usize,
    n: usize,
    nb: usize,
    dist: DistRef,
    rank: usize,
    pub(crate) tiles: BTreeMap<(usize, usize), Tile<T>>,
}

impl<T: Scalar> TileMatrix<T> {
    /// Create an empty container; no tiles are allocated yet
    pub fn new(m: usize, n: usize, nb: usize, dist: DistRef, rank: usize) -> Self {
        assert!(nb > 0, "tile size must be nonzero");
        Self {
            m,
            n,
            nb,
            dist,
            rank,
            tiles: BTreeMap::new(),
        }
    }

    /// Global row count
    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Global column count
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Tile size
    #[inline]
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Number of tile rows
    #[inline]
    pub fn mt(&self) -> usize {
        self.m.div_ceil(self.nb)
    }

    /// Number of tile columns
    #[inline]
    pub fn nt(&self) -> usize {
        self.n.div_ceil(self.nb)
    }

    /// Rows in tile row `i` (ragged last row)
    #[inline]
    pub fn tile_mb(&self, i: usize) -> usize {
        debug_assert!(i < self.mt());
        (self.m - i * self.nb).min(self.nb)
    }

    /// Columns in tile column `j` (ragged last column)
    #[inline]
    pub fn tile_nb(&self, j: usize) -> usize {
        debug_assert!(j < self.nt());
        (self.n - j * self.nb).min(self.nb)
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

    /// The injected distribution
    #[inline]
    pub fn dist(&self) -> &DistRef {
        &self.dist
    }

    /// Allocate a zeroed tile at `(i, j)`; the tile must be local
    pub fn insert_tile(&mut self, i: usize, j: usize) {
        assert!(
            self.tile_is_local(i, j),
            "tile ({}, {}) is owned by rank {}, not rank {}",
            i,
            j,
            self.owner(i, j),
            self.rank
        );
        let (mb, nb) = (self.tile_mb(i), self.tile_nb(j));
        self.tiles.entry((i, j)).or_insert_with(|| Tile::zeroed(mb, nb));
    }

    /// Allocate every tile this rank owns
    pub fn insert_local_tiles(&mut self) {
        for i in 0..self.mt() {
            for j in 0..self.nt() {
                if self.tile_is_local(i, j) {
                    self.insert_tile(i, j);
                }
            }
        }
    }

    /// Is tile `(i, j)` resident?
    #[inline]
    pub fn has_tile(&self, i: usize, j: usize) -> bool {
        self.tiles.contains_key(&(i, j))
    }

    /// Borrow the local tile at `(i, j)`; panics if non-local or missing
    pub fn at(&self, i: usize, j: usize) -> &Tile<T> {
        self.tiles
            .get(&(i, j))
            .unwrap_or_else(|| panic!("tile ({}, {}) is not resident on rank {}", i, j, self.rank))
    }

    /// Mutably borrow the local tile at `(i, j)`; panics if non-local or missing
    pub fn at_mut(&mut self, i: usize, j: usize) -> &mut Tile<T> {
        let rank = self.rank;
        self.tiles
            .get_mut(&(i, j))
            .unwrap_or_else(|| panic!("tile ({}, {}) is not resident on rank {}", i, j, rank))
    }

    /// Read the global element `(i, j)`; its tile must be local
    pub fn get(&self, i: usize, j: usize) -> T {
        let (ti, tj) = (i / self.nb, j / self.nb);
        self.at(ti, tj).get(i - ti * self.nb, j - tj * self.nb)
    }

    /// Write the global element `(i, j)`; its tile must be local
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let (ti, tj) = (i / self.nb, j / self.nb);
        let nb = self.nb;
        self.at_mut(ti, tj).set(i - ti * nb, j - tj * nb, value);
    }

    /// Ordered traversal of resident tiles
    pub fn local_tiles(&self) -> impl Iterator<Item = ((usize, usize), &Tile<T>)> {
        self.tiles.iter().map(|(&k, t)| (k, t))
    }

    /// Ordered mutable traversal of resident tiles
    pub fn local_tiles_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut Tile<T>)> {
        self.tiles.iter_mut().map(|(&k, t)| (k, t))
    }

    /// Mutable traversal of one tile column, from `first_block_row` down
    pub fn block_col_tiles_mut(
        &mut self,
        col: usize,
        first_block_row: usize,
    ) -> impl Iterator<Item = (usize, &mut Tile<T>)> {
        self.tiles
            .iter_mut()
            .filter(move |((i, j), _)| *j == col && *i >= first_block_row)
            .map(|((i, _), t)| (*i, t))
    }
}
