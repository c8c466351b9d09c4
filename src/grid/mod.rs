//! Process grid and tile ownership
//!
//! Every tile of a distributed matrix is owned by exactly one process. The
//! owner is computed by an injected `TileDistribution` rather than derived
//! from ambient process state, so algorithms can be unit-tested with a
//! single-process distribution and deployed with a 2-D block-cyclic one
//! without touching the tile containers.

use std::fmt;
use std::sync::Arc;

/// Maps a tile coordinate to the rank that owns it
///
/// Implementations must be pure: the same `(tile_row, tile_col)` always maps
/// to the same rank for the lifetime of a matrix. Algorithms query ownership
/// before scheduling any work on a tile and never touch tiles they do not
/// own except through the explicit redistribution stage.
pub trait TileDistribution: Send + Sync + fmt::Debug {
    /// Rank owning the tile at `(tile_row, tile_col)`
    fn owner(&self, tile_row: usize, tile_col: usize) -> usize;

    /// Number of ranks participating in this distribution
    fn num_ranks(&self) -> usize;
}

/// Shared handle to a distribution
pub type DistRef = Arc<dyn TileDistribution>;

/// A 2-D process grid of `rows x cols` ranks
///
/// Ranks are numbered row-major: the process at grid position `(r, c)` has
/// rank `r * cols + c`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcessGrid {
    /// Number of process rows
    pub rows: usize,
    /// Number of process columns
    pub cols: usize,
}

impl ProcessGrid {
    /// Create a grid; both dimensions must be nonzero
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "process grid must be nonempty");
        Self { rows, cols }
    }

    /// Total number of ranks in the grid
    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }
}

/// 2-D block-cyclic tile distribution over a process grid
///
/// Tile `(i, j)` belongs to the process at grid position
/// `(i mod rows, j mod cols)`. This is the standard dense-linear-algebra
/// layout: consecutive tile rows cycle through process rows, consecutive
/// tile columns through process columns.
#[derive(Clone, Debug)]
pub struct BlockCyclic {
    grid: ProcessGrid,
}

impl BlockCyclic {
    /// Create a block-cyclic distribution over `grid`
    pub fn new(grid: ProcessGrid) -> Self {
        Self { grid }
    }

    /// The underlying process grid
    pub fn grid(&self) -> ProcessGrid {
        self.grid
    }
}

impl TileDistribution for BlockCyclic {
    #[inline]
    fn owner(&self, tile_row: usize, tile_col: usize) -> usize {
        (tile_row % self.grid.rows) * self.grid.cols + (tile_col % self.grid.cols)
    }

    #[inline]
    fn num_ranks(&self) -> usize {
        self.grid.size()
    }
}

/// Trivial distribution: every tile is owned by rank 0
///
/// Used by unit tests and by the gathered band container, which lives
/// entirely on one rank after redistribution.
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleProcess;

impl TileDistribution for SingleProcess {
    #[inline]
    fn owner(&self, _tile_row: usize, _tile_col: usize) -> usize {
        0
    }

    #[inline]
    fn num_ranks(&self) -> usize {
        1
    }
}
