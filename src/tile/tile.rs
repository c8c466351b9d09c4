//! A single matrix tile

use crate::dtype::Scalar;

/// One `mb x nb` tile, stored row-major in a contiguous buffer
///
/// Tiles are the unit of storage, ownership, and scheduling. A tile's shape
/// is fixed at insertion; any later disagreement between the tile and the
/// shape its container expects is a programming-contract violation and
/// panics rather than silently corrupting data.
#[derive(Clone, Debug)]
pub struct Tile<T> {
    mb: usize,
    nb: usize,
    data: Vec<T>,
}

impl<T: Scalar> Tile<T> {
    /// Allocate a zero-filled tile
    pub fn zeroed(mb: usize, nb: usize) -> Self {
        Self {
            mb,
            nb,
            data: vec![T::zero(); mb * nb],
        }
    }

    /// Number of rows
    #[inline]
    pub fn mb(&self) -> usize {
        self.mb
    }

    /// Number of columns
    #[inline]
    pub fn nb(&self) -> usize {
        self.nb
    }

    /// Distance between vertically adjacent elements in the buffer
    ///
    /// Row-major storage: a column walk is the strided access path.
    #[inline]
    pub fn stride(&self) -> usize {
        self.nb
    }

    /// Element at local `(i, j)`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        debug_assert!(i < self.mb && j < self.nb);
        self.data[i * self.nb + j]
    }

    /// Overwrite element at local `(i, j)`
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        debug_assert!(i < self.mb && j < self.nb);
        self.data[i * self.nb + j] = value;
    }

    /// Contiguous row slice
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.nb..(i + 1) * self.nb]
    }

    /// Mutable contiguous row slice
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.nb..(i + 1) * self.nb]
    }

    /// Whole buffer
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Whole buffer, mutable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Panic unless this tile has the given shape
    ///
    /// The write-acquire step of every kernel runs this over the tiles it is
    /// about to mutate; a malformed tile fails fast here.
    #[inline]
    pub fn require_shape(&self, mb: usize, nb: usize) {
        assert!(
            self.mb == mb && self.nb == nb && self.data.len() == mb * nb,
            "malformed tile: stored {}x{} (len {}), container expects {}x{}",
            self.mb,
            self.nb,
            self.data.len(),
            mb,
            nb,
        );
    }
}
