//! Pipeline stages of the tile-distributed eigenvalue solver
//!
//! The driver in [`eigh`] chains four stages, each a strict barrier for the
//! next:
//!
//! 1. [`reduce_band`] — Householder panel reduction of the Hermitian matrix
//!    to band form (bandwidth = tile size), in place
//! 2. [`gather`] — redistribution of the band values into a dedicated band
//!    container (data movement only, no numerical change)
//! 3. [`band_tridiag`] — Givens bulge-chasing reduction of the band to real
//!    symmetric tridiagonal form, in place
//! 4. [`tridiag_eig`] — implicit shifted QR iteration on the tridiagonal
//!    `(W, E)` vectors, eigenvalues only
//!
//! Stages never retry or fall back; the first error aborts the pipeline and
//! the caller must discard all outputs.

pub mod band_tridiag;
pub mod eigh;
pub mod gather;
pub mod reduce_band;
pub mod tridiag_eig;

pub use band_tridiag::{band_to_tridiag, extract_tridiag};
pub use eigh::{eigh_values, eigh_values_with, EighOptions};
pub use gather::gather_band;
pub use reduce_band::reduce_to_band;
pub use tridiag_eig::tridiag_eigenvalues;
