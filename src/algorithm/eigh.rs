//! Pipeline driver: Hermitian eigenvalues
//!
//! The driver walks a fixed state chain —
//! `Start → PanelReduced → Gathered → Tridiagonalized →
//! EigenvaluesComputed` — with one stage call per transition. No transition
//! is skipped or reordered; the first failing stage aborts the whole
//! invocation and leaves the matrix and output vector unspecified and
//! non-reusable.

use super::{band_to_tridiag, extract_tridiag, gather_band, reduce_to_band, tridiag_eigenvalues};
use crate::comm::{Communicator, LocalComm};
use crate::dtype::{RealScalar, Scalar};
use crate::error::{Error, Result};
use num_traits::Float;
use crate::grid::SingleProcess;
use crate::runtime::{backend_for, Target};
use crate::tile::{BandMatrix, HermitianMatrix};
use std::sync::Arc;

/// Options for [`eigh_values`]
///
/// Defaults follow the host backend; every field has a safe
/// implementation-defined fallback, so `EighOptions::default()` is a valid
/// configuration.
#[derive(Clone, Debug)]
pub struct EighOptions {
    /// Execution backend for tile operations
    pub target: Target,
    /// Pipeline-depth hint; nonzero values prioritize panel-path work
    /// units over trailing updates (advisory, never changes results)
    pub lookahead: usize,
    /// Concurrency cap for panel-local work; `None` shares the global pool
    pub max_panel_threads: Option<usize>,
    /// Sub-tile blocking factor for panel reduction; the host backend's
    /// unblocked elimination accepts but does not exploit it (reserved for
    /// blocked and accelerator paths)
    pub inner_blocking: usize,
    /// Deflation threshold scale for the final iteration, as a multiple of
    /// one; `None` uses machine epsilon of the real scalar type
    pub deflation_epsilon: Option<f64>,
}

impl Default for EighOptions {
    fn default() -> Self {
        Self {
            target: Target::HostTask,
            lookahead: 1,
            max_panel_threads: None,
            inner_blocking: 16,
            deflation_epsilon: None,
        }
    }
}

/// Compute the eigenvalues of a Hermitian tiled matrix, single process
///
/// `a` is destroyed (it ends up holding the band form plus reflector
/// tails); `w` is resized to `n` and overwritten with the eigenvalues in
/// ascending order. See [`eigh_values_with`] for the transport-aware entry
/// point.
pub fn eigh_values<T: Scalar>(
    a: &mut HermitianMatrix<T>,
    w: &mut Vec<T::Real>,
    opts: &EighOptions,
) -> Result<()> {
    eigh_values_with(a, w, opts, &LocalComm)
}

/// Compute the eigenvalues of a Hermitian tiled matrix
///
/// Every rank of `comm` must call this collectively with the same options.
/// The band is gathered to rank 0, reduced there, and iterated there; with
/// a single-process communicator everything is local.
pub fn eigh_values_with<T: Scalar>(
    a: &mut HermitianMatrix<T>,
    w: &mut Vec<T::Real>,
    opts: &EighOptions,
    comm: &dyn Communicator,
) -> Result<()> {
    if opts.inner_blocking == 0 {
        return Err(Error::invalid_argument(
            "inner_blocking",
            "blocking factor must be at least 1",
        ));
    }
    let n = a.n();
    let nb = a.nb();
    let backend = backend_for::<T>(opts.target, opts.max_panel_threads)?;

    w.clear();
    w.resize(n, T::Real::from_f64(0.0));
    if n == 0 {
        return Ok(());
    }

    // Start → PanelReduced
    reduce_to_band(a, backend.as_ref(), opts.lookahead)?;

    // PanelReduced → Gathered
    let kd = nb.min(n - 1);
    let mut band = BandMatrix::<T>::new(n, kd, nb, Arc::new(SingleProcess), comm.rank());
    band.insert_local_tiles();
    gather_band(a, &mut band, comm)?;

    // Gathered → Tridiagonalized
    band_to_tridiag(&mut band)?;

    // Tridiagonalized → EigenvaluesComputed. The serial tail runs where
    // the band resides; replicating W to the other ranks is the caller's
    // transport's job.
    if (0..band.nt()).all(|k| band.tile_is_local(k, k)) {
        let mut e = vec![T::Real::from_f64(0.0); n - 1];
        extract_tridiag(&band, w, &mut e);
        let epsilon = match opts.deflation_epsilon {
            Some(value) => T::Real::from_f64(value),
            None => T::Real::epsilon(),
        };
        tridiag_eigenvalues(w, &mut e, epsilon)?;
    }
    Ok(())
}
