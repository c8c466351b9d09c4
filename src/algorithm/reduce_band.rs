//! Panel reduction: Hermitian to band form
//!
//! Processes tile columns left to right. For tile column `k`, the panel is
//! the block column below the diagonal tile; an unblocked QR of that panel
//! (one elimination-kernel call per column) annihilates everything below
//! the first sub-diagonal block, then each reflector is applied two-sidedly
//! to the trailing Hermitian submatrix. The strict left-to-right dependency
//! chain means parallelism lives inside each panel elimination and trailing
//! update, not across panels.
//!
//! On return the matrix holds the band form (bandwidth = tile size) in its
//! band positions; the annihilated positions below the band hold the
//! Householder reflector tails, geqr2-style. Eigenvalues-only callers never
//! read those tails again — the gather stage copies band positions only.

use crate::dtype::Scalar;
use crate::error::Result;
use crate::runtime::TargetBackend;
use crate::tile::HermitianMatrix;

/// Reduce `a` to band form in place
///
/// `lookahead` is the pipeline-depth hint: a nonzero value raises the
/// priority of panel-path work units over trailing updates, shortening the
/// critical path once stages overlap. It never changes the result.
pub fn reduce_to_band<T: Scalar>(
    a: &mut HermitianMatrix<T>,
    backend: &dyn TargetBackend<T>,
    lookahead: usize,
) -> Result<()> {
    let n = a.n();
    let nb = a.nb();
    let nt = a.nt();
    let panel_priority = if lookahead > 0 { 1 } else { 0 };

    for k in 0..nt {
        let panel_top = (k + 1) * nb;
        if panel_top >= n {
            break;
        }
        let m_panel = n - panel_top;
        let steps = a.tile_nb(k).min(m_panel);

        // unblocked panel QR: eliminate column j below panel row j
        let mut taus = Vec::with_capacity(steps);
        for j in 0..steps {
            let mut panel = a.panel_mut(k, panel_top + j, k * nb + j);
            let tau = backend.eliminate_panel(&mut panel, panel_priority)?;
            taus.push(tau);
        }

        // two-sided application of the panel's reflectors to the trailing
        // submatrix, in factorization order
        for (j, tau) in taus.into_iter().enumerate() {
            if tau == T::zero() {
                continue;
            }
            // v spans the trailing rows: j leading zeros, unit head, then
            // the tail stored below the eliminated column
            let mut v = vec![T::zero(); m_panel];
            v[j] = T::one();
            let tail = a.column_segment(k * nb + j, panel_top + j + 1);
            v[j + 1..].copy_from_slice(&tail);
            backend.apply_trailing_update(a, k + 1, &v, tau, 0)?;
        }
    }
    Ok(())
}
