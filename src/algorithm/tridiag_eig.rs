//! Tridiagonal eigenvalue iteration
//!
//! Implicit Wilkinson-shifted QR on the symmetric tridiagonal `(diag,
//! offdiag)` pair, eigenvalues only. Off-diagonal entries below the
//! deflation threshold are zeroed; the active window shrinks from the
//! bottom as entries deflate, and each sweep chases one implicit-shift
//! bulge through the window with Givens rotations. The iteration budget is
//! `30 n` sweeps; exhausting it is a fatal non-convergence error, never a
//! truncated result.

use crate::dtype::RealScalar;
use crate::error::{Error, Result};
use crate::runtime::host::kernels::make_givens;

/// Overwrite `diag` with the eigenvalues of the tridiagonal matrix, sorted
/// ascending
///
/// `offdiag` is consumed as workspace. `epsilon` scales the deflation
/// threshold; machine epsilon is the conventional choice, and the value is
/// surfaced as configuration because no single threshold suits every
/// spectrum.
pub fn tridiag_eigenvalues<R: RealScalar>(
    diag: &mut [R],
    offdiag: &mut [R],
    epsilon: R,
) -> Result<()> {
    let n = diag.len();
    assert_eq!(
        offdiag.len(),
        n.saturating_sub(1),
        "off-diagonal length must be n - 1"
    );
    if n <= 1 {
        return Ok(());
    }

    let zero = R::from_f64(0.0);
    let half = R::from_f64(0.5);
    let consider_zero = R::min_positive_value();
    let max_iter = 30 * n;
    let mut iter = 0usize;

    let mut end = n - 1;
    let mut start = 0;

    while end > 0 {
        // deflate negligible off-diagonals (scale-homogeneous criterion)
        for i in start..end {
            let threshold = epsilon * (diag[i].abs().sqrt() * diag[i + 1].abs().sqrt());
            if offdiag[i].abs() < consider_zero || offdiag[i].abs() <= threshold {
                offdiag[i] = zero;
            }
        }
        while end > 0 && offdiag[end - 1] == zero {
            end -= 1;
        }
        if end == 0 {
            break;
        }

        iter += 1;
        if iter > max_iter {
            let remaining = offdiag[..end].iter().filter(|e| **e != zero).count();
            return Err(Error::NonConvergence {
                iterations: max_iter,
                remaining,
            });
        }

        start = end - 1;
        while start > 0 && offdiag[start - 1] != zero {
            start -= 1;
        }

        // Wilkinson shift from the trailing 2x2 block
        let td = (diag[end - 1] - diag[end]) * half;
        let e = offdiag[end - 1];
        let mut mu = diag[end];
        if td == zero {
            mu = mu - e.abs();
        } else if e != zero {
            let e2 = e * e;
            let h = td.hypot(e);
            let h = if td > zero { h } else { -h };
            if e2 == zero {
                mu = mu - e / ((td + h) / e);
            } else {
                mu = mu - e2 / (td + h);
            }
        }

        // one implicit QR sweep over the active window
        let mut x = diag[start] - mu;
        let mut z = offdiag[start];
        let mut k = start;
        while k < end && z != zero {
            let rot = make_givens(x, z);
            let (c, s) = (rot.c, rot.s);

            // T ← G T Gᵗ on the (k, k+1) plane
            let a = diag[k];
            let b = offdiag[k];
            let d = diag[k + 1];
            diag[k] = c * c * a + R::from_f64(2.0) * c * s * b + s * s * d;
            diag[k + 1] = s * s * a - R::from_f64(2.0) * c * s * b + c * c * d;
            offdiag[k] = (c * c - s * s) * b + c * s * (d - a);
            if k > start {
                offdiag[k - 1] = c * offdiag[k - 1] + s * z;
            }
            x = offdiag[k];
            if k < end - 1 {
                z = s * offdiag[k + 1];
                offdiag[k + 1] = c * offdiag[k + 1];
            }
            k += 1;
        }
    }

    // ascending selection sort; eigenvalues only, so no columns move with
    // the swaps
    for i in 0..n - 1 {
        let mut min_idx = i;
        for k in i + 1..n {
            if diag[k] < diag[min_idx] {
                min_idx = k;
            }
        }
        if min_idx > i {
            diag.swap(i, min_idx);
        }
    }
    Ok(())
}
