//! Band to symmetric tridiagonal reduction
//!
//! Rutishauser-style elimination: the outermost sub-diagonals are removed
//! one at a time with Givens rotations; each annihilation spawns a bulge
//! one position outside the current band, which is chased down and off the
//! matrix before the next element is touched. Rotations are unitary
//! similarities, so the spectrum is untouched; for complex Hermitian input
//! the diagonal stays real and the off-diagonal phases are absorbed at
//! extraction time.
//!
//! The reduction runs on a compact lower-band copy of the container (one
//! extra diagonal holds the transient bulge) and writes the tridiagonal
//! result back, leaving the container reduced in place from the caller's
//! point of view.

use crate::dtype::Scalar;
use crate::error::Result;
use crate::runtime::host::kernels::make_givens;
use crate::tile::BandMatrix;

/// Compact lower-band element: `ab[d][j]` holds `A[j + d][j]`
#[inline]
fn bget<T: Scalar>(ab: &[Vec<T>], i: usize, j: usize) -> T {
    if i >= j {
        if i - j < ab.len() {
            ab[i - j][j]
        } else {
            T::zero()
        }
    } else {
        bget(ab, j, i).conj()
    }
}

#[inline]
fn bset<T: Scalar>(ab: &mut [Vec<T>], i: usize, j: usize, value: T) {
    if i >= j {
        debug_assert!(i - j < ab.len(), "write outside the working band");
        ab[i - j][j] = value;
    } else {
        bset(ab, j, i, value.conj());
    }
}

/// Reduce the band container to tridiagonal form in place
pub fn band_to_tridiag<T: Scalar>(band: &mut BandMatrix<T>) -> Result<()> {
    let n = band.n();
    if n == 0 {
        return Ok(());
    }
    let kd = band.kd().min(n - 1);
    if kd <= 1 {
        return Ok(());
    }

    // collective shape: a rank holding no band tiles makes the same call
    // and returns without touching data
    let nt = band.nt();
    let holds_any = (0..nt).any(|k| band.tile_is_local(k, k))
        || (0..nt.saturating_sub(1)).any(|k| band.tile_is_local(k + 1, k));
    if !holds_any {
        return Ok(());
    }
    let holds_all = (0..nt).all(|k| band.tile_is_local(k, k))
        && (0..nt.saturating_sub(1)).all(|k| band.tile_is_local(k + 1, k));
    assert!(
        holds_all,
        "band-to-tridiagonal reduction requires the whole band on one rank"
    );

    // compact working copy, one spare diagonal for the bulge
    let mut ab: Vec<Vec<T>> = (0..=kd + 1).map(|_| vec![T::zero(); n]).collect();
    for j in 0..n {
        for d in 0..=kd.min(n - 1 - j) {
            ab[d][j] = band.get(j + d, j);
        }
    }

    for bw in (2..=kd).rev() {
        for j in 0..n - bw {
            // annihilate A[j + bw][j], then chase the bulge down
            let mut r = j + bw;
            let mut c = j;
            loop {
                let g = bget(&ab, r, c);
                if g == T::zero() {
                    break;
                }
                let f = bget(&ab, r - 1, c);
                let rot = make_givens(f, g);
                bset(&mut ab, r - 1, c, rot.r);
                bset(&mut ab, r, c, T::zero());
                rotate_two_sided(&mut ab, r - 1, r, rot.c, rot.s, c, bw, n);
                if r + bw >= n {
                    break;
                }
                // the rotation filled A[r + bw][r - 1]; that is the next target
                c = r - 1;
                r += bw;
            }
        }
    }

    // write the reduced band back into the container
    for k in 0..band.nt() {
        for x in band.at_mut(k, k).data_mut() {
            *x = T::zero();
        }
        if k + 1 < band.nt() {
            for x in band.at_mut(k + 1, k).data_mut() {
                *x = T::zero();
            }
        }
    }
    for j in 0..n {
        band.set(j, j, ab[0][j]);
        if j + 1 < n {
            band.set(j + 1, j, ab[1][j]);
        }
    }
    Ok(())
}

/// Apply `A ← G A G^H` for the rotation `G = [c, s; −conj(s), c]` acting on
/// rows/columns `(p, q)`, `q = p + 1`
///
/// `skip_col` is the column whose pair was already set explicitly by the
/// caller (the annihilated element and its survivor). `bw` bounds the
/// nonzero extent of the working band, bulge included.
fn rotate_two_sided<T: Scalar>(
    ab: &mut [Vec<T>],
    p: usize,
    q: usize,
    c: T::Real,
    s: T,
    skip_col: usize,
    bw: usize,
    n: usize,
) {
    // rows p and q across columns left of the pair
    let lo = q.saturating_sub(bw + 1);
    for jj in lo..p {
        if jj == skip_col {
            continue;
        }
        let apj = bget(ab, p, jj);
        let aqj = bget(ab, q, jj);
        bset(ab, p, jj, apj.scale(c) + s * aqj);
        bset(ab, q, jj, -s.conj() * apj + aqj.scale(c));
    }

    // the 2x2 pivot block, both sides
    let a_pp = bget(ab, p, p);
    let a_qp = bget(ab, q, p);
    let a_qq = bget(ab, q, q);
    let t_pp = a_pp.scale(c) + s * a_qp;
    let t_pq = a_qp.conj().scale(c) + s * a_qq;
    let t_qp = -s.conj() * a_pp + a_qp.scale(c);
    let t_qq = -s.conj() * a_qp.conj() + a_qq.scale(c);
    bset(ab, p, p, t_pp.scale(c) + t_pq * s.conj());
    bset(ab, q, p, t_qp.scale(c) + t_qq * s.conj());
    bset(ab, q, q, -s * t_qp + t_qq.scale(c));

    // columns p and q across rows below the pair
    let hi = (q + bw + 1).min(n);
    for ii in q + 1..hi {
        let aip = bget(ab, ii, p);
        let aiq = bget(ab, ii, q);
        bset(ab, ii, p, aip.scale(c) + aiq * s.conj());
        bset(ab, ii, q, -s * aip + aiq.scale(c));
    }
}

/// Extract the tridiagonal vectors from a reduced band container
///
/// `diag[i] = Re A[i][i]` and `offdiag[i] = |A[i+1][i]|`: taking the
/// modulus applies the diagonal phase similarity that makes a Hermitian
/// tridiagonal matrix real without changing its spectrum.
pub fn extract_tridiag<T: Scalar>(band: &BandMatrix<T>, diag: &mut [T::Real], offdiag: &mut [T::Real]) {
    let n = band.n();
    assert_eq!(diag.len(), n, "diagonal vector must have length n");
    assert_eq!(
        offdiag.len(),
        n.saturating_sub(1),
        "off-diagonal vector must have length n - 1"
    );
    for i in 0..n {
        diag[i] = band.get(i, i).real();
        if i + 1 < n {
            offdiag[i] = band.get(i + 1, i).abs_val();
        }
    }
}
