//! Scalar-level kernels used by the host backend
//!
//! Reflector generation follows the LAPACK `larfg` conventions: the
//! reflector is `H = I − tau·v·v^H` with `v[0] = 1`, and `H^H` applied from
//! the left annihilates the tail of the source column. Real instantiations
//! make `H` symmetric and the conjugations vanish.

use crate::dtype::{RealScalar, Scalar};
use crate::tile::{PanelMut, PanelSeg};
use num_traits::Float;

/// Build a Householder reflector from a contiguous column
///
/// On entry `v` holds the column to annihilate. On exit `v[0]` holds the
/// resulting diagonal value `beta` (always real for a nonzero reflector),
/// `v[1..]` holds the reflector tail (the unit head is implicit), and the
/// returned `tau` defines `H = I − tau·v·v^H`.
///
/// A column whose tail is zero and whose head is real degenerates to the
/// identity: `tau = 0` and `v` is left unchanged.
pub fn householder<T: Scalar>(v: &mut [T]) -> T {
    if v.is_empty() {
        return T::zero();
    }
    let r_zero = T::Real::from_f64(0.0);
    let alpha = v[0];

    // two-pass scaled norm of the tail, immune to overflow
    let mut scale = r_zero;
    for x in &v[1..] {
        scale = scale.max(x.abs_val());
    }
    let mut xnorm = r_zero;
    if scale > r_zero {
        let mut ssq = r_zero;
        for x in &v[1..] {
            let t = x.abs_val() / scale;
            ssq = ssq + t * t;
        }
        xnorm = scale * ssq.sqrt();
    }

    let alphr = alpha.real();
    let head_is_real = alpha == T::from_real(alphr);
    if xnorm == r_zero && head_is_real {
        return T::zero();
    }

    let mut beta = alpha.abs_val().hypot(xnorm);
    if alphr >= r_zero {
        beta = -beta;
    }

    // tau = (beta − alpha) / beta, complex-aware
    let beta_t = T::from_real(beta);
    let tau = (beta_t - alpha) / beta_t;
    let inv = T::one() / (alpha - beta_t);
    for x in &mut v[1..] {
        *x = *x * inv;
    }
    v[0] = beta_t;
    tau
}

/// A Givens rotation `[c, s; −conj(s), c]` with real `c`
///
/// Applied from the left to `[f; g]` it yields `[r; 0]`.
#[derive(Copy, Clone, Debug)]
pub struct Givens<T: Scalar> {
    /// Cosine (real)
    pub c: T::Real,
    /// Sine
    pub s: T,
    /// The surviving value `r`
    pub r: T,
}

/// Compute the Givens rotation annihilating `g` against `f`
pub fn make_givens<T: Scalar>(f: T, g: T) -> Givens<T> {
    if g == T::zero() {
        return Givens {
            c: T::Real::from_f64(1.0),
            s: T::zero(),
            r: f,
        };
    }
    if f == T::zero() {
        let gabs = g.abs_val();
        return Givens {
            c: T::Real::from_f64(0.0),
            s: g.conj().scale(T::Real::from_f64(1.0) / gabs),
            r: T::from_real(gabs),
        };
    }
    let fabs = f.abs_val();
    let d = fabs.hypot(g.abs_val());
    let c = fabs / d;
    // unit phase of f carries into both s and r
    let fs = f.scale(T::Real::from_f64(1.0) / fabs);
    Givens {
        c,
        s: (fs * g.conj()).scale(T::Real::from_f64(1.0) / d),
        r: fs.scale(d),
    }
}

/// Copy column `col` of a panel view into a contiguous vector
///
/// Tiles are row-major, so this is the strided access path: within each
/// segment, consecutive column entries are `stride` elements apart.
pub fn copy_panel_column<T: Scalar>(panel: &PanelMut<'_, T>, col: usize, out: &mut Vec<T>) {
    out.clear();
    for seg in panel.segs() {
        for i in 0..seg.rows {
            out.push(seg.get(i, col));
        }
    }
}

/// `w ← [w +] (segment)^H · v_seg`, accumulating tile by tile
///
/// `first` selects zero-initialization (first row block) versus
/// accumulation (the rest), so the caller never pre-zeroes `w`.
pub fn gemv_conj_trans<T: Scalar>(seg: &PanelSeg<'_, T>, v_seg: &[T], w: &mut [T], first: bool) {
    debug_assert_eq!(v_seg.len(), seg.rows);
    debug_assert_eq!(w.len(), seg.cols);
    for j in 0..seg.cols {
        let mut acc = T::zero();
        for i in 0..seg.rows {
            acc = acc + seg.get(i, j).conj() * v_seg[i];
        }
        w[j] = if first { acc } else { w[j] + acc };
    }
}

/// Rank-1 update of one segment: `A ← A + alpha·x·y^H`
pub fn ger<T: Scalar>(alpha: T, x: &[T], y: &[T], seg: &mut PanelSeg<'_, T>) {
    debug_assert_eq!(x.len(), seg.rows);
    debug_assert_eq!(y.len(), seg.cols);
    for i in 0..seg.rows {
        let xi = alpha * x[i];
        for j in 0..seg.cols {
            let updated = seg.get(i, j) + xi * y[j].conj();
            seg.set(i, j, updated);
        }
    }
}
