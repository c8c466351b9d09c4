//! Common test utilities
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::sync::Arc;
use teigr::dtype::Complex128;
use teigr::prelude::*;

/// Create a single-process Hermitian container with all tiles resident
pub fn local_hermitian<T: Scalar>(n: usize, nb: usize) -> HermitianMatrix<T> {
    let mut a = HermitianMatrix::new(n, nb, Arc::new(SingleProcess), 0);
    a.insert_local_tiles();
    a
}

/// Fill the lower triangle of `a` from a dense row-major matrix
pub fn fill_hermitian_f64(a: &mut HermitianMatrix<f64>, dense: &[f64], n: usize) {
    for i in 0..n {
        for j in 0..=i {
            a.set(i, j, dense[i * n + j]);
        }
    }
}

/// Seeded dense random symmetric matrix, row-major
pub fn random_symmetric(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let value: f64 = rng.sample(StandardNormal);
            a[i * n + j] = value;
            a[j * n + i] = value;
        }
    }
    a
}

/// Dense complex Hermitian matrix with a prescribed spectrum
///
/// Starts from `diag(eigs)` and applies seeded random unitary Givens
/// similarities, so the eigenvalues are exactly `eigs`.
pub fn hermitian_with_spectrum(n: usize, eigs: &[f64], seed: u64) -> Vec<Complex128> {
    assert_eq!(eigs.len(), n);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = vec![Complex128::ZERO; n * n];
    for (i, &lambda) in eigs.iter().enumerate() {
        a[i * n + i] = Complex128::new(lambda, 0.0);
    }
    for _ in 0..4 * n {
        let p = rng.gen_range(0..n);
        let mut q = rng.gen_range(0..n);
        while q == p {
            q = rng.gen_range(0..n);
        }
        let theta: f64 = rng.gen_range(0.0..std::f64::consts::PI);
        let phi: f64 = rng.gen_range(0.0..2.0 * std::f64::consts::PI);
        let c = theta.cos();
        let s = Complex128::from_polar(theta.sin(), phi);
        // rows: G acts on (p, q)
        for k in 0..n {
            let apk = a[p * n + k];
            let aqk = a[q * n + k];
            a[p * n + k] = apk.scale(c) + s * aqk;
            a[q * n + k] = -s.conj() * apk + aqk.scale(c);
        }
        // columns: G^H from the right
        for k in 0..n {
            let akp = a[k * n + p];
            let akq = a[k * n + q];
            a[k * n + p] = akp.scale(c) + akq * s.conj();
            a[k * n + q] = -s * akp + akq.scale(c);
        }
    }
    a
}

/// Dense real symmetric matrix with a prescribed spectrum
///
/// Same construction as [`hermitian_with_spectrum`], with real rotations.
pub fn symmetric_with_spectrum(n: usize, eigs: &[f64], seed: u64) -> Vec<f64> {
    assert_eq!(eigs.len(), n);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = vec![0.0; n * n];
    for (i, &lambda) in eigs.iter().enumerate() {
        a[i * n + i] = lambda;
    }
    for _ in 0..4 * n {
        let p = rng.gen_range(0..n);
        let mut q = rng.gen_range(0..n);
        while q == p {
            q = rng.gen_range(0..n);
        }
        let theta: f64 = rng.gen_range(0.0..std::f64::consts::PI);
        let (c, s) = (theta.cos(), theta.sin());
        for k in 0..n {
            let apk = a[p * n + k];
            let aqk = a[q * n + k];
            a[p * n + k] = c * apk + s * aqk;
            a[q * n + k] = -s * apk + c * aqk;
        }
        for k in 0..n {
            let akp = a[k * n + p];
            let akq = a[k * n + q];
            a[k * n + p] = c * akp + s * akq;
            a[k * n + q] = -s * akp + c * akq;
        }
    }
    a
}

/// Reference eigenvalues of a dense symmetric matrix via cyclic Jacobi,
/// ascending
pub fn jacobi_eigenvalues(mut a: Vec<f64>, n: usize) -> Vec<f64> {
    let norm: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    for _sweep in 0..60 {
        let mut off = 0.0;
        for p in 0..n {
            for q in p + 1..n {
                off += a[p * n + q] * a[p * n + q];
            }
        }
        if off.sqrt() <= 1e-14 * norm.max(1.0) {
            break;
        }
        for p in 0..n {
            for q in p + 1..n {
                let apq = a[p * n + q];
                if apq.abs() < 1e-300 {
                    continue;
                }
                // numerically stable rotation (LAPACK formula)
                let tau = (a[q * n + q] - a[p * n + p]) / (2.0 * apq);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;
                // A <- J^T A J with J = [[c, s], [-s, c]] on columns (p, q)
                for k in 0..n {
                    let akp = a[k * n + p];
                    let akq = a[k * n + q];
                    a[k * n + p] = c * akp - s * akq;
                    a[k * n + q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p * n + k];
                    let aqk = a[q * n + k];
                    a[p * n + k] = c * apk - s * aqk;
                    a[q * n + k] = s * apk + c * aqk;
                }
            }
        }
    }
    let mut eigs: Vec<f64> = (0..n).map(|i| a[i * n + i]).collect();
    eigs.sort_by(|x, y| x.partial_cmp(y).unwrap());
    eigs
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}
