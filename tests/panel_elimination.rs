//! Integration tests for the panel elimination kernel
//!
//! Tests verify:
//! - The leading column is annihilated: |beta| equals the column norm and
//!   reapplying the stored reflector reproduces beta * e0
//! - The rank-1 trailing update preserves the panel's Frobenius norm
//! - A zero column degenerates to the identity (tau = 0, panel untouched)
//! - Priority hints never change the numerical outcome

use teigr::dtype::Complex128;
use teigr::prelude::*;
use teigr::runtime::HostTaskBackend;

mod common;
use common::*;

fn backend() -> HostTaskBackend {
    HostTaskBackend::new(None).unwrap()
}

/// Panel state flattened to a dense column-major-by-rows copy
fn panel_snapshot(a: &HermitianMatrix<f64>, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) -> Vec<f64> {
    let mut out = Vec::new();
    for i in rows {
        for j in cols.clone() {
            out.push(a.get(i, j));
        }
    }
    out
}

#[test]
fn test_leading_column_annihilated() {
    let n = 9;
    let nb = 3;
    let dense = random_symmetric(n, 3);
    let mut a = local_hermitian::<f64>(n, nb);
    fill_hermitian_f64(&mut a, &dense, n);

    // original leading panel column A[3.., 0]
    let x: Vec<f64> = (nb..n).map(|i| dense[i * n]).collect();
    let x_norm: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();

    let be = backend();
    let tau = {
        let mut panel = a.panel_mut(0, nb, 0);
        be.eliminate_panel(&mut panel, 0).unwrap()
    };

    // head of the eliminated column now holds beta with |beta| = ||x||
    let beta = a.get(nb, 0);
    assert!((beta.abs() - x_norm).abs() < 1e-13 * x_norm.max(1.0));

    // H^H x = beta e0 for the stored reflector
    let mut v = vec![1.0];
    v.extend((nb + 1..n).map(|i| a.get(i, 0)));
    let dot: f64 = v.iter().zip(&x).map(|(vi, xi)| vi * xi).sum();
    for (k, (xi, vi)) in x.iter().zip(&v).enumerate() {
        let hx = xi - tau * dot * vi;
        let expect = if k == 0 { beta } else { 0.0 };
        assert!(
            (hx - expect).abs() < 1e-13 * x_norm.max(1.0),
            "row {}: {} vs {}",
            k,
            hx,
            expect
        );
    }
}

#[test]
fn test_trailing_update_preserves_frobenius_norm() {
    let n = 10;
    let nb = 4;
    let dense = random_symmetric(n, 9);
    let mut a = local_hermitian::<f64>(n, nb);
    fill_hermitian_f64(&mut a, &dense, n);

    let before = panel_snapshot(&a, nb..n, 0..nb);
    let norm_before: f64 = before.iter().map(|v| v * v).sum::<f64>().sqrt();

    let be = backend();
    let beta = {
        let mut panel = a.panel_mut(0, nb, 0);
        be.eliminate_panel(&mut panel, 0).unwrap();
        a.get(nb, 0)
    };

    // the eliminated column is logically [beta, 0, ..]; the stored tail is
    // reflector bookkeeping, not matrix data
    let mut norm_after_sq = beta * beta;
    for i in nb..n {
        for j in 1..nb {
            let value = a.get(i, j);
            norm_after_sq += value * value;
        }
    }
    let norm_after = norm_after_sq.sqrt();
    assert!(
        (norm_before - norm_after).abs() < 1e-12 * norm_before,
        "Frobenius norm drifted: {} vs {}",
        norm_before,
        norm_after
    );
}

#[test]
fn test_zero_column_degenerates_to_identity() {
    let n = 8;
    let nb = 2;
    let dense = random_symmetric(n, 13);
    let mut a = local_hermitian::<f64>(n, nb);
    fill_hermitian_f64(&mut a, &dense, n);
    // zero the leading panel column
    for i in nb..n {
        a.set(i, 0, 0.0);
    }
    let before = panel_snapshot(&a, nb..n, 0..nb);

    let be = backend();
    let tau = {
        let mut panel = a.panel_mut(0, nb, 0);
        be.eliminate_panel(&mut panel, 0).unwrap()
    };

    assert_eq!(tau, 0.0);
    let after = panel_snapshot(&a, nb..n, 0..nb);
    assert_eq!(before, after, "degenerate panel must be left unchanged");
}

#[test]
fn test_single_column_panel() {
    // M x 1 panel: the kernel reduces to plain reflector generation
    let n = 7;
    let nb = 1;
    let dense = random_symmetric(n, 21);
    let mut a = local_hermitian::<f64>(n, nb);
    fill_hermitian_f64(&mut a, &dense, n);

    let x: Vec<f64> = (1..n).map(|i| dense[i * n]).collect();
    let x_norm: f64 = x.iter().map(|v| v * v).sum::<f64>().sqrt();

    let be = backend();
    let mut panel = a.panel_mut(0, 1, 0);
    assert_eq!(panel.n(), 1);
    be.eliminate_panel(&mut panel, 0).unwrap();
    drop(panel);

    assert!((a.get(1, 0).abs() - x_norm).abs() < 1e-13 * x_norm.max(1.0));
}

#[test]
fn test_priority_does_not_change_outcome() {
    let n = 12;
    let nb = 3;
    let dense = random_symmetric(n, 29);
    let mut snapshots = Vec::new();

    for priority in [0, 1, 100] {
        let mut a = local_hermitian::<f64>(n, nb);
        fill_hermitian_f64(&mut a, &dense, n);
        let be = backend();
        let mut panel = a.panel_mut(0, nb, 0);
        be.eliminate_panel(&mut panel, priority).unwrap();
        drop(panel);
        let bits: Vec<u64> = panel_snapshot(&a, nb..n, 0..nb)
            .iter()
            .map(|x| x.to_bits())
            .collect();
        snapshots.push(bits);
    }
    assert_eq!(snapshots[0], snapshots[1]);
    assert_eq!(snapshots[1], snapshots[2]);
}

#[test]
fn test_complex_elimination_norm_preserved() {
    let n = 6;
    let nb = 2;
    let eigs = [1.0, -2.0, 0.5, 3.0, -1.0, 2.0];
    let dense = hermitian_with_spectrum(n, &eigs, 31);
    let mut a: HermitianMatrix<Complex128> = local_hermitian(n, nb);
    for i in 0..n {
        for j in 0..=i {
            a.set(i, j, dense[i * n + j]);
        }
    }

    let x: Vec<Complex128> = (nb..n).map(|i| dense[i * n]).collect();
    let x_norm: f64 = x.iter().map(|v| v.magnitude_squared()).sum::<f64>().sqrt();

    let be = backend();
    let mut panel = a.panel_mut(0, nb, 0);
    be.eliminate_panel(&mut panel, 0).unwrap();
    drop(panel);

    let beta = a.get(nb, 0);
    // beta is real and carries the column norm
    assert!(beta.im.abs() < 1e-13 * x_norm.max(1.0));
    assert!((beta.magnitude() - x_norm).abs() < 1e-12 * x_norm.max(1.0));
}
