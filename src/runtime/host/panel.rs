//! Panel elimination and trailing update, host implementation

use super::kernels;
use super::{HostTaskBackend, TaskBatch};
use crate::dtype::Scalar;
use crate::error::Result;
use crate::tile::{HermitianMatrix, PanelMut, Tile};

/// Write-acquire every tile of the panel
///
/// One unit per tile, no ordering among them, joined before return. Each
/// unit validates that the view fits its tile (a malformed tile panics
/// here, before any data is read) and acquires the buffer for mutation.
pub(super) fn materialize<T: Scalar>(
    backend: &HostTaskBackend,
    panel: &mut PanelMut<'_, T>,
    priority: i32,
) -> Result<()> {
    let mut batch = TaskBatch::new();
    for seg in panel.segs_mut() {
        batch.submit(priority, move || {
            assert!(
                seg.row_off + seg.rows <= seg.tile.mb() && seg.col_off + seg.cols <= seg.tile.nb(),
                "malformed tile: view {}x{} at ({}, {}) exceeds tile {}x{}",
                seg.rows,
                seg.cols,
                seg.row_off,
                seg.col_off,
                seg.tile.mb(),
                seg.tile.nb(),
            );
            // acquire for writing; a device backend would stage the tile here
            let _ = seg.tile.data_mut();
        });
    }
    backend.run(batch);
    Ok(())
}

/// Eliminate the leading panel column with one Householder reflector
///
/// Mirrors the classical unblocked step: assemble the column, build the
/// reflector, form `w = A^H v`, apply the rank-1 update
/// `A ← A − conj(tau)·v·w^H` (that is, `A ← H^H A`), then store `beta` and
/// the reflector tail back into the eliminated column.
pub(super) fn eliminate<T: Scalar>(
    backend: &HostTaskBackend,
    panel: &mut PanelMut<'_, T>,
    priority: i32,
) -> Result<T> {
    if panel.is_empty() {
        return Ok(T::zero());
    }
    materialize(backend, panel, priority)?;

    // v <- A[:, 0]
    let mut v = Vec::with_capacity(panel.m());
    kernels::copy_panel_column(panel, 0, &mut v);

    let tau = kernels::householder(&mut v);
    if tau == T::zero() {
        // degenerate column: H is the identity, panel untouched
        return Ok(tau);
    }
    let beta = v[0];
    v[0] = T::one();

    // w = A^H v, accumulated row block by row block
    let mut w = vec![T::zero(); panel.n()];
    let mut row = 0;
    for (s, seg) in panel.segs().iter().enumerate() {
        kernels::gemv_conj_trans(seg, &v[row..row + seg.rows], &mut w, s == 0);
        row += seg.rows;
    }

    // A ← A − conj(tau)·v·w^H, independent per-tile units
    {
        let alpha = -tau.conj();
        let mut batch = TaskBatch::new();
        let w_ref = &w;
        let v_ref = &v;
        let mut row = 0;
        for seg in panel.segs_mut() {
            let v_seg = &v_ref[row..row + seg.rows];
            row += seg.rows;
            batch.submit(priority, move || kernels::ger(alpha, v_seg, w_ref, seg));
        }
        backend.run(batch);
    }

    // the eliminated column keeps beta on the diagonal and the reflector
    // tail below it, geqr2-style
    let mut row = 0;
    for seg in panel.segs_mut() {
        for i in 0..seg.rows {
            let value = if row == 0 { beta } else { v[row] };
            seg.set(i, 0, value);
            row += 1;
        }
    }
    Ok(tau)
}

/// Two-sided update `A ← H^H A H` on the trailing Hermitian blocks
///
/// With `p = tau·A·v` and `w = p − (conj(tau)·(v^H p)/2)·v`, the update is
/// the Hermitian rank-2 form `A ← A − v·w^H − w·v^H`. The matrix-vector
/// product runs as one unit per block row (disjoint output segments); the
/// rank-2 update as one unit per trailing tile.
pub(super) fn trailing_update<T: Scalar>(
    backend: &HostTaskBackend,
    a: &mut HermitianMatrix<T>,
    min_block: usize,
    v: &[T],
    tau: T,
    priority: i32,
) -> Result<()> {
    if tau == T::zero() || min_block >= a.nt() {
        return Ok(());
    }
    let nb = a.nb();
    let nt = a.nt();
    let n = a.n();
    let t0 = min_block * nb;
    let m = n - t0;
    assert_eq!(v.len(), m, "reflector must span the trailing rows");

    // p = A_trailing · v
    let mut p = vec![T::zero(); m];
    {
        let a_ref: &HermitianMatrix<T> = a;
        let mut batch = TaskBatch::new();
        let mut rest: &mut [T] = &mut p;
        for bi in min_block..nt {
            let len = a_ref.tile_mb(bi);
            let (out, tail) = rest.split_at_mut(len);
            rest = tail;
            batch.submit(priority, move || {
                hermitian_block_row_matvec(a_ref, min_block, bi, v, out);
            });
        }
        backend.run(batch);
    }
    for x in &mut p {
        *x = tau * *x;
    }

    // w = p − (conj(tau)·(v^H p)/2)·v
    let mut vhp = T::zero();
    for (vi, pi) in v.iter().zip(&p) {
        vhp = vhp + vi.conj() * *pi;
    }
    let half = tau.conj() * vhp / (T::one() + T::one());
    let w: Vec<T> = p.iter().zip(v).map(|(pi, vi)| *pi - half * *vi).collect();

    // A ← A − v·w^H − w·v^H, one unit per trailing tile
    let mut batch = TaskBatch::new();
    let w_ref = &w;
    for ((bi, bj), tile) in a.trailing_tiles_mut(min_block) {
        let row0 = bi * nb - t0;
        let col0 = bj * nb - t0;
        let diagonal = bi == bj;
        batch.submit(priority, move || {
            her2_tile(tile, diagonal, row0, col0, v, w_ref);
        });
    }
    backend.run(batch);
    Ok(())
}

/// One block row of the Hermitian matrix-vector product
///
/// Row block `bi` multiplies its stored lower tiles directly and picks up
/// the strict upper part from the conjugate transpose of the tiles below it
/// in block column `bi`.
fn hermitian_block_row_matvec<T: Scalar>(
    a: &HermitianMatrix<T>,
    min_block: usize,
    bi: usize,
    v: &[T],
    out: &mut [T],
) {
    let nb = a.nb();
    let t0 = min_block * nb;
    for bj in min_block..=bi {
        let tile = a.at(bi, bj);
        let col0 = bj * nb - t0;
        let diagonal = bi == bj;
        for i in 0..tile.mb() {
            let mut acc = out[i];
            if diagonal {
                for j in 0..tile.nb() {
                    let value = if j <= i {
                        tile.get(i, j)
                    } else {
                        tile.get(j, i).conj()
                    };
                    acc = acc + value * v[col0 + j];
                }
            } else {
                for j in 0..tile.nb() {
                    acc = acc + tile.get(i, j) * v[col0 + j];
                }
            }
            out[i] = acc;
        }
    }
    for bj in bi + 1..a.nt() {
        let tile = a.at(bj, bi);
        let row0 = bj * nb - t0;
        for i in 0..tile.nb() {
            let mut acc = out[i];
            for r in 0..tile.mb() {
                acc = acc + tile.get(r, i).conj() * v[row0 + r];
            }
            out[i] = acc;
        }
    }
}

/// Rank-2 update of one tile: `A ← A − v·w^H − w·v^H`
///
/// Diagonal tiles update only their lower triangle; the upper part is never
/// stored.
fn her2_tile<T: Scalar>(
    tile: &mut Tile<T>,
    diagonal: bool,
    row0: usize,
    col0: usize,
    v: &[T],
    w: &[T],
) {
    for i in 0..tile.mb() {
        let jmax = if diagonal { i + 1 } else { tile.nb() };
        for j in 0..jmax {
            let update = v[row0 + i] * w[col0 + j].conj() + w[row0 + i] * v[col0 + j].conj();
            let value = tile.get(i, j) - update;
            tile.set(i, j, value);
        }
    }
}
