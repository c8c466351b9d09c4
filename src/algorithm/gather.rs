//! Redistribution: gather the band into its own container
//!
//! After panel reduction the band values live in tiles distributed with the
//! original matrix. This stage copies them into a [`BandMatrix`] with its
//! own (typically single-rank) distribution. It is pure data movement —
//! every element of the source band triangle lands in exactly one
//! destination tile, unchanged — and it is collective: every rank walks the
//! identical tile schedule, so ranks that own neither side of a transfer
//! still make the same (empty) pass, preserving collective ordering.

use crate::comm::{recv_scalars, send_scalars, Communicator};
use crate::dtype::Scalar;
use crate::error::{Error, Result};
use crate::tile::{BandMatrix, HermitianMatrix};

/// Copy the band triangle of `a` into `band`
pub fn gather_band<T: Scalar>(
    a: &HermitianMatrix<T>,
    band: &mut BandMatrix<T>,
    comm: &dyn Communicator,
) -> Result<()> {
    if a.n() != band.n() {
        return Err(Error::shape_mismatch(&[a.n(), a.n()], &[band.n(), band.n()]));
    }
    if a.nb() != band.nb() {
        return Err(Error::DistributionMismatch {
            reason: format!(
                "source tile size {} differs from band tile size {}",
                a.nb(),
                band.nb()
            ),
        });
    }

    let nb = a.nb();
    let kd = band.kd();
    let nt = band.nt();
    let rank = comm.rank();

    for k in 0..nt {
        for bi in [k, k + 1] {
            if bi >= nt {
                continue;
            }
            let src_owner = a.dist().owner(bi, k);
            let dst_owner = band.owner(bi, k);
            let tag = (bi * nt + k) as u64;

            if src_owner == rank && dst_owner == rank {
                copy_band_block(a, band, bi, k, nb, kd);
            } else if src_owner == rank {
                let buf = pack_band_block(a, bi, k, nb, kd);
                send_scalars(comm, &buf, dst_owner, tag)?;
            } else if dst_owner == rank {
                let count = band_block_len(a, bi, k, nb, kd);
                let mut buf = vec![T::zero(); count];
                recv_scalars(comm, &mut buf, src_owner, tag)?;
                unpack_band_block(band, bi, k, nb, kd, &buf);
            }
        }
    }
    Ok(())
}

/// Visit the in-band elements of tile `(bi, k)` in row-major local order
fn for_each_band_element(
    mb: usize,
    nbw: usize,
    row0: usize,
    col0: usize,
    kd: usize,
    mut f: impl FnMut(usize, usize),
) {
    for li in 0..mb {
        for lj in 0..nbw {
            let (i, j) = (row0 + li, col0 + lj);
            if i >= j && i - j <= kd {
                f(li, lj);
            }
        }
    }
}

fn copy_band_block<T: Scalar>(
    a: &HermitianMatrix<T>,
    band: &mut BandMatrix<T>,
    bi: usize,
    k: usize,
    nb: usize,
    kd: usize,
) {
    let src = a.at(bi, k);
    for_each_band_element(src.mb(), src.nb(), bi * nb, k * nb, kd, |li, lj| {
        band.set(bi * nb + li, k * nb + lj, src.get(li, lj));
    });
}

fn pack_band_block<T: Scalar>(
    a: &HermitianMatrix<T>,
    bi: usize,
    k: usize,
    nb: usize,
    kd: usize,
) -> Vec<T> {
    let src = a.at(bi, k);
    let mut buf = Vec::new();
    for_each_band_element(src.mb(), src.nb(), bi * nb, k * nb, kd, |li, lj| {
        buf.push(src.get(li, lj));
    });
    buf
}

fn unpack_band_block<T: Scalar>(
    band: &mut BandMatrix<T>,
    bi: usize,
    k: usize,
    nb: usize,
    kd: usize,
    buf: &[T],
) {
    let mb = band.tile_mb(bi);
    let nbw = band.tile_mb(k);
    let mut next = 0;
    for_each_band_element(mb, nbw, bi * nb, k * nb, kd, |li, lj| {
        band.set(bi * nb + li, k * nb + lj, buf[next]);
        next += 1;
    });
    debug_assert_eq!(next, buf.len());
}

fn band_block_len<T: Scalar>(
    a: &HermitianMatrix<T>,
    bi: usize,
    k: usize,
    nb: usize,
    kd: usize,
) -> usize {
    let mb = a.tile_mb(bi);
    let nbw = a.tile_nb(k);
    let mut count = 0;
    for_each_band_element(mb, nbw, bi * nb, k * nb, kd, |_, _| count += 1);
    count
}
