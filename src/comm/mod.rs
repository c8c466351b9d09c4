//! Inter-process transport seam
//!
//! The redistribution stage is a collective operation: every rank walks the
//! same schedule of tile copies, executing the local ones directly and
//! handing cross-rank ones to a `Communicator`. The actual network transport
//! (MPI or otherwise) is external to this crate; `LocalComm` is the
//! single-process implementation used by the tests and by any run where all
//! tiles are local.
//!
//! No cancellation or timeout semantics are defined: a stuck collective
//! blocks its participants indefinitely (fail-stop, not fault-tolerant).

use crate::dtype::Scalar;
use crate::error::{Error, Result};

/// Point-to-point and collective transport between ranks
///
/// Messages are byte buffers; element-typed helpers below cast through
/// bytemuck. A tag disambiguates concurrent transfers between the same pair
/// of ranks; both sides of a transfer must use the same tag.
pub trait Communicator: Send + Sync {
    /// This process's rank
    fn rank(&self) -> usize;

    /// Number of participating processes
    fn size(&self) -> usize;

    /// Blocking send of a byte buffer to `dest`
    fn send_bytes(&self, buf: &[u8], dest: usize, tag: u64) -> Result<()>;

    /// Blocking receive of a byte buffer from `src`
    fn recv_bytes(&self, buf: &mut [u8], src: usize, tag: u64) -> Result<()>;

    /// Block until every rank has entered the barrier
    fn barrier(&self) -> Result<()>;
}

/// Send a slice of scalars to `dest`
pub fn send_scalars<T: Scalar>(
    comm: &dyn Communicator,
    buf: &[T],
    dest: usize,
    tag: u64,
) -> Result<()> {
    comm.send_bytes(bytemuck::cast_slice(buf), dest, tag)
}

/// Receive a slice of scalars from `src`
pub fn recv_scalars<T: Scalar>(
    comm: &dyn Communicator,
    buf: &mut [T],
    src: usize,
    tag: u64,
) -> Result<()> {
    comm.recv_bytes(bytemuck::cast_slice_mut(buf), src, tag)
}

/// Single-process communicator
///
/// Rank 0 of a world of size 1. Any send or receive is a contract violation
/// reported as `TransportUnavailable`: with one rank, every tile is local
/// and no copy should ever route through the transport.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalComm;

impl Communicator for LocalComm {
    #[inline]
    fn rank(&self) -> usize {
        0
    }

    #[inline]
    fn size(&self) -> usize {
        1
    }

    fn send_bytes(&self, _buf: &[u8], dest: usize, _tag: u64) -> Result<()> {
        Err(Error::TransportUnavailable {
            rank: dest,
            from: 0,
        })
    }

    fn recv_bytes(&self, _buf: &mut [u8], src: usize, _tag: u64) -> Result<()> {
        Err(Error::TransportUnavailable { rank: src, from: 0 })
    }

    fn barrier(&self) -> Result<()> {
        Ok(())
    }
}
