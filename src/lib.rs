//! # teigr
//!
//! **Tile-distributed symmetric/Hermitian eigenvalue solver for Rust.**
//!
//! teigr reduces a dense Hermitian matrix, partitioned into tiles owned by
//! the ranks of a process grid, to symmetric tridiagonal form and computes
//! its eigenvalues with a shifted QR iteration — the reduction path of the
//! classical two-stage dense eigensolver, built on a priority-scheduled
//! tile-task runtime.
//!
//! ## Why teigr?
//!
//! - **Tiled from the ground up**: tiles are the unit of storage,
//!   ownership, and scheduling; ownership comes from an injected
//!   distribution, so the same code runs single-process or on a 2-D grid
//! - **Multi-backend dispatch**: tile operations go through a backend
//!   strategy selected at pipeline start (host task-parallel today,
//!   accelerator-resident as an extension seam)
//! - **Deterministic**: priorities and worker counts bias scheduling, never
//!   results — two runs on identical input are bit-identical
//! - **Four precisions**: f32, f64, and their interleaved complex
//!   counterparts, with conjugate-transpose semantics throughout
//!
//! ## Pipeline
//!
//! ```text
//! HermitianMatrix ── panel reduction ──> band (in place)
//!                 ── gather ──────────> BandMatrix
//!                 ── bulge chasing ───> tridiagonal (in place)
//!                 ── QR iteration ────> eigenvalues, ascending
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use teigr::prelude::*;
//! use std::sync::Arc;
//!
//! let mut a = HermitianMatrix::<f64>::new(n, 64, Arc::new(SingleProcess), 0);
//! a.insert_local_tiles();
//! // ... fill the lower triangle ...
//!
//! let mut w = Vec::new();
//! eigh_values(&mut a, &mut w, &EighOptions::default())?;
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded host backend; without it, task
//!   batches run sequentially in priority order with identical results

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod algorithm;
pub mod comm;
pub mod dtype;
pub mod error;
pub mod grid;
pub mod runtime;
pub mod tile;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::{eigh_values, eigh_values_with, EighOptions};
    pub use crate::comm::{Communicator, LocalComm};
    pub use crate::dtype::{Complex64, Complex128, DType, RealScalar, Scalar};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{BlockCyclic, ProcessGrid, SingleProcess, TileDistribution};
    pub use crate::runtime::{Target, TargetBackend};
    pub use crate::tile::{BandMatrix, HermitianMatrix, TileMatrix};
}
