//! Backend capability trait

use crate::dtype::Scalar;
use crate::error::Result;
use crate::tile::{HermitianMatrix, PanelMut};

/// The tile operations a backend must provide to drive the reduction
///
/// All three operations mutate their operands in place and return only when
/// every work unit they scheduled has completed (the join is part of the
/// contract, not the caller's job). `priority` is an advisory hint that
/// biases execution order toward the critical path; it never changes which
/// tiles are touched or the numerical result.
pub trait TargetBackend<T: Scalar>: Send + Sync {
    /// Acquire every tile of the panel for in-place mutation
    ///
    /// Scheduled as independent per-tile units with no ordering constraint
    /// among them, followed by a barrier; on return the panel is safe to
    /// read and write. A tile whose shape disagrees with the view is a
    /// contract violation and panics.
    fn materialize_panel(&self, panel: &mut PanelMut<'_, T>, priority: i32) -> Result<()>;

    /// Eliminate the leading column of the panel with one Householder
    /// reflector and apply the rank-1 update to the rest of the panel
    ///
    /// On return the head of the column holds the new diagonal value `beta`
    /// and the entries below it hold the reflector tail (the `v[0] = 1`
    /// head is implicit). Returns the reflector scalar `tau`; a degenerate
    /// panel (empty, or nothing to annihilate) returns `tau = 0` and leaves
    /// the panel unchanged.
    fn eliminate_panel(&self, panel: &mut PanelMut<'_, T>, priority: i32) -> Result<T>;

    /// Two-sided reflector application to the trailing Hermitian submatrix
    ///
    /// Applies `A ← H^H A H` with `H = I − tau·v·v^H` to the trailing
    /// blocks `(i, j)` with `i >= j >= min_block`, where `v` spans the
    /// trailing rows (leading zeros padding reflectors that start deeper).
    fn apply_trailing_update(
        &self,
        a: &mut HermitianMatrix<T>,
        min_block: usize,
        v: &[T],
        tau: T,
        priority: i32,
    ) -> Result<()>;
}
