//! Execution-target dispatch
//!
//! Every tile operation of the reduction pipeline goes through a
//! [`TargetBackend`]: a strategy object selected once, at pipeline start,
//! from the requested [`Target`]. The host backend schedules independent
//! per-tile work units through a task batch with advisory priorities and an
//! explicit join before any dependent step; an accelerator backend would
//! batch the same logical operations into device-resident kernels. Adding a
//! backend means implementing the trait and extending [`backend_for`] — no
//! change to calling code.

pub mod host;
mod traits;

pub use host::HostTaskBackend;
pub use traits::TargetBackend;

use crate::dtype::Scalar;
use crate::error::{Error, Result};

/// Execution target for tile operations
///
/// `HostTask` runs per-tile work units on the host task-parallel runtime.
/// `Device` selects an accelerator-resident backend; none is compiled into
/// this build, so requesting it fails at pipeline construction with
/// [`Error::UnsupportedTarget`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum Target {
    /// Host task-parallel backend
    #[default]
    HostTask,
    /// Accelerator-resident backend (extension point)
    Device,
}

/// Resolve a target to its backend implementation
///
/// `max_panel_threads` caps the concurrency used for panel-local work; with
/// `None` the backend shares the global worker pool.
pub fn backend_for<T: Scalar>(
    target: Target,
    max_panel_threads: Option<usize>,
) -> Result<Box<dyn TargetBackend<T>>> {
    match target {
        Target::HostTask => Ok(Box::new(HostTaskBackend::new(max_panel_threads)?)),
        Target::Device => Err(Error::UnsupportedTarget { target }),
    }
}
