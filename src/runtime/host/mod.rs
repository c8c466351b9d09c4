//! Host task-parallel backend
//!
//! Tile operations become batches of independent work units joined by an
//! explicit barrier. By default units run on the global worker pool; when
//! the caller caps panel concurrency, a dedicated pool of that width is
//! built once at backend construction and every batch runs inside it.

mod batch;
pub mod kernels;
mod panel;

pub use batch::TaskBatch;

use crate::dtype::Scalar;
use crate::error::{Error, Result};
use crate::runtime::TargetBackend;
use crate::tile::{HermitianMatrix, PanelMut};

/// Backend running tile operations as host tasks
pub struct HostTaskBackend {
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl HostTaskBackend {
    /// Create a backend; `max_panel_threads` caps panel-local concurrency
    pub fn new(max_panel_threads: Option<usize>) -> Result<Self> {
        if max_panel_threads == Some(0) {
            return Err(Error::invalid_argument(
                "max_panel_threads",
                "thread cap must be nonzero",
            ));
        }
        #[cfg(feature = "rayon")]
        {
            let pool = match max_panel_threads {
                Some(threads) => Some(
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(threads)
                        .build()
                        .map_err(|e| Error::TaskSubmission {
                            reason: e.to_string(),
                        })?,
                ),
                None => None,
            };
            Ok(Self { pool })
        }
        #[cfg(not(feature = "rayon"))]
        {
            // sequential build: the cap is trivially satisfied
            let _ = max_panel_threads;
            Ok(Self {})
        }
    }

    /// Run a batch to completion (the barrier), inside the panel pool when
    /// one is configured
    pub fn run(&self, batch: TaskBatch<'_>) {
        #[cfg(feature = "rayon")]
        if let Some(pool) = &self.pool {
            pool.install(|| batch.join());
            return;
        }
        batch.join();
    }
}

impl<T: Scalar> TargetBackend<T> for HostTaskBackend {
    fn materialize_panel(&self, panel: &mut PanelMut<'_, T>, priority: i32) -> Result<()> {
        panel::materialize(self, panel, priority)
    }

    fn eliminate_panel(&self, panel: &mut PanelMut<'_, T>, priority: i32) -> Result<T> {
        panel::eliminate(self, panel, priority)
    }

    fn apply_trailing_update(
        &self,
        a: &mut HermitianMatrix<T>,
        min_block: usize,
        v: &[T],
        tau: T,
        priority: i32,
    ) -> Result<()> {
        panel::trailing_update(self, a, min_block, v, tau, priority)
    }
}
