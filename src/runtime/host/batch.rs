//! Priority-hinted fork-join task batches

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// A batch of independent work units with advisory priorities
///
/// Units are submitted, then run to completion by [`TaskBatch::join`] —
/// the join is the barrier every kernel step relies on before reading what
/// sibling units wrote. Units must touch disjoint data; the batch gives no
/// ordering guarantee among them beyond the priority bias, and the final
/// state must not depend on execution order (all batches in this crate
/// write disjoint tiles or disjoint vector segments).
///
/// Higher priorities are dispatched first. With the `rayon` feature the
/// sorted batch is drained by the worker pool; without it, units run
/// sequentially in the same order, which keeps results bit-identical
/// across both configurations.
#[derive(Default)]
pub struct TaskBatch<'a> {
    tasks: Vec<(i32, Box<dyn FnOnce() + Send + 'a>)>,
}

impl<'a> TaskBatch<'a> {
    /// Empty batch
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Queue one work unit with a priority hint
    pub fn submit<F>(&mut self, priority: i32, task: F)
    where
        F: FnOnce() + Send + 'a,
    {
        self.tasks.push((priority, Box::new(task)));
    }

    /// Number of queued units
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when nothing was submitted
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every queued unit and wait for all of them (the barrier)
    pub fn join(self) {
        let mut tasks = self.tasks;
        // stable sort: equal priorities keep submission order
        tasks.sort_by_key(|(priority, _)| std::cmp::Reverse(*priority));

        #[cfg(feature = "rayon")]
        tasks.into_par_iter().for_each(|(_, task)| task());

        #[cfg(not(feature = "rayon"))]
        for (_, task) in tasks {
            task();
        }
    }
}
