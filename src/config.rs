//! Configuration for the sorting engine
//!
//! The networks themselves are fixed schedules; what varies per machine
//! is how the lanes are executed. The config chooses an execution model
//! and the lane-thread stack size, with an adaptive default that picks
//! the model from the core count.

/// How a team's lanes are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionModel {
    /// Choose per call: dedicated threads for teams that fit the core
    /// budget, lockstep simulation beyond it.
    Adaptive,
    /// One OS thread per lane, synchronized by a real barrier. This is
    /// the faithful rendering of the workgroup model.
    Threaded,
    /// A single thread steps every lane through each round; the barrier
    /// between the read and write phases of a round becomes a snapshot.
    /// Deterministic and cheap for teams wider than the machine.
    Lockstep,
}

/// Configuration for a sort call.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Execution model selection
    pub execution: ExecutionModel,

    /// Stack size in bytes for spawned lane threads; `None` uses the
    /// platform default. Lane bodies are shallow, so wide teams can be
    /// run with small stacks.
    pub lane_stack_size: Option<usize>,

    /// Core budget consulted by [`ExecutionModel::Adaptive`]. Defaults
    /// to the number of available cores.
    pub thread_budget: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            execution: ExecutionModel::Adaptive,
            lane_stack_size: None,
            thread_budget: num_cpus::get(),
        }
    }
}

impl SortConfig {
    /// Create a config pinned to a specific execution model.
    pub fn with_execution(execution: ExecutionModel) -> Self {
        SortConfig {
            execution,
            ..SortConfig::default()
        }
    }

    /// Resolve the model for a team of `lanes` lanes.
    ///
    /// Adaptive tolerates moderate oversubscription (lanes spend most of
    /// a sort parked at barriers) before falling back to lockstep.
    pub(crate) fn resolve(&self, lanes: usize) -> ExecutionModel {
        match self.execution {
            ExecutionModel::Threaded => ExecutionModel::Threaded,
            ExecutionModel::Lockstep => ExecutionModel::Lockstep,
            ExecutionModel::Adaptive => {
                if lanes <= self.thread_budget.max(1) * 4 {
                    ExecutionModel::Threaded
                } else {
                    ExecutionModel::Lockstep
                }
            }
        }
    }
}
