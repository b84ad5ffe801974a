//! Team and barrier primitives for lock-step lane execution
//!
//! A [`Team`] is a fixed-size group of lanes that execute identical code
//! on distinct lane ids and rendezvous at a [`Barrier`] between rounds.
//! This is the CPU rendering of a GPU workgroup: shared scratch plus a
//! full-group barrier is the only coordination mechanism, no locks.

use std::thread;

use crate::error::SortError;

/// A validated power-of-two team cardinality.
///
/// The compare-exchange schedules are pure functions of the lane id and
/// the team size, and are only defined when the size is a power of two.
/// Constructing a `TeamSize` is the single place where that precondition
/// is checked; everything downstream can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSize {
    lanes: usize,
    log2: u32,
}

impl TeamSize {
    /// Create a team size from a lane count.
    ///
    /// # Arguments
    ///
    /// * `lanes` - Number of lanes; must be a non-zero power of two
    ///
    /// # Returns
    ///
    /// The validated size, or [`SortError::InvalidTeamSize`] without any
    /// side effects.
    pub fn new(lanes: usize) -> Result<Self, SortError> {
        if lanes == 0 || !lanes.is_power_of_two() {
            Err(SortError::InvalidTeamSize { size: lanes })
        } else {
            Ok(TeamSize {
                lanes,
                log2: lanes.trailing_zeros(),
            })
        }
    }

    /// Number of lanes in the team.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// log2 of the lane count; the networks derive their round counts
    /// from this.
    pub fn log2(&self) -> u32 {
        self.log2
    }
}

/// Team-wide rendezvous point.
///
/// `arrive_and_wait` blocks the calling lane until every lane of the team
/// has called it since the previous rendezvous. On return, every write
/// issued by any lane before its own arrival is visible to every lane.
/// There are no partial releases: a lane that skips a barrier reachable
/// by the others deadlocks the whole team, which is a programming defect
/// rather than a recoverable condition.
pub struct Barrier {
    inner: std::sync::Barrier,
}

impl Barrier {
    /// Create a barrier for `lanes` participants.
    pub fn new(lanes: usize) -> Self {
        Barrier {
            inner: std::sync::Barrier::new(lanes),
        }
    }

    /// Block until all lanes of the team have arrived.
    ///
    /// The memory-visibility fence is part of this call; no separate
    /// fence is ever needed around it.
    pub fn arrive_and_wait(&self) {
        self.inner.wait();
    }
}

/// One lane's view of its team during a sort: an explicit id, the team
/// size, and the shared barrier. Lane ids are a permutation of
/// `[0, lanes)`; the id is always passed in explicitly, never read from
/// ambient state.
pub struct Lane<'a> {
    id: usize,
    lanes: usize,
    barrier: &'a Barrier,
}

impl<'a> Lane<'a> {
    /// This lane's id in `[0, team_size)`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Number of lanes in the team.
    pub fn team_size(&self) -> usize {
        self.lanes
    }

    /// The team's shared barrier.
    pub fn barrier(&self) -> &Barrier {
        self.barrier
    }
}

/// A fixed-size team of lanes executed as dedicated OS threads.
///
/// [`Team::run`] spawns one scoped thread per lane (lane 0 runs on the
/// calling thread) and hands each the same closure with its own
/// [`Lane`] context. The scope guarantees every lane has finished before
/// `run` returns, which is the writeback-side visibility edge.
pub struct Team {
    size: TeamSize,
}

impl Team {
    /// Create a team of the given size.
    pub fn new(size: TeamSize) -> Self {
        Team { size }
    }

    /// The team's size.
    pub fn size(&self) -> TeamSize {
        self.size
    }

    /// Execute `body` once per lane, in lock-step with respect to the
    /// barrier inside the lane context.
    ///
    /// # Arguments
    ///
    /// * `lane_stack_size` - Stack size for the spawned lane threads;
    ///   `None` uses the platform default. Lane bodies are shallow, so
    ///   wide teams can run with small stacks.
    /// * `body` - The lane closure; receives an explicit [`Lane`] with
    ///   its id. Every lane must reach every barrier the others reach.
    pub fn run<F>(&self, lane_stack_size: Option<usize>, body: F)
    where
        F: Fn(Lane<'_>) + Sync,
    {
        let lanes = self.size.lanes();
        let barrier = Barrier::new(lanes);

        if lanes == 1 {
            // Degenerate team: no threads, the single lane runs inline.
            body(Lane {
                id: 0,
                lanes,
                barrier: &barrier,
            });
            return;
        }

        thread::scope(|scope| {
            let barrier = &barrier;
            let body = &body;
            for id in 1..lanes {
                let mut builder = thread::Builder::new().name(format!("lane-{}", id));
                if let Some(bytes) = lane_stack_size {
                    builder = builder.stack_size(bytes);
                }
                builder
                    .spawn_scoped(scope, move || {
                        body(Lane { id, lanes, barrier });
                    })
                    .expect("failed to spawn lane thread");
            }
            // Lane 0 runs on the caller's thread.
            body(Lane {
                id: 0,
                lanes,
                barrier,
            });
        });
    }
}
