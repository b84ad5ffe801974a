//! Compare-exchange sorting networks
//!
//! A network is an immutable schedule of rounds; each round pairs every
//! lane with a partner and conditionally exchanges values so that, after
//! the full schedule, the tile is sorted in non-descending order (ties
//! may reorder - neither network is stable). Two topologies are
//! provided with identical external contracts but different internal
//! write disciplines:
//!
//! - [`Network::Bitonic`]: each compared pair is owned by exactly one
//!   lane, which reads and writes both slots (single-owner-write).
//! - [`Network::OddEvenTransposition`]: both lanes of a pair compute
//!   their own post-round value and write only their own slot
//!   (symmetric dual-write).
//!
//! Either discipline keeps every scratch slot single-writer within a
//! round, which together with the barrier rendezvous between rounds is
//! what makes the neighbor reads race-free.

pub(crate) mod bitonic;
pub(crate) mod oddeven;

use crate::config::{ExecutionModel, SortConfig};
use crate::team::{Team, TeamSize};
use crate::tile::Tile;

/// Network topology selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Bitonic merge network: `log2(T)*(log2(T)+1)/2` rounds, pair
    /// ownership via `sibling > lane`.
    Bitonic,
    /// Odd-even transposition-style network: same round count, symmetric
    /// writes with a deterministic id tie-break.
    OddEvenTransposition,
}

impl Network {
    /// Number of compare-exchange rounds this network schedules for a
    /// team of the given size.
    pub fn round_count(&self, team: TeamSize) -> usize {
        match self {
            Network::Bitonic => bitonic::round_count(team),
            Network::OddEvenTransposition => oddeven::round_count(team),
        }
    }

    /// Sort one validated tile range in place: stage, run the schedule
    /// under the configured execution model, write back.
    pub(crate) fn sort_in_place<T>(&self, config: &SortConfig, team: TeamSize, range: &mut [T])
    where
        T: Copy + Ord + Send + Sync,
    {
        debug_assert_eq!(range.len(), team.lanes());

        let mut tile = Tile::load(team, range);
        match config.resolve(team.lanes()) {
            ExecutionModel::Threaded => {
                let workers = Team::new(team);
                match self {
                    Network::Bitonic => {
                        bitonic::sort_threaded(&workers, &tile, config.lane_stack_size)
                    }
                    Network::OddEvenTransposition => {
                        oddeven::sort_threaded(&workers, &tile, config.lane_stack_size)
                    }
                }
            }
            _ => {
                let scratch = tile.as_mut_slice();
                match self {
                    Network::Bitonic => bitonic::sort_lockstep(team, scratch),
                    Network::OddEvenTransposition => oddeven::sort_lockstep(team, scratch),
                }
            }
        }
        tile.writeback(range);
    }
}
