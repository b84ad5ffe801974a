//! Bitonic merge network (primary topology)
//!
//! Stages of span `l = 2, 4, ..., T` each run substages of stride
//! `j = l/2, ..., 1`. In a substage every lane is paired with
//! `lane ^ j`; the lane with the higher partner id owns the pair and is
//! the only one to touch either slot that round, so pairs never contend.
//! After stage `l` completes, the tile consists of sorted runs of length
//! `l` in alternating directions - a bitonic sequence of length `2l` -
//! and after the final stage (`l == T`) the whole tile is ascending.

use crate::team::{Team, TeamSize};
use crate::tile::Tile;

/// One compare-exchange round of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Round {
    /// Stage span `l`: length of the sorted runs being built.
    pub span: usize,
    /// Substage stride `j`: distance between paired lanes.
    pub stride: usize,
}

/// The full round schedule for a team, outermost stage first.
pub(crate) fn schedule(team: TeamSize) -> impl Iterator<Item = Round> {
    (1..=team.log2()).flat_map(|stage| {
        let span = 1usize << stage;
        (0..stage).rev().map(move |sub| Round {
            span,
            stride: 1usize << sub,
        })
    })
}

/// Rounds scheduled for a team of this size: `k(k+1)/2` for `T = 2^k`.
pub(crate) fn round_count(team: TeamSize) -> usize {
    let k = team.log2() as usize;
    k * (k + 1) / 2
}

/// Whether the pair containing `lane` should end the round in ascending
/// order for the given stage span.
#[inline]
fn ascending(lane: usize, span: usize) -> bool {
    lane & span == 0
}

/// Whether an owner holding `(own, sibling)` must exchange them to reach
/// the target order for its stage.
#[inline]
fn must_exchange<T: Ord>(own: &T, sibling: &T, ascending: bool) -> bool {
    if ascending {
        own > sibling
    } else {
        own < sibling
    }
}

/// Run the schedule with one thread per lane over shared scratch.
///
/// Barrier discipline: each round's reads see pre-round state because
/// the previous round ended with a rendezvous (the tile load edge covers
/// the first round); each round ends with a rendezvous so its exchanges
/// are visible to the next. The trailing rendezvous is unconditional -
/// whether a pair exchanged is not team-uniform knowledge, and a
/// counting barrier requires every lane to arrive.
pub(crate) fn sort_threaded<T>(workers: &Team, tile: &Tile<T>, lane_stack_size: Option<usize>)
where
    T: Copy + Ord + Send + Sync,
{
    let team = workers.size();
    workers.run(lane_stack_size, |lane| {
        let id = lane.id();
        for round in schedule(team) {
            let sibling = id ^ round.stride;
            if sibling > id {
                // This lane owns the pair: no other lane reads or
                // writes slot `id` or slot `sibling` this round, and
                // the previous rendezvous published their last writes.
                unsafe {
                    let own = tile.lane_read(id);
                    let sib = tile.lane_read(sibling);
                    if must_exchange(&own, &sib, ascending(id, round.span)) {
                        tile.lane_write(id, sib);
                        tile.lane_write(sibling, own);
                    }
                }
            }
            lane.barrier().arrive_and_wait();
        }
    });
}

/// Single-threaded rendering of the same schedule: steps every lane's
/// compare for each round in turn. Pairs are disjoint within a round,
/// so in-place swaps need no staging.
pub(crate) fn sort_lockstep<T: Copy + Ord>(team: TeamSize, scratch: &mut [T]) {
    for round in schedule(team) {
        for lane in 0..team.lanes() {
            let sibling = lane ^ round.stride;
            if sibling > lane
                && must_exchange(&scratch[lane], &scratch[sibling], ascending(lane, round.span))
            {
                scratch.swap(lane, sibling);
            }
        }
    }
}
