//! Odd-even transposition network (alternative topology)
//!
//! Phases of run length `len = 1, 2, ..., T/2` each run substages of gap
//! `inc = len, ..., 1`. Every lane is paired with `lane ^ inc` and both
//! lanes of a pair decide the round independently: a deterministic
//! id tie-break makes them agree on which side holds the smaller value
//! without any communication beyond the two values and ids, and each
//! lane then writes only its own slot. The external contract is the same
//! full ascending sort as the bitonic network; only the synchronization
//! pattern differs (symmetric dual-write instead of single-owner-write).

use crate::team::{Team, TeamSize};
use crate::tile::Tile;

/// One compare-exchange round of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Round {
    /// Phase run length `len`.
    pub run: usize,
    /// Substage gap `inc`: distance between paired lanes.
    pub gap: usize,
}

/// The full round schedule for a team, shortest runs first.
pub(crate) fn schedule(team: TeamSize) -> impl Iterator<Item = Round> {
    (0..team.log2()).flat_map(|phase| {
        let run = 1usize << phase;
        (0..=phase).rev().map(move |sub| Round {
            run,
            gap: 1usize << sub,
        })
    })
}

/// Rounds scheduled for a team of this size: `sum(log2(len) + 1)` over
/// the doubling run lengths, which is `k(k+1)/2` for `T = 2^k`.
pub(crate) fn round_count(team: TeamSize) -> usize {
    let k = team.log2() as usize;
    k * (k + 1) / 2
}

/// Whether `lane` sits in a descending block for the given run length.
#[inline]
fn descending(lane: usize, run: usize) -> bool {
    lane & (run << 1) != 0
}

/// The value `lane` keeps after one round, computed from its own and its
/// partner's pre-round values.
///
/// `partner_smaller` uses the partner id as a tie-break so both lanes of
/// a pair reach complementary decisions even on equal values; duplicates
/// therefore never get lost or doubled.
#[inline]
fn post_value<T: Copy + Ord>(
    lane: usize,
    partner: usize,
    own: T,
    theirs: T,
    descending: bool,
) -> T {
    let partner_smaller = theirs < own || (theirs == own && partner < lane);
    let swap = partner_smaller ^ (partner < lane) ^ descending;
    if swap {
        theirs
    } else {
        own
    }
}

/// Run the schedule with one thread per lane over shared scratch.
///
/// Barrier discipline: each round reads both values first, rendezvouses
/// so every lane has finished reading, writes its own slot, then
/// rendezvouses again so the writes are the next round's pre-round
/// state. Unlike the bitonic network, the mid-round rendezvous is
/// load-bearing here: a lane's partner reads the very slot the lane is
/// about to overwrite.
pub(crate) fn sort_threaded<T>(workers: &Team, tile: &Tile<T>, lane_stack_size: Option<usize>)
where
    T: Copy + Ord + Send + Sync,
{
    let team = workers.size();
    workers.run(lane_stack_size, |lane| {
        let id = lane.id();
        // The tile load happened before the lane threads were spawned,
        // and no other lane ever writes this slot.
        let mut own = unsafe { tile.lane_read(id) };
        for round in schedule(team) {
            let partner = id ^ round.gap;
            // Pre-round state: the partner's last write was published by
            // the previous round's trailing rendezvous (or the load).
            let theirs = unsafe { tile.lane_read(partner) };
            lane.barrier().arrive_and_wait();

            own = post_value(id, partner, own, theirs, descending(id, round.run));
            // Own slot only; the partner is writing its own slot.
            unsafe { tile.lane_write(id, own) };
            lane.barrier().arrive_and_wait();
        }
    });
}

/// Single-threaded rendering of the same schedule. The snapshot taken at
/// the top of each round plays the part of the mid-round rendezvous:
/// every lane's write is computed from the same pre-round state.
pub(crate) fn sort_lockstep<T: Copy + Ord>(team: TeamSize, scratch: &mut [T]) {
    let mut before = scratch.to_vec();
    for round in schedule(team) {
        before.copy_from_slice(scratch);
        for lane in 0..team.lanes() {
            let partner = lane ^ round.gap;
            scratch[lane] = post_value(
                lane,
                partner,
                before[lane],
                before[partner],
                descending(lane, round.run),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_length_matches_round_count() {
        for k in 0..=7u32 {
            let team = TeamSize::new(1 << k).unwrap();
            assert_eq!(schedule(team).count(), round_count(team));
        }
    }

    #[test]
    fn eight_lane_schedule_doubles_runs_and_halves_gaps() {
        let team = TeamSize::new(8).unwrap();
        let rounds: Vec<(usize, usize)> = schedule(team).map(|r| (r.run, r.gap)).collect();
        assert_eq!(
            rounds,
            vec![(1, 1), (2, 2), (2, 1), (4, 4), (4, 2), (4, 1)]
        );
    }

    #[test]
    fn paired_lanes_reach_complementary_decisions() {
        // Distinct values.
        assert_eq!(post_value(0, 1, 5u32, 3, false), 3);
        assert_eq!(post_value(1, 0, 3u32, 5, false), 5);
        // Duplicates: the id tie-break keeps one copy on each side.
        assert_eq!(post_value(0, 1, 5u32, 5, false), 5);
        assert_eq!(post_value(1, 0, 5u32, 5, false), 5);
        // Descending block flips the outcome.
        assert_eq!(post_value(0, 1, 3u32, 5, true), 5);
        assert_eq!(post_value(1, 0, 5u32, 3, true), 3);
    }

    #[test]
    fn duplicate_multiset_survives_every_round() {
        let team = TeamSize::new(8).unwrap();
        let mut data = vec![3u32, 3, 1, 2, 3, 1, 2, 2];
        let mut expected = data.clone();
        expected.sort_unstable();
        sort_lockstep(team, &mut data);
        assert_eq!(data, expected);
    }

    #[test]
    fn lockstep_sorts_a_reversed_tile() {
        let team = TeamSize::new(32).unwrap();
        let mut data: Vec<i32> = (0..32).rev().collect();
        sort_lockstep(team, &mut data);
        assert_eq!(data, (0..32).collect::<Vec<i32>>());
    }
}
