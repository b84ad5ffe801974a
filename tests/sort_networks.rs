//! End-to-end properties of both sorting networks
//!
//! Every property is checked for both topologies and both execution
//! models: the networks differ internally (single-owner writes vs
//! symmetric dual writes) but their external contract is identical.

use proptest::prelude::*;
use tilesort::{
    sort_tile, sort_tile_with, ExecutionModel, Network, SortConfig, SortError, TeamSize,
};

const NETWORKS: [Network; 2] = [Network::Bitonic, Network::OddEvenTransposition];
const MODELS: [ExecutionModel; 2] = [ExecutionModel::Threaded, ExecutionModel::Lockstep];

fn sort_with(model: ExecutionModel, network: Network, tile: &mut [u32]) {
    let config = SortConfig::with_execution(model);
    sort_tile_with(&config, tile.len(), network, tile).expect("valid power-of-two tile");
}

#[test]
fn every_team_size_sorts_reversed_input() {
    for exp in 0..=7u32 {
        let lanes = 1usize << exp;
        let input: Vec<u32> = (0..lanes as u32).rev().collect();
        let expected: Vec<u32> = (0..lanes as u32).collect();

        for network in NETWORKS {
            for model in MODELS {
                let mut tile = input.clone();
                sort_with(model, network, &mut tile);
                assert_eq!(
                    tile, expected,
                    "lanes={} network={:?} model={:?}",
                    lanes, network, model
                );
            }
        }
    }
}

#[test]
fn every_team_size_sorts_an_interleaved_pattern() {
    for exp in 1..=7u32 {
        let lanes = 1usize << exp;
        // Evens ascending then odds descending; touches every lane pair.
        let input: Vec<u32> = (0..lanes as u32)
            .map(|i| if i % 2 == 0 { i } else { lanes as u32 - i })
            .collect();
        let mut expected = input.clone();
        expected.sort_unstable();

        for network in NETWORKS {
            for model in MODELS {
                let mut tile = input.clone();
                sort_with(model, network, &mut tile);
                assert_eq!(tile, expected);
            }
        }
    }
}

#[test]
fn four_lane_documented_scenario() {
    for network in NETWORKS {
        let mut tile = [3u32, 1, 4, 2];
        sort_tile(4, network, &mut tile).unwrap();
        assert_eq!(tile, [1, 2, 3, 4]);
    }
}

#[test]
fn two_lane_duplicate_scenario() {
    for network in NETWORKS {
        let mut tile = [5u32, 5];
        sort_tile(2, network, &mut tile).unwrap();
        assert_eq!(tile, [5, 5]);
    }
}

#[test]
fn single_lane_tile_is_trivially_sorted() {
    for network in NETWORKS {
        let mut tile = [42u32];
        sort_tile(1, network, &mut tile).unwrap();
        assert_eq!(tile, [42]);
    }
}

#[test]
fn sorting_is_idempotent_on_values() {
    let sorted: Vec<u32> = (0..32).map(|i| i / 3).collect();
    for network in NETWORKS {
        for model in MODELS {
            let mut tile = sorted.clone();
            sort_with(model, network, &mut tile);
            assert_eq!(tile, sorted);
        }
    }
}

#[test]
fn all_equal_tile_is_unchanged() {
    for network in NETWORKS {
        let mut tile = vec![7u32; 64];
        sort_tile(64, network, &mut tile).unwrap();
        assert!(tile.iter().all(|&v| v == 7));
    }
}

#[test]
fn non_power_of_two_team_sizes_are_rejected() {
    for bad in [0usize, 3, 5, 6, 7, 9, 12, 24, 100, 127, 129] {
        let mut tile: Vec<u32> = (0..bad as u32).rev().collect();
        let before = tile.clone();
        for network in NETWORKS {
            assert_eq!(
                sort_tile(bad, network, &mut tile),
                Err(SortError::InvalidTeamSize { size: bad })
            );
            assert_eq!(tile, before, "input must not be mutated on rejection");
        }
    }
}

#[test]
fn bitonic_round_count_for_eight_lanes_is_six() {
    let team = TeamSize::new(8).unwrap();
    assert_eq!(Network::Bitonic.round_count(team), 6);
}

#[test]
fn oddeven_round_count_for_eight_lanes_is_six() {
    let team = TeamSize::new(8).unwrap();
    assert_eq!(Network::OddEvenTransposition.round_count(team), 6);
}

fn power_of_two_tiles() -> impl Strategy<Value = Vec<u32>> {
    (0u32..=7).prop_flat_map(|exp| proptest::collection::vec(any::<u32>(), 1usize << exp))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Both networks, both models: output is the ascending permutation
    /// of the input. Comparing against the std sort also proves multiset
    /// preservation - nothing lost, duplicated, or corrupted.
    #[test]
    fn networks_produce_the_ascending_permutation(values in power_of_two_tiles()) {
        let mut expected = values.clone();
        expected.sort_unstable();

        for network in NETWORKS {
            for model in MODELS {
                let mut tile = values.clone();
                sort_with(model, network, &mut tile);
                prop_assert_eq!(&tile, &expected);
            }
        }
    }

    /// Cross-network agreement: identical final sequences even though
    /// the internal round schedules differ.
    #[test]
    fn networks_agree_value_for_value(values in power_of_two_tiles()) {
        let mut bitonic = values.clone();
        let mut oddeven = values;
        sort_with(ExecutionModel::Lockstep, Network::Bitonic, &mut bitonic);
        sort_with(ExecutionModel::Lockstep, Network::OddEvenTransposition, &mut oddeven);
        prop_assert_eq!(bitonic, oddeven);
    }

    /// Duplicate-heavy inputs: a narrow value domain forces ties in
    /// nearly every compared pair.
    #[test]
    fn duplicate_heavy_tiles_sort_correctly(values in (0u32..=7).prop_flat_map(
        |exp| proptest::collection::vec(0u32..4, 1usize << exp)
    )) {
        let mut expected = values.clone();
        expected.sort_unstable();

        for network in NETWORKS {
            for model in MODELS {
                let mut tile = values.clone();
                sort_with(model, network, &mut tile);
                prop_assert_eq!(&tile, &expected);
            }
        }
    }
}
