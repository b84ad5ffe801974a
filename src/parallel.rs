//! # Parallel tile partition driver
//!
//! This module drives the sorting engine across every tile of a larger
//! buffer using Rayon. Tiles are fully independent - disjoint ranges,
//! no shared state, no ordering between them - so they are handed to the
//! parallel iterator as exact chunks and sorted concurrently.

use rayon::prelude::*;

use crate::config::SortConfig;
use crate::error::SortError;
use crate::network::Network;
use crate::team::TeamSize;

/// Sort every tile of `data` in place, ascending within each tile.
///
/// The buffer is partitioned into `data.len() / team_size` contiguous
/// tiles; tile `i` covers `[i * team_size, (i + 1) * team_size)`. Each
/// tile is sorted independently with its own team; there is no
/// cross-tile merge. Tiles run in parallel on Rayon's pool.
///
/// # Arguments
///
/// * `team_size` - Number of lanes per tile; must be a non-zero power of two
/// * `network` - Network topology to run on every tile
/// * `data` - The buffer; its length must be an exact multiple of `team_size`
///
/// # Returns
///
/// `Ok(())` with every tile range sorted, or a [`SortError`] before any
/// mutation.
///
/// # Examples
///
/// ```
/// use tilesort::{sort_buffer, Network};
///
/// let mut data = vec![4u32, 1, 3, 2, 8, 5, 7, 6];
/// sort_buffer(4, Network::Bitonic, &mut data).unwrap();
/// assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn sort_buffer<T>(team_size: usize, network: Network, data: &mut [T]) -> Result<(), SortError>
where
    T: Copy + Ord + Send + Sync,
{
    sort_buffer_with(&SortConfig::default(), team_size, network, data)
}

/// [`sort_buffer`] with an explicit [`SortConfig`].
///
/// With the threaded execution model the total thread count is the
/// number of in-flight tiles times the team size; the adaptive default
/// keeps that sane by falling back to lockstep for wide teams.
pub fn sort_buffer_with<T>(
    config: &SortConfig,
    team_size: usize,
    network: Network,
    data: &mut [T],
) -> Result<(), SortError>
where
    T: Copy + Ord + Send + Sync,
{
    let team = TeamSize::new(team_size)?;
    if data.len() % team.lanes() != 0 {
        return Err(SortError::UnalignedBuffer {
            team: team.lanes(),
            len: data.len(),
        });
    }

    data.par_chunks_exact_mut(team.lanes())
        .for_each(|tile_range| network.sort_in_place(config, team, tile_range));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionModel;

    #[test]
    fn each_tile_is_sorted_independently() {
        // Two tiles whose global order interleaves; a cross-tile merge
        // would produce a different result than per-tile sorting.
        let mut data = vec![9u32, 1, 5, 3, 8, 0, 4, 2];
        sort_buffer(4, Network::Bitonic, &mut data).unwrap();
        assert_eq!(data, vec![1, 3, 5, 9, 0, 2, 4, 8]);
    }

    #[test]
    fn unaligned_buffers_are_rejected_without_mutation() {
        let mut data = vec![3u32, 2, 1, 0, 9];
        let before = data.clone();
        assert_eq!(
            sort_buffer(4, Network::OddEvenTransposition, &mut data),
            Err(SortError::UnalignedBuffer { team: 4, len: 5 })
        );
        assert_eq!(data, before);
    }

    #[test]
    fn empty_buffer_is_a_valid_zero_tile_partition() {
        let mut data: Vec<u32> = vec![];
        sort_buffer(8, Network::Bitonic, &mut data).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn models_agree_across_a_multi_tile_buffer() {
        let mut threaded: Vec<i32> = (0..64).map(|i| (i * 37) % 64).collect();
        let mut lockstep = threaded.clone();

        let cfg = SortConfig::with_execution(ExecutionModel::Threaded);
        sort_buffer_with(&cfg, 16, Network::OddEvenTransposition, &mut threaded).unwrap();
        let cfg = SortConfig::with_execution(ExecutionModel::Lockstep);
        sort_buffer_with(&cfg, 16, Network::OddEvenTransposition, &mut lockstep).unwrap();

        assert_eq!(threaded, lockstep);
    }
}
