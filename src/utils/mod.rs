//! Utility functions and helpers

use num_traits::Bounded;

use crate::config::SortConfig;
use crate::error::SortError;
use crate::network::Network;
use crate::parallel::sort_buffer_with;
use crate::team::TeamSize;

/// Check that a slice is in non-descending order.
pub fn is_sorted<T: PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Sort a buffer whose length is not a multiple of the team size by
/// padding the final tile with `T::max_value()` sentinels.
///
/// The engine itself only accepts full tiles; this helper implements the
/// pad-or-reject contract on the caller's side of that line. The vector
/// is grown to the next multiple of `team_size`, every tile is sorted,
/// and the sentinels (which the final tile's sort pushes to its end) are
/// truncated away, restoring the original length.
///
/// Like [`sort_buffer`](crate::sort_buffer), tiles are independent: the
/// result is one sorted run per tile, not a globally sorted buffer. Any
/// genuine `T::max_value()` elements in the last tile keep their place
/// ahead of the sentinels, so none are lost.
///
/// # Arguments
///
/// * `team_size` - Number of lanes per tile; must be a non-zero power of two
/// * `network` - Network topology to run on every tile
/// * `data` - The buffer; any length
pub fn sort_padded<T>(team_size: usize, network: Network, data: &mut Vec<T>) -> Result<(), SortError>
where
    T: Copy + Ord + Bounded + Send + Sync,
{
    let team = TeamSize::new(team_size)?;
    let original = data.len();
    let remainder = original % team.lanes();
    if remainder != 0 {
        data.resize(original + team.lanes() - remainder, T::max_value());
    }
    let result = sort_buffer_with(&SortConfig::default(), team_size, network, data);
    debug_assert!(result.is_ok());
    data.truncate(original);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_sorted_matches_windows_semantics() {
        assert!(is_sorted::<u32>(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2, 3]));
        assert!(!is_sorted(&[2, 1]));
    }

    #[test]
    fn padding_sorts_a_partial_final_tile() {
        let mut data = vec![9u32, 2, 7, 4, 6, 1];
        sort_padded(4, Network::Bitonic, &mut data).unwrap();
        assert_eq!(data.len(), 6);
        assert_eq!(&data[..4], &[2, 4, 7, 9]);
        assert_eq!(&data[4..], &[1, 6]);
    }

    #[test]
    fn genuine_max_values_survive_padding() {
        let mut data = vec![u32::MAX, 3, 1];
        sort_padded(4, Network::OddEvenTransposition, &mut data).unwrap();
        assert_eq!(data, vec![1, 3, u32::MAX]);
    }

    #[test]
    fn aligned_buffers_need_no_padding() {
        let mut data = vec![4u8, 3, 2, 1];
        sort_padded(4, Network::Bitonic, &mut data).unwrap();
        assert_eq!(data, vec![1, 2, 3, 4]);
    }
}
