//! # TILESORT: Team-parallel in-place sorting networks
//!
//! TILESORT sorts fixed-size tiles of values with workgroup-style
//! compare-exchange networks: a team of cooperating lanes stages a tile
//! into shared scratch, runs a fixed schedule of compare-and-
//! conditionally-exchange rounds separated by full-team barriers, and
//! writes the sorted tile back in place.
//!
//! ## Overview
//!
//! The library focuses on:
//!
//! - Race-free neighbor reads without locks: barriers plus a
//!   single-writer-per-slot rule per round are the whole coordination
//!   story
//! - Two network topologies with one external contract: a bitonic merge
//!   network (single-owner writes) and an odd-even transposition-style
//!   network (symmetric dual writes)
//! - Two execution models with identical results: dedicated lane
//!   threads, or a deterministic single-threaded lockstep simulation
//!
//! ## Components
//!
//! 1. **Team & Barrier** ([`team`]): fixed power-of-two lane groups with
//!    a rendezvous that doubles as the memory-visibility fence.
//!
//! 2. **Tile staging** ([`tile`]): one load pass into aligned scratch,
//!    one writeback pass out; tiles live for exactly one sort.
//!
//! 3. **Networks** ([`network`]): immutable round schedules, pure
//!    functions of lane id, round, and team size.
//!
//! ## Usage
//!
//! Sort one tile in place:
//!
//! ```
//! use tilesort::{sort_tile, Network};
//!
//! let mut tile = [3u32, 1, 4, 2];
//! sort_tile(4, Network::Bitonic, &mut tile).unwrap();
//! assert_eq!(tile, [1, 2, 3, 4]);
//! ```
//!
//! Sort every tile of a larger buffer, tiles in parallel:
//!
//! ```
//! use tilesort::{sort_buffer, Network};
//!
//! let mut data: Vec<u32> = (0..64).rev().collect();
//! sort_buffer(8, Network::OddEvenTransposition, &mut data).unwrap();
//! for chunk in data.chunks(8) {
//!     assert!(chunk.windows(2).all(|w| w[0] <= w[1]));
//! }
//! ```
//!
//! Tiles are sorted independently; there is no cross-tile merge.

pub mod config;
pub mod error;
pub mod network;
pub mod parallel;
pub mod team;
pub mod tile;
pub mod utils;

// Re-export primary components
pub use config::{ExecutionModel, SortConfig};
pub use error::SortError;
pub use network::Network;
pub use parallel::{sort_buffer, sort_buffer_with};
pub use team::{Barrier, Lane, Team, TeamSize};
pub use tile::Tile;
pub use utils::{is_sorted, sort_padded};

/// Sort one tile of `team_size` elements in place, ascending.
///
/// This is the main entry point for the library. The tile is staged into
/// shared scratch, run through the selected network's full round
/// schedule, and written back; no other memory is touched. Ties may
/// reorder (the networks are not stable), but the multiset of values is
/// preserved exactly.
///
/// # Arguments
///
/// * `team_size` - Number of lanes; must be a non-zero power of two
/// * `network` - Network topology to run
/// * `tile` - The tile; its length must equal `team_size`
///
/// # Returns
///
/// `Ok(())` with `tile` sorted, or a [`SortError`] before any mutation.
///
/// # Examples
///
/// ```
/// use tilesort::{sort_tile, Network, SortError};
///
/// let mut pair = [5u32, 5];
/// sort_tile(2, Network::Bitonic, &mut pair).unwrap();
/// assert_eq!(pair, [5, 5]);
///
/// let mut tile = [1u32, 2, 3];
/// assert_eq!(
///     sort_tile(3, Network::Bitonic, &mut tile),
///     Err(SortError::InvalidTeamSize { size: 3 })
/// );
/// ```
pub fn sort_tile<T>(team_size: usize, network: Network, tile: &mut [T]) -> Result<(), SortError>
where
    T: Copy + Ord + Send + Sync,
{
    sort_tile_with(&SortConfig::default(), team_size, network, tile)
}

/// [`sort_tile`] with an explicit [`SortConfig`].
///
/// # Arguments
///
/// * `config` - Execution model and lane-thread parameters
/// * `team_size` - Number of lanes; must be a non-zero power of two
/// * `network` - Network topology to run
/// * `tile` - The tile; its length must equal `team_size`
pub fn sort_tile_with<T>(
    config: &SortConfig,
    team_size: usize,
    network: Network,
    tile: &mut [T],
) -> Result<(), SortError>
where
    T: Copy + Ord + Send + Sync,
{
    let team = TeamSize::new(team_size)?;
    if tile.len() != team.lanes() {
        return Err(SortError::TileSizeMismatch {
            team: team.lanes(),
            tile: tile.len(),
        });
    }
    network.sort_in_place(config, team, tile);
    Ok(())
}

/// Version information for the TILESORT library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
