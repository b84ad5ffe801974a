//! Error types for the tile sorting engine
//!
//! Every recoverable failure is a precondition violation detected before
//! any element of the caller's buffer is touched. Synchronization defects
//! (a lane that never reaches a barrier) are programming errors and are
//! deliberately not represented here.

use std::error::Error;
use std::fmt;

/// Errors reported by the sorting entry points.
///
/// All variants are rejected up front: when a sort call returns an error,
/// the caller's buffer has not been mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortError {
    /// The requested team size is zero or not a power of two.
    ///
    /// The compare-exchange schedules are only defined for power-of-two
    /// teams; callers must pad or reject other sizes.
    InvalidTeamSize {
        /// The rejected size
        size: usize,
    },

    /// A tile view was not exactly one team's worth of elements.
    TileSizeMismatch {
        /// Number of lanes in the team
        team: usize,
        /// Length of the tile view that was supplied
        tile: usize,
    },

    /// A buffer handed to the partition driver is not an exact multiple
    /// of the team size, so it cannot be cut into full tiles.
    UnalignedBuffer {
        /// Number of lanes in the team
        team: usize,
        /// Length of the buffer that was supplied
        len: usize,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidTeamSize { size } => {
                write!(f, "team size {} is not a non-zero power of two", size)
            }
            SortError::TileSizeMismatch { team, tile } => {
                write!(
                    f,
                    "tile of length {} does not match team of {} lanes",
                    tile, team
                )
            }
            SortError::UnalignedBuffer { team, len } => {
                write!(
                    f,
                    "buffer of length {} is not a multiple of the team size {}",
                    len, team
                )
            }
        }
    }
}

impl Error for SortError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_offending_sizes() {
        let e = SortError::InvalidTeamSize { size: 6 };
        assert!(e.to_string().contains('6'));

        let e = SortError::TileSizeMismatch { team: 8, tile: 5 };
        let msg = e.to_string();
        assert!(msg.contains('8') && msg.contains('5'));

        let e = SortError::UnalignedBuffer { team: 4, len: 10 };
        let msg = e.to_string();
        assert!(msg.contains('4') && msg.contains("10"));
    }
}
