use alloc::vec::Vec;

use crate::consts::{DEFAULT_STOP_TERMINATOR, DEFAULT_SUPER_TERMINATOR};

/// How a sequence of sub-streams ends.
///
/// Every policy shares the same read algorithm; they differ only in which
/// pattern is checked ahead of the delimiter and in what happens to the bytes
/// that follow a terminator.
///
/// | Policy  | Checked per read        | Finished when        | Bytes after the terminator |
/// |---------|-------------------------|----------------------|----------------------------|
/// | `None`  | delimiter               | source exhausted     | n/a                        |
/// | `Stop`  | terminator, delimiter   | terminator matched   | dropped, never pulled      |
/// | `Super` | terminator, delimiter   | terminator matched   | left in the lookahead      |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// The sequence ends when the source is exhausted.
    #[default]
    None,
    /// The sequence ends at this terminator; anything after it is discarded.
    Stop(Vec<u8>),
    /// The sequence ends at this terminator, which is matched with priority
    /// over the delimiter. Lookahead after it stays available through
    /// [`BoundaryReader::pending`](crate::BoundaryReader::pending).
    Super(Vec<u8>),
}

impl Termination {
    /// A stop terminator using [`DEFAULT_STOP_TERMINATOR`].
    #[must_use]
    pub fn stop() -> Self {
        Self::Stop(DEFAULT_STOP_TERMINATOR.to_vec())
    }

    /// A super terminator using [`DEFAULT_SUPER_TERMINATOR`].
    #[must_use]
    pub fn super_boundary() -> Self {
        Self::Super(DEFAULT_SUPER_TERMINATOR.to_vec())
    }

    /// The terminator pattern, if any.
    #[must_use]
    pub fn terminator(&self) -> Option<&[u8]> {
        match self {
            Self::None => None,
            Self::Stop(pattern) | Self::Super(pattern) => Some(pattern),
        }
    }

    /// Whether lookahead past the terminator is dropped once it matches.
    #[must_use]
    pub fn discards_tail(&self) -> bool {
        matches!(self, Self::Stop(_))
    }
}
