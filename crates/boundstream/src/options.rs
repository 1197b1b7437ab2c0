use alloc::vec::Vec;

use bstr::{BString, ByteSlice};

use crate::{consts::DEFAULT_DELIMITER, error::ConfigError, policy::Termination};

/// Configuration shared by [`BoundaryReader`](crate::BoundaryReader) and
/// [`BoundaryWriter`](crate::BoundaryWriter).
///
/// Both sides of a stream must agree on these values.
///
/// # Examples
///
/// ```rust
/// use boundstream::{BoundaryReader, DemuxOptions};
///
/// let options = DemuxOptions::default()
///     .with_delimiter(*b"@@")
///     .with_stop(*b"###");
/// let reader = BoundaryReader::with_options(&b"a@@b###junk"[..], options).unwrap();
/// let payloads: Vec<_> = reader.into_payloads().map(Result::unwrap).collect();
/// assert_eq!(payloads, [&b"a"[..], b"b"]);
/// ```
///
/// # Default
///
/// [`DEFAULT_DELIMITER`] without a terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemuxOptions {
    /// Literal separating consecutive sub-streams.
    ///
    /// An empty delimiter never matches, so the whole source is read as a
    /// single sub-stream.
    ///
    /// # Default
    ///
    /// [`DEFAULT_DELIMITER`]
    pub delimiter: Vec<u8>,

    /// How the sequence ends.
    ///
    /// # Default
    ///
    /// [`Termination::None`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub termination: Termination,
}

impl Default for DemuxOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_vec(),
            termination: Termination::None,
        }
    }
}

impl DemuxOptions {
    /// Replace the delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// End the sequence at a stop terminator.
    #[must_use]
    pub fn with_stop(mut self, terminator: impl Into<Vec<u8>>) -> Self {
        self.termination = Termination::Stop(terminator.into());
        self
    }

    /// End the sequence at a super terminator.
    #[must_use]
    pub fn with_super(mut self, terminator: impl Into<Vec<u8>>) -> Self {
        self.termination = Termination::Super(terminator.into());
        self
    }

    /// Check that the delimiter and the terminator do not contain one
    /// another.
    ///
    /// # Errors
    ///
    /// [`ConfigError::OverlappingPatterns`] when either pattern is a
    /// contiguous substring of the other. An empty pattern is a substring of
    /// everything, so an empty terminator is always rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(terminator) = self.termination.terminator() else {
            return Ok(());
        };
        if self.delimiter.contains_str(terminator) || terminator.contains_str(&self.delimiter) {
            return Err(ConfigError::OverlappingPatterns {
                delimiter: BString::from(self.delimiter.as_slice()),
                terminator: BString::from(terminator),
            });
        }
        Ok(())
    }

    /// Number of lookahead slots needed to recognize either pattern.
    ///
    /// Never less than one, so exhaustion of the source is always visible.
    #[must_use]
    pub fn window_capacity(&self) -> usize {
        let terminator = self.termination.terminator().map_or(0, <[u8]>::len);
        self.delimiter.len().max(terminator).max(1)
    }
}
