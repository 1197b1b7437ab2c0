use bstr::BString;
use thiserror::Error;

/// Rejected configuration, reported before any I/O happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The delimiter and the terminator contain one another, so a match of
    /// one could not be told apart from a match of the other.
    #[error("delimiter {delimiter:?} and terminator {terminator:?} must not contain one another")]
    OverlappingPatterns {
        /// The configured delimiter.
        delimiter: BString,
        /// The configured terminator.
        terminator: BString,
    },
}

/// Errors raised while reading sub-streams from a source with error type `E`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DemuxError<E> {
    /// `advance` was called after the sequence finished.
    #[error("no more sub-streams")]
    Exhausted,
    /// The source failed; the whole sequence is finished afterwards.
    #[error("source error: {0}")]
    Source(E),
}

/// Errors raised while writing to a sink with error type `E`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteError<E> {
    /// A terminator was requested but the writer has no termination policy.
    #[error("no terminator configured")]
    NoTerminator,
    /// The writer was already closed.
    #[error("writer is closed")]
    Closed,
    /// The sink failed.
    #[error("sink error: {0}")]
    Sink(E),
}

#[cfg(feature = "std")]
pub use io_errors::IntoIoError;

#[cfg(feature = "std")]
mod io_errors {
    use core::convert::Infallible;
    use std::io;

    use super::{DemuxError, WriteError};

    /// Source and sink errors that can surface through `std::io`.
    ///
    /// Implemented for [`io::Error`] and for [`Infallible`], so the slice
    /// source and the `Vec<u8>` sink work with `io::copy` as well. Implement
    /// it for a custom error to use the `io::Read` and `io::Write` adapters.
    pub trait IntoIoError {
        /// Convert into an [`io::Error`].
        fn into_io_error(self) -> io::Error;
    }

    impl IntoIoError for io::Error {
        fn into_io_error(self) -> io::Error {
            self
        }
    }

    impl IntoIoError for Infallible {
        fn into_io_error(self) -> io::Error {
            match self {}
        }
    }

    impl<E: IntoIoError> From<DemuxError<E>> for io::Error {
        fn from(err: DemuxError<E>) -> Self {
            match err {
                DemuxError::Exhausted => {
                    io::Error::new(io::ErrorKind::UnexpectedEof, "no more sub-streams")
                }
                DemuxError::Source(err) => err.into_io_error(),
            }
        }
    }

    impl<E: IntoIoError> From<WriteError<E>> for io::Error {
        fn from(err: WriteError<E>) -> Self {
            match err {
                WriteError::NoTerminator => {
                    io::Error::new(io::ErrorKind::InvalidInput, "no terminator configured")
                }
                WriteError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, "writer is closed"),
                WriteError::Sink(err) => err.into_io_error(),
            }
        }
    }
}
