//! Demultiplex a single byte source into delimiter-separated sub-streams.
//!
//! A writer concatenates payloads into one sink, separating them with a
//! literal delimiter (and optionally closing the sequence with a terminator).
//! [`BoundaryReader`] reads them back one sub-stream at a time through a small
//! fixed lookahead window, never buffering a whole payload.
//!
//! ```rust
//! use boundstream::{BoundaryReader, BoundaryWriter};
//!
//! let mut writer = BoundaryWriter::new(Vec::new());
//! for payload in [&b"a"[..], b"bc", b"def"] {
//!     writer.write(payload).unwrap();
//!     writer.delimiter().unwrap();
//! }
//! let encoded = writer.into_inner();
//!
//! let mut reader = BoundaryReader::new(encoded.as_slice());
//! let mut substreams = reader.substreams();
//! let mut decoded = Vec::new();
//! while let Some(substream) = substreams.next() {
//!     decoded.push(substream.unwrap().read_to_vec().unwrap());
//! }
//! assert_eq!(decoded, [&b"a"[..], b"bc", b"def"]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod consts;
mod error;
mod options;
mod policy;
mod reader;
mod source;
mod substreams;
mod window;
mod writer;

#[cfg(test)]
mod tests;

pub use consts::{DEFAULT_DELIMITER, DEFAULT_STOP_TERMINATOR, DEFAULT_SUPER_TERMINATOR};
pub use error::{ConfigError, DemuxError, WriteError};
#[cfg(feature = "std")]
pub use error::IntoIoError;
pub use options::DemuxOptions;
pub use policy::Termination;
pub use reader::{BoundaryReader, DemuxState};
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::ByteSource;
pub use substreams::{Payloads, SubStream, SubStreams};
#[cfg(feature = "std")]
pub use writer::IoSink;
pub use writer::{BoundaryWriter, ByteSink};
