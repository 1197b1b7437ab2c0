//! Iteration over the sub-streams of a [`BoundaryReader`].
//!
//! Sub-streams are not independent objects. [`SubStream`] is a borrow of the
//! one reader, and [`SubStreams::next`] reborrows it for each step, so a view
//! handed out by one step is gone before the next step runs. Reading a view
//! after the reader has advanced is impossible by construction.

use alloc::vec::Vec;

use crate::{error::DemuxError, reader::BoundaryReader, source::ByteSource};

/// A view of the current sub-stream of a [`BoundaryReader`].
#[derive(Debug)]
pub struct SubStream<'a, S> {
    reader: &'a mut BoundaryReader<S>,
}

impl<'a, S: ByteSource> SubStream<'a, S> {
    pub(crate) fn new(reader: &'a mut BoundaryReader<S>) -> Self {
        Self { reader }
    }

    /// Read one byte; `Ok(None)` at the end of this sub-stream.
    ///
    /// # Errors
    ///
    /// See [`BoundaryReader::read_byte`].
    pub fn read_byte(&mut self) -> Result<Option<u8>, DemuxError<S::Error>> {
        self.reader.read_byte()
    }

    /// Read into `buf`, returning how many bytes were written.
    ///
    /// # Errors
    ///
    /// See [`BoundaryReader::read_byte`].
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DemuxError<S::Error>> {
        self.reader.read(buf)
    }

    /// The rest of this sub-stream.
    ///
    /// # Errors
    ///
    /// See [`BoundaryReader::read_byte`].
    pub fn read_to_vec(&mut self) -> Result<Vec<u8>, DemuxError<S::Error>> {
        self.reader.read_to_vec()
    }

    /// Whether this sub-stream will return no more bytes.
    pub fn is_ended(&self) -> bool {
        self.reader.is_substream_ended()
    }

    /// Whether this is known to be the last sub-stream.
    pub fn is_last(&self) -> bool {
        self.reader.has_finished()
    }
}

#[cfg(feature = "std")]
impl<S> std::io::Read for SubStream<'_, S>
where
    S: ByteSource,
    S::Error: crate::IntoIoError,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(self.reader.read(buf)?)
    }
}

/// Lending iterator over the remaining sub-streams of a reader.
///
/// `has_next` only inspects state and can be called any number of times.
/// `next` advances, discarding whatever the caller left unread in the
/// previous sub-stream.
///
/// # Examples
///
/// ```rust
/// use boundstream::{BoundaryReader, DemuxOptions};
///
/// let options = DemuxOptions::default().with_delimiter(*b"|");
/// let mut reader = BoundaryReader::with_options(&b"one|two|three|"[..], options).unwrap();
/// let mut substreams = reader.substreams();
///
/// substreams.next().unwrap().unwrap(); // skipped
/// let two = substreams.next().unwrap().unwrap().read_to_vec().unwrap();
/// assert_eq!(two, b"two");
/// ```
#[derive(Debug)]
pub struct SubStreams<'a, S> {
    reader: &'a mut BoundaryReader<S>,
}

impl<'a, S: ByteSource> SubStreams<'a, S> {
    pub(crate) fn new(reader: &'a mut BoundaryReader<S>) -> Self {
        Self { reader }
    }

    /// Whether the sequence has not finished yet.
    ///
    /// When this returns `true` the following `next` always yields a view.
    /// If the current sub-stream is unread and turns out to be the last,
    /// that view is empty and already ended.
    pub fn has_next(&self) -> bool {
        !self.reader.has_finished()
    }

    /// Advance to the next sub-stream.
    ///
    /// Returns `None` exactly when [`has_next`](Self::has_next) is `false`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<SubStream<'_, S>, DemuxError<S::Error>>> {
        match self.reader.advance() {
            Ok(()) => Some(Ok(SubStream::new(&mut *self.reader))),
            Err(DemuxError::Exhausted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

/// Iterator collecting each remaining sub-stream into a `Vec<u8>`.
///
/// A source error is yielded once; the iterator ends after it.
#[derive(Debug)]
pub struct Payloads<S> {
    reader: BoundaryReader<S>,
}

impl<S: ByteSource> Payloads<S> {
    pub(crate) fn new(reader: BoundaryReader<S>) -> Self {
        Self { reader }
    }

    /// Unwrap the reader.
    pub fn into_reader(self) -> BoundaryReader<S> {
        self.reader
    }
}

impl<S: ByteSource> Iterator for Payloads<S> {
    type Item = Result<Vec<u8>, DemuxError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.advance() {
            Ok(()) => Some(self.reader.read_to_vec()),
            Err(DemuxError::Exhausted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<S: ByteSource> core::iter::FusedIterator for Payloads<S> {}
