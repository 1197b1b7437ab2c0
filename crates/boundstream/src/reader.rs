//! The sub-stream state machine.
//!
//! ```text
//! NotStarted ──advance──▶ Reading ──delimiter──▶ SubstreamEnded ──advance──▶ Reading …
//!                            │                          │
//!                            └──terminator / end────────┴──▶ Finished
//! ```
//!
//! Every read looks at the lookahead window before returning a byte. The
//! terminator (if the policy has one) is checked first, then the delimiter.
//! A delimiter match consumes the delimiter and peeks once more, so a source
//! ending in `payload · D` or `payload · D · T` finishes at `payload` instead
//! of producing a trailing empty sub-stream.

#![expect(clippy::struct_excessive_bools)]

use alloc::vec::Vec;

use crate::{
    error::{ConfigError, DemuxError},
    options::DemuxOptions,
    source::ByteSource,
    substreams::{Payloads, SubStream, SubStreams},
    window::Window,
};

/// Where a [`BoundaryReader`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemuxState {
    /// No sub-stream has been advanced to yet.
    NotStarted,
    /// The current sub-stream may still return bytes.
    Reading,
    /// The current sub-stream hit its delimiter; call `advance` to continue.
    SubstreamEnded,
    /// No further sub-streams exist.
    Finished,
}

/// Splits a [`ByteSource`] into delimiter-separated sub-streams.
///
/// The reader is a single cursor: sub-stream views handed out by
/// [`substreams`](Self::substreams) and [`next_substream`](Self::next_substream)
/// borrow it, so a view cannot outlive the next advance.
///
/// # Examples
///
/// ```rust
/// use boundstream::BoundaryReader;
///
/// let mut reader = BoundaryReader::new(&b"a-----StreamBoundary-----bc"[..]);
///
/// reader.advance().unwrap();
/// assert_eq!(reader.read_byte(), Ok(Some(b'a')));
/// assert_eq!(reader.read_byte(), Ok(None));
/// assert!(!reader.has_finished());
///
/// reader.advance().unwrap();
/// assert_eq!(reader.read_to_vec(), Ok(b"bc".to_vec()));
/// assert!(reader.has_finished());
/// ```
#[derive(Debug)]
pub struct BoundaryReader<S> {
    source: S,
    options: DemuxOptions,
    window: Window,
    started: bool,
    substream_ended: bool,
    finished: bool,
    closed: bool,
}

impl<S: ByteSource> BoundaryReader<S> {
    /// Read `source` with the default delimiter and no terminator.
    pub fn new(source: S) -> Self {
        Self::from_parts(source, DemuxOptions::default())
    }

    /// Read `source` with explicit options.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the delimiter and the terminator contain one
    /// another. Nothing is read from `source` in that case.
    pub fn with_options(source: S, options: DemuxOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self::from_parts(source, options))
    }

    fn from_parts(source: S, options: DemuxOptions) -> Self {
        let window = Window::new(options.window_capacity());
        Self {
            source,
            options,
            window,
            started: false,
            substream_ended: false,
            finished: false,
            closed: false,
        }
    }

    /// The options this reader was built with.
    pub fn options(&self) -> &DemuxOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DemuxState {
        if self.finished {
            DemuxState::Finished
        } else if self.substream_ended {
            DemuxState::SubstreamEnded
        } else if self.started {
            DemuxState::Reading
        } else {
            DemuxState::NotStarted
        }
    }

    /// Whether no further sub-streams exist.
    pub fn has_finished(&self) -> bool {
        self.finished
    }

    /// Whether the current sub-stream will return no more bytes.
    pub fn is_substream_ended(&self) -> bool {
        self.substream_ended
    }

    /// Move to the next sub-stream.
    ///
    /// If the current sub-stream was not read to its end, the rest of it is
    /// read and discarded first so the next read starts at the first byte of
    /// the following sub-stream. When that discarded sub-stream was the last
    /// one, the advance still succeeds and the new sub-stream is empty and
    /// already ended.
    ///
    /// # Errors
    ///
    /// - [`DemuxError::Exhausted`] if the sequence had already finished.
    /// - [`DemuxError::Source`] if the source fails while discarding.
    pub fn advance(&mut self) -> Result<(), DemuxError<S::Error>> {
        if self.finished {
            return Err(DemuxError::Exhausted);
        }
        if self.started && !self.substream_ended {
            let mut skipped = 0usize;
            while self.read_byte()?.is_some() {
                skipped += 1;
            }
            tracing::debug!(skipped, "discarded unread sub-stream tail");
        }
        self.started = true;
        // A finished sequence keeps its last sub-stream ended.
        self.substream_ended = self.finished;
        Ok(())
    }

    /// Advance and return a view of the new sub-stream.
    ///
    /// # Errors
    ///
    /// See [`advance`](Self::advance).
    pub fn next_substream(&mut self) -> Result<SubStream<'_, S>, DemuxError<S::Error>> {
        self.advance()?;
        Ok(SubStream::new(self))
    }

    /// A view of the current sub-stream.
    pub fn substream(&mut self) -> SubStream<'_, S> {
        SubStream::new(self)
    }

    /// Iterate over the remaining sub-streams.
    pub fn substreams(&mut self) -> SubStreams<'_, S> {
        SubStreams::new(self)
    }

    /// Collect each remaining sub-stream into a `Vec<u8>`.
    pub fn into_payloads(self) -> Payloads<S> {
        Payloads::new(self)
    }

    /// Read one byte of the current sub-stream.
    ///
    /// `Ok(None)` marks the end of the current sub-stream; check
    /// [`has_finished`](Self::has_finished) to tell whether another one
    /// follows. Once a sub-stream has ended this keeps returning `Ok(None)`
    /// without touching the source.
    ///
    /// # Errors
    ///
    /// [`DemuxError::Source`] if the source fails. The sequence is finished
    /// afterwards and later reads return `Ok(None)`.
    pub fn read_byte(&mut self) -> Result<Option<u8>, DemuxError<S::Error>> {
        if self.finished || self.substream_ended {
            return Ok(None);
        }
        // Reading before the first advance reads the first sub-stream.
        self.started = true;
        match self.step() {
            Ok(byte) => Ok(byte),
            Err(err) => {
                tracing::warn!("source failed, finishing the sequence");
                self.substream_ended = true;
                self.finished = true;
                self.window.discard();
                Err(DemuxError::Source(err))
            }
        }
    }

    /// Read bytes of the current sub-stream into `buf`.
    ///
    /// Returns the number of bytes read; `0` means the sub-stream has ended
    /// (or `buf` is empty).
    ///
    /// # Errors
    ///
    /// See [`read_byte`](Self::read_byte).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DemuxError<S::Error>> {
        let mut n = 0;
        while n < buf.len() {
            let Some(byte) = self.read_byte()? else {
                break;
            };
            buf[n] = byte;
            n += 1;
        }
        Ok(n)
    }

    /// Append the rest of the current sub-stream to `out`.
    ///
    /// # Errors
    ///
    /// See [`read_byte`](Self::read_byte).
    pub fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<usize, DemuxError<S::Error>> {
        let start = out.len();
        while let Some(byte) = self.read_byte()? {
            out.push(byte);
        }
        Ok(out.len() - start)
    }

    /// The rest of the current sub-stream.
    ///
    /// # Errors
    ///
    /// See [`read_byte`](Self::read_byte).
    pub fn read_to_vec(&mut self) -> Result<Vec<u8>, DemuxError<S::Error>> {
        let mut out = Vec::new();
        self.read_to_end(&mut out)?;
        Ok(out)
    }

    /// Lookahead bytes pulled from the source but not returned.
    ///
    /// After a stop terminator this is empty. After a super terminator it
    /// starts with the terminator itself.
    pub fn pending(&self) -> Vec<u8> {
        self.window.pending()
    }

    /// Finish the sequence and close the source.
    ///
    /// The source is closed at most once; later calls only keep the reader
    /// finished. Reads return `Ok(None)` afterwards.
    ///
    /// # Errors
    ///
    /// [`DemuxError::Source`] if closing the source fails.
    pub fn close(&mut self) -> Result<(), DemuxError<S::Error>> {
        self.substream_ended = true;
        self.finished = true;
        self.window.discard();
        if core::mem::replace(&mut self.closed, true) {
            return Ok(());
        }
        tracing::debug!("closing source");
        self.source.close().map_err(DemuxError::Source)
    }

    /// Unwrap the source. Lookahead held in the window is lost.
    pub fn into_inner(self) -> S {
        self.source
    }

    fn step(&mut self) -> Result<Option<u8>, S::Error> {
        self.window.fill(&mut self.source)?;

        if self.terminator_visible() {
            tracing::trace!("terminator reached");
            self.terminate();
            return Ok(None);
        }

        if self.window.matches(&self.options.delimiter) {
            self.substream_ended = true;
            for _ in 0..self.options.delimiter.len() {
                self.window.shift_and_pull(&mut self.source)?;
            }
            if self.terminator_visible() {
                tracing::trace!("delimiter followed by terminator");
                self.terminate();
            } else if self.window.at_end() {
                self.finish();
            } else {
                tracing::trace!("sub-stream boundary");
            }
            return Ok(None);
        }

        match self.window.shift_and_pull(&mut self.source)? {
            Some(byte) => Ok(Some(byte)),
            None => {
                self.finish();
                Ok(None)
            }
        }
    }

    fn terminator_visible(&self) -> bool {
        self.options
            .termination
            .terminator()
            .is_some_and(|terminator| self.window.matches(terminator))
    }

    fn terminate(&mut self) {
        if self.options.termination.discards_tail() {
            self.window.discard();
        }
        self.finish();
    }

    fn finish(&mut self) {
        tracing::debug!("sequence finished");
        self.substream_ended = true;
        self.finished = true;
    }
}
