use alloc::vec::Vec;

use crate::{
    error::{ConfigError, WriteError},
    options::DemuxOptions,
};

/// A push-based byte sink.
pub trait ByteSink {
    /// Error produced by the underlying handle.
    type Error;

    /// Append `bytes`.
    ///
    /// # Errors
    ///
    /// Whatever the underlying handle reports.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Push buffered bytes to the underlying handle.
    ///
    /// # Errors
    ///
    /// Whatever the underlying handle reports.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Release the underlying handle. Called at most once by the writer.
    ///
    /// # Errors
    ///
    /// Whatever the underlying handle reports.
    fn close(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }
}

impl ByteSink for Vec<u8> {
    type Error = core::convert::Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<K: ByteSink + ?Sized> ByteSink for &mut K {
    type Error = K::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Writes payloads separated by literal delimiters.
///
/// The writer does no escaping: a payload that contains the delimiter will
/// be split by the reader.
///
/// # Examples
///
/// ```rust
/// use boundstream::{BoundaryWriter, DemuxOptions};
///
/// let options = DemuxOptions::default().with_delimiter(*b"|").with_stop(*b"$");
/// let mut writer = BoundaryWriter::with_options(Vec::new(), options).unwrap();
/// writer.write(b"abc").unwrap();
/// writer.delimiter().unwrap();
/// writer.write(b"def").unwrap();
/// writer.terminator().unwrap();
/// assert_eq!(writer.into_inner(), b"abc|def$");
/// ```
#[derive(Debug)]
pub struct BoundaryWriter<K> {
    sink: K,
    options: DemuxOptions,
    closed: bool,
}

impl<K: ByteSink> BoundaryWriter<K> {
    /// Write to `sink` with the default delimiter and no terminator.
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            options: DemuxOptions::default(),
            closed: false,
        }
    }

    /// Write to `sink` with explicit options.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the delimiter and the terminator contain one
    /// another.
    pub fn with_options(sink: K, options: DemuxOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self {
            sink,
            options,
            closed: false,
        })
    }

    /// The options this writer was built with.
    pub fn options(&self) -> &DemuxOptions {
        &self.options
    }

    /// Append payload bytes.
    ///
    /// # Errors
    ///
    /// [`WriteError::Closed`] after [`close`](Self::close), or
    /// [`WriteError::Sink`].
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), WriteError<K::Error>> {
        self.ensure_open()?;
        self.sink.write_bytes(bytes).map_err(WriteError::Sink)
    }

    /// Append the delimiter, ending the current payload.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    pub fn delimiter(&mut self) -> Result<(), WriteError<K::Error>> {
        self.ensure_open()?;
        self.sink
            .write_bytes(&self.options.delimiter)
            .map_err(WriteError::Sink)
    }

    /// Append the terminator, ending the whole sequence.
    ///
    /// # Errors
    ///
    /// [`WriteError::NoTerminator`] without a stop or super terminator,
    /// otherwise see [`write`](Self::write).
    pub fn terminator(&mut self) -> Result<(), WriteError<K::Error>> {
        self.ensure_open()?;
        let Some(terminator) = self.options.termination.terminator() else {
            return Err(WriteError::NoTerminator);
        };
        self.sink.write_bytes(terminator).map_err(WriteError::Sink)
    }

    /// Flush the sink.
    ///
    /// # Errors
    ///
    /// See [`write`](Self::write).
    pub fn flush(&mut self) -> Result<(), WriteError<K::Error>> {
        self.ensure_open()?;
        self.sink.flush().map_err(WriteError::Sink)
    }

    /// Close the sink. Later calls are no-ops; later writes fail.
    ///
    /// # Errors
    ///
    /// [`WriteError::Sink`] if closing the sink fails.
    pub fn close(&mut self) -> Result<(), WriteError<K::Error>> {
        if core::mem::replace(&mut self.closed, true) {
            return Ok(());
        }
        tracing::debug!("closing sink");
        self.sink.close().map_err(WriteError::Sink)
    }

    /// Unwrap the sink without closing it.
    pub fn into_inner(self) -> K {
        self.sink
    }

    fn ensure_open(&self) -> Result<(), WriteError<K::Error>> {
        if self.closed {
            return Err(WriteError::Closed);
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use io_sink::IoSink;

#[cfg(feature = "std")]
mod io_sink {
    use std::io::{self, Write};

    use super::{BoundaryWriter, ByteSink};

    /// Adapts any [`io::Write`] into a [`ByteSink`].
    #[derive(Debug)]
    pub struct IoSink<W> {
        inner: W,
    }

    impl<W: Write> IoSink<W> {
        /// Wrap `inner`.
        pub fn new(inner: W) -> Self {
            Self { inner }
        }

        /// Unwrap the writer.
        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    impl<W: Write> ByteSink for IoSink<W> {
        type Error = io::Error;

        fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
            self.inner.write_all(bytes)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.inner.flush()
        }
    }

    impl<K> Write for BoundaryWriter<K>
    where
        K: ByteSink,
        K::Error: crate::IntoIoError,
    {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            BoundaryWriter::write(self, buf)?;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(BoundaryWriter::flush(self)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_DELIMITER, DEFAULT_STOP_TERMINATOR, Termination};

    #[test]
    fn writes_default_delimiter_after_each_payload() {
        let mut writer = BoundaryWriter::new(Vec::new());
        for payload in [&b"a"[..], b"bc", b"def"] {
            writer.write(payload).unwrap();
            writer.delimiter().unwrap();
        }

        let mut expected = Vec::new();
        for payload in [&b"a"[..], b"bc", b"def"] {
            expected.extend_from_slice(payload);
            expected.extend_from_slice(DEFAULT_DELIMITER);
        }
        assert_eq!(writer.into_inner(), expected);
    }

    #[test]
    fn terminator_requires_a_policy() {
        let mut writer = BoundaryWriter::new(Vec::new());
        assert_eq!(writer.terminator(), Err(WriteError::NoTerminator));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn writes_default_stop_terminator() {
        let options = DemuxOptions {
            termination: Termination::stop(),
            ..DemuxOptions::default()
        };
        let mut writer = BoundaryWriter::with_options(Vec::new(), options).unwrap();
        writer.write(b"x").unwrap();
        writer.terminator().unwrap();

        let mut expected = b"x".to_vec();
        expected.extend_from_slice(DEFAULT_STOP_TERMINATOR);
        assert_eq!(writer.into_inner(), expected);
    }

    #[test]
    fn rejects_overlapping_patterns() {
        let options = DemuxOptions::default()
            .with_delimiter(*b"xxx")
            .with_super(*b"xxx");
        assert!(BoundaryWriter::with_options(Vec::new(), options).is_err());
    }

    #[test]
    fn closed_writer_refuses_writes() {
        let mut writer = BoundaryWriter::new(Vec::new());
        writer.close().unwrap();
        writer.close().unwrap();
        assert_eq!(writer.write(b"late"), Err(WriteError::Closed));
        assert_eq!(writer.delimiter(), Err(WriteError::Closed));
    }

    #[cfg(feature = "std")]
    #[test]
    fn vec_backed_writer_works_with_io_copy() {
        let mut writer = BoundaryWriter::with_options(
            Vec::new(),
            DemuxOptions::default().with_delimiter(*b"|"),
        )
        .unwrap();
        std::io::copy(&mut &b"payload"[..], &mut writer).unwrap();
        writer.delimiter().unwrap();
        writer.close().unwrap();

        let err = std::io::Write::write(&mut writer, b"late").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
        assert_eq!(writer.into_inner(), b"payload|");
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_write_adapter_passes_bytes_through() {
        use std::io::Write;

        let mut writer = BoundaryWriter::with_options(
            IoSink::new(Vec::new()),
            DemuxOptions::default().with_delimiter(*b"|"),
        )
        .unwrap();
        write!(writer, "n={}", 42).unwrap();
        writer.delimiter().unwrap();
        Write::flush(&mut writer).unwrap();
        assert_eq!(writer.into_inner().into_inner(), b"n=42|");
    }
}
