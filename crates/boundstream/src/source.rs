/// A pull-based source of bytes.
///
/// [`BoundaryReader`](crate::BoundaryReader) asks for one byte at a time and
/// stops pulling after the first `Ok(None)`.
pub trait ByteSource {
    /// Error produced by the underlying handle.
    type Error;

    /// The next byte, or `Ok(None)` once the source is exhausted.
    ///
    /// # Errors
    ///
    /// Whatever the underlying handle reports.
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Release the underlying handle. Called at most once by the reader.
    ///
    /// # Errors
    ///
    /// Whatever the underlying handle reports.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ByteSource for &[u8] {
    type Error = core::convert::Infallible;

    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let Some((&first, rest)) = self.split_first() else {
            return Ok(None);
        };
        *self = rest;
        Ok(Some(first))
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        (**self).next_byte()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

#[cfg(feature = "std")]
pub use io_source::IoSource;

#[cfg(feature = "std")]
mod io_source {
    use std::io::{self, BufRead, BufReader, Read};

    use super::ByteSource;

    /// Adapts any [`io::Read`] into a [`ByteSource`], buffering reads.
    ///
    /// Interrupted reads are retried.
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: BufReader<R>,
    }

    impl<R: Read> IoSource<R> {
        /// Wrap `inner` with a default-sized buffer.
        pub fn new(inner: R) -> Self {
            Self {
                inner: BufReader::new(inner),
            }
        }

        /// Wrap `inner` with a buffer of `capacity` bytes.
        pub fn with_capacity(capacity: usize, inner: R) -> Self {
            Self {
                inner: BufReader::with_capacity(capacity, inner),
            }
        }

        /// Unwrap the reader. Buffered bytes that were not consumed are lost.
        pub fn into_inner(self) -> R {
            self.inner.into_inner()
        }
    }

    impl<R: Read> ByteSource for IoSource<R> {
        type Error = io::Error;

        fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            loop {
                match self.inner.fill_buf() {
                    Ok([]) => return Ok(None),
                    Ok(buf) => {
                        let byte = buf[0];
                        self.inner.consume(1);
                        return Ok(Some(byte));
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(err),
                }
            }
        }
    }
}
