//! Fixed-size lookahead over a [`ByteSource`].
//!
//! The window always shows the next `capacity` unread values of the source.
//! Once the source reports exhaustion every later slot is the end sentinel
//! (`None`) and the source is not pulled again.

use alloc::{collections::VecDeque, vec::Vec};

use crate::source::ByteSource;

/// A byte, or `None` for the end-of-source sentinel.
pub(crate) type Slot = Option<u8>;

#[derive(Debug)]
pub(crate) struct Window {
    slots: VecDeque<Slot>,
    capacity: usize,
    filled: bool,
    source_exhausted: bool,
}

impl Window {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "window needs at least one slot");
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
            filled: false,
            source_exhausted: false,
        }
    }

    /// Populate the window on first use. Later calls are no-ops.
    pub(crate) fn fill<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<(), S::Error> {
        if self.filled {
            return Ok(());
        }
        while self.slots.len() < self.capacity {
            let slot = self.pull(source)?;
            self.slots.push_back(slot);
        }
        self.filled = true;
        Ok(())
    }

    /// Whether the first `pattern.len()` slots are exactly `pattern`.
    ///
    /// An empty pattern never matches: it would mark a boundary at every
    /// position without consuming anything.
    pub(crate) fn matches(&self, pattern: &[u8]) -> bool {
        debug_assert!(pattern.len() <= self.capacity);
        !pattern.is_empty()
            && self.slots.len() >= pattern.len()
            && self
                .slots
                .iter()
                .zip(pattern)
                .all(|(slot, byte)| *slot == Some(*byte))
    }

    /// Return the first slot and refill the back from the source.
    pub(crate) fn shift_and_pull<S: ByteSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Slot, S::Error> {
        let next = self.pull(source)?;
        let first = self.slots.pop_front().flatten();
        self.slots.push_back(next);
        Ok(first)
    }

    /// Whether the source has nothing left beyond what was already returned.
    pub(crate) fn at_end(&self) -> bool {
        self.filled && matches!(self.slots.front(), Some(None) | None)
    }

    /// Bytes held in the window that have not been returned yet.
    pub(crate) fn pending(&self) -> Vec<u8> {
        self.slots.iter().map_while(|slot| *slot).collect()
    }

    /// Drop the lookahead and never pull from the source again.
    pub(crate) fn discard(&mut self) {
        self.slots.clear();
        self.filled = true;
        self.source_exhausted = true;
    }

    fn pull<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> Result<Slot, S::Error> {
        if self.source_exhausted {
            return Ok(None);
        }
        let slot = source.next_byte()?;
        if slot.is_none() {
            self.source_exhausted = true;
        }
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    /// Counts pulls so tests can check the source is left alone.
    struct Counting<'a> {
        data: &'a [u8],
        pulls: usize,
    }

    impl ByteSource for Counting<'_> {
        type Error = core::convert::Infallible;

        fn next_byte(&mut self) -> Result<Option<u8>, Self::Error> {
            self.pulls += 1;
            self.data.next_byte()
        }
    }

    #[test]
    fn fill_pads_short_sources_with_sentinels() {
        let mut source: &[u8] = b"ab";
        let mut window = Window::new(4);
        window.fill(&mut source).unwrap();
        assert_eq!(
            window.slots.iter().copied().collect::<Vec<_>>(),
            vec![Some(b'a'), Some(b'b'), None, None]
        );
    }

    #[test]
    fn source_is_not_pulled_after_exhaustion() {
        let mut source = Counting {
            data: b"a",
            pulls: 0,
        };
        let mut window = Window::new(3);
        window.fill(&mut source).unwrap();
        assert_eq!(source.pulls, 2);

        for _ in 0..5 {
            window.shift_and_pull(&mut source).unwrap();
        }
        assert_eq!(source.pulls, 2);
    }

    #[test]
    fn matches_compares_only_the_pattern_length() {
        let mut source: &[u8] = b"--x";
        let mut window = Window::new(3);
        window.fill(&mut source).unwrap();
        assert!(window.matches(b"--"));
        assert!(window.matches(b"--x"));
        assert!(!window.matches(b"-x"));
        assert!(!window.matches(b""));
    }

    #[test]
    fn sentinel_never_matches_a_byte() {
        let mut source: &[u8] = b"-";
        let mut window = Window::new(2);
        window.fill(&mut source).unwrap();
        assert!(!window.matches(b"--"));
        assert!(window.matches(b"-"));
    }

    #[test]
    fn shift_keeps_the_next_capacity_bytes_visible() {
        let mut source: &[u8] = b"abcd";
        let mut window = Window::new(2);
        window.fill(&mut source).unwrap();

        assert_eq!(window.shift_and_pull(&mut source), Ok(Some(b'a')));
        assert!(window.matches(b"bc"));
        assert_eq!(window.pending(), b"bc");

        assert_eq!(window.shift_and_pull(&mut source), Ok(Some(b'b')));
        assert_eq!(window.shift_and_pull(&mut source), Ok(Some(b'c')));
        assert_eq!(window.pending(), b"d");
        assert!(!window.at_end());
        assert_eq!(window.shift_and_pull(&mut source), Ok(Some(b'd')));
        assert!(window.at_end());
        assert_eq!(window.shift_and_pull(&mut source), Ok(None));
    }

    #[test]
    fn discard_stops_pulling() {
        let mut source = Counting {
            data: b"abcdef",
            pulls: 0,
        };
        let mut window = Window::new(2);
        window.fill(&mut source).unwrap();
        window.discard();
        assert!(window.at_end());
        assert!(window.pending().is_empty());
        assert_eq!(window.shift_and_pull(&mut source), Ok(None));
        assert_eq!(source.pulls, 2);
    }
}
