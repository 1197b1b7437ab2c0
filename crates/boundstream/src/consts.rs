/// Delimiter used when none is configured explicitly.
pub const DEFAULT_DELIMITER: &[u8] = b"-----StreamBoundary-----";

/// Terminator used by [`Termination::stop`](crate::Termination::stop).
pub const DEFAULT_STOP_TERMINATOR: &[u8] = b"-----StreamStopBoundary-----";

/// Terminator used by [`Termination::super_boundary`](crate::Termination::super_boundary).
pub const DEFAULT_SUPER_TERMINATOR: &[u8] = b"-----StreamSuperBoundary-----";

#[cfg(test)]
mod tests {
    use bstr::ByteSlice;

    use super::*;

    #[test]
    fn default_delimiter_is_24_bytes() {
        assert_eq!(DEFAULT_DELIMITER.len(), 24);
    }

    #[test]
    fn default_terminators_do_not_overlap_the_delimiter() {
        for terminator in [DEFAULT_STOP_TERMINATOR, DEFAULT_SUPER_TERMINATOR] {
            assert!(!terminator.contains_str(DEFAULT_DELIMITER));
            assert!(!DEFAULT_DELIMITER.contains_str(terminator));
        }
    }
}
