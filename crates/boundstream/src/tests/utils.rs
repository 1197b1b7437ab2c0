use alloc::vec::Vec;

use quickcheck::QuickCheck;

use crate::{BoundaryReader, DEFAULT_DELIMITER, DemuxError, DemuxOptions};

/// Three times the default delimiter's length, so the window never holds a
/// whole payload.
pub fn long_payload() -> Vec<u8> {
    (0..DEFAULT_DELIMITER.len() * 3)
        .map(|i| b'0' + u8::try_from(i % 75).unwrap())
        .collect()
}

/// `payload · delimiter` for each payload, as the writer produces it.
pub fn encode(payloads: &[&[u8]], delimiter: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for payload in payloads {
        out.extend_from_slice(payload);
        out.extend_from_slice(delimiter);
    }
    out
}

/// Decode by draining each sub-stream through `read_byte`, the way a caller
/// driving the reader by hand would.
pub fn decode_by_hand(
    source: &[u8],
    options: DemuxOptions,
) -> Result<Vec<Vec<u8>>, DemuxError<core::convert::Infallible>> {
    let mut reader = BoundaryReader::with_options(source, options).unwrap();
    let mut results = Vec::new();
    while !reader.has_finished() {
        reader.advance()?;
        let mut current = Vec::new();
        while let Some(byte) = reader.read_byte()? {
            current.push(byte);
        }
        results.push(current);
    }
    Ok(results)
}

/// Decode through the owning iterator.
pub fn decode(source: &[u8], options: DemuxOptions) -> Vec<Vec<u8>> {
    BoundaryReader::with_options(source, options)
        .unwrap()
        .into_payloads()
        .map(Result::unwrap)
        .collect()
}

pub fn runner() -> QuickCheck {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new().tests(tests)
}
