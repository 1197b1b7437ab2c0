#![no_main]

use arbitrary::Arbitrary;
use boundstream::{BoundaryReader, DemuxOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    delimiter: Vec<u8>,
    terminator: Option<(Vec<u8>, bool)>,
    source: Vec<u8>,
    /// Bitmask choosing which sub-streams are skipped unread.
    skip: u64,
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

fuzz_target!(|input: Input| {
    let mut options = DemuxOptions::default().with_delimiter(input.delimiter.clone());
    if let Some((terminator, stop)) = input.terminator.clone() {
        options = if stop {
            options.with_stop(terminator)
        } else {
            options.with_super(terminator)
        };
    }
    let Ok(mut reader) = BoundaryReader::with_options(input.source.as_slice(), options.clone())
    else {
        return;
    };

    let mut decoded = Vec::new();
    let mut substreams = reader.substreams();
    let mut index = 0u32;
    while let Some(substream) = substreams.next() {
        let mut substream = substream.unwrap();
        if input.skip.checked_shr(index).is_some_and(|bits| bits & 1 == 1) {
            index += 1;
            continue;
        }
        let payload = substream.read_to_vec().unwrap();
        assert!(!contains(&payload, &input.delimiter));
        assert_eq!(substream.read_byte(), Ok(None));
        decoded.push(payload);
        index += 1;
    }
    assert!(reader.has_finished());

    // Without skipping or a terminator the source is the decoded payloads
    // joined by the delimiter, plus at most one trailing delimiter.
    if input.skip == 0 && options.termination.terminator().is_none() {
        let joined = decoded.join(input.delimiter.as_slice());
        let mut with_trailing = joined.clone();
        with_trailing.extend_from_slice(&input.delimiter);
        assert!(input.source == joined || input.source == with_trailing);
    }
});
