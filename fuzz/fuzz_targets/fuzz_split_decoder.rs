//! Fuzz target for the carry-over decoder.
//!
//! Feeding a buffer in two pieces must find the same events as parsing the
//! whole buffer at once, unless the split fragment was too long to carry.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sgrmouse::input::{MAX_CARRY, SgrDecoder, parse_events};

#[derive(Arbitrary, Debug)]
struct Input {
    data: Vec<u8>,
    split: usize,
}

fuzz_target!(|input: Input| {
    let at = input.split % (input.data.len() + 1);
    let (head, tail) = input.data.split_at(at);

    let mut decoder = SgrDecoder::new();
    let mut decoded = decoder.feed(head);
    decoded.extend(decoder.feed(tail));
    assert!(decoder.pending().len() <= MAX_CARRY);

    let mut head_events = parse_events(head);
    head_events.by_ref().for_each(drop);
    let dropped = head_events
        .incomplete_tail()
        .is_some_and(|fragment| fragment.len() > MAX_CARRY);

    if !dropped {
        let whole: Vec<_> = parse_events(&input.data).collect();
        assert_eq!(decoded, whole, "split feeding must match whole-buffer parsing");
    }
});
