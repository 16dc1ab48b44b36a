//! Fuzz target for the SGR mouse report parser.
//!
//! Tests that the parser handles arbitrary byte sequences without panicking.
//! This is critical since the parser handles untrusted terminal input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sgrmouse::input::{MAX_COORDINATE, parse_events};

fuzz_target!(|data: &[u8]| {
    let events: Vec<_> = parse_events(data).collect();

    // Parsing is a pure function of the buffer
    let again: Vec<_> = parse_events(data).collect();
    assert_eq!(events, again, "parse_events must be restartable");

    // Every report spans at least `ESC [ < 0 ; 0 ; 0 M`
    assert!(events.len() <= data.len() / 9);

    for event in &events {
        assert!(event.column <= MAX_COORDINATE);
        assert!(event.row <= MAX_COORDINATE);

        // Whatever decoded must decode the same way from its canonical form
        let canonical: Vec<_> = parse_events(&event.to_sgr()).collect();
        assert_eq!(canonical.as_slice(), std::slice::from_ref(event));
    }
});
