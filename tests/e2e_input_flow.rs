//! E2E tests for the input path: descriptor → poll → parse → drag deltas.
//!
//! A pipe stands in for the terminal; reports are written to one end and
//! the other end is polled the way a frame loop would.

use sgrmouse::input::{self, DragDelta, DragTracker, SgrDecoder, parse_events};
use sgrmouse::{MouseEventKind, RawEvent};
use std::fs::File;
use std::io::{self, Write};
use std::os::unix::io::FromRawFd;
use std::sync::Once;
use tracing::{debug, info};

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Create a pipe and return both ends as Files for RAII cleanup
fn create_pipe() -> io::Result<(File, File)> {
    let mut fds = [0i32; 2];
    let result = unsafe { libc::pipe(fds.as_mut_ptr()) };
    if result == -1 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: pipe() succeeded, so fds are valid
    let files = unsafe { (File::from_raw_fd(fds[0]), File::from_raw_fd(fds[1])) };
    Ok(files)
}

/// One frame: poll, parse, feed the tracker.
fn frame(source: &File, tracker: &mut DragTracker) -> (Vec<RawEvent>, Vec<DragDelta>) {
    let bytes = input::poll(source).expect("poll should succeed");
    let events: Vec<RawEvent> = parse_events(&bytes).collect();
    let deltas = tracker.update(&events);
    debug!(
        bytes = bytes.len(),
        events = events.len(),
        deltas = deltas.len(),
        "frame"
    );
    (events, deltas)
}

#[test]
fn test_e2e_drag_produces_orbit_delta() {
    setup_test_logging();
    info!("drag from (10,10) to (15,8)");
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut tracker = DragTracker::new();

    write_end.write_all(b"\x1b[<32;10;10M").unwrap();
    let (events, deltas) = frame(&read_end, &mut tracker);
    assert_eq!(events, vec![RawEvent::drag(10, 10)]);
    assert!(deltas.is_empty());

    write_end.write_all(b"\x1b[<32;15;8M").unwrap();
    let (_, deltas) = frame(&read_end, &mut tracker);
    assert_eq!(deltas, vec![DragDelta::new(-5, -4)]);
}

#[test]
fn test_e2e_release_resets_baseline() {
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut tracker = DragTracker::new();

    write_end
        .write_all(b"\x1b[<32;10;10M\x1b[<0;10;10m\x1b[<32;20;20M")
        .unwrap();
    let (events, deltas) = frame(&read_end, &mut tracker);

    assert_eq!(events.len(), 3);
    assert_eq!(events[1].kind, MouseEventKind::Button1Up);
    assert!(deltas.is_empty());
    assert_eq!(tracker.state(), Some((20, 20)));
}

#[test]
fn test_e2e_idle_frame_resets_baseline() {
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut tracker = DragTracker::new();

    write_end.write_all(b"\x1b[<32;1;1M").unwrap();
    frame(&read_end, &mut tracker);

    let (events, _) = frame(&read_end, &mut tracker);
    assert!(events.is_empty());
    assert_eq!(tracker.state(), None);

    write_end.write_all(b"\x1b[<32;9;9M").unwrap();
    let (_, deltas) = frame(&read_end, &mut tracker);
    assert!(deltas.is_empty());
}

#[test]
fn test_e2e_keystrokes_mixed_with_reports() {
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut tracker = DragTracker::new();

    write_end
        .write_all(b"hello\x1b[A\x1b[<32;5;5M\x1b[<99;1;1Mxyz\x1b[<32;6;5M\n")
        .unwrap();
    let (events, deltas) = frame(&read_end, &mut tracker);

    assert_eq!(events, vec![RawEvent::drag(5, 5), RawEvent::drag(6, 5)]);
    assert_eq!(deltas, vec![DragDelta::new(-1, 0)]);
}

#[test]
fn test_e2e_split_report_with_decoder() {
    setup_test_logging();
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut decoder = SgrDecoder::new();

    write_end.write_all(b"\x1b[<32;1").unwrap();
    let first = decoder.feed(&input::poll(&read_end).unwrap());
    assert!(first.is_empty());
    debug!(pending = decoder.pending().len(), "carried fragment");

    write_end.write_all(b"2;34M").unwrap();
    let second = decoder.feed(&input::poll(&read_end).unwrap());
    assert_eq!(second, vec![RawEvent::drag(12, 34)]);
}

#[test]
fn test_e2e_scroll_and_move_pass_through() {
    let (read_end, mut write_end) = create_pipe().unwrap();
    let mut tracker = DragTracker::new();

    write_end
        .write_all(b"\x1b[<35;3;3M\x1b[<64;3;3M\x1b[<65;3;3M")
        .unwrap();
    let (events, deltas) = frame(&read_end, &mut tracker);

    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            MouseEventKind::Move,
            MouseEventKind::ScrollUp,
            MouseEventKind::ScrollDown
        ]
    );
    assert!(deltas.is_empty());
}
