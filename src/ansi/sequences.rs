//! Constant ANSI escape sequences for mouse reporting.
//!
//! See the xterm control sequence reference, "Mouse Tracking".

/// Enable VT200 (normal) mouse tracking: press and release only.
pub const MOUSE_VT200_ON: &str = "\x1b[?1000h";

/// Disable VT200 mouse tracking.
///
/// xterm treats 1000/1002/1003 as one tracking mode, so this also stops
/// any-event tracking.
pub const MOUSE_VT200_OFF: &str = "\x1b[?1000l";

/// Enable any-event tracking: motion is reported with or without a button held.
pub const MOUSE_ANY_EVENT_ON: &str = "\x1b[?1003h";

/// Disable any-event tracking.
pub const MOUSE_ANY_EVENT_OFF: &str = "\x1b[?1003l";

/// Enable SGR extended coordinates (`ESC [ < b ; x ; y M/m`).
pub const MOUSE_SGR_EXT_ON: &str = "\x1b[?1006h";

/// Disable SGR extended coordinates.
pub const MOUSE_SGR_EXT_OFF: &str = "\x1b[?1006l";

/// Full terminal reset (RIS).
pub const FULL_RESET: &str = "\x1bc";

/// Control Sequence Introducer.
pub const CSI: &[u8] = b"\x1b[";

/// Prefix shared by every SGR mouse report.
pub const SGR_MOUSE_PREFIX: &[u8] = b"\x1b[<";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_off_pairs_differ_only_in_final_byte() {
        for (on, off) in [
            (MOUSE_VT200_ON, MOUSE_VT200_OFF),
            (MOUSE_ANY_EVENT_ON, MOUSE_ANY_EVENT_OFF),
            (MOUSE_SGR_EXT_ON, MOUSE_SGR_EXT_OFF),
        ] {
            assert!(on.ends_with('h'));
            assert!(off.ends_with('l'));
            assert_eq!(on[..on.len() - 1], off[..off.len() - 1]);
        }
    }

    #[test]
    fn test_sgr_prefix_extends_csi() {
        assert!(SGR_MOUSE_PREFIX.starts_with(CSI));
        assert_eq!(SGR_MOUSE_PREFIX.last(), Some(&b'<'));
    }
}
