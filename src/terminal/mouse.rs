//! Mouse event types decoded from SGR reports.

use crate::ansi;

/// Mouse button, numbered as the SGR protocol numbers them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Button 1 (usually left).
    #[default]
    Button1,
    /// Button 2 (usually middle).
    Button2,
    /// Button 3 (usually right).
    Button3,
}

/// Kind of mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Pointer moved with no button held.
    Move,
    /// Pointer moved with button 1 held.
    Button1Drag,
    /// Pointer moved with button 2 held.
    Button2Drag,
    /// Pointer moved with button 3 held.
    Button3Drag,
    /// Scroll wheel up.
    ScrollUp,
    /// Scroll wheel down.
    ScrollDown,
    /// Button 1 pressed.
    Button1Down,
    /// Button 1 released.
    Button1Up,
    /// Button 2 pressed.
    Button2Down,
    /// Button 2 released.
    Button2Up,
    /// Button 3 pressed.
    Button3Down,
    /// Button 3 released.
    Button3Up,
}

impl MouseEventKind {
    /// Every kind, in protocol-table order.
    pub const ALL: [Self; 12] = [
        Self::Move,
        Self::Button1Drag,
        Self::Button2Drag,
        Self::Button3Drag,
        Self::ScrollUp,
        Self::ScrollDown,
        Self::Button1Down,
        Self::Button1Up,
        Self::Button2Down,
        Self::Button2Up,
        Self::Button3Down,
        Self::Button3Up,
    ];

    /// Map an SGR button code and terminator to a kind.
    ///
    /// Motion and scroll codes accept either terminator. Button codes 0-2
    /// are a press with `M` and a release with `m`. Any other code,
    /// including codes carrying modifier bits, is unrecognized.
    #[must_use]
    pub fn from_sgr(code: u32, release: bool) -> Option<Self> {
        let kind = match (code, release) {
            (35, _) => Self::Move,
            (32, _) => Self::Button1Drag,
            (33, _) => Self::Button2Drag,
            (34, _) => Self::Button3Drag,
            (64, _) => Self::ScrollUp,
            (65, _) => Self::ScrollDown,
            (0, false) => Self::Button1Down,
            (0, true) => Self::Button1Up,
            (1, false) => Self::Button2Down,
            (1, true) => Self::Button2Up,
            (2, false) => Self::Button3Down,
            (2, true) => Self::Button3Up,
            _ => return None,
        };
        Some(kind)
    }

    /// The SGR button code and whether the report uses the release
    /// terminator.
    #[must_use]
    pub fn to_sgr(self) -> (u32, bool) {
        match self {
            Self::Move => (35, false),
            Self::Button1Drag => (32, false),
            Self::Button2Drag => (33, false),
            Self::Button3Drag => (34, false),
            Self::ScrollUp => (64, false),
            Self::ScrollDown => (65, false),
            Self::Button1Down => (0, false),
            Self::Button1Up => (0, true),
            Self::Button2Down => (1, false),
            Self::Button2Up => (1, true),
            Self::Button3Down => (2, false),
            Self::Button3Up => (2, true),
        }
    }

    /// The drag kind for a button.
    #[must_use]
    pub fn drag(button: MouseButton) -> Self {
        match button {
            MouseButton::Button1 => Self::Button1Drag,
            MouseButton::Button2 => Self::Button2Drag,
            MouseButton::Button3 => Self::Button3Drag,
        }
    }

    /// Button involved, if any.
    #[must_use]
    pub fn button(self) -> Option<MouseButton> {
        match self {
            Self::Button1Drag | Self::Button1Down | Self::Button1Up => Some(MouseButton::Button1),
            Self::Button2Drag | Self::Button2Down | Self::Button2Up => Some(MouseButton::Button2),
            Self::Button3Drag | Self::Button3Down | Self::Button3Up => Some(MouseButton::Button3),
            Self::Move | Self::ScrollUp | Self::ScrollDown => None,
        }
    }

    /// Check if this is a drag (motion with a button held).
    #[must_use]
    pub fn is_drag(self) -> bool {
        matches!(
            self,
            Self::Button1Drag | Self::Button2Drag | Self::Button3Drag
        )
    }

    /// Check if this is a scroll event.
    #[must_use]
    pub fn is_scroll(self) -> bool {
        matches!(self, Self::ScrollUp | Self::ScrollDown)
    }

    /// Check if this is a button press.
    #[must_use]
    pub fn is_press(self) -> bool {
        matches!(
            self,
            Self::Button1Down | Self::Button2Down | Self::Button3Down
        )
    }

    /// Check if this is a button release.
    #[must_use]
    pub fn is_release(self) -> bool {
        matches!(self, Self::Button1Up | Self::Button2Up | Self::Button3Up)
    }
}

/// A decoded SGR mouse report.
///
/// Coordinates are kept exactly as the terminal reports them, which is
/// 1-based (column 1 is the leftmost cell).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawEvent {
    /// Kind of event.
    pub kind: MouseEventKind,
    /// Column (x).
    pub column: u32,
    /// Row (y).
    pub row: u32,
}

impl RawEvent {
    /// Create a new event.
    #[must_use]
    pub fn new(kind: MouseEventKind, column: u32, row: u32) -> Self {
        Self { kind, column, row }
    }

    /// Create a drag event for button 1.
    #[must_use]
    pub fn drag(column: u32, row: u32) -> Self {
        Self::new(MouseEventKind::Button1Drag, column, row)
    }

    /// Position as `(column, row)`.
    #[must_use]
    pub fn position(&self) -> (u32, u32) {
        (self.column, self.row)
    }

    /// Button involved, if any.
    #[must_use]
    pub fn button(&self) -> Option<MouseButton> {
        self.kind.button()
    }

    /// Check if this is a drag event.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        self.kind.is_drag()
    }

    /// Check if this is a scroll event.
    #[must_use]
    pub fn is_scroll(&self) -> bool {
        self.kind.is_scroll()
    }

    /// Encode as the canonical SGR report a terminal would send.
    #[must_use]
    pub fn to_sgr(&self) -> Vec<u8> {
        let (code, release) = self.kind.to_sgr();
        ansi::sgr_mouse_report(code, self.column, self.row, release)
    }
}
