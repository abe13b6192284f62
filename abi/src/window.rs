//! Window flags, geometry constants, and the desktop theme.

use bitflags::bitflags;

use crate::draw::Color32;

/// Hard ceiling on simultaneously existing windows.
pub const MAX_WINDOWS: usize = 16;

/// Window titles are NUL-padded byte arrays of this size (63 usable bytes).
pub const MAX_WINDOW_TITLE: usize = 64;

/// Height of the title bar in pixels; also the hit-test band for dragging.
pub const WINDOW_TITLE_BAR_HEIGHT: i32 = 24;

/// Width of the border drawn around a window.
pub const WINDOW_BORDER_WIDTH: i32 = 2;

pub const WINDOW_MIN_WIDTH: i32 = 120;
pub const WINDOW_MIN_HEIGHT: i32 = 80;

/// Per-window content buffer ceiling in pixels (800x600).
pub const WINDOW_MAX_PIXELS: usize = 800 * 600;

/// Total capacity of the window pixel arena. Sized so every window slot can
/// hold a maximum-size buffer simultaneously.
pub const WINDOW_ARENA_PIXELS: usize = MAX_WINDOWS * WINDOW_MAX_PIXELS;

/// Close button geometry: a square in the title bar, inset from the
/// window's top-right corner.
pub const CLOSE_BUTTON_SIZE: i32 = 20;
pub const CLOSE_BUTTON_OFFSET_X: i32 = 22;
pub const CLOSE_BUTTON_OFFSET_Y: i32 = 2;

/// Stable window identifier, unique for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WindowId(pub u32);

bitflags! {
    /// Window state and capability flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct WindowFlags: u32 {
        const VISIBLE = 0x01;
        const FOCUSED = 0x02;
        const MINIMIZED = 0x04;
        const MAXIMIZED = 0x08;
        const RESIZABLE = 0x10;
        const MOVABLE = 0x20;
        const CLOSABLE = 0x40;

        /// The capabilities a plain application window gets.
        const DEFAULT = Self::RESIZABLE.bits() | Self::MOVABLE.bits() | Self::CLOSABLE.bits();
    }
}

/// Desktop color scheme.
pub mod theme {
    use super::Color32;

    pub const DESKTOP: Color32 = Color32(0xFF1E_1E1E);
    pub const WINDOW_BG: Color32 = Color32(0xFF2D_2D2D);
    pub const BORDER: Color32 = Color32(0xFF40_4040);
    pub const BORDER_FOCUSED: Color32 = Color32(0xFF00_78D4);
    pub const TITLE_BG: Color32 = Color32(0xFF3A_3A3A);
    pub const TITLE_BG_UNFOCUSED: Color32 = Color32(0xFF5A_5A5A);
    pub const TITLE_TEXT: Color32 = Color32::WHITE;
    pub const CLOSE_BUTTON: Color32 = Color32(0xFFFF_5555);
    pub const CURSOR_FILL: Color32 = Color32::WHITE;
    pub const CURSOR_OUTLINE: Color32 = Color32::BLACK;
}
