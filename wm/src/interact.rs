//! Pointer interaction: hit testing and the press/drag/release state
//! machine.
//!
//! Presses are edge-triggered against the previous tick's button state.
//! Re-evaluating hit tests on every tick while the button is held would
//! re-fire close actions and restart title-bar drags every frame.

use vesper_abi::input::PointerButtons;
use vesper_abi::window::{
    CLOSE_BUTTON_OFFSET_X, CLOSE_BUTTON_OFFSET_Y, CLOSE_BUTTON_SIZE, WINDOW_TITLE_BAR_HEIGHT,
    WindowFlags,
};

use crate::registry::{DragState, WindowManager};
use crate::window::Window;

/// One tick's worth of pointer state.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PointerSample {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) buttons: PointerButtons,
}

pub(crate) fn point_in_window(win: &Window, x: i32, y: i32) -> bool {
    x >= win.x && x < win.x + win.width && y >= win.y && y < win.y + win.height
}

pub(crate) fn point_in_title_bar(win: &Window, x: i32, y: i32) -> bool {
    x >= win.x && x < win.x + win.width && y >= win.y && y < win.y + WINDOW_TITLE_BAR_HEIGHT
}

pub(crate) fn point_in_close_button(win: &Window, x: i32, y: i32) -> bool {
    let bx = win.x + win.width - CLOSE_BUTTON_OFFSET_X;
    let by = win.y + CLOSE_BUTTON_OFFSET_Y;
    x >= bx && x < bx + CLOSE_BUTTON_SIZE && y >= by && y < by + CLOSE_BUTTON_SIZE
}

impl WindowManager {
    /// Feed one pointer sample through the interaction state machine.
    ///
    /// Returns whether any window state changed (and the frame therefore
    /// needs a full repaint rather than just a cursor move).
    pub(crate) fn handle_pointer(&mut self, sample: PointerSample) -> bool {
        let mut changed = false;
        let held = sample.buttons.contains(PointerButtons::LEFT);
        let was_held = self.last_buttons.contains(PointerButtons::LEFT);

        if held && !was_held {
            changed |= self.handle_press(sample.x, sample.y);
        }

        if let Some(drag) = self.drag {
            if held {
                changed |= self.move_window(drag.id, sample.x - drag.offset_x, sample.y - drag.offset_y);
            } else {
                // Release ends the drag wherever the pointer is.
                self.drag = None;
            }
        }

        self.last_buttons = sample.buttons;
        changed
    }

    /// Route a fresh left-button press. Checked in priority order on the
    /// topmost visible window under the pointer: close button (overlaps
    /// the title bar, so it goes first), then title bar, then content.
    fn handle_press(&mut self, x: i32, y: i32) -> bool {
        let Some(id) = self.find_at(x, y) else {
            // Desktop clicks mutate nothing.
            return false;
        };
        let Some(win) = self.window(id) else {
            return false;
        };
        let flags = win.flags();
        let origin = (win.x, win.y);
        let close_hit = point_in_close_button(win, x, y);
        let title_hit = point_in_title_bar(win, x, y);

        if close_hit && flags.contains(WindowFlags::CLOSABLE) {
            return self.destroy_window(id);
        }

        if title_hit && flags.contains(WindowFlags::MOVABLE) {
            self.drag = Some(DragState {
                id,
                offset_x: x - origin.0,
                offset_y: y - origin.1,
            });
            return self.focus_window(id);
        }

        self.focus_window(id)
    }
}
