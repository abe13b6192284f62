//! The window registry: slot storage, z-order, focus, and lifecycle.
//!
//! Windows live in a fixed slot array and are addressed by stable ids; the
//! z-order is a separate id sequence with index 0 topmost. Destroying a
//! window also clears any focus or drag state that pointed at it, so
//! stale ids can never be dereferenced.

use vesper_abi::draw::Canvas;
use vesper_abi::input::PointerButtons;
use vesper_abi::window::{
    MAX_WINDOWS, WINDOW_MAX_PIXELS, WINDOW_MIN_HEIGHT, WINDOW_MIN_WIDTH, WindowFlags, WindowId,
    theme,
};
use vesper_lib::klog_debug;

use crate::arena;
use crate::window::Window;

/// An in-progress title-bar drag. Holding the target id inside the
/// `Option` makes "dragging implies a valid target" structural.
#[derive(Clone, Copy)]
pub(crate) struct DragState {
    pub(crate) id: WindowId,
    pub(crate) offset_x: i32,
    pub(crate) offset_y: i32,
}

pub(crate) struct WindowManager {
    slots: [Option<Window>; MAX_WINDOWS],
    z_order: [WindowId; MAX_WINDOWS],
    z_len: usize,
    focused: Option<WindowId>,
    next_id: u32,
    pub(crate) drag: Option<DragState>,
    pub(crate) last_buttons: PointerButtons,
    screen_w: i32,
    screen_h: i32,
    needs_redraw: bool,
}

impl WindowManager {
    pub(crate) const fn new() -> Self {
        Self {
            slots: [const { None }; MAX_WINDOWS],
            z_order: [WindowId(0); MAX_WINDOWS],
            z_len: 0,
            focused: None,
            next_id: 1,
            drag: None,
            last_buttons: PointerButtons::empty(),
            screen_w: 0,
            screen_h: 0,
            needs_redraw: true,
        }
    }

    pub(crate) fn set_screen(&mut self, width: i32, height: i32) {
        self.screen_w = width;
        self.screen_h = height;
    }

    // -- lookup ------------------------------------------------------------

    fn slot_index(&self, id: WindowId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|w| w.id == id))
    }

    pub(crate) fn window(&self, id: WindowId) -> Option<&Window> {
        let idx = self.slot_index(id)?;
        self.slots[idx].as_ref()
    }

    pub(crate) fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        let idx = self.slot_index(id)?;
        self.slots[idx].as_mut()
    }

    pub(crate) fn window_count(&self) -> usize {
        self.z_len
    }

    pub(crate) fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Current z-order, index 0 topmost.
    pub(crate) fn z_order(&self) -> &[WindowId] {
        &self.z_order[..self.z_len]
    }

    /// Topmost visible window containing the point.
    pub(crate) fn find_at(&self, x: i32, y: i32) -> Option<WindowId> {
        for &id in self.z_order() {
            if let Some(win) = self.window(id) {
                if win.flags.contains(WindowFlags::VISIBLE)
                    && crate::interact::point_in_window(win, x, y)
                {
                    return Some(id);
                }
            }
        }
        None
    }

    // -- z-order maintenance -----------------------------------------------

    fn z_insert_front(&mut self, id: WindowId) {
        debug_assert!(self.z_len < MAX_WINDOWS);
        self.z_order.copy_within(0..self.z_len, 1);
        self.z_order[0] = id;
        self.z_len += 1;
    }

    fn z_remove(&mut self, id: WindowId) {
        if let Some(pos) = self.z_order[..self.z_len].iter().position(|&z| z == id) {
            self.z_order.copy_within(pos + 1..self.z_len, pos);
            self.z_len -= 1;
        }
    }

    pub(crate) fn bring_to_front(&mut self, id: WindowId) {
        if self.z_len == 0 || self.z_order[0] == id {
            return;
        }
        if let Some(pos) = self.z_order[..self.z_len].iter().position(|&z| z == id) {
            self.z_order.copy_within(0..pos, 1);
            self.z_order[0] = id;
            self.needs_redraw = true;
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Create a window and focus it. Width and height are clamped to the
    /// minimums; the title is truncated to fit.
    ///
    /// Returns `None` (never panics) when the slot array, the per-window
    /// buffer ceiling, or the pixel arena is exhausted.
    pub(crate) fn create_window(
        &mut self,
        title: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        flags: WindowFlags,
    ) -> Option<WindowId> {
        let width = w.max(WINDOW_MIN_WIDTH);
        let height = h.max(WINDOW_MIN_HEIGHT);
        let pixels = width as usize * height as usize;
        if pixels > WINDOW_MAX_PIXELS {
            return None;
        }

        let slot = self.slots.iter().position(|s| s.is_none())?;
        let buf = arena::alloc(pixels)?;

        let id = WindowId(self.next_id);
        self.next_id += 1;

        let mut window = Window::new(
            id,
            title,
            x,
            y,
            width,
            height,
            flags | WindowFlags::VISIBLE,
            buf,
            pixels,
        );
        let bg = window.pixel_format().encode(theme::WINDOW_BG);
        window.clear_canvas(bg);

        self.slots[slot] = Some(window);
        self.z_insert_front(id);
        let _ = self.focus_window(id);
        self.needs_redraw = true;

        klog_debug!("wm: created window {} '{}'", id.0, title);
        Some(id)
    }

    /// Remove a window. Focus falls to the new topmost window; an active
    /// drag of this window is cancelled. The pixel range stays behind in
    /// the arena.
    pub(crate) fn destroy_window(&mut self, id: WindowId) -> bool {
        let Some(slot) = self.slot_index(id) else {
            return false;
        };
        self.slots[slot] = None;
        self.z_remove(id);

        if self.drag.as_ref().is_some_and(|d| d.id == id) {
            self.drag = None;
        }

        if self.focused == Some(id) {
            self.focused = if self.z_len > 0 {
                Some(self.z_order[0])
            } else {
                None
            };
            if let Some(next) = self.focused {
                if let Some(win) = self.window_mut(next) {
                    win.flags.insert(WindowFlags::FOCUSED);
                }
            }
        }

        self.needs_redraw = true;
        klog_debug!("wm: destroyed window {}", id.0);
        true
    }

    // -- geometry ------------------------------------------------------------

    /// Move a window, clamped so it stays fully on-screen.
    pub(crate) fn move_window(&mut self, id: WindowId, x: i32, y: i32) -> bool {
        let (sw, sh) = (self.screen_w, self.screen_h);
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        win.x = x.clamp(0, (sw - win.width).max(0));
        win.y = y.clamp(0, (sh - win.height).max(0));
        self.needs_redraw = true;
        true
    }

    /// Resize a window.
    ///
    /// The result honours the minimum size and stays on-screen (shifting
    /// the window if necessary). Fails without touching the window when
    /// the requested pixel count exceeds the buffer allocated at creation
    /// time; buffers are never reallocated.
    pub(crate) fn resize_window(&mut self, id: WindowId, w: i32, h: i32) -> bool {
        let (sw, sh) = (self.screen_w, self.screen_h);
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        let new_w = w.max(WINDOW_MIN_WIDTH).min(sw);
        let new_h = h.max(WINDOW_MIN_HEIGHT).min(sh);
        if new_w as usize * new_h as usize > win.capacity {
            return false;
        }
        win.width = new_w;
        win.height = new_h;
        win.x = win.x.clamp(0, (sw - new_w).max(0));
        win.y = win.y.clamp(0, (sh - new_h).max(0));
        self.needs_redraw = true;
        true
    }

    // -- focus ----------------------------------------------------------------

    /// Give a window the focus and raise it to the front of the z-order.
    pub(crate) fn focus_window(&mut self, id: WindowId) -> bool {
        if self.slot_index(id).is_none() {
            return false;
        }
        if let Some(prev) = self.focused {
            if prev != id {
                if let Some(win) = self.window_mut(prev) {
                    win.flags.remove(WindowFlags::FOCUSED);
                }
            }
        }
        self.focused = Some(id);
        if let Some(win) = self.window_mut(id) {
            win.flags.insert(WindowFlags::FOCUSED);
        }
        self.bring_to_front(id);
        self.needs_redraw = true;
        true
    }

    // -- visibility state ------------------------------------------------------

    pub(crate) fn show_window(&mut self, id: WindowId) -> bool {
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        win.flags.insert(WindowFlags::VISIBLE);
        self.needs_redraw = true;
        true
    }

    pub(crate) fn hide_window(&mut self, id: WindowId) -> bool {
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        win.flags.remove(WindowFlags::VISIBLE);
        self.needs_redraw = true;
        true
    }

    pub(crate) fn minimize_window(&mut self, id: WindowId) -> bool {
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        win.flags.insert(WindowFlags::MINIMIZED);
        win.flags.remove(WindowFlags::VISIBLE);
        self.needs_redraw = true;
        true
    }

    /// Grow the window to the screen, capped by its allocated buffer.
    /// The previous geometry is saved for [`Self::restore_window`].
    pub(crate) fn maximize_window(&mut self, id: WindowId) -> bool {
        let (sw, sh) = (self.screen_w, self.screen_h);
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        if win.flags.contains(WindowFlags::MAXIMIZED) {
            return true;
        }
        win.saved_geometry = Some((win.x, win.y, win.width, win.height));

        let mut w = sw;
        let mut h = sh;
        if w as usize * h as usize > win.capacity {
            // Grow as far as the buffer allows, full width first.
            h = ((win.capacity / w.max(1) as usize) as i32).min(sh);
            if h < WINDOW_MIN_HEIGHT {
                h = WINDOW_MIN_HEIGHT;
                w = ((win.capacity / h as usize) as i32).min(sw);
            }
        }

        win.x = 0;
        win.y = 0;
        win.width = w;
        win.height = h;
        win.flags.insert(WindowFlags::MAXIMIZED);
        self.needs_redraw = true;
        true
    }

    /// Undo a minimize and/or maximize, restoring saved geometry.
    pub(crate) fn restore_window(&mut self, id: WindowId) -> bool {
        let Some(win) = self.window_mut(id) else {
            return false;
        };
        if let Some((x, y, w, h)) = win.saved_geometry.take() {
            win.x = x;
            win.y = y;
            win.width = w;
            win.height = h;
        }
        win.flags
            .remove(WindowFlags::MINIMIZED | WindowFlags::MAXIMIZED);
        win.flags.insert(WindowFlags::VISIBLE);
        self.needs_redraw = true;
        true
    }

    // -- redraw bookkeeping ----------------------------------------------------

    pub(crate) fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub(crate) fn take_needs_redraw(&mut self) -> bool {
        core::mem::take(&mut self.needs_redraw)
    }

    /// Drop every window and reclaim the arena. The desktop starts over
    /// with fresh ids.
    pub(crate) fn reset(&mut self) {
        self.slots = [const { None }; MAX_WINDOWS];
        self.z_len = 0;
        self.focused = None;
        self.next_id = 1;
        self.drag = None;
        self.last_buttons = PointerButtons::empty();
        self.needs_redraw = true;
        arena::reset();
    }
}
