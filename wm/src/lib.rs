//! VesperOS window manager.
//!
//! A compositing window manager for a single linear framebuffer, driven by
//! the polled PS/2 input stack. Everything runs on one cooperative tick:
//! [`update`] drains pending input, feeds the interaction state machine,
//! and repaints: either the full frame (when window state changed) or
//! just the cursor overlay.
//!
//! The registry, interaction state, and redraw flag live in one
//! [`registry::WindowManager`] value behind a single lock; each public
//! function here is a thin locking wrapper around it.

#![no_std]

mod arena;
mod compositor;
mod interact;
mod registry;
mod window;

pub mod compositor_tests;
pub mod registry_tests;

use spin::Mutex;

use vesper_abi::draw::Color32;
use vesper_abi::window::{WindowFlags, WindowId};
use vesper_drivers::ps2::{keyboard, mouse};
use vesper_gfx::{canvas_ops, font_render};
use vesper_lib::cpu;
use vesper_lib::klog_info;

use crate::interact::PointerSample;
use crate::registry::WindowManager;

pub use crate::window::{DrawHook, Window};

static WM: Mutex<WindowManager> = Mutex::new(WindowManager::new());

/// Iterations of the blocking key loop between input/render ticks.
const UPDATE_INTERVAL: u32 = 1_000;

/// Update ticks between forced full repaints, so draw hooks keep
/// animating while the pointer and keyboard are idle.
const FORCE_REDRAW_TICKS: u32 = 8;

/// Upper bound on input bytes drained per tick.
const MAX_DRAIN_BYTES: u32 = 64;

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Initialise the desktop for a `width x height` screen. Clamps the mouse
/// to the same bounds.
pub fn init(width: i32, height: i32) {
    mouse::set_bounds(width, height);
    let mut wm = WM.lock();
    wm.set_screen(width, height);
    wm.request_redraw();
    klog_info!("wm: desktop {}x{}", width, height);
}

/// Tear down every window and start over with fresh ids.
pub fn reset() {
    WM.lock().reset();
}

// ---------------------------------------------------------------------------
// Per-tick driving
// ---------------------------------------------------------------------------

/// The per-tick entry point.
///
/// Drains all pending input bytes, applies the interaction state machine,
/// and then repaints: the full frame when window state changed (or a
/// redraw was requested), otherwise just the cursor overlay. Within one
/// tick input is always fully applied before anything is drawn, so a
/// frame never shows a half-applied drag.
pub fn update() {
    for _ in 0..MAX_DRAIN_BYTES {
        let progressed = mouse::poll().is_some() | keyboard::pump();
        if !progressed {
            break;
        }
    }

    let pointer = mouse::state();
    let mut wm = WM.lock();
    let changed = wm.handle_pointer(PointerSample {
        x: pointer.x,
        y: pointer.y,
        buttons: pointer.buttons,
    });
    let full_repaint = wm.take_needs_redraw() || changed;
    if full_repaint {
        compositor::render_frame(&mut wm, (pointer.x, pointer.y));
    }
    drop(wm);

    if !full_repaint {
        vesper_video::cursor::update(pointer.x, pointer.y);
    }
}

/// Force a full repaint of the current frame.
pub fn render() {
    let pointer = mouse::state();
    let mut wm = WM.lock();
    compositor::render_frame(&mut wm, (pointer.x, pointer.y));
    wm.take_needs_redraw();
}

/// Block until a key is decoded, keeping the desktop alive meanwhile.
///
/// The busy-wait interleaves mouse polling on every iteration and runs a
/// full [`update`] tick periodically; every few ticks it forces a repaint
/// so window draw hooks animate even with no input at all.
pub fn read_key() -> char {
    let mut iterations: u32 = 0;
    let mut ticks: u32 = 0;
    loop {
        if let Some(c) = keyboard::poll() {
            return c;
        }
        let _ = mouse::poll();

        iterations += 1;
        if iterations >= UPDATE_INTERVAL {
            iterations = 0;
            ticks += 1;
            if ticks >= FORCE_REDRAW_TICKS {
                ticks = 0;
                render();
            } else {
                update();
            }
        }
        cpu::pause();
    }
}

// ---------------------------------------------------------------------------
// Window lifecycle
// ---------------------------------------------------------------------------

/// Create a window and focus it. `None` when the registry or the pixel
/// arena is exhausted.
pub fn create_window(
    title: &str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    flags: WindowFlags,
) -> Option<WindowId> {
    WM.lock().create_window(title, x, y, w, h, flags)
}

pub fn destroy_window(id: WindowId) -> bool {
    WM.lock().destroy_window(id)
}

pub fn move_window(id: WindowId, x: i32, y: i32) -> bool {
    WM.lock().move_window(id, x, y)
}

pub fn resize_window(id: WindowId, w: i32, h: i32) -> bool {
    WM.lock().resize_window(id, w, h)
}

pub fn focus_window(id: WindowId) -> bool {
    WM.lock().focus_window(id)
}

pub fn show_window(id: WindowId) -> bool {
    WM.lock().show_window(id)
}

pub fn hide_window(id: WindowId) -> bool {
    WM.lock().hide_window(id)
}

pub fn minimize_window(id: WindowId) -> bool {
    WM.lock().minimize_window(id)
}

pub fn maximize_window(id: WindowId) -> bool {
    WM.lock().maximize_window(id)
}

pub fn restore_window(id: WindowId) -> bool {
    WM.lock().restore_window(id)
}

pub fn set_window_title(id: WindowId, title: &str) -> bool {
    let mut wm = WM.lock();
    let Some(win) = wm.window_mut(id) else {
        return false;
    };
    win.set_title(title);
    wm.request_redraw();
    true
}

/// Attach a per-frame draw hook to a window.
pub fn set_draw_hook(id: WindowId, hook: &'static dyn DrawHook) -> bool {
    let mut wm = WM.lock();
    let Some(win) = wm.window_mut(id) else {
        return false;
    };
    win.hook = Some(hook);
    wm.request_redraw();
    true
}

// ---------------------------------------------------------------------------
// Introspection
// ---------------------------------------------------------------------------

pub fn window_count() -> usize {
    WM.lock().window_count()
}

pub fn focused_window() -> Option<WindowId> {
    WM.lock().focused()
}

/// Topmost visible window containing the point.
pub fn window_at(x: i32, y: i32) -> Option<WindowId> {
    WM.lock().find_at(x, y)
}

/// Read a window's `(x, y, width, height)` geometry.
pub fn window_geometry(id: WindowId) -> Option<(i32, i32, i32, i32)> {
    let wm = WM.lock();
    let win = wm.window(id)?;
    Some((win.x, win.y, win.width, win.height))
}

/// Request a full repaint on the next tick.
pub fn request_redraw() {
    WM.lock().request_redraw();
}

// ---------------------------------------------------------------------------
// Window content drawing
// ---------------------------------------------------------------------------

/// Run `f` against a window's content surface, marking the frame dirty.
/// Returns `false` for a stale id.
fn with_window<F: FnOnce(&mut Window)>(id: WindowId, f: F) -> bool {
    let mut wm = WM.lock();
    let Some(win) = wm.window_mut(id) else {
        return false;
    };
    f(win);
    wm.request_redraw();
    true
}

/// Fill a window's whole buffer with `color`.
pub fn clear_window(id: WindowId, color: Color32) -> bool {
    with_window(id, |win| canvas_ops::clear(win, color))
}

pub fn window_draw_pixel(id: WindowId, x: i32, y: i32, color: Color32) -> bool {
    with_window(id, |win| {
        use vesper_abi::draw::Canvas;
        let px = win.pixel_format().encode(color);
        win.put_pixel(x, y, px);
    })
}

pub fn window_draw_rect(id: WindowId, x: i32, y: i32, w: i32, h: i32, color: Color32) -> bool {
    with_window(id, |win| canvas_ops::rect(win, x, y, w, h, color))
}

pub fn window_fill_rect(id: WindowId, x: i32, y: i32, w: i32, h: i32, color: Color32) -> bool {
    with_window(id, |win| canvas_ops::fill_rect(win, x, y, w, h, color))
}

pub fn window_draw_line(
    id: WindowId,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color32,
) -> bool {
    with_window(id, |win| canvas_ops::line(win, x0, y0, x1, y1, color))
}

pub fn window_draw_text(id: WindowId, text: &str, x: i32, y: i32, color: Color32) -> bool {
    with_window(id, |win| font_render::draw_str(win, x, y, text, color, None))
}
