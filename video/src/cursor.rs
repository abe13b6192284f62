//! Mouse cursor overlay.
//!
//! The cursor is painted directly into the framebuffer. Before each draw,
//! the rectangle about to be overwritten (bitmap bounds plus a 1px outline
//! margin) is copied into a single global backup buffer; clearing the
//! cursor restores that backup. This keeps mouse movement from forcing a
//! full-screen repaint; there is no hardware double buffering to hide the
//! redraw behind.
//!
//! At most one backup is live at a time. A full-screen repaint makes the
//! saved pixels meaningless, so [`invalidate`] (or
//! [`redraw_after_repaint`]) must be called whenever the screen content
//! under the cursor is replaced wholesale.

use spin::Mutex;

use vesper_abi::draw::{Canvas, EncodedPixel};
use vesper_abi::window::theme;

use crate::graphics::GraphicsContext;

pub const CURSOR_WIDTH: i32 = 12;
pub const CURSOR_HEIGHT: i32 = 16;

const BACKUP_W: usize = (CURSOR_WIDTH + 2) as usize;
const BACKUP_H: usize = (CURSOR_HEIGHT + 2) as usize;

/// Arrow bitmap, one row per entry, bit `11 - col` set for a filled pixel.
const CURSOR_BITMAP: [u16; CURSOR_HEIGHT as usize] = [
    0b1100_0000_0000,
    0b1110_0000_0000,
    0b1111_0000_0000,
    0b1111_1000_0000,
    0b1111_1100_0000,
    0b1111_1110_0000,
    0b1111_1111_0000,
    0b1111_1111_1000,
    0b1111_1110_0000,
    0b1111_1110_0000,
    0b1101_1000_0000,
    0b1100_1100_0000,
    0b1000_0110_0000,
    0b0000_0110_0000,
    0b0000_0011_0000,
    0b0000_0011_0000,
];

struct CursorState {
    backup: [u32; BACKUP_W * BACKUP_H],
    backup_valid: bool,
    last: Option<(i32, i32)>,
}

static CURSOR: Mutex<CursorState> = Mutex::new(CursorState {
    backup: [0; BACKUP_W * BACKUP_H],
    backup_valid: false,
    last: None,
});

fn save_background(st: &mut CursorState, ctx: &GraphicsContext, x: i32, y: i32) {
    let desktop = ctx.pixel_format().encode(theme::DESKTOP).to_u32();
    let w = ctx.width() as i32;
    let h = ctx.height() as i32;

    for row in 0..BACKUP_H as i32 {
        for col in 0..BACKUP_W as i32 {
            let px = x + col - 1;
            let py = y + row - 1;
            let value = if px >= 0 && py >= 0 && px < w && py < h {
                ctx.read_encoded_at(px, py).to_u32()
            } else {
                // Off-screen cells restore as desktop color.
                desktop
            };
            st.backup[row as usize * BACKUP_W + col as usize] = value;
        }
    }
    st.backup_valid = true;
}

fn draw_at(st: &mut CursorState, ctx: &mut GraphicsContext, x: i32, y: i32) {
    save_background(st, ctx, x, y);

    let outline = ctx.pixel_format().encode(theme::CURSOR_OUTLINE);
    let fill = ctx.pixel_format().encode(theme::CURSOR_FILL);

    // Outline pass: a black ring around every filled pixel, so the cursor
    // stays visible over light and dark content alike.
    for row in 0..CURSOR_HEIGHT {
        let bits = CURSOR_BITMAP[row as usize];
        for col in 0..CURSOR_WIDTH {
            if bits & (1 << (11 - col)) == 0 {
                continue;
            }
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    ctx.put_pixel(x + col + dx, y + row + dy, outline);
                }
            }
        }
    }

    // Fill pass on top.
    for row in 0..CURSOR_HEIGHT {
        let bits = CURSOR_BITMAP[row as usize];
        for col in 0..CURSOR_WIDTH {
            if bits & (1 << (11 - col)) != 0 {
                ctx.put_pixel(x + col, y + row, fill);
            }
        }
    }
}

fn clear_at(st: &mut CursorState, ctx: &mut GraphicsContext, x: i32, y: i32) {
    if !st.backup_valid {
        // No backup to restore (first draw, or the screen was cleared
        // under us): paint the desktop color over the cursor rectangle.
        let desktop = ctx.pixel_format().encode(theme::DESKTOP);
        for row in -1..=CURSOR_HEIGHT {
            for col in -1..=CURSOR_WIDTH {
                ctx.put_pixel(x + col, y + row, desktop);
            }
        }
        return;
    }

    for row in 0..BACKUP_H as i32 {
        for col in 0..BACKUP_W as i32 {
            let px = x + col - 1;
            let py = y + row - 1;
            let value = st.backup[row as usize * BACKUP_W + col as usize];
            ctx.put_pixel(px, py, EncodedPixel(value));
        }
    }
    st.backup_valid = false;
}

/// Save the pixels under the cursor rectangle and draw the cursor at
/// `(x, y)`.
pub fn draw(x: i32, y: i32) {
    let Some(mut ctx) = GraphicsContext::new() else {
        return;
    };
    let mut st = CURSOR.lock();
    draw_at(&mut st, &mut ctx, x, y);
    st.last = Some((x, y));
}

/// Restore the pixels saved by the last [`draw`] at `(x, y)`.
pub fn clear(x: i32, y: i32) {
    let Some(mut ctx) = GraphicsContext::new() else {
        return;
    };
    let mut st = CURSOR.lock();
    clear_at(&mut st, &mut ctx, x, y);
    st.last = None;
}

/// Per-tick entry point: move the cursor to `(x, y)`, restoring the old
/// position only when it actually changed.
pub fn update(x: i32, y: i32) {
    let Some(mut ctx) = GraphicsContext::new() else {
        return;
    };
    let mut st = CURSOR.lock();
    if st.last == Some((x, y)) {
        return;
    }
    if let Some((lx, ly)) = st.last {
        clear_at(&mut st, &mut ctx, lx, ly);
    }
    draw_at(&mut st, &mut ctx, x, y);
    st.last = Some((x, y));
}

/// Draw the cursor after the compositor repainted the whole screen. The
/// previous backup refers to pixels that no longer exist, so it is dropped
/// rather than restored.
pub fn redraw_after_repaint(x: i32, y: i32) {
    let Some(mut ctx) = GraphicsContext::new() else {
        return;
    };
    let mut st = CURSOR.lock();
    st.backup_valid = false;
    draw_at(&mut st, &mut ctx, x, y);
    st.last = Some((x, y));
}

/// Forget the saved backup and last position. Must be called when the
/// screen is cleared out from under the overlay.
pub fn invalidate() {
    let mut st = CURSOR.lock();
    st.backup_valid = false;
    st.last = None;
}
