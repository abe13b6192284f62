//! The compositor: paints desktop, windows, and cursor into the
//! framebuffer, back to front.
//!
//! There is no damage tracking and no transparency; a frame is a full
//! repaint and later windows simply overwrite earlier ones. The cursor is
//! drawn last so it is always topmost.

use vesper_abi::draw::{Canvas, Color32};
use vesper_abi::window::{
    CLOSE_BUTTON_OFFSET_X, CLOSE_BUTTON_OFFSET_Y, CLOSE_BUTTON_SIZE, MAX_WINDOWS,
    WINDOW_BORDER_WIDTH, WINDOW_TITLE_BAR_HEIGHT, WindowFlags, WindowId, theme,
};
use vesper_gfx::{canvas_ops, font_render};
use vesper_video::cursor;
use vesper_video::graphics::GraphicsContext;

use crate::registry::WindowManager;
use crate::window::Window;

/// Paint one full frame from the registry's current state, then place the
/// cursor at `pointer`.
pub(crate) fn render_frame(manager: &mut WindowManager, pointer: (i32, i32)) {
    let Some(mut ctx) = GraphicsContext::new() else {
        return;
    };

    let desktop = ctx.pixel_format().encode(theme::DESKTOP);
    ctx.clear_canvas(desktop);

    // Snapshot the z-order so windows can be borrowed mutably (the draw
    // hook needs `&mut Window`) while we walk it.
    let mut ids = [WindowId(0); MAX_WINDOWS];
    let count = manager.window_count();
    ids[..count].copy_from_slice(manager.z_order());

    // Painter's algorithm: back to front.
    for &id in ids[..count].iter().rev() {
        let Some(win) = manager.window_mut(id) else {
            continue;
        };
        if !win.flags.contains(WindowFlags::VISIBLE) {
            continue;
        }
        draw_window(&mut ctx, win);
        if let Some(hook) = win.hook {
            hook.draw(win);
        }
    }

    // The repaint replaced everything under the cursor, so its saved
    // backup is stale; redraw drops it and saves afresh.
    cursor::redraw_after_repaint(pointer.0, pointer.1);
}

fn draw_window(ctx: &mut GraphicsContext, win: &Window) {
    let focused = win.flags.contains(WindowFlags::FOCUSED);

    // Border: a filled rect behind the window; the title bar and content
    // overwrite the interior, leaving a WINDOW_BORDER_WIDTH frame.
    let border = if focused {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER
    };
    canvas_ops::fill_rect(
        ctx,
        win.x - WINDOW_BORDER_WIDTH,
        win.y - WINDOW_BORDER_WIDTH,
        win.width + 2 * WINDOW_BORDER_WIDTH,
        win.height + 2 * WINDOW_BORDER_WIDTH,
        border,
    );

    draw_title_bar(ctx, win, focused);
    if win.flags.contains(WindowFlags::CLOSABLE) {
        draw_close_button(ctx, win);
    }
    blit_content(ctx, win);
}

fn draw_title_bar(ctx: &mut GraphicsContext, win: &Window, focused: bool) {
    let bg = if focused {
        theme::TITLE_BG
    } else {
        theme::TITLE_BG_UNFOCUSED
    };
    canvas_ops::fill_rect(ctx, win.x, win.y, win.width, WINDOW_TITLE_BAR_HEIGHT, bg);
    font_render::draw_str(
        ctx,
        win.x + 6,
        win.y + (WINDOW_TITLE_BAR_HEIGHT - 8) / 2,
        win.title(),
        theme::TITLE_TEXT,
        None,
    );
}

fn draw_close_button(ctx: &mut GraphicsContext, win: &Window) {
    let bx = win.x + win.width - CLOSE_BUTTON_OFFSET_X;
    let by = win.y + CLOSE_BUTTON_OFFSET_Y;
    canvas_ops::fill_rect(
        ctx,
        bx,
        by,
        CLOSE_BUTTON_SIZE,
        CLOSE_BUTTON_SIZE,
        theme::CLOSE_BUTTON,
    );
    canvas_ops::line(ctx, bx + 5, by + 5, bx + 15, by + 15, Color32::WHITE);
    canvas_ops::line(ctx, bx + 15, by + 5, bx + 5, by + 15, Color32::WHITE);
}

/// Copy the window's buffer into the content region below the title bar.
/// Every pixel write clips against the framebuffer.
fn blit_content(ctx: &mut GraphicsContext, win: &Window) {
    let fmt = ctx.pixel_format();
    let content_y = win.y + WINDOW_TITLE_BAR_HEIGHT;
    let content_h = win.content_height();

    for row in 0..content_h {
        for col in 0..win.width {
            let px = win.pixel(col, row);
            ctx.put_pixel(win.x + col, content_y + row, fmt.encode(Color32(px)));
        }
    }
}
