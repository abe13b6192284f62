//! Integration tests that render real frames into the boot framebuffer
//! and sample pixels back out. Skipped when no framebuffer is present.

use core::sync::atomic::{AtomicU32, Ordering};

use vesper_abi::draw::Canvas;
use vesper_abi::window::{WINDOW_TITLE_BAR_HEIGHT, WindowFlags, theme};
use vesper_lib::testing::TestResult;
use vesper_lib::{define_test_suite, fail, pass};
use vesper_video::graphics::GraphicsContext;

use crate::window::{DrawHook, Window};

/// Sampled pixels are compared on their RGB bytes only; a 24-bit
/// framebuffer never stores the alpha byte of the encoded color.
fn sample(ctx: &GraphicsContext, x: i32, y: i32) -> u32 {
    ctx.read_encoded_at(x, y).to_u32() & 0x00FF_FFFF
}

fn rgb(encoded: u32) -> u32 {
    encoded & 0x00FF_FFFF
}

fn test_frame_paints_window_chrome() -> TestResult {
    let Some(ctx) = GraphicsContext::new() else {
        return TestResult::Skipped;
    };
    let fmt = ctx.pixel_format();

    crate::reset();
    let Some(_id) = crate::create_window("chrome", 40, 40, 200, 150, WindowFlags::DEFAULT) else {
        crate::reset();
        return fail!("create failed");
    };
    crate::render();

    let desktop = rgb(fmt.encode(theme::DESKTOP).to_u32());
    let title = rgb(fmt.encode(theme::TITLE_BG).to_u32());
    let border = rgb(fmt.encode(theme::BORDER_FOCUSED).to_u32());
    let content = rgb(fmt.encode(theme::WINDOW_BG).to_u32());

    // Desktop far away from the window (and from the cursor).
    if sample(&ctx, 300, 20) != desktop {
        crate::reset();
        return fail!("desktop background missing");
    }
    // Focused border strip just outside the window rect.
    if sample(&ctx, 39, 100) != border {
        crate::reset();
        return fail!("focused border missing");
    }
    // Title bar interior, left of the close button.
    if sample(&ctx, 60, 40 + WINDOW_TITLE_BAR_HEIGHT - 4) != title {
        crate::reset();
        return fail!("title bar missing");
    }
    // Freshly created windows are cleared to the window background.
    if sample(&ctx, 60, 40 + WINDOW_TITLE_BAR_HEIGHT + 40) != content {
        crate::reset();
        return fail!("content region missing");
    }

    crate::reset();
    pass!()
}

fn test_minimized_window_not_painted() -> TestResult {
    let Some(ctx) = GraphicsContext::new() else {
        return TestResult::Skipped;
    };
    let fmt = ctx.pixel_format();

    crate::reset();
    let Some(id) = crate::create_window("mini", 40, 40, 200, 150, WindowFlags::DEFAULT) else {
        crate::reset();
        return fail!("create failed");
    };
    crate::render();
    let title = rgb(fmt.encode(theme::TITLE_BG).to_u32());
    if sample(&ctx, 60, 44) != title {
        crate::reset();
        return fail!("window not painted while visible");
    }

    crate::minimize_window(id);
    crate::render();
    let desktop = rgb(fmt.encode(theme::DESKTOP).to_u32());
    if sample(&ctx, 60, 44) != desktop {
        crate::reset();
        return fail!("minimized window still painted");
    }

    crate::reset();
    pass!()
}

struct CountingHook {
    calls: AtomicU32,
}

impl DrawHook for CountingHook {
    fn draw(&self, window: &mut Window) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        // Leave a mark in the buffer so the next blit shows it.
        let px = window.pixel_format().encode(theme::TITLE_TEXT);
        window.put_pixel(2, 2, px);
    }
}

static COUNTING_HOOK: CountingHook = CountingHook {
    calls: AtomicU32::new(0),
};

fn test_draw_hook_runs_each_frame() -> TestResult {
    if GraphicsContext::new().is_none() {
        return TestResult::Skipped;
    }

    crate::reset();
    let Some(id) = crate::create_window("hooked", 40, 40, 200, 150, WindowFlags::DEFAULT) else {
        crate::reset();
        return fail!("create failed");
    };
    if !crate::set_draw_hook(id, &COUNTING_HOOK) {
        crate::reset();
        return fail!("hook attach failed");
    }

    let before = COUNTING_HOOK.calls.load(Ordering::Relaxed);
    crate::render();
    crate::render();
    let after = COUNTING_HOOK.calls.load(Ordering::Relaxed);
    if after < before + 2 {
        crate::reset();
        return fail!("hook ran {} times over two frames", after - before);
    }

    crate::reset();
    pass!()
}

define_test_suite!(
    wm_compositor,
    [
        test_frame_paints_window_chrome,
        test_minimized_window_not_painted,
        test_draw_hook_runs_each_frame,
    ]
);
