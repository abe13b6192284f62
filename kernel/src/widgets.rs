//! Live desktop widgets driven by the compositor's per-frame draw hooks.

use core::sync::atomic::{AtomicU32, Ordering};

use vesper_abi::draw::Color32;
use vesper_abi::window::{WindowFlags, theme};
use vesper_gfx::{canvas_ops, font_render};
use vesper_lib::numfmt;
use vesper_wm::{self as wm, DrawHook, Window};

const DIM_TEXT: Color32 = Color32(0xFFB0_B0B0);

/// Frame counter widget: proves the desktop is alive by repainting a
/// cycling activity bar and the composited frame count on every frame.
struct MonitorWidget {
    frames: AtomicU32,
}

impl DrawHook for MonitorWidget {
    fn draw(&self, window: &mut Window) {
        let frames = self.frames.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let (w, _) = window.size();

        canvas_ops::fill_rect(window, 10, 40, w - 20, 14, Color32(0xFF20_2020));
        let span = (w - 24).max(1);
        let filled = ((frames % 120) as i32 * span) / 120;
        canvas_ops::fill_rect(window, 12, 42, filled.max(1), 10, theme::BORDER_FOCUSED);

        canvas_ops::fill_rect(window, 10, 62, w - 20, 12, theme::WINDOW_BG);
        font_render::draw_str(window, 10, 62, "frames: ", DIM_TEXT, None);
        let mut buf = [0u8; numfmt::U32_DEC_DIGITS];
        let text = numfmt::format_u32_dec(frames, &mut buf);
        font_render::draw_str(window, 10 + 8 * 8, 62, text, Color32::WHITE, None);
    }
}

static MONITOR: MonitorWidget = MonitorWidget {
    frames: AtomicU32::new(0),
};

/// Create the system pulse window and attach its hook.
pub fn spawn_monitor(x: i32, y: i32) -> bool {
    let Some(id) = wm::create_window("monitor", x, y, 220, 120, WindowFlags::DEFAULT) else {
        return false;
    };
    wm::window_draw_text(id, "system pulse", 10, 12, Color32::WHITE);
    wm::set_draw_hook(id, &MONITOR)
}
