//! Demo desktop: a welcome window, a live widget, and the blocking input
//! loop that keeps everything ticking.

use vesper_abi::draw::Color32;
use vesper_abi::window::{WindowFlags, theme};
use vesper_lib::klog_info;
use vesper_wm as wm;

use crate::widgets;

const DIM_TEXT: Color32 = Color32(0xFFB0_B0B0);

pub fn run() -> ! {
    if let Some(id) = wm::create_window("welcome", 80, 80, 360, 220, WindowFlags::DEFAULT) {
        wm::window_draw_text(id, "VesperOS", 12, 16, Color32::WHITE);
        wm::window_fill_rect(id, 12, 30, 336, 2, theme::BORDER_FOCUSED);
        wm::window_draw_text(id, "drag title bars to move windows", 12, 48, DIM_TEXT);
        wm::window_draw_text(id, "n: new window    q: close focused", 12, 72, DIM_TEXT);
        wm::window_draw_text(id, "m: minimize      x: maximize", 12, 88, DIM_TEXT);
        wm::window_draw_text(id, "r: restore", 12, 104, DIM_TEXT);
    }
    widgets::spawn_monitor(480, 80);

    wm::render();
    klog_info!("desktop: ready");

    let mut cascade: i32 = 0;
    loop {
        match wm::read_key() {
            'n' => {
                cascade = (cascade + 1) % 8;
                let offset = 60 + cascade * 30;
                if wm::create_window("untitled", offset, offset, 260, 180, WindowFlags::DEFAULT)
                    .is_none()
                {
                    klog_info!("desktop: window limit reached");
                }
            }
            'q' => {
                if let Some(id) = wm::focused_window() {
                    wm::destroy_window(id);
                }
            }
            'm' => {
                if let Some(id) = wm::focused_window() {
                    wm::minimize_window(id);
                }
            }
            'x' => {
                if let Some(id) = wm::focused_window() {
                    wm::maximize_window(id);
                }
            }
            'r' => {
                if let Some(id) = wm::focused_window() {
                    wm::restore_window(id);
                }
            }
            _ => {}
        }
    }
}
