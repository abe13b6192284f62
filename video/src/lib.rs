//! VesperOS video stack: framebuffer state, drawing context, and the mouse
//! cursor overlay.

#![no_std]

pub mod cursor;
pub mod framebuffer;
pub mod graphics;


use vesper_abi::display::FramebufferData;
use vesper_abi::draw::Color32;
use vesper_gfx::canvas_ops;
use vesper_lib::klog_warn;

/// Store the boot framebuffer. With `None` the display stays disabled and
/// every drawing entry point becomes a no-op.
pub fn init(framebuffer: Option<FramebufferData>) -> bool {
    match framebuffer {
        Some(fb) => framebuffer::init_with_display_info(fb.address, &fb.info),
        None => {
            klog_warn!("video: no framebuffer provided; display disabled");
            false
        }
    }
}

/// Fill the whole screen with `color`.
///
/// This replaces every pixel, so the cursor overlay's saved backup is
/// invalidated as a side effect.
pub fn clear_screen(color: Color32) {
    let Some(mut ctx) = graphics::GraphicsContext::new() else {
        return;
    };
    canvas_ops::clear(&mut ctx, color);
    cursor::invalidate();
}
