//! VesperOS kernel entry point.
//!
//! Boot order matters: serial first (so everything later can log), then
//! the framebuffer from the limine response, then the PS/2 stack, then
//! the window manager. With the `builtin-tests` feature the test harness
//! runs right after init and reports its verdict through the QEMU debug
//! exit device instead of starting the desktop.

#![no_std]
#![no_main]

#[cfg(not(feature = "builtin-tests"))]
mod desktop;
#[cfg(not(feature = "builtin-tests"))]
mod widgets;

use core::panic::PanicInfo;

use limine::BaseRevision;
use limine::request::FramebufferRequest;

use vesper_abi::display::{DisplayInfo, FramebufferData};
use vesper_abi::pixel::PixelFormat;
use vesper_drivers::{ps2, serial};
use vesper_lib::{cpu, klog_error, klog_info, klog_warn};

#[used]
#[unsafe(link_section = ".limine_requests_start_marker")]
static LIMINE_REQUESTS_START_MARKER: [u64; 1] = [0];

#[used]
#[unsafe(link_section = ".limine_requests")]
static BASE_REVISION: BaseRevision = BaseRevision::new();

#[used]
#[unsafe(link_section = ".limine_requests")]
static FRAMEBUFFER_REQUEST: FramebufferRequest = FramebufferRequest::new();

#[used]
#[unsafe(link_section = ".limine_requests_end_marker")]
static LIMINE_REQUESTS_END_MARKER: [u64; 1] = [0];

fn boot_framebuffer() -> Option<FramebufferData> {
    let response = FRAMEBUFFER_REQUEST.get_response()?;
    let fb = response.framebuffers().next()?;
    let info = DisplayInfo::new(
        fb.width() as u32,
        fb.height() as u32,
        fb.pitch() as u32,
        PixelFormat::from_bpp(fb.bpp() as u8),
    );
    Some(FramebufferData {
        address: fb.addr() as u64,
        info,
    })
}

#[unsafe(no_mangle)]
extern "C" fn kmain() -> ! {
    serial::init();
    vesper_lib::klog::klog_init();
    klog_info!("VesperOS starting");

    if !BASE_REVISION.is_supported() {
        klog_error!("boot: limine base revision not supported");
        cpu::halt_loop();
    }

    // No framebuffer at all is a boot precondition failure; the display
    // core itself never has a fatal path.
    let Some(fb) = boot_framebuffer() else {
        klog_error!("boot: no framebuffer from bootloader");
        cpu::halt_loop();
    };
    let (width, height) = (fb.info.width as i32, fb.info.height as i32);
    vesper_video::init(Some(fb));

    if !ps2::init_controller() {
        klog_warn!("boot: PS/2 controller unresponsive; input disabled");
    } else {
        ps2::keyboard::init();
        if !ps2::mouse::init() {
            klog_warn!("boot: continuing without a pointer");
        }
    }

    vesper_wm::init(width, height);

    #[cfg(feature = "builtin-tests")]
    {
        use vesper_lib::testing::TestConfig;
        vesper_tests::run_and_exit(&TestConfig::run_and_shutdown());
    }

    #[cfg(not(feature = "builtin-tests"))]
    desktop::run();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    klog_error!("kernel panic: {}", info);
    cpu::halt_loop()
}
