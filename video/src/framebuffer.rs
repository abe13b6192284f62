//! Linear framebuffer state.
//!
//! The bootloader hands the kernel one framebuffer at boot;
//! [`init_with_display_info`] validates and stores it, and the rest of the
//! video stack works on copies obtained via [`snapshot`].

use spin::Mutex;

use vesper_abi::display::DisplayInfo;
use vesper_lib::{klog_info, klog_warn};

const MIN_FRAMEBUFFER_WIDTH: u32 = 320;
const MIN_FRAMEBUFFER_HEIGHT: u32 = 240;
const MAX_BUFFER_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Copy, Clone)]
pub(crate) struct FbState {
    pub(crate) base: u64,
    pub(crate) info: DisplayInfo,
}

impl FbState {
    #[inline]
    pub(crate) fn width(&self) -> u32 {
        self.info.width
    }

    #[inline]
    pub(crate) fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    pub(crate) fn pitch(&self) -> u32 {
        self.info.pitch
    }

    #[inline]
    pub(crate) fn base_ptr(&self) -> *mut u8 {
        self.base as *mut u8
    }

    #[inline]
    pub(crate) fn buffer_size(&self) -> usize {
        self.info.buffer_size() as usize
    }

    /// Bounds-checked pointer to `len` bytes starting at `offset`, or
    /// `None` when the range escapes the framebuffer.
    #[inline]
    pub(crate) fn checked_ptr(&self, offset: usize, len: usize) -> Option<*mut u8> {
        let end = offset.checked_add(len)?;
        if end > self.buffer_size() {
            return None;
        }
        let base = self.base_ptr();
        if base.is_null() {
            return None;
        }
        // SAFETY: offset and len were bounds-checked against the
        // framebuffer size above.
        Some(unsafe { base.add(offset) })
    }
}

static FRAMEBUFFER: Mutex<Option<FbState>> = Mutex::new(None);

/// Validate and store the boot framebuffer. Returns `false` (leaving any
/// previous state untouched) when the geometry is implausible.
pub fn init_with_display_info(address: u64, info: &DisplayInfo) -> bool {
    if address == 0 {
        klog_warn!("framebuffer: null base address");
        return false;
    }
    if info.width < MIN_FRAMEBUFFER_WIDTH
        || info.width > DisplayInfo::MAX_DIMENSION
        || info.height < MIN_FRAMEBUFFER_HEIGHT
        || info.height > DisplayInfo::MAX_DIMENSION
    {
        klog_warn!("framebuffer: bad dimensions {}x{}", info.width, info.height);
        return false;
    }
    if info.pitch < info.width * info.bytes_per_pixel() as u32 {
        klog_warn!("framebuffer: pitch {} too small", info.pitch);
        return false;
    }
    if info.buffer_size() == 0 || info.buffer_size() > MAX_BUFFER_SIZE {
        klog_warn!("framebuffer: implausible size {}", info.buffer_size());
        return false;
    }

    *FRAMEBUFFER.lock() = Some(FbState {
        base: address,
        info: *info,
    });
    klog_info!(
        "framebuffer: {}x{} pitch {} bpp {}",
        info.width,
        info.height,
        info.pitch,
        info.bytes_per_pixel() * 8
    );
    true
}

pub(crate) fn snapshot() -> Option<FbState> {
    *FRAMEBUFFER.lock()
}

pub fn is_initialized() -> bool {
    FRAMEBUFFER.lock().is_some()
}

/// `(width, height)` of the active framebuffer, if any.
pub fn dimensions() -> Option<(u32, u32)> {
    FRAMEBUFFER.lock().map(|fb| (fb.width(), fb.height()))
}
