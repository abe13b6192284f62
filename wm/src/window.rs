//! Window records and their content surface.

use vesper_abi::draw::{Canvas, EncodedPixel};
use vesper_abi::pixel::PixelFormat;
use vesper_abi::window::{MAX_WINDOW_TITLE, WINDOW_TITLE_BAR_HEIGHT, WindowFlags, WindowId};
use vesper_lib::string::{bytes_as_str, copy_nul_padded};

/// Per-frame window content extension point.
///
/// The compositor calls [`DrawHook::draw`] once per composited frame,
/// right after the window's buffer has been blitted to screen. Hooks draw
/// into the window's buffer through its [`Canvas`] implementation, so
/// whatever they paint shows up on the next frame. State the hook needs
/// (counters, samples) lives inside the hook value itself.
pub trait DrawHook: Sync {
    fn draw(&self, window: &mut Window);
}

/// A window record: geometry, flags, title, and an owned pixel range in
/// the window arena.
///
/// The registry owns every `Window` for its entire lifetime; nothing else
/// holds a long-lived reference to one.
pub struct Window {
    pub(crate) id: WindowId,
    pub(crate) title: [u8; MAX_WINDOW_TITLE],
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) flags: WindowFlags,
    /// Start of this window's pixel range in the arena. Pixels are 0RGB,
    /// row-major, `width * height` of them in use.
    buf: *mut u32,
    /// Pixels allocated at creation time. Resizing may use less, never
    /// more.
    pub(crate) capacity: usize,
    pub(crate) hook: Option<&'static dyn DrawHook>,
    /// Geometry to restore after a maximize.
    pub(crate) saved_geometry: Option<(i32, i32, i32, i32)>,
}

// SAFETY: `buf` points into the static window arena; the range is owned
// exclusively by this record and only touched while the registry lock is
// held.
unsafe impl Send for Window {}

impl Window {
    pub(crate) fn new(
        id: WindowId,
        title: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        flags: WindowFlags,
        buf: *mut u32,
        capacity: usize,
    ) -> Self {
        let mut title_buf = [0u8; MAX_WINDOW_TITLE];
        copy_nul_padded(&mut title_buf, title);
        Self {
            id,
            title: title_buf,
            x,
            y,
            width,
            height,
            flags,
            buf,
            capacity,
            hook: None,
            saved_geometry: None,
        }
    }

    #[inline]
    pub fn id(&self) -> WindowId {
        self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        bytes_as_str(&self.title)
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        copy_nul_padded(&mut self.title, title);
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Rows of the buffer that are composited below the title bar.
    #[inline]
    pub fn content_height(&self) -> i32 {
        self.height - WINDOW_TITLE_BAR_HEIGHT
    }

    #[inline]
    fn used_pixels(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Read one content pixel; out-of-range coordinates read as zero.
    #[inline]
    pub(crate) fn pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if idx >= self.capacity {
            return 0;
        }
        // SAFETY: idx is within the window's allocated arena range.
        unsafe { self.buf.add(idx).read() }
    }
}

/// Window content is itself a drawing surface, so every `vesper-gfx`
/// routine (rects, lines, text) applies to it unchanged. The coordinate
/// space is the full `width x height` buffer; rows below
/// `content_height()` exist but are not composited.
impl Canvas for Window {
    #[inline]
    fn width(&self) -> u32 {
        self.width as u32
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height as u32
    }

    #[inline]
    fn pitch_bytes(&self) -> usize {
        self.width as usize * 4
    }

    #[inline]
    fn bytes_per_pixel(&self) -> u8 {
        4
    }

    #[inline]
    fn pixel_format(&self) -> PixelFormat {
        PixelFormat::Xrgb8888
    }

    #[inline]
    fn write_encoded_at(&mut self, byte_offset: usize, pixel: EncodedPixel) {
        let idx = byte_offset / 4;
        if idx >= self.used_pixels() || idx >= self.capacity {
            return;
        }
        // SAFETY: idx is within both the in-use region and the allocated
        // arena range.
        unsafe { self.buf.add(idx).write(pixel.to_u32()) };
    }
}
