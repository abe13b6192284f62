use vesper_abi::draw::{Canvas, Color32};
use vesper_abi::font::{FONT_CHAR_HEIGHT, FONT_CHAR_WIDTH, get_glyph_or_space};

/// Draw one glyph with its top-left corner at `(x, y)`.
///
/// Background cells are painted only when `bg` is given; otherwise the
/// glyph is drawn transparently over whatever is there.
pub fn draw_char<T: Canvas>(target: &mut T, x: i32, y: i32, ch: u8, fg: Color32, bg: Option<Color32>) {
    let fmt = target.pixel_format();
    let fg_px = fmt.encode(fg);
    let bg_px = bg.map(|c| fmt.encode(c));
    let glyph = get_glyph_or_space(ch);

    for (row_idx, &row_bits) in glyph.iter().enumerate() {
        let py = y + row_idx as i32;
        for col in 0..FONT_CHAR_WIDTH {
            let px = x + col;
            if row_bits & (1 << col) != 0 {
                target.put_pixel(px, py, fg_px);
            } else if let Some(bg_px) = bg_px {
                target.put_pixel(px, py, bg_px);
            }
        }
    }
}

/// Draw a byte string, handling `\n`/`\r`/`\t` and wrapping at the right
/// edge. Stops at a NUL byte or the bottom of the surface.
pub fn draw_string<T: Canvas>(
    target: &mut T,
    x: i32,
    y: i32,
    text: &[u8],
    fg: Color32,
    bg: Option<Color32>,
) {
    let w = target.width() as i32;
    let h = target.height() as i32;
    let mut cx = x;
    let mut cy = y;

    for &ch in text {
        match ch {
            0 => break,
            b'\n' => {
                cx = x;
                cy += FONT_CHAR_HEIGHT;
            }
            b'\r' => {
                cx = x;
            }
            b'\t' => {
                let tab_width = 4 * FONT_CHAR_WIDTH;
                cx = ((cx - x + tab_width) / tab_width) * tab_width + x;
            }
            _ => {
                draw_char(target, cx, cy, ch, fg, bg);
                cx += FONT_CHAR_WIDTH;
                if cx + FONT_CHAR_WIDTH > w {
                    cx = x;
                    cy += FONT_CHAR_HEIGHT;
                }
            }
        }
        if cy >= h {
            break;
        }
    }
}

#[inline]
pub fn draw_str<T: Canvas>(
    target: &mut T,
    x: i32,
    y: i32,
    text: &str,
    fg: Color32,
    bg: Option<Color32>,
) {
    draw_string(target, x, y, text.as_bytes(), fg, bg);
}

/// Pixel width of the first line of `text`.
pub fn string_width(text: &[u8]) -> i32 {
    let mut width = 0i32;
    for &ch in text {
        match ch {
            0 | b'\n' => break,
            b'\t' => {
                let tab_width = 4 * FONT_CHAR_WIDTH;
                width = ((width + tab_width - 1) / tab_width) * tab_width;
            }
            _ => width += FONT_CHAR_WIDTH,
        }
    }
    width
}
