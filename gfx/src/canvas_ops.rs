use vesper_abi::draw::{Canvas, Color32};

/// Bresenham line from `(x0, y0)` to `(x1, y1)` inclusive.
pub fn line<T: Canvas>(target: &mut T, x0: i32, y0: i32, x1: i32, y1: i32, color: Color32) {
    let w = target.width() as i32;
    let h = target.height() as i32;

    if (x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h) {
        return;
    }

    let px = target.pixel_format().encode(color);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cx = x0;
    let mut cy = y0;

    loop {
        target.put_pixel(cx, cy, px);
        if cx == x1 && cy == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
}

/// Rectangle outline.
pub fn rect<T: Canvas>(target: &mut T, x: i32, y: i32, w: i32, h: i32, color: Color32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let px = target.pixel_format().encode(color);
    target.hline(x, x + w - 1, y, px);
    target.hline(x, x + w - 1, y + h - 1, px);
    target.vline(x, y, y + h - 1, px);
    target.vline(x + w - 1, y, y + h - 1, px);
}

/// Filled rectangle.
pub fn fill_rect<T: Canvas>(target: &mut T, x: i32, y: i32, w: i32, h: i32, color: Color32) {
    if w <= 0 || h <= 0 {
        return;
    }
    let px = target.pixel_format().encode(color);
    target.fill_rect_encoded(x, y, w, h, px);
}

/// Clear the whole surface.
pub fn clear<T: Canvas>(target: &mut T, color: Color32) {
    let px = target.pixel_format().encode(color);
    target.clear_canvas(px);
}
