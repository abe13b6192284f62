//! Coverage for the small shared primitives everything else builds on.

use vesper_abi::draw::Color32;
use vesper_abi::pixel::PixelFormat;
use vesper_lib::ring_buffer::RingBuffer;
use vesper_lib::string::{bytes_as_str, copy_nul_padded};
use vesper_lib::testing::TestResult;
use vesper_lib::{define_test_suite, fail, numfmt, pass};

fn test_ring_buffer_fifo_order() -> TestResult {
    let mut buf: RingBuffer<u8, 4> = RingBuffer::new_with(0);
    for v in [1u8, 2, 3] {
        if !buf.push(v) {
            return fail!("push {} failed", v);
        }
    }
    for want in [1u8, 2, 3] {
        if buf.pop() != Some(want) {
            return fail!("pop order broken at {}", want);
        }
    }
    if buf.pop().is_some() {
        return fail!("empty buffer popped a value");
    }
    pass!()
}

fn test_ring_buffer_drops_when_full() -> TestResult {
    let mut buf: RingBuffer<u8, 2> = RingBuffer::new_with(0);
    buf.push(1);
    buf.push(2);
    if buf.push(3) {
        return fail!("push into a full buffer succeeded");
    }
    if buf.pop() != Some(1) || buf.pop() != Some(2) {
        return fail!("overflow corrupted contents");
    }
    pass!()
}

fn test_ring_buffer_wraparound() -> TestResult {
    let mut buf: RingBuffer<u8, 3> = RingBuffer::new_with(0);
    for round in 0..10u8 {
        if !buf.push(round) {
            return fail!("push failed on round {}", round);
        }
        if buf.pop() != Some(round) {
            return fail!("wraparound lost round {}", round);
        }
    }
    pass!()
}

fn test_color_encoding() -> TestResult {
    let c = Color32::rgb(0x12, 0x34, 0x56);
    if PixelFormat::Xrgb8888.encode(c).to_u32() != 0xFF12_3456 {
        return fail!("xrgb encode wrong");
    }
    // BGR swaps the red and blue bytes.
    if PixelFormat::Bgr888.encode(c).to_u32() & 0x00FF_FFFF != 0x0056_3412 {
        return fail!("bgr encode wrong");
    }
    if PixelFormat::from_bpp(24) != PixelFormat::Rgb888 {
        return fail!("from_bpp(24) wrong");
    }
    if PixelFormat::from_bpp(32).bytes_per_pixel() != 4 {
        return fail!("from_bpp(32) wrong");
    }
    pass!()
}

fn test_nul_padded_strings() -> TestResult {
    let mut buf = [0u8; 8];
    copy_nul_padded(&mut buf, "hello");
    if bytes_as_str(&buf) != "hello" {
        return fail!("roundtrip failed");
    }
    // Truncation always leaves room for the NUL.
    copy_nul_padded(&mut buf, "a very long title");
    if bytes_as_str(&buf).len() != 7 {
        return fail!("truncation wrong: '{}'", bytes_as_str(&buf));
    }
    pass!()
}

fn test_decimal_formatting() -> TestResult {
    let mut buf = [0u8; numfmt::U32_DEC_DIGITS];
    if numfmt::format_u32_dec(0, &mut buf) != "0" {
        return fail!("zero");
    }
    let mut buf = [0u8; numfmt::U32_DEC_DIGITS];
    if numfmt::format_u32_dec(90210, &mut buf) != "90210" {
        return fail!("90210");
    }
    let mut buf = [0u8; numfmt::U32_DEC_DIGITS];
    if numfmt::format_u32_dec(u32::MAX, &mut buf) != "4294967295" {
        return fail!("u32::MAX");
    }
    pass!()
}

define_test_suite!(
    core_primitives,
    [
        test_ring_buffer_fifo_order,
        test_ring_buffer_drops_when_full,
        test_ring_buffer_wraparound,
        test_color_encoding,
        test_nul_padded_strings,
        test_decimal_formatting,
    ]
);
