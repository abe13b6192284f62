use vesper_abi::input::PointerButtons;
use vesper_lib::testing::TestResult;
use vesper_lib::{define_test_suite, fail, pass};

use crate::ps2::mouse::MouseDriver;

fn feed_packet(drv: &mut MouseDriver, flags: u8, dx: u8, dy: u8) {
    for byte in [flags, dx, dy] {
        let _ = drv.feed_byte(byte);
    }
}

fn centered_driver() -> MouseDriver {
    let mut drv = MouseDriver::new();
    drv.set_bounds(1024, 768);
    drv.state.x = 512;
    drv.state.y = 384;
    drv
}

fn test_sign_extension_x() -> TestResult {
    let mut drv = centered_driver();
    // Sync + X sign, raw dx 0x80 decodes to 128 - 256 = -128.
    feed_packet(&mut drv, 0x18, 0x80, 0x00);
    if drv.state.x != 512 - 128 {
        return fail!("x = {} after negative dx", drv.state.x);
    }
    if drv.state.y != 384 {
        return fail!("y moved without dy");
    }
    pass!()
}

fn test_y_axis_inversion() -> TestResult {
    let mut drv = centered_driver();
    // Positive device dy means "up", which is a smaller screen y.
    feed_packet(&mut drv, 0x08, 0x00, 0x10);
    if drv.state.y != 384 - 16 {
        return fail!("y = {} after upward motion", drv.state.y);
    }
    // Negative device dy moves the cursor down the screen.
    feed_packet(&mut drv, 0x28, 0x00, 0x80);
    if drv.state.y != 384 - 16 + 128 {
        return fail!("y = {} after downward motion", drv.state.y);
    }
    pass!()
}

fn test_overflow_discards_movement() -> TestResult {
    let mut drv = centered_driver();
    // X overflow set: movement must be dropped, buttons still applied.
    feed_packet(&mut drv, 0x49, 0x7F, 0x10);
    if drv.state.x != 512 || drv.state.y != 384 {
        return fail!("position moved on overflow packet");
    }
    if !drv.state.buttons.contains(PointerButtons::LEFT) {
        return fail!("button edge lost on overflow packet");
    }
    pass!()
}

fn test_resync_on_bad_first_byte() -> TestResult {
    let mut drv = centered_driver();
    // Sync bit clear: byte must be discarded without advancing the
    // assembly state.
    if drv.feed_byte(0x00).is_some() || drv.packet_byte != 0 {
        return fail!("desynced byte accepted");
    }
    // The stream recovers on the next valid packet.
    let mut completed = None;
    for byte in [0x08, 0x05, 0x00] {
        completed = drv.feed_byte(byte);
    }
    if completed.is_none() || drv.state.x != 517 {
        return fail!("packet after resync not applied (x = {})", drv.state.x);
    }
    pass!()
}

fn test_position_clamped_to_bounds() -> TestResult {
    let mut drv = MouseDriver::new();
    drv.set_bounds(200, 150);
    drv.state.x = 100;
    drv.state.y = 75;
    for _ in 0..5 {
        feed_packet(&mut drv, 0x08, 0xFF, 0x00);
    }
    if drv.state.x != 199 {
        return fail!("x = {} beyond right edge", drv.state.x);
    }
    for _ in 0..5 {
        feed_packet(&mut drv, 0x28, 0x00, 0x80);
    }
    if drv.state.y != 149 {
        return fail!("y = {} beyond bottom edge", drv.state.y);
    }
    for _ in 0..5 {
        feed_packet(&mut drv, 0x18, 0x80, 0x00);
    }
    if drv.state.x != 0 {
        return fail!("x = {} beyond left edge", drv.state.x);
    }
    pass!()
}

fn test_buttons_follow_packets() -> TestResult {
    let mut drv = centered_driver();
    feed_packet(&mut drv, 0x09, 0x00, 0x00);
    if drv.state.buttons != PointerButtons::LEFT {
        return fail!("left press not reported");
    }
    feed_packet(&mut drv, 0x0C, 0x00, 0x00);
    if drv.state.buttons != PointerButtons::MIDDLE {
        return fail!("release + middle press not reported");
    }
    feed_packet(&mut drv, 0x08, 0x00, 0x00);
    if !drv.state.buttons.is_empty() {
        return fail!("buttons stuck after release");
    }
    pass!()
}

fn test_set_bounds_reclamps_position() -> TestResult {
    let mut drv = centered_driver();
    drv.set_bounds(100, 100);
    if drv.state.x != 99 || drv.state.y != 99 {
        return fail!(
            "position ({}, {}) outside shrunk bounds",
            drv.state.x,
            drv.state.y
        );
    }
    pass!()
}

define_test_suite!(
    ps2_mouse,
    [
        test_sign_extension_x,
        test_y_axis_inversion,
        test_overflow_discards_movement,
        test_resync_on_bad_first_byte,
        test_position_clamped_to_bounds,
        test_buttons_follow_packets,
        test_set_bounds_reclamps_position,
    ]
);
