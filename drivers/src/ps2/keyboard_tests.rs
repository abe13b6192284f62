use vesper_lib::testing::TestResult;
use vesper_lib::{define_test_suite, fail, pass};

use crate::ps2::keyboard::KeyboardState;

fn test_letter_translation() -> TestResult {
    let mut kbd = KeyboardState::new();
    if kbd.feed_scancode(0x1E) != Some(b'a') {
        return fail!("make code 0x1E did not decode to 'a'");
    }
    if kbd.feed_scancode(0x9E).is_some() {
        return fail!("break code produced a character");
    }
    pass!()
}

fn test_shift_produces_uppercase() -> TestResult {
    let mut kbd = KeyboardState::new();
    let _ = kbd.feed_scancode(0x2A);
    if kbd.feed_scancode(0x1E) != Some(b'A') {
        return fail!("shifted 'a' was not 'A'");
    }
    let _ = kbd.feed_scancode(0xAA);
    if kbd.feed_scancode(0x1E) != Some(b'a') {
        return fail!("shift stuck after release");
    }
    pass!()
}

fn test_shift_symbols() -> TestResult {
    let mut kbd = KeyboardState::new();
    let _ = kbd.feed_scancode(0x2A);
    if kbd.feed_scancode(0x02) != Some(b'!') {
        return fail!("shift+1 was not '!'");
    }
    let _ = kbd.feed_scancode(0xAA);
    if kbd.feed_scancode(0x02) != Some(b'1') {
        return fail!("unshifted 1 wrong");
    }
    pass!()
}

fn test_caps_lock_letters_only() -> TestResult {
    let mut kbd = KeyboardState::new();
    let _ = kbd.feed_scancode(0x3A);
    let _ = kbd.feed_scancode(0xBA);
    if kbd.feed_scancode(0x1E) != Some(b'A') {
        return fail!("caps lock did not uppercase");
    }
    // Shift under caps lock cancels back to lowercase.
    let _ = kbd.feed_scancode(0x2A);
    if kbd.feed_scancode(0x1E) != Some(b'a') {
        return fail!("shift+caps was not lowercase");
    }
    pass!()
}

fn test_whitespace_keys() -> TestResult {
    let mut kbd = KeyboardState::new();
    if kbd.feed_scancode(0x1C) != Some(b'\n') {
        return fail!("enter");
    }
    if kbd.feed_scancode(0x39) != Some(b' ') {
        return fail!("space");
    }
    if kbd.feed_scancode(0x0F) != Some(b'\t') {
        return fail!("tab");
    }
    pass!()
}

fn test_unmapped_codes_yield_nothing() -> TestResult {
    let mut kbd = KeyboardState::new();
    // F1 make code has no ASCII mapping.
    if kbd.feed_scancode(0x3B).is_some() {
        return fail!("F1 produced a character");
    }
    pass!()
}

fn test_extended_sequences_swallowed() -> TestResult {
    let mut kbd = KeyboardState::new();
    if kbd.feed_scancode(0xE0).is_some() || kbd.feed_scancode(0x48).is_some() {
        return fail!("arrow key produced a character");
    }
    if kbd.feed_scancode(0x1E) != Some(b'a') {
        return fail!("translation broken after extended sequence");
    }
    pass!()
}

fn test_queue_preserves_order() -> TestResult {
    let mut kbd = KeyboardState::new();
    for code in [0x23u8, 0x12, 0x26, 0x26, 0x18] {
        let _ = kbd.feed_scancode(code);
    }
    let expected = [b'h', b'e', b'l', b'l', b'o'];
    for &want in &expected {
        if kbd.pop() != Some(want) {
            return fail!("queue order broken");
        }
    }
    if kbd.pop().is_some() {
        return fail!("queue not drained");
    }
    pass!()
}

define_test_suite!(
    ps2_keyboard,
    [
        test_letter_translation,
        test_shift_produces_uppercase,
        test_shift_symbols,
        test_caps_lock_letters_only,
        test_whitespace_keys,
        test_unmapped_codes_yield_nothing,
        test_extended_sequences_swallowed,
        test_queue_preserves_order,
    ]
);
