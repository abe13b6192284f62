//! PS/2 keyboard driver (polled, scancode set 1, US layout).

use spin::Mutex;

use vesper_lib::{RingBuffer, klog_info, klog_warn};

use crate::ps2;

const BUFFER_SIZE: usize = 64;
type CharBuffer = RingBuffer<u8, BUFFER_SIZE>;

#[derive(Clone, Copy)]
pub(crate) struct ModifierState {
    shift_left: bool,
    shift_right: bool,
    ctrl_left: bool,
    alt_left: bool,
    caps_lock: bool,
}

impl ModifierState {
    pub(crate) const fn new() -> Self {
        Self {
            shift_left: false,
            shift_right: false,
            ctrl_left: false,
            alt_left: false,
            caps_lock: false,
        }
    }

    fn is_shift(&self) -> bool {
        self.shift_left || self.shift_right
    }
}

pub(crate) struct KeyboardState {
    modifiers: ModifierState,
    chars: CharBuffer,
    extended_code: bool,
}

impl KeyboardState {
    pub(crate) const fn new() -> Self {
        Self {
            modifiers: ModifierState::new(),
            chars: CharBuffer::new_with(0),
            extended_code: false,
        }
    }

    fn reset(&mut self) {
        self.modifiers = ModifierState::new();
        self.chars.reset();
        self.extended_code = false;
    }

    /// Process one raw scancode. Decoded printable characters are queued
    /// and also returned; modifier updates, break codes, and unmapped
    /// codes yield `None`.
    pub(crate) fn feed_scancode(&mut self, code: u8) -> Option<u8> {
        if code == 0xE0 {
            self.extended_code = true;
            return None;
        }
        if self.extended_code {
            // Extended keys (arrows, right-side modifiers) have no ASCII
            // mapping here; swallow the second byte of the sequence.
            self.extended_code = false;
            return None;
        }

        let is_press = !is_break_code(code);
        let make_code = get_make_code(code);

        if is_modifier(make_code) {
            handle_modifier(&mut self.modifiers, make_code, is_press);
            return None;
        }
        if !is_press {
            return None;
        }

        let ch = translate_scancode(code, &self.modifiers);
        if ch == 0 {
            return None;
        }
        self.chars.push(ch);
        Some(ch)
    }

    pub(crate) fn pop(&mut self) -> Option<u8> {
        self.chars.pop()
    }
}

static STATE: Mutex<KeyboardState> = Mutex::new(KeyboardState::new());

const SCANCODE_LETTERS: [u8; 0x80] = [
    0x00, 0x00, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x30, 0x2D, 0x3D, 0x00, 0x09,
    0x71, 0x77, 0x65, 0x72, 0x74, 0x79, 0x75, 0x69, 0x6F, 0x70, 0x5B, 0x5D, 0x00, 0x00, 0x61, 0x73,
    0x64, 0x66, 0x67, 0x68, 0x6A, 0x6B, 0x6C, 0x3B, 0x27, 0x60, 0x00, 0x5C, 0x7A, 0x78, 0x63, 0x76,
    0x62, 0x6E, 0x6D, 0x2C, 0x2E, 0x2F, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

const SCANCODE_SHIFTED: [u8; 0x80] = [
    0x00, 0x00, 0x21, 0x40, 0x23, 0x24, 0x25, 0x5E, 0x26, 0x2A, 0x28, 0x29, 0x5F, 0x2B, 0x00, 0x00,
    0x51, 0x57, 0x45, 0x52, 0x54, 0x59, 0x55, 0x49, 0x4F, 0x50, 0x7B, 0x7D, 0x00, 0x00, 0x41, 0x53,
    0x44, 0x46, 0x47, 0x48, 0x4A, 0x4B, 0x4C, 0x3A, 0x22, 0x7E, 0x00, 0x7C, 0x5A, 0x58, 0x43, 0x56,
    0x42, 0x4E, 0x4D, 0x3C, 0x3E, 0x3F, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[inline(always)]
fn is_break_code(scancode: u8) -> bool {
    scancode & 0x80 != 0
}

#[inline(always)]
fn get_make_code(scancode: u8) -> u8 {
    scancode & 0x7F
}

#[inline(always)]
fn is_modifier(make_code: u8) -> bool {
    matches!(make_code, 0x2A | 0x36 | 0x1D | 0x38 | 0x3A)
}

fn translate_letter(make_code: u8, modifiers: &ModifierState) -> u8 {
    let shift = modifiers.is_shift();
    let caps = modifiers.caps_lock;

    if shift && (make_code as usize) < SCANCODE_SHIFTED.len() {
        let shifted = SCANCODE_SHIFTED[make_code as usize];
        if shifted != 0 {
            return shifted;
        }
    }

    if (make_code as usize) < SCANCODE_LETTERS.len() {
        let base_char = SCANCODE_LETTERS[make_code as usize];
        if base_char != 0 {
            if base_char.is_ascii_lowercase() && (shift ^ caps) {
                return base_char - 0x20;
            }
            return base_char;
        }
    }
    0
}

pub(crate) fn translate_scancode(scancode: u8, modifiers: &ModifierState) -> u8 {
    let make_code = get_make_code(scancode);
    match make_code {
        0x1C => b'\n',
        0x0E => 0x08,
        0x39 => b' ',
        0x0F => b'\t',
        0x01 => 0x1B,
        _ => {
            let ch = translate_letter(make_code, modifiers);
            // Ctrl+letter -> control code (0x01-0x1A)
            if modifiers.ctrl_left && ch != 0 {
                let lower = ch.to_ascii_lowercase();
                if lower.is_ascii_lowercase() {
                    return lower - b'a' + 1;
                }
            }
            ch
        }
    }
}

fn handle_modifier(modifiers: &mut ModifierState, make_code: u8, is_press: bool) {
    match make_code {
        0x2A => modifiers.shift_left = is_press,
        0x36 => modifiers.shift_right = is_press,
        0x1D => modifiers.ctrl_left = is_press,
        0x38 => modifiers.alt_left = is_press,
        0x3A => {
            if is_press {
                modifiers.caps_lock = !modifiers.caps_lock;
            }
        }
        _ => {}
    }
}

/// Reset the device and clear driver state. Timeouts are tolerated with a
/// warning; the boot path does not depend on a keyboard being present.
pub fn init() {
    klog_info!("PS/2 keyboard: initialising device");

    if !ps2::write_data(ps2::DEV_CMD_RESET) {
        klog_warn!("PS/2 keyboard: controller not accepting commands");
        return;
    }
    match ps2::read_data() {
        Some(ps2::DEV_ACK) => {
            if let Some(result) = ps2::read_data() {
                if result != ps2::DEV_SELF_TEST_PASS {
                    klog_warn!("PS/2 keyboard: self-test returned {:#04x}", result);
                }
            }
        }
        Some(other) => klog_warn!("PS/2 keyboard: reset NAK {:#04x}", other),
        None => klog_warn!("PS/2 keyboard: reset timed out"),
    }

    ps2::flush();
    STATE.lock().reset();
    klog_info!("PS/2 keyboard: initialised");
}

/// Consume at most one pending keyboard byte into the character queue.
/// Returns whether a byte was consumed.
pub fn pump() -> bool {
    let status = ps2::read_status();
    if status & ps2::STATUS_OUTPUT_FULL == 0 || status & ps2::STATUS_MOUSE_DATA != 0 {
        return false;
    }
    let code = ps2::read_data_nowait();
    let _ = STATE.lock().feed_scancode(code);
    true
}

/// Dequeue the oldest decoded character, if any.
pub fn pop_char() -> Option<char> {
    STATE.lock().pop().map(|b| b as char)
}

/// Pump once, then dequeue.
pub fn poll() -> Option<char> {
    pump();
    pop_char()
}
