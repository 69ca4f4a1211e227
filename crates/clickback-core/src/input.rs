//! Keyboard and mouse input injection
//!
//! The playback side only needs four things from the OS: put the cursor
//! somewhere and click, press or release a key, release a mouse button,
//! and ask whether a key is currently held. Injection is best effort:
//! none of the methods report failure back to the caller.

use serde::{Deserialize, Serialize};

/// Every virtual key code the key-state query can answer for
pub const KEY_CODES: std::ops::RangeInclusive<u16> = 0..=255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
}

/// Synthesizes input as if a human produced it
pub trait InputInjector {
    /// Move the cursor to absolute screen coordinates, then press and
    /// release the left button there
    fn click_at(&mut self, x: i32, y: i32);

    /// Press (`down = true`) or release a virtual key
    fn key(&mut self, code: u16, down: bool);

    /// Release a mouse button, whether or not it is held
    fn release_button(&mut self, button: MouseButton);

    /// Whether the key is physically or logically held right now
    fn is_key_down(&self, code: u16) -> bool;
}

impl<T: InputInjector + ?Sized> InputInjector for &mut T {
    fn click_at(&mut self, x: i32, y: i32) {
        (**self).click_at(x, y)
    }

    fn key(&mut self, code: u16, down: bool) {
        (**self).key(code, down)
    }

    fn release_button(&mut self, button: MouseButton) {
        (**self).release_button(button)
    }

    fn is_key_down(&self, code: u16) -> bool {
        (**self).is_key_down(code)
    }
}

/// Common virtual key codes
pub mod vk {
    pub const BACKSPACE: u16 = 0x08;
    pub const TAB: u16 = 0x09;
    pub const RETURN: u16 = 0x0D;
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;
    pub const ALT: u16 = 0x12;
    pub const CAPS_LOCK: u16 = 0x14;
    pub const ESCAPE: u16 = 0x1B;
    pub const SPACE: u16 = 0x20;

    // Letters A-Z are 0x41-0x5A
    pub const A: u16 = 0x41;
    pub const Q: u16 = 0x51;
    pub const Z: u16 = 0x5A;

    pub const LWIN: u16 = 0x5B;
    pub const RWIN: u16 = 0x5C;

    pub const LSHIFT: u16 = 0xA0;
    pub const RSHIFT: u16 = 0xA1;
    pub const LCONTROL: u16 = 0xA2;
    pub const RCONTROL: u16 = 0xA3;
    pub const LALT: u16 = 0xA4;
    pub const RALT: u16 = 0xA5;

    /// Short human-readable name, falling back to the hex code
    pub fn name(code: u16) -> String {
        match code {
            BACKSPACE => "Backspace".to_string(),
            TAB => "Tab".to_string(),
            RETURN => "Enter".to_string(),
            SHIFT | LSHIFT | RSHIFT => "Shift".to_string(),
            CONTROL | LCONTROL | RCONTROL => "Ctrl".to_string(),
            ALT | LALT | RALT => "Alt".to_string(),
            CAPS_LOCK => "CapsLock".to_string(),
            ESCAPE => "Esc".to_string(),
            SPACE => "Space".to_string(),
            LWIN | RWIN => "Win".to_string(),
            0x30..=0x39 | A..=Z => char::from(code as u8).to_string(),
            _ => format!("0x{:02X}", code),
        }
    }
}
