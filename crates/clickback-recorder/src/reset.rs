//! Force keyboard and mouse back to "nothing held" between replay passes

use clickback_core::{InputInjector, MouseButton, KEY_CODES};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub keys_released: usize,
    pub buttons_released: usize,
}

/// Release every key the platform reports as held
pub fn reset_keyboard<I: InputInjector + ?Sized>(injector: &mut I) -> usize {
    let mut released = 0;
    for code in KEY_CODES {
        if injector.is_key_down(code) {
            injector.key(code, false);
            released += 1;
        }
    }
    if released > 0 {
        debug!(released, "released stuck keys");
    }
    released
}

/// Release left, right and middle buttons unconditionally
pub fn reset_mouse<I: InputInjector + ?Sized>(injector: &mut I) -> usize {
    for button in MouseButton::ALL {
        injector.release_button(button);
    }
    MouseButton::ALL.len()
}

pub fn reset_input_state<I: InputInjector + ?Sized>(injector: &mut I) -> ResetReport {
    ResetReport {
        keys_released: reset_keyboard(injector),
        buttons_released: reset_mouse(injector),
    }
}
