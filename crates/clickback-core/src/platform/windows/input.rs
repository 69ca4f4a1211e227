//! Windows input injection
//!
//! Uses SetCursorPos + SendInput for synthesis and GetAsyncKeyState for
//! key-state queries.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT,
    KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_RIGHTUP, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

use crate::input::{InputInjector, MouseButton};
use crate::{Error, ErrorCode, Result};

/// Injects input into whichever window has focus
#[derive(Debug, Default)]
pub struct SendInputInjector;

impl SendInputInjector {
    pub fn new() -> Self {
        Self
    }
}

impl InputInjector for SendInputInjector {
    fn click_at(&mut self, x: i32, y: i32) {
        if let Err(e) = move_mouse(x, y) {
            tracing::debug!("{}", e);
        }
        let inputs = [
            make_mouse_input(MOUSEEVENTF_LEFTDOWN),
            make_mouse_input(MOUSEEVENTF_LEFTUP),
        ];
        if let Err(e) = send_inputs(&inputs) {
            tracing::debug!("click at ({}, {}): {}", x, y, e);
        }
    }

    fn key(&mut self, code: u16, down: bool) {
        if let Err(e) = send_inputs(&[make_key_input(code, !down)]) {
            tracing::debug!("key 0x{:02X}: {}", code, e);
        }
    }

    fn release_button(&mut self, button: MouseButton) {
        let flags = match button {
            MouseButton::Left => MOUSEEVENTF_LEFTUP,
            MouseButton::Right => MOUSEEVENTF_RIGHTUP,
            MouseButton::Middle => MOUSEEVENTF_MIDDLEUP,
        };
        if let Err(e) = send_inputs(&[make_mouse_input(flags)]) {
            tracing::debug!("release {:?}: {}", button, e);
        }
    }

    fn is_key_down(&self, code: u16) -> bool {
        // High bit set means the key is down right now
        let state = unsafe { GetAsyncKeyState(code as i32) };
        (state as u16) & 0x8000 != 0
    }
}

/// Move the mouse to absolute coordinates
fn move_mouse(x: i32, y: i32) -> Result<()> {
    unsafe {
        SetCursorPos(x, y).map_err(|e| {
            Error::new(ErrorCode::Unknown, format!("Failed to move mouse: {:?}", e))
        })?;
    }
    Ok(())
}

fn make_mouse_input(flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn make_key_input(vk: u16, key_up: bool) -> INPUT {
    let flags = if key_up {
        KEYEVENTF_KEYUP
    } else {
        KEYBD_EVENT_FLAGS(0)
    };

    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send_inputs(inputs: &[INPUT]) -> Result<()> {
    let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };

    if sent as usize != inputs.len() {
        return Err(Error::new(
            ErrorCode::Unknown,
            format!("SendInput failed: sent {} of {} inputs", sent, inputs.len()),
        ));
    }

    Ok(())
}
