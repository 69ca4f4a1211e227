//! Low-level mouse and keyboard hooks
//!
//! Both hooks run on the thread that installed them, and only while that
//! thread is inside a message retrieval call. `pump` does that retrieval and
//! then drains what the hook procedures queued.

use std::cell::RefCell;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VIRTUAL_KEY, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, PeekMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT, MSG, MSLLHOOKSTRUCT, PM_REMOVE, WH_KEYBOARD_LL,
    WH_MOUSE_LL, WM_KEYDOWN, WM_KEYUP, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN,
    WM_MBUTTONUP, WM_MOUSEHWHEEL, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_RBUTTONDOWN, WM_RBUTTONUP,
    WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::source::{Modifiers, MouseAction, RawInputSource, RawNotification};
use clickback_core::{Error, Result};

thread_local! {
    static HOOK_TX: RefCell<Option<Sender<RawNotification>>> = const { RefCell::new(None) };
}

/// `RawInputSource` backed by WH_MOUSE_LL and WH_KEYBOARD_LL
///
/// Must stay on the thread that created it. Dropping it removes both hooks.
pub struct HookSource {
    mouse_hook: Option<HHOOK>,
    keyboard_hook: Option<HHOOK>,
    tx: Sender<RawNotification>,
    rx: Receiver<RawNotification>,
}

impl HookSource {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            mouse_hook: None,
            keyboard_hook: None,
            tx,
            rx,
        }
    }

    fn publish_sender(&self) {
        HOOK_TX.with(|slot| {
            *slot.borrow_mut() = Some(self.tx.clone());
        });
    }
}

impl Default for HookSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInputSource for HookSource {
    fn subscribe_mouse(&mut self) -> Result<()> {
        if self.mouse_hook.is_some() {
            return Ok(());
        }
        self.publish_sender();

        let hook = unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_proc), None, 0) }
            .map_err(|e| Error::hook_installation("mouse", e))?;
        self.mouse_hook = Some(hook);
        debug!("mouse hook installed");
        Ok(())
    }

    fn subscribe_keyboard(&mut self) -> Result<()> {
        if self.keyboard_hook.is_some() {
            return Ok(());
        }
        self.publish_sender();

        let hook = unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0) }
            .map_err(|e| Error::hook_installation("keyboard", e))?;
        self.keyboard_hook = Some(hook);
        debug!("keyboard hook installed");
        Ok(())
    }

    fn unsubscribe(&mut self) {
        if let Some(hook) = self.keyboard_hook.take() {
            if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
                warn!("Failed to unhook keyboard hook: {}", e);
            }
        }
        if let Some(hook) = self.mouse_hook.take() {
            if let Err(e) = unsafe { UnhookWindowsHookEx(hook) } {
                warn!("Failed to unhook mouse hook: {}", e);
            }
        }
        HOOK_TX.with(|slot| slot.borrow_mut().take());
    }

    fn pump(&mut self, sink: &mut dyn FnMut(RawNotification)) {
        let mut msg = MSG::default();
        unsafe {
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        for notification in self.rx.try_iter() {
            sink(notification);
        }
    }
}

impl Drop for HookSource {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

fn send(notification: RawNotification) {
    HOOK_TX.with(|slot| {
        if let Some(tx) = slot.borrow().as_ref() {
            let _ = tx.send(notification);
        }
    });
}

fn key_held(key: VIRTUAL_KEY) -> bool {
    unsafe { (GetAsyncKeyState(key.0 as i32) as u16) & 0x8000 != 0 }
}

fn current_modifiers() -> Modifiers {
    let mut m = Modifiers::NONE;
    if key_held(VK_SHIFT) {
        m = m | Modifiers::SHIFT;
    }
    if key_held(VK_CONTROL) {
        m = m | Modifiers::CTRL;
    }
    if key_held(VK_MENU) {
        m = m | Modifiers::ALT;
    }
    if key_held(VK_LWIN) || key_held(VK_RWIN) {
        m = m | Modifiers::WIN;
    }
    m
}

fn mouse_action(message: u32) -> MouseAction {
    match message {
        WM_LBUTTONDOWN => MouseAction::LeftDown,
        WM_LBUTTONUP => MouseAction::LeftUp,
        WM_RBUTTONDOWN => MouseAction::RightDown,
        WM_RBUTTONUP => MouseAction::RightUp,
        WM_MBUTTONDOWN => MouseAction::MiddleDown,
        WM_MBUTTONUP => MouseAction::MiddleUp,
        WM_MOUSEMOVE => MouseAction::Move,
        WM_MOUSEWHEEL | WM_MOUSEHWHEEL => MouseAction::Wheel,
        _ => MouseAction::Other,
    }
}

unsafe extern "system" fn mouse_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        let data = *(lparam.0 as *const MSLLHOOKSTRUCT);
        send(RawNotification::mouse(
            mouse_action(wparam.0 as u32),
            data.pt.x,
            data.pt.y,
        ));
    }
    CallNextHookEx(None, code, wparam, lparam)
}

/// `Some(true)` for a press, `Some(false)` for a release. Alt-chords arrive as SYS messages.
fn key_direction(message: u32) -> Option<bool> {
    match message {
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(true),
        WM_KEYUP | WM_SYSKEYUP => Some(false),
        _ => None,
    }
}

unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        if let Some(is_down) = key_direction(wparam.0 as u32) {
            let data = *(lparam.0 as *const KBDLLHOOKSTRUCT);
            send(RawNotification::key(
                data.vkCode as u16,
                is_down,
                current_modifiers(),
            ));
        }
    }
    CallNextHookEx(None, code, wparam, lparam)
}
