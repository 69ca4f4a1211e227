//! Deterministic fakes shared by the unit tests

use crate::replay::Pacer;
use crate::source::{Modifiers, MouseAction, RawInputSource, RawNotification};
use clickback_core::{Error, InputInjector, MouseButton, Result};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Click(i32, i32),
    Key(u16, bool),
    Release(MouseButton),
    Wait(Duration),
}

/// Ordered record of everything the fakes were asked to do
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Injector that tracks held keys the way the OS would
pub struct FakeInjector {
    log: CallLog,
    held: HashSet<u16>,
}

impl FakeInjector {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            held: HashSet::new(),
        }
    }

    /// Mark a key as held without logging an injection
    pub fn hold(&mut self, code: u16) {
        self.held.insert(code);
    }

    pub fn held(&self) -> &HashSet<u16> {
        &self.held
    }
}

impl InputInjector for FakeInjector {
    fn click_at(&mut self, x: i32, y: i32) {
        self.log.push(Call::Click(x, y));
    }

    fn key(&mut self, code: u16, down: bool) {
        if down {
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }
        self.log.push(Call::Key(code, down));
    }

    fn release_button(&mut self, button: MouseButton) {
        self.log.push(Call::Release(button));
    }

    fn is_key_down(&self, code: u16) -> bool {
        self.held.contains(&code)
    }
}

pub struct FakePacer {
    log: CallLog,
}

impl FakePacer {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl Pacer for FakePacer {
    fn wait(&mut self, delay: Duration) {
        self.log.push(Call::Wait(delay));
    }
}

/// Pacer that ignores time entirely
#[derive(Default)]
pub struct NoWait;

impl Pacer for NoWait {
    fn wait(&mut self, _delay: Duration) {}
}

/// Source that hands out one scripted batch per `pump`
#[derive(Default)]
pub struct ScriptedSource {
    batches: VecDeque<Vec<RawNotification>>,
    pub fail_mouse: bool,
    pub fail_keyboard: bool,
    pub mouse_subscribed: bool,
    pub keyboard_subscribed: bool,
    pub unsubscribe_calls: usize,
    pub pumps: usize,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<RawNotification>>) -> Self {
        Self {
            batches: batches.into(),
            ..Self::default()
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.mouse_subscribed || self.keyboard_subscribed
    }
}

impl RawInputSource for ScriptedSource {
    fn subscribe_mouse(&mut self) -> Result<()> {
        if self.fail_mouse {
            return Err(Error::hook_installation("mouse", "rejected by fake"));
        }
        self.mouse_subscribed = true;
        Ok(())
    }

    fn subscribe_keyboard(&mut self) -> Result<()> {
        if self.fail_keyboard {
            return Err(Error::hook_installation("keyboard", "rejected by fake"));
        }
        self.keyboard_subscribed = true;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.mouse_subscribed = false;
        self.keyboard_subscribed = false;
        self.unsubscribe_calls += 1;
    }

    fn pump(&mut self, sink: &mut dyn FnMut(RawNotification)) {
        self.pumps += 1;
        if let Some(batch) = self.batches.pop_front() {
            for n in batch {
                sink(n);
            }
        }
    }
}

pub fn left_click(x: i32, y: i32) -> RawNotification {
    RawNotification::mouse(MouseAction::LeftDown, x, y)
}

pub fn key(code: u16, is_down: bool) -> RawNotification {
    RawNotification::key(code, is_down, Modifiers::NONE)
}

pub fn stop_gesture() -> RawNotification {
    RawNotification::key(
        clickback_core::vk::Q,
        true,
        Modifiers::NONE | Modifiers::CTRL | Modifiers::ALT,
    )
}
