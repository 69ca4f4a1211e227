//! Recorder and playback configuration

use crate::source::{KeyNotification, Modifiers};
use clickback_core::{vk, Error, Result};
use std::time::Duration;

pub const DEFAULT_CLICK_DELAY_MS: u32 = 1000;
pub const DEFAULT_KEY_DELAY_MS: u32 = 500;

/// Key combination that ends recording. It is never itself recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopGesture {
    pub modifiers: Modifiers,
    pub key: u16,
}

impl StopGesture {
    /// Matches on the key-down only, with at least the gesture's modifiers held
    pub fn matches(&self, key: &KeyNotification) -> bool {
        key.is_down && key.code == self.key && key.modifiers.contains(self.modifiers)
    }
}

impl Default for StopGesture {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::NONE | Modifiers::CTRL | Modifiers::ALT,
            key: vk::Q,
        }
    }
}

impl std::fmt::Display for StopGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = self.modifiers;
        if m.has_ctrl() { write!(f, "CTRL + ")?; }
        if m.has_alt() { write!(f, "ALT + ")?; }
        if m.has_shift() { write!(f, "SHIFT + ")?; }
        if m.has_win() { write!(f, "WIN + ")?; }
        write!(f, "{}", vk::name(self.key).to_uppercase())
    }
}

/// Recording-phase configuration
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Sleep between notification drains while waiting for the stop gesture
    pub poll_interval: Duration,
    /// Pause after both listeners are installed, before the wait begins
    pub settle_delay: Duration,
    pub stop_gesture: StopGesture,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            settle_delay: Duration::from_millis(100),
            stop_gesture: StopGesture::default(),
        }
    }
}

/// How many times to replay, and how long to wait after each injected event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub repeat_count: u32,
    pub click_delay: Duration,
    pub key_delay: Duration,
}

impl PlaybackConfig {
    /// Every value must be at least 1
    pub fn new(repeat_count: u32, click_delay_ms: u32, key_delay_ms: u32) -> Result<Self> {
        if repeat_count < 1 {
            return Err(Error::invalid_configuration("repeat count", "must be at least 1"));
        }
        if click_delay_ms < 1 {
            return Err(Error::invalid_configuration("time between clicks", "must be at least 1 ms"));
        }
        if key_delay_ms < 1 {
            return Err(Error::invalid_configuration(
                "time between keystrokes",
                "must be at least 1 ms",
            ));
        }
        Ok(Self {
            repeat_count,
            click_delay: Duration::from_millis(click_delay_ms.into()),
            key_delay: Duration::from_millis(key_delay_ms.into()),
        })
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            repeat_count: 1,
            click_delay: Duration::from_millis(DEFAULT_CLICK_DELAY_MS.into()),
            key_delay: Duration::from_millis(DEFAULT_KEY_DELAY_MS.into()),
        }
    }
}
