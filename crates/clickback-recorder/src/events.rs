//! Captured actions and the log that holds them

use clickback_core::vk;
use std::fmt;

/// A single captured action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Left-button press at absolute screen coordinates
    MouseClick { x: i32, y: i32 },

    /// Key press or release, by virtual key code
    KeyTransition { code: u16, is_down: bool },
}

impl Event {
    pub fn mouse_click(x: i32, y: i32) -> Self {
        Event::MouseClick { x, y }
    }

    pub fn key_transition(code: u16, is_down: bool) -> Self {
        Event::KeyTransition { code, is_down }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Event::MouseClick { x, y } => write!(f, "Mouse clicked at ({}, {})", x, y),
            Event::KeyTransition { code, is_down } => write!(
                f,
                "Key {}: {} ({})",
                if is_down { "pressed" } else { "released" },
                vk::name(code),
                code
            ),
        }
    }
}

/// Append-only, capture-ordered sequence of events
///
/// Only the monitor appends, and only while recording. Playback reads it
/// through `iter()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn clicks(&self) -> usize {
        self.iter()
            .filter(|e| matches!(e, Event::MouseClick { .. }))
            .count()
    }

    pub fn key_transitions(&self) -> usize {
        self.len() - self.clicks()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl FromIterator<Event> for EventLog {
    fn from_iter<T: IntoIterator<Item = Event>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut log = EventLog::new();
        log.push(Event::mouse_click(100, 200));
        log.push(Event::key_transition(vk::A, true));
        log.push(Event::key_transition(vk::A, false));

        assert_eq!(
            log.as_slice(),
            &[
                Event::MouseClick { x: 100, y: 200 },
                Event::KeyTransition { code: vk::A, is_down: true },
                Event::KeyTransition { code: vk::A, is_down: false },
            ]
        );
        assert_eq!(log.clicks(), 1);
        assert_eq!(log.key_transitions(), 2);
    }

    #[test]
    fn console_lines() {
        assert_eq!(Event::mouse_click(-5, 40).to_string(), "Mouse clicked at (-5, 40)");
        assert_eq!(
            Event::key_transition(vk::A, false).to_string(),
            "Key released: A (65)"
        );
    }
}
