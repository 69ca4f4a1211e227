//! Global input monitor
//!
//! Turns raw notifications into log entries while a session is recording,
//! and watches for the stop gesture.

use crate::config::StopGesture;
use crate::events::Event;
use crate::session::RecordingSession;
use crate::source::{KeyNotification, MouseAction, RawInputSource, RawNotification};
use clickback_core::{Error, Result};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Recording,
    Stopped,
}

pub struct InputMonitor<S: RawInputSource> {
    source: S,
    state: MonitorState,
    gesture: StopGesture,
}

impl<S: RawInputSource> InputMonitor<S> {
    pub fn new(source: S, gesture: StopGesture) -> Self {
        Self {
            source,
            state: MonitorState::Idle,
            gesture,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Install both listeners and mark the session active
    ///
    /// If the keyboard listener is rejected the mouse listener is removed
    /// again before the error is returned.
    pub fn start(&mut self, session: &RecordingSession) -> Result<()> {
        if self.state == MonitorState::Recording {
            return Err(Error::invalid_state("Monitor is already recording"));
        }

        if let Err(e) = self.source.subscribe_mouse() {
            self.source.unsubscribe();
            return Err(e);
        }
        if let Err(e) = self.source.subscribe_keyboard() {
            self.source.unsubscribe();
            return Err(e);
        }

        session.activate();
        self.state = MonitorState::Recording;
        info!("listeners installed, recording");
        Ok(())
    }

    /// Drain whatever the source has queued, feeding each new event to `observer`
    pub fn pump(&mut self, session: &mut RecordingSession, observer: &mut dyn FnMut(&Event)) {
        let Self {
            source,
            state,
            gesture,
        } = self;

        source.pump(&mut |notification| {
            if let Some(event) = process(notification, &mut *state, &*gesture, &mut *session) {
                observer(&event);
            }
        });
    }

    /// Handle a single notification. Returns the event if one was recorded.
    pub fn handle(
        &mut self,
        notification: RawNotification,
        session: &mut RecordingSession,
    ) -> Option<Event> {
        process(notification, &mut self.state, &self.gesture, session)
    }

    /// Remove both listeners. Idempotent.
    pub fn stop(&mut self, session: &RecordingSession) {
        self.source.unsubscribe();
        session.deactivate();
        if self.state == MonitorState::Recording {
            self.state = MonitorState::Stopped;
            info!("listeners removed");
        }
    }
}

fn process(
    notification: RawNotification,
    state: &mut MonitorState,
    gesture: &StopGesture,
    session: &mut RecordingSession,
) -> Option<Event> {
    if *state != MonitorState::Recording || !session.is_active() {
        return None;
    }

    let event = match notification {
        RawNotification::Mouse(m) if m.action == MouseAction::LeftDown => {
            Event::mouse_click(m.x, m.y)
        }
        RawNotification::Mouse(_) => return None,
        RawNotification::Keyboard(k) => {
            if gesture.matches(&k) {
                on_stop_gesture(&k, state, session);
                return None;
            }
            Event::key_transition(k.code, k.is_down)
        }
    };

    debug!(%event, "captured");
    session.record(event);
    Some(event)
}

fn on_stop_gesture(key: &KeyNotification, state: &mut MonitorState, session: &RecordingSession) {
    debug!(code = key.code, "stop gesture");
    session.deactivate();
    *state = MonitorState::Stopped;
    info!(events = session.log().len(), "stop gesture observed");
}
