//! Recording session state and the controller that drives it
//!
//! Idle -> Recording -> Stopped, then the playback loop. The controller
//! owns the calling thread for the whole run: notifications are drained on
//! it, and replay happens on it.

use crate::config::{PlaybackConfig, RecorderConfig};
use crate::events::{Event, EventLog};
use crate::monitor::InputMonitor;
use crate::replay::{Pacer, ReplayStats, Replayer};
use crate::source::RawInputSource;
use chrono::{DateTime, Utc};
use clickback_core::{Error, InputInjector, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything one record-and-replay run owns
#[derive(Debug, Default)]
pub struct RecordingSession {
    active: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
    replaying: Arc<AtomicBool>,
    log: EventLog,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying.load(Ordering::SeqCst)
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    /// Handle another thread (e.g. a Ctrl+C handler) can use to end recording
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            active: self.active.clone(),
            interrupted: self.interrupted.clone(),
            replaying: self.replaying.clone(),
        }
    }

    pub(crate) fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    pub(crate) fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    fn set_replaying(&self, replaying: bool) {
        self.replaying.store(replaying, Ordering::SeqCst);
    }

    pub(crate) fn record(&mut self, event: Event) {
        self.log.push(event);
    }
}

/// What an interrupt request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// Recording was in progress and has been abandoned
    Stopped,
    /// Playback is running; it always finishes, reset included
    Ignored,
    /// Neither recording nor replaying, the caller may exit
    Idle,
}

#[derive(Debug, Clone)]
pub struct StopHandle {
    active: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
    replaying: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn is_recording(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying.load(Ordering::SeqCst)
    }

    /// Abandon the recording if one is running; the run then ends without playback
    pub fn interrupt(&self) -> InterruptOutcome {
        if self.replaying.load(Ordering::SeqCst) {
            return InterruptOutcome::Ignored;
        }
        if self.active.swap(false, Ordering::SeqCst) {
            self.interrupted.store(true, Ordering::SeqCst);
            return InterruptOutcome::Stopped;
        }
        InterruptOutcome::Idle
    }
}

/// Progress callbacks for the console. Every method defaults to a no-op.
pub trait SessionObserver {
    fn on_recording_started(&mut self) {}
    fn on_event(&mut self, _event: &Event) {}
    fn on_recording_stopped(&mut self, _log: &EventLog) {}
    fn on_playback_started(&mut self, _config: &PlaybackConfig) {}
    fn on_pass(&mut self, _pass: u32) {}
}

impl SessionObserver for () {}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub events_recorded: usize,
    pub clicks_recorded: usize,
    pub keys_recorded: usize,
    pub stats: ReplayStats,
    pub recorded_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct SessionController<S: RawInputSource, P: Pacer> {
    monitor: InputMonitor<S>,
    pacer: P,
    config: RecorderConfig,
}

impl<S: RawInputSource, P: Pacer> SessionController<S, P> {
    pub fn new(source: S, pacer: P, config: RecorderConfig) -> Self {
        Self {
            monitor: InputMonitor::new(source, config.stop_gesture),
            pacer,
            config,
        }
    }

    pub fn monitor(&self) -> &InputMonitor<S> {
        &self.monitor
    }

    /// Record until the stop gesture (or an interrupt) clears `active`
    ///
    /// Listeners are removed on every exit path once installed.
    pub fn record(
        &mut self,
        session: &mut RecordingSession,
        observer: &mut dyn SessionObserver,
    ) -> Result<()> {
        self.monitor.start(session)?;
        observer.on_recording_started();
        self.pacer.wait(self.config.settle_delay);

        while session.is_active() {
            self.monitor.pump(session, &mut |event| observer.on_event(event));
            if !session.is_active() {
                break;
            }
            self.pacer.wait(self.config.poll_interval);
        }

        self.monitor.stop(session);

        if session.was_interrupted() {
            warn!(events = session.log().len(), "recording interrupted");
            return Err(Error::interrupted());
        }

        info!(events = session.log().len(), "recording complete");
        observer.on_recording_stopped(session.log());
        Ok(())
    }

    /// Replay the log `repeat_count` times, strictly one pass after another
    pub fn replay<I: InputInjector + ?Sized>(
        &mut self,
        log: &EventLog,
        playback: &PlaybackConfig,
        injector: &mut I,
        observer: &mut dyn SessionObserver,
    ) -> ReplayStats {
        observer.on_playback_started(playback);
        Replayer::new(*playback).play(log, injector, &mut self.pacer, |pass| observer.on_pass(pass))
    }

    /// Record, ask `configure` for playback settings, then replay
    pub fn run<I, F>(
        &mut self,
        session: &mut RecordingSession,
        injector: &mut I,
        observer: &mut dyn SessionObserver,
        configure: F,
    ) -> Result<SessionReport>
    where
        I: InputInjector + ?Sized,
        F: FnOnce(&EventLog) -> Result<PlaybackConfig>,
    {
        let recorded_at = Utc::now();
        self.record(session, observer)?;

        let log = session.log();
        let playback = configure(log)?;

        session.set_replaying(true);
        let stats = self.replay(log, &playback, injector, observer);
        session.set_replaying(false);

        Ok(SessionReport {
            events_recorded: log.len(),
            clicks_recorded: log.clicks(),
            keys_recorded: log.key_transitions(),
            stats,
            recorded_at,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::MonitorState;
    use crate::source::{MouseAction, RawNotification};
    use crate::testing::{
        key, left_click, stop_gesture, Call, CallLog, FakeInjector, FakePacer, NoWait,
        ScriptedSource,
    };
    use clickback_core::{vk, ErrorCode, MouseButton};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        passes: Vec<u32>,
        stopped_with: Option<usize>,
    }

    impl SessionObserver for Recorder {
        fn on_event(&mut self, event: &Event) {
            self.events.push(*event);
        }

        fn on_recording_stopped(&mut self, log: &EventLog) {
            self.stopped_with = Some(log.len());
        }

        fn on_pass(&mut self, pass: u32) {
            self.passes.push(pass);
        }
    }

    #[test]
    fn waits_across_empty_polls_until_gesture() {
        let source = ScriptedSource::new(vec![
            vec![left_click(1, 1)],
            vec![],
            vec![RawNotification::mouse(MouseAction::Move, 0, 0)],
            vec![key(vk::A, true), key(vk::A, false)],
            vec![],
            vec![stop_gesture()],
        ]);
        let mut controller = SessionController::new(source, NoWait, RecorderConfig::default());
        let mut session = RecordingSession::new();
        let mut observer = Recorder::default();

        controller.record(&mut session, &mut observer).unwrap();

        assert_eq!(controller.monitor().source().pumps, 6);
        assert!(!controller.monitor().source().is_subscribed());
        assert_eq!(controller.monitor().state(), MonitorState::Stopped);
        assert_eq!(session.log().len(), 3);
        assert_eq!(observer.events.as_slice(), session.log().as_slice());
        assert_eq!(observer.stopped_with, Some(3));
    }

    #[test]
    fn polls_with_bounded_sleeps() {
        let calls = CallLog::default();
        let source = ScriptedSource::new(vec![vec![], vec![], vec![stop_gesture()]]);
        let mut controller =
            SessionController::new(source, FakePacer::new(calls.clone()), RecorderConfig::default());
        let mut session = RecordingSession::new();

        controller.record(&mut session, &mut ()).unwrap();

        assert_eq!(
            calls.calls(),
            vec![
                Call::Wait(Duration::from_millis(100)),
                Call::Wait(Duration::from_millis(10)),
                Call::Wait(Duration::from_millis(10)),
            ]
        );
    }

    #[test]
    fn hook_failure_aborts_before_recording() {
        let mut source = ScriptedSource::new(vec![vec![left_click(1, 1)], vec![stop_gesture()]]);
        source.fail_keyboard = true;
        let mut controller = SessionController::new(source, NoWait, RecorderConfig::default());
        let mut session = RecordingSession::new();
        let calls = CallLog::default();
        let mut injector = FakeInjector::new(calls.clone());

        let err = controller
            .run(&mut session, &mut injector, &mut (), |_| Ok(PlaybackConfig::default()))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::HookInstallation);
        assert_eq!(err.code.exit_code(), 1);
        assert!(!controller.monitor().source().is_subscribed());
        assert_eq!(controller.monitor().source().pumps, 0);
        assert!(session.log().is_empty());
        assert!(calls.calls().is_empty());
    }

    #[test]
    fn interrupt_stops_without_playback() {
        let mut session = RecordingSession::new();
        let handle = session.stop_handle();
        let source = ScriptedSource::new(vec![vec![left_click(5, 5)]]);
        let mut controller = SessionController::new(source, NoWait, RecorderConfig::default());

        // Nothing scripted ends the session, so interrupt from the observer
        struct Interrupter(StopHandle);
        impl SessionObserver for Interrupter {
            fn on_event(&mut self, _event: &Event) {
                self.0.interrupt();
            }
        }

        let mut configured = false;
        let err = controller
            .run(
                &mut session,
                &mut FakeInjector::new(CallLog::default()),
                &mut Interrupter(handle),
                |_| {
                    configured = true;
                    Ok(PlaybackConfig::default())
                },
            )
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Interrupted);
        assert!(!configured);
        assert!(!controller.monitor().source().is_subscribed());
    }

    #[test]
    fn interrupt_outside_a_run_is_idle() {
        let session = RecordingSession::new();
        let handle = session.stop_handle();

        assert_eq!(handle.interrupt(), InterruptOutcome::Idle);
        assert!(!session.was_interrupted());
    }

    #[test]
    fn interrupt_during_playback_is_ignored() {
        struct InterruptEachPass {
            handle: StopHandle,
            outcomes: Vec<InterruptOutcome>,
        }
        impl SessionObserver for InterruptEachPass {
            fn on_playback_started(&mut self, _config: &PlaybackConfig) {
                self.outcomes.push(self.handle.interrupt());
            }
            fn on_pass(&mut self, _pass: u32) {
                self.outcomes.push(self.handle.interrupt());
            }
        }

        let calls = CallLog::default();
        let source = ScriptedSource::new(vec![vec![
            key(vk::CONTROL, true),
            key(vk::ALT, true),
            stop_gesture(),
        ]]);
        let mut controller = SessionController::new(source, NoWait, RecorderConfig::default());
        let mut session = RecordingSession::new();
        let mut observer = InterruptEachPass {
            handle: session.stop_handle(),
            outcomes: Vec::new(),
        };

        let report = controller
            .run(&mut session, &mut FakeInjector::new(calls.clone()), &mut observer, |_| {
                PlaybackConfig::new(2, 1, 1)
            })
            .unwrap();

        assert_eq!(report.stats.passes, 2);
        assert_eq!(observer.outcomes, vec![InterruptOutcome::Ignored; 3]);
        assert_eq!(report.stats.keys_released, 4);
        assert_eq!(
            calls.calls().iter().filter(|c| **c == Call::Key(vk::CONTROL, false)).count(),
            2
        );
        assert!(!session.was_interrupted());
        assert!(!session.is_replaying());
        assert_eq!(observer.handle.interrupt(), InterruptOutcome::Idle);
    }

    #[test]
    fn configuration_error_skips_playback() {
        let source = ScriptedSource::new(vec![vec![left_click(1, 2), stop_gesture()]]);
        let mut controller = SessionController::new(source, NoWait, RecorderConfig::default());
        let mut session = RecordingSession::new();
        let calls = CallLog::default();

        let err = controller
            .run(&mut session, &mut FakeInjector::new(calls.clone()), &mut (), |_| {
                PlaybackConfig::new(0, 1000, 500)
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidConfiguration);
        assert!(calls.calls().is_empty());
    }

    #[test]
    fn full_run_scenario() {
        let calls = CallLog::default();
        let source = ScriptedSource::new(vec![
            vec![left_click(100, 200)],
            vec![key(vk::A, true), key(vk::A, false)],
            vec![stop_gesture()],
        ]);
        let mut controller = SessionController::new(
            source,
            FakePacer::new(calls.clone()),
            RecorderConfig::default(),
        );
        let mut session = RecordingSession::new();
        let mut injector = FakeInjector::new(calls.clone());
        let mut observer = Recorder::default();

        let report = controller
            .run(&mut session, &mut injector, &mut observer, |log| {
                assert_eq!(log.len(), 3);
                calls.clear();
                PlaybackConfig::new(2, 1000, 500)
            })
            .unwrap();

        let ms = |n| Call::Wait(Duration::from_millis(n));
        let one_pass = [
            Call::Click(100, 200),
            ms(1000),
            Call::Key(vk::A, true),
            ms(500),
            Call::Key(vk::A, false),
            ms(500),
            Call::Release(MouseButton::Left),
            Call::Release(MouseButton::Right),
            Call::Release(MouseButton::Middle),
        ];
        let expected: Vec<Call> = one_pass.iter().chain(one_pass.iter()).copied().collect();
        assert_eq!(calls.calls(), expected);

        assert_eq!(report.events_recorded, 3);
        assert_eq!(report.clicks_recorded, 1);
        assert_eq!(report.keys_recorded, 2);
        assert_eq!(report.stats.passes, 2);
        assert_eq!(report.stats.injections(), 6);
        assert!(report.finished_at >= report.recorded_at);
        assert_eq!(observer.passes, vec![1, 2]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["buttons_released"], 6);
        assert!(json["recorded_at"].is_string());
    }
}
