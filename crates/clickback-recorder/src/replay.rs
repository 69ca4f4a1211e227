//! Event log replay through an input injector

use crate::config::PlaybackConfig;
use crate::events::{Event, EventLog};
use crate::reset::reset_input_state;
use clickback_core::InputInjector;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Blocks the replay thread between injected events
pub trait Pacer {
    fn wait(&mut self, delay: Duration);
}

/// Real time, via `std::thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

impl<T: Pacer + ?Sized> Pacer for &mut T {
    fn wait(&mut self, delay: Duration) {
        (**self).wait(delay)
    }
}

/// Replay recorded events
pub struct Replayer {
    config: PlaybackConfig,
}

impl Replayer {
    pub fn new(config: PlaybackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replay the whole log `repeat_count` times, resetting input state
    /// after every pass. `on_pass` is told each pass number as it completes.
    pub fn play<I, P>(
        &self,
        log: &EventLog,
        injector: &mut I,
        pacer: &mut P,
        mut on_pass: impl FnMut(u32),
    ) -> ReplayStats
    where
        I: InputInjector + ?Sized,
        P: Pacer + ?Sized,
    {
        let mut stats = ReplayStats::default();

        for pass in 1..=self.config.repeat_count {
            self.play_once(log, injector, pacer, &mut stats);

            let reset = reset_input_state(injector);
            stats.keys_released += reset.keys_released;
            stats.buttons_released += reset.buttons_released;
            stats.passes += 1;

            info!(pass, of = self.config.repeat_count, "replay pass complete");
            on_pass(pass);
        }

        stats
    }

    /// One traversal of the log, in recorded order, no reset
    pub fn play_once<I, P>(&self, log: &EventLog, injector: &mut I, pacer: &mut P, stats: &mut ReplayStats)
    where
        I: InputInjector + ?Sized,
        P: Pacer + ?Sized,
    {
        for event in log {
            match *event {
                Event::MouseClick { x, y } => {
                    injector.click_at(x, y);
                    stats.clicks += 1;
                    pacer.wait(self.config.click_delay);
                }
                Event::KeyTransition { code, is_down } => {
                    injector.key(code, is_down);
                    stats.keys += 1;
                    pacer.wait(self.config.key_delay);
                }
            }
            debug!(%event, "replayed");
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub passes: u32,
    pub clicks: usize,
    pub keys: usize,
    pub keys_released: usize,
    pub buttons_released: usize,
}

impl ReplayStats {
    /// Injections made for recorded events, resets excluded
    pub fn injections(&self) -> usize {
        self.clicks + self.keys
    }
}
