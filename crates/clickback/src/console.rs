//! Human-facing console output

use std::io::Write;
use std::time::Duration;

use clickback_recorder::{Event, EventLog, Pacer, PlaybackConfig, SessionObserver, StopGesture};

const BANNER: &str = r#"
       ___ _ _      _    _                _
      / __| (_) ___| | _| |__   __ _  ___| | __
     | |  | | |/ __| |/ / '_ \ / _` |/ __| |/ /
     | |__| | | (__|   <| |_) | (_| | (__|   <
      \___|_|_|\___|_|\_\_.__/ \__,_|\___|_|\_\
"#;

/// Prints progress while recording and replaying
pub struct Console<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn banner(&mut self) {
        self.emit(BANNER);
        self.emit("\n");
    }

    /// Welcome text, then one dot per second for `seconds`
    pub fn countdown<P: Pacer + ?Sized>(&mut self, seconds: u32, gesture: &StopGesture, pacer: &mut P) {
        self.emit(&format!(
            "Welcome to clickback!\n\
             Whenever you are ready, the program will record your left mouse clicks as well as keyboard events.\n\n\
             Press {} at the same time to stop recording.",
            gesture
        ));
        for _ in 0..seconds {
            pacer.wait(Duration::from_secs(1));
            self.emit(".");
        }
        self.emit("\n\n");
    }

    pub fn summary(&mut self, passes: u32, events: usize) {
        self.emit(&format!("\nDone! Replayed {} events {} time(s).\n", events, passes));
    }

    fn emit(&mut self, text: &str) {
        let written = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            tracing::debug!("console write failed: {}", e);
        }
    }
}

impl<W: Write> SessionObserver for Console<W> {
    fn on_recording_started(&mut self) {
        self.emit("\n Listening for mouse clicks and key presses...\n");
    }

    fn on_event(&mut self, event: &Event) {
        if !self.quiet {
            self.emit(&format!("{}\n", event));
        }
    }

    fn on_recording_stopped(&mut self, log: &EventLog) {
        self.emit(&format!(
            "Completed recording. {} clicks, {} key events.\n\n",
            log.clicks(),
            log.key_transitions()
        ));
    }

    fn on_playback_started(&mut self, _config: &PlaybackConfig) {
        self.emit("\nPlaying back");
    }

    fn on_pass(&mut self, _pass: u32) {
        if !self.quiet {
            self.emit(".");
        }
    }
}
