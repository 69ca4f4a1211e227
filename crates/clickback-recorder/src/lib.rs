//! clickback-recorder - Global input capture and timed replay
//!
//! Records left clicks and keystrokes system-wide until the stop gesture,
//! then replays them a configured number of times with fixed delays.
//!
//! ## Platform Support
//!
//! - **Windows**: Full support via low-level hooks and SendInput
//! - **Other**: Session logic only, driven by any `RawInputSource`

pub mod config;
pub mod events;
pub mod monitor;
pub mod platform;
pub mod replay;
pub mod reset;
pub mod session;
pub mod source;

#[cfg(test)]
mod testing;

pub use config::{PlaybackConfig, RecorderConfig, StopGesture};
pub use events::{Event, EventLog};
pub use monitor::{InputMonitor, MonitorState};
pub use replay::{Pacer, ReplayStats, Replayer, ThreadPacer};
pub use reset::{reset_input_state, ResetReport};
pub use session::{
    InterruptOutcome, RecordingSession, SessionController, SessionObserver, SessionReport,
    StopHandle,
};
pub use source::{Modifiers, RawInputSource, RawNotification};

#[cfg(target_os = "windows")]
pub use platform::current::HookSource;

pub mod prelude {
    pub use crate::config::{PlaybackConfig, RecorderConfig, StopGesture};
    pub use crate::events::{Event, EventLog};
    pub use crate::replay::{Pacer, ReplayStats, ThreadPacer};
    pub use crate::session::{
        InterruptOutcome, RecordingSession, SessionController, SessionObserver, SessionReport,
        StopHandle,
    };

    #[cfg(target_os = "windows")]
    pub use crate::platform::current::HookSource;
}
