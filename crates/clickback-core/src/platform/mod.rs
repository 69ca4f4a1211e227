//! Platform layer
//!
//! Only Windows has a native implementation. Everything above this module
//! is platform-neutral and talks to it through `InputInjector`.

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use self::windows as current;
