//! Platform capture sources
//!
//! Provides the native `RawInputSource` where one exists.

#[cfg(target_os = "windows")]
pub mod windows;

// Re-export the current platform
#[cfg(target_os = "windows")]
pub use self::windows as current;
