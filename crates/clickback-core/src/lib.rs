//! clickback-core - errors and input injection primitives
//!
//! ## Platform Support
//!
//! - **Windows**: SendInput injection, GetAsyncKeyState queries
//! - **Other**: the `InputInjector` trait and error types only

pub mod error;
pub mod input;
pub mod platform;

pub use error::{Error, ErrorCode, Result};
pub use input::{vk, InputInjector, MouseButton, KEY_CODES};

#[cfg(target_os = "windows")]
pub use platform::current::SendInputInjector;

pub mod prelude {
    pub use crate::error::{Error, ErrorCode, Result};
    pub use crate::input::{vk, InputInjector, MouseButton};

    #[cfg(target_os = "windows")]
    pub use crate::platform::current::SendInputInjector;
}
