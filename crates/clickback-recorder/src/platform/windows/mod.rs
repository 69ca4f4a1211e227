//! Windows capture via low-level hooks

mod hooks;

pub use hooks::HookSource;
