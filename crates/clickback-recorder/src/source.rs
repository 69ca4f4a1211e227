//! Raw input notifications and the capability that delivers them

use clickback_core::Result;

/// What happened on the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
    Move,
    Wheel,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseNotification {
    pub action: MouseAction,
    /// Pointer position in screen coordinates when the notification fired
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotification {
    pub code: u16,
    pub is_down: bool,
    /// Modifiers held at the moment of the notification
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawNotification {
    Mouse(MouseNotification),
    Keyboard(KeyNotification),
}

impl RawNotification {
    pub fn mouse(action: MouseAction, x: i32, y: i32) -> Self {
        RawNotification::Mouse(MouseNotification { action, x, y })
    }

    pub fn key(code: u16, is_down: bool, modifiers: Modifiers) -> Self {
        RawNotification::Keyboard(KeyNotification {
            code,
            is_down,
            modifiers,
        })
    }
}

/// Modifier flags packed into a single byte
/// Bit 0: shift, 1: ctrl, 2: alt, 3: win
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: u8 = 1 << 0;
    pub const CTRL: u8 = 1 << 1;
    pub const ALT: u8 = 1 << 2;
    pub const WIN: u8 = 1 << 3;

    pub fn has_shift(&self) -> bool { self.0 & Self::SHIFT != 0 }
    pub fn has_ctrl(&self) -> bool { self.0 & Self::CTRL != 0 }
    pub fn has_alt(&self) -> bool { self.0 & Self::ALT != 0 }
    pub fn has_win(&self) -> bool { self.0 & Self::WIN != 0 }

    /// True when every flag in `required` is also set here
    pub fn contains(&self, required: Modifiers) -> bool {
        self.0 & required.0 == required.0
    }
}

impl std::ops::BitOr<u8> for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: u8) -> Modifiers {
        Modifiers(self.0 | rhs)
    }
}

/// System-wide, non-exclusive subscription to mouse and keyboard activity
///
/// Implementations must hand every notification on to the next observer in
/// the platform chain, whether or not the monitor records it. Delivery is
/// pull-based: notifications that arrived since the last call are handed
/// to `sink` by `pump`, in arrival order, without blocking.
pub trait RawInputSource {
    fn subscribe_mouse(&mut self) -> Result<()>;

    fn subscribe_keyboard(&mut self) -> Result<()>;

    /// Remove both subscriptions. Safe to call repeatedly, and after a
    /// partial subscribe.
    fn unsubscribe(&mut self);

    fn pump(&mut self, sink: &mut dyn FnMut(RawNotification));
}
