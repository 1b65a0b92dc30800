//! CSS selectors targeted by datastar patches.

pub const PANEL: &str = "[data-role=\"panel\"]";
pub const TOAST_STACK: &str = "[data-toast=\"stack\"]";
pub const SUBSCRIBE_TOGGLE: &str = "[data-role=\"subscribe-toggle\"]";
