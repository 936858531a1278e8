pub mod bump;
pub mod motors;
pub mod status_led;
