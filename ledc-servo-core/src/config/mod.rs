//! Servo configuration
//!
//! Plain data describing how a servo is wired and driven. With the `serde`
//! feature it can be loaded from whatever configuration store the firmware
//! uses.

pub mod types;

pub use types::*;
