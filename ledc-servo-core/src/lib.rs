//! Board-agnostic core logic for hobby servo control
//!
//! This crate contains everything between "move to 90°" and a duty value
//! in timer ticks, without touching hardware registers:
//!
//! - Channel pool with lowest-index reuse of released channels
//! - Angle / microsecond / tick conversion at 16–20 bit resolution
//! - Servo lifecycle (attach, write, read, detach, timer width changes)
//! - Configuration and pin policy
//!
//! Hardware access goes through [`ledc_servo_hal::PwmPeripheral`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod channel;
pub mod config;
pub mod pulse;
pub mod servo;

pub use channel::{Channel, ChannelPool, SlotState};
pub use config::ServoConfig;
pub use servo::{Servo, ServoError};
