//! ledc-servo Hardware Abstraction Layer
//!
//! This crate defines the PWM peripheral trait that chip-specific drivers
//! implement, plus the electrical constants shared by every servo on the
//! bus. The servo core only ever talks to hardware through [`PwmPeripheral`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledc-servo-core (pool, pulse math)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledc-servo-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  LED PWM      │       │  test double  │
//! │  controller   │       │  (host)       │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;

pub use pwm::{
    PwmPeripheral, DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US, DEFAULT_PULSE_US,
    DEFAULT_TIMER_WIDTH, MAX_CHANNELS, MAX_PULSE_US, MAX_TIMER_WIDTH, MIN_PULSE_US,
    MIN_TIMER_WIDTH, PULSE_PERIOD_US, REFRESH_HZ,
};
