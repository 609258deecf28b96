//! Shared test double for the PWM peripheral
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use ledc_servo_core::ChannelPool;
use ledc_servo_hal::{PwmPeripheral, MAX_CHANNELS};

pub type TestPool = ChannelPool<NoopRawMutex, MAX_CHANNELS>;

/// One call made into the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmCall {
    Configure {
        channel: u8,
        frequency_hz: u32,
        width_bits: u8,
    },
    Bind {
        pin: u8,
        channel: u8,
    },
    Unbind {
        pin: u8,
    },
    Duty {
        channel: u8,
        ticks: u32,
    },
}

/// Peripheral that records every call; clones share one log
#[derive(Debug, Clone, Default)]
pub struct RecordingPwm {
    calls: Rc<RefCell<Vec<PwmCall>>>,
}

impl RecordingPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PwmCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn last_duty(&self, channel: u8) -> Option<u32> {
        self.calls.borrow().iter().rev().find_map(|call| match *call {
            PwmCall::Duty { channel: ch, ticks } if ch == channel => Some(ticks),
            _ => None,
        })
    }
}

impl PwmPeripheral for RecordingPwm {
    fn configure_channel(&mut self, channel: u8, frequency_hz: u32, width_bits: u8) {
        self.calls.borrow_mut().push(PwmCall::Configure {
            channel,
            frequency_hz,
            width_bits,
        });
    }

    fn bind_pin(&mut self, pin: u8, channel: u8) {
        self.calls.borrow_mut().push(PwmCall::Bind { pin, channel });
    }

    fn unbind_pin(&mut self, pin: u8) {
        self.calls.borrow_mut().push(PwmCall::Unbind { pin });
    }

    fn set_duty_ticks(&mut self, channel: u8, ticks: u32) {
        self.calls.borrow_mut().push(PwmCall::Duty { channel, ticks });
    }
}
