//! Pulse width conversion
//!
//! A servo pulse is `count * tick_length` where
//! `tick_length = PULSE_PERIOD_US / 2^timer_width`. Going from microseconds
//! to ticks and back both divide in `f32` first and then truncate toward
//! zero, never round; duty values must match existing firmware exactly.
//!
//! Angles use integer range mapping (the classic `map(x, in_lo, in_hi,
//! out_lo, out_hi)`), which also truncates.

use ledc_servo_hal::{
    DEFAULT_TIMER_WIDTH, MAX_TIMER_WIDTH, MIN_TIMER_WIDTH, PULSE_PERIOD_US,
};

/// Largest angle a servo accepts (degrees)
pub const MAX_DEGREES: i32 = 180;

/// PWM timer resolution in bits, always within 16..=20
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerWidth(u8);

impl Default for TimerWidth {
    fn default() -> Self {
        Self(DEFAULT_TIMER_WIDTH)
    }
}

impl TimerWidth {
    /// Create a timer width, clamping `bits` into the supported range
    pub const fn new(bits: u8) -> Self {
        if bits < MIN_TIMER_WIDTH {
            Self(MIN_TIMER_WIDTH)
        } else if bits > MAX_TIMER_WIDTH {
            Self(MAX_TIMER_WIDTH)
        } else {
            Self(bits)
        }
    }

    /// Resolution in bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Number of ticks in one PWM period (`2^bits`)
    pub fn resolution_ticks(self) -> f32 {
        (1u32 << self.0) as f32
    }

    /// Length of one tick in microseconds
    pub fn tick_us(self) -> f32 {
        PULSE_PERIOD_US as f32 / self.resolution_ticks()
    }

    /// Convert a pulse width to timer ticks (truncating)
    pub fn us_to_ticks(self, us: u16) -> u32 {
        (f32::from(us) / self.tick_us()) as u32
    }

    /// Convert timer ticks to a pulse width (truncating)
    pub fn ticks_to_us(self, ticks: u32) -> u16 {
        (ticks as f32 * self.tick_us()) as u16
    }

    /// Re-express a tick count taken at this width at width `to`
    ///
    /// Each extra bit doubles the ticks for the same pulse width, so this
    /// is a plain shift and keeps the pulse width in microseconds.
    pub fn rescale_ticks(self, ticks: u32, to: TimerWidth) -> u32 {
        if to.0 >= self.0 {
            ticks << (to.0 - self.0)
        } else {
            ticks >> (self.0 - to.0)
        }
    }
}

/// Integer linear range mapping, truncating toward zero
///
/// Returns `out_min` when the input range is empty.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let span = in_max - in_min;
    if span == 0 {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / span + out_min
}

/// Map an angle onto `[min_us, max_us]`, clamping it to 0..=180 first
pub fn degrees_to_us(degrees: i32, min_us: u16, max_us: u16) -> u16 {
    let degrees = degrees.clamp(0, MAX_DEGREES);
    let us = map_range(
        degrees,
        0,
        MAX_DEGREES,
        i32::from(min_us),
        i32::from(max_us),
    );
    u16::try_from(us).unwrap_or(max_us)
}

/// Map a pulse width back onto 0..=180 degrees (no clamping)
pub fn us_to_degrees(us: i32, min_us: u16, max_us: u16) -> i32 {
    map_range(us, i32::from(min_us), i32::from(max_us), 0, MAX_DEGREES)
}
