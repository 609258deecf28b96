//! Configuration type definitions

use ledc_servo_hal::{DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US, DEFAULT_TIMER_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pulse::TimerWidth;

/// Servo wiring and pulse configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// GPIO pin carrying the servo signal
    pub pin: u8,
    /// Pulse width at 0° (µs), raised to at least 500 on attach
    pub min_us: u16,
    /// Pulse width at 180° (µs), lowered to at most 2500 on attach
    pub max_us: u16,
    /// PWM timer resolution (bits), clamped to 16..=20
    pub timer_width_bits: u8,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            pin: 0,
            min_us: DEFAULT_MIN_PULSE_US,
            max_us: DEFAULT_MAX_PULSE_US,
            timer_width_bits: DEFAULT_TIMER_WIDTH,
        }
    }
}

impl ServoConfig {
    /// Default pulse bounds on the given pin
    pub const fn on_pin(pin: u8) -> Self {
        Self {
            pin,
            min_us: DEFAULT_MIN_PULSE_US,
            max_us: DEFAULT_MAX_PULSE_US,
            timer_width_bits: DEFAULT_TIMER_WIDTH,
        }
    }

    /// Timer width after clamping
    pub fn timer_width(&self) -> TimerWidth {
        TimerWidth::new(self.timer_width_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServoConfig::default();
        assert_eq!(config.min_us, 544);
        assert_eq!(config.max_us, 2400);
        assert_eq!(config.timer_width().bits(), 16);
        assert_eq!(ServoConfig::on_pin(13).pin, 13);
    }

    #[test]
    fn test_timer_width_clamped() {
        let config = ServoConfig {
            timer_width_bits: 24,
            ..ServoConfig::default()
        };
        assert_eq!(config.timer_width().bits(), 20);
    }
}
