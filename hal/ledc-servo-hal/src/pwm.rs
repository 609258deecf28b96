//! PWM peripheral abstraction
//!
//! Describes the small slice of a multi-channel PWM controller the servo
//! core needs: channel setup, pin routing and duty updates. Channels are
//! numbered from 1; 0 is never passed to an implementation.

/// Number of hardware PWM channels on the controller
pub const MAX_CHANNELS: usize = 16;

/// Shortest pulse the hardware will ever be asked to produce (µs)
pub const MIN_PULSE_US: u16 = 500;

/// Longest pulse the hardware will ever be asked to produce (µs)
pub const MAX_PULSE_US: u16 = 2500;

/// Default lower pulse bound for a hobby servo (µs)
pub const DEFAULT_MIN_PULSE_US: u16 = 544;

/// Default upper pulse bound for a hobby servo (µs)
pub const DEFAULT_MAX_PULSE_US: u16 = 2400;

/// Pulse width a freshly attached servo starts from (µs)
pub const DEFAULT_PULSE_US: u16 = 1500;

/// Servo refresh period (µs), i.e. 50 Hz
pub const PULSE_PERIOD_US: u32 = 20_000;

/// Servo refresh rate (Hz)
pub const REFRESH_HZ: u32 = 50;

/// Narrowest supported timer resolution (bits)
pub const MIN_TIMER_WIDTH: u8 = 16;

/// Widest supported timer resolution (bits)
pub const MAX_TIMER_WIDTH: u8 = 20;

/// Timer resolution used until changed (bits)
pub const DEFAULT_TIMER_WIDTH: u8 = 16;

/// Multi-channel PWM controller
///
/// Implementations drive the actual timer and GPIO matrix registers.
/// None of these calls may block for longer than a register write, and
/// none of them report errors: the servo layer degrades to no-ops instead.
pub trait PwmPeripheral {
    /// Set up a PWM generator on `channel`
    ///
    /// Calling this again for the same channel reconfigures it in place.
    fn configure_channel(&mut self, channel: u8, frequency_hz: u32, width_bits: u8);

    /// Route the output of `channel` to GPIO `pin`
    fn bind_pin(&mut self, pin: u8, channel: u8);

    /// Disconnect whatever PWM output is routed to `pin`
    fn unbind_pin(&mut self, pin: u8);

    /// Set the high time of `channel` in timer ticks
    ///
    /// Takes effect within one PWM period.
    fn set_duty_ticks(&mut self, channel: u8, ticks: u32);
}

impl<T: PwmPeripheral + ?Sized> PwmPeripheral for &mut T {
    fn configure_channel(&mut self, channel: u8, frequency_hz: u32, width_bits: u8) {
        (**self).configure_channel(channel, frequency_hz, width_bits);
    }

    fn bind_pin(&mut self, pin: u8, channel: u8) {
        (**self).bind_pin(pin, channel);
    }

    fn unbind_pin(&mut self, pin: u8) {
        (**self).unbind_pin(pin);
    }

    fn set_duty_ticks(&mut self, channel: u8, ticks: u32) {
        (**self).set_duty_ticks(channel, ticks);
    }
}
