//! Servo lifecycle
//!
//! A [`Servo`] claims a channel from a [`ChannelPool`] when it is created,
//! binds that channel to a pin on [`Servo::attach`], and pushes duty values
//! through the [`PwmPeripheral`] on every write.
//!
//! # Usage
//!
//! ```ignore
//! static POOL: ChannelPool<CriticalSectionRawMutex> = ChannelPool::new();
//!
//! let mut servo = Servo::new(&POOL, ledc);
//! servo.attach(13)?;
//! servo.write(90);    // degrees
//! servo.write(1500);  // microseconds
//! servo.detach();     // channel becomes reusable
//! ```

pub mod error;
pub mod pins;

pub use error::ServoError;

use embassy_sync::blocking_mutex::raw::RawMutex;
use ledc_servo_hal::{
    PwmPeripheral, DEFAULT_MAX_PULSE_US, DEFAULT_MIN_PULSE_US, DEFAULT_PULSE_US, MAX_CHANNELS,
    MAX_PULSE_US, MIN_PULSE_US, REFRESH_HZ,
};

use crate::channel::{Channel, ChannelPool, SlotState};
use crate::config::ServoConfig;
use crate::pulse::{self, TimerWidth};

/// A hobby servo driven by one PWM channel
///
/// A servo that found the pool exhausted has no channel. Every operation on
/// it is a no-op, reads return 0 and attach fails with
/// [`ServoError::NoChannel`].
///
/// Dropping a servo does **not** return its channel to the pool; only
/// [`detach`](Self::detach) does. Detach before letting a servo go if its
/// channel should be reused.
pub struct Servo<'a, P, M, const N: usize = MAX_CHANNELS>
where
    P: PwmPeripheral,
    M: RawMutex,
{
    pool: &'a ChannelPool<M, N>,
    pwm: P,
    channel: Option<Channel>,
    /// False once detach handed the slot back to the pool
    holds_slot: bool,
    pin: Option<u8>,
    /// Last duty value, kept across detach and timer width changes
    ticks: u32,
    width: TimerWidth,
    min_us: u16,
    max_us: u16,
}

impl<'a, P, M, const N: usize> Servo<'a, P, M, N>
where
    P: PwmPeripheral,
    M: RawMutex,
{
    /// Create a servo and claim a channel for it
    pub fn new(pool: &'a ChannelPool<M, N>, pwm: P) -> Self {
        let channel = pool.allocate();
        let width = TimerWidth::default();
        Self {
            pool,
            pwm,
            channel,
            holds_slot: channel.is_some(),
            pin: None,
            ticks: width.us_to_ticks(DEFAULT_PULSE_US),
            width,
            min_us: DEFAULT_MIN_PULSE_US,
            max_us: DEFAULT_MAX_PULSE_US,
        }
    }

    /// Channel owned by this servo, `None` if the pool was exhausted
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    /// Pin the servo is bound to
    pub fn pin(&self) -> Option<u8> {
        self.pin
    }

    /// Attach to `pin` with the default 544–2400 µs pulse range
    pub fn attach(&mut self, pin: u8) -> Result<(), ServoError> {
        self.attach_with_bounds(pin, DEFAULT_MIN_PULSE_US, DEFAULT_MAX_PULSE_US)
    }

    /// Attach using a stored configuration
    ///
    /// The timer width is applied after attaching, since attaching from the
    /// detached state resets it to the default.
    pub fn attach_with_config(&mut self, config: &ServoConfig) -> Result<(), ServoError> {
        self.attach_with_bounds(config.pin, config.min_us, config.max_us)?;
        if config.timer_width() != self.width {
            self.set_timer_width(config.timer_width_bits);
        }
        Ok(())
    }

    /// Attach to `pin` with a custom pulse range
    ///
    /// `min_us` is raised to at least 500 µs and `max_us` lowered to at most
    /// 2500 µs (and never below `min_us`). Coming from the detached state,
    /// the pulse resets to 1500 µs and the timer width to 16 bits. Calling
    /// this while attached moves the output to `pin` and keeps the pulse.
    pub fn attach_with_bounds(
        &mut self,
        pin: u8,
        min_us: u16,
        max_us: u16,
    ) -> Result<(), ServoError> {
        let Some(mut channel) = self.channel else {
            return Err(ServoError::NoChannel);
        };

        if !pins::is_allowed(pin) {
            #[cfg(feature = "defmt")]
            defmt::warn!("servo attach rejected: pin {} not allowed", pin);
            return Err(ServoError::PinNotAllowed);
        }

        match self.pin {
            None => {
                if !self.holds_slot {
                    // Our old slot may have gone to another servo since detach
                    if !self.pool.reclaim(channel) {
                        let Some(fresh) = self.pool.allocate() else {
                            self.channel = None;
                            return Err(ServoError::NoChannel);
                        };
                        channel = fresh;
                        self.channel = Some(fresh);
                    }
                    self.holds_slot = true;
                }
                self.width = TimerWidth::default();
                self.ticks = self.width.us_to_ticks(DEFAULT_PULSE_US);
            }
            Some(old) if old != pin => self.pwm.unbind_pin(old),
            Some(_) => {}
        }

        self.pin = Some(pin);
        self.min_us = min_us.clamp(MIN_PULSE_US, MAX_PULSE_US);
        self.max_us = max_us.clamp(self.min_us, MAX_PULSE_US);

        self.pwm
            .configure_channel(channel.get(), REFRESH_HZ, self.width.bits());
        self.pwm.bind_pin(pin, channel.get());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "servo attached: channel {} pin {} range {}..{} us",
            channel.get(),
            pin,
            self.min_us,
            self.max_us
        );

        Ok(())
    }

    /// Unbind the pin and hand the channel back to the pool
    ///
    /// The pulse width and timer width are kept. Does nothing if no pin is
    /// bound.
    pub fn detach(&mut self) {
        let Some(pin) = self.pin.take() else {
            return;
        };

        self.pwm.unbind_pin(pin);
        if let Some(channel) = self.channel {
            if self.holds_slot {
                self.pool.release(channel);
            }
        }
        self.holds_slot = false;

        #[cfg(feature = "defmt")]
        defmt::debug!("servo detached from pin {}", pin);
    }

    /// Whether this servo currently owns an in-use channel
    ///
    /// A freshly created servo counts as attached before any pin is bound,
    /// because construction already took its slot into use.
    pub fn attached(&self) -> bool {
        match self.channel {
            Some(channel) => {
                self.holds_slot && self.pool.state(channel) == Some(SlotState::InUse)
            }
            None => false,
        }
    }

    /// Move to an angle **or** a pulse width
    ///
    /// **Legacy overload:** values below 500 are degrees (clamped to
    /// 0..=180 and mapped onto the pulse range); values of 500 and above are
    /// microseconds. `write(180)` and `write(2400)` therefore land on the
    /// same pulse with the default range, while `write(499)` means 180°.
    pub fn write(&mut self, value: i32) {
        if value < i32::from(MIN_PULSE_US) {
            let us = pulse::degrees_to_us(value, self.min_us, self.max_us);
            self.write_microseconds(i32::from(us));
        } else {
            self.write_microseconds(value);
        }
    }

    /// Set the pulse width in microseconds, clamped to the pulse range
    pub fn write_microseconds(&mut self, us: i32) {
        let Some(channel) = self.channel else {
            return;
        };
        if !self.attached() {
            return;
        }

        let us = us.clamp(i32::from(self.min_us), i32::from(self.max_us));
        let us = u16::try_from(us).unwrap_or(self.max_us);
        self.ticks = self.width.us_to_ticks(us);
        self.pwm.set_duty_ticks(channel.get(), self.ticks);
    }

    /// Current position in degrees, 0 when not attached
    ///
    /// One microsecond is added before mapping back so the truncation in
    /// the tick conversion does not read one degree low.
    pub fn read(&self) -> i32 {
        if !self.attached() {
            return 0;
        }
        let us = i32::from(self.read_microseconds()) + 1;
        pulse::us_to_degrees(us, self.min_us, self.max_us)
    }

    /// Current pulse width in microseconds, 0 when not attached
    pub fn read_microseconds(&self) -> u16 {
        if !self.attached() {
            return 0;
        }
        self.width.ticks_to_us(self.ticks)
    }

    /// Change the PWM timer resolution (clamped to 16..=20 bits)
    ///
    /// The stored duty is rescaled so the pulse width in microseconds stays
    /// the same. An attached servo has its channel reconfigured in place and
    /// keeps its pin.
    pub fn set_timer_width(&mut self, bits: u8) {
        let Some(channel) = self.channel else {
            return;
        };

        let width = TimerWidth::new(bits);
        self.ticks = self.width.rescale_ticks(self.ticks, width);
        self.width = width;

        if !self.attached() {
            return;
        }
        if let Some(pin) = self.pin {
            self.pwm.unbind_pin(pin);
            self.pwm
                .configure_channel(channel.get(), REFRESH_HZ, width.bits());
            self.pwm.bind_pin(pin, channel.get());
            self.pwm.set_duty_ticks(channel.get(), self.ticks);
        }
    }

    /// Current PWM timer resolution in bits
    pub fn timer_width(&self) -> u8 {
        self.width.bits()
    }

    /// Stored duty value in timer ticks
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Pulse width at 0° (µs)
    pub fn min_us(&self) -> u16 {
        self.min_us
    }

    /// Pulse width at 180° (µs)
    pub fn max_us(&self) -> u16 {
        self.max_us
    }
}
