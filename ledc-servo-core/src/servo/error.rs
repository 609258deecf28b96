//! Servo errors

use core::fmt;

/// Reasons an attach can fail
///
/// Nothing else in the servo API fails: out-of-range values are clamped and
/// operations on a detached servo are silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError {
    /// The servo never got a channel from the pool, or lost it and could not get another
    NoChannel,
    /// Pin is not in the recommended servo pin set (`enforce-pins` feature)
    PinNotAllowed,
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServoError::NoChannel => f.write_str("no PWM channel available"),
            ServoError::PinNotAllowed => f.write_str("pin not allowed for servo output"),
        }
    }
}
