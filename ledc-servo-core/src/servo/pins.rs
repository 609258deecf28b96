//! Servo output pin policy
//!
//! Any output-capable GPIO can carry a servo signal, but some are strapping
//! pins, flash pins or input-only. With the `enforce-pins` feature enabled,
//! attach only accepts the pins listed here.

/// GPIOs recommended for servo output
pub const RECOMMENDED_PINS: [u8; 18] = [
    2, 4, 12, 13, 14, 15, 16, 17, 18, 19, 21, 22, 23, 25, 26, 27, 32, 33,
];

/// Check whether `pin` is in the recommended set
pub fn is_recommended(pin: u8) -> bool {
    RECOMMENDED_PINS.contains(&pin)
}

/// Check whether attach may use `pin` under the current feature set
pub(crate) fn is_allowed(pin: u8) -> bool {
    !cfg!(feature = "enforce-pins") || is_recommended(pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_pins() {
        for pin in [2, 4, 12, 19, 21, 23, 25, 27, 32, 33] {
            assert!(is_recommended(pin), "pin {pin}");
        }
        for pin in [0, 1, 3, 5, 11, 20, 24, 28, 34, 39] {
            assert!(!is_recommended(pin), "pin {pin}");
        }
    }

    #[cfg(not(feature = "enforce-pins"))]
    #[test]
    fn test_any_pin_allowed_without_enforcement() {
        assert!(is_allowed(0));
        assert!(is_allowed(39));
    }

    #[cfg(feature = "enforce-pins")]
    #[test]
    fn test_only_recommended_allowed_with_enforcement() {
        assert!(is_allowed(13));
        assert!(!is_allowed(0));
        assert!(!is_allowed(34));
    }
}
