//! Hardware channel bookkeeping
//!
//! Servos do not pick their PWM channel; they ask a [`ChannelPool`] for one
//! when constructed and hand it back on detach.

pub mod pool;

pub use pool::ChannelPool;

/// A hardware PWM channel number (1-based)
///
/// Channel 0 is reserved to mean "no channel" and can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    /// Create a channel from its number, rejecting 0
    pub const fn new(number: u8) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Channel number as seen by the PWM peripheral
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index in the pool
    pub(crate) const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index.checked_add(1)?).ok().and_then(Self::new)
    }
}

/// State of one slot in the channel pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotState {
    /// Never handed out
    #[default]
    Free,
    /// Owned by a live, attached (or not yet attached) servo
    InUse,
    /// Released by a detach, available for reuse
    Reclaimable,
}
