//! Fixed-size channel pool
//!
//! Allocation policy:
//! 1. The lowest-numbered reclaimable slot is reused first.
//! 2. Otherwise the slot after the high-water mark is taken.
//! 3. Otherwise the pool is exhausted and no channel is handed out.
//!
//! Slots move `Free -> InUse` exactly once and then only alternate between
//! `InUse` and `Reclaimable`, so channel numbering stays deterministic.
//!
//! All mutation happens inside a blocking mutex. Use `NoopRawMutex` when the
//! pool is only touched from one execution context and
//! `CriticalSectionRawMutex` when interrupts, cores or threads share it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use ledc_servo_hal::MAX_CHANNELS;

use super::{Channel, SlotState};

/// Pool of `N` hardware PWM channels shared by every servo on a controller
pub struct ChannelPool<M: RawMutex, const N: usize = MAX_CHANNELS> {
    inner: Mutex<M, RefCell<PoolState<N>>>,
}

struct PoolState<const N: usize> {
    slots: [SlotState; N],
    /// Number of slots ever handed out; slot `high_water_mark` is the next fresh one
    high_water_mark: usize,
}

impl<const N: usize> PoolState<N> {
    fn allocate(&mut self) -> Option<Channel> {
        if let Some((index, slot)) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| **slot == SlotState::Reclaimable)
        {
            *slot = SlotState::InUse;
            return Channel::from_index(index);
        }

        let index = self.high_water_mark;
        let slot = self.slots.get_mut(index)?;
        *slot = SlotState::InUse;
        self.high_water_mark += 1;
        Channel::from_index(index)
    }

    fn transition(&mut self, channel: Channel, from: SlotState, to: SlotState) -> bool {
        match self.slots.get_mut(channel.index()) {
            Some(slot) if *slot == from => {
                *slot = to;
                true
            }
            _ => false,
        }
    }
}

impl<M: RawMutex, const N: usize> ChannelPool<M, N> {
    const CAPACITY_FITS_U8: () = assert!(N <= u8::MAX as usize, "channel numbers are u8");

    /// Create an empty pool
    pub const fn new() -> Self {
        let () = Self::CAPACITY_FITS_U8;
        Self {
            inner: Mutex::new(RefCell::new(PoolState {
                slots: [SlotState::Free; N],
                high_water_mark: 0,
            })),
        }
    }

    /// Hand out a channel, or `None` when every slot is in use
    pub fn allocate(&self) -> Option<Channel> {
        let channel = self.inner.lock(|state| state.borrow_mut().allocate());

        #[cfg(feature = "defmt")]
        {
            match channel {
                Some(ch) => defmt::debug!("channel {} allocated", ch.get()),
                None => defmt::warn!("channel pool exhausted ({} channels)", N),
            }
        }

        channel
    }

    /// Mark an in-use channel as reclaimable
    ///
    /// Returns false if the channel was not in use.
    pub fn release(&self, channel: Channel) -> bool {
        self.inner.lock(|state| {
            state
                .borrow_mut()
                .transition(channel, SlotState::InUse, SlotState::Reclaimable)
        })
    }

    /// Take a specific reclaimable channel back into use
    ///
    /// Returns false if another owner already reclaimed it.
    pub fn reclaim(&self, channel: Channel) -> bool {
        self.inner.lock(|state| {
            state
                .borrow_mut()
                .transition(channel, SlotState::Reclaimable, SlotState::InUse)
        })
    }

    /// Current state of a slot, `None` if the channel is outside the pool
    pub fn state(&self, channel: Channel) -> Option<SlotState> {
        self.inner
            .lock(|state| state.borrow().slots.get(channel.index()).copied())
    }

    /// Highest channel number ever handed out (0 if none)
    pub fn high_water_mark(&self) -> u8 {
        self.inner
            .lock(|state| u8::try_from(state.borrow().high_water_mark).unwrap_or(u8::MAX))
    }

    /// Number of slots currently in use
    pub fn in_use_count(&self) -> usize {
        self.inner.lock(|state| {
            state
                .borrow()
                .slots
                .iter()
                .filter(|slot| **slot == SlotState::InUse)
                .count()
        })
    }

    /// Total number of channels managed by the pool
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M: RawMutex, const N: usize> Default for ChannelPool<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn ch(n: u8) -> Channel {
        Channel::new(n).unwrap()
    }

    #[test]
    fn test_sequential_allocation() {
        let pool: ChannelPool<NoopRawMutex, 4> = ChannelPool::new();

        for expected in 1..=4 {
            assert_eq!(pool.allocate(), Some(ch(expected)));
        }
        assert_eq!(pool.high_water_mark(), 4);
        assert_eq!(pool.in_use_count(), 4);
    }

    #[test]
    fn test_exhaustion() {
        let pool: ChannelPool<NoopRawMutex, 2> = ChannelPool::new();
        pool.allocate();
        pool.allocate();

        assert_eq!(pool.allocate(), None);
        assert_eq!(pool.high_water_mark(), 2);
    }

    #[test]
    fn test_lowest_reclaimable_wins() {
        let pool: ChannelPool<NoopRawMutex, 4> = ChannelPool::new();
        for _ in 0..4 {
            pool.allocate();
        }

        // Release out of order; reuse must still be by channel number
        assert!(pool.release(ch(3)));
        assert!(pool.release(ch(2)));

        assert_eq!(pool.allocate(), Some(ch(2)));
        assert_eq!(pool.allocate(), Some(ch(3)));
        assert_eq!(pool.allocate(), None);
    }

    #[test]
    fn test_reclaimable_preferred_over_fresh() {
        let pool: ChannelPool<NoopRawMutex, 4> = ChannelPool::new();
        pool.allocate();
        pool.allocate();
        pool.release(ch(1));

        assert_eq!(pool.allocate(), Some(ch(1)));
        assert_eq!(pool.high_water_mark(), 2);
    }

    #[test]
    fn test_slot_states() {
        let pool: ChannelPool<NoopRawMutex, 2> = ChannelPool::new();
        assert_eq!(pool.state(ch(1)), Some(SlotState::Free));

        pool.allocate();
        assert_eq!(pool.state(ch(1)), Some(SlotState::InUse));

        pool.release(ch(1));
        assert_eq!(pool.state(ch(1)), Some(SlotState::Reclaimable));

        assert_eq!(pool.state(ch(3)), None);
    }

    #[test]
    fn test_release_requires_in_use() {
        let pool: ChannelPool<NoopRawMutex, 2> = ChannelPool::new();

        // Never allocated: stays Free
        assert!(!pool.release(ch(1)));
        assert_eq!(pool.state(ch(1)), Some(SlotState::Free));

        pool.allocate();
        assert!(pool.release(ch(1)));
        assert!(!pool.release(ch(1)));
    }

    #[test]
    fn test_reclaim_specific_channel() {
        let pool: ChannelPool<NoopRawMutex, 2> = ChannelPool::new();
        pool.allocate();
        pool.release(ch(1));

        assert!(pool.reclaim(ch(1)));
        assert_eq!(pool.state(ch(1)), Some(SlotState::InUse));
        assert!(!pool.reclaim(ch(1)));
    }
}
