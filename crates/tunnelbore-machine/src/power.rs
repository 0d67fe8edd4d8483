//! Bounded energy reservoir and the power consumer capability.

/// Host capability for anything that accepts power from the network.
pub trait PowerConsumer {
    /// Total energy the consumer can hold.
    fn max_power(&self) -> f32;

    /// Energy that can still be accepted.
    fn remaining_power_capacity(&self) -> f32;

    /// Largest single delivery suppliers should attempt.
    fn maximum_delivery_rate(&self) -> f32;

    /// Offer `amount`. Returns false, storing nothing, if it does not fit.
    fn deliver_power(&mut self, amount: f32) -> bool;

    /// Whether suppliers should keep delivering.
    fn wants_power(&self) -> bool;
}

/// Energy store with all-or-nothing deposits and withdrawals.
///
/// `0 <= current <= capacity` holds after every operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyReservoir {
    current: f32,
    capacity: f32,
    wants_ratio: f32,
}

impl EnergyReservoir {
    /// Create an empty reservoir.
    pub fn new(capacity: f32, wants_ratio: f32) -> Self {
        Self {
            current: 0.0,
            capacity,
            wants_ratio,
        }
    }

    /// Stored energy.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum storable energy.
    #[inline]
    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    /// `capacity - current`.
    #[inline]
    pub fn remaining_capacity(&self) -> f32 {
        self.capacity - self.current
    }

    /// Add `amount` if the result stays within capacity.
    pub fn deliver(&mut self, amount: f32) -> bool {
        if !amount.is_finite() || amount < 0.0 || self.current + amount > self.capacity {
            return false;
        }
        self.current += amount;
        true
    }

    /// Remove `amount` if the result stays non-negative.
    pub fn consume(&mut self, amount: f32) -> bool {
        if !amount.is_finite() || amount < 0.0 || self.current - amount < 0.0 {
            return false;
        }
        self.current -= amount;
        true
    }

    /// True while the fill fraction is below the configured ratio.
    #[inline]
    pub fn wants_more(&self) -> bool {
        self.current / self.capacity < self.wants_ratio
    }
}
