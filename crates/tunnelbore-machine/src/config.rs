//! Per-machine configuration.

use serde::{Deserialize, Serialize};
use tunnelbore_core::{Error, Result};

/// Tunnel bore configuration.
///
/// Passed to every machine at construction; nothing here is shared between
/// instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoreConfig {
    /// Energy spent per voxel cleared.
    pub cost_per_voxel: f32,
    /// Last bore distance that is excavated before the machine finishes.
    pub max_bore_distance: i32,
    /// Size of the energy reservoir.
    pub energy_capacity: f32,
    /// Advertised delivery rate for upstream suppliers.
    pub max_delivery_rate: f32,
    /// Fill fraction below which the machine asks for more power.
    pub wants_power_ratio: f32,
    /// Boring ticks between two excavation passes.
    pub sleep_ticks: u32,
}

impl Default for BoreConfig {
    fn default() -> Self {
        Self {
            cost_per_voxel: 10.0,
            max_bore_distance: 256,
            energy_capacity: 5000.0,
            max_delivery_rate: 5000.0,
            wants_power_ratio: 0.99,
            sleep_ticks: 4,
        }
    }
}

impl BoreConfig {
    /// Set the energy cost per cleared voxel.
    pub fn with_cost_per_voxel(mut self, cost: f32) -> Self {
        self.cost_per_voxel = cost;
        self
    }

    /// Set the maximum bore distance.
    pub fn with_max_bore_distance(mut self, distance: i32) -> Self {
        self.max_bore_distance = distance;
        self
    }

    /// Set the reservoir capacity.
    pub fn with_energy_capacity(mut self, capacity: f32) -> Self {
        self.energy_capacity = capacity;
        self
    }

    /// Set the number of ticks between excavation passes.
    pub fn with_sleep_ticks(mut self, ticks: u32) -> Self {
        self.sleep_ticks = ticks;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.cost_per_voxel.is_finite() || self.cost_per_voxel <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cost_per_voxel must be positive, got {}",
                self.cost_per_voxel
            )));
        }
        if !self.energy_capacity.is_finite() || self.energy_capacity <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "energy_capacity must be positive, got {}",
                self.energy_capacity
            )));
        }
        if !self.max_delivery_rate.is_finite() || self.max_delivery_rate < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_delivery_rate must not be negative, got {}",
                self.max_delivery_rate
            )));
        }
        if !(self.wants_power_ratio > 0.0 && self.wants_power_ratio <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "wants_power_ratio must be in (0, 1], got {}",
                self.wants_power_ratio
            )));
        }
        if self.max_bore_distance < 1 {
            return Err(Error::InvalidConfig(format!(
                "max_bore_distance must be at least 1, got {}",
                self.max_bore_distance
            )));
        }
        if self.sleep_ticks == 0 {
            return Err(Error::InvalidConfig(
                "sleep_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = BoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sleep_ticks, 4);
        assert!((config.energy_capacity - 5000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_non_positive_cost() {
        let err = BoreConfig::default().with_cost_per_voxel(0.0).validate();
        assert!(matches!(err, Err(Error::InvalidConfig(_))));

        let err = BoreConfig::default().with_cost_per_voxel(f32::NAN).validate();
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_distance_and_sleep() {
        assert!(BoreConfig::default().with_max_bore_distance(0).validate().is_err());
        assert!(BoreConfig::default().with_sleep_ticks(0).validate().is_err());
    }

    #[test]
    fn builders_chain() {
        let config = BoreConfig::default()
            .with_cost_per_voxel(2.5)
            .with_max_bore_distance(5)
            .with_energy_capacity(100.0)
            .with_sleep_ticks(1);
        assert!(config.validate().is_ok());
        assert_eq!(config.max_bore_distance, 5);
        assert_eq!(config.sleep_ticks, 1);
    }
}
