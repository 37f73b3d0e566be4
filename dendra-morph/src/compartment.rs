//! Compartment - the atomic simulation unit.
//!
//! A compartment has no geometry of its own; its length and radius feed
//! the branch it belongs to.

use dendra_core::CompartmentDefaults;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    /// Cable length (um)
    pub length: f64,

    /// Cable radius (um)
    pub radius: f64,
}

impl Compartment {
    pub fn new() -> Self {
        Self::from_defaults(&CompartmentDefaults::default())
    }

    pub fn from_defaults(defaults: &CompartmentDefaults) -> Self {
        Self {
            length: defaults.length,
            radius: defaults.radius,
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl Default for Compartment {
    fn default() -> Self {
        Self::new()
    }
}
