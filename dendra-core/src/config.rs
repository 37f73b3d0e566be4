//! # Configuration - Layout and Compartment Defaults
//!
//! Parameters used when a morphology is built from scratch and when
//! `compute_xyz` synthesizes coordinates for it.

use serde::{Deserialize, Serialize};

use crate::error::{DendraError, DendraResult};

/// Master configuration for dendra
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DendraConfig {
    /// Default layout settings
    pub layout: LayoutConfig,

    /// Defaults for new compartments
    pub compartment: CompartmentDefaults,
}

/// Controls how `compute_xyz` fans child branches out of their parent
///
/// Children of one parent are spread along y. The spread shrinks
/// linearly from `max_y_multiplier` at the root level to
/// `min_y_multiplier` at the deepest level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Y spread between first and last child at level 0
    pub max_y_multiplier: f64,

    /// Y spread between first and last child at the deepest level
    pub min_y_multiplier: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_y_multiplier: 5.0,
            min_y_multiplier: 0.5,
        }
    }
}

impl LayoutConfig {
    /// Spread multiplier for each level `0..=max_level`
    pub fn multipliers(&self, max_level: usize) -> Vec<f64> {
        if max_level == 0 {
            return vec![self.max_y_multiplier];
        }
        let step = (self.min_y_multiplier - self.max_y_multiplier) / max_level as f64;
        (0..=max_level)
            .map(|l| self.max_y_multiplier + step * l as f64)
            .collect()
    }
}

/// Compartment defaults (micrometers)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompartmentDefaults {
    /// Length of one compartment
    pub length: f64,

    /// Radius of one compartment
    pub radius: f64,
}

impl Default for CompartmentDefaults {
    fn default() -> Self {
        Self {
            length: 10.0,
            radius: 1.0,
        }
    }
}

impl DendraConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &str) -> DendraResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &str) -> DendraResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would produce degenerate geometry
    pub fn validate(&self) -> DendraResult<()> {
        let c = &self.compartment;
        if !(c.length.is_finite() && c.length > 0.0) {
            return Err(DendraError::Config(format!(
                "compartment length must be positive, got {}",
                c.length
            )));
        }
        if !(c.radius.is_finite() && c.radius > 0.0) {
            return Err(DendraError::Config(format!(
                "compartment radius must be positive, got {}",
                c.radius
            )));
        }
        let l = &self.layout;
        if !l.max_y_multiplier.is_finite() || !l.min_y_multiplier.is_finite() {
            return Err(DendraError::Config("layout multipliers must be finite".into()));
        }
        Ok(())
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - DENDRA_MAX_Y_MULTIPLIER (default: 5.0)
    /// - DENDRA_MIN_Y_MULTIPLIER (default: 0.5)
    /// - DENDRA_COMPARTMENT_LENGTH (default: 10.0)
    /// - DENDRA_COMPARTMENT_RADIUS (default: 1.0)
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_f64("DENDRA_MAX_Y_MULTIPLIER") {
            config.layout.max_y_multiplier = v;
        }
        if let Some(v) = env_f64("DENDRA_MIN_Y_MULTIPLIER") {
            config.layout.min_y_multiplier = v;
        }
        if let Some(v) = env_f64("DENDRA_COMPARTMENT_LENGTH") {
            config.compartment.length = v;
        }
        if let Some(v) = env_f64("DENDRA_COMPARTMENT_RADIUS") {
            config.compartment.radius = v;
        }

        config
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_span_levels() {
        let layout = LayoutConfig::default();
        let m = layout.multipliers(2);
        assert_eq!(m, vec![5.0, 2.75, 0.5]);
        assert_eq!(layout.multipliers(0), vec![5.0]);
    }

    #[test]
    fn test_validate_rejects_bad_compartment() {
        let mut config = DendraConfig::default();
        assert!(config.validate().is_ok());

        config.compartment.length = 0.0;
        assert!(matches!(config.validate(), Err(DendraError::Config(_))));
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("DENDRA_MAX_Y_MULTIPLIER", "2.5");
        std::env::set_var("DENDRA_COMPARTMENT_LENGTH", "4");
        std::env::set_var("DENDRA_COMPARTMENT_RADIUS", "wide"); // Ignored
        let config = DendraConfig::from_env();
        std::env::remove_var("DENDRA_MAX_Y_MULTIPLIER");
        std::env::remove_var("DENDRA_COMPARTMENT_LENGTH");
        std::env::remove_var("DENDRA_COMPARTMENT_RADIUS");

        assert_eq!(config.layout.max_y_multiplier, 2.5);
        assert_eq!(config.layout.min_y_multiplier, 0.5);
        assert_eq!(config.compartment.length, 4.0);
        assert_eq!(config.compartment.radius, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut config = DendraConfig::default();
        config.layout.max_y_multiplier = 3.0;

        let path = std::env::temp_dir().join(format!("dendra-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap().to_string();
        config.save(&path).unwrap();
        let loaded = DendraConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }
}
