//! Tunables of the route planner

use serde::Deserialize;

use crate::Error;

/// Default share of an edge cost added when its destination is fully occupied
pub const DEFAULT_CONGESTION_PENALTY: f64 = 0.5;
/// Default walking speed in distance units per hour
pub const DEFAULT_WALKING_SPEED: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Edge cost multiplier is `1 + ratio * congestion_penalty`
    pub congestion_penalty: f64,
    /// Used to derive the estimated walking time of a route
    pub walking_speed: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            congestion_penalty: DEFAULT_CONGESTION_PENALTY,
            walking_speed: DEFAULT_WALKING_SPEED,
        }
    }
}

impl RoutingConfig {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a negative or non-finite penalty
    /// and for a walking speed that is not strictly positive.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.congestion_penalty.is_finite() || self.congestion_penalty < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "congestion_penalty must be finite and non-negative, got {}",
                self.congestion_penalty
            )));
        }
        if !self.walking_speed.is_finite() || self.walking_speed <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "walking_speed must be finite and positive, got {}",
                self.walking_speed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = RoutingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.congestion_penalty, 0.5);
        assert_eq!(config.walking_speed, 5.0);
    }

    #[test]
    fn rejects_negative_penalty() {
        let config = RoutingConfig {
            congestion_penalty: -0.1,
            ..RoutingConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_walking_speed() {
        let config = RoutingConfig {
            walking_speed: 0.0,
            ..RoutingConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RoutingConfig = serde_json::from_str(r#"{"congestion_penalty": 1.0}"#).unwrap();
        assert_eq!(config.congestion_penalty, 1.0);
        assert_eq!(config.walking_speed, DEFAULT_WALKING_SPEED);
    }
}
