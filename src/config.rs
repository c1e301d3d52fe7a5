use crate::error::MonitorError;
use crate::threshold::validate_threshold;
use crate::{DEFAULT_ALERT_DELAY_MS, DEFAULT_CLOSED_THRESHOLD};
use serde_derive::{Deserialize, Serialize};
use std::time::Duration;

/// Landmark indices of the four lip points used for the mouth measurement
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub struct LipLandmarks {
    pub upper_outer: usize,
    pub upper_inner: usize,
    pub lower_inner: usize,
    pub lower_outer: usize,
}

impl LipLandmarks {
    pub fn max_index(&self) -> usize {
        self.upper_outer
            .max(self.upper_inner)
            .max(self.lower_inner)
            .max(self.lower_outer)
    }
}

impl Default for LipLandmarks {
    fn default() -> Self {
        LipLandmarks {
            upper_outer: 12,
            upper_inner: 13,
            lower_inner: 14,
            lower_outer: 15,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitorConfig {
    pub closed_threshold: f32,
    pub alert_delay_ms: u64,
    pub tone_frequency_hz: f32,
    pub tone_volume: f32,
    pub lip_landmarks: LipLandmarks,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            closed_threshold: DEFAULT_CLOSED_THRESHOLD,
            alert_delay_ms: DEFAULT_ALERT_DELAY_MS,
            tone_frequency_hz: 440.0, // A4
            tone_volume: 0.1,
            lip_landmarks: LipLandmarks::default(),
        }
    }
}

impl MonitorConfig {
    pub fn alert_delay(&self) -> Duration {
        Duration::from_millis(self.alert_delay_ms)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        validate_threshold(self.closed_threshold).map_err(|e| MonitorError::Config(e.to_string()))?;
        if !(0.0..=1.0).contains(&self.tone_volume) {
            return Err(MonitorError::Config(format!("tone volume {} outside 0..=1", self.tone_volume)));
        }
        if !self.tone_frequency_hz.is_finite() || self.tone_frequency_hz <= 0.0 {
            return Err(MonitorError::Config(format!("tone frequency {} must be positive", self.tone_frequency_hz)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{LipLandmarks, MonitorConfig};
    use std::time::Duration;

    #[test]
    fn test_default_is_valid() {
        let config = MonitorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alert_delay(), Duration::from_millis(1000));
        assert_eq!(config.lip_landmarks.max_index(), 15);
    }

    #[test]
    fn test_invalid_values() {
        let config = MonitorConfig { closed_threshold: 0.3, ..Default::default() };
        assert!(config.validate().is_err());

        let config = MonitorConfig { tone_volume: 1.5, ..Default::default() };
        assert!(config.validate().is_err());

        let config = MonitorConfig { tone_frequency_hz: 0.0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_lips() {
        let lips = LipLandmarks { upper_outer: 0, upper_inner: 13, lower_inner: 14, lower_outer: 17 };
        assert_eq!(lips.max_index(), 17);
    }
}
