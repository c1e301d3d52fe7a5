use crate::error::ThresholdError;
use log::{debug, warn};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

pub const MIN_THRESHOLD: f32 = 0.01;
pub const MAX_THRESHOLD: f32 = 0.2;

pub fn validate_threshold(value: f32) -> Result<f32, ThresholdError> {
    if value.is_nan() {
        return Err(ThresholdError::NotANumber);
    }
    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
        return Err(ThresholdError::OutOfRange {
            value,
            min: MIN_THRESHOLD,
            max: MAX_THRESHOLD,
        });
    }
    Ok(value)
}

/// Closed/open cutoff shared between the frame path and whoever adjusts it.
/// The f32 is stored as its bit pattern so a read never sees half a write.
#[derive(Debug, Clone)]
pub struct ThresholdHandle(Arc<AtomicU32>);

impl ThresholdHandle {
    pub fn new(value: f32) -> Result<Self, ThresholdError> {
        let value = validate_threshold(value)?;
        Ok(ThresholdHandle(Arc::new(AtomicU32::new(value.to_bits()))))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replaces the threshold and returns the previous one. A rejected value
    /// leaves the current threshold in effect.
    pub fn set(&self, value: f32) -> Result<f32, ThresholdError> {
        match validate_threshold(value) {
            Ok(value) => {
                let previous = f32::from_bits(self.0.swap(value.to_bits(), Ordering::AcqRel));
                debug!("Threshold {} -> {}", previous, value);
                Ok(previous)
            }
            Err(e) => {
                warn!("Threshold rejected: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ThresholdError;
    use crate::threshold::{validate_threshold, ThresholdHandle, MAX_THRESHOLD};
    use std::thread;

    #[test]
    fn test_bounds() {
        assert!(validate_threshold(MAX_THRESHOLD).is_ok());
        assert!(validate_threshold(0.01).is_ok());
        assert!(validate_threshold(0.0).is_err());
        assert!(validate_threshold(0.25).is_err());
        assert!(validate_threshold(-0.1).is_err());
        assert_eq!(validate_threshold(f32::NAN), Err(ThresholdError::NotANumber));
        assert!(validate_threshold(f32::INFINITY).is_err());
    }

    #[test]
    fn test_rejected_keeps_previous() {
        let handle = ThresholdHandle::new(0.05).unwrap();
        assert_eq!(handle.set(0.2), Ok(0.05));
        assert_eq!(handle.get(), 0.2);

        assert!(handle.set(0.0).is_err());
        assert!(handle.set(0.25).is_err());
        assert_eq!(handle.get(), 0.2);
    }

    #[test]
    fn test_shared_between_threads() {
        let handle = ThresholdHandle::new(0.02).unwrap();
        let writer = handle.clone();
        thread::spawn(move || writer.set(0.08).unwrap()).join().unwrap();
        assert_eq!(handle.get(), 0.08);
    }
}
