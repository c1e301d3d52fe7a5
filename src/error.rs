use thiserror::Error;

/// Failures that keep monitoring from starting
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("No output device available")]
    NoOutputDevice,

    #[error("Output device not usable: {0}")]
    Device(String),

    #[error("Unsupported sample format {0}")]
    UnsupportedFormat(String),

    #[error("Audio stream failed: {0}")]
    Stream(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("Threshold must be a number")]
    NotANumber,

    #[error("Threshold {value} outside allowed range {min}..={max}")]
    OutOfRange { value: f32, min: f32, max: f32 },
}

/// Failure of the underlying audio primitive
#[derive(Error, Debug)]
pub enum ToneError {
    #[error("Tone start failed: {0}")]
    Start(String),

    #[error("Tone stop failed: {0}")]
    Stop(String),
}
