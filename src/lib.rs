use crate::config::MonitorConfig;
use crate::landmarks::LandmarkFrame;
use crate::session::MonitorSession;
use log::{info, warn};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

pub mod alert;
pub mod config;
pub mod error;
pub mod history;
pub mod landmarks;
pub mod mouth;
pub mod session;
pub mod status;
pub mod threshold;
pub mod tracker;

pub use error::{MonitorError, ThresholdError, ToneError};

pub const DEFAULT_CLOSED_THRESHOLD: f32 = 0.02; // average lip gap in normalized image height
pub const DEFAULT_ALERT_DELAY_MS: u64 = 1000; // closed longer than this starts the tone

/// Runs a session on the default output device until the frame source closes.
/// An unusable output device is reported and monitoring never starts.
pub fn monitor_sync(
    config: MonitorConfig,
    frames: Receiver<Option<LandmarkFrame>>,
    running: Arc<AtomicBool>,
) -> Result<(), MonitorError> {
    let mut session = match MonitorSession::with_default_output(config) {
        Ok(session) => session,
        Err(e) => {
            warn!("Monitor init error {}", e);
            return Err(e);
        }
    };
    session.run(frames, running);
    session.end();
    info!("Monitoring ended");
    Ok(())
}
