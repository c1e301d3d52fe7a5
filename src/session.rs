use crate::alert::tone_cpal::CpalTone;
use crate::alert::{AlertDriver, ToneSink};
use crate::config::MonitorConfig;
use crate::error::{MonitorError, ThresholdError};
use crate::history::MeasurementHistory;
use crate::landmarks::LandmarkFrame;
use crate::mouth::{classify, Observation};
use crate::status::MonitorStatus;
use crate::threshold::ThresholdHandle;
use crate::tracker::{AlertSignal, MouthTracker};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

const STATUS_CHANNEL_SIZE: usize = 16;
const RUNNING_CHECK_MS: u64 = 100;

/// One monitoring session: classifier, tracker and alert wired together.
/// Frames must be fed strictly one after another.
pub struct MonitorSession {
    config: MonitorConfig,
    threshold: ThresholdHandle,
    tracker: MouthTracker,
    alert: AlertDriver,
    history: MeasurementHistory,
    started: Instant,
    status_sender: broadcast::Sender<MonitorStatus>,
}

impl MonitorSession {
    pub fn new(config: MonitorConfig, sink: Box<dyn ToneSink>) -> Result<Self, MonitorError> {
        config.validate()?;
        let threshold = ThresholdHandle::new(config.closed_threshold).map_err(|e| MonitorError::Config(e.to_string()))?;
        let (status_sender, _) = broadcast::channel(STATUS_CHANNEL_SIZE);
        info!("Monitor session: threshold {}, alert delay {:?}", config.closed_threshold, config.alert_delay());

        Ok(MonitorSession {
            tracker: MouthTracker::new(config.alert_delay()),
            alert: AlertDriver::new(sink, config.tone_frequency_hz, config.tone_volume),
            history: MeasurementHistory::default(),
            started: Instant::now(),
            status_sender,
            threshold,
            config,
        })
    }

    /// Session playing its alert on the default output device
    pub fn with_default_output(config: MonitorConfig) -> Result<Self, MonitorError> {
        let tone = CpalTone::new()?;
        MonitorSession::new(config, Box::new(tone))
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Handle for adjusting the threshold from outside the frame loop
    pub fn threshold_handle(&self) -> ThresholdHandle {
        self.threshold.clone()
    }

    pub fn set_threshold(&self, value: f32) -> Result<f32, ThresholdError> {
        self.threshold.set(value)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitorStatus> {
        self.status_sender.subscribe()
    }

    pub fn tracker(&self) -> &MouthTracker {
        &self.tracker
    }

    pub fn is_alerting(&self) -> bool {
        self.alert.is_playing()
    }

    pub fn history(&self) -> &MeasurementHistory {
        &self.history
    }

    pub fn process_frame(&mut self, face: Option<&LandmarkFrame>) -> MonitorStatus {
        let now = self.started.elapsed();
        self.process_frame_at(face, now)
    }

    /// `now` is the frame time as an offset from the session start
    pub fn process_frame_at(&mut self, face: Option<&LandmarkFrame>, now: Duration) -> MonitorStatus {
        let threshold = self.threshold.get();
        let (observation, measurement) = classify(face, &self.config.lip_landmarks, threshold);

        match measurement {
            Some(m) => self.history.push(m.average()),
            None if observation == Observation::NoFace => self.history.clear(),
            None => {}
        }

        match self.tracker.step(observation, now, self.alert.is_playing()) {
            Some(AlertSignal::Start) => self.alert.start(),
            Some(AlertSignal::Stop) => self.alert.stop(),
            None => {}
        }

        let status = MonitorStatus {
            state_label: self.tracker.state().label(),
            closed_secs: self.tracker.closed_for(now).map(|d| d.as_secs()),
            alerting: self.alert.is_playing(),
            alerting_since: self.alert.alerting_since(),
            threshold,
            measurement,
            recent_peak: self.history.peak(),
        };
        // no subscribers is fine
        let _ = self.status_sender.send(status.clone());
        status
    }

    /// Feeds frames from `frames` until the sender hangs up or `running` is cleared.
    /// `None` entries are frames without a face.
    pub fn run(&mut self, frames: Receiver<Option<LandmarkFrame>>, running: Arc<AtomicBool>) {
        info!("Starting frame loop");
        let mut frame_count: u64 = 0;
        while running.load(Ordering::Relaxed) {
            match frames.recv_timeout(Duration::from_millis(RUNNING_CHECK_MS)) {
                Ok(face) => {
                    self.process_frame(face.as_ref());
                    frame_count += 1;
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Frame source closed");
                    break;
                }
            }
        }
        self.alert.stop();
        info!("Frame loop finished after {} frames", frame_count);
    }

    /// Ends the session, silencing the alert if it is sounding
    pub fn end(mut self) {
        self.alert.stop();
    }
}
