use crate::error::ToneError;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

pub mod tone_config;
pub mod tone_cpal;

/// Audio primitive able to play one continuous tone
pub trait ToneSink {
    fn start(&mut self, frequency_hz: f32, volume: f32) -> Result<(), ToneError>;

    fn stop(&mut self) -> Result<(), ToneError>;
}

/// Owns the alert state. Start and stop are idempotent and never fail outward:
/// a sink error is logged and the driver falls back to stopped.
pub struct AlertDriver {
    sink: Box<dyn ToneSink>,
    frequency_hz: f32,
    volume: f32,
    playing: bool,
    alerting_since: Option<DateTime<Utc>>,
    start_failures: u32,
}

impl AlertDriver {
    pub fn new(sink: Box<dyn ToneSink>, frequency_hz: f32, volume: f32) -> Self {
        AlertDriver {
            sink,
            frequency_hz,
            volume,
            playing: false,
            alerting_since: None,
            start_failures: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Wall-clock time the current tone started, for the alerting indicator
    pub fn alerting_since(&self) -> Option<DateTime<Utc>> {
        self.alerting_since
    }

    /// Failed starts since the last successful start or explicit stop
    pub fn start_failures(&self) -> u32 {
        self.start_failures
    }

    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        match self.sink.start(self.frequency_hz, self.volume) {
            Ok(()) => {
                self.playing = true;
                self.alerting_since = Some(Utc::now());
                self.start_failures = 0;
                info!("Alert started, {} Hz", self.frequency_hz);
            }
            Err(e) => {
                // retried on every closed frame, only the first one is loud
                if self.start_failures == 0 {
                    error!("Unable to start alert tone: {}", e);
                } else {
                    debug!("Alert tone retry {} failed: {}", self.start_failures, e);
                }
                self.start_failures = self.start_failures.saturating_add(1);
                // a half-started sink must not keep sounding
                if let Err(e) = self.sink.stop() {
                    warn!("Cleanup after failed start: {}", e);
                }
                self.playing = false;
                self.alerting_since = None;
            }
        }
    }

    pub fn stop(&mut self) {
        self.start_failures = 0;
        if !self.playing {
            return;
        }
        if let Err(e) = self.sink.stop() {
            warn!("Unable to stop alert tone cleanly: {}", e);
        }
        self.playing = false;
        self.alerting_since = None;
        info!("Alert stopped");
    }
}

impl Drop for AlertDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::alert::{AlertDriver, ToneSink};
    use crate::error::ToneError;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    pub(crate) struct SinkLog {
        pub starts: u32,
        pub stops: u32,
        pub sounding: bool,
        pub fail_start: bool,
        pub fail_stop: bool,
    }

    /// Records calls into a shared log the test keeps a handle to
    pub(crate) struct RecordingSink(pub Arc<Mutex<SinkLog>>);

    impl RecordingSink {
        pub(crate) fn new() -> (Self, Arc<Mutex<SinkLog>>) {
            let log = Arc::new(Mutex::new(SinkLog::default()));
            (RecordingSink(log.clone()), log)
        }
    }

    impl ToneSink for RecordingSink {
        fn start(&mut self, _frequency_hz: f32, _volume: f32) -> Result<(), ToneError> {
            let mut log = self.0.lock().unwrap();
            log.starts += 1;
            if log.fail_start {
                return Err(ToneError::Start("device gone".to_string()));
            }
            log.sounding = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), ToneError> {
            let mut log = self.0.lock().unwrap();
            log.stops += 1;
            log.sounding = false;
            if log.fail_stop {
                return Err(ToneError::Stop("device gone".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let (sink, log) = RecordingSink::new();
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        driver.start();
        driver.start();
        assert!(driver.is_playing());
        assert!(driver.alerting_since().is_some());
        assert_eq!(log.lock().unwrap().starts, 1);
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let (sink, log) = RecordingSink::new();
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        driver.stop();
        assert_eq!(log.lock().unwrap().stops, 0);

        driver.start();
        driver.stop();
        driver.stop();
        assert!(!driver.is_playing());
        assert_eq!(log.lock().unwrap().stops, 1);
    }

    #[test]
    fn test_start_failure_leaves_stopped() {
        let (sink, log) = RecordingSink::new();
        log.lock().unwrap().fail_start = true;
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        driver.start();
        assert!(!driver.is_playing());
        assert!(driver.alerting_since().is_none());
        assert!(!log.lock().unwrap().sounding);

        log.lock().unwrap().fail_start = false;
        driver.start();
        assert!(driver.is_playing());
    }

    #[test]
    fn test_repeated_start_failures_counted() {
        let (sink, log) = RecordingSink::new();
        log.lock().unwrap().fail_start = true;
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        for _ in 0..3 {
            driver.start();
        }
        assert_eq!(driver.start_failures(), 3);
        assert_eq!(log.lock().unwrap().starts, 3);

        // mouth opened, next closed period logs loudly again
        driver.stop();
        assert_eq!(driver.start_failures(), 0);

        driver.start();
        log.lock().unwrap().fail_start = false;
        driver.start();
        assert!(driver.is_playing());
        assert_eq!(driver.start_failures(), 0);
    }

    #[test]
    fn test_stop_failure_still_stopped() {
        let (sink, log) = RecordingSink::new();
        log.lock().unwrap().fail_stop = true;
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        driver.start();
        driver.stop();
        assert!(!driver.is_playing());
    }

    #[test]
    fn test_drop_releases_tone() {
        let (sink, log) = RecordingSink::new();
        let mut driver = AlertDriver::new(Box::new(sink), 440.0, 0.1);
        driver.start();
        drop(driver);
        assert!(!log.lock().unwrap().sounding);
        assert_eq!(log.lock().unwrap().stops, 1);
    }
}
