use crate::mouth::Observation;
use log::debug;
use std::time::Duration;

pub const STATE_OPEN: &str = "OPEN";
pub const STATE_CLOSED: &str = "CLOSED";

/// What the tracker asks of the alert driver after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSignal {
    Start,
    Stop,
}

/// `closed_since` is set exactly while a closed period is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouthState {
    pub is_open: bool,
    pub closed_since: Option<Duration>,
}

impl Default for MouthState {
    fn default() -> Self {
        MouthState {
            is_open: true,
            closed_since: None,
        }
    }
}

impl MouthState {
    pub fn label(&self) -> &'static str {
        if self.is_open {
            STATE_OPEN
        } else {
            STATE_CLOSED
        }
    }
}

/// Two-state OPEN/CLOSED machine gating the alert on how long the mouth stays closed.
/// Timestamps are offsets from the session start and must not go backwards.
#[derive(Debug, Clone)]
pub struct MouthTracker {
    state: MouthState,
    alert_delay: Duration,
}

impl MouthTracker {
    pub fn new(alert_delay: Duration) -> Self {
        MouthTracker {
            state: MouthState::default(),
            alert_delay,
        }
    }

    pub fn state(&self) -> &MouthState {
        &self.state
    }

    pub fn alert_delay(&self) -> Duration {
        self.alert_delay
    }

    pub fn closed_for(&self, now: Duration) -> Option<Duration> {
        self.state.closed_since.map(|since| now.saturating_sub(since))
    }

    pub fn step(&mut self, observation: Observation, now: Duration, alert_playing: bool) -> Option<AlertSignal> {
        match (observation, self.state.is_open) {
            (Observation::NoFace, _) => {
                if !self.state.is_open {
                    debug!("No face, resetting to {}", STATE_OPEN);
                }
                self.state = MouthState::default();
                Some(AlertSignal::Stop)
            }
            (Observation::Closed, true) => {
                debug!("{} -> {} at {:?}", STATE_OPEN, STATE_CLOSED, now);
                self.state = MouthState {
                    is_open: false,
                    closed_since: Some(now),
                };
                None
            }
            (Observation::Closed, false) => match self.closed_for(now) {
                Some(elapsed) if elapsed >= self.alert_delay && !alert_playing => {
                    debug!("Closed for {:?}, alert delay {:?} reached", elapsed, self.alert_delay);
                    Some(AlertSignal::Start)
                }
                _ => None,
            },
            (Observation::Open, false) => {
                debug!("{} -> {} at {:?}", STATE_CLOSED, STATE_OPEN, now);
                self.state = MouthState::default();
                Some(AlertSignal::Stop)
            }
            (Observation::Open, true) => None,
        }
    }
}
