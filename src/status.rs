use crate::mouth::MouthMeasurement;
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

/// Read-only snapshot handed to whatever displays the monitor
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorStatus {
    pub state_label: &'static str,
    /// Whole seconds closed, only while closed
    pub closed_secs: Option<u64>,
    pub alerting: bool,
    pub alerting_since: Option<DateTime<Utc>>,
    pub threshold: f32,
    pub measurement: Option<MouthMeasurement>,
    pub recent_peak: Option<f32>,
}

impl MonitorStatus {
    pub fn face_detected(&self) -> bool {
        self.measurement.is_some()
    }
}

impl Display for MonitorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.state_label)?;
        if let Some(secs) = self.closed_secs {
            write!(f, " {}s", secs)?;
        }
        if self.alerting {
            write!(f, " ALERT")?;
        }
        match self.measurement {
            Some(m) => write!(f, " | gap {:.3} / threshold {:.3}", m.average(), self.threshold),
            None => write!(f, " | no face / threshold {:.3}", self.threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mouth::MouthMeasurement;
    use crate::status::MonitorStatus;

    #[test]
    fn test_display() {
        let mut status = MonitorStatus {
            state_label: "CLOSED",
            closed_secs: Some(2),
            alerting: true,
            alerting_since: None,
            threshold: 0.02,
            measurement: Some(MouthMeasurement { outer: 0.01, inner: 0.0 }),
            recent_peak: Some(0.01),
        };
        assert_eq!(status.to_string(), "CLOSED 2s ALERT | gap 0.005 / threshold 0.020");
        assert!(status.face_detected());

        status.measurement = None;
        status.closed_secs = None;
        status.alerting = false;
        status.state_label = "OPEN";
        assert_eq!(status.to_string(), "OPEN | no face / threshold 0.020");
    }
}
