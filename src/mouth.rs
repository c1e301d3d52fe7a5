use crate::config::LipLandmarks;
use crate::landmarks::LandmarkFrame;
use log::debug;
use serde_derive::{Deserialize, Serialize};

/// Per-frame result fed to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Open,
    Closed,
    NoFace,
}

/// Vertical lip separations of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouthMeasurement {
    pub outer: f32,
    pub inner: f32,
}

impl MouthMeasurement {
    pub fn average(&self) -> f32 {
        (self.outer + self.inner) / 2.0
    }

    /// Strictly above the threshold is open; equal counts as closed.
    pub fn is_open(&self, threshold: f32) -> bool {
        self.average() > threshold
    }
}

fn is_normalized(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Measures outer and inner lip gap, `None` when any lip point is missing
/// or its `y` is not a normalized coordinate.
pub fn measure_mouth(frame: &LandmarkFrame, lips: &LipLandmarks) -> Option<MouthMeasurement> {
    let upper_outer = frame.get(lips.upper_outer)?;
    let upper_inner = frame.get(lips.upper_inner)?;
    let lower_inner = frame.get(lips.lower_inner)?;
    let lower_outer = frame.get(lips.lower_outer)?;

    if ![upper_outer, upper_inner, lower_inner, lower_outer].iter().all(|p| is_normalized(p.y)) {
        return None;
    }

    Some(MouthMeasurement {
        outer: (lower_outer.y - upper_outer.y).abs(),
        inner: (lower_inner.y - upper_inner.y).abs(),
    })
}

pub fn classify(face: Option<&LandmarkFrame>, lips: &LipLandmarks, threshold: f32) -> (Observation, Option<MouthMeasurement>) {
    let frame = match face {
        Some(frame) if !frame.is_empty() => frame,
        _ => return (Observation::NoFace, None),
    };
    match measure_mouth(frame, lips) {
        Some(m) if m.is_open(threshold) => (Observation::Open, Some(m)),
        Some(m) => (Observation::Closed, Some(m)),
        None => {
            debug!("Frame has {} landmarks, lip points up to index {} missing or invalid", frame.len(), lips.max_index());
            (Observation::NoFace, None)
        }
    }
}
