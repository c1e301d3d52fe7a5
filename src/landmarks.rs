use serde_derive::{Deserialize, Serialize};

/// Point in normalized image coordinates, both axes in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }
}

/// All landmarks of one face for one video frame, in the detector's index order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Landmark>) -> Self {
        LandmarkFrame { points }
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

impl From<Vec<(f32, f32)>> for LandmarkFrame {
    fn from(points: Vec<(f32, f32)>) -> Self {
        LandmarkFrame::new(points.into_iter().map(|(x, y)| Landmark::new(x, y)).collect())
    }
}

impl FromIterator<Landmark> for LandmarkFrame {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        LandmarkFrame::new(iter.into_iter().collect())
    }
}
