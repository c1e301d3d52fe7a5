use circular_buffer::CircularBuffer;

pub const HISTORY_SIZE: usize = 30; // ~1 sec of frames at 30 fps

/// Recent average lip gaps for the debug overlay
#[derive(Debug)]
pub struct MeasurementHistory {
    buffer: CircularBuffer<HISTORY_SIZE, f32>,
}

impl Default for MeasurementHistory {
    fn default() -> Self {
        MeasurementHistory {
            buffer: CircularBuffer::new(),
        }
    }
}

impl MeasurementHistory {
    pub fn push(&mut self, average: f32) {
        self.buffer.push_back(average);
    }

    pub fn last(&self) -> Option<f32> {
        self.buffer.back().copied()
    }

    /// Largest gap seen over the buffered frames
    pub fn peak(&self) -> Option<f32> {
        self.buffer.iter().copied().reduce(f32::max)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.buffer.to_vec()
    }
}
