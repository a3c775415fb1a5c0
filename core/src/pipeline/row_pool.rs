use crate::prelude::PipelineError;
use crate::records::TrackRow;

/// Simple scoped pool of row vectors so stages reuse allocations.
pub struct RowPool {
    buffers: Vec<Vec<TrackRow>>,
    max_capacity: usize,
}

impl RowPool {
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            buffers: Vec::with_capacity(max_capacity),
            max_capacity,
        }
    }

    /// Takes a buffer from the pool or creates one if there is room.
    pub fn checkout(&mut self, capacity: usize) -> Result<Vec<TrackRow>, PipelineError> {
        if let Some(mut buffer) = self.buffers.pop() {
            buffer.clear();
            buffer.reserve(capacity);
            Ok(buffer)
        } else if self.buffers.len() < self.max_capacity {
            Ok(Vec::with_capacity(capacity))
        } else {
            Err(PipelineError::PoolExhaustion("pool depleted".to_string()))
        }
    }

    /// Returns a buffer back to the pool for reuse.
    pub fn release(&mut self, mut buffer: Vec<TrackRow>) {
        buffer.clear();
        if self.buffers.len() < self.max_capacity {
            self.buffers.push(buffer);
        }
    }

    pub fn reset(&mut self) {
        self.buffers.clear();
    }
}
