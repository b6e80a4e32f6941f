use std::collections::VecDeque;

/// Which tracked hand a reading belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// Bounded history of recent vertical positions per hand
///
/// Retains the last N readings for each hand in arrival order, evicting
/// the oldest first. Absent readings (hand not visible in a frame) are
/// skipped rather than padded, so the buffers only ever hold real
/// positions. Aggregation over the buffer (latest value, mean) is left to
/// the caller's smoothing policy.
pub struct PositionHistory {
    left: VecDeque<f32>,
    right: VecDeque<f32>,
    capacity: usize,
}

impl PositionHistory {
    /// Create a history retaining up to `capacity` readings per hand
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            left: VecDeque::with_capacity(capacity),
            right: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame's readings, skipping absent hands
    pub fn record(&mut self, left_y: Option<f32>, right_y: Option<f32>) {
        if let Some(y) = left_y {
            Self::push_bounded(&mut self.left, y, self.capacity);
        }
        if let Some(y) = right_y {
            Self::push_bounded(&mut self.right, y, self.capacity);
        }
    }

    fn push_bounded(buffer: &mut VecDeque<f32>, value: f32, capacity: usize) {
        if buffer.len() == capacity {
            buffer.pop_front();
        }
        buffer.push_back(value);
    }

    /// Most recent retained reading for a hand, if any
    pub fn latest(&self, hand: Hand) -> Option<f32> {
        self.buffer(hand).back().copied()
    }

    /// Mean of the retained readings for a hand, if any
    pub fn mean(&self, hand: Hand) -> Option<f32> {
        let buffer = self.buffer(hand);
        if buffer.is_empty() {
            return None;
        }
        Some(buffer.iter().sum::<f32>() / buffer.len() as f32)
    }

    /// Number of retained readings for a hand
    pub fn len(&self, hand: Hand) -> usize {
        self.buffer(hand).len()
    }

    /// Drop all retained readings
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    fn buffer(&self, hand: Hand) -> &VecDeque<f32> {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }
}
