//! Time management utilities

use std::time::{Duration, Instant};

/// Snapshot of frame timing handed to every update and draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time since the previous frame
    pub elapsed: Duration,
    /// Time since the timer started
    pub total: Duration,
}

impl FrameTime {
    /// Create a frame time from explicit values
    pub const fn new(elapsed: Duration, total: Duration) -> Self {
        Self { elapsed, total }
    }

    /// Elapsed time in seconds
    pub fn delta_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: Duration,
    total_time: Duration,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: Duration::ZERO,
            total_time: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance the timer (should be called once per frame)
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        self.advance(now.duration_since(self.last_frame));
        self.last_frame = now;
        self.frame_time()
    }

    /// Advance by a fixed step, for deterministic loops and tests
    pub fn advance(&mut self, step: Duration) -> FrameTime {
        self.delta_time = step;
        self.total_time += step;
        self.frame_count += 1;
        self.frame_time()
    }

    /// Timing of the most recent frame
    pub const fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.delta_time, self.total_time)
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        let total = self.total_time.as_secs_f32();
        if total > 0.0 {
            self.frame_count as f32 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_step_accumulates() {
        let mut timer = Timer::new();
        timer.advance(Duration::from_millis(500));
        let time = timer.advance(Duration::from_millis(500));

        assert_eq!(time.elapsed, Duration::from_millis(500));
        assert_eq!(time.total, Duration::from_secs(1));
        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.average_fps(), 2.0);
    }
}
