use std::time::Duration;

/// Turns absolute frame-clock timestamps (microseconds) into per-frame steps.
#[derive(Debug, Default)]
pub struct FrameClock {
    last: Option<i64>,
}

impl FrameClock {
    /// Longer gaps (window hidden, main loop stalled) are clamped so the wheel
    /// does not jump ahead when frames resume.
    pub const MAX_STEP: Duration = Duration::from_millis(250);

    pub fn step(&mut self, frame_time: i64) -> Duration {
        let dt = self
            .last
            .map(|last| Duration::from_micros(frame_time.saturating_sub(last).max(0) as u64))
            .unwrap_or(Duration::ZERO);
        self.last = Some(frame_time);
        dt.min(Self::MAX_STEP)
    }
}
