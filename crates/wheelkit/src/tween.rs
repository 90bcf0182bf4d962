use std::time::Duration;

/// Exponential ease-in-out over progress in [0, 1].
pub fn expo_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        t
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TweenState {
    Running,
    Finished,
    Killed,
}

/// Interpolates a single value over a fixed duration, stepped by the caller's
/// frame clock.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    ease: fn(f64) -> f64,
    state: TweenState,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration, ease: fn(f64) -> f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            ease,
            state: TweenState::Running,
        }
    }

    /// Steps the tween forward by `dt` and returns the new value. A killed or
    /// finished tween keeps returning its last value.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        if self.state == TweenState::Running {
            self.elapsed = (self.elapsed + dt).min(self.duration);
            if self.elapsed >= self.duration {
                self.state = TweenState::Finished;
            }
        }
        self.value()
    }

    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * (self.ease)(self.progress())
    }

    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return if self.is_active() { 0.0 } else { 1.0 };
        }
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.state == TweenState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    pub fn kill(&mut self) {
        if self.state == TweenState::Running {
            self.state = TweenState::Killed;
        }
    }
}
