use crate::segment::{FULL_TURN, Segment, SegmentNumber, UnknownSegment, normalize_angle};
use crate::sync::{Label, LiveLabel};
use crate::tween::{Tween, expo_in_out};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5500);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    #[strum(to_string = "normal", serialize = "base")]
    Normal,
    #[strum(to_string = "extended", serialize = "live")]
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Idle,
    Rotating,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Loading,
    Ready,
    Destroyed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    #[error(transparent)]
    UnknownSegment(#[from] UnknownSegment),
    #[error(
        "wheel is in rotation animation, wait until it is over or call stop to halt it immediately"
    )]
    RotationInProgress,
    #[error("wheel assets are still loading")]
    NotReady,
    #[error("wheel has been destroyed")]
    Destroyed,
    #[error("live label updates are only available on the extended wheel")]
    NotExtended,
}

#[derive(Debug, Clone, Copy)]
pub struct WheelOptions {
    pub duration: Duration,
    pub live_labels: bool,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            live_labels: true,
        }
    }
}

/// The spinning wheel: angle, in-flight rotation and center label.
///
/// Rendering and frame timing belong to the host; the host calls
/// [`Wheel::advance`] once per frame and reads [`Wheel::angle`] and
/// [`Wheel::label`] back when drawing.
#[derive(Debug, Clone)]
pub struct Wheel {
    variant: Variant,
    lifecycle: Lifecycle,
    angle: f64,
    rotation: Option<Tween>,
    label: Label,
    live: Option<LiveLabel>,
    default_duration: Duration,
}

impl Wheel {
    pub fn new(variant: Variant, options: WheelOptions) -> Self {
        let live = match variant {
            Variant::Normal => None,
            Variant::Extended => Some(LiveLabel::new(options.live_labels)),
        };
        let wheel = Self {
            variant,
            lifecycle: Lifecycle::Loading,
            angle: 0.0,
            rotation: None,
            label: Label::from(Segment::at_angle(0.0)),
            live,
            default_duration: options.duration,
        };
        wheel.log_options();
        wheel
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn rotation(&self) -> Option<&Tween> {
        self.rotation.as_ref()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.as_ref().is_some_and(Tween::is_active)
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Loading => Phase::Loading,
            Lifecycle::Destroyed => Phase::Destroyed,
            Lifecycle::Ready if self.is_rotating() => Phase::Rotating,
            Lifecycle::Ready => Phase::Idle,
        }
    }

    /// `None` on the normal wheel.
    pub fn live_labels(&self) -> Option<bool> {
        self.live.as_ref().map(LiveLabel::is_enabled)
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    pub fn set_default_duration(&mut self, duration: Duration) {
        self.default_duration = duration;
    }

    /// Called once the visuals are built.
    pub fn mark_ready(&mut self) {
        match self.lifecycle {
            Lifecycle::Loading => {
                self.lifecycle = Lifecycle::Ready;
                log::info!("{} wheel ready", self.variant);
            }
            Lifecycle::Ready => {}
            Lifecycle::Destroyed => log::debug!("ignoring ready signal for a destroyed wheel"),
        }
    }

    /// Spins the wheel onto `number`. The label switches to the requested
    /// segment right away; the face catches up over `duration`, which also
    /// decides how many extra full turns are added.
    pub fn start(
        &mut self,
        number: SegmentNumber,
        duration: Option<Duration>,
    ) -> Result<(), WheelError> {
        self.ensure_ready()?;
        if self.is_rotating() {
            return Err(WheelError::RotationInProgress);
        }
        let segment = Segment::find(number)?;
        let duration = duration.unwrap_or(self.default_duration);

        let extra_turns = duration.as_secs_f64().round();
        let target = segment.target_angle() + extra_turns * FULL_TURN;
        log::debug!(
            "spinning to {} ({}) from {:.1} to {:.1} over {:?}",
            number,
            segment.color,
            self.angle,
            target,
            duration
        );

        self.rotation = Some(Tween::new(self.angle, target, duration, expo_in_out));
        self.label = Label::from(segment);
        Ok(())
    }

    /// Halts the rotation where it is. Stopping an idle wheel does nothing.
    pub fn stop(&mut self) -> Result<(), WheelError> {
        self.ensure_ready()?;
        match self.rotation.as_mut() {
            Some(rotation) => {
                rotation.kill();
                self.finish_rotation();
            }
            None => log::debug!("stop requested with no rotation in flight"),
        }
        Ok(())
    }

    /// Steps the rotation by one frame. Returns whether anything visible
    /// changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(rotation) = self.rotation.as_mut() else {
            return false;
        };
        self.angle = rotation.advance(dt);
        let finished = !rotation.is_active();

        self.sync_label();
        if finished {
            self.finish_rotation();
        }
        true
    }

    pub fn enable_dynamic_text_during_rotation(&mut self, enabled: bool) -> Result<(), WheelError> {
        if self.lifecycle == Lifecycle::Destroyed {
            return Err(WheelError::Destroyed);
        }
        let live = self.live.as_mut().ok_or(WheelError::NotExtended)?;
        live.set_enabled(enabled);
        log::info!(
            "live label updates {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.rotation = None;
        self.lifecycle = Lifecycle::Destroyed;
        log::info!("{} wheel destroyed", self.variant);
    }

    fn ensure_ready(&self) -> Result<(), WheelError> {
        match self.lifecycle {
            Lifecycle::Loading => Err(WheelError::NotReady),
            Lifecycle::Ready => Ok(()),
            Lifecycle::Destroyed => Err(WheelError::Destroyed),
        }
    }

    fn finish_rotation(&mut self) {
        self.angle = normalize_angle(self.angle);
        self.rotation = None;
        self.sync_label();
    }

    fn sync_label(&mut self) {
        if let Some(live) = &self.live {
            live.sync(self.angle, &mut self.label);
        }
    }

    fn log_options(&self) {
        log::info!(
            "Wheel rotation default duration is {}ms; pass a duration after the segment number to change it, e.g. `start 30 6000`",
            self.default_duration.as_millis()
        );
        if self.live.is_some() {
            log::info!(
                "The center label can follow the wheel while it spins; toggle it with `live on` or `live off`"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentColor;

    fn ready(variant: Variant) -> Wheel {
        let mut wheel = Wheel::new(variant, WheelOptions::default());
        wheel.mark_ready();
        wheel
    }

    fn seg(n: u32) -> SegmentNumber {
        SegmentNumber::new(n)
    }

    /// Steps at roughly 60 fps until the rotation settles.
    fn run_to_end(wheel: &mut Wheel) {
        let frame = Duration::from_micros(16_667);
        for _ in 0..10_000 {
            if !wheel.advance(frame) {
                return;
            }
        }
        panic!("rotation never finished");
    }

    #[test]
    fn test_start_sets_label_and_target() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(30), Some(Duration::from_millis(5500))).unwrap();

        assert_eq!(wheel.phase(), Phase::Rotating);
        assert_eq!(wheel.rotation().unwrap().target(), 360.0 + 6.0 * 360.0);
        assert_eq!(wheel.label().text(), "30");
        assert_eq!(wheel.label().color, SegmentColor::Red);
    }

    #[test]
    fn test_default_duration_is_used() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(8), None).unwrap();

        let rotation = wheel.rotation().unwrap();
        assert_eq!(rotation.duration(), DEFAULT_DURATION);
        assert_eq!(rotation.target(), 350.0 + 6.0 * 360.0);
    }

    #[test]
    fn test_advance_reports_nothing_once_settled() {
        let mut wheel = ready(Variant::Normal);
        assert!(!wheel.advance(Duration::from_millis(16)));

        wheel.start(seg(8), Some(Duration::from_millis(100))).unwrap();
        assert!(wheel.advance(Duration::ZERO));
        // the settling frame still redraws
        assert!(wheel.advance(Duration::from_millis(100)));
        assert!(!wheel.advance(Duration::from_millis(16)));

        wheel.start(seg(30), None).unwrap();
        wheel.advance(Duration::from_millis(16));
        wheel.stop().unwrap();
        assert!(!wheel.advance(Duration::from_millis(16)));
    }

    #[test]
    fn test_unknown_segment_changes_nothing() {
        let mut wheel = ready(Variant::Normal);
        let before = wheel.label();

        let err = wheel.start(seg(999), None).unwrap_err();
        assert_eq!(err, WheelError::UnknownSegment(UnknownSegment(seg(999))));
        assert_eq!(wheel.label(), before);
        assert!(wheel.rotation().is_none());
        assert_eq!(wheel.phase(), Phase::Idle);
    }

    #[test]
    fn test_second_start_is_rejected() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(30), None).unwrap();
        wheel.advance(Duration::from_millis(100));
        let angle = wheel.angle();

        assert_eq!(wheel.start(seg(8), None), Err(WheelError::RotationInProgress));
        assert_eq!(wheel.label().text(), "30");
        assert_eq!(wheel.angle(), angle);
        assert_eq!(wheel.rotation().unwrap().target(), 2520.0);
        assert!(wheel.is_rotating());
    }

    #[test]
    fn test_natural_completion_normalizes() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(23), Some(Duration::from_millis(2000))).unwrap();
        run_to_end(&mut wheel);

        assert_eq!(wheel.phase(), Phase::Idle);
        assert!(wheel.rotation().is_none());
        assert_eq!(wheel.angle(), 340.0);
        assert_eq!(wheel.label().text(), "23");
    }

    #[test]
    fn test_stop_normalizes_mid_flight() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(30), None).unwrap();
        wheel.advance(Duration::from_millis(3000));
        assert!(wheel.angle() > FULL_TURN);

        wheel.stop().unwrap();
        assert_eq!(wheel.phase(), Phase::Idle);
        assert!(wheel.rotation().is_none());
        assert!((0.0..FULL_TURN).contains(&wheel.angle()));
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut wheel = ready(Variant::Normal);
        assert_eq!(wheel.stop(), Ok(()));
        assert_eq!(wheel.angle(), 0.0);
    }

    #[test]
    fn test_spin_again_after_completion() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(5), Some(Duration::from_millis(1000))).unwrap();
        run_to_end(&mut wheel);
        wheel.start(seg(11), Some(Duration::from_millis(1000))).unwrap();

        let rotation = wheel.rotation().unwrap();
        assert_eq!(rotation.value(), wheel.angle());
        run_to_end(&mut wheel);
        assert_eq!(wheel.angle(), 10.0);
    }

    #[test]
    fn test_loading_rejects_operations() {
        let mut wheel = Wheel::new(Variant::Normal, WheelOptions::default());
        assert_eq!(wheel.phase(), Phase::Loading);
        assert_eq!(wheel.start(seg(30), None), Err(WheelError::NotReady));
        assert_eq!(wheel.stop(), Err(WheelError::NotReady));
    }

    #[test]
    fn test_destroyed_rejects_operations() {
        let mut wheel = ready(Variant::Extended);
        wheel.start(seg(30), None).unwrap();
        wheel.destroy();

        assert_eq!(wheel.phase(), Phase::Destroyed);
        assert!(!wheel.advance(Duration::from_millis(16)));
        assert_eq!(wheel.start(seg(30), None), Err(WheelError::Destroyed));
        assert_eq!(wheel.stop(), Err(WheelError::Destroyed));
        assert_eq!(
            wheel.enable_dynamic_text_during_rotation(true),
            Err(WheelError::Destroyed)
        );

        wheel.mark_ready();
        assert_eq!(wheel.phase(), Phase::Destroyed);
    }

    #[test]
    fn test_normal_wheel_label_ignores_progress() {
        let mut wheel = ready(Variant::Normal);
        wheel.start(seg(30), Some(Duration::from_millis(5500))).unwrap();
        wheel.advance(Duration::from_millis(2750));

        assert_eq!(wheel.label().text(), "30");
        assert_eq!(
            wheel.enable_dynamic_text_during_rotation(true),
            Err(WheelError::NotExtended)
        );
        assert_eq!(wheel.live_labels(), None);
    }

    #[test]
    fn test_extended_label_follows_angle() {
        let mut wheel = ready(Variant::Extended);
        wheel.start(seg(30), Some(Duration::from_millis(5500))).unwrap();
        assert_eq!(wheel.label().text(), "30");

        // halfway through an ease-in-out the face sits at 1260 degrees
        wheel.advance(Duration::from_millis(2750));
        assert_eq!(wheel.angle(), 1260.0);
        assert_eq!(wheel.label().text(), "12");
        assert_eq!(wheel.label().color, SegmentColor::Red);

        run_to_end(&mut wheel);
        assert_eq!(wheel.label().text(), "30");
    }

    #[test]
    fn test_toggle_does_not_interrupt_rotation() {
        let mut wheel = ready(Variant::Extended);
        wheel.start(seg(30), Some(Duration::from_millis(5500))).unwrap();
        wheel.advance(Duration::from_millis(1000));

        wheel.enable_dynamic_text_during_rotation(false).unwrap();
        assert_eq!(wheel.live_labels(), Some(false));
        assert!(wheel.is_rotating());

        let frozen = wheel.label();
        wheel.advance(Duration::from_millis(1750));
        assert_eq!(wheel.label(), frozen);
        assert!(wheel.is_rotating());

        wheel.enable_dynamic_text_during_rotation(true).unwrap();
        wheel.advance(Duration::ZERO);
        assert_eq!(wheel.label().text(), "12");
    }

    #[test]
    fn test_extended_stop_syncs_label() {
        let mut wheel = ready(Variant::Extended);
        wheel.start(seg(30), Some(Duration::from_millis(5500))).unwrap();
        wheel.advance(Duration::from_millis(2750));
        wheel.enable_dynamic_text_during_rotation(false).unwrap();
        wheel.advance(Duration::from_millis(100));
        wheel.enable_dynamic_text_during_rotation(true).unwrap();

        wheel.stop().unwrap();
        assert_eq!(
            Label::from(Segment::at_angle(wheel.angle())),
            wheel.label()
        );
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Normal".parse::<Variant>().unwrap(), Variant::Normal);
        assert_eq!("EXTENDED".parse::<Variant>().unwrap(), Variant::Extended);
        assert_eq!("live".parse::<Variant>().unwrap(), Variant::Extended);
        assert!("fancy".parse::<Variant>().is_err());
        assert_eq!(Variant::Extended.to_string(), "extended");
    }
}
