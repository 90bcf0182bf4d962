use std::time::Duration;
use wheelkit::command::Command;
use wheelkit::segment::{BLACK_SEGMENTS, FULL_TURN, RED_SEGMENTS};
use wheelkit::{Label, Phase, Segment, SegmentNumber, Variant, Wheel, WheelError, WheelOptions};

const FRAME: Duration = Duration::from_micros(16_667);

fn apply(wheel: &mut Wheel, line: &str) -> Result<(), WheelError> {
    match line.parse::<Command>().unwrap() {
        Command::Start {
            segment,
            duration_ms,
        } => wheel.start(segment, duration_ms.map(Duration::from_millis)),
        Command::Stop => wheel.stop(),
        Command::LiveLabels(enabled) => wheel.enable_dynamic_text_during_rotation(enabled),
        Command::Mount(_) => panic!("mounting is handled by the host"),
    }
}

fn mounted(variant: Variant) -> Wheel {
    let mut wheel = Wheel::new(variant, WheelOptions::default());
    wheel.mark_ready();
    wheel
}

#[test]
fn extended_wheel_lands_on_every_segment() {
    let mut wheel = mounted(Variant::Extended);

    for n in RED_SEGMENTS.iter().chain(BLACK_SEGMENTS.iter()) {
        apply(&mut wheel, &format!("start {} 1500", n)).unwrap();
        while wheel.advance(FRAME) {}

        assert_eq!(wheel.phase(), Phase::Idle);
        assert_eq!(wheel.label().number, SegmentNumber::new(*n));
        assert!((0.0..FULL_TURN).contains(&wheel.angle()));
    }
}

#[test]
fn live_label_passes_through_intermediate_segments() {
    let mut wheel = mounted(Variant::Extended);
    apply(&mut wheel, "start 30 5500").unwrap();

    let mut seen = Vec::new();
    while wheel.advance(FRAME) {
        let label = wheel.label();
        assert_eq!(label, Label::from(Segment::at_angle(wheel.angle())));
        if seen.last() != Some(&label.number) {
            seen.push(label.number);
        }
    }

    assert!(seen.len() > 36, "only saw {} label changes", seen.len());
    assert_eq!(seen.last(), Some(&SegmentNumber::new(30)));
}

#[test]
fn commands_drive_a_normal_wheel() {
    let mut wheel = mounted(Variant::Normal);

    apply(&mut wheel, "start 17").unwrap();
    assert_eq!(
        apply(&mut wheel, "start 4"),
        Err(WheelError::RotationInProgress)
    );
    assert_eq!(
        apply(&mut wheel, "live on"),
        Err(WheelError::NotExtended)
    );

    for _ in 0..60 {
        wheel.advance(FRAME);
    }
    apply(&mut wheel, "stop").unwrap();

    assert_eq!(wheel.phase(), Phase::Idle);
    assert_eq!(wheel.label().text(), "17");
    assert!((0.0..FULL_TURN).contains(&wheel.angle()));

    assert!(matches!(
        apply(&mut wheel, "start 999"),
        Err(WheelError::UnknownSegment(_))
    ));
    assert_eq!(wheel.phase(), Phase::Idle);
}
