use std::time::Duration;
use wheelkit::command::Command;
use wheelkit::{SegmentNumber, Variant};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Start(SegmentNumber, Option<Duration>),
    Stop,
    Mount(Variant),
    LiveLabels(bool),
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Start {
                segment,
                duration_ms,
            } => AppEvent::Start(segment, duration_ms.map(Duration::from_millis)),
            Command::Stop => AppEvent::Stop,
            Command::Mount(variant) => AppEvent::Mount(variant),
            Command::LiveLabels(enabled) => AppEvent::LiveLabels(enabled),
        }
    }
}
