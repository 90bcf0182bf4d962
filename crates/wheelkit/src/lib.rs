pub mod command;
pub mod segment;
pub mod sync;
pub mod tween;
pub mod wheel;

pub use segment::{Segment, SegmentColor, SegmentNumber};
pub use sync::{Label, LiveLabel};
pub use wheel::{DEFAULT_DURATION, Phase, Variant, Wheel, WheelError, WheelOptions};
