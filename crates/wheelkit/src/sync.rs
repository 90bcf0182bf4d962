use crate::segment::{Segment, SegmentColor, SegmentNumber};

/// What the center of the wheel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub number: SegmentNumber,
    pub color: SegmentColor,
}

impl Label {
    pub fn text(&self) -> String {
        self.number.to_string()
    }
}

impl From<Segment> for Label {
    fn from(segment: Segment) -> Self {
        Self {
            number: segment.number,
            color: segment.color,
        }
    }
}

/// Keeps the label on whatever pocket is currently under the stopper while the
/// wheel turns. Only the extended wheel carries one.
#[derive(Debug, Clone)]
pub struct LiveLabel {
    enabled: bool,
}

impl LiveLabel {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the label changed.
    pub fn sync(&self, angle: f64, label: &mut Label) -> bool {
        if !self.enabled {
            return false;
        }
        let current = Label::from(Segment::at_angle(angle));
        if *label == current {
            return false;
        }
        *label = current;
        true
    }
}
