use derive_more::{Display, From, Into};
use strum::Display as StrumDisplay;
use thiserror::Error;

/// Each pocket occupies half of this arc; the two color groups interleave.
pub const SEGMENT_ARC: f64 = 20.0;
pub const POCKET_ARC: f64 = SEGMENT_ARC / 2.0;
pub const POCKET_COUNT: usize = RED_SEGMENTS.len() + BLACK_SEGMENTS.len();
pub const FULL_TURN: f64 = 360.0;

pub const RED_SEGMENTS: [u32; 18] = [
    30, 23, 5, 16, 1, 14, 9, 18, 7, 12, 3, 32, 19, 21, 25, 34, 27, 36,
];
pub const BLACK_SEGMENTS: [u32; 18] = [
    8, 10, 24, 33, 20, 31, 22, 29, 28, 35, 26, 15, 4, 2, 17, 6, 13, 11,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct SegmentNumber(u32);

impl SegmentNumber {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SegmentColor {
    Red,
    Black,
}

impl SegmentColor {
    /// Angle at which the group's first segment sits under the stopper.
    pub fn base_offset(self) -> f64 {
        match self {
            Self::Red => 0.0,
            Self::Black => -10.0,
        }
    }

    pub fn table(self) -> &'static [u32] {
        match self {
            Self::Red => &RED_SEGMENTS,
            Self::Black => &BLACK_SEGMENTS,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("there is no segment with number {0}")]
pub struct UnknownSegment(pub SegmentNumber);

/// A segment located on the wheel face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub number: SegmentNumber,
    pub color: SegmentColor,
    pub position: usize,
}

impl Segment {
    /// Black is checked first; the tables are disjoint so the order only
    /// matters for malformed tables.
    pub fn find(number: SegmentNumber) -> Result<Self, UnknownSegment> {
        [SegmentColor::Black, SegmentColor::Red]
            .into_iter()
            .find_map(|color| {
                position_of(color.table(), number.get()).map(|position| Self {
                    number,
                    color,
                    position,
                })
            })
            .ok_or(UnknownSegment(number))
    }

    /// Absolute wheel angle, in degrees, that brings this segment under the
    /// stopper. Always in (0, 360].
    pub fn target_angle(&self) -> f64 {
        self.color.base_offset() - self.position as f64 * SEGMENT_ARC + FULL_TURN
    }

    /// Clockwise offset of the pocket from the stopper on an unrotated face.
    pub fn face_offset(&self) -> f64 {
        normalize_angle(-self.target_angle())
    }

    /// The pocket under the stopper when the wheel is rotated by `angle`.
    ///
    /// Picks the pocket whose center is nearest to the stopper, so any
    /// fractional angle maps to a pocket and every table position, including
    /// the first, is reachable.
    pub fn at_angle(angle: f64) -> Self {
        let steps = (-normalize_angle(angle) / POCKET_ARC).round() as i64;
        let pocket = steps.rem_euclid(POCKET_COUNT as i64) as usize;
        Self::at_pocket(pocket)
    }

    /// Pocket `k` sits `k * POCKET_ARC` degrees clockwise of the stopper on an
    /// unrotated face. Even pockets are red, odd pockets black.
    fn at_pocket(pocket: usize) -> Self {
        let color = if pocket % 2 == 0 {
            SegmentColor::Red
        } else {
            SegmentColor::Black
        };
        let position = pocket / 2;
        Self {
            number: SegmentNumber(color.table()[position]),
            color,
            position,
        }
    }
}

/// Pockets in clockwise order starting under the stopper.
pub fn face_layout() -> impl Iterator<Item = Segment> {
    (0..POCKET_COUNT).map(Segment::at_pocket)
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= FULL_TURN { 0.0 } else { a }
}

fn position_of(table: &[u32], number: u32) -> Option<usize> {
    table.iter().position(|&n| n == number)
}
