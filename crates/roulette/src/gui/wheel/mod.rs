pub mod view;

pub use view::{Visuals, draw};

/// Geometry is authored for a square viewport of this size and scaled to fit.
pub const REFERENCE_SIZE: f64 = 600.0;
pub const FACE_RADIUS: f64 = 240.0;
pub const HUB_RADIUS: f64 = 150.0;
pub const LABEL_DISC_RADIUS: f64 = 56.0;
pub const POCKET_TEXT_RADIUS: f64 = 212.0; // distance of pocket numbers from the center
pub const POCKET_FONT_SIZE: f64 = 16.0;
pub const RIM_WIDTH: f64 = 6.0;
pub const STOPPER_WIDTH: f64 = 28.0;
pub const STOPPER_HEIGHT: f64 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the wheel sits in the current viewport. Recomputed on every draw, so
/// resizing the window re-centers the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub center: Point,
    pub scale: f64,
}

impl Layout {
    pub fn fit(width: f64, height: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            scale: (width.min(height) / REFERENCE_SIZE).max(0.0),
        }
    }

    pub fn face_radius(&self) -> f64 {
        FACE_RADIUS * self.scale
    }

    /// Tip of the stopper, where it touches the face.
    pub fn stopper_anchor(&self) -> Point {
        Point::new(self.center.x, self.center.y - self.face_radius())
    }
}
