use serde::{Deserialize, Serialize};

/// Maximum card tilt, reached at 1.5 viewport widths of displacement
const MAX_ROTATION_DEGREES: f64 = 120.0;
const ROTATION_SPAN: f64 = 1.5;

/// 2D displacement of the top card from where the gesture started
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Card tilt in degrees for this offset on a surface `viewport_width` wide
    pub fn rotation_degrees(&self, viewport_width: f64) -> f64 {
        let span = viewport_width * ROTATION_SPAN;
        if span <= 0.0 || !self.x.is_finite() {
            return 0.0;
        }
        (self.x / span).clamp(-1.0, 1.0) * MAX_ROTATION_DEGREES
    }
}

/// Raw pointer gesture delivered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Start,
    Move { dx: f64, dy: f64 },
    End { dx: f64, dy: f64 },
}

/// Direction a card leaves the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Classify a horizontal release displacement against `threshold`.
    ///
    /// Returns `None` inside the dead zone `[-threshold, threshold]` and for
    /// non-finite input.
    pub fn from_release(dx: f64, threshold: f64) -> Option<Self> {
        if dx > threshold {
            Some(Direction::Right)
        } else if dx < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    }

    pub fn verdict(self) -> Verdict {
        match self {
            Direction::Right => Verdict::Accept,
            Direction::Left => Verdict::Reject,
        }
    }

    /// Off-surface resting point for a card leaving in this direction
    pub fn exit_offset(self, viewport_width: f64) -> Offset {
        match self {
            Direction::Right => Offset::new(viewport_width, 0.0),
            Direction::Left => Offset::new(-viewport_width, 0.0),
        }
    }
}

/// Outcome of a committed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject,
}
