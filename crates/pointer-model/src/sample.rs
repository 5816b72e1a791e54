//! Pointer samples and raw motion events.
//!
//! A [`PointerMotionEvent`] is what an input source delivers; a
//! [`PointerSample`] is the part of it the shake detector looks at.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// A timestamped pointer position.
///
/// Timestamps are monotonic durations since a host-chosen epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point2D,
    pub timestamp: Duration,
}

impl PointerSample {
    pub fn new(position: Point2D, timestamp: Duration) -> Self {
        Self {
            position,
            timestamp,
        }
    }

    /// Convenience constructor from coordinates and milliseconds.
    pub fn at_ms(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self::new(Point2D::new(x, y), Duration::from_millis(timestamp_ms))
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
            MouseButton::Back => 1 << 3,
            MouseButton::Forward => 1 << 4,
        }
    }
}

/// Set of buttons held during a motion event.
///
/// Serialized as a list of button names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MouseButton>", into = "Vec<MouseButton>")]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons(0);

    pub fn with(mut self, button: MouseButton) -> Self {
        self.0 |= button.bit();
        self
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }
}

impl From<Vec<MouseButton>> for PointerButtons {
    fn from(buttons: Vec<MouseButton>) -> Self {
        buttons
            .into_iter()
            .fold(PointerButtons::NONE, PointerButtons::with)
    }
}

impl From<PointerButtons> for Vec<MouseButton> {
    fn from(buttons: PointerButtons) -> Self {
        buttons.iter().collect()
    }
}

/// A single pointer motion as delivered by the input source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMotionEvent {
    pub position: Point2D,
    pub timestamp: Duration,

    /// Buttons held while moving.
    pub buttons: PointerButtons,

    /// The position was set programmatically rather than moved.
    pub warp: bool,
}

impl PointerMotionEvent {
    /// A plain motion with no buttons held.
    pub fn motion(position: Point2D, timestamp: Duration) -> Self {
        Self {
            position,
            timestamp,
            buttons: PointerButtons::NONE,
            warp: false,
        }
    }

    /// The sample the shake detector consumes.
    pub fn sample(&self) -> PointerSample {
        PointerSample::new(self.position, self.timestamp)
    }
}
