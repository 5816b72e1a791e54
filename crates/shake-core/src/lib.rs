//! ShakeCursor Core
//!
//! Turns a live pointer-motion stream into cursor magnification:
//! - **Detector:** Windowed geometric analysis that recognizes a shake gesture
//! - **Controller:** Timer-driven magnification state machine with debounce,
//!   automatic deflate, and a render-resource cooldown
//! - **Effect:** Input routing and reconfiguration glue tying the two together
//!
//! This crate is pure computation over explicit clock values. Rendering,
//! animation playback, and timer scheduling belong to the host, reached
//! through [`MagnifierHost`].

pub mod controller;
pub mod detector;
pub mod effect;
pub mod host;

pub use controller::{MagnificationController, MagnifierSettings, MagnifierState};
pub use detector::{ShakeDetector, ShakeVerdict};
pub use effect::ShakeCursorEffect;
pub use host::{
    Easing, HostCall, MagnificationChange, MagnifierHost, RecordingHost, ScaleAnimation,
};
