//! ShakeCursor Pointer Model
//!
//! Defines the data contracts shared between pointer input sources and
//! the shake gesture core:
//! - **Geometry:** Points and axis-aligned bounds in device-independent units
//! - **Samples:** Timestamped pointer positions and raw motion events
//! - **Traces:** Append-only JSONL recordings of pointer motion for replay
//!
//! Coordinates are logical (device-independent) pixels, not normalized,
//! because shake thresholds are absolute distances.

pub mod geometry;
pub mod sample;
pub mod trace;

pub use geometry::*;
pub use sample::*;
pub use trace::*;
