//! Pointer trace format.
//!
//! Traces are append-only JSONL: an optional `# `-prefixed header line
//! followed by one event per line. Timestamps are nanoseconds since the
//! start of the trace and must be non-decreasing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::sample::{PointerButtons, PointerMotionEvent};

/// Current trace schema version.
pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first (comment) line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock creation time (RFC 3339).
    pub created: String,

    /// Nominal pointer sampling rate (Hz).
    pub sample_rate_hz: u32,
}

impl TraceHeader {
    /// Header stamped with the current wall-clock time.
    pub fn now(sample_rate_hz: u32) -> Self {
        Self {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            created: chrono::Utc::now().to_rfc3339(),
            sample_rate_hz,
        }
    }
}

/// One line of a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Nanoseconds since trace start.
    #[serde(rename = "t")]
    pub timestamp_ns: u64,

    #[serde(flatten)]
    pub event: TraceEvent,
}

/// Trace payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Pointer moved.
    Motion {
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "PointerButtons::is_empty")]
        buttons: PointerButtons,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        warp: bool,
    },

    /// Another component started or stopped constraining the pointer.
    Constraint { active: bool },
}

impl TraceEntry {
    /// A plain motion entry.
    pub fn motion(timestamp_ns: u64, x: f64, y: f64) -> Self {
        Self {
            timestamp_ns,
            event: TraceEvent::Motion {
                x,
                y,
                buttons: PointerButtons::NONE,
                warp: false,
            },
        }
    }

    /// A constraint change entry.
    pub fn constraint(timestamp_ns: u64, active: bool) -> Self {
        Self {
            timestamp_ns,
            event: TraceEvent::Constraint { active },
        }
    }

    pub fn timestamp(&self) -> Duration {
        Duration::from_nanos(self.timestamp_ns)
    }

    /// The motion event carried by this entry, if any.
    pub fn motion_event(&self) -> Option<PointerMotionEvent> {
        match self.event {
            TraceEvent::Motion {
                x,
                y,
                buttons,
                warp,
            } => Some(PointerMotionEvent {
                position: Point2D::new(x, y),
                timestamp: self.timestamp(),
                buttons,
                warp,
            }),
            TraceEvent::Constraint { .. } => None,
        }
    }
}

/// Parse trace entries from JSONL content, skipping comments and blank lines.
pub fn parse_trace(jsonl: &str) -> Result<Vec<TraceEntry>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse the header comment, if the first non-blank line carries one.
pub fn parse_header(jsonl: &str) -> Option<TraceHeader> {
    let first = jsonl.lines().map(str::trim).find(|line| !line.is_empty())?;
    let body = first.strip_prefix('#')?.trim();
    serde_json::from_str(body).ok()
}

/// Serialize entries to JSONL, with an optional header comment.
pub fn serialize_trace(
    header: Option<&TraceHeader>,
    entries: &[TraceEntry],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    if let Some(header) = header {
        output.push_str("# ");
        output.push_str(&serde_json::to_string(header)?);
        output.push('\n');
    }
    for entry in entries {
        output.push_str(&serde_json::to_string(entry)?);
        output.push('\n');
    }
    Ok(output)
}

/// Index of the first entry whose timestamp goes backwards.
pub fn check_monotonic(entries: &[TraceEntry]) -> Option<usize> {
    entries
        .windows(2)
        .position(|pair| pair[1].timestamp_ns < pair[0].timestamp_ns)
        .map(|i| i + 1)
}
