//! Generate synthetic pointer traces.

use std::path::PathBuf;

use shakecursor_common::error::ShakeCursorError;
use shakecursor_pointer_model::geometry::Point2D;
use shakecursor_pointer_model::trace::{serialize_trace, TraceEntry, TraceHeader};

use crate::Pattern;

/// Where every pattern starts.
const ORIGIN: Point2D = Point2D { x: 960.0, y: 540.0 };

/// Amplitude used by the jitter pattern, well under the shake extent gate.
const JITTER_AMPLITUDE: f64 = 4.0;

pub fn run(
    pattern: Pattern,
    amplitude: f64,
    reversals: u32,
    swing_ms: u64,
    step_ms: u64,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    if step_ms == 0 {
        return Err(ShakeCursorError::config("--step-ms must be at least 1").into());
    }

    let entries = generate(pattern, amplitude, reversals, swing_ms, step_ms);
    let sample_rate_hz = u32::try_from(1000 / step_ms).unwrap_or(u32::MAX).max(1);
    let jsonl = serialize_trace(Some(&TraceHeader::now(sample_rate_hz)), &entries)?;

    match output {
        Some(path) => {
            std::fs::write(&path, jsonl)?;
            eprintln!("Wrote {} samples to {}", entries.len(), path.display());
        }
        None => print!("{jsonl}"),
    }
    Ok(())
}

/// Build the samples for `pattern`.
///
/// Swings are sampled every `step_ms`, always including both endpoints.
pub fn generate(
    pattern: Pattern,
    amplitude: f64,
    reversals: u32,
    swing_ms: u64,
    step_ms: u64,
) -> Vec<TraceEntry> {
    let mut waypoints = vec![ORIGIN];
    match pattern {
        Pattern::Line => {
            waypoints.push(Point2D::new(ORIGIN.x + amplitude, ORIGIN.y + amplitude));
        }
        Pattern::Shake | Pattern::Jitter => {
            let half = if pattern == Pattern::Jitter {
                JITTER_AMPLITUDE
            } else {
                amplitude / 2.0
            };
            for i in 0..=reversals {
                let side = if i % 2 == 0 { half } else { -half };
                waypoints.push(Point2D::new(ORIGIN.x + side, ORIGIN.y));
            }
        }
    }

    let steps_per_swing = (swing_ms / step_ms.max(1)).max(1);
    let mut entries = vec![TraceEntry::motion(0, ORIGIN.x, ORIGIN.y)];
    let mut t_ms = 0;
    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for step in 1..=steps_per_swing {
            t_ms += step_ms;
            let f = step as f64 / steps_per_swing as f64;
            entries.push(TraceEntry::motion(
                t_ms * 1_000_000,
                from.x + (to.x - from.x) * f,
                from.y + (to.y - from.y) * f,
            ));
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakecursor_pointer_model::trace::check_monotonic;

    #[test]
    fn test_line_ends_at_far_corner() {
        let entries = generate(Pattern::Line, 300.0, 0, 64, 8);
        assert_eq!(entries.len(), 9);
        let last = entries.last().unwrap().motion_event().unwrap();
        assert_eq!(last.position, Point2D::new(1260.0, 840.0));
        assert_eq!(check_monotonic(&entries), None);
    }

    #[test]
    fn test_shake_swings_between_extremes() {
        let entries = generate(Pattern::Shake, 200.0, 3, 40, 10);
        // Origin, then four swings of four samples.
        assert_eq!(entries.len(), 17);
        let xs: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.motion_event())
            .map(|e| e.position.x)
            .collect();
        assert_eq!(xs[4], 1060.0);
        assert_eq!(xs[8], 860.0);
        assert_eq!(entries.last().unwrap().timestamp_ns, 160_000_000);
    }

    #[test]
    fn test_zero_step_is_a_config_error() {
        let err = run(Pattern::Shake, 100.0, 2, 40, 0, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ShakeCursorError>(),
            Some(ShakeCursorError::Config { .. })
        ));
    }

    #[test]
    fn test_jitter_stays_small() {
        let entries = generate(Pattern::Jitter, 500.0, 10, 20, 5);
        for entry in &entries {
            let event = entry.motion_event().unwrap();
            assert!((event.position.x - ORIGIN.x).abs() <= JITTER_AMPLITUDE);
        }
    }
}
