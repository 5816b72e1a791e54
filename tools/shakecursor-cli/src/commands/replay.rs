//! Replay a pointer trace through the shake-to-magnify core.

use std::path::{Path, PathBuf};
use std::time::Duration;

use shakecursor_common::config::ShakeConfig;
use shakecursor_common::error::{ShakeCursorError, ShakeCursorResult};
use shakecursor_core::{HostCall, MagnificationChange, MagnifierState, ShakeCursorEffect};
use shakecursor_pointer_model::trace::{
    check_monotonic, parse_header, parse_trace, TraceEntry, TraceEvent,
};

use crate::sim::SimulatedHost;

/// Upper bound on simulated time after the last trace event.
const MAX_DRAIN: Duration = Duration::from_secs(60);

pub fn run(trace: PathBuf, config: ShakeConfig, frame_ms: u64) -> anyhow::Result<()> {
    if frame_ms == 0 {
        return Err(ShakeCursorError::config("--frame-ms must be at least 1").into());
    }

    println!("Replaying trace: {}", trace.display());
    let entries = load_trace(&trace)?;
    println!("  Loaded {} events", entries.len());
    println!(
        "  interval={}ms sensitivity={} magnification={} over_magnification={}",
        config.time_interval_ms,
        config.sensitivity,
        config.magnification,
        config.over_magnification
    );

    let mut replay = Replay::new(&config, Duration::from_millis(frame_ms));
    for entry in &entries {
        replay.apply(entry);
    }
    replay.drain();

    let summary = replay.summary();
    println!("\nSummary:");
    println!("  Shakes detected: {}", summary.shakes);
    println!("  Peak target magnification: {:.2}", summary.peak_target);
    println!("  Cursor item created: {} time(s)", summary.cursor_items);
    println!(
        "  Render resources allocated: {} time(s)",
        summary.render_allocations
    );
    println!("  Final state: {:?}", summary.final_state);

    Ok(())
}

/// Read and validate a JSONL trace.
pub fn load_trace(path: &Path) -> ShakeCursorResult<Vec<TraceEntry>> {
    if !path.exists() {
        return Err(ShakeCursorError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    if let Some(header) = parse_header(&content) {
        tracing::debug!(
            schema = %header.schema_version,
            created = %header.created,
            rate_hz = header.sample_rate_hz,
            "Trace header"
        );
    }

    let entries = parse_trace(&content)?;
    if let Some(index) = check_monotonic(&entries) {
        return Err(ShakeCursorError::trace(format!(
            "timestamp goes backwards at event {index}"
        )));
    }
    Ok(entries)
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub shakes: usize,
    pub peak_target: f64,
    pub cursor_items: usize,
    pub render_allocations: usize,
    pub final_state: MagnifierState,
}

/// Drives a [`ShakeCursorEffect`] through trace events and simulated frames.
pub struct Replay {
    effect: ShakeCursorEffect<SimulatedHost>,
    frame: Duration,
    next_frame: Duration,
    constrained: bool,
    shakes: usize,
    reported: usize,
}

impl Replay {
    pub fn new(config: &ShakeConfig, frame: Duration) -> Self {
        Self {
            effect: ShakeCursorEffect::new(SimulatedHost::new(), config),
            frame,
            next_frame: Duration::ZERO,
            constrained: false,
            shakes: 0,
            reported: 0,
        }
    }

    /// Run frames up to the entry's timestamp, then deliver it.
    pub fn apply(&mut self, entry: &TraceEntry) {
        let now = entry.timestamp();
        self.run_frames_until(now);

        match entry.event {
            TraceEvent::Constraint { active } => {
                tracing::debug!(active, "Pointer constraint changed");
                self.constrained = active;
            }
            TraceEvent::Motion { .. } => {
                if let Some(event) = entry.motion_event() {
                    if self.effect.pointer_motion(&event, self.constrained) {
                        self.shakes += 1;
                        println!("  [{:>8.3}s] shake #{}", now.as_secs_f64(), self.shakes);
                    }
                }
            }
        }
        self.report_target_changes(now);
    }

    /// Keep running frames until the effect settles back to idle.
    pub fn drain(&mut self) {
        let limit = self.next_frame + MAX_DRAIN;
        while (self.effect.is_active()
            || self.effect.next_deadline().is_some()
            || self.effect.host().is_animating())
            && self.next_frame <= limit
        {
            let until = self.next_frame;
            self.run_frames_until(until);
        }
        if self.effect.state() != MagnifierState::Idle {
            tracing::warn!(state = ?self.effect.state(), "Replay did not settle");
        }
    }

    pub fn summary(&self) -> ReplaySummary {
        let recorder = self.effect.host().recorder();
        let peak_target = recorder
            .notifications()
            .into_iter()
            .filter_map(|change| match change {
                MagnificationChange::TargetMagnification(value) => Some(value),
                _ => None,
            })
            .fold(1.0, f64::max);

        ReplaySummary {
            shakes: self.shakes,
            peak_target,
            cursor_items: recorder
                .count(|call| matches!(call, HostCall::CreateCursorItem { .. })),
            render_allocations: recorder.count(|call| *call == HostCall::InitRenderResources),
            final_state: self.effect.state(),
        }
    }

    fn run_frames_until(&mut self, now: Duration) {
        while self.next_frame <= now {
            let frame_time = self.next_frame;
            self.effect.advance(frame_time);
            if let Some(value) = self.effect.host_mut().tick(frame_time) {
                self.effect.on_animation_value_changed(value, frame_time);
            }
            self.report_target_changes(frame_time);
            self.next_frame += self.frame;
        }
    }

    fn report_target_changes(&mut self, now: Duration) {
        let notifications = self.effect.host().recorder().notifications();
        for change in notifications.iter().skip(self.reported) {
            if let MagnificationChange::TargetMagnification(value) = change {
                println!(
                    "  [{:>8.3}s] target magnification -> {value:.2}",
                    now.as_secs_f64()
                );
            }
        }
        self.reported = notifications.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::synth::generate;
    use crate::Pattern;

    fn replay(entries: &[TraceEntry], config: &ShakeConfig) -> ReplaySummary {
        let mut replay = Replay::new(config, Duration::from_millis(16));
        for entry in entries {
            replay.apply(entry);
        }
        replay.drain();
        replay.summary()
    }

    #[test]
    fn test_shake_trace_magnifies_and_settles() {
        let entries = generate(Pattern::Shake, 300.0, 6, 60, 8);
        let summary = replay(&entries, &ShakeConfig::default());

        assert!(summary.shakes >= 1);
        assert!(summary.peak_target >= 3.0);
        assert_eq!(summary.render_allocations, 1);
        assert_eq!(summary.final_state, MagnifierState::Idle);
    }

    #[test]
    fn test_line_and_jitter_never_shake() {
        for pattern in [Pattern::Line, Pattern::Jitter] {
            let entries = generate(pattern, 300.0, 12, 60, 8);
            let summary = replay(&entries, &ShakeConfig::default());
            assert_eq!(summary.shakes, 0, "{pattern:?}");
            assert_eq!(summary.peak_target, 1.0);
            assert_eq!(summary.cursor_items, 0);
        }
    }

    #[test]
    fn test_constrained_pointer_does_not_shake() {
        let mut entries = vec![TraceEntry::constraint(0, true)];
        entries.extend(generate(Pattern::Shake, 300.0, 6, 60, 8));
        let summary = replay(&entries, &ShakeConfig::default());
        assert_eq!(summary.shakes, 0);
    }

    #[test]
    fn test_zero_frame_interval_is_a_config_error() {
        let err = run(PathBuf::from("unused.jsonl"), ShakeConfig::default(), 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ShakeCursorError>(),
            Some(ShakeCursorError::Config { .. })
        ));
    }

    #[test]
    fn test_load_trace_rejects_backwards_time() {
        let dir = std::env::temp_dir().join(format!("shakecursor-replay-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("backwards.jsonl");
        std::fs::write(
            &path,
            "{\"t\":10,\"type\":\"motion\",\"x\":0.0,\"y\":0.0}\n{\"t\":5,\"type\":\"motion\",\"x\":1.0,\"y\":0.0}\n",
        )
        .unwrap();

        let err = load_trace(&path).unwrap_err();
        assert!(matches!(err, ShakeCursorError::Trace { .. }));

        let missing = load_trace(&dir.join("missing.jsonl")).unwrap_err();
        assert!(matches!(missing, ShakeCursorError::FileNotFound { .. }));
        std::fs::remove_file(&path).ok();
    }
}
