//! A simulated compositor: plays scale animations frame by frame and
//! records every other host request.

use std::time::Duration;

use shakecursor_core::{
    Easing, MagnificationChange, MagnifierHost, RecordingHost, ScaleAnimation,
};
use shakecursor_pointer_model::geometry::Point2D;

/// Host used for trace replay.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    recorder: RecordingHost,
    animation: Option<RunningAnimation>,
}

#[derive(Debug, Clone, Copy)]
struct RunningAnimation {
    animation: ScaleAnimation,
    /// Assigned on the first frame after the request.
    started: Option<Duration>,
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorder(&self) -> &RecordingHost {
        &self.recorder
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Advance the running animation to `now` and return its value, if any.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        let running = self.animation.as_mut()?;
        let started = *running.started.get_or_insert(now);
        let animation = running.animation;

        let elapsed = now.saturating_sub(started).as_secs_f64();
        let duration = animation.duration.as_secs_f64();
        let progress = if duration > 0.0 {
            elapsed / duration
        } else {
            1.0
        };

        if progress >= 1.0 {
            self.animation = None;
            return Some(animation.to);
        }

        let eased = match animation.easing {
            Easing::InOutCubic => ease_in_out_cubic(progress),
        };
        Some(animation.from + (animation.to - animation.from) * eased)
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

impl MagnifierHost for SimulatedHost {
    fn start_animation(&mut self, animation: ScaleAnimation) {
        self.animation = Some(RunningAnimation {
            animation,
            started: None,
        });
        self.recorder.start_animation(animation);
    }

    fn hide_cursor(&mut self) {
        self.recorder.hide_cursor();
    }

    fn show_cursor(&mut self) {
        self.recorder.show_cursor();
    }

    fn create_cursor_item(&mut self, theme_scale: f64, position: Point2D) {
        self.recorder.create_cursor_item(theme_scale, position);
    }

    fn destroy_cursor_item(&mut self) {
        self.recorder.destroy_cursor_item();
    }

    fn set_cursor_item_scale(&mut self, scale: f64) {
        self.recorder.set_cursor_item_scale(scale);
    }

    fn set_cursor_item_position(&mut self, position: Point2D) {
        self.recorder.set_cursor_item_position(position);
    }

    fn init_render_resources(&mut self) {
        self.recorder.init_render_resources();
    }

    fn release_render_resources(&mut self) {
        self.recorder.release_render_resources();
    }

    fn notify(&mut self, change: MagnificationChange) {
        self.recorder.notify(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(from: f64, to: f64) -> ScaleAnimation {
        ScaleAnimation {
            from,
            to,
            duration: Duration::from_millis(200),
            easing: Easing::InOutCubic,
        }
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_tick_plays_to_end_value() {
        let mut host = SimulatedHost::new();
        assert_eq!(host.tick(Duration::ZERO), None);

        host.start_animation(animation(1.0, 3.0));
        assert_eq!(host.tick(Duration::from_millis(100)), Some(1.0));
        let mid = host.tick(Duration::from_millis(200)).unwrap();
        assert!((mid - 2.0).abs() < 1e-9);
        assert_eq!(host.tick(Duration::from_millis(300)), Some(3.0));
        assert!(!host.is_animating());
        assert_eq!(host.recorder().animations().len(), 1);
    }

    #[test]
    fn test_new_animation_replaces_running_one() {
        let mut host = SimulatedHost::new();
        host.start_animation(animation(1.0, 3.0));
        host.tick(Duration::ZERO);
        host.start_animation(animation(2.0, 1.0));
        assert_eq!(host.tick(Duration::from_millis(50)), Some(2.0));
        assert_eq!(host.tick(Duration::from_millis(250)), Some(1.0));
    }
}
