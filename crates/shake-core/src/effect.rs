//! Input-spy glue between the pointer stream, the detector, and the controller.

use std::time::Duration;

use shakecursor_common::config::ShakeConfig;
use shakecursor_pointer_model::geometry::Point2D;
use shakecursor_pointer_model::sample::PointerMotionEvent;

use crate::controller::{MagnificationController, MagnifierSettings, MagnifierState};
use crate::detector::ShakeDetector;
use crate::host::MagnifierHost;

/// One shake-to-magnify instance: exactly one detector and one controller.
pub struct ShakeCursorEffect<H: MagnifierHost> {
    detector: ShakeDetector,
    controller: MagnificationController<H>,
}

impl<H: MagnifierHost> ShakeCursorEffect<H> {
    /// Create an effect configured from `config`.
    pub fn new(host: H, config: &ShakeConfig) -> Self {
        let mut effect = Self {
            detector: ShakeDetector::default(),
            controller: MagnificationController::new(host, MagnifierSettings::from(config)),
        };
        effect.reconfigure(config);
        effect
    }

    /// Apply new settings. Detector changes apply from the next sample.
    pub fn reconfigure(&mut self, config: &ShakeConfig) {
        for warning in config.check() {
            tracing::warn!("{warning}");
        }
        self.detector.set_interval(config.interval());
        self.detector.set_sensitivity(config.sensitivity);
        self.controller
            .set_settings(MagnifierSettings::from(config));
        tracing::debug!(
            interval_ms = config.time_interval_ms,
            sensitivity = config.sensitivity,
            magnification = config.magnification,
            over_magnification = config.over_magnification,
            "Shake cursor reconfigured"
        );
    }

    /// Route one pointer motion.
    ///
    /// Motion with buttons held, warps, and motion while another component
    /// constrains the pointer break the shake history instead of feeding it.
    /// Returns true when this motion completed a shake.
    pub fn pointer_motion(&mut self, event: &PointerMotionEvent, constrained: bool) -> bool {
        self.controller.set_cursor_pos(event.position);

        if !event.buttons.is_empty() || event.warp || constrained {
            self.detector.reset();
            return false;
        }

        if self.detector.update(event.sample()) {
            self.controller.on_shake_detected(event.timestamp);
            return true;
        }
        false
    }

    /// Fire due timers.
    pub fn advance(&mut self, now: Duration) {
        self.controller.advance(now);
    }

    /// Forward an animation tick from the host.
    pub fn on_animation_value_changed(&mut self, value: f64, now: Duration) {
        self.controller.on_animation_value_changed(value, now);
    }

    pub fn set_cursor_hot_spot(&mut self, hot_spot: Point2D) {
        self.controller.set_cursor_hot_spot(hot_spot);
    }

    pub fn is_active(&self) -> bool {
        self.controller.is_active()
    }

    pub fn state(&self) -> MagnifierState {
        self.controller.state()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.controller.next_deadline()
    }

    pub fn detector(&self) -> &ShakeDetector {
        &self.detector
    }

    pub fn controller(&self) -> &MagnificationController<H> {
        &self.controller
    }

    pub fn host(&self) -> &H {
        self.controller.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.controller.host_mut()
    }
}
