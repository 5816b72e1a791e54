//! Magnification state machine.
//!
//! Converts shake events into a debounced magnification target:
//!
//! ```text
//! Idle --shake--> Magnified --2s quiet--> Deflating --reaches 1.0--> Cooldown --5s--> Idle
//!                   ^  |shake                 |shake                    |shake
//!                   |  +--- target += over ---+                         |
//!                   +---------------------------------------------------+
//! ```
//!
//! Every shake restarts the deflate timer. The cooldown keeps render
//! resources alive briefly so repeated shakes don't reallocate them.

use std::time::Duration;

use shakecursor_common::clock::SingleShotTimer;
use shakecursor_common::config::ShakeConfig;
use shakecursor_pointer_model::geometry::Point2D;

use crate::host::{Easing, MagnificationChange, MagnifierHost, ScaleAnimation};

/// Length of every magnification animation. Not scaled by global animation
/// speed: this is feedback, not decoration.
pub const SCALE_ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Quiet period after the last shake before magnification deflates.
pub const DEFLATE_DELAY: Duration = Duration::from_millis(2000);

/// How long render resources outlive a full deflate.
pub const COOLDOWN_DURATION: Duration = Duration::from_millis(5000);

/// Unmagnified scale.
pub const NO_MAGNIFICATION: f64 = 1.0;

/// Magnification levels used by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifierSettings {
    /// Target after the first shake.
    pub magnification: f64,
    /// Added to the target by each further shake. Uncapped.
    pub over_magnification: f64,
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        Self::from(&ShakeConfig::default())
    }
}

impl From<&ShakeConfig> for MagnifierSettings {
    fn from(config: &ShakeConfig) -> Self {
        Self {
            magnification: config.magnification,
            over_magnification: config.over_magnification,
        }
    }
}

impl MagnifierSettings {
    /// Pixel ratio for the magnified cursor image.
    pub fn max_cursor_scale(&self) -> f64 {
        self.magnification + ShakeConfig::SHARP_ESCALATIONS * self.over_magnification
    }
}

/// Coarse controller state, derived from magnification values and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagnifierState {
    /// Nothing magnified, no timers pending.
    Idle,
    /// Target above 1.0; deflate timer pending.
    Magnified,
    /// Animating back towards 1.0.
    Deflating,
    /// Back at 1.0 with render resources still held.
    Cooldown,
}

/// Drives cursor magnification from shake events and timer expirations.
pub struct MagnificationController<H: MagnifierHost> {
    host: H,
    settings: MagnifierSettings,
    target_magnification: f64,
    current_magnification: f64,
    deflate_timer: SingleShotTimer,
    cooldown_timer: SingleShotTimer,
    cursor_item: bool,
    render_resources: bool,
    cursor_pos: Point2D,
    cursor_hot_spot: Point2D,
}

impl<H: MagnifierHost> MagnificationController<H> {
    pub fn new(host: H, settings: MagnifierSettings) -> Self {
        Self {
            host,
            settings,
            target_magnification: NO_MAGNIFICATION,
            current_magnification: NO_MAGNIFICATION,
            deflate_timer: SingleShotTimer::new(DEFLATE_DELAY),
            cooldown_timer: SingleShotTimer::new(COOLDOWN_DURATION),
            cursor_item: false,
            render_resources: false,
            cursor_pos: Point2D::ORIGIN,
            cursor_hot_spot: Point2D::ORIGIN,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> MagnifierSettings {
        self.settings
    }

    /// Replace magnification levels. Takes effect on the next shake.
    pub fn set_settings(&mut self, settings: MagnifierSettings) {
        self.settings = settings;
    }

    pub fn target_magnification(&self) -> f64 {
        self.target_magnification
    }

    pub fn current_magnification(&self) -> f64 {
        self.current_magnification
    }

    pub fn cursor_pos(&self) -> Point2D {
        self.cursor_pos
    }

    pub fn cursor_hot_spot(&self) -> Point2D {
        self.cursor_hot_spot
    }

    /// Whether the host still needs to give this feature per-frame attention.
    ///
    /// Tracks the displayed magnification, not the target: right after a
    /// shake and before the first animation tick, [`state`](Self::state) is
    /// already `Magnified` while this still returns false.
    pub fn is_active(&self) -> bool {
        self.current_magnification != NO_MAGNIFICATION || self.cooldown_timer.is_active()
    }

    pub fn state(&self) -> MagnifierState {
        let at_rest = self.current_magnification == NO_MAGNIFICATION;
        if self.target_magnification != NO_MAGNIFICATION {
            MagnifierState::Magnified
        } else if !at_rest {
            MagnifierState::Deflating
        } else if self.cooldown_timer.is_active() {
            MagnifierState::Cooldown
        } else {
            MagnifierState::Idle
        }
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.deflate_timer.deadline(), self.cooldown_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer whose deadline is at or before `now`.
    pub fn advance(&mut self, now: Duration) {
        if self.deflate_timer.fire_if_due(now) {
            self.on_deflate_timeout();
        }
        if self.cooldown_timer.fire_if_due(now) {
            self.on_cooldown_timeout();
        }
    }

    /// React to a recognized shake at `now`.
    pub fn on_shake_detected(&mut self, now: Duration) {
        let magnification = if self.target_magnification == NO_MAGNIFICATION {
            self.settings.magnification
        } else {
            self.target_magnification + self.settings.over_magnification
        };

        self.animate_to(magnification);
        self.deflate_timer.start(now);
    }

    /// The quiet period after the last shake elapsed.
    pub fn on_deflate_timeout(&mut self) {
        self.deflate_timer.stop();
        tracing::debug!(from = self.target_magnification, "Deflating cursor");
        self.animate_to(NO_MAGNIFICATION);
    }

    /// One animation tick delivered by the host at `now`.
    pub fn on_animation_value_changed(&mut self, value: f64, now: Duration) {
        let changed = value != self.current_magnification;

        if value == NO_MAGNIFICATION {
            self.current_magnification = NO_MAGNIFICATION;
            if self.cursor_item {
                self.host.destroy_cursor_item();
                self.host.show_cursor();
                self.cursor_item = false;
            }
            self.cooldown_timer.start(now);
        } else {
            if !self.render_resources {
                tracing::debug!("Allocating cursor render resources");
                self.host.init_render_resources();
                self.render_resources = true;
            }
            self.current_magnification = value;
            self.cooldown_timer.stop();

            if !self.cursor_item {
                self.host.hide_cursor();
                self.host
                    .create_cursor_item(self.settings.max_cursor_scale(), self.cursor_pos);
                self.cursor_item = true;
            }
            self.host.set_cursor_item_scale(value);
        }

        if changed {
            self.host
                .notify(MagnificationChange::CurrentMagnification(value));
        }
    }

    /// The post-deflate grace period elapsed.
    pub fn on_cooldown_timeout(&mut self) {
        self.cooldown_timer.stop();
        if self.render_resources {
            tracing::debug!("Releasing cursor render resources");
            self.host.release_render_resources();
            self.render_resources = false;
        }
    }

    /// Track the pointer position; a live magnified cursor follows it.
    pub fn set_cursor_pos(&mut self, pos: Point2D) {
        if pos == self.cursor_pos {
            return;
        }
        self.cursor_pos = pos;
        if self.cursor_item {
            self.host.set_cursor_item_position(pos);
        }
        self.host.notify(MagnificationChange::CursorPos(pos));
    }

    /// Track the hot spot of the current cursor image.
    pub fn set_cursor_hot_spot(&mut self, hot_spot: Point2D) {
        if hot_spot == self.cursor_hot_spot {
            return;
        }
        self.cursor_hot_spot = hot_spot;
        self.host
            .notify(MagnificationChange::CursorHotSpot(hot_spot));
    }

    /// Restore the default cursor and release everything held for the host.
    pub fn shutdown(&mut self) {
        self.deflate_timer.stop();
        self.cooldown_timer.stop();
        if self.cursor_item {
            self.host.destroy_cursor_item();
            self.host.show_cursor();
            self.cursor_item = false;
        }
        if self.render_resources {
            self.host.release_render_resources();
            self.render_resources = false;
        }
    }

    fn animate_to(&mut self, magnification: f64) {
        if self.target_magnification == magnification {
            return;
        }

        self.host.start_animation(ScaleAnimation {
            from: self.current_magnification,
            to: magnification,
            duration: SCALE_ANIMATION_DURATION,
            easing: Easing::InOutCubic,
        });

        self.target_magnification = magnification;
        tracing::debug!(magnification, "Target magnification changed");
        self.host
            .notify(MagnificationChange::TargetMagnification(magnification));
    }
}

impl<H: MagnifierHost> Drop for MagnificationController<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
