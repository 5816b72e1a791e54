//! The boundary between the magnification controller and its host.
//!
//! The host animates magnification values, owns the magnified cursor visual
//! and the default system cursor, keeps render resources, and observes
//! property changes. The controller only issues requests; animation ticks
//! come back through [`MagnificationController::on_animation_value_changed`].
//!
//! [`MagnificationController::on_animation_value_changed`]:
//! crate::controller::MagnificationController::on_animation_value_changed

use std::time::Duration;

use shakecursor_pointer_model::geometry::Point2D;

/// Interpolation curve for a scale animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    InOutCubic,
}

/// A request to interpolate the magnification between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAnimation {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

/// An externally observed property that changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MagnificationChange {
    TargetMagnification(f64),
    CurrentMagnification(f64),
    CursorPos(Point2D),
    CursorHotSpot(Point2D),
}

/// Rendering, animation, and observation capabilities the controller drives.
pub trait MagnifierHost {
    /// Start animating, replacing any animation already running.
    fn start_animation(&mut self, animation: ScaleAnimation);

    /// Hide the default system cursor.
    fn hide_cursor(&mut self);

    /// Restore the default system cursor.
    fn show_cursor(&mut self);

    /// Build the magnified cursor visual, rendered at `theme_scale` pixel ratio.
    fn create_cursor_item(&mut self, theme_scale: f64, position: Point2D);

    fn destroy_cursor_item(&mut self);

    fn set_cursor_item_scale(&mut self, scale: f64);

    fn set_cursor_item_position(&mut self, position: Point2D);

    /// Allocate the per-output render targets the magnified cursor is drawn into.
    fn init_render_resources(&mut self);

    /// Free render targets kept warm through the cooldown.
    fn release_render_resources(&mut self);

    /// Observe a property change.
    fn notify(&mut self, change: MagnificationChange);
}

/// A single recorded host request.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    StartAnimation(ScaleAnimation),
    HideCursor,
    ShowCursor,
    CreateCursorItem { theme_scale: f64, position: Point2D },
    DestroyCursorItem,
    SetCursorItemScale(f64),
    SetCursorItemPosition(Point2D),
    InitRenderResources,
    ReleaseRenderResources,
    Notify(MagnificationChange),
}

/// A host that only records what it was asked to do.
///
/// Useful for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Take all calls recorded so far.
    pub fn drain(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Animations requested so far.
    pub fn animations(&self) -> Vec<ScaleAnimation> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::StartAnimation(animation) => Some(*animation),
                _ => None,
            })
            .collect()
    }

    /// Notifications delivered so far.
    pub fn notifications(&self) -> Vec<MagnificationChange> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Notify(change) => Some(*change),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(*call)).count()
    }
}

impl MagnifierHost for RecordingHost {
    fn start_animation(&mut self, animation: ScaleAnimation) {
        self.calls.push(HostCall::StartAnimation(animation));
    }

    fn hide_cursor(&mut self) {
        self.calls.push(HostCall::HideCursor);
    }

    fn show_cursor(&mut self) {
        self.calls.push(HostCall::ShowCursor);
    }

    fn create_cursor_item(&mut self, theme_scale: f64, position: Point2D) {
        self.calls.push(HostCall::CreateCursorItem {
            theme_scale,
            position,
        });
    }

    fn destroy_cursor_item(&mut self) {
        self.calls.push(HostCall::DestroyCursorItem);
    }

    fn set_cursor_item_scale(&mut self, scale: f64) {
        self.calls.push(HostCall::SetCursorItemScale(scale));
    }

    fn set_cursor_item_position(&mut self, position: Point2D) {
        self.calls.push(HostCall::SetCursorItemPosition(position));
    }

    fn init_render_resources(&mut self) {
        self.calls.push(HostCall::InitRenderResources);
    }

    fn release_render_resources(&mut self) {
        self.calls.push(HostCall::ReleaseRenderResources);
    }

    fn notify(&mut self, change: MagnificationChange) {
        self.calls.push(HostCall::Notify(change));
    }
}
