//! Shake gesture detection.
//!
//! Keeps a short history of direction-reversal points and decides, on each
//! new pointer sample, whether the recent motion is a shake.
//!
//! # Algorithm
//!
//! 1. **Prune** history entries that fall outside the trailing time window.
//! 2. **Collapse** the new sample into the last entry while the pointer keeps
//!    moving in the same direction on both axes, so history holds one entry
//!    per reversal rather than one per sample.
//! 3. **Measure** total path length and the bounding-box diagonal.
//! 4. **Gate** on a minimum diagonal to ignore tremor and trackpad noise.
//! 5. **Compare** `path / diagonal` against the sensitivity. A straight line
//!    scores 1.0; back-and-forth motion scores much higher.

use std::collections::VecDeque;
use std::time::Duration;

use shakecursor_pointer_model::geometry::Bounds;
use shakecursor_pointer_model::sample::PointerSample;

/// Smallest bounding-box diagonal (logical pixels) a shake can span.
pub const MIN_SHAKE_DIAGONAL: f64 = 100.0;

/// Per-axis movement below this counts as movement in either direction.
pub const DIRECTION_TOLERANCE: f64 = 1.0;

/// Default trailing window.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Default path-to-diagonal ratio required for a shake.
pub const DEFAULT_SENSITIVITY: f64 = 4.0;

/// Outcome of feeding one sample to the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeVerdict {
    /// The sample continued the current direction and replaced the last entry.
    Collapsed,
    /// The motion region is smaller than [`MIN_SHAKE_DIAGONAL`].
    TooSmall { diagonal: f64 },
    /// The path is not wiggly enough.
    BelowSensitivity { factor: f64 },
    /// A shake was recognized; history has been cleared.
    Shake { factor: f64 },
}

impl ShakeVerdict {
    pub fn is_shake(&self) -> bool {
        matches!(self, ShakeVerdict::Shake { .. })
    }
}

/// Windowed shake gesture detector.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    interval: Duration,
    sensitivity: f64,
    history: VecDeque<PointerSample>,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_SENSITIVITY)
    }
}

impl ShakeDetector {
    pub fn new(interval: Duration, sensitivity: f64) -> Self {
        Self {
            interval,
            sensitivity,
            history: VecDeque::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Set the trailing window. Applies from the next sample.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Set the shake factor threshold. Applies from the next sample.
    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = sensitivity;
    }

    /// Forget all motion. Call when the stream is discontinuous.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Number of reversal points currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Reversal points currently held, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &PointerSample> + '_ {
        self.history.iter()
    }

    /// Feed one sample; returns true exactly when it completes a shake.
    pub fn update(&mut self, sample: PointerSample) -> bool {
        self.analyze(sample).is_shake()
    }

    /// Feed one sample and report why it did or did not complete a shake.
    pub fn analyze(&mut self, sample: PointerSample) -> ShakeVerdict {
        self.prune(sample.timestamp);

        if self.continues_direction(&sample) {
            if let Some(last) = self.history.back_mut() {
                *last = sample;
            }
            tracing::trace!(len = self.history.len(), "Collapsed pointer sample");
            return ShakeVerdict::Collapsed;
        }

        self.history.push_back(sample);

        let path_length: f64 = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .map(|(a, b)| a.position.distance_to(&b.position))
            .sum();

        let diagonal = Bounds::enclosing(self.history.iter().map(|s| &s.position))
            .map(|bounds| bounds.diagonal())
            .unwrap_or(0.0);

        if diagonal < MIN_SHAKE_DIAGONAL {
            return ShakeVerdict::TooSmall { diagonal };
        }

        let factor = path_length / diagonal;
        if factor > self.sensitivity {
            tracing::debug!(
                factor,
                diagonal,
                reversals = self.history.len(),
                "Shake detected"
            );
            self.history.clear();
            ShakeVerdict::Shake { factor }
        } else {
            ShakeVerdict::BelowSensitivity { factor }
        }
    }

    /// Drop the oldest entries that are `interval` or more behind `now`.
    fn prune(&mut self, now: Duration) {
        let keep_from = self
            .history
            .iter()
            .position(|entry| now.saturating_sub(entry.timestamp) < self.interval)
            .unwrap_or(self.history.len());
        if keep_from > 0 {
            self.history.drain(..keep_from);
            tracing::trace!(pruned = keep_from, "Pruned stale pointer history");
        }
    }

    /// Whether `sample` keeps moving the same way as the last two entries.
    fn continues_direction(&self, sample: &PointerSample) -> bool {
        let len = self.history.len();
        if len < 2 {
            return false;
        }
        let prev = &self.history[len - 2].position;
        let last = &self.history[len - 1].position;

        let (before_x, before_y) = prev.delta_to(last);
        let (after_x, after_y) = last.delta_to(&sample.position);
        same_sign(before_x, after_x) && same_sign(before_y, after_y)
    }
}

/// Both deltas point the same way, treating tiny movement as either way.
fn same_sign(a: f64, b: f64) -> bool {
    (a >= -DIRECTION_TOLERANCE && b >= -DIRECTION_TOLERANCE)
        || (a <= DIRECTION_TOLERANCE && b <= DIRECTION_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(interval_ms: u64, sensitivity: f64) -> ShakeDetector {
        ShakeDetector::new(Duration::from_millis(interval_ms), sensitivity)
    }

    #[test]
    fn test_same_sign_dead_zone() {
        assert!(same_sign(5.0, 3.0));
        assert!(same_sign(-5.0, -3.0));
        assert!(same_sign(0.5, -0.5));
        assert!(same_sign(-1.0, 50.0));
        assert!(same_sign(1.0, -50.0));
        assert!(!same_sign(5.0, -3.0));
        assert!(!same_sign(-1.5, 1.5));
    }

    #[test]
    fn test_first_two_samples_always_append() {
        let mut d = detector(1000, 2.0);
        assert_eq!(
            d.analyze(PointerSample::at_ms(0.0, 0.0, 0)),
            ShakeVerdict::TooSmall { diagonal: 0.0 }
        );
        d.update(PointerSample::at_ms(10.0, 0.0, 10));
        assert_eq!(d.history_len(), 2);
    }

    #[test]
    fn test_same_direction_collapses() {
        let mut d = detector(1000, 2.0);
        d.update(PointerSample::at_ms(0.0, 0.0, 0));
        d.update(PointerSample::at_ms(10.0, 0.0, 10));
        assert_eq!(
            d.analyze(PointerSample::at_ms(20.0, 0.5, 20)),
            ShakeVerdict::Collapsed
        );
        assert_eq!(d.history_len(), 2);
        let last = d.history().last().copied().unwrap();
        assert_eq!(last, PointerSample::at_ms(20.0, 0.5, 20));
    }

    #[test]
    fn test_reversal_appends() {
        let mut d = detector(1000, 2.0);
        d.update(PointerSample::at_ms(0.0, 0.0, 0));
        d.update(PointerSample::at_ms(10.0, 0.0, 10));
        d.update(PointerSample::at_ms(-10.0, 0.0, 20));
        assert_eq!(d.history_len(), 3);
    }

    #[test]
    fn test_prune_removes_stale_prefix() {
        let mut d = detector(100, 2.0);
        d.update(PointerSample::at_ms(0.0, 0.0, 0));
        d.update(PointerSample::at_ms(10.0, 0.0, 50));
        // Exactly one interval after the first entry: it goes, the second stays.
        d.update(PointerSample::at_ms(0.0, 0.0, 100));
        let stamps: Vec<_> = d.history().map(|s| s.timestamp.as_millis()).collect();
        assert_eq!(stamps, vec![50, 100]);
    }

    #[test]
    fn test_zero_interval_keeps_single_entry() {
        let mut d = detector(0, 2.0);
        for (i, x) in [0.0, 300.0, 0.0, 300.0].into_iter().enumerate() {
            assert!(!d.update(PointerSample::at_ms(x, 0.0, i as u64)));
            assert_eq!(d.history_len(), 1);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut d = detector(1000, 2.0);
        d.update(PointerSample::at_ms(0.0, 0.0, 0));
        d.update(PointerSample::at_ms(10.0, 0.0, 10));
        d.reset();
        assert_eq!(d.history_len(), 0);
    }

    #[test]
    fn test_shake_clears_history() {
        let mut d = detector(1000, 2.0);
        let samples = [(0.0, 0), (100.0, 10), (-100.0, 20), (100.0, 30)];
        let verdicts: Vec<_> = samples
            .iter()
            .map(|&(x, t)| d.analyze(PointerSample::at_ms(x, 0.0, t)))
            .collect();

        assert!(matches!(verdicts[2], ShakeVerdict::BelowSensitivity { .. }));
        match verdicts[3] {
            ShakeVerdict::Shake { factor } => assert!((factor - 2.5).abs() < 1e-9),
            other => panic!("expected shake, got {other:?}"),
        }
        assert_eq!(d.history_len(), 0);
    }

    #[test]
    fn test_setters_apply_to_next_update() {
        let mut d = ShakeDetector::default();
        assert_eq!(d.interval(), DEFAULT_INTERVAL);
        assert_eq!(d.sensitivity(), DEFAULT_SENSITIVITY);

        let samples = [(0.0, 0), (100.0, 10), (-100.0, 20)];
        for &(x, t) in &samples {
            d.update(PointerSample::at_ms(x, 0.0, t));
        }
        d.set_sensitivity(2.0);
        d.set_interval(Duration::from_millis(500));
        assert!(d.update(PointerSample::at_ms(100.0, 0.0, 30)));
    }
}
