use std::time::Duration;

use proptest::prelude::*;
use shakecursor_core::detector::{ShakeDetector, MIN_SHAKE_DIAGONAL};
use shakecursor_pointer_model::sample::PointerSample;

fn detector(interval_ms: u64, sensitivity: f64) -> ShakeDetector {
    ShakeDetector::new(Duration::from_millis(interval_ms), sensitivity)
}

proptest! {
    #[test]
    fn small_regions_never_shake(
        points in prop::collection::vec((0.0f64..70.0, 0.0f64..70.0), 1..200),
        sensitivity in -1.0f64..10.0,
    ) {
        let mut d = detector(1000, sensitivity);
        for (i, (x, y)) in points.into_iter().enumerate() {
            prop_assert!(!d.update(PointerSample::at_ms(x, y, i as u64)));
        }
    }

    #[test]
    fn straight_lines_never_shake(
        start in (-500.0f64..500.0, -500.0f64..500.0),
        direction in (-1.0f64..1.0, -1.0f64..1.0),
        steps in prop::collection::vec(0.0f64..50.0, 1..100),
        sensitivity in 1.0f64..10.0,
    ) {
        let mut d = detector(10_000, sensitivity);
        let mut along = 0.0;
        for (i, step) in steps.into_iter().enumerate() {
            along += step;
            let x = start.0 + direction.0 * along;
            let y = start.1 + direction.1 * along;
            prop_assert!(!d.update(PointerSample::at_ms(x, y, i as u64)));
        }
    }

    #[test]
    fn same_direction_history_stays_at_two(
        steps in prop::collection::vec((0.0f64..20.0, -0.9f64..20.0), 2..200),
    ) {
        let mut d = detector(10_000, 4.0);
        let (mut x, mut y) = (0.0, 0.0);
        for (i, (dx, dy)) in steps.into_iter().enumerate() {
            x += dx;
            y += dy;
            d.update(PointerSample::at_ms(x, y, i as u64));
            prop_assert!(d.history_len() <= 2);
        }
    }

    #[test]
    fn history_only_holds_samples_inside_window(
        interval_ms in 1u64..500,
        moves in prop::collection::vec((0u64..200, -300.0f64..300.0, -300.0f64..300.0), 1..150),
    ) {
        let mut d = detector(interval_ms, 1000.0);
        let interval = Duration::from_millis(interval_ms);
        let mut now = 0;
        for (gap, x, y) in moves {
            now += gap;
            let sample = PointerSample::at_ms(x, y, now);
            d.update(sample);
            for entry in d.history() {
                prop_assert!(sample.timestamp - entry.timestamp < interval);
            }
        }
    }

    #[test]
    fn zigzag_triggers_once_ratio_exceeds_sensitivity(
        amplitude in MIN_SHAKE_DIAGONAL..1000.0,
        whole in 1u32..6,
    ) {
        // Every segment spans the full amplitude, so after n segments the
        // shake factor is exactly n.
        let sensitivity = f64::from(whole) + 0.5;
        let mut d = detector(1000, sensitivity);
        let mut first_shake = None;
        for i in 0..12u64 {
            let x = if i % 2 == 0 { 0.0 } else { amplitude };
            if d.update(PointerSample::at_ms(x, 0.0, i * 10)) {
                first_shake = Some(i);
                break;
            }
        }
        prop_assert_eq!(first_shake, Some(u64::from(whole) + 1));
        prop_assert_eq!(d.history_len(), 0);
    }
}
