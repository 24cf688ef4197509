//! Window selection and window statistics

use chrono::{DateTime, Duration, Utc};
use mindwell_core::{MoodReading, MoodTrend, TrendConfig};

/// Readings observed within the trailing `window_days`, oldest first
///
/// Both bounds are inclusive and readings stamped after `now` are left out.
/// Readings are stably ordered by timestamp so out-of-order submissions still
/// evaluate chronologically.
pub fn select_window(
    history: &[MoodReading],
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<&MoodReading> {
    let cutoff = now.checked_sub_signed(Duration::days(i64::from(window_days)));
    let mut window: Vec<&MoodReading> = history
        .iter()
        .filter(|r| r.timestamp() <= now)
        .filter(|r| cutoff.map_or(true, |c| r.timestamp() >= c))
        .collect();
    window.sort_by_key(|r| r.timestamp());
    window
}

/// Arithmetic mean of mood scores; `None` for an empty window
pub fn average_mood(window: &[&MoodReading]) -> Option<f64> {
    mean(window.iter().map(|r| f64::from(r.mood_score())))
}

/// Mean hours slept across readings that report sleep
pub fn average_sleep(window: &[&MoodReading]) -> Option<f64> {
    mean(window.iter().filter_map(|r| r.sleep_hours()))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Classify the trend by comparing the earliest and latest segments
///
/// Fewer than two readings are always `Stable`.
pub fn classify_trend(window: &[&MoodReading], config: &TrendConfig) -> MoodTrend {
    let n = window.len();
    if n < 2 {
        return MoodTrend::Stable;
    }

    let segments = config.segments.max(1);
    let k = n.div_ceil(segments).clamp(1, n / 2);

    let (earliest, latest) = match (
        average_mood(&window[..k]),
        average_mood(&window[n - k..]),
    ) {
        (Some(e), Some(l)) => (e, l),
        _ => return MoodTrend::Stable,
    };

    if latest - earliest > config.delta {
        MoodTrend::Improving
    } else if earliest - latest > config.delta {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mindwell_core::MoodSubmission;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
    }

    fn days_ago(score: i64, days: i64) -> MoodReading {
        MoodSubmission::new("u1", score)
            .at(now() - Duration::days(days))
            .validate_at(now())
            .unwrap()
    }

    fn scores(window: &[&MoodReading]) -> Vec<u8> {
        window.iter().map(|r| r.mood_score()).collect()
    }

    #[test]
    fn test_window_filters_and_orders() {
        let history = vec![days_ago(5, 1), days_ago(2, 10), days_ago(7, 3), days_ago(9, 0)];
        let window = select_window(&history, 7, now());
        assert_eq!(scores(&window), vec![7, 5, 9]);
    }

    #[test]
    fn test_window_cutoff_inclusive() {
        let history = vec![days_ago(4, 7), days_ago(6, 8)];
        let window = select_window(&history, 7, now());
        assert_eq!(scores(&window), vec![4]);
    }

    #[test]
    fn test_future_readings_excluded() {
        let history = vec![days_ago(2, -365), days_ago(6, 1), days_ago(3, -1)];
        assert_eq!(scores(&select_window(&history, 7, now())), vec![6]);
        assert_eq!(select_window(&history, u32::MAX, now()).len(), 1);
    }

    #[test]
    fn test_zero_and_huge_windows() {
        let history = vec![days_ago(4, 0), days_ago(6, 2)];
        assert_eq!(select_window(&history, 0, now()).len(), 1);
        assert_eq!(select_window(&history, u32::MAX, now()).len(), 2);
    }

    #[test]
    fn test_average() {
        let history = vec![days_ago(8, 2), days_ago(7, 1), days_ago(8, 0)];
        let window = select_window(&history, 7, now());
        let avg = average_mood(&window).unwrap();
        assert!((avg - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(average_mood(&[]), None);
    }

    #[test]
    fn test_average_sleep_skips_missing() {
        let with_sleep = MoodSubmission::new("u1", 5)
            .with_sleep(5.0)
            .at(now())
            .validate_at(now())
            .unwrap();
        let history = vec![with_sleep, days_ago(5, 1)];
        let window = select_window(&history, 7, now());
        assert_eq!(average_sleep(&window), Some(5.0));
    }

    #[test]
    fn test_trend_classification() {
        let config = TrendConfig::default();
        let check = |values: &[i64]| {
            let history: Vec<MoodReading> = values
                .iter()
                .enumerate()
                .map(|(i, s)| days_ago(*s, (values.len() - i) as i64))
                .collect();
            let window = select_window(&history, 30, now());
            classify_trend(&window, &config)
        };

        assert_eq!(check(&[8, 7, 8]), MoodTrend::Stable);
        assert_eq!(check(&[2, 3, 4, 6, 7, 8]), MoodTrend::Improving);
        assert_eq!(check(&[9, 8, 6, 5, 3, 2]), MoodTrend::Declining);
        assert_eq!(check(&[5]), MoodTrend::Stable);
        assert_eq!(check(&[5, 7]), MoodTrend::Improving);
        assert_eq!(check(&[5, 6]), MoodTrend::Stable);
    }

    #[test]
    fn test_trend_delta_is_strict() {
        let config = TrendConfig {
            delta: 2.0,
            segments: 3,
        };
        let history = vec![days_ago(4, 2), days_ago(5, 1), days_ago(6, 0)];
        let window = select_window(&history, 7, now());
        assert_eq!(classify_trend(&window, &config), MoodTrend::Stable);
    }
}
