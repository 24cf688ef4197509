//! Descriptive pattern detection

use crate::window::average_sleep;
use mindwell_core::{AlertCode, AlertThresholds, MoodPattern, MoodReading, MoodTrend};

/// Readings needed before frequency patterns are reported
pub const MIN_READINGS_FOR_FREQUENCY: usize = 7;

/// Score at or above which a reading counts as high
const HIGH_MOOD_SCORE: u8 = 8;

/// Average at or below which short sleep is reported alongside mood
const SLEEP_PATTERN_MOOD_CEILING: f64 = 5.0;

/// Derive patterns from the window, its trend and the raised alerts
pub fn detect_patterns(
    window: &[&MoodReading],
    trend: MoodTrend,
    average: Option<f64>,
    alerts: &[AlertCode],
    thresholds: &AlertThresholds,
) -> Vec<MoodPattern> {
    let mut patterns = Vec::new();
    let n = window.len();

    if n >= MIN_READINGS_FOR_FREQUENCY {
        let low = window
            .iter()
            .filter(|r| r.mood_score() <= thresholds.low_mood_threshold)
            .count();
        let high = window
            .iter()
            .filter(|r| r.mood_score() >= HIGH_MOOD_SCORE)
            .count();
        if low as f64 >= n as f64 * 0.4 {
            patterns.push(MoodPattern::FrequentLowMoods);
        }
        if high as f64 >= n as f64 * 0.6 {
            patterns.push(MoodPattern::GenerallyPositive);
        }
    }

    let stressed = alerts.contains(&AlertCode::HighStress);
    let drained = alerts.contains(&AlertCode::LowEnergy);
    match trend {
        MoodTrend::Declining if stressed => patterns.push(MoodPattern::DecliningWithElevatedStress),
        MoodTrend::Improving if stressed => patterns.push(MoodPattern::ImprovingDespiteStress),
        _ => {}
    }
    if trend == MoodTrend::Declining && drained {
        patterns.push(MoodPattern::DecliningWithLowEnergy);
    }

    if let (Some(sleep), Some(avg)) = (average_sleep(window), average) {
        if sleep < thresholds.short_sleep_hours && avg <= SLEEP_PATTERN_MOOD_CEILING {
            patterns.push(MoodPattern::ShortSleepWithLowMood);
        }
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::average_mood;
    use mindwell_core::MoodSubmission;

    fn readings(scores: &[i64]) -> Vec<MoodReading> {
        scores
            .iter()
            .map(|s| MoodSubmission::new("u1", *s).validate().unwrap())
            .collect()
    }

    #[test]
    fn test_frequency_patterns_need_seven_readings() {
        let t = AlertThresholds::default();
        let few = readings(&[2, 2, 2]);
        let window: Vec<&MoodReading> = few.iter().collect();
        assert!(detect_patterns(&window, MoodTrend::Stable, average_mood(&window), &[], &t)
            .is_empty());

        let many = readings(&[2, 3, 6, 2, 7, 6, 5]);
        let window: Vec<&MoodReading> = many.iter().collect();
        assert_eq!(
            detect_patterns(&window, MoodTrend::Stable, average_mood(&window), &[], &t),
            vec![MoodPattern::FrequentLowMoods]
        );

        let bright = readings(&[8, 9, 8, 10, 6, 8, 7]);
        let window: Vec<&MoodReading> = bright.iter().collect();
        assert_eq!(
            detect_patterns(&window, MoodTrend::Stable, average_mood(&window), &[], &t),
            vec![MoodPattern::GenerallyPositive]
        );
    }

    #[test]
    fn test_trend_alert_combinations() {
        let t = AlertThresholds::default();
        let r = readings(&[6, 5]);
        let window: Vec<&MoodReading> = r.iter().collect();
        let avg = average_mood(&window);

        assert_eq!(
            detect_patterns(
                &window,
                MoodTrend::Declining,
                avg,
                &[AlertCode::HighStress, AlertCode::LowEnergy],
                &t
            ),
            vec![
                MoodPattern::DecliningWithElevatedStress,
                MoodPattern::DecliningWithLowEnergy
            ]
        );
        assert_eq!(
            detect_patterns(&window, MoodTrend::Improving, avg, &[AlertCode::HighStress], &t),
            vec![MoodPattern::ImprovingDespiteStress]
        );
        assert!(detect_patterns(&window, MoodTrend::Stable, avg, &[AlertCode::HighStress], &t)
            .is_empty());
    }

    #[test]
    fn test_short_sleep_with_low_mood() {
        let t = AlertThresholds::default();
        let r = vec![
            MoodSubmission::new("u1", 4).with_sleep(4.5).validate().unwrap(),
            MoodSubmission::new("u1", 5).with_sleep(5.0).validate().unwrap(),
        ];
        let window: Vec<&MoodReading> = r.iter().collect();
        assert_eq!(
            detect_patterns(&window, MoodTrend::Stable, average_mood(&window), &[], &t),
            vec![MoodPattern::ShortSleepWithLowMood]
        );

        let rested = vec![MoodSubmission::new("u1", 4).with_sleep(8.0).validate().unwrap()];
        let window: Vec<&MoodReading> = rested.iter().collect();
        assert!(detect_patterns(&window, MoodTrend::Stable, average_mood(&window), &[], &t)
            .is_empty());
    }
}
