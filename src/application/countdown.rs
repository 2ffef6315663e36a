use crate::domain::analysis::CountdownState;
use crate::domain::market::timeframe::Timeframe;
use chrono::{DateTime, Duration, Utc};

/// Time remaining until the bar that opened at `last_bar_timestamp` closes.
///
/// Stateless: callers recompute on every tick against the current clock.
pub struct CountdownCalculator;

impl CountdownCalculator {
    pub fn compute(
        timeframe: Timeframe,
        last_bar_timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> CountdownState {
        let timeframe_seconds = timeframe.seconds();
        let next_boundary = last_bar_timestamp
            .checked_add_signed(Duration::seconds(timeframe_seconds))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let remaining_ms = (next_boundary - now).num_milliseconds().max(0);

        CountdownState {
            timeframe_seconds,
            last_bar_timestamp,
            next_boundary,
            remaining_seconds: remaining_ms as f64 / 1000.0,
        }
    }

    pub fn now(timeframe: Timeframe, last_bar_timestamp: DateTime<Utc>) -> CountdownState {
        Self::compute(timeframe, last_bar_timestamp, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_hour_example() {
        let state =
            CountdownCalculator::compute(Timeframe::OneHour, t0(), t0() + Duration::seconds(1500));

        assert_eq!(state.remaining_seconds, 2100.0);
        assert_eq!(state.minutes_seconds(), (35, 0));
        assert_eq!(state.to_string(), "35m 0s");
        assert_eq!(state.next_boundary, t0() + Duration::hours(1));
    }

    #[test]
    fn test_clamped_after_boundary() {
        for late in [3600, 3601, 10_000] {
            let state = CountdownCalculator::compute(
                Timeframe::OneHour,
                t0(),
                t0() + Duration::seconds(late),
            );
            assert_eq!(state.remaining_seconds, 0.0);
            assert!(state.is_closed());
            assert_eq!(state.progress(), 1.0);
        }
    }

    #[test]
    fn test_truncates_fractional_seconds() {
        let now = t0() + Duration::milliseconds(10_400);
        let state = CountdownCalculator::compute(Timeframe::OneMin, t0(), now);
        assert!((state.remaining_seconds - 49.6).abs() < 1e-9);
        assert_eq!(state.whole_seconds(), 49);
        assert_eq!(state.to_string(), "0m 49s");
    }

    #[test]
    fn test_weekly_boundary() {
        let state = CountdownCalculator::compute(Timeframe::OneWeek, t0(), t0());
        assert_eq!(state.whole_seconds(), 604_800);
        assert_eq!(state.minutes_seconds(), (10_080, 0));
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_boundary_saturates_at_end_of_time() {
        let end = DateTime::<Utc>::MAX_UTC;
        let state = CountdownCalculator::compute(Timeframe::OneWeek, end, t0());
        assert_eq!(state.next_boundary, end);
        assert!(state.remaining_seconds > 0.0);
    }

    #[test]
    fn test_clock_before_bar_open() {
        // A skewed clock can sit before the bar's own timestamp
        let state =
            CountdownCalculator::compute(Timeframe::FiveMin, t0(), t0() - Duration::seconds(30));
        assert_eq!(state.whole_seconds(), 330);
        assert_eq!(state.progress(), 0.0);
    }
}
