use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::planner::constants::{DEFAULT_PLAN_SERVINGS, WEEK_START};

/// Configurable knobs for shopping list generation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub week_start: Weekday,
    pub default_plan_servings: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            week_start: WEEK_START,
            default_plan_servings: DEFAULT_PLAN_SERVINGS,
        }
    }
}

impl PlannerConfig {
    /// First day of the week containing `date`.
    pub fn week_of(&self, date: NaiveDate) -> NaiveDate {
        let offset = (7 + date.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;
        date - Duration::days(offset as i64)
    }

    /// Inclusive first and last day of the week containing `date`.
    pub fn week_bounds(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.week_of(date);
        (start, start + Duration::days(6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_monday() {
        let config = PlannerConfig::default();
        // 2026-10-19 is a Monday.
        assert_eq!(config.week_of(day(2026, 10, 19)), day(2026, 10, 19));
        assert_eq!(config.week_of(day(2026, 10, 22)), day(2026, 10, 19));
        assert_eq!(config.week_of(day(2026, 10, 25)), day(2026, 10, 19));
        assert_eq!(config.week_of(day(2026, 10, 26)), day(2026, 10, 26));
    }

    #[test]
    fn test_week_bounds() {
        let config = PlannerConfig::default();
        let (start, end) = config.week_bounds(day(2026, 10, 21));
        assert_eq!(start, day(2026, 10, 19));
        assert_eq!(end, day(2026, 10, 25));
    }

    #[test]
    fn test_sunday_start() {
        let config = PlannerConfig {
            week_start: Weekday::Sun,
            ..Default::default()
        };
        assert_eq!(config.week_of(day(2026, 10, 21)), day(2026, 10, 18));
        assert_eq!(config.week_of(day(2026, 10, 18)), day(2026, 10, 18));
    }
}
