use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::errors::{SkillError, SkillResult};

/// Number of grid pages T Cube has to return, counted back from the current week, so that the
/// last page is the week containing `target`. Weeks start on Sunday, page 1 is the current week.
///
/// Dates after `today` can't be located by this scheme and are rejected.
pub fn weeks_back(today: NaiveDate, target: NaiveDate) -> SkillResult<u32> {
    if target > today {
        return Err(SkillError::WeekOutOfRange { today, target });
    }

    let days_since_target_week_start =
        i64::from(target.weekday().num_days_from_sunday()) + (today - target).num_days();
    let weeks = days_since_target_week_start / 7 + 1;

    debug!("Calculated we need {weeks} weeks back for {target} (today is {today})");

    u32::try_from(weeks).map_err(|_| SkillError::WeekOutOfRange { today, target })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use crate::errors::SkillError;

    use super::weeks_back;

    // Wednesday
    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    #[test]
    fn test_same_week_is_one() {
        // Sunday 28th through Wednesday 1st
        for days in 0..=3 {
            let target = TODAY - Duration::days(days);
            assert_eq!(weeks_back(TODAY, target).unwrap(), 1, "{target}");
        }
    }

    #[test]
    fn test_previous_weeks() {
        assert_eq!(weeks_back(TODAY, TODAY - Duration::days(7)).unwrap(), 2);
        assert_eq!(weeks_back(TODAY, TODAY - Duration::days(14)).unwrap(), 3);
        // Saturday right before the current week
        let saturday = NaiveDate::from_ymd_opt(2024, 4, 27).unwrap();
        assert_eq!(weeks_back(TODAY, saturday).unwrap(), 2);
    }

    #[test]
    fn test_weekly_quantized_for_every_weekday() {
        let saturday = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        for offset in 0..7 {
            let today = saturday - Duration::days(offset);
            assert_eq!(weeks_back(today, today).unwrap(), 1);
            assert_eq!(weeks_back(today, today - Duration::days(7)).unwrap(), 2);
            assert_eq!(weeks_back(today, today - Duration::days(14)).unwrap(), 3);
        }
    }

    #[test]
    fn test_future_date_rejected() {
        let result = weeks_back(TODAY, TODAY + Duration::days(1));
        assert!(matches!(result, Err(SkillError::WeekOutOfRange { .. })));
    }
}
