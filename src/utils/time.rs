use chrono::{Datelike, NaiveDate};

/// This is the standard way of saying a date out loud, e.g. `Wednesday, May 1st 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {}{} {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Hours as they should be spoken. Whole numbers drop the fraction.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{format_hours, format_long_date};

    #[test]
    fn test_long_date_ordinals() {
        let cases = [
            ((2024, 5, 1), "Wednesday, May 1st 2024"),
            ((2024, 5, 2), "Thursday, May 2nd 2024"),
            ((2024, 5, 3), "Friday, May 3rd 2024"),
            ((2024, 5, 4), "Saturday, May 4th 2024"),
            ((2024, 5, 11), "Saturday, May 11th 2024"),
            ((2024, 5, 12), "Sunday, May 12th 2024"),
            ((2024, 5, 13), "Monday, May 13th 2024"),
            ((2024, 5, 21), "Tuesday, May 21st 2024"),
            ((2024, 5, 22), "Wednesday, May 22nd 2024"),
            ((2024, 5, 23), "Thursday, May 23rd 2024"),
            ((2024, 5, 31), "Friday, May 31st 2024"),
        ];
        for ((y, m, d), expected) in cases {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(format_long_date(date), expected);
        }
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.0), "8");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(0.25), "0.25");
    }
}
