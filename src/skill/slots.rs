use chrono::{NaiveDate, Weekday};

use crate::errors::{SkillError, SkillResult};

use super::request::Intent;

pub const DATE_SLOT: &str = "Date";
pub const HOURS_SLOT: &str = "Hours";
pub const SUBJECT_SLOT: &str = "Subject";
pub const PROJECT_SLOT: &str = "Project";

fn invalid(slot: &str, value: Option<&str>) -> SkillError {
    SkillError::InvalidSlot {
        slot: slot.into(),
        value: value.map(Into::into),
    }
}

/// Reads a date slot. Besides plain days the platform sends `2024-W18` for "that week",
/// `2024-W18-WE` for its weekend and `PRESENT_REF` for "now".
pub fn parse_date_value(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    if value == "PRESENT_REF" {
        return Some(today);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let (year, rest) = value.split_once("-W")?;
    let year = year.parse::<i32>().ok()?;
    let (week, weekday) = match rest.strip_suffix("-WE") {
        Some(week) => (week, Weekday::Sat),
        None => (rest, Weekday::Mon),
    };
    NaiveDate::from_isoywd_opt(year, week.parse().ok()?, weekday)
}

pub fn date_slot(intent: &Intent, today: NaiveDate) -> SkillResult<NaiveDate> {
    let value = intent.slot(DATE_SLOT);
    value
        .and_then(|v| parse_date_value(v, today))
        .ok_or_else(|| invalid(DATE_SLOT, value))
}

/// Like [date_slot] but an unfilled slot means today.
pub fn date_slot_or_today(intent: &Intent, today: NaiveDate) -> SkillResult<NaiveDate> {
    match intent.slot(DATE_SLOT) {
        Some(_) => date_slot(intent, today),
        None => Ok(today),
    }
}

pub fn hours_slot(intent: &Intent) -> SkillResult<f64> {
    let value = intent.slot(HOURS_SLOT);
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|hours| hours.is_finite() && *hours > 0.)
        .ok_or_else(|| invalid(HOURS_SLOT, value))
}

pub fn text_slot(intent: &Intent, slot: &str) -> SkillResult<String> {
    intent
        .slot(slot)
        .map(Into::into)
        .ok_or_else(|| invalid(slot, None))
}
