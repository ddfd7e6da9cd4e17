//! Turns flattened time entries into speech and card text.

use chrono::NaiveDate;

use crate::{
    tcube::entities::TimeEntry,
    utils::time::{format_hours, format_long_date},
};

/// Everything said and shown about a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayNarration {
    pub date: NaiveDate,
    pub formatted_date: String,
    /// One sentence per entry, each on its own line.
    pub speech_for_day: String,
    pub total_hours: f64,
    pub recommended_speech: String,
    pub recommended_card_content: String,
}

/// `On {date} you worked ...` or, with `include_date` off, `You worked ...`.
pub fn describe_entry(entry: &TimeEntry, include_date: bool) -> String {
    let lead = if include_date {
        format!("On {} you", format_long_date(entry.date))
    } else {
        "You".into()
    };
    format!(
        "{lead} worked {} hours for {}. Your entry's subject was \"{}\"",
        format_hours(entry.hours),
        entry.project,
        entry.subject
    )
}

pub fn total_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> f64 {
    entries.into_iter().map(|entry| entry.hours).sum()
}

/// Groups entries by calendar day, in the order each day first appears. Entries are expected to
/// be sorted already, as [flatten_entries](crate::tcube::client::flatten_entries) returns them.
pub fn group_by_day(entries: &[TimeEntry]) -> Vec<(NaiveDate, Vec<&TimeEntry>)> {
    let mut groups: Vec<(NaiveDate, Vec<&TimeEntry>)> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|(date, _)| *date == entry.date) {
            Some((_, group)) => group.push(entry),
            None => groups.push((entry.date, vec![entry])),
        }
    }
    groups
}

pub fn narrate(entries: &[TimeEntry]) -> Vec<DayNarration> {
    group_by_day(entries)
        .into_iter()
        .map(|(date, group)| {
            let formatted_date = format_long_date(date);
            let total_hours = total_hours(group.iter().copied());
            let speech_for_day = group
                .iter()
                .map(|entry| format!("\n{}.", describe_entry(entry, false)))
                .collect::<String>();

            DayNarration {
                recommended_speech: format!(
                    "\nHere's what you did on {formatted_date}: {speech_for_day}"
                ),
                recommended_card_content: format!(
                    "\n\n{formatted_date}: {} hours",
                    format_hours(total_hours)
                ),
                date,
                formatted_date,
                speech_for_day,
                total_hours,
            }
        })
        .collect()
}
