//! Shapes of the T Cube REST payloads, plus the flattened [TimeEntry] the rest of the skill works
//! with. T Cube uses PascalCase field names; anything we don't read is ignored.

use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier. T Cube sends these as numbers, but some endpoints quote them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteId::Number(v) => write!(f, "{v}"),
            RemoteId::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Response of `GET TimeSheet/{weeks}`. Rows are ordered oldest to newest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeekGrid {
    #[serde(default)]
    pub grid: Vec<TimeSheetSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheetSummary {
    #[serde(rename = "TimeSheetID")]
    pub time_sheet_id: RemoteId,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub total_hours: Option<f64>,
}

/// Response of `GET TimeEntryModel/{timeSheetId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeSheetDetail {
    #[serde(rename = "TimeSheetID", default)]
    pub time_sheet_id: Option<RemoteId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Project {
    #[serde(rename = "ProjectID", default)]
    pub project_id: Option<RemoteId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_entries: Vec<RawTimeEntry>,
}

impl Project {
    /// Name used in speech, `{company} - {project}`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.company_name, self.project_name)
    }

    /// Case-insensitive match against either the display name or the bare project name.
    pub fn is_called(&self, name: &str) -> bool {
        let name = name.trim();
        self.project_name.eq_ignore_ascii_case(name) || self.display_name().eq_ignore_ascii_case(name)
    }
}

/// Entry as stored by T Cube. Entries flagged invalid are often half filled, so every field may
/// come back `null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTimeEntry {
    #[serde(default, deserialize_with = "remote_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: f64,
    #[serde(default)]
    pub invalid_entry: Option<bool>,
}

impl RawTimeEntry {
    pub fn is_invalid(&self) -> bool {
        self.invalid_entry.unwrap_or(false)
    }
}

/// Accepts `2024-05-01`, `2024-05-01T00:00:00` and offset variants. Only the day matters.
fn remote_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(s) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    s.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date {s:?}")))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for `POST TimeEntryModel/{projectId}/{timeSheetId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTimeEntry {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub hours: f64,
    pub subject: String,
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }
}

/// A single valid entry of a time sheet, flattened out of its project.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub project: String,
    pub date: NaiveDate,
    pub subject: String,
    pub hours: f64,
}

impl TimeEntry {
    /// `None` when the entry has no date to be placed on.
    pub fn from_raw(project: &Project, entry: &RawTimeEntry) -> Option<Self> {
        Some(Self {
            project: project.display_name(),
            date: entry.date?,
            subject: entry.subject.clone(),
            hours: entry.hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{NewTimeEntry, RemoteId, TimeEntry, TimeSheetDetail, WeekGrid};

    #[test]
    fn test_parse_grid() -> anyhow::Result<()> {
        let grid: WeekGrid = serde_json::from_str(
            r#"{"Grid": [
                {"TimeSheetID": 11, "StartDate": "2024-04-21T00:00:00"},
                {"TimeSheetID": "12", "TotalHours": 32.5, "Status": "Open"}
            ], "Total": 2}"#,
        )?;
        assert_eq!(grid.grid.len(), 2);
        assert_eq!(grid.grid[0].time_sheet_id, RemoteId::Number(11));
        assert_eq!(grid.grid[1].time_sheet_id, RemoteId::Text("12".into()));
        assert_eq!(grid.grid[1].total_hours, Some(32.5));
        Ok(())
    }

    #[test]
    fn test_parse_detail() -> anyhow::Result<()> {
        let detail: TimeSheetDetail = serde_json::from_str(
            r#"{"TimeSheetID": 12, "Projects": [{
                "ProjectID": 7,
                "CompanyName": "Acme",
                "ProjectName": "Rockets",
                "TimeEntries": [
                    {"Date": "2024-05-01T00:00:00", "Subject": "Fins", "Hours": 4, "InvalidEntry": false},
                    {"Date": "2024-05-02", "Subject": "Fuel", "Hours": 2.5, "InvalidEntry": null},
                    {"Date": "2024-05-03T00:00:00-07:00", "Subject": "Oops", "Hours": 1, "InvalidEntry": true}
                ]
            }]}"#,
        )?;
        let project = &detail.projects[0];
        assert_eq!(project.project_id, Some(RemoteId::Number(7)));
        assert_eq!(project.time_entries.len(), 3);
        assert_eq!(
            project.time_entries[2].date,
            NaiveDate::from_ymd_opt(2024, 5, 3)
        );
        assert!(!project.time_entries[0].is_invalid());
        assert!(!project.time_entries[1].is_invalid());
        assert!(project.time_entries[2].is_invalid());
        Ok(())
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let detail = serde_json::from_str::<TimeSheetDetail>(
            r#"{"Projects": [{"CompanyName": "A", "ProjectName": "B",
                "TimeEntries": [{"Date": "yesterday", "Hours": 1}]}]}"#,
        );
        assert!(detail.is_err());
    }

    #[test]
    fn test_null_subject_on_valid_entry() -> anyhow::Result<()> {
        let detail: TimeSheetDetail = serde_json::from_str(
            r#"{"Projects": [{"CompanyName": "Acme", "ProjectName": "Rockets", "TimeEntries": [
                {"Date": "2024-05-01", "Subject": null, "Hours": 2, "InvalidEntry": false}
            ]}]}"#,
        )?;
        let project = &detail.projects[0];
        let entry = TimeEntry::from_raw(project, &project.time_entries[0]).unwrap();
        assert_eq!(entry.subject, "");
        assert_eq!(entry.hours, 2.);
        Ok(())
    }

    #[test]
    fn test_null_fields_on_invalid_entry() -> anyhow::Result<()> {
        let detail: TimeSheetDetail = serde_json::from_str(
            r#"{"Projects": [{"CompanyName": "Acme", "ProjectName": "Rockets", "TimeEntries": [
                {"Date": null, "Subject": null, "Hours": null, "InvalidEntry": true},
                {"Date": "2024-05-02", "Subject": "Fuel", "Hours": 1}
            ]}]}"#,
        )?;
        let entries = &detail.projects[0].time_entries;
        assert!(entries[0].is_invalid());
        assert_eq!(entries[0].date, None);
        assert_eq!(entries[0].hours, 0.);
        assert!(TimeEntry::from_raw(&detail.projects[0], &entries[0]).is_none());
        assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2024, 5, 2));
        Ok(())
    }

    #[test]
    fn test_null_project_names() -> anyhow::Result<()> {
        let detail: TimeSheetDetail = serde_json::from_str(
            r#"{"Projects": [{"ProjectID": 3, "CompanyName": null, "ProjectName": "Rockets",
                "TimeEntries": null}]}"#,
        )?;
        let project = &detail.projects[0];
        assert_eq!(project.company_name, "");
        assert_eq!(project.display_name(), " - Rockets");
        assert!(project.time_entries.is_empty());
        assert!(project.is_called("rockets"));
        Ok(())
    }

    #[test]
    fn test_project_display_name() -> anyhow::Result<()> {
        let detail: TimeSheetDetail = serde_json::from_str(
            r#"{"Projects": [{"CompanyName": "Technossus", "ProjectName": "Internal",
                "TimeEntries": [{"Date": "2024-05-01", "Subject": "Standup", "Hours": 1}]}]}"#,
        )?;
        let project = &detail.projects[0];
        let entry = TimeEntry::from_raw(project, &project.time_entries[0]).unwrap();
        assert_eq!(entry.project, "Technossus - Internal");
        assert!(project.is_called("internal"));
        assert!(project.is_called("technossus - internal"));
        assert!(!project.is_called("external"));
        Ok(())
    }

    #[test]
    fn test_new_entry_payload() -> anyhow::Result<()> {
        let entry = NewTimeEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            hours: 2.5,
            subject: "Reviews".into(),
        };
        assert_eq!(
            serde_json::to_value(&entry)?,
            serde_json::json!({"Date": "2024-05-01", "Hours": 2.5, "Subject": "Reviews"})
        );
        Ok(())
    }
}
