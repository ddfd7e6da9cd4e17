use chrono::NaiveDate;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::{SkillError, SkillResult},
    utils::{clock::Clock, week::weeks_back},
};

use super::{
    api::TimeSheetApi,
    entities::{NewTimeEntry, RemoteId, TimeEntry, TimeSheetDetail, TimeSheetSummary},
};

/// High level access to a user's time sheets. Locating a week always takes two ordered calls:
/// the grid page for the week first, then the detail of the sheet found there.
pub struct TimeSheetClient<A> {
    api: A,
    clock: Box<dyn Clock>,
}

impl<A: TimeSheetApi> TimeSheetClient<A> {
    pub fn new(api: A, clock: Box<dyn Clock>) -> Self {
        Self { api, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub async fn entries_for_this_week(&self, auth_token: &str) -> SkillResult<Vec<TimeEntry>> {
        debug!("Preparing to get entries for this week");
        self.entries_for_week_of(auth_token, self.today()).await
    }

    /// Valid entries of the week containing `date`, ordered by date.
    #[instrument(skip(self, auth_token))]
    pub async fn entries_for_week_of(
        &self,
        auth_token: &str,
        date: NaiveDate,
    ) -> SkillResult<Vec<TimeEntry>> {
        let sheet = self.sheet_for_week_of(auth_token, date).await?;
        self.entries_for_sheet(auth_token, &sheet.time_sheet_id).await
    }

    /// Summary row of the sheet for the week containing `date`. This is the most recent row of
    /// the grid fetched `weeks_back` pages deep.
    pub async fn sheet_for_week_of(
        &self,
        auth_token: &str,
        date: NaiveDate,
    ) -> SkillResult<TimeSheetSummary> {
        let weeks_back = weeks_back(self.today(), date)?;

        let grid = self
            .api
            .time_sheet_grid(auth_token, weeks_back)
            .await
            .inspect_err(|e| error!("Error getting time sheet for week of {date}: {e}"))?;

        grid.grid
            .into_iter()
            .last()
            .ok_or(SkillError::EmptyGrid { weeks_back })
    }

    pub async fn sheet_detail(
        &self,
        auth_token: &str,
        time_sheet_id: &RemoteId,
    ) -> SkillResult<TimeSheetDetail> {
        self.api
            .time_sheet_detail(auth_token, time_sheet_id)
            .await
            .inspect_err(|e| error!("Error getting time sheet {time_sheet_id}: {e}"))
    }

    pub async fn entries_for_sheet(
        &self,
        auth_token: &str,
        time_sheet_id: &RemoteId,
    ) -> SkillResult<Vec<TimeEntry>> {
        let detail = self.sheet_detail(auth_token, time_sheet_id).await?;
        let entries = flatten_entries(&detail);
        info!("Sheet {time_sheet_id} has {} valid entries", entries.len());
        Ok(entries)
    }

    /// Logs a new entry. `project_id` has to be resolved by the caller. The echoed json is returned
    /// without checking what it says.
    pub async fn create_entry(
        &self,
        auth_token: &str,
        project_id: &RemoteId,
        time_sheet_id: &RemoteId,
        entry: &NewTimeEntry,
    ) -> SkillResult<serde_json::Value> {
        self.api
            .create_time_entry(auth_token, project_id, time_sheet_id, entry)
            .await
    }
}

/// Flattens every project's valid entries into one list sorted by date. Entries sharing a date
/// keep their original order. A valid entry without a date has nowhere to go and is dropped.
pub fn flatten_entries(detail: &TimeSheetDetail) -> Vec<TimeEntry> {
    let mut entries = detail
        .projects
        .iter()
        .flat_map(|project| {
            project
                .time_entries
                .iter()
                .filter(|entry| !entry.is_invalid())
                .filter_map(move |entry| {
                    let flattened = TimeEntry::from_raw(project, entry);
                    if flattened.is_none() {
                        warn!(
                            "Dropping undated entry {:?} of {}",
                            entry.subject,
                            project.display_name()
                        );
                    }
                    flattened
                })
        })
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.date);
    entries
}
