use async_trait::async_trait;
use reqwest::RequestBuilder;
use tracing::{error, info};

use crate::{
    config::SkillConfig,
    errors::{SkillError, SkillResult},
};

use super::entities::{NewTimeEntry, RemoteId, TimeSheetDetail, WeekGrid};

/// Raw T Cube endpoints. Every call is a single request/response exchange authenticated with the
/// caller's bearer token. Nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimeSheetApi: Send + Sync {
    /// `GET TimeSheet/{weeks_back}`
    async fn time_sheet_grid(&self, auth_token: &str, weeks_back: u32) -> SkillResult<WeekGrid>;

    /// `GET TimeEntryModel/{time_sheet_id}`
    async fn time_sheet_detail(
        &self,
        auth_token: &str,
        time_sheet_id: &RemoteId,
    ) -> SkillResult<TimeSheetDetail>;

    /// `POST TimeEntryModel/{project_id}/{time_sheet_id}`. Returns whatever the server echoed.
    async fn create_time_entry(
        &self,
        auth_token: &str,
        project_id: &RemoteId,
        time_sheet_id: &RemoteId,
        entry: &NewTimeEntry,
    ) -> SkillResult<serde_json::Value>;
}

/// [TimeSheetApi] over HTTP.
pub struct HttpTimeSheetApi {
    client: reqwest::Client,
    config: SkillConfig,
}

impl HttpTimeSheetApi {
    pub fn new(config: SkillConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: SkillConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    async fn send(request: RequestBuilder) -> SkillResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SkillError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl TimeSheetApi for HttpTimeSheetApi {
    async fn time_sheet_grid(&self, auth_token: &str, weeks_back: u32) -> SkillResult<WeekGrid> {
        let url = self.config.api_url(&format!("TimeSheet/{weeks_back}"));
        let body = Self::send(self.client.get(url).bearer_auth(auth_token))
            .await
            .inspect_err(|e| error!("Error getting time sheet grid for {weeks_back} weeks {e}"))?;

        info!("Successfully received grid");
        Ok(serde_json::from_str(&body)?)
    }

    async fn time_sheet_detail(
        &self,
        auth_token: &str,
        time_sheet_id: &RemoteId,
    ) -> SkillResult<TimeSheetDetail> {
        let url = self.config.api_url(&format!("TimeEntryModel/{time_sheet_id}"));
        let body = Self::send(self.client.get(url).bearer_auth(auth_token))
            .await
            .inspect_err(|e| error!("Error getting time sheet {time_sheet_id} {e}"))?;

        info!("Successfully received sheet {time_sheet_id}");
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_time_entry(
        &self,
        auth_token: &str,
        project_id: &RemoteId,
        time_sheet_id: &RemoteId,
        entry: &NewTimeEntry,
    ) -> SkillResult<serde_json::Value> {
        let url = self
            .config
            .api_url(&format!("TimeEntryModel/{project_id}/{time_sheet_id}"));
        let body = Self::send(self.client.post(url).bearer_auth(auth_token).json(entry))
            .await
            .inspect_err(|e| error!("Error creating time entry on {} {e}", entry.date))?;

        info!("Created time entry on {} for project {project_id}", entry.date);
        Ok(serde_json::from_str(&body)?)
    }
}
