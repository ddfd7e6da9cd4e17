//! Voice platform adapter. [Skill::handle] takes one inbound event and produces the response for
//! it; nothing is kept between events except what the platform round-trips in the session.

pub mod request;
pub mod response;
pub mod slots;

use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::SkillConfig,
    errors::{SkillError, SkillResult},
    narration::{describe_entry, narrate},
    tcube::{
        api::TimeSheetApi,
        client::TimeSheetClient,
        entities::{NewTimeEntry, TimeEntry},
    },
    utils::time::{format_hours, format_long_date},
};

use request::{Intent, SkillEvent, SkillRequest};
use response::SkillResponse;
use slots::{date_slot, date_slot_or_today, hours_slot, text_slot, PROJECT_SLOT, SUBJECT_SLOT};

pub const GET_TIME_ENTRY_ON_DATE: &str = "GetTimeEntryOnDate";
pub const GET_WEEK: &str = "GetWeek";
pub const GET_THIS_WEEK: &str = "GetThisWeek";
pub const LOG_TIME: &str = "LogTime";
pub const HELP: &str = "AMAZON.HelpIntent";
pub const REPEAT: &str = "AMAZON.RepeatIntent";
pub const STOP: &str = "AMAZON.StopIntent";
pub const CANCEL: &str = "AMAZON.CancelIntent";

pub const WELCOME: &str = "Welcome to T Cube! You're all logged in.";
pub const HELP_SPEECH: &str =
    "You can ask me what you worked on this week, during the week of a date, or on a single day.";
pub const HELP_REPROMPT: &str = "What would you like to know?";
pub const LINK_ACCOUNT: &str = "We're going to need to link your tech-know-suss account first!";
pub const REMOTE_FAILURE: &str = "Something went wrong talking to t cube!";
pub const NO_ENTRIES_FOR_WEEK: &str = "Looks like you haven't entered any entries for this week!";
pub const NO_ENTRIES_FOR_DAY: &str = "Looks like you don't have any entries for that day!";
pub const FUTURE_DATE: &str = "I can only look up days that have already started.";
pub const UNCLEAR_SLOT: &str = "I didn't catch which date you meant.";
pub const UNCLEAR_ENTRY: &str =
    "I need a project, a number of hours and a subject to log time.";
pub const GOODBYE: &str = "Bye!";
pub const UNHANDLED: &str = "I'm not sure how to help with that";

pub struct Skill<A> {
    config: SkillConfig,
    client: TimeSheetClient<A>,
}

impl<A: TimeSheetApi> Skill<A> {
    pub fn new(config: SkillConfig, client: TimeSheetClient<A>) -> Self {
        Self { config, client }
    }

    /// Handles a single event. The only error returned to the host is an event addressed to
    /// another application; every other failure becomes something to say.
    #[instrument(skip_all)]
    pub async fn handle(&self, event: &SkillEvent) -> SkillResult<SkillResponse> {
        self.verify_application(event)?;

        let response = match &event.request {
            SkillRequest::LaunchRequest => self.launch(event),
            SkillRequest::IntentRequest { intent } => {
                info!("Handling intent {}", intent.name);
                self.handle_intent(event, intent).await
            }
            SkillRequest::SessionEndedRequest { reason } => {
                debug!("Session ended {reason:?}");
                Ok(SkillResponse::tell(GOODBYE))
            }
            SkillRequest::Unknown => Ok(SkillResponse::tell(UNHANDLED)),
        };

        Ok(response.unwrap_or_else(recover))
    }

    fn verify_application(&self, event: &SkillEvent) -> SkillResult<()> {
        let Some(expected) = &self.config.app_id else {
            return Ok(());
        };
        match event.application_id() {
            Some(id) if id == expected => Ok(()),
            other => {
                warn!("Rejecting event for application {other:?}");
                Err(SkillError::InvalidApplicationId(
                    other.unwrap_or_default().into(),
                ))
            }
        }
    }

    /// The override wins over whatever the session carries.
    fn auth_token<'a>(&'a self, event: &'a SkillEvent) -> SkillResult<&'a str> {
        self.config
            .auth_token_override
            .as_deref()
            .or_else(|| event.access_token())
            .ok_or(SkillError::MissingAuthToken)
    }

    fn launch(&self, event: &SkillEvent) -> SkillResult<SkillResponse> {
        self.auth_token(event)?;
        Ok(SkillResponse::ask(WELCOME, HELP_REPROMPT))
    }

    async fn handle_intent(&self, event: &SkillEvent, intent: &Intent) -> SkillResult<SkillResponse> {
        match intent.name.as_str() {
            GET_TIME_ENTRY_ON_DATE => self.entry_on_date(event, intent).await,
            GET_WEEK => self.week(event, intent).await,
            GET_THIS_WEEK => self.this_week(event).await,
            LOG_TIME => self.log_time(event, intent).await,
            HELP | REPEAT => Ok(replay(event)),
            STOP | CANCEL => Ok(SkillResponse::tell(GOODBYE)),
            _ => Ok(SkillResponse::tell(UNHANDLED)),
        }
    }

    async fn entry_on_date(&self, event: &SkillEvent, intent: &Intent) -> SkillResult<SkillResponse> {
        let token = self.auth_token(event)?;
        let date = date_slot(intent, self.client.today())?;

        let entries = self.client.entries_for_week_of(token, date).await?;

        Ok(match entries.iter().find(|entry| entry.date == date) {
            Some(entry) => SkillResponse::tell(describe_entry(entry, true)),
            None => SkillResponse::tell(NO_ENTRIES_FOR_DAY),
        })
    }

    async fn week(&self, event: &SkillEvent, intent: &Intent) -> SkillResult<SkillResponse> {
        let token = self.auth_token(event)?;
        let date = date_slot(intent, self.client.today())?;
        let formatted_date = format_long_date(date);

        let entries = self.client.entries_for_week_of(token, date).await?;

        Ok(week_response(
            &entries,
            format!("Alright, I've got your entries for the week of {formatted_date}!"),
            format!("Your work on the week of {formatted_date}"),
        ))
    }

    async fn this_week(&self, event: &SkillEvent) -> SkillResult<SkillResponse> {
        let token = self.auth_token(event)?;

        let entries = self.client.entries_for_this_week(token).await?;

        Ok(week_response(
            &entries,
            "Alright, I've got your entries for this week! ".into(),
            "Your work week".into(),
        ))
    }

    /// Logging needs the sheet id and the project id. Both are looked up before anything is
    /// posted: the sheet from the grid, the project by name from the sheet detail.
    async fn log_time(&self, event: &SkillEvent, intent: &Intent) -> SkillResult<SkillResponse> {
        let token = self.auth_token(event)?;
        let date = date_slot_or_today(intent, self.client.today())?;
        let hours = hours_slot(intent)?;
        let subject = text_slot(intent, SUBJECT_SLOT)?;
        let project_name = text_slot(intent, PROJECT_SLOT)?;

        let sheet = self.client.sheet_for_week_of(token, date).await?;
        let detail = self.client.sheet_detail(token, &sheet.time_sheet_id).await?;

        let Some((project, project_id)) = detail
            .projects
            .iter()
            .filter(|p| p.is_called(&project_name))
            .find_map(|p| p.project_id.as_ref().map(|id| (p, id)))
        else {
            info!("No project called {project_name} on sheet {}", sheet.time_sheet_id);
            return Ok(SkillResponse::tell(format!(
                "I couldn't find a project called {project_name} on that time sheet."
            )));
        };

        let entry = NewTimeEntry {
            date,
            hours,
            subject,
        };
        self.client
            .create_entry(token, project_id, &sheet.time_sheet_id, &entry)
            .await?;

        Ok(SkillResponse::tell(format!(
            "Okay, I logged {} hours for {} on {}.",
            format_hours(hours),
            project.display_name(),
            format_long_date(date)
        )))
    }
}

fn week_response(entries: &[TimeEntry], intro: String, title: String) -> SkillResponse {
    let days = narrate(entries);
    if days.is_empty() {
        return SkillResponse::tell(NO_ENTRIES_FOR_WEEK);
    }

    let (speech, content) = days.iter().fold((intro, String::new()), |(speech, content), day| {
        (
            speech + &day.recommended_speech,
            content + &day.recommended_card_content,
        )
    });
    SkillResponse::tell_with_card(speech, title, content)
}

/// Says again whatever was said last, or the help text on a fresh session.
fn replay(event: &SkillEvent) -> SkillResponse {
    let attributes = event.attributes();
    let speech = attributes
        .and_then(|a| a.speech_output.clone())
        .unwrap_or_else(|| HELP_SPEECH.into());
    let reprompt = attributes
        .and_then(|a| a.reprompt_speech.clone())
        .unwrap_or_else(|| HELP_REPROMPT.into());
    SkillResponse::ask(speech, reprompt)
}

fn recover(error: SkillError) -> SkillResponse {
    match error {
        SkillError::MissingAuthToken => SkillResponse::tell_with_link_account_card(LINK_ACCOUNT),
        SkillError::WeekOutOfRange { .. } => SkillResponse::tell(FUTURE_DATE),
        SkillError::InvalidSlot { ref slot, .. } if slot == slots::DATE_SLOT => {
            warn!("{error}");
            SkillResponse::tell(UNCLEAR_SLOT)
        }
        SkillError::InvalidSlot { .. } => {
            warn!("{error}");
            SkillResponse::tell(UNCLEAR_ENTRY)
        }
        e => {
            error!("Error: {e:?}");
            SkillResponse::tell(REMOTE_FAILURE)
        }
    }
}
