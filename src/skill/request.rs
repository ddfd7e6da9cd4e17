use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inbound voice platform event. Only the parts the skill reads are modelled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEvent {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: SkillRequest,
}

impl SkillEvent {
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| self.context.as_ref().and_then(|c| c.system.application.as_ref()))
            .map(|a| a.application_id.as_str())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.user.as_ref())
            .and_then(|u| u.access_token.as_deref())
    }

    pub fn attributes(&self) -> Option<&SessionAttributes> {
        self.session.as_ref().map(|s| &s.attributes)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub attributes: SessionAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    #[serde(default)]
    pub application: Option<Application>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
}

/// What was last said, carried between turns so help and repeat can replay it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt_speech: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum SkillRequest {
    LaunchRequest,
    IntentRequest {
        intent: Intent,
    },
    SessionEndedRequest {
        #[serde(default)]
        reason: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Value of a slot, if the user filled it.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|s| s.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{SkillEvent, SkillRequest};

    #[test]
    fn test_parse_intent_event() -> anyhow::Result<()> {
        let event: SkillEvent = serde_json::from_str(
            r#"{
                "version": "1.0",
                "session": {
                    "new": true,
                    "sessionId": "session",
                    "application": {"applicationId": "amzn1.ask.skill.tcube"},
                    "attributes": {},
                    "user": {"userId": "user", "accessToken": "token"}
                },
                "request": {
                    "type": "IntentRequest",
                    "requestId": "request",
                    "timestamp": "2024-05-01T12:00:00Z",
                    "intent": {
                        "name": "GetWeek",
                        "slots": {"Date": {"name": "Date", "value": "2024-W18"}}
                    }
                }
            }"#,
        )?;

        assert_eq!(event.application_id(), Some("amzn1.ask.skill.tcube"));
        assert_eq!(event.access_token(), Some("token"));
        let SkillRequest::IntentRequest { intent } = &event.request else {
            panic!("expected intent request");
        };
        assert_eq!(intent.name, "GetWeek");
        assert_eq!(intent.slot("Date"), Some("2024-W18"));
        assert_eq!(intent.slot("Hours"), None);
        Ok(())
    }

    #[test]
    fn test_parse_launch_without_session_user() -> anyhow::Result<()> {
        let event: SkillEvent = serde_json::from_str(
            r#"{
                "context": {"System": {"application": {"applicationId": "from-context"}}},
                "request": {"type": "LaunchRequest", "requestId": "request"}
            }"#,
        )?;

        assert!(matches!(event.request, SkillRequest::LaunchRequest));
        assert_eq!(event.application_id(), Some("from-context"));
        assert_eq!(event.access_token(), None);
        Ok(())
    }

    #[test]
    fn test_unknown_request_type() -> anyhow::Result<()> {
        let event: SkillEvent = serde_json::from_str(
            r#"{"request": {"type": "Display.ElementSelected", "token": "x"}}"#,
        )?;
        assert!(matches!(event.request, SkillRequest::Unknown));
        Ok(())
    }
}
