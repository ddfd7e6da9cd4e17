use serde::Serialize;

use super::request::SessionAttributes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    Simple { title: String, content: String },
    /// Asks the user to link their account in the companion app.
    LinkAccount,
}

/// What the skill wants the device to say and show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillResponse {
    pub speech: String,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    pub should_end_session: bool,
}

impl SkillResponse {
    pub fn tell(speech: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            card: None,
            should_end_session: true,
        }
    }

    /// Keeps the session open and waits for an answer.
    pub fn ask(speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: Some(reprompt.into()),
            card: None,
            should_end_session: false,
        }
    }

    pub fn tell_with_card(
        speech: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            card: Some(Card::Simple {
                title: title.into(),
                content: content.into(),
            }),
            ..Self::tell(speech)
        }
    }

    pub fn tell_with_link_account_card(speech: impl Into<String>) -> Self {
        Self {
            card: Some(Card::LinkAccount),
            ..Self::tell(speech)
        }
    }

    /// Wire format expected by the voice platform.
    pub fn to_envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: "1.0",
            session_attributes: SessionAttributes {
                speech_output: Some(self.speech.clone()),
                reprompt_speech: self.reprompt.clone(),
            },
            response: ResponseBody {
                output_speech: OutputSpeech::plain(&self.speech),
                reprompt: self.reprompt.as_deref().map(|text| Reprompt {
                    output_speech: OutputSpeech::plain(text),
                }),
                card: self.card.as_ref().map(|card| match card {
                    Card::Simple { title, content } => CardBody::Simple {
                        title: title.clone(),
                        content: content.clone(),
                    },
                    Card::LinkAccount => CardBody::LinkAccount,
                }),
                should_end_session: self.should_end_session,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: &'static str,
    pub session_attributes: SessionAttributes,
    pub response: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardBody>,
    pub should_end_session: bool,
}

#[derive(Debug, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: &str) -> Self {
        Self {
            kind: "PlainText",
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum CardBody {
    Simple { title: String, content: String },
    LinkAccount,
}
