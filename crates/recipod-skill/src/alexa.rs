//! Voice-platform request/response envelope.
//!
//! Only the parts the resolver needs are modelled; everything else in the
//! inbound JSON (session, context, user) is ignored. Responses use the
//! simple-card form: the text is both spoken and shown on a card titled
//! with the response label.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SkillError;
use crate::intent::Slots;
use crate::resolver::{IntentResolver, SkillResponse};

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub request: RequestBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// `IntentRequest`, `LaunchRequest`, `SessionEndedRequest`, ...
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, SlotBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotBody {
    #[serde(default)]
    pub name: String,
    /// Unset when the user did not fill the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SkillRequest {
    /// Intent name, or `""` for requests that carry no intent (launch,
    /// session end), which the resolver treats as unrecognized.
    pub fn intent_name(&self) -> &str {
        self.request
            .intent
            .as_ref()
            .map_or("", |intent| intent.name.as_str())
    }

    /// Filled slots only; unfilled ones are left out.
    pub fn slots(&self) -> Slots {
        self.request
            .intent
            .iter()
            .flat_map(|intent| intent.slots.iter())
            .filter_map(|(key, slot)| slot.value.clone().map(|value| (key.clone(), value)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

impl SkillResponseEnvelope {
    /// Speaks `text` and shows it on a card titled `title`, then ends the
    /// session.
    pub fn simple(title: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        SkillResponseEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: OutputSpeech {
                    kind: "PlainText".to_string(),
                    text: text.clone(),
                },
                card: Card {
                    kind: "Simple".to_string(),
                    title: title.into(),
                    content: text,
                },
                should_end_session: true,
            },
        }
    }
}

impl From<SkillResponse> for SkillResponseEnvelope {
    fn from(response: SkillResponse) -> Self {
        SkillResponseEnvelope::simple(response.label, response.text)
    }
}

/// Resolves an inbound envelope into an outbound one.
pub async fn dispatch(
    resolver: &IntentResolver,
    request: &SkillRequest,
) -> Result<SkillResponseEnvelope, SkillError> {
    tracing::debug!(
        kind = %request.request.kind,
        intent = request.intent_name(),
        "skill request"
    );
    let response = resolver
        .resolve(request.intent_name(), &request.slots())
        .await?;
    Ok(response.into())
}
