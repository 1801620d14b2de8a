//! `answerInlineQuery` payload with a start-parameter results button
//!
//! teloxide's own `AnswerInlineQuery` serializes the results button kind
//! externally tagged (`{"StartParameter": ..}`), which the Bot API rejects.
//! This payload writes the button in the documented `start_parameter` form
//! and is sent through the same `Bot` as every other request.

use serde::Serialize;
use teloxide::Bot;
use teloxide::requests::{JsonRequest, Payload};
use teloxide::types::{InlineQueryResult, True};

/// Button shown above the inline results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsButton {
    pub text: String,
    pub start_parameter: String,
}

impl ResultsButton {
    pub fn new(text: impl Into<String>, start_parameter: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_parameter: start_parameter.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineAnswer {
    pub inline_query_id: String,
    pub results: Vec<InlineQueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_personal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<ResultsButton>,
}

impl Payload for InlineAnswer {
    type Output = True;

    const NAME: &'static str = "AnswerInlineQuery";
}

impl InlineAnswer {
    pub fn new(inline_query_id: impl Into<String>, results: Vec<InlineQueryResult>) -> Self {
        Self {
            inline_query_id: inline_query_id.into(),
            results,
            cache_time: None,
            is_personal: None,
            next_offset: None,
            button: None,
        }
    }

    /// Build the request; `.await` it to send.
    pub fn send_with(self, bot: &Bot) -> JsonRequest<Self> {
        JsonRequest::new(bot.clone(), self)
    }
}
