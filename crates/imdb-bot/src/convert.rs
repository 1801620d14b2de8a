//! Conversion from lookup results to teloxide types

#[cfg(test)]
#[path = "convert_tests.rs"]
mod convert_tests;

use imdb_client::SearchStatus;
use imdb_types::{InlineResultItem, LinkButton};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult, InlineQueryResultPhoto,
};
use tracing::warn;
use url::Url;

use crate::answer::ResultsButton;

/// Start parameter attached to the results button.
pub fn start_parameter(status: SearchStatus) -> &'static str {
    match status {
        SearchStatus::Ok => "noerror2",
        SearchStatus::NotConfigured => "error1",
    }
}

/// Button shown above the inline results.
pub fn results_button(text: &str, start_parameter: &str) -> ResultsButton {
    ResultsButton::new(text, start_parameter)
}

/// Keyboard with one button that opens inline mode in the current chat.
pub fn search_keyboard(text: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::switch_inline_query_current_chat(
        text.to_string(),
        String::new(),
    )]])
}

/// Convert result cards, skipping those Telegram would reject.
pub fn inline_results(items: Vec<InlineResultItem>) -> Vec<InlineQueryResult> {
    items.into_iter().filter_map(photo_result).collect()
}

/// Convert one card into a photo result.
///
/// Returns `None` when the photo or thumbnail URL does not parse. A card whose
/// link button URL does not parse is kept without its keyboard.
pub fn photo_result(item: InlineResultItem) -> Option<InlineQueryResult> {
    let photo_url = match Url::parse(&item.photo_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Invalid photo URL '{}': {}", item.photo_url, e);
            return None;
        }
    };

    let thumb_url = match Url::parse(&item.thumbnail_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Invalid thumb URL '{}': {}", item.thumbnail_url, e);
            return None;
        }
    };

    let mut result = InlineQueryResultPhoto::new(item.id, photo_url, thumb_url);
    result.photo_width = item.photo_width;
    result.photo_height = item.photo_height;
    result.title = Some(item.title);
    result.description = Some(item.description);
    result.reply_markup = link_keyboard(item.button);

    Some(InlineQueryResult::Photo(result))
}

fn link_keyboard(button: LinkButton) -> Option<InlineKeyboardMarkup> {
    match Url::parse(&button.url) {
        Ok(url) => Some(InlineKeyboardMarkup::new([[InlineKeyboardButton::url(
            button.text,
            url,
        )]])),
        Err(e) => {
            warn!("Invalid button URL '{}': {}", button.url, e);
            None
        }
    }
}
