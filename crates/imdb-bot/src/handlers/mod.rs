//! Update handlers: private text, inline queries, chosen inline results

use std::sync::Arc;

use imdb_client::ImdbClient;
use imdb_types::ResultId;
use teloxide::prelude::*;
use teloxide::types::{ChosenInlineResult, InlineQuery, ParseMode};
use tracing::{debug, info, warn};

use crate::answer::InlineAnswer;
use crate::config::MessagesConfig;
use crate::convert;
use crate::errors::{BotError, HandlerResult, absorb};
use crate::health::AppState;

/// Results requested from the search endpoint per inline query.
const SEARCH_PAGE_LIMIT: u32 = 10;

/// Dependencies shared by every handler
#[derive(Clone)]
pub struct BotState {
    pub imdb: Arc<ImdbClient>,
    pub messages: Arc<MessagesConfig>,
}

impl BotState {
    pub fn new(imdb: ImdbClient, messages: MessagesConfig) -> Self {
        Self {
            imdb: Arc::new(imdb),
            messages: Arc::new(messages),
        }
    }
}

/// Count a failure before handing it to the dispatcher.
async fn track(health: &AppState, result: HandlerResult) -> HandlerResult {
    if result.is_err() {
        health.increment_errors().await;
    }
    result
}

/// Handle text messages: point the user at inline mode
pub async fn handle_text_message(bot: Bot, msg: Message, state: BotState, health: AppState) -> HandlerResult {
    health.increment_messages_received().await;

    if msg.from.as_ref().is_some_and(|user| user.is_bot) {
        return Ok(());
    }

    debug!(chat_id = msg.chat.id.0, "Replying to text message");

    let mut req = bot.send_message(msg.chat.id, state.messages.private_message.clone());
    req.parse_mode = Some(ParseMode::Html);
    req.reply_markup = Some(convert::search_keyboard(&state.messages.search_button_text).into());

    track(&health, absorb("send_message", req.await)).await
}

/// Handle inline queries: search and answer with photo cards
pub async fn handle_inline_query(bot: Bot, query: InlineQuery, state: BotState, health: AppState) -> HandlerResult {
    health.increment_inline_queries().await;
    let user_id = query.from.id.0;

    if query.query.trim().is_empty() {
        debug!(user_id, "Empty inline query");

        let mut answer = InlineAnswer::new(query.id.clone(), Vec::new());
        answer.cache_time = Some(0);
        answer.is_personal = Some(true);
        answer.button = Some(convert::results_button(
            &state.messages.no_query_button_text,
            &state.messages.no_query_start_parameter,
        ));

        return track(&health, absorb("answer_inline_query", answer.send_with(&bot).await)).await;
    }

    // Only the first page is ever answered; next_offset is never set.
    if !query.offset.is_empty() {
        debug!(user_id, offset = %query.offset, "Ignoring follow-up page request");
        return Ok(());
    }

    debug!(user_id, query = %query.query, "Inline search");

    let page = match state.imdb.search(&query.query, 0, SEARCH_PAGE_LIMIT).await {
        Ok(page) => page,
        Err(e) => return track(&health, Err(BotError::from(e))).await,
    };

    let projected = page.items.len();
    let results = convert::inline_results(page.items);
    let served = results.len();
    if served < projected {
        warn!(projected, served, notice = %page.notice, "Some cards were rejected during conversion");
    }

    let mut answer = InlineAnswer::new(query.id.clone(), results);
    answer.cache_time = Some(0);
    answer.is_personal = Some(true);
    answer.next_offset = page.next_offset;
    answer.button = Some(convert::results_button(
        &page.notice,
        convert::start_parameter(page.status),
    ));

    let result = absorb("answer_inline_query", answer.send_with(&bot).await);
    if result.is_ok() {
        health.add_results_served(served).await;
    }
    track(&health, result).await
}

/// Handle chosen inline results: replace the sent card with the detail caption
pub async fn handle_chosen_inline_result(
    bot: Bot,
    chosen: ChosenInlineResult,
    state: BotState,
    health: AppState,
) -> HandlerResult {
    let Some(result_id) = ResultId::parse(&chosen.result_id) else {
        debug!(result_id = %chosen.result_id, "Ignoring result id of unknown shape");
        return Ok(());
    };

    let Some(inline_message_id) = chosen.inline_message_id.as_deref() else {
        warn!(result_id = %result_id, "Chosen result has no inline message to edit");
        return Ok(());
    };

    let title_id = result_id.title_id();
    info!(user_id = chosen.from.id.0, title_id, "Inline result chosen");

    let caption = match state.imdb.detail(title_id).await {
        Ok(caption) => caption,
        Err(e) => return track(&health, Err(BotError::from(e))).await,
    };

    let mut req = bot.edit_message_text_inline(inline_message_id, caption.html);
    req.parse_mode = Some(ParseMode::Html);

    let result = absorb("edit_message_text_inline", req.await);
    if result.is_ok() {
        health.increment_details_rendered().await;
    }
    track(&health, result).await
}
