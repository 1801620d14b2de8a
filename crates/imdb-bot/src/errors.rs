//! Handler errors and Telegram error classification
//!
//! Some Bot API failures are expected in normal operation for an inline
//! bot: a slow search can outlive the inline query id, and picking the
//! same result twice re-sends an identical caption. Those are logged and
//! dropped; everything else reaches the dispatcher's error handler.

use imdb_client::ImdbError;
use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tracing::{debug, error, warn};

pub type HandlerResult = Result<(), BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] RequestError),

    #[error("IMDb lookup failed: {0}")]
    Imdb(#[from] ImdbError),
}

/// What to do with a failed Telegram request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// Expected failure; log and continue
    Ignore,
    /// Surface to the dispatcher
    Propagate,
}

/// Classify a `RequestError` raised by `operation`.
pub fn classify(operation: &str, err: &RequestError) -> ErrorOutcome {
    match err {
        RequestError::Api(ApiError::InvalidQueryId) => {
            warn!(operation, "Query ID is invalid or expired (answer within 10s)");
            ErrorOutcome::Ignore
        }
        // teloxide only recognises a lowercase "query id" in this description
        RequestError::Api(ApiError::Unknown(description)) if is_expired_query(description) => {
            warn!(operation, "Query ID is invalid or expired (answer within 10s)");
            ErrorOutcome::Ignore
        }
        RequestError::Api(ApiError::MessageNotModified) => {
            debug!(operation, "Message content is unchanged");
            ErrorOutcome::Ignore
        }
        RequestError::RetryAfter(secs) => {
            warn!(operation, retry_after = ?secs.duration(), "Flood control");
            ErrorOutcome::Propagate
        }
        RequestError::Network(_) | RequestError::Io(_) => {
            warn!(operation, error = %err, "Transport failure talking to Telegram");
            ErrorOutcome::Propagate
        }
        _ => {
            error!(operation, error = %err, "Telegram request failed");
            ErrorOutcome::Propagate
        }
    }
}

fn is_expired_query(description: &str) -> bool {
    description.to_ascii_lowercase().contains("query is too old")
}

/// Drop the response and apply [`classify`] to a failure.
pub fn absorb<T>(operation: &str, result: Result<T, RequestError>) -> HandlerResult {
    match result {
        Ok(_) => Ok(()),
        Err(err) => match classify(operation, &err) {
            ErrorOutcome::Ignore => Ok(()),
            ErrorOutcome::Propagate => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(err: ApiError) -> RequestError {
        RequestError::Api(err)
    }

    #[test]
    fn expired_query_is_ignored() {
        assert_eq!(
            classify("answer_inline_query", &api(ApiError::InvalidQueryId)),
            ErrorOutcome::Ignore
        );
    }

    #[test]
    fn expired_query_with_telegram_wording_is_ignored() {
        let err = api(ApiError::Unknown(
            "Bad Request: query is too old and response timeout expired or query ID is invalid"
                .to_string(),
        ));

        assert_eq!(classify("answer_inline_query", &err), ErrorOutcome::Ignore);
        assert!(absorb::<()>("answer_inline_query", Err(err)).is_ok());
    }

    #[test]
    fn unknown_api_errors_propagate() {
        let err = api(ApiError::Unknown("Bad Request: something else".to_string()));
        assert_eq!(classify("answer_inline_query", &err), ErrorOutcome::Propagate);
    }

    #[test]
    fn unchanged_message_is_ignored() {
        assert_eq!(
            classify("edit_message_text_inline", &api(ApiError::MessageNotModified)),
            ErrorOutcome::Ignore
        );
    }

    #[test]
    fn other_api_errors_propagate() {
        for err in [
            ApiError::BotBlocked,
            ApiError::MessageIsTooLong,
            ApiError::CantParseEntities("bad tag".to_string()),
        ] {
            assert_eq!(classify("send_message", &api(err)), ErrorOutcome::Propagate);
        }
    }

    #[test]
    fn absorb_passes_success_through() {
        assert!(absorb("send_message", Ok::<_, RequestError>(42)).is_ok());
    }

    #[test]
    fn absorb_swallows_ignored_errors() {
        let result = absorb::<()>("answer_inline_query", Err(api(ApiError::InvalidQueryId)));
        assert!(result.is_ok());
    }

    #[test]
    fn absorb_wraps_propagated_errors() {
        let result = absorb::<()>("send_message", Err(api(ApiError::ChatNotFound)));
        assert!(matches!(
            result,
            Err(BotError::Telegram(RequestError::Api(ApiError::ChatNotFound)))
        ));
    }

    #[test]
    fn imdb_errors_convert() {
        let err: BotError = ImdbError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        }
        .into();

        assert!(err.to_string().starts_with("IMDb lookup failed"));
    }
}
