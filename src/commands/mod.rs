//! User-triggered page operations.
//!
//! Every operation takes the client and the page state, never returns an
//! error, and reports through [`crate::state::PageState::message`] (or the
//! action slot) plus an [`Outcome`](crate::state::Outcome).

pub mod action;
pub mod chat;
pub mod health;
pub mod knowledge;

use crate::api::ApiError;

pub const MSG_LOAD_FAILED: &str = "Failed to load data.";
pub const MSG_EMPTY_SOURCE: &str = "Enter some text to upload.";
pub const MSG_EMPTY_QUESTION: &str = "Enter a question.";
pub const MSG_UPLOADED: &str = "Document uploaded.";
pub const MSG_NOT_UTF8: &str = "Only UTF-8 text files are supported.";
pub const MSG_NO_QUERY: &str = "Ask a question first.";
pub const MSG_BAD_RATING: &str = "Rating must be between 1 and 5.";
pub const MSG_FEEDBACK_SAVED: &str = "Feedback recorded.";
pub const MSG_NETWORK: &str = "Network error. Please try again later.";

pub fn source_too_long_message(max: usize) -> String {
    format!("Text is limited to {} characters.", max)
}

/// User-facing text for a failed request.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Status { status, .. } => format!("server error ({})", status),
        _ => MSG_NETWORK.to_string(),
    }
}
