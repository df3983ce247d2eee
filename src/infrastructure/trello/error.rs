//! Trello client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrelloError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Trello API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Decode error: {0}")]
    Decode(String),
}
