//! Trello REST API integration

mod client;
mod error;
mod types;

pub use client::{TrelloApi, TrelloClient, API_BASE};
pub use error::TrelloError;
pub use types::{card_url, Card, CardList, Member};
