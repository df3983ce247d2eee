//! Trello REST records, trimmed to the fields the bot reads.

use serde::{Deserialize, Serialize};

/// A board member
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

/// A card, as returned by card creation or embedded in a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub id_members: Vec<String>,
}

impl Card {
    pub fn has_member(&self, member_id: &str) -> bool {
        self.id_members.iter().any(|id| id == member_id)
    }
}

/// A list with its open cards
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardList {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewCard<'a> {
    pub name: &'a str,
    pub id_list: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct MemberValue<'a> {
    pub value: &'a str,
}

/// Public link for a card id or short link
pub fn card_url(card_id: &str) -> String {
    format!("https://trello.com/c/{}", card_id)
}
