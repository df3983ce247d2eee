//! `trello <verb> <args>` parsing

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// `^trello\s+(\w+)\s?(.*)$` with ECMAScript class semantics: Unicode
/// whitespace, ASCII word characters, and `.` stopping at any line terminator.
pub const PATTERN: &str = concat!(
    r"^trello[\t\n\x0B\x0C\r \x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}\x{feff}]+",
    r"([0-9A-Za-z_]+)",
    r"[\t\n\x0B\x0C\r \x{a0}\x{1680}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}\x{feff}]?",
    r"([^\n\r\x{2028}\x{2029}]*)$",
);

static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PATTERN).expect("trello command pattern is valid"));

/// A recognised trello command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrelloCommand {
    /// `trello card <title>`
    Card { title: String },
    /// `trello show [username]`
    Show { username: Option<String> },
    /// `trello join <card-id> <username>`
    Join { card: String, username: String },
    /// `trello leave <card-id> <username>`
    Leave { card: String, username: String },
    /// Unknown verb or incomplete arguments
    Help,
}

impl TrelloCommand {
    /// Whether `text` is addressed to the trello plugin at all
    pub fn matches(text: &str) -> bool {
        COMMAND_RE.is_match(text)
    }

    /// `None` when the text does not match the command pattern
    pub fn parse(text: &str) -> Option<Self> {
        let caps = COMMAND_RE.captures(text)?;
        let verb = caps.get(1).map_or("", |m| m.as_str());
        let tail = caps.get(2).map_or("", |m| m.as_str());

        let command = match verb {
            "card" => TrelloCommand::Card {
                title: tail.to_string(),
            },
            "show" => {
                let username = tail.trim();
                TrelloCommand::Show {
                    username: (!username.is_empty()).then(|| username.to_string()),
                }
            }
            "join" => match card_and_user(tail) {
                Some((card, username)) => TrelloCommand::Join { card, username },
                None => TrelloCommand::Help,
            },
            "leave" => match card_and_user(tail) {
                Some((card, username)) => TrelloCommand::Leave { card, username },
                None => TrelloCommand::Help,
            },
            _ => TrelloCommand::Help,
        };
        Some(command)
    }
}

/// `<card-id> <username>`; anything after the second word is ignored
fn card_and_user(tail: &str) -> Option<(String, String)> {
    let mut pieces = tail.split_whitespace();
    let card = pieces.next()?;
    let username = pieces.next()?;
    Some((card.to_string(), username.to_string()))
}
