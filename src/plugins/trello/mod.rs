//! Trello plugin - create, list, join and leave cards from chat
//!
//! ```text
//! trello card <card title>
//! trello show [user-name]
//! trello join <card-id> <user-name>
//! trello leave <card-id> <user-name>
//! ```

mod command;


pub use command::{TrelloCommand, PATTERN};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::application::errors::{BotError, ConfigError};
use crate::domain::entities::Message;
use crate::infrastructure::config::TrelloConfig;
use crate::infrastructure::trello::{card_url, Member, TrelloApi, TrelloClient};
use crate::plugins::trait_def::Plugin;

const HELP: &str = "add and read Trello cards\n\
    trello card <card title> - create a new card\n\
    trello join <card-id> <user-name> - add user to card\n\
    trello leave <card-id> <user-name> - remove user from card\n\
    trello show - show all open cards in the default list\n\
    trello show <user-name> - show all open cards this user has joined";

/// Board members keyed by username
pub type MemberMap = HashMap<String, Member>;

pub struct TrelloPlugin {
    api: Arc<dyn TrelloApi>,
    board: String,
    list: String,
    create_in: String,
    /// Result of the most recent successful member fetch
    members: RwLock<MemberMap>,
}

impl TrelloPlugin {
    /// Build the plugin with a real Trello client
    pub fn new(config: &TrelloConfig) -> Result<Self, BotError> {
        let client = TrelloClient::with_base_url(&config.key, &config.token, config.api_base())
            .map_err(|e| BotError::Plugin(e.to_string()))?;
        Self::with_api(config, Arc::new(client)).map_err(BotError::from)
    }

    /// Build the plugin on top of any `TrelloApi` implementation
    pub fn with_api(
        config: &TrelloConfig,
        api: Arc<dyn TrelloApi>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            api,
            board: config.board.clone(),
            list: config.list.clone(),
            create_in: config.create_in_list().to_string(),
            members: RwLock::new(MemberMap::new()),
        })
    }

    /// Prime the member mapping once at startup
    pub async fn warm_up(&self) {
        let members = self.fetch_members().await;
        info!("Trello board {} has {} known members", self.board, members.len());
    }

    /// Last fetched member mapping
    pub fn members(&self) -> MemberMap {
        self.members
            .read()
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    pub fn default_list(&self) -> &str {
        &self.list
    }

    pub fn create_list(&self) -> &str {
        &self.create_in
    }

    /// Run one parsed command; always yields reply text
    pub async fn execute(&self, command: TrelloCommand) -> String {
        match command {
            TrelloCommand::Card { title } => self.create_card(&title).await,
            TrelloCommand::Show { username } => self.show_cards(username.as_deref()).await,
            TrelloCommand::Join { card, username } => self.join_card(&card, &username).await,
            TrelloCommand::Leave { card, username } => self.leave_card(&card, &username).await,
            TrelloCommand::Help => HELP.to_string(),
        }
    }

    async fn create_card(&self, title: &str) -> String {
        match self.api.create_card(title, &self.create_in).await {
            Ok(card) => {
                info!("trello card created");
                format!("Card created at {}", card.url)
            }
            Err(e) => {
                warn!(error = %e, "trello card creation failed");
                format!("There was an error creating the card: {}", e)
            }
        }
    }

    async fn show_cards(&self, username: Option<&str>) -> String {
        let members = self.fetch_members().await;
        let member_id = username
            .and_then(|name| members.get(name))
            .map(|member| member.id.as_str());

        let list = match self.api.open_cards(&self.list).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "fetching trello list {} failed", self.list);
                return format!("There was an error fetching the default list: {}", e);
            }
        };

        if let (Some(name), None) = (username, member_id) {
            return format!("Trello doesn't know who {} is.", name);
        }

        let cards: String = list
            .cards
            .iter()
            .filter(|card| member_id.map_or(true, |id| card.has_member(id)))
            .map(|card| format!("- {}\n", card.name))
            .collect();

        match (username, cards.is_empty()) {
            (None, true) => format!("{} has no cards.", list.name),
            (Some(name), true) => format!("{} has nothing to do.", name),
            (Some(name), false) => format!("Cards for {} in {}:\n{}", name, list.name, cards),
            (None, false) => format!("Cards in {}:\n{}", list.name, cards),
        }
    }

    /// Unknown usernames are passed through as raw member ids, so
    /// `trello join <card> <member-id>` works for people the board
    /// listing does not show.
    async fn join_card(&self, card: &str, username: &str) -> String {
        let members = self.fetch_members().await;
        let member = members.get(username);
        let member_id = member.map_or(username, |m| m.id.as_str());

        match self.api.add_member(card, member_id).await {
            Ok(()) => format!(
                "{} has joined card {}",
                display_name(member, username),
                card_url(card)
            ),
            Err(e) => {
                warn!(error = %e, "adding {} to card {} failed", member_id, card);
                format!(
                    "There was an error joining {} to card <{}>: {}",
                    username, card, e
                )
            }
        }
    }

    /// Same username leniency as `join_card`
    async fn leave_card(&self, card: &str, username: &str) -> String {
        let members = self.fetch_members().await;
        let member = members.get(username);
        let member_id = member.map_or(username, |m| m.id.as_str());

        match self.api.remove_member(card, member_id).await {
            Ok(()) => format!(
                "{} has left card {}",
                display_name(member, username),
                card_url(card)
            ),
            Err(e) => {
                warn!(error = %e, "removing {} from card {} failed", member_id, card);
                format!(
                    "There was an error removing {} from card <{}>: {}",
                    username, card, e
                )
            }
        }
    }

    /// Refetch board members. A failed fetch is logged and yields an
    /// empty mapping; the stored mapping is left as it was.
    async fn fetch_members(&self) -> MemberMap {
        match self.api.board_members(&self.board).await {
            Ok(list) => {
                let members: MemberMap = list
                    .into_iter()
                    .map(|member| (member.username.clone(), member))
                    .collect();
                if let Ok(mut stored) = self.members.write() {
                    *stored = members.clone();
                }
                members
            }
            Err(e) => {
                warn!(error = %e, "problem fetching trello board users");
                MemberMap::new()
            }
        }
    }
}

fn display_name<'a>(member: Option<&'a Member>, fallback: &'a str) -> &'a str {
    match member {
        Some(member) if !member.full_name.is_empty() => member.full_name.as_str(),
        _ => fallback,
    }
}

#[async_trait]
impl Plugin for TrelloPlugin {
    fn name(&self) -> &str {
        "Trello"
    }

    fn description(&self) -> &str {
        "List Trello cards and create new ones"
    }

    fn matches(&self, text: &str) -> bool {
        TrelloCommand::matches(text)
    }

    async fn respond(&self, message: Message) {
        let reply = match TrelloCommand::parse(&message.text) {
            Some(command) => self.execute(command).await,
            None => self.help(),
        };
        message.reply(reply);
    }

    fn help(&self) -> String {
        HELP.to_string()
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([
            ("board".to_string(), self.board.clone()),
            ("list".to_string(), self.list.clone()),
            ("create-in".to_string(), self.create_in.clone()),
        ])
    }
}
