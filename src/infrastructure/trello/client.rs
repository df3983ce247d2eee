//! Trello HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use super::error::TrelloError;
use super::types::{Card, CardList, Member, MemberValue, NewCard};

/// Trello API endpoint
pub const API_BASE: &str = "https://api.trello.com";

/// The slice of the Trello API the bot talks to
#[async_trait]
pub trait TrelloApi: Send + Sync {
    /// `POST /1/cards`
    async fn create_card(&self, name: &str, list_id: &str) -> Result<Card, TrelloError>;

    /// `GET /1/lists/{id}?cards=open`
    async fn open_cards(&self, list_id: &str) -> Result<CardList, TrelloError>;

    /// `GET /1/boards/{id}/members`
    async fn board_members(&self, board_id: &str) -> Result<Vec<Member>, TrelloError>;

    /// `POST /1/cards/{id}/idMembers`
    async fn add_member(&self, card_id: &str, member_id: &str) -> Result<(), TrelloError>;

    /// `DELETE /1/cards/{id}/idMembers/{member}`
    async fn remove_member(&self, card_id: &str, member_id: &str) -> Result<(), TrelloError>;
}

/// Trello REST client bound to one key/token pair.
#[derive(Clone)]
pub struct TrelloClient {
    client: Client,
    base_url: Url,
    key: String,
    token: String,
}

impl TrelloClient {
    /// Create a client against the public Trello API.
    pub fn new(key: impl Into<String>, token: impl Into<String>) -> Result<Self, TrelloError> {
        Self::with_base_url(key, token, API_BASE)
    }

    /// Create a client against another API root (proxies, mock servers).
    pub fn with_base_url(
        key: impl Into<String>,
        token: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, TrelloError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = Url::parse(base_url)
            .map_err(|e| TrelloError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            key: key.into(),
            token: token.into(),
        })
    }

    /// Build `{base}/1/{segments...}`, escaping every segment
    fn url(&self, segments: &[&str]) -> Result<Url, TrelloError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TrelloError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("1")
            .extend(segments);
        Ok(url)
    }

    fn auth(&self) -> [(&str, &str); 2] {
        [("key", self.key.as_str()), ("token", self.token.as_str())]
    }
}

/// Fail on non-2xx, keeping the body for the error message
async fn check(response: Response) -> Result<Response, TrelloError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TrelloError::Api {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TrelloError> {
    check(response)
        .await?
        .json()
        .await
        .map_err(|e| TrelloError::Decode(e.to_string()))
}

#[async_trait]
impl TrelloApi for TrelloClient {
    #[instrument(skip(self))]
    async fn create_card(&self, name: &str, list_id: &str) -> Result<Card, TrelloError> {
        let response = self
            .client
            .post(self.url(&["cards"])?)
            .query(&self.auth())
            .json(&NewCard { name, id_list: list_id })
            .send()
            .await?;

        decode(response).await
    }

    #[instrument(skip(self))]
    async fn open_cards(&self, list_id: &str) -> Result<CardList, TrelloError> {
        let response = self
            .client
            .get(self.url(&["lists", list_id])?)
            .query(&self.auth())
            .query(&[("cards", "open")])
            .send()
            .await?;

        let list: CardList = decode(response).await?;
        debug!("List {} has {} open cards", list.name, list.cards.len());
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn board_members(&self, board_id: &str) -> Result<Vec<Member>, TrelloError> {
        let response = self
            .client
            .get(self.url(&["boards", board_id, "members"])?)
            .query(&self.auth())
            .send()
            .await?;

        let members: Vec<Member> = decode(response).await?;
        debug!("Board {} has {} members", board_id, members.len());
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn add_member(&self, card_id: &str, member_id: &str) -> Result<(), TrelloError> {
        let response = self
            .client
            .post(self.url(&["cards", card_id, "idMembers"])?)
            .query(&self.auth())
            .json(&MemberValue { value: member_id })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, card_id: &str, member_id: &str) -> Result<(), TrelloError> {
        let response = self
            .client
            .delete(self.url(&["cards", card_id, "idMembers", member_id])?)
            .query(&self.auth())
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}
