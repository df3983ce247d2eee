//! Outbound reply envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parse mode sent with every reply
pub const PARSE_FULL: &str = "full";

/// A fully merged outbound reply, ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub channel: String,
    pub username: String,
    pub link_names: u8,
    pub parse: String,
    pub unfurl_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields the default envelope does not know about (attachments, icons, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reply {
    /// Default envelope for a destination channel and sender name
    pub fn envelope(channel: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            username: username.into(),
            link_names: 1,
            parse: PARSE_FULL.to_string(),
            unfurl_links: true,
            text: None,
            extra: Map::new(),
        }
    }

    /// Merge a payload over this envelope. Fields set in the payload win.
    pub fn merge(mut self, payload: Payload) -> Self {
        match payload {
            Payload::Text(text) => {
                self.text = Some(text);
            }
            Payload::Fields(fields) => {
                if let Some(channel) = fields.channel {
                    self.channel = channel;
                }
                if let Some(username) = fields.username {
                    self.username = username;
                }
                if let Some(link_names) = fields.link_names {
                    self.link_names = link_names;
                }
                if let Some(parse) = fields.parse {
                    self.parse = parse;
                }
                if let Some(unfurl_links) = fields.unfurl_links {
                    self.unfurl_links = unfurl_links;
                }
                if fields.text.is_some() {
                    self.text = fields.text;
                }
                self.extra.extend(fields.extra);
            }
        }
        self
    }
}

/// Structured reply payload; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReplyFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_names: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfurl_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplyFields {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_unfurl_links(mut self, unfurl: bool) -> Self {
        self.unfurl_links = Some(unfurl);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// What a plugin hands to `Message::send`
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Fields(ReplyFields),
}

impl Payload {
    /// Empty text counts as "no reply" when closing a message
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Text(text) if text.is_empty())
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<ReplyFields> for Payload {
    fn from(fields: ReplyFields) -> Self {
        Payload::Fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_payload_fills_envelope() {
        let reply = Reply::envelope("#dev", "trellobot").merge("hello".into());

        assert_eq!(reply.channel, "#dev");
        assert_eq!(reply.username, "trellobot");
        assert_eq!(reply.link_names, 1);
        assert_eq!(reply.parse, "full");
        assert!(reply.unfurl_links);
        assert_eq!(reply.text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_fields_override_only_what_they_set() {
        let fields = ReplyFields::text("hi")
            .with_channel("#ops")
            .with_unfurl_links(false);
        let reply = Reply::envelope("#dev", "trellobot").merge(fields.into());

        assert_eq!(reply.channel, "#ops");
        assert!(!reply.unfurl_links);
        assert_eq!(reply.username, "trellobot");
        assert_eq!(reply.parse, "full");
        assert_eq!(reply.text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_serialized_shape() {
        let fields = ReplyFields::default().with_extra("icon_emoji", json!(":card:"));
        let reply = Reply::envelope("#dev", "trellobot").merge(fields.into());

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            value,
            json!({
                "channel": "#dev",
                "username": "trellobot",
                "link_names": 1,
                "parse": "full",
                "unfurl_links": true,
                "icon_emoji": ":card:"
            })
        );
    }

    #[test]
    fn test_fields_deserialize_with_unknown_keys() {
        let fields: ReplyFields =
            serde_json::from_value(json!({"text": "x", "attachments": []})).unwrap();
        assert_eq!(fields.text.as_deref(), Some("x"));
        assert_eq!(fields.extra.get("attachments"), Some(&json!([])));
    }
}
