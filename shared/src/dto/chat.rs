//! # Chat DTOs
//!
//! Request and response shapes for the general and book-wise chatbot
//! endpoints, plus the [`BotId`] wire type shared by both.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Server-assigned conversation identifier.
///
/// Kept as opaque text on the client. An empty id means the server has not
/// assigned one yet.
///
/// The service models ids as integers and expects `bot_id` on every chat
/// request, with `0` meaning "start a new conversation". Responses may carry
/// the id as a number or a string. On the wire:
///
/// - empty serializes as `0`
/// - integer text serializes as a JSON number
/// - anything else serializes as a JSON string
/// - `null`, numbers and strings all deserialize
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BotId(String);

impl BotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// The unassigned id.
    pub fn unassigned() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BotId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Serialize for BotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_u64(0);
        }
        match self.0.parse::<u64>() {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for BotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BotIdVisitor;

        impl<'de> Visitor<'de> for BotIdVisitor {
            type Value = BotId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a bot id as string, integer or null")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<BotId, E> {
                Ok(BotId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<BotId, E> {
                Ok(BotId(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BotId, E> {
                Ok(BotId::new(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<BotId, E> {
                Ok(BotId::unassigned())
            }

            fn visit_none<E: de::Error>(self) -> Result<BotId, E> {
                Ok(BotId::unassigned())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<BotId, D::Error> {
                d.deserialize_any(BotIdVisitor)
            }
        }

        deserializer.deserialize_any(BotIdVisitor)
    }
}

/// General chatbot request (`POST /Gen-chatbot`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralChatRequest {
    pub user_id: String,
    pub query: String,
    pub bot_id: BotId,
}

/// Book-wise chatbot request (`POST /book-wise-chat`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookChatRequest {
    pub user_id: String,
    pub query: String,
    pub bot_id: BotId,
    pub book_name: String,
}

/// Response envelope shared by both chat endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ChatData>,
}

/// Chat payload: the bot's answer and the conversation id it was filed under
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatData {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub bot_id: BotId,
}

impl ChatEnvelope {
    /// Extract `(response, bot_id)` when the envelope carries a non-blank
    /// answer.
    pub fn into_reply(self) -> Option<(String, BotId)> {
        let data = self.data?;
        let response = data.response.filter(|r| !r.trim().is_empty())?;
        Some((response, data.bot_id))
    }
}
