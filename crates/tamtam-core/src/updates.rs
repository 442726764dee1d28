//! Inbound webhook updates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::Error, Result};

/// Update discriminators known to the Bot API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    MessageCallback,
    MessageCreated,
    MessageRemoved,
    MessageEdited,
    BotAdded,
    BotRemoved,
    UserAdded,
    UserRemoved,
    BotStarted,
    ChatTitleChanged,
}

impl UpdateType {
    pub const ALL: [UpdateType; 10] = [
        UpdateType::MessageCallback,
        UpdateType::MessageCreated,
        UpdateType::MessageRemoved,
        UpdateType::MessageEdited,
        UpdateType::BotAdded,
        UpdateType::BotRemoved,
        UpdateType::UserAdded,
        UpdateType::UserRemoved,
        UpdateType::BotStarted,
        UpdateType::ChatTitleChanged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateType::MessageCallback => "message_callback",
            UpdateType::MessageCreated => "message_created",
            UpdateType::MessageRemoved => "message_removed",
            UpdateType::MessageEdited => "message_edited",
            UpdateType::BotAdded => "bot_added",
            UpdateType::BotRemoved => "bot_removed",
            UpdateType::UserAdded => "user_added",
            UpdateType::UserRemoved => "user_removed",
            UpdateType::BotStarted => "bot_started",
            UpdateType::ChatTitleChanged => "chat_title_changed",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        UpdateType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidUpdate(format!("unknown update_type: {s}")))
    }
}

/// An inbound update. The whole JSON object is kept so listeners can read
/// type-specific fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    update_type: String,
    raw: serde_json::Value,
}

impl Update {
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let update_type = raw
            .get("update_type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| Error::InvalidUpdate("missing string field update_type".to_string()))?
            .to_string();
        Ok(Self { update_type, raw })
    }

    pub fn parse(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Raw discriminator as sent by the server.
    pub fn update_type(&self) -> &str {
        &self.update_type
    }

    /// Known discriminator, if any.
    pub fn kind(&self) -> Option<UpdateType> {
        self.update_type.parse().ok()
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    pub fn into_raw(self) -> serde_json::Value {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_forms_round_trip_through_serde() {
        for t in UpdateType::ALL {
            let v = serde_json::to_value(t).unwrap();
            assert_eq!(v, json!(t.as_str()));
            assert_eq!(t.as_str().parse::<UpdateType>().unwrap(), t);
        }
    }

    #[test]
    fn parse_keeps_full_payload() {
        let u = Update::parse(r#"{"update_type":"bot_started","chat_id":1,"user":{"user_id":2}}"#)
            .unwrap();
        assert_eq!(u.update_type(), "bot_started");
        assert_eq!(u.kind(), Some(UpdateType::BotStarted));
        assert_eq!(u.raw()["user"]["user_id"], json!(2));
    }

    #[test]
    fn unknown_discriminator_is_kept_but_unclassified() {
        let u = Update::from_value(json!({"update_type": "dialog_cleared"})).unwrap();
        assert_eq!(u.update_type(), "dialog_cleared");
        assert_eq!(u.kind(), None);
    }

    #[test]
    fn missing_discriminator_is_rejected() {
        assert!(matches!(
            Update::from_value(json!({"chat_id": 1})),
            Err(Error::InvalidUpdate(_))
        ));
        assert!(matches!(
            Update::from_value(json!({"update_type": 3})),
            Err(Error::InvalidUpdate(_))
        ));
        assert!(matches!(Update::parse("not json"), Err(Error::Json(_))));
    }
}
