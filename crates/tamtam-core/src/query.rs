//! Per-call request form and query-string assembly.

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    domain::{ChatId, MessageId, UserId},
};

/// Logical parameters for a single call. Built fresh per call and dropped
/// once the call resolves.
#[derive(Clone, Debug, Default)]
pub struct RequestForm {
    pub chat_id: Option<ChatId>,
    pub user_id: Option<UserId>,
    pub message_ids: Option<Vec<MessageId>>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub count: Option<u32>,
    pub marker: Option<i64>,
    pub message_id: Option<MessageId>,
    pub body: Option<serde_json::Value>,
}

/// Fixed-shape query record. `access_token` and `v` are always present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub chat_id: Option<String>,
    pub user_id: Option<String>,
    pub message_ids: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub count: Option<String>,
    pub marker: Option<String>,
    pub access_token: String,
    pub message_id: Option<String>,
    pub v: String,
}

impl Query {
    /// Query-string pairs with absent fields dropped.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("chat_id", &self.chat_id),
            ("user_id", &self.user_id),
            ("message_ids", &self.message_ids),
            ("from", &self.from),
            ("to", &self.to),
            ("count", &self.count),
            ("marker", &self.marker),
        ];

        let mut out: Vec<(&'static str, String)> = optional
            .into_iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k, v)))
            .collect();
        out.push(("access_token", self.access_token.clone()));
        if let Some(mid) = &self.message_id {
            out.push(("message_id", mid.clone()));
        }
        out.push(("v", self.v.clone()));
        out
    }
}

/// Merge a form with the client's token and version.
pub fn assemble(cfg: &Config, form: &RequestForm) -> Query {
    Query {
        chat_id: form.chat_id.map(|c| c.to_string()),
        user_id: form.user_id.map(|u| u.to_string()),
        message_ids: form
            .message_ids
            .as_ref()
            .filter(|ids| !ids.is_empty())
            .map(|ids| {
                ids.iter()
                    .map(|m| m.0.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            }),
        from: form.from.map(|t| t.timestamp_millis().to_string()),
        to: form.to.map(|t| t.timestamp_millis().to_string()),
        count: form.count.map(|c| c.to_string()),
        marker: form.marker.map(|m| m.to_string()),
        access_token: cfg.token.clone(),
        message_id: form.message_id.as_ref().map(|m| m.0.clone()),
        v: cfg.api_version.clone(),
    }
}
