//! Bot client: one method per Bot API operation plus update dispatch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::Config,
    domain::{ChatId, MessageId, UserId},
    errors::Error,
    events::EventBus,
    query::{assemble, RequestForm},
    request::{resolve, Operation},
    transport::{send, HttpRequest, Transport},
    updates::{Update, UpdateType},
    Result,
};

/// Body for `sendMessage` / `editMessage`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewMessageBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<serde_json::Value>>,
    /// Reply/forward reference, e.g. `{"type": "reply", "mid": "mid.…"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify: Option<bool>,
    /// `markdown` or `html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl NewMessageBody {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Filters for `getMessages`.
#[derive(Clone, Debug, Default)]
pub struct GetMessagesParams {
    pub chat_id: Option<ChatId>,
    pub message_ids: Option<Vec<MessageId>>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub count: Option<u32>,
}

/// Body for `POST /subscriptions`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriptionBody {
    pub url: String,
    pub update_types: Vec<UpdateType>,
    pub version: String,
}

/// TamTam Bot API client.
///
/// Every call returns the raw response body (JSON text) on HTTP 200. Failures
/// are logged and returned as [`crate::Error`].
pub struct TamTamBot {
    cfg: Arc<Config>,
    transport: Arc<dyn Transport>,
    events: EventBus,
}

impl TamTamBot {
    pub fn new(cfg: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            transport,
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Register a listener for an update event.
    pub fn on<F>(&self, event: UpdateType, listener: F)
    where
        F: Fn(&Update) + Send + Sync + 'static,
    {
        self.events.on(event, listener);
    }

    /// Route an inbound update to its event. Returns the event emitted, if
    /// any.
    ///
    /// Only `bot_started` is wired; the other known types are accepted and
    /// dropped.
    pub fn handle_update(&self, update: &Update) -> Option<UpdateType> {
        match update.kind() {
            Some(UpdateType::BotStarted) => {
                self.events.emit(UpdateType::BotStarted, update);
                Some(UpdateType::BotStarted)
            }
            Some(
                UpdateType::MessageCallback
                | UpdateType::MessageCreated
                | UpdateType::MessageRemoved
                | UpdateType::MessageEdited
                | UpdateType::BotAdded
                | UpdateType::BotRemoved
                | UpdateType::UserAdded
                | UpdateType::UserRemoved
                | UpdateType::ChatTitleChanged,
            ) => None,
            None => {
                tracing::debug!(
                    update_type = update.update_type(),
                    "ignoring unknown update"
                );
                None
            }
        }
    }

    /// Parse a raw webhook payload and dispatch it.
    ///
    /// Payloads without a string `update_type` are ignored like unknown
    /// types; only text that is not JSON at all is an error.
    pub fn handle_update_json(&self, json: &str) -> Result<Option<UpdateType>> {
        match Update::parse(json) {
            Ok(update) => Ok(self.handle_update(&update)),
            Err(Error::InvalidUpdate(reason)) => {
                tracing::debug!(%reason, "ignoring update without discriminator");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Get current bot info.
    pub async fn get_my_info(&self) -> Result<String> {
        self.call(Operation::GetMyInfo, RequestForm::default())
            .await
    }

    pub async fn get_all_chats(&self, count: Option<u32>, marker: Option<i64>) -> Result<String> {
        let form = RequestForm {
            count,
            marker,
            ..Default::default()
        };
        self.call(Operation::GetAllChats, form).await
    }

    pub async fn get_chat(&self, chat_id: ChatId) -> Result<String> {
        self.call(Operation::GetChat(chat_id), RequestForm::default())
            .await
    }

    pub async fn get_messages(&self, params: GetMessagesParams) -> Result<String> {
        let form = RequestForm {
            chat_id: params.chat_id,
            message_ids: params.message_ids,
            from: params.from,
            to: params.to,
            count: params.count,
            ..Default::default()
        };
        self.call(Operation::GetMessages, form).await
    }

    pub async fn send_message(
        &self,
        user_id: Option<UserId>,
        chat_id: Option<ChatId>,
        body: &NewMessageBody,
    ) -> Result<String> {
        let form = RequestForm {
            user_id,
            chat_id,
            body: Some(serde_json::to_value(body)?),
            ..Default::default()
        };
        self.call(Operation::SendMessage, form).await
    }

    pub async fn edit_message(
        &self,
        message_id: &MessageId,
        body: &NewMessageBody,
    ) -> Result<String> {
        let form = RequestForm {
            message_id: Some(message_id.clone()),
            body: Some(serde_json::to_value(body)?),
            ..Default::default()
        };
        self.call(Operation::EditMessage, form).await
    }

    /// Register a webhook.
    ///
    /// The subscription always carries the client's configured API version;
    /// `version` is accepted for call-site compatibility only.
    pub async fn subscribe(
        &self,
        url: &str,
        update_types: &[UpdateType],
        version: &str,
    ) -> Result<String> {
        if version != self.cfg.api_version {
            tracing::debug!(
                requested = version,
                configured = %self.cfg.api_version,
                "subscription version overridden by client version"
            );
        }

        let body = SubscriptionBody {
            url: url.to_string(),
            update_types: update_types.to_vec(),
            version: self.cfg.api_version.clone(),
        };
        let form = RequestForm {
            body: Some(serde_json::to_value(&body)?),
            ..Default::default()
        };
        self.call(Operation::Subscribe, form).await
    }

    async fn call(&self, op: Operation, form: RequestForm) -> Result<String> {
        let descriptor = resolve(&self.cfg.base_url, op);
        let query = assemble(&self.cfg, &form);
        let body = form.body.as_ref().map(serde_json::to_string).transpose()?;

        let req = HttpRequest {
            verb: descriptor.verb,
            url: descriptor.url,
            query: query.pairs(),
            body,
        };
        send(self.transport.as_ref(), req).await
    }
}
