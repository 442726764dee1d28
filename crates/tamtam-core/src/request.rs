//! Operation -> (verb, URL) resolution.

use std::fmt;

use crate::domain::ChatId;

/// HTTP verbs used by the Bot API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical Bot API operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    GetMyInfo,
    SendMessage,
    EditMessage,
    GetAllChats,
    GetChat(ChatId),
    GetMessages,
    Subscribe,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetMyInfo => "getMyInfo",
            Operation::SendMessage => "sendMessage",
            Operation::EditMessage => "editMessage",
            Operation::GetAllChats => "getAllChats",
            Operation::GetChat(_) => "getChat",
            Operation::GetMessages => "getMessages",
            Operation::Subscribe => "subscribe",
        }
    }
}

/// Concrete verb + URL for one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub verb: Verb,
    pub url: String,
}

pub fn resolve(base_url: &str, op: Operation) -> OperationDescriptor {
    let base = base_url.trim_end_matches('/');
    let (verb, path) = match op {
        Operation::GetMyInfo => (Verb::Get, "/me".to_string()),
        Operation::SendMessage => (Verb::Post, "/messages".to_string()),
        Operation::EditMessage => (Verb::Put, "/messages".to_string()),
        Operation::GetAllChats => (Verb::Get, "/chats".to_string()),
        Operation::GetChat(chat_id) => (Verb::Get, format!("/chats/{chat_id}")),
        Operation::GetMessages => (Verb::Get, "/messages".to_string()),
        Operation::Subscribe => (Verb::Post, "/subscriptions".to_string()),
    };

    OperationDescriptor {
        verb,
        url: format!("{base}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BASE_API_URL;

    #[test]
    fn resolves_endpoint_table() {
        let cases = [
            (Operation::GetMyInfo, Verb::Get, "/me"),
            (Operation::GetAllChats, Verb::Get, "/chats"),
            (Operation::GetMessages, Verb::Get, "/messages"),
            (Operation::SendMessage, Verb::Post, "/messages"),
            (Operation::EditMessage, Verb::Put, "/messages"),
            (Operation::Subscribe, Verb::Post, "/subscriptions"),
        ];
        for (op, verb, path) in cases {
            let d = resolve(BASE_API_URL, op);
            assert_eq!(d.verb, verb, "{}", op.name());
            assert_eq!(d.url, format!("{BASE_API_URL}{path}"), "{}", op.name());
        }
    }

    #[test]
    fn get_chat_interpolates_chat_id() {
        let d = resolve(BASE_API_URL, Operation::GetChat(ChatId(-7001)));
        assert_eq!(d.verb, Verb::Get);
        assert_eq!(d.url, "https://botapi.tamtam.chat/chats/-7001");
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let d = resolve("http://localhost:8080/", Operation::GetMyInfo);
        assert_eq!(d.url, "http://localhost:8080/me");
    }
}
