use async_trait::async_trait;

use crate::{errors::Error, request::Verb, Result};

/// A fully assembled outbound call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub verb: Verb,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    /// JSON text; `None` sends no body at all.
    pub body: Option<String>,
}

/// Raw server reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Port for the HTTP layer.
///
/// Implementations only report transport-level failures (DNS, connect, I/O)
/// as `Err`; any HTTP status is returned as a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse>;
}

/// Issue `req` and map the outcome: 200 yields the raw body, anything else is
/// logged and returned as an error.
pub async fn send(transport: &dyn Transport, req: HttpRequest) -> Result<String> {
    let verb = req.verb;
    let url = req.url.clone();
    tracing::debug!(%verb, %url, "tamtam request");

    let resp = match transport.execute(req).await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(%verb, %url, error = %e, "tamtam request failed");
            return Err(match e {
                Error::Transport(msg) => Error::Transport(msg),
                other => Error::Transport(other.to_string()),
            });
        }
    };

    if resp.status == 200 {
        return Ok(resp.body);
    }

    tracing::warn!(
        %verb,
        %url,
        status = resp.status,
        body = %resp.body,
        "tamtam api returned an error"
    );
    Err(Error::Api {
        status: resp.status,
        body: resp.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(std::result::Result<HttpResponse, String>);

    #[async_trait]
    impl Transport for Fixed {
        async fn execute(&self, _req: HttpRequest) -> Result<HttpResponse> {
            self.0.clone().map_err(Error::Transport)
        }
    }

    fn req() -> HttpRequest {
        HttpRequest {
            verb: Verb::Get,
            url: "https://botapi.tamtam.chat/me".to_string(),
            query: vec![],
            body: None,
        }
    }

    #[tokio::test]
    async fn ok_status_returns_raw_body() {
        let t = Fixed(Ok(HttpResponse {
            status: 200,
            body: "{\"a\":1}".to_string(),
        }));
        assert_eq!(send(&t, req()).await.unwrap(), "{\"a\":1}");
    }

    #[tokio::test]
    async fn non_200_is_an_api_error() {
        // Other 2xx codes are not treated as success either.
        let t = Fixed(Ok(HttpResponse {
            status: 204,
            body: String::new(),
        }));
        let err = send(&t, req()).await.unwrap_err();
        assert_eq!(err.status(), Some(204));
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced() {
        let t = Fixed(Err("connection refused".to_string()));
        let err = send(&t, req()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(ref m) if m.contains("refused")));
        assert_eq!(err.status(), None);
    }
}
