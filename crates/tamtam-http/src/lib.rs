//! reqwest adapter for the `tamtam-core` transport port.

use async_trait::async_trait;

use tamtam_core::{
    config::Config,
    errors::Error,
    request::Verb,
    transport::{HttpRequest, HttpResponse, Transport},
    Result,
};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("http client build error: {e}")))?;
        Ok(Self { http })
    }

    /// Wrap an already configured client.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn method(verb: Verb) -> reqwest::Method {
        match verb {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(Self::method(req.verb), &req.url)
            .query(&req.query);

        if let Some(body) = req.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("tamtam request error: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Transport(format!("tamtam body read error: {e}")))?;

        tracing::trace!(status, len = body.len(), "tamtam response");
        Ok(HttpResponse { status, body })
    }
}
