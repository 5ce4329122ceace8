//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, instrument, trace};

use shamba_core::error::TransportError;
use shamba_core::{ClientConfig, HttpRequest, HttpResponse, Method, Transport};

/// HTTP transport over a pooled `reqwest` client.
///
/// The configured timeout covers the whole exchange, including reading the
/// body. No retries are made.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport for the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::new(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::new(format!(
                "request timed out after {}ms",
                self.timeout.as_millis()
            ))
        } else if err.is_connect() {
            TransportError::new(format!("connection failed: {}", err))
        } else {
            TransportError::new(err.to_string())
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(to_reqwest(request.method), &request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        trace!(status, "HTTP response headers received");

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        debug!(status, bytes = body.len(), "HTTP response");

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
