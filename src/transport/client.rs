// Network transport backed by a blocking reqwest client.
// Forwards requests unchanged and hands back the streaming response.

use reqwest::blocking::Client;

use super::Transport;
use super::message::{Body, Request, Response};
use crate::error::{CacheError, Result};

/// Transport that performs real HTTP requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(CacheError::Http)?;
        Ok(Self::with_client(client))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(CacheError::Http)?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();

        Ok(Response::new(status, url)
            .with_headers(headers)
            .with_body(Body::from_reader(response)))
    }
}
