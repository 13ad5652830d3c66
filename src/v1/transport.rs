/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! The single point where bytes go over the wire.
//!
//! [`Client`](crate::v1::Client) builds a complete [`HttpRequest`] and hands it
//! to a [`Transport`]. The default is [`ReqwestTransport`]; tests swap in an
//! implementation that answers from fixtures, using the request's [`CallTag`]
//! to decide which one.

use crate::v1::errors::InstagramError;
use bytes::Bytes;
use futures::future::BoxFuture;
use std::borrow::Cow;
use std::time::Duration;
use strum_macros::{Display, EnumString, IntoStaticStr};
use url::Url;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Names the API call a request belongs to.
///
/// The label travels with the request so a stub transport can pick canned
/// content for it without any shared "last call" state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallTag(Cow<'static, str>);

impl CallTag {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully built request, ready to send
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub tag: CallTag,
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Looks up a query parameter on the request URL
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Raw response as received from the server
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs one HTTP round trip. Implementations must not retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, InstagramError>>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    https_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(https_client: reqwest::Client) -> Self {
        Self { https_client }
    }

    /// Builds a client with the given request timeout and user agent
    pub fn with_settings(
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, InstagramError> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, InstagramError>> {
        Box::pin(async move {
            let mut req = self
                .https_client
                .request(request.method.into(), request.url)
                .header("Accept", "application/json");
            for (name, value) in &request.headers {
                req = req.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                req = req.body(body);
            }

            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let headers = resp
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = resp.bytes().await?;
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}
