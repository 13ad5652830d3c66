/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::InstagramError;
use crate::v1::signature::{sign, sign_ips, FORWARDED_FOR_HEADER, SIGNATURE_PARAM};
use crate::v1::transport::{HttpRequest, Method, ReqwestTransport, Transport};
use crate::v1::{ApiRequest, Creds, PageCursor, ResponsePage};
use async_stream::try_stream;
use bytes::Bytes;
use futures::Stream;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

// Root Instagram API
pub const API_ORIGIN: &str = "https://api.instagram.com";

// Versioned prefix for resource endpoints
pub const API_BASE_PATH: &str = "/v1";

/// Settings that apply to every request a [`Client`] makes
#[derive(Debug, Clone)]
pub struct Config {
    pub api_origin: String,
    pub api_base_path: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,

    /// Sign every request, for apps with "enforce signed requests" turned on
    pub sign_all_requests: bool,

    /// Comma separated client IPs, sent signed in the `X-Insta-Forwarded-For` header
    pub client_ips: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_origin: API_ORIGIN.into(),
            api_base_path: API_BASE_PATH.into(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("instagram-rs/", env!("CARGO_PKG_VERSION")).into(),
            sign_all_requests: false,
            client_ips: None,
        }
    }
}

impl Config {
    pub(crate) fn origin(&self) -> Result<Url, InstagramError> {
        Ok(Url::parse(&self.api_origin)?)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.api_origin.trim_end_matches('/'),
            self.api_base_path,
            path
        )
    }
}

/// Handle used for all calls to the API. Cloning is cheap and clones share
/// credentials.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    creds: Creds,
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(creds: Creds) -> Self {
        Self::with_transport(creds, Config::default(), ReqwestTransport::default())
    }

    /// Creates a client whose HTTP settings come from `config`
    pub fn with_config(creds: Creds, config: Config) -> Result<Self, InstagramError> {
        let transport = ReqwestTransport::with_settings(config.timeout, &config.user_agent)?;
        Ok(Self::with_transport(creds, config, transport))
    }

    /// Creates a client that sends everything through `transport`
    pub fn with_transport(creds: Creds, config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                creds,
                config,
                transport: Arc::new(transport),
            }),
        }
    }

    pub fn creds(&self) -> &Creds {
        &self.inner.creds
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Sends `request` once and returns the decoded page.
    ///
    /// Errors if the request can't be authorized, the transport fails, the
    /// body is not JSON, or the API reports a failure. Nothing is retried.
    pub async fn execute(&self, request: &ApiRequest) -> Result<ResponsePage, InstagramError> {
        let http_request = self.prepare(request)?;
        debug!(
            "{} {} ({})",
            http_request.method,
            request.path(),
            request.tag()
        );
        let response = self.transport().send(http_request).await?;
        ResponsePage::from_response(&response)
    }

    /// Sends `request` and decodes its data as a single object
    pub async fn entry<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, InstagramError> {
        self.execute(request).await?.entry()
    }

    /// Sends `request` and decodes its data as a list, along with the pointer
    /// to the following page
    pub async fn items<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<(Vec<T>, Option<PageCursor>), InstagramError> {
        let page = self.execute(request).await?;
        Ok((page.items()?, page.next_cursor()))
    }

    /// Walks a paged result set one page at a time.
    ///
    /// Nothing is requested until the stream is polled, and each poll makes at
    /// most one call. The stream ends when a page has no next cursor or
    /// `max_pages` pages have been produced; `None` means no limit and
    /// `Some(0)` produces nothing. An error is yielded in place of the page
    /// that failed and ends the stream.
    pub fn paginate(
        &self,
        seed: ApiRequest,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = Result<ResponsePage, InstagramError>> + use<> {
        let client = self.clone();
        try_stream! {
            let mut next = Some(seed);
            let mut pages_read: usize = 0;
            while let Some(request) = next.take() {
                if max_pages.is_some_and(|max| pages_read >= max) {
                    break;
                }
                let page = client.execute(&request).await?;
                pages_read += 1;
                next = page.next_cursor().map(|cursor| {
                    trace!("{} page {} continues at {}={}", request.tag(), pages_read, cursor.param, cursor.value);
                    request.with_cursor(&cursor)
                });
                yield page;
            }
        }
    }

    // Resolves credentials, signs if needed and lays out query/body.
    fn prepare(&self, request: &ApiRequest) -> Result<HttpRequest, InstagramError> {
        let creds = self.creds();
        let config = self.config();
        let auth_param = creds.auth_mode(request)?.param();

        let mut query = vec![auth_param];
        let mut form = Vec::new();
        match request.method() {
            Method::Post => form.extend(request.params()),
            Method::Get | Method::Delete => query.extend(request.params()),
        }

        let signature = if request.is_signed() || config.sign_all_requests {
            let secret = creds.client_secret().ok_or_else(|| {
                InstagramError::Auth(format!("{} must be signed, but no client secret is set", request.path()))
            })?;
            Some(sign(
                secret,
                request.path(),
                std::iter::once(auth_param).chain(request.params()),
            ))
        } else {
            None
        };
        if let Some(sig) = signature.as_deref() {
            query.push((SIGNATURE_PARAM, sig));
        }

        let url = Url::parse_with_params(&config.endpoint_url(request.path()), &query)?;

        let mut headers = Vec::new();
        if let (Some(ips), Some(secret)) = (config.client_ips.as_deref(), creds.client_secret()) {
            headers.push((FORWARDED_FOR_HEADER.to_string(), sign_ips(secret, ips)));
        }

        let body = match request.method() {
            Method::Post => {
                headers.push((
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ));
                let encoded = form
                    .iter()
                    .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&");
                Some(Bytes::from(encoded))
            }
            Method::Get | Method::Delete => None,
        };

        Ok(HttpRequest {
            tag: request.tag().clone(),
            method: request.method(),
            url,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("creds", &self.inner.creds)
            .field("config", &self.inner.config)
            .finish()
    }
}
