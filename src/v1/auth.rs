/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Credentials and the OAuth2 flows used to obtain an access token.
//!
//! The API accepts two kinds of credentials on ordinary calls:
//!
//! - an **access token**, which acts on behalf of a user and is required for
//!   any endpoint that refers to `self`
//! - a bare **client id**, which is enough for public read endpoints
//!
//! Getting a token is either the browser redirect flow
//! ([`Client::authorize_url`] then [`Client::exchange_code_for_token`]) or the
//! password flow ([`Client::exchange_credentials_for_token`]) for clients that
//! were granted it.

use crate::v1::errors::InstagramError;
use crate::v1::page::check_response;
use crate::v1::transport::{CallTag, HttpRequest, Method};
use crate::v1::{ApiRequest, Client, Scope, User};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use bytes::Bytes;
use log::{debug, warn};
use serde::Deserialize;
use std::sync::OnceLock;
use url::Url;

const AUTHORIZE_PATH: &str = "/oauth/authorize/";
const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";

/// Credentials held by a [`Client`] for its whole lifetime.
///
/// Everything is fixed at construction except the access token, which can be
/// filled in once when an OAuth exchange completes.
#[derive(Default, Clone)]
pub struct Creds {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    access_token: OnceLock<String>,
}

impl Creds {
    pub fn from_tokens(
        client_id: Option<&str>,
        client_secret: Option<&str>,
        redirect_uri: Option<&str>,
        access_token: Option<&str>,
    ) -> Self {
        let creds = Self {
            client_id: client_id.map(Into::into),
            client_secret: client_secret.map(Into::into),
            redirect_uri: redirect_uri.map(Into::into),
            access_token: OnceLock::new(),
        };
        if let Some(token) = access_token {
            let _ = creds.access_token.set(token.into());
        }
        creds
    }

    /// Credentials for public, client-only calls
    pub fn from_client_id(client_id: &str) -> Self {
        Self::from_tokens(Some(client_id), None, None, None)
    }

    /// Credentials acting on behalf of a user
    pub fn from_access_token(access_token: &str) -> Self {
        Self::from_tokens(None, None, None, Some(access_token))
    }

    pub fn with_client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: &str) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Replaces any token already held
    pub fn with_access_token(self, access_token: &str) -> Self {
        let token = OnceLock::new();
        let _ = token.set(access_token.to_string());
        Self {
            access_token: token,
            ..self
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.get().map(String::as_str)
    }

    pub(crate) fn set_access_token(&self, token: &str) -> Result<(), InstagramError> {
        self.access_token
            .set(token.into())
            .map_err(|_| InstagramError::AccessTokenAlreadySet())
    }

    /// Decides how `request` will be authenticated.
    ///
    /// Calls on `self` need a user, so they are refused up front instead of
    /// being sent with only a client id.
    pub fn auth_mode(&self, request: &ApiRequest) -> Result<AuthMode<'_>, InstagramError> {
        if let Some(token) = self.access_token() {
            return Ok(AuthMode::AccessToken(token));
        }
        if request.targets_self() {
            return Err(InstagramError::Auth(format!(
                "{} requires an access token",
                request.path()
            )));
        }
        match self.client_id() {
            Some(client_id) => Ok(AuthMode::ClientOnly(client_id)),
            None => Err(InstagramError::Auth(
                "either an access token or a client id is required".into(),
            )),
        }
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: Option<&str>| v.map(|_| "xxx");
        f.debug_struct("Creds")
            .field("client_id", &self.client_id)
            .field("client_secret", &mask(self.client_secret()))
            .field("redirect_uri", &self.redirect_uri)
            .field("access_token", &mask(self.access_token()))
            .finish()
    }
}

/// How a single request is authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode<'a> {
    AccessToken(&'a str),
    ClientOnly(&'a str),
}

impl<'a> AuthMode<'a> {
    /// The query parameter that carries the credential
    pub fn param(&self) -> (&'static str, &'a str) {
        match *self {
            AuthMode::AccessToken(token) => ("access_token", token),
            AuthMode::ClientOnly(client_id) => ("client_id", client_id),
        }
    }
}

/// Opaque value round-tripped through the authorize redirect to tie the
/// callback to the request that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState(String);

impl AuthState {
    pub fn generate() -> Self {
        let bytes: [u8; 16] = rand::random();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks the `state` returned on the redirect
    pub fn matches(&self, returned: &str) -> bool {
        self.0 == returned
    }
}

/// Result of a successful token exchange
#[derive(Deserialize, Debug)]
pub struct AccessToken {
    pub access_token: String,

    #[serde(default)]
    pub user: Option<User>,
}

impl Client {
    /// URL the user must visit to grant this client access.
    pub fn authorize_url(
        &self,
        scopes: &[Scope],
        state: Option<&AuthState>,
    ) -> Result<Url, InstagramError> {
        let creds = self.creds();
        let client_id = creds
            .client_id()
            .ok_or_else(|| InstagramError::Auth("client id is required to authorize".into()))?;
        let redirect_uri = creds
            .redirect_uri()
            .ok_or_else(|| InstagramError::Auth("redirect uri is required to authorize".into()))?;

        let scope = scopes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let mut params = vec![
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
        ];
        if !scope.is_empty() {
            params.push(("scope", scope.as_str()));
        }
        if let Some(state) = state {
            params.push(("state", state.as_str()));
        }

        let base = self.config().origin()?.join(AUTHORIZE_PATH)?;
        Ok(Url::parse_with_params(base.as_str(), &params)?)
    }

    /// Trades the `code` from the authorize redirect for an access token.
    ///
    /// On success the token is also stored on this client. A client that
    /// already holds a token fails with [`InstagramError::AccessTokenAlreadySet`]
    /// without sending anything.
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<AccessToken, InstagramError> {
        self.exchange_for_token(
            "exchange_code_for_access_token",
            &[("grant_type", "authorization_code"), ("code", code)],
        )
        .await
    }

    /// Trades a username and password for an access token (xAuth).
    ///
    /// The client id must be approved for this flow. Storage follows
    /// [`Client::exchange_code_for_token`].
    pub async fn exchange_credentials_for_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, InstagramError> {
        self.exchange_for_token(
            "exchange_xauth_login_for_access_token",
            &[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
            ],
        )
        .await
    }

    /// Stores a token obtained elsewhere. Fails if one is already set.
    pub fn set_access_token(&self, token: &str) -> Result<(), InstagramError> {
        self.creds().set_access_token(token)
    }

    async fn exchange_for_token(
        &self,
        call: &'static str,
        grant: &[(&str, &str)],
    ) -> Result<AccessToken, InstagramError> {
        let creds = self.creds();
        if creds.access_token().is_some() {
            return Err(InstagramError::AccessTokenAlreadySet());
        }
        let (Some(client_id), Some(client_secret), Some(redirect_uri)) = (
            creds.client_id(),
            creds.client_secret(),
            creds.redirect_uri(),
        ) else {
            return Err(InstagramError::Auth(
                "client id, client secret and redirect uri are required for a token exchange"
                    .into(),
            ));
        };

        let mut form = vec![
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
        ];
        form.extend_from_slice(grant);
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = HttpRequest {
            tag: CallTag::new(call),
            method: Method::Post,
            url: self.config().origin()?.join(ACCESS_TOKEN_PATH)?,
            headers: vec![(
                "Content-Type".into(),
                "application/x-www-form-urlencoded".into(),
            )],
            body: Some(Bytes::from(body)),
        };

        debug!("{} {} ({})", request.method, ACCESS_TOKEN_PATH, call);
        let response = self.transport().send(request).await?;
        let body = check_response(&response)?;
        let token: AccessToken = serde_json::from_value(body).map_err(|source| {
            warn!("token exchange response is missing fields: {}", source);
            InstagramError::ApiResponseMalformed {
                status: response.status,
                source,
            }
        })?;

        // Another exchange on a clone may have finished first
        creds.set_access_token(&token.access_token)?;
        Ok(token)
    }
}
