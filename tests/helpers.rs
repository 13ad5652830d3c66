/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use futures::future::BoxFuture;
use instagram::v1::{
    Client, Config, Creds, CursorParam, HttpRequest, HttpResponse, InstagramError, Transport,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub(crate) const CLIENT_ID: &str = "DEBUG";
pub(crate) const CLIENT_SECRET: &str = "DEBUG";
pub(crate) const ACCESS_TOKEN: &str = "DEBUG";
pub(crate) const REDIRECT_URI: &str = "http://example.com";

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Requests seen by one transport instance
#[derive(Clone, Default)]
pub(crate) struct Recorder(Arc<Mutex<Vec<HttpRequest>>>);

#[allow(dead_code)]
impl Recorder {
    pub(crate) fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> HttpRequest {
        self.0.lock().unwrap().last().cloned().expect("no request was sent")
    }

    fn push(&self, request: HttpRequest) {
        self.0.lock().unwrap().push(request);
    }
}

/// Answers from `tests/fixtures/<call>.json`, or `<call>_<cursor>.json` when the
/// request carries a page cursor. The status is the fixture's meta code.
#[derive(Default)]
pub(crate) struct FixtureTransport {
    recorder: Recorder,
}

impl FixtureTransport {
    fn fixture_key(request: &HttpRequest) -> String {
        let cursor = CursorParam::ALL.into_iter().find_map(|param| {
            let name: &'static str = param.into();
            request.query_param(name)
        });
        match cursor {
            Some(value) => format!("{}_{}", request.tag.name(), value),
            None => request.tag.name().to_string(),
        }
    }
}

impl Transport for FixtureTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, InstagramError>> {
        let key = Self::fixture_key(&request);
        self.recorder.push(request);
        Box::pin(async move {
            let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("tests/fixtures")
                .join(format!("{}.json", key));
            let content = std::fs::read_to_string(&path)
                .map_err(|e| InstagramError::Transport(format!("{}: {}", path.display(), e)))?;
            let json: serde_json::Value = serde_json::from_str(&content)?;
            let status = json["meta"]["code"]
                .as_u64()
                .or_else(|| json["code"].as_u64())
                .unwrap_or(200) as u16;
            Ok(HttpResponse::new(status, content))
        })
    }
}

/// Always answers with the same canned response
#[allow(dead_code)]
pub(crate) struct StaticTransport {
    pub(crate) response: HttpResponse,
    pub(crate) recorder: Recorder,
}

impl Transport for StaticTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, InstagramError>> {
        self.recorder.push(request);
        let response = self.response.clone();
        Box::pin(async move { Ok(response) })
    }
}

#[allow(dead_code)]
pub(crate) fn fixture_client(creds: Creds) -> (Client, Recorder) {
    fixture_client_with_config(creds, Config::default())
}

#[allow(dead_code)]
pub(crate) fn fixture_client_with_config(creds: Creds, config: Config) -> (Client, Recorder) {
    init_logging();
    let transport = FixtureTransport::default();
    let recorder = transport.recorder.clone();
    (Client::with_transport(creds, config, transport), recorder)
}

#[allow(dead_code)]
pub(crate) fn static_client(creds: Creds, response: HttpResponse) -> (Client, Recorder) {
    init_logging();
    let recorder = Recorder::default();
    let transport = StaticTransport {
        response,
        recorder: recorder.clone(),
    };
    (
        Client::with_transport(creds, Config::default(), transport),
        recorder,
    )
}

#[allow(dead_code)]
pub(crate) fn authenticated_creds() -> Creds {
    Creds::from_tokens(
        Some(CLIENT_ID),
        Some(CLIENT_SECRET),
        Some(REDIRECT_URI),
        Some(ACCESS_TOKEN),
    )
}

#[allow(dead_code)]
pub(crate) fn client_only_creds() -> Creds {
    Creds::from_client_id(CLIENT_ID)
}

#[allow(dead_code)]
pub(crate) fn unauthenticated_creds() -> Creds {
    Creds::from_tokens(Some(CLIENT_ID), Some(CLIENT_SECRET), Some(REDIRECT_URI), None)
}

#[allow(dead_code)]
pub(crate) fn get_live_auth_tokens() -> anyhow::Result<Creds> {
    let client_id = std::env::var("INSTAGRAM_CLIENT_ID")?;
    let client_secret = std::env::var("INSTAGRAM_CLIENT_SECRET").ok();
    let redirect_uri = std::env::var("INSTAGRAM_REDIRECT_URI").ok();
    let access_token = std::env::var("INSTAGRAM_ACCESS_TOKEN")?;

    Ok(Creds::from_tokens(
        Some(&client_id),
        client_secret.as_deref(),
        redirect_uri.as_deref(),
        Some(&access_token),
    ))
}
