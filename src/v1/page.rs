/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::{ApiError, InstagramError};
use crate::v1::parsers::from_opt_str_or_num;
use crate::v1::properties::{ApiResponseCode, CursorParam};
use crate::v1::transport::HttpResponse;
use log::{trace, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// One decoded response from the API.
#[derive(Debug, Clone)]
pub struct ResponsePage {
    pub status: u16,
    pub meta: Meta,
    pub data: Value,
    pub pagination: Option<Pagination>,
    pub rate_limit: Option<RateLimit>,
}

impl ResponsePage {
    pub(crate) fn from_response(response: &HttpResponse) -> Result<Self, InstagramError> {
        let mut body = check_response(response)?;
        let meta = envelope_meta(&body, response.status)?;
        let pagination = match body.get_mut("pagination").map(Value::take) {
            Some(Value::Null) | None => None,
            Some(p) => Some(Pagination::deserialize(p).map_err(|source| {
                InstagramError::ApiResponseMalformed {
                    status: response.status,
                    source,
                }
            })?),
        };
        let data = body.get_mut("data").map(Value::take).unwrap_or(Value::Null);

        Ok(Self {
            status: response.status,
            meta,
            data,
            pagination,
            rate_limit: RateLimit::from_response(response),
        })
    }

    /// Pointer to the next page, if there is one
    pub fn next_cursor(&self) -> Option<PageCursor> {
        self.pagination.as_ref().and_then(PageCursor::from_pagination)
    }

    /// Decodes `data` as a single object
    pub fn entry<T: DeserializeOwned>(&self) -> Result<T, InstagramError> {
        decode(&self.data)
    }

    /// Decodes `data` as a list of objects. An absent list is empty.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>, InstagramError> {
        match &self.data {
            Value::Null => Ok(Vec::new()),
            data => decode(data),
        }
    }
}

/// Converts raw JSON into a typed model
pub fn decode<T: DeserializeOwned>(raw: &Value) -> Result<T, InstagramError> {
    Ok(T::deserialize(raw)?)
}

/// Status block included with every response
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub code: u16,

    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

/// Paging information as sent by the API
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub next_url: Option<String>,

    #[serde(default, deserialize_with = "from_opt_str_or_num")]
    pub next_cursor: Option<String>,

    #[serde(default, deserialize_with = "from_opt_str_or_num")]
    pub next_max_id: Option<String>,

    #[serde(default, deserialize_with = "from_opt_str_or_num")]
    pub next_max_tag_id: Option<String>,

    #[serde(default, deserialize_with = "from_opt_str_or_num")]
    pub next_max_like_id: Option<String>,
}

/// Where the next page starts: the parameter to set and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub param: CursorParam,
    pub value: String,
}

impl PageCursor {
    pub fn new(param: CursorParam, value: impl Into<String>) -> Self {
        Self {
            param,
            value: value.into(),
        }
    }

    /// Picks the next-page pointer from the pagination block, falling back to
    /// the query string of `next_url` when no explicit field is present.
    pub fn from_pagination(pagination: &Pagination) -> Option<Self> {
        let explicit = CursorParam::ALL.into_iter().find_map(|param| {
            let value = match param {
                CursorParam::Cursor => &pagination.next_cursor,
                CursorParam::MaxTagId => &pagination.next_max_tag_id,
                CursorParam::MaxLikeId => &pagination.next_max_like_id,
                CursorParam::MaxId => &pagination.next_max_id,
            };
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| Self::new(param, v))
        });
        explicit.or_else(|| {
            pagination
                .next_url
                .as_deref()
                .and_then(Self::from_next_url)
        })
    }

    fn from_next_url(next_url: &str) -> Option<Self> {
        let url = Url::parse(next_url).ok()?;
        CursorParam::ALL.into_iter().find_map(|param| {
            let name: &'static str = param.into();
            url.query_pairs()
                .find(|(key, value)| key == name && !value.is_empty())
                .map(|(_, value)| Self::new(param, value.into_owned()))
        })
    }
}

/// Request quota reported in the response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
}

impl RateLimit {
    fn from_response(response: &HttpResponse) -> Option<Self> {
        let read = |name: &str| -> Option<u32> {
            response.header(name).and_then(|v| v.trim().parse().ok())
        };
        let limit = read("x-ratelimit-limit");
        let remaining = read("x-ratelimit-remaining");
        if limit.is_none() && remaining.is_none() {
            return None;
        }
        trace!("rate limit {:?}/{:?}", remaining, limit);
        Some(Self { limit, remaining })
    }
}

/// Classifies a raw response, returning the parsed body when it is a success.
///
/// Throttling statuses short-circuit before the body is looked at. Otherwise
/// the body must be JSON, and both the HTTP status and the meta code (or the
/// bare `code` of an OAuth error) must be in the success range.
pub(crate) fn check_response(response: &HttpResponse) -> Result<Value, InstagramError> {
    if ApiResponseCode::is_rate_limited(response.status) {
        warn!("rate limited with status {}", response.status);
        return Err(ApiError::rate_limited(response.status).into());
    }

    let body: Value = serde_json::from_slice(&response.body).map_err(|source| {
        warn!("unparseable response body with status {}", response.status);
        InstagramError::ApiResponseMalformed {
            status: response.status,
            source,
        }
    })?;

    let meta = envelope_meta(&body, response.status)?;
    if ApiResponseCode::is_success(meta.code) && ApiResponseCode::is_success(response.status) {
        return Ok(body);
    }

    let code = if ApiResponseCode::is_success(meta.code) {
        response.status
    } else {
        meta.code
    };
    let err = ApiError::new(
        code,
        meta.error_type.unwrap_or_default(),
        meta.error_message.unwrap_or_default(),
    );
    warn!("API error {}", err);
    Err(err.into())
}

// Normal responses wrap status in `meta`; OAuth errors put it at the root, and
// token responses carry no status at all.
fn envelope_meta(body: &Value, status: u16) -> Result<Meta, InstagramError> {
    let raw = match body.get("meta") {
        Some(meta) => meta,
        None if body.get("code").is_some() => body,
        None => {
            return Ok(Meta {
                code: status,
                error_type: None,
                error_message: None,
            });
        }
    };
    Meta::deserialize(raw).map_err(|source| InstagramError::ApiResponseMalformed { status, source })
}
