/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::PageCursor;
use crate::v1::transport::{CallTag, Method};
use std::borrow::Cow;

/// One call against an endpoint: what to call and with which parameters.
///
/// Paths are relative to the versioned API root, e.g. `/users/self/feed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    tag: CallTag,
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    signed: bool,
}

impl ApiRequest {
    pub fn new(name: impl Into<Cow<'static, str>>, method: Method, path: impl Into<String>) -> Self {
        Self {
            tag: CallTag::new(name),
            method,
            path: path.into(),
            params: Vec::new(),
            signed: false,
        }
    }

    pub fn get(name: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Get, path)
    }

    pub fn post(name: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Post, path)
    }

    pub fn delete(name: impl Into<Cow<'static, str>>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Delete, path)
    }

    /// Sets a parameter, replacing any earlier value for the same key
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.set_param(key, value.to_string());
        self
    }

    /// Sets a parameter only when a value is given
    pub fn opt_param<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Marks the request as needing a signature regardless of client settings
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// The request for the page after this one
    pub fn with_cursor(&self, cursor: &PageCursor) -> Self {
        let key: &'static str = cursor.param.into();
        let mut next = self.clone();
        next.set_param(key, cursor.value.clone());
        next
    }

    pub fn tag(&self) -> &CallTag {
        &self.tag
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether the path names the authenticated user (a `self` segment)
    pub fn targets_self(&self) -> bool {
        self.path.split('/').any(|segment| segment == "self")
    }

    fn set_param(&mut self, key: &str, value: String) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
    }
}
