/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error};
use serde::Deserialize;
use serde_json::Value;

// Values the API sends either quoted or as bare numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum StrOrNum {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StrOrNum {
    fn into_string(self) -> String {
        match self {
            StrOrNum::Str(s) => s,
            StrOrNum::Int(i) => i.to_string(),
            StrOrNum::Float(f) => f.to_string(),
        }
    }
}

/// Converts epoch seconds to a UTC instant
pub fn timestamp_to_datetime(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }
    let secs = timestamp.trunc() as i64;
    let nanos = ((timestamp - timestamp.trunc()) * 1e9).round() as u32;
    DateTime::from_timestamp(secs, nanos.min(999_999_999))
}

// Parses identifiers that may be strings or numbers
pub fn from_str_or_num<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(StrOrNum::deserialize(deserializer)?.into_string())
}

pub fn from_opt_str_or_num<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<StrOrNum>::deserialize(deserializer)?.map(StrOrNum::into_string))
}

// Parses epoch seconds sent as "1296748524" or 1296748524
pub fn from_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let timestamp = match Option::<StrOrNum>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(StrOrNum::Int(i)) => i as f64,
        Some(StrOrNum::Float(f)) => f,
        Some(StrOrNum::Str(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid timestamp: {}", s)))?,
    };
    timestamp_to_datetime(timestamp)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", timestamp)))
}

// Parses strings that may be "" and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

// An embedded entity only counts if it carries its id
fn has_identifier(value: &Value) -> bool {
    value.get("id").is_some_and(|id| !id.is_null())
}

// Parses a nested reference, dropping it entirely when the id is missing
pub fn from_identified<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) if has_identifier(&value) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

// Parses a list of nested references, skipping the ones without an id
pub fn from_identified_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .filter(has_identifier)
        .map(|value| serde_json::from_value(value).map_err(D::Error::custom))
        .collect()
}
