/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::User;
use crate::v1::parsers::{from_identified, from_str_or_num, from_timestamp};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment on a media item. Captions use the same shape.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Comment {
    #[serde(deserialize_with = "from_str_or_num")]
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default, rename = "from", deserialize_with = "from_identified")]
    pub user: Option<User>,

    #[serde(default, deserialize_with = "from_timestamp")]
    pub created_time: Option<DateTime<Utc>>,
}
