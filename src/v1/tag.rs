/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::InstagramError;
use crate::v1::{ApiRequest, Client, Media};
use async_stream::try_stream;
use futures::{Stream, StreamExt, pin_mut};
use serde::Deserialize;

/// Holds information returned from the Tags API. The name is the identifier.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,

    #[serde(default)]
    pub media_count: Option<u64>,
}

impl Tag {
    fn path(name: &str) -> String {
        format!("/tags/{}", urlencoding::encode(name))
    }

    /// Returns information for the named tag
    pub async fn from_name(client: &Client, name: &str) -> Result<Self, InstagramError> {
        client.entry(&ApiRequest::get("tag", Self::path(name))).await
    }

    /// Streams recently tagged media, newest first, a page at a time
    pub fn recent_media(
        client: Client,
        name: &str,
        count: Option<u32>,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = Result<Vec<Media>, InstagramError>> + use<> {
        let req = ApiRequest::get("tag_recent_media", format!("{}/media/recent", Self::path(name)))
            .opt_param("count", count);

        try_stream! {
            let pages = client.paginate(req, max_pages);
            pin_mut!(pages);
            while let Some(page) = pages.next().await {
                yield page?.items::<Media>()?;
            }
        }
    }
}
