/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::InstagramError;
use crate::v1::parsers::{from_identified, from_identified_vec, from_str_or_num, from_timestamp};
use crate::v1::{ApiRequest, Client, Comment, Location, PageCursor, User, UserInPhoto};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt, pin_mut};
use serde::Deserialize;

/// Holds information returned from the Media API.
///
/// See [Instagram API Docs](https://www.instagram.com/developer/endpoints/media/) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "MediaRecord")]
pub struct Media {
    pub id: String,
    pub kind: MediaKind,
    pub user: Option<User>,
    pub images: Renditions,
    pub caption: Option<Comment>,
    pub created_time: Option<DateTime<Utc>>,
    pub link: Option<String>,
    pub filter: Option<String>,
    pub tags: Vec<String>,
    pub user_has_liked: Option<bool>,
    pub like_count: u64,
    pub likes: Vec<User>,
    pub comment_count: u64,
    pub comments: Vec<Comment>,
    pub users_in_photo: Vec<UserInPhoto>,
    pub location: Option<Location>,
}

/// Photo or video, decided by whether the item carries video renditions
#[derive(Debug, Clone, PartialEq)]
pub enum MediaKind {
    Photo,
    Video { videos: Renditions },
}

/// The sizes a photo or video is available in
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Renditions {
    #[serde(default)]
    pub low_resolution: Option<Rendition>,

    #[serde(default)]
    pub thumbnail: Option<Rendition>,

    #[serde(default)]
    pub standard_resolution: Option<Rendition>,

    // Only sent for some videos
    #[serde(default)]
    pub low_bandwidth: Option<Rendition>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub url: String,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

impl Media {
    pub fn is_video(&self) -> bool {
        matches!(self.kind, MediaKind::Video { .. })
    }

    pub fn videos(&self) -> Option<&Renditions> {
        match &self.kind {
            MediaKind::Video { videos } => Some(videos),
            MediaKind::Photo => None,
        }
    }

    fn playable(&self) -> &Renditions {
        self.videos().unwrap_or(&self.images)
    }

    /// Full size url: the video for videos, the image otherwise
    pub fn standard_resolution_url(&self) -> Option<&str> {
        self.playable()
            .standard_resolution
            .as_ref()
            .map(|r| r.url.as_str())
    }

    pub fn low_resolution_url(&self) -> Option<&str> {
        self.playable()
            .low_resolution
            .as_ref()
            .map(|r| r.url.as_str())
    }

    /// Thumbnails are always still images, even for videos
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.images.thumbnail.as_ref().map(|r| r.url.as_str())
    }

    /// Returns information for the specified media id
    pub async fn from_id(client: &Client, media_id: &str) -> Result<Self, InstagramError> {
        client.entry(&ApiRequest::get("media", Self::path(media_id))).await
    }

    /// Returns the media behind a short link code (the `xyz` in `instagram.com/p/xyz`)
    pub async fn from_shortcode(client: &Client, shortcode: &str) -> Result<Self, InstagramError> {
        let req = ApiRequest::get(
            "media_shortcode",
            format!("/media/shortcode/{}", urlencoding::encode(shortcode)),
        );
        client.entry(&req).await
    }

    /// Currently popular media
    pub async fn popular(client: &Client, count: Option<u32>) -> Result<Vec<Self>, InstagramError> {
        let req = ApiRequest::get("media_popular", "/media/popular").opt_param("count", count);
        Ok(client.items(&req).await?.0)
    }

    /// Most recent media published by a user (`None` for the authenticated
    /// user), with the pointer to older media
    pub async fn user_recent(
        client: &Client,
        user_id: Option<&str>,
        count: Option<u32>,
    ) -> Result<(Vec<Self>, Option<PageCursor>), InstagramError> {
        let user_id = urlencoding::encode(user_id.unwrap_or("self"));
        let req = ApiRequest::get("user_recent_media", format!("/users/{}/media/recent", user_id))
            .opt_param("count", count);
        client.items(&req).await
    }

    /// Streams the authenticated user's feed a page at a time
    pub fn user_feed(
        client: Client,
        count: Option<u32>,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = Result<Vec<Self>, InstagramError>> + use<> {
        let req = ApiRequest::get("user_media_feed", "/users/self/feed").opt_param("count", count);

        try_stream! {
            let pages = client.paginate(req, max_pages);
            pin_mut!(pages);
            while let Some(page) = pages.next().await {
                yield page?.items::<Media>()?;
            }
        }
    }

    /// Likes this media as the authenticated user
    pub async fn like(client: &Client, media_id: &str) -> Result<(), InstagramError> {
        let req = ApiRequest::post("like_media", format!("{}/likes", Self::path(media_id))).signed();
        client.execute(&req).await.map(|_| ())
    }

    /// Removes the authenticated user's like
    pub async fn unlike(client: &Client, media_id: &str) -> Result<(), InstagramError> {
        let req =
            ApiRequest::delete("unlike_media", format!("{}/likes", Self::path(media_id))).signed();
        client.execute(&req).await.map(|_| ())
    }

    fn path(media_id: &str) -> String {
        format!("/media/{}", urlencoding::encode(media_id))
    }
}

// Wire shape of a media item; flattened into `Media` once decoded
#[derive(Deserialize)]
struct MediaRecord {
    #[serde(deserialize_with = "from_str_or_num")]
    id: String,

    #[serde(default, deserialize_with = "from_identified")]
    user: Option<User>,

    #[serde(default)]
    images: Renditions,

    #[serde(default)]
    videos: Option<Renditions>,

    #[serde(default, deserialize_with = "from_identified")]
    caption: Option<Comment>,

    #[serde(default, deserialize_with = "from_timestamp")]
    created_time: Option<DateTime<Utc>>,

    #[serde(default)]
    link: Option<String>,

    #[serde(default)]
    filter: Option<String>,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default)]
    user_has_liked: Option<bool>,

    #[serde(default)]
    likes: Option<UserList>,

    #[serde(default)]
    comments: Option<CommentList>,

    #[serde(default)]
    users_in_photo: Vec<UserInPhoto>,

    #[serde(default, deserialize_with = "from_identified")]
    location: Option<Location>,
}

#[derive(Deserialize, Default)]
struct UserList {
    #[serde(default)]
    count: u64,

    #[serde(default, deserialize_with = "from_identified_vec")]
    data: Vec<User>,
}

#[derive(Deserialize, Default)]
struct CommentList {
    #[serde(default)]
    count: u64,

    #[serde(default, deserialize_with = "from_identified_vec")]
    data: Vec<Comment>,
}

impl From<MediaRecord> for Media {
    fn from(record: MediaRecord) -> Self {
        let kind = match record.videos {
            Some(videos) => MediaKind::Video { videos },
            None => MediaKind::Photo,
        };
        let likes = record.likes.unwrap_or_default();
        let comments = record.comments.unwrap_or_default();
        Self {
            id: record.id,
            kind,
            user: record.user,
            images: record.images,
            caption: record.caption,
            created_time: record.created_time,
            link: record.link,
            filter: record.filter,
            tags: record.tags,
            user_has_liked: record.user_has_liked,
            like_count: likes.count,
            likes: likes.data,
            comment_count: comments.count,
            comments: comments.data,
            users_in_photo: record.users_in_photo,
            location: record.location,
        }
    }
}
