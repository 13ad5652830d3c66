/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::InstagramError;
use crate::v1::parsers::{from_empty_str_to_none, from_identified, from_str_or_num};
use crate::v1::{ApiRequest, Client};
use async_stream::try_stream;
use futures::{Stream, StreamExt, pin_mut};
use serde::Deserialize;

/// Holds information returned from the Users API.
///
/// See [Instagram API Docs](https://www.instagram.com/developer/endpoints/users/) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "from_str_or_num")]
    pub id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub full_name: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub profile_picture: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub website: Option<String>,

    #[serde(default)]
    pub counts: Option<UserCounts>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserCounts {
    #[serde(default)]
    pub media: u64,

    #[serde(default)]
    pub follows: u64,

    #[serde(default)]
    pub followed_by: u64,
}

/// A user tagged in a photo, and where
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserInPhoto {
    // None when the API leaves out the user's id
    #[serde(default, deserialize_with = "from_identified")]
    pub user: Option<User>,

    pub position: Position,
}

/// Relative position within the image, 0.0 to 1.0 on each axis
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl User {
    /// Returns information for the authenticated user
    pub async fn authenticated(client: &Client) -> Result<Self, InstagramError> {
        Self::from_id(client, "self").await
    }

    /// Returns information for the specified user id
    pub async fn from_id(client: &Client, user_id: &str) -> Result<Self, InstagramError> {
        let req = ApiRequest::get("user", format!("/users/{}", urlencoding::encode(user_id)));
        client.entry(&req).await
    }

    /// Searches users by name
    pub async fn search(
        client: &Client,
        query: &str,
        count: Option<u32>,
    ) -> Result<Vec<Self>, InstagramError> {
        let req = ApiRequest::get("user_search", "/users/search")
            .param("q", query)
            .opt_param("count", count);
        Ok(client.items(&req).await?.0)
    }

    /// Streams the users `user_id` follows, a page at a time. `None` is the
    /// authenticated user.
    pub fn follows(
        client: Client,
        user_id: Option<&str>,
        max_pages: Option<usize>,
    ) -> impl Stream<Item = Result<Vec<Self>, InstagramError>> + use<> {
        let user_id = urlencoding::encode(user_id.unwrap_or("self")).into_owned();
        let req = ApiRequest::get("user_follows", format!("/users/{}/follows", user_id));

        try_stream! {
            let pages = client.paginate(req, max_pages);
            pin_mut!(pages);
            while let Some(page) = pages.next().await {
                yield page?.items::<User>()?;
            }
        }
    }
}
