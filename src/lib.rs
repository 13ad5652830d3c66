/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Instagram
//!
//! This Instagram library was created for working with the Instagram APIv1 interface.
//!
//! ## Features
//!
//! - OAuth2 authorize url and code/password token exchange
//! - Client-only (client id) and user (access token) authenticated calls
//! - Signed requests (`sig` parameter and `X-Insta-Forwarded-For` header)
//! - Lazily paged result sets as [`futures::Stream`]s
//! - Media, User, Comment, Location and Tag models
//!     - Embedded users/locations missing an id are dropped instead of half decoded
//!     - Photos and videos are told apart when decoded ([`v1::MediaKind`])
//! - Lower level interface for handling the raw communication ([`v1::Client::execute`])
//!   and a pluggable [`v1::Transport`]
//!
//! *Consuming the authorize url is a browser action and is left up to the consumer of this
//! library*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! instagram = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use instagram::v1::{Client, Creds, Media, InstagramError};
//! use futures::{pin_mut, StreamExt};
//!
//! async fn print_feed(access_token: &str) -> Result<(), InstagramError> {
//!     let client = Client::new(Creds::from_access_token(access_token));
//!
//!     // At most three pages of twenty, fetched only as they are consumed
//!     let feed = Media::user_feed(client.clone(), Some(20), Some(3));
//!     pin_mut!(feed);
//!     while let Some(page) = feed.next().await {
//!         for media in page? {
//!             println!("{} {:?}", media.id, media.standard_resolution_url());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod v1;
