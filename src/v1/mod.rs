/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod auth;
pub mod client;
pub mod comment;
pub mod errors;
pub mod location;
pub mod media;
pub mod page;
mod parsers;
pub mod properties;
pub mod request;
pub mod signature;
pub mod tag;
pub mod transport;
pub mod user;

pub use auth::*;
pub use client::*;
pub use comment::*;
pub use errors::*;
pub use location::*;
pub use media::*;
pub use page::*;
pub use parsers::timestamp_to_datetime;
pub use properties::*;
pub use request::*;
pub use tag::*;
pub use transport::*;
pub use user::*;
