/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use num_enum::TryFromPrimitive;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Permissions that can be requested when authorizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Scope {
    Basic,
    PublicContent,
    FollowerList,
    Comments,
    Relationships,
    Likes,
}

/// Query parameters the API uses to point at the next page.
///
/// Declared in the order they are preferred when a page carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CursorParam {
    Cursor,
    MaxTagId,
    MaxLikeId,
    MaxId,
}

impl CursorParam {
    pub const ALL: [CursorParam; 4] = [
        CursorParam::Cursor,
        CursorParam::MaxTagId,
        CursorParam::MaxLikeId,
        CursorParam::MaxId,
    ];
}

/// Response codes per the Instagram API docs
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum ApiResponseCode {
    // Good Codes
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,

    // Failing Codes
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    TooManyRequests = 429,
    InternalServerError = 500,
    BadGateway = 502,
    ServiceUnavailable = 503,
}

impl ApiResponseCode {
    /// Codes that mean the client is being throttled
    pub fn is_rate_limited(code: u16) -> bool {
        use ApiResponseCode as C;
        matches!(
            C::try_from(code),
            Ok(C::TooManyRequests | C::ServiceUnavailable)
        )
    }

    pub fn is_success(code: u16) -> bool {
        (200..300).contains(&code)
    }
}
