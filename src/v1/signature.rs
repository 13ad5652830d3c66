/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Request signing for "enforce signed requests" mode.
//!
//! A signature is the lowercase hex HMAC-SHA256 of the endpoint path followed
//! by every `key=value` pair in key order, each prefixed with `|`:
//!
//! ```text
//! /media/657988443280050001_25025320|access_token=fb2e77d.47a04799|count=10
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the query parameter carrying the signature
pub const SIGNATURE_PARAM: &str = "sig";

/// Header carrying the signed client IP list
pub const FORWARDED_FOR_HEADER: &str = "X-Insta-Forwarded-For";

/// Signs `endpoint` plus `params` with the client secret.
///
/// Parameter order does not matter; pairs are sorted by key (then value)
/// before they are joined. A repeated key is signed once per value.
pub fn sign<'a, I>(secret: &str, endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut sorted: Vec<(&str, &str)> = params.into_iter().collect();
    sorted.sort_unstable();
    let mut message = String::from(endpoint);
    for (key, value) in sorted {
        message.push('|');
        message.push_str(key);
        message.push('=');
        message.push_str(value);
    }
    hmac_hex(secret, &message)
}

/// Value for the [`FORWARDED_FOR_HEADER`] header: `ips|signature`.
pub fn sign_ips(secret: &str, ips: &str) -> String {
    format!("{}|{}", ips, hmac_hex(secret, ips))
}

fn hmac_hex(secret: &str, message: &str) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 takes keys of any size"));
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
