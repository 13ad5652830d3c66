/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::InstagramError;
use crate::v1::parsers::from_str_or_num;
use crate::v1::{ApiRequest, Client};
use serde::Deserialize;

/// Holds information returned from the Locations API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "LocationRecord")]
pub struct Location {
    pub id: String,
    pub name: Option<String>,
    pub point: Option<Point>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Returns information for the specified location id
    pub async fn from_id(client: &Client, location_id: &str) -> Result<Self, InstagramError> {
        let req = ApiRequest::get(
            "location",
            format!("/locations/{}", urlencoding::encode(location_id)),
        );
        client.entry(&req).await
    }
}

// Coordinates come flat on the wire
#[derive(Deserialize)]
struct LocationRecord {
    #[serde(deserialize_with = "from_str_or_num")]
    id: String,

    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    latitude: Option<f64>,

    #[serde(default)]
    longitude: Option<f64>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        let point = match (record.latitude, record.longitude) {
            (Some(latitude), Some(longitude)) => Some(Point {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            id: record.id,
            name: record.name,
            point,
        }
    }
}
