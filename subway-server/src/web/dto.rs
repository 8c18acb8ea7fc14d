//! Data transfer objects for web requests and responses.
//!
//! Wire field names are camelCase, matching the registry's public API.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::service::LineDetails;

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct StationRequest {
    /// Display name
    pub name: String,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResponse {
    /// Station id
    pub id: u64,

    /// Display name
    pub name: String,
}

impl StationResponse {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.clone(),
        }
    }
}

/// Request to create a line with its first section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCreateRequest {
    /// Display name
    pub name: String,

    /// Display colour (e.g. "bg-red-600")
    pub color: String,

    /// Up station of the first section
    pub up_station_id: u64,

    /// Down station of the first section
    pub down_station_id: u64,

    /// Length of the first section
    pub distance: u32,
}

/// Request to update a line's display fields.
#[derive(Debug, Deserialize)]
pub struct LineUpdateRequest {
    /// New display name
    pub name: String,

    /// New display colour
    pub color: String,
}

/// A line in responses, with its stations in path order.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    /// Line id
    pub id: u64,

    /// Display name
    pub name: String,

    /// Display colour
    pub color: String,

    /// Stations in path order, from the up terminal to the down terminal
    pub stations: Vec<StationResponse>,
}

impl LineResponse {
    pub fn from_details(details: &LineDetails) -> Self {
        Self {
            id: details.id.0,
            name: details.name.clone(),
            color: details.color.clone(),
            stations: details
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
        }
    }
}

/// Request to append a section to a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    /// Up station; must be the line's current terminal
    pub up_station_id: u64,

    /// Down station; must be new to the line
    pub down_station_id: u64,

    /// Section length
    pub distance: u32,
}

/// Query parameters for detaching a terminal station.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRemovalQuery {
    /// The terminal station to detach
    pub station_id: u64,
}

/// Error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub error: String,
}
