//! Station identity types.

use std::fmt;

/// Identifier of a station in the directory.
///
/// The core refers to stations by id only; the `Station` record itself is
/// owned by the station directory and resolved at the boundary.
///
/// # Examples
///
/// ```
/// use subway_server::domain::StationId;
///
/// let id = StationId(1);
/// assert_eq!(id.0, 1);
///
/// // StationId is Copy, so it's cheap to pass around
/// let id2 = id;
/// assert_eq!(id, id2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StationId {
    fn from(value: u64) -> Self {
        StationId(value)
    }
}

impl From<StationId> for u64 {
    fn from(value: StationId) -> Self {
        value.0
    }
}

/// A station: immutable identity plus a display name.
///
/// Stations are created and owned by the station directory. Lines and
/// sections never hold a `Station` directly, only its [`StationId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Directory-assigned identifier
    pub id: StationId,
    /// Display name
    pub name: String,
}

impl Station {
    /// Creates a station with the given identity and name.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
