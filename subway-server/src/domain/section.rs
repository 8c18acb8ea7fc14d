//! Track section type.

use super::{LineId, StationId};

/// Error returned when constructing an invalid section.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid section: {reason}")]
pub struct InvalidSection {
    reason: &'static str,
}

/// One directed track edge between two stations.
///
/// A section runs from its up station to its down station over a positive,
/// unit-less distance. The owning line is stamped by the topology when the
/// section is accepted, never by the caller.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Section, StationId};
///
/// let section = Section::new(StationId(1), StationId(2), 10).unwrap();
/// assert_eq!(section.up_station(), StationId(1));
/// assert_eq!(section.down_station(), StationId(2));
/// assert_eq!(section.distance(), 10);
/// assert!(section.line().is_none());
///
/// // Zero distance is rejected
/// assert!(Section::new(StationId(1), StationId(2), 0).is_err());
///
/// // Self-loops are rejected
/// assert!(Section::new(StationId(1), StationId(1), 10).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Section {
    up_station: StationId,
    down_station: StationId,
    distance: u32,
    line: Option<LineId>,
}

impl Section {
    /// Construct a section, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `distance` is zero or both endpoints are the same
    /// station.
    pub fn new(
        up_station: StationId,
        down_station: StationId,
        distance: u32,
    ) -> Result<Self, InvalidSection> {
        if distance == 0 {
            return Err(InvalidSection {
                reason: "distance must be positive",
            });
        }

        if up_station == down_station {
            return Err(InvalidSection {
                reason: "up and down stations must differ",
            });
        }

        Ok(Section {
            up_station,
            down_station,
            distance,
            line: None,
        })
    }

    /// Returns the up (origin) station id.
    pub fn up_station(&self) -> StationId {
        self.up_station
    }

    /// Returns the down (destination) station id.
    pub fn down_station(&self) -> StationId {
        self.down_station
    }

    /// Returns the section length.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Returns the owning line, if the section has been accepted into one.
    pub fn line(&self) -> Option<LineId> {
        self.line
    }

    /// Stamp the owning line. Called by the topology on insertion.
    pub(crate) fn attach(&mut self, line: LineId) {
        self.line = Some(line);
    }
}

// Structural equality over (up_station, down_station, distance). Line
// assignment does not participate, so a candidate that has not yet been
// accepted into a topology still compares equal to a stored section.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.up_station == other.up_station
            && self.down_station == other.down_station
            && self.distance == other.distance
    }
}

impl Eq for Section {}
