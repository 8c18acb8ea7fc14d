//! Domain error types.
//!
//! Every topology rule violation is reported synchronously as one of these
//! variants. None of them is recoverable by retrying with the same
//! arguments; the caller must supply a corrected section or station.

use super::StationId;

/// Rule violations raised by the line topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// The candidate section is already registered on the line
    #[error("section is already registered on this line")]
    SectionAlreadyRegistered,

    /// The candidate's up station is not the line's terminal down station
    #[error("section must start at the line's terminal station {expected}, not {got}")]
    InvalidUpStation {
        /// The line's current terminal down station
        expected: StationId,
        /// The candidate's up station
        got: StationId,
    },

    /// The candidate's down station already appears in the chain
    #[error("station {0} is already part of the line")]
    DuplicateDownStation(StationId),

    /// A line must always retain at least one section
    #[error("cannot remove the only section of a line")]
    MinimumSectionSize,

    /// Only the line's terminal down station may be detached
    #[error("station {0} is not the line's terminal station")]
    NotLastStation(StationId),
}
