//! Store error types.

use crate::domain::{InvalidChain, LineId, StationId};

/// Errors raised by the in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No station with the given id exists
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// No line with the given id exists
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// The stored rows for a line no longer chain into a single path
    #[error("stored sections for line {line} are corrupt: {source}")]
    CorruptLine {
        /// The affected line
        line: LineId,
        /// Why the rows could not be chained
        #[source]
        source: InvalidChain,
    },
}
