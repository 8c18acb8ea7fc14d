//! Line type.

use std::fmt;

use super::{Section, SectionError, Sections, StationId};

/// Identifier of a line in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LineId {
    fn from(value: u64) -> Self {
        LineId(value)
    }
}

impl From<LineId> for u64 {
    fn from(value: LineId) -> Self {
        value.0
    }
}

/// A named transit route and its section chain.
///
/// A line is created together with its first section and always holds at
/// least one. Mutations go through the topology, which enforces the chain
/// rules; the line just passes its identity along for stamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Store-assigned identifier
    pub id: LineId,
    /// Display name
    pub name: String,
    /// Display colour (e.g. "bg-red-600")
    pub color: String,
    sections: Sections,
}

impl Line {
    /// Create a line with its first section.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Section,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections: Sections::new(id, initial),
        }
    }

    /// Reassemble a line from stored parts. `sections` must already be
    /// scoped to `id`.
    pub fn from_parts(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        sections: Sections,
    ) -> Self {
        debug_assert_eq!(sections.line(), id);
        Self {
            id,
            name: name.into(),
            color: color.into(),
            sections,
        }
    }

    /// Returns the section chain.
    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// The line's stations in path order.
    pub fn ordered_stations(&self) -> Vec<StationId> {
        self.sections.ordered_stations()
    }

    /// Append a section at the tail of the chain.
    ///
    /// # Errors
    ///
    /// See [`Sections::add_section`].
    pub fn add_section(&mut self, candidate: Section) -> Result<(), SectionError> {
        self.sections.add_section(candidate)
    }

    /// Detach the terminal station's section from the chain.
    ///
    /// # Errors
    ///
    /// See [`Sections::remove_section`].
    pub fn remove_section(&mut self, station: StationId) -> Result<(), SectionError> {
        self.sections.remove_section(station)
    }

    /// Replace the line's display name and colour.
    pub fn update(&mut self, name: impl Into<String>, color: impl Into<String>) {
        self.name = name.into();
        self.color = color.into();
    }
}
