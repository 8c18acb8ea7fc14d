//! Domain types for the subway line registry.
//!
//! This module contains the core domain model: station and line identity,
//! the `Section` edge type, and the `Sections` topology engine that keeps
//! each line's chain a single non-branching path. All types enforce their
//! invariants at construction or mutation time, so code that receives them
//! can trust their validity.

mod error;
mod line;
mod section;
mod sections;
mod station;

pub use error::SectionError;
pub use line::{Line, LineId};
pub use section::{InvalidSection, Section};
pub use sections::{InvalidChain, Sections};
pub use station::{Station, StationId};
