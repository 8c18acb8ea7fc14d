//! Line service: orchestration between the directory, the store, and the
//! topology engine.
//!
//! Resolves station ids, constructs candidate sections, drives the line
//! topology, and shapes fully resolved line views for the web layer. All
//! rule enforcement lives in the domain; this module only wires the
//! collaborators together.

use tracing::{debug, info};

use crate::domain::{InvalidSection, Line, LineId, Section, SectionError, Station, StationId};
use crate::store::{LineStore, StationDirectory, StoreError};

/// Error raised by service operations.
///
/// Wraps the underlying failure unchanged so the web layer can decide the
/// user-facing presentation per kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// A topology rule was violated
    #[error(transparent)]
    Rule(#[from] SectionError),

    /// The requested section is not constructible
    #[error(transparent)]
    InvalidSection(#[from] InvalidSection),

    /// A lookup or persistence step failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fully resolved view of a line: identity plus the ordered station
/// records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetails {
    pub id: LineId,
    pub name: String,
    pub color: String,
    /// Stations in path order, resolved through the directory
    pub stations: Vec<Station>,
}

/// Orchestrates line and section operations.
#[derive(Clone)]
pub struct LineService {
    stations: StationDirectory,
    lines: LineStore,
}

impl LineService {
    /// Create a service over the given collaborators.
    pub fn new(stations: StationDirectory, lines: LineStore) -> Self {
        Self { stations, lines }
    }

    /// Create a line from its first section.
    ///
    /// Both endpoint stations must already exist in the directory.
    pub async fn create_line(
        &self,
        name: impl Into<String>,
        color: impl Into<String>,
        up_station: StationId,
        down_station: StationId,
        distance: u32,
    ) -> Result<LineDetails, ServiceError> {
        let up = self.stations.resolve(up_station).await?;
        let down = self.stations.resolve(down_station).await?;

        let initial = Section::new(up.id, down.id, distance)?;
        let line = self.lines.create(name, color, initial).await;
        info!(line = %line.id, "created line {}", line.name);

        self.details(&line).await
    }

    /// Append a section to a line's chain.
    pub async fn add_section(
        &self,
        line_id: LineId,
        up_station: StationId,
        down_station: StationId,
        distance: u32,
    ) -> Result<LineDetails, ServiceError> {
        self.stations.resolve(up_station).await?;
        self.stations.resolve(down_station).await?;
        let candidate = Section::new(up_station, down_station, distance)?;

        let line = self
            .lines
            .with_line_mut(line_id, |line| {
                line.add_section(candidate)?;
                Ok::<_, SectionError>(line.clone())
            })
            .await??;
        debug!(line = %line_id, "added section {} -> {}", up_station, down_station);

        self.details(&line).await
    }

    /// Detach a line's terminal station.
    pub async fn remove_section(
        &self,
        line_id: LineId,
        station_id: StationId,
    ) -> Result<(), ServiceError> {
        self.stations.resolve(station_id).await?;

        self.lines
            .with_line_mut(line_id, |line| line.remove_section(station_id))
            .await??;
        debug!(line = %line_id, "removed section ending at {}", station_id);

        Ok(())
    }

    /// A single line with its ordered stations.
    pub async fn get_line(&self, id: LineId) -> Result<LineDetails, ServiceError> {
        let line = self.lines.load(id).await?;
        self.details(&line).await
    }

    /// All lines with their ordered stations, in id order.
    pub async fn list_lines(&self) -> Result<Vec<LineDetails>, ServiceError> {
        let lines = self.lines.list().await?;
        let mut details = Vec::with_capacity(lines.len());
        for line in &lines {
            details.push(self.details(line).await?);
        }
        Ok(details)
    }

    /// Replace a line's display name and colour.
    pub async fn update_line(
        &self,
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), ServiceError> {
        self.lines.update(id, name, color).await?;
        Ok(())
    }

    /// Delete a line and its sections.
    pub async fn delete_line(&self, id: LineId) -> Result<(), ServiceError> {
        self.lines.remove(id).await?;
        info!(line = %id, "deleted line");
        Ok(())
    }

    async fn details(&self, line: &Line) -> Result<LineDetails, ServiceError> {
        let mut stations = Vec::with_capacity(line.sections().len() + 1);
        for id in line.ordered_stations() {
            stations.push(self.stations.resolve(id).await?);
        }

        Ok(LineDetails {
            id: line.id,
            name: line.name.clone(),
            color: line.color.clone(),
            stations,
        })
    }
}
