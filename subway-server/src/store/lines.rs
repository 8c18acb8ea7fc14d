//! In-memory line store.
//!
//! Each line is stored as its identity fields plus an *unordered* set of
//! section rows, the shape a relational edge table would give back. Path
//! order is rebuilt structurally on every load; stored order is never
//! trusted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{Line, LineId, Section, Sections};

use super::error::StoreError;

/// A stored line: identity fields plus its section rows.
#[derive(Debug, Clone)]
struct LineRecord {
    name: String,
    color: String,
    rows: Vec<Section>,
}

impl LineRecord {
    fn of(line: &Line) -> Self {
        Self {
            name: line.name.clone(),
            color: line.color.clone(),
            rows: line.sections().iter().cloned().collect(),
        }
    }

    fn rebuild(&self, id: LineId) -> Result<Line, StoreError> {
        let sections = Sections::from_rows(id, self.rows.clone())
            .map_err(|source| StoreError::CorruptLine { line: id, source })?;
        Ok(Line::from_parts(
            id,
            self.name.clone(),
            self.color.clone(),
            sections,
        ))
    }
}

/// Thread-safe line repository.
#[derive(Clone, Default)]
pub struct LineStore {
    inner: Arc<RwLock<HashMap<LineId, LineRecord>>>,
    next_id: Arc<AtomicU64>,
}

impl LineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a line under a fresh id with its first section.
    pub async fn create(
        &self,
        name: impl Into<String>,
        color: impl Into<String>,
        initial: Section,
    ) -> Line {
        let id = LineId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let line = Line::new(id, name, color, initial);

        let mut guard = self.inner.write().await;
        guard.insert(id, LineRecord::of(&line));
        debug!(line = %id, "created line");

        line
    }

    /// Load a line, rebuilding its chain from the stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LineNotFound`] for an unknown id, or
    /// [`StoreError::CorruptLine`] if the rows no longer chain.
    pub async fn load(&self, id: LineId) -> Result<Line, StoreError> {
        let guard = self.inner.read().await;
        let record = guard.get(&id).ok_or(StoreError::LineNotFound(id))?;
        record.rebuild(id)
    }

    /// All lines, in id order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptLine`] if any line's rows no longer
    /// chain.
    pub async fn list(&self) -> Result<Vec<Line>, StoreError> {
        let guard = self.inner.read().await;
        let mut ids: Vec<LineId> = guard.keys().copied().collect();
        ids.sort();

        let mut lines = Vec::with_capacity(ids.len());
        for id in ids {
            // Safe: id came from the map under the same read guard
            lines.push(guard[&id].rebuild(id)?);
        }
        Ok(lines)
    }

    /// Load a line, apply `f` to it, and write the result back, all under
    /// one write lock. Mutations of the same line are therefore serialised
    /// per process.
    ///
    /// The closure's own result is passed through; a domain-level failure
    /// leaves the line unmutated, so writing it back is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LineNotFound`] for an unknown id, or
    /// [`StoreError::CorruptLine`] if the rows no longer chain.
    pub async fn with_line_mut<T>(
        &self,
        id: LineId,
        f: impl FnOnce(&mut Line) -> T,
    ) -> Result<T, StoreError> {
        let mut guard = self.inner.write().await;
        let record = guard.get_mut(&id).ok_or(StoreError::LineNotFound(id))?;
        let mut line = record.rebuild(id)?;

        let out = f(&mut line);
        *record = LineRecord::of(&line);
        Ok(out)
    }

    /// Replace a line's display name and colour.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LineNotFound`] for an unknown id.
    pub async fn update(
        &self,
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        let record = guard.get_mut(&id).ok_or(StoreError::LineNotFound(id))?;
        record.name = name.into();
        record.color = color.into();
        Ok(())
    }

    /// Delete a line and, with it, all of its section rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LineNotFound`] for an unknown id.
    pub async fn remove(&self, id: LineId) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        guard
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::LineNotFound(id))
    }
}
