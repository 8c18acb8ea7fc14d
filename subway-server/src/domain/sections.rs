//! Line topology: the ordered section chain.
//!
//! `Sections` is the sole authority over the shape of one line's chain.
//! It keeps the sequence forming a single, non-branching, non-cyclic path
//! between two terminal stations, and enforces the append/removal rules
//! when the chain is mutated.

use std::collections::{HashMap, HashSet};

use super::{LineId, Section, SectionError, StationId};

/// Error returned when a set of stored rows does not form a single chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("section rows do not form a single chain: {reason}")]
pub struct InvalidChain {
    reason: &'static str,
}

/// The ordered sequence of sections forming one line's path.
///
/// # Invariants
///
/// - Adjacent sections connect: each section's up station equals the
///   previous section's down station.
/// - No station appears as the down station of more than one section, so
///   the path never branches or cycles back into itself.
/// - The chain holds at least one section once constructed; the last
///   section can never be removed.
///
/// The chain only ever grows and shrinks at the tail. Validation completes
/// before any structural change, so a failed mutation leaves the chain
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    line: LineId,
    sections: Vec<Section>,
}

impl Sections {
    /// Create a topology from its first section, stamping the section with
    /// the owning line.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{LineId, Section, Sections, StationId};
    ///
    /// let initial = Section::new(StationId(1), StationId(2), 10).unwrap();
    /// let sections = Sections::new(LineId(1), initial);
    ///
    /// assert_eq!(sections.len(), 1);
    /// assert_eq!(
    ///     sections.ordered_stations(),
    ///     vec![StationId(1), StationId(2)]
    /// );
    /// ```
    pub fn new(line: LineId, mut initial: Section) -> Self {
        initial.attach(line);
        Self {
            line,
            sections: vec![initial],
        }
    }

    /// Rebuild a topology from unordered edge rows.
    ///
    /// Stored rows carry no sequence number, so path order is recovered
    /// structurally: the head is the one up station that no row uses as a
    /// down station, and rows are chained from there by matching station
    /// ids. Every accepted row is stamped with the owning line.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the rows are empty, share an endpoint (branch),
    /// close into a cycle, or fall apart into disconnected pieces.
    pub fn from_rows(line: LineId, rows: Vec<Section>) -> Result<Self, InvalidChain> {
        if rows.is_empty() {
            return Err(InvalidChain {
                reason: "no rows to chain",
            });
        }

        let mut by_up = HashMap::with_capacity(rows.len());
        let mut downs = HashSet::with_capacity(rows.len());
        for row in rows {
            if !downs.insert(row.down_station()) {
                return Err(InvalidChain {
                    reason: "two rows share a down station",
                });
            }
            if by_up.insert(row.up_station(), row).is_some() {
                return Err(InvalidChain {
                    reason: "two rows share an up station",
                });
            }
        }

        // The head's up station is the only one that is nobody's down station.
        let mut head = None;
        for up in by_up.keys() {
            if !downs.contains(up) {
                if head.is_some() {
                    return Err(InvalidChain {
                        reason: "rows form more than one path",
                    });
                }
                head = Some(*up);
            }
        }
        let Some(mut cursor) = head else {
            return Err(InvalidChain {
                reason: "rows form a cycle",
            });
        };

        let mut sections = Vec::with_capacity(by_up.len());
        while let Some(mut section) = by_up.remove(&cursor) {
            cursor = section.down_station();
            section.attach(line);
            sections.push(section);
        }
        if !by_up.is_empty() {
            return Err(InvalidChain {
                reason: "rows form more than one path",
            });
        }

        Ok(Self { line, sections })
    }

    /// Returns the owning line.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the chain length.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if the chain holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over the sections in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Returns the tail section, if any.
    pub fn last_section(&self) -> Option<&Section> {
        self.sections.last()
    }

    /// Structural membership test for the duplicate guard.
    pub fn contains(&self, candidate: &Section) -> bool {
        self.sections.contains(candidate)
    }

    /// The line's stations in path order.
    ///
    /// Every section contributes its up station, and the tail contributes
    /// its down station, so the result always holds `len() + 1` stations.
    /// Recomputed on each call.
    pub fn ordered_stations(&self) -> Vec<StationId> {
        let mut stations: Vec<StationId> =
            self.sections.iter().map(|s| s.up_station()).collect();
        if let Some(tail) = self.sections.last() {
            stations.push(tail.down_station());
        }
        stations
    }

    /// Append a section at the tail.
    ///
    /// Preconditions, checked in order (the first failing rule wins):
    ///
    /// 1. The candidate must not already be registered on the line.
    /// 2. The candidate's up station must be the current terminal down
    ///    station.
    /// 3. The candidate's down station must not already appear anywhere in
    ///    the chain.
    ///
    /// On success the candidate is stamped with the owning line and the
    /// chain grows by one.
    ///
    /// # Errors
    ///
    /// [`SectionError::SectionAlreadyRegistered`],
    /// [`SectionError::InvalidUpStation`], or
    /// [`SectionError::DuplicateDownStation`].
    pub fn add_section(&mut self, mut candidate: Section) -> Result<(), SectionError> {
        if self.contains(&candidate) {
            return Err(SectionError::SectionAlreadyRegistered);
        }

        if let Some(tail) = self.sections.last() {
            if candidate.up_station() != tail.down_station() {
                return Err(SectionError::InvalidUpStation {
                    expected: tail.down_station(),
                    got: candidate.up_station(),
                });
            }
        }

        let down = candidate.down_station();
        if self
            .sections
            .iter()
            .any(|s| s.up_station() == down || s.down_station() == down)
        {
            return Err(SectionError::DuplicateDownStation(down));
        }

        candidate.attach(self.line);
        self.sections.push(candidate);
        Ok(())
    }

    /// Detach the tail section, identified by its down station.
    ///
    /// Preconditions, checked in order:
    ///
    /// 1. The chain must hold more than one section.
    /// 2. `station` must be the current terminal down station.
    ///
    /// On success the chain shrinks by one and the previous section's down
    /// station becomes the line's terminal station.
    ///
    /// # Errors
    ///
    /// [`SectionError::MinimumSectionSize`] or
    /// [`SectionError::NotLastStation`].
    pub fn remove_section(&mut self, station: StationId) -> Result<(), SectionError> {
        if self.sections.len() <= 1 {
            return Err(SectionError::MinimumSectionSize);
        }

        match self.sections.last() {
            Some(tail) if tail.down_station() == station => {
                self.sections.pop();
                Ok(())
            }
            _ => Err(SectionError::NotLastStation(station)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(up: u64, down: u64, distance: u32) -> Section {
        Section::new(StationId(up), StationId(down), distance).unwrap()
    }

    /// A line A(1) -> B(2), distance 10.
    fn single_section_line() -> Sections {
        Sections::new(LineId(1), section(1, 2, 10))
    }

    /// A line A(1) -> B(2) -> C(3).
    fn two_section_line() -> Sections {
        let mut sections = single_section_line();
        sections.add_section(section(2, 3, 5)).unwrap();
        sections
    }

    #[test]
    fn new_stamps_line_on_initial_section() {
        let sections = single_section_line();
        assert_eq!(sections.last_section().unwrap().line(), Some(LineId(1)));
    }

    #[test]
    fn add_section_extends_tail() {
        let sections = two_section_line();

        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections.ordered_stations(),
            vec![StationId(1), StationId(2), StationId(3)]
        );
        let tail = sections.last_section().unwrap();
        assert_eq!(tail.down_station(), StationId(3));
        assert_eq!(tail.line(), Some(LineId(1)));
    }

    #[test]
    fn add_section_rejects_duplicate() {
        let mut sections = single_section_line();
        let result = sections.add_section(section(1, 2, 10));

        assert_eq!(result, Err(SectionError::SectionAlreadyRegistered));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn duplicate_guard_ignores_line_assignment() {
        // A fresh candidate carries no line, the stored section does; the
        // guard must still treat them as the same section.
        let mut sections = single_section_line();
        let candidate = section(1, 2, 10);
        assert!(candidate.line().is_none());

        assert!(sections.contains(&candidate));
        assert_eq!(
            sections.add_section(candidate),
            Err(SectionError::SectionAlreadyRegistered)
        );
    }

    #[test]
    fn add_section_rejects_detached_up_station() {
        let mut sections = two_section_line();
        let result = sections.add_section(section(1, 4, 5));

        assert_eq!(
            result,
            Err(SectionError::InvalidUpStation {
                expected: StationId(3),
                got: StationId(1),
            })
        );
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn add_section_rejects_revisited_down_station() {
        let mut sections = two_section_line();
        let result = sections.add_section(section(3, 1, 3));

        assert_eq!(
            result,
            Err(SectionError::DuplicateDownStation(StationId(1)))
        );
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn duplicate_guard_wins_over_continuity_check() {
        // A re-submitted first section fails the tail-continuity rule too;
        // the duplicate guard is checked first.
        let mut sections = two_section_line();
        let result = sections.add_section(section(1, 2, 10));

        assert_eq!(result, Err(SectionError::SectionAlreadyRegistered));
    }

    #[test]
    fn remove_section_detaches_tail() {
        let mut sections = two_section_line();
        sections.remove_section(StationId(3)).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections.ordered_stations(),
            vec![StationId(1), StationId(2)]
        );
        assert_eq!(
            sections.last_section().unwrap().down_station(),
            StationId(2)
        );
    }

    #[test]
    fn remove_section_rejects_non_terminal_station() {
        let mut sections = two_section_line();
        let result = sections.remove_section(StationId(2));

        assert_eq!(result, Err(SectionError::NotLastStation(StationId(2))));
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn remove_section_rejects_last_section() {
        let mut sections = single_section_line();
        let result = sections.remove_section(StationId(2));

        assert_eq!(result, Err(SectionError::MinimumSectionSize));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn minimum_size_wins_over_terminal_check() {
        // Removing a non-terminal station from a single-section line
        // reports the size violation, not the terminal mismatch.
        let mut sections = single_section_line();
        let result = sections.remove_section(StationId(1));

        assert_eq!(result, Err(SectionError::MinimumSectionSize));
    }

    #[test]
    fn add_then_remove_restores_chain() {
        let before = two_section_line();

        let mut sections = before.clone();
        sections.add_section(section(3, 4, 7)).unwrap();
        sections.remove_section(StationId(4)).unwrap();

        assert_eq!(sections, before);
    }

    #[test]
    fn ordered_stations_has_one_more_entry_than_sections() {
        let mut sections = single_section_line();
        for (up, down) in [(2, 3), (3, 4), (4, 5)] {
            sections.add_section(section(up, down, 1)).unwrap();
            assert_eq!(sections.ordered_stations().len(), sections.len() + 1);
        }
    }

    #[test]
    fn from_rows_chains_unordered_rows() {
        let rows = vec![section(3, 4, 7), section(1, 2, 10), section(2, 3, 5)];
        let sections = Sections::from_rows(LineId(2), rows).unwrap();

        assert_eq!(
            sections.ordered_stations(),
            vec![StationId(1), StationId(2), StationId(3), StationId(4)]
        );
        assert!(sections.iter().all(|s| s.line() == Some(LineId(2))));
    }

    #[test]
    fn from_rows_rejects_empty() {
        assert!(Sections::from_rows(LineId(1), vec![]).is_err());
    }

    #[test]
    fn from_rows_rejects_branch() {
        // 2 -> 3 and 2 -> 4 branch at station 2.
        let rows = vec![section(1, 2, 1), section(2, 3, 1), section(2, 4, 1)];
        assert!(Sections::from_rows(LineId(1), rows).is_err());
    }

    #[test]
    fn from_rows_rejects_merge() {
        // 1 -> 3 and 2 -> 3 merge at station 3.
        let rows = vec![section(1, 3, 1), section(2, 3, 1)];
        assert!(Sections::from_rows(LineId(1), rows).is_err());
    }

    #[test]
    fn from_rows_rejects_cycle() {
        let rows = vec![section(1, 2, 1), section(2, 3, 1), section(3, 1, 1)];
        assert!(Sections::from_rows(LineId(1), rows).is_err());
    }

    #[test]
    fn from_rows_rejects_disconnected_rows() {
        let rows = vec![section(1, 2, 1), section(5, 6, 1)];
        assert!(Sections::from_rows(LineId(1), rows).is_err());
    }

    #[test]
    fn from_rows_rejects_chain_plus_cycle() {
        let rows = vec![
            section(1, 2, 1),
            section(5, 6, 1),
            section(6, 7, 1),
            section(7, 5, 1),
        ];
        assert!(Sections::from_rows(LineId(1), rows).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a valid chain: distinct station ids joined by sections
    /// with arbitrary positive distances.
    fn valid_chain() -> impl Strategy<Value = Vec<Section>> {
        (2usize..10).prop_flat_map(|stations| {
            let ids = Just((0..stations as u64).collect::<Vec<_>>()).prop_shuffle();
            let distances = proptest::collection::vec(1u32..100, stations - 1);
            (ids, distances).prop_map(|(ids, distances)| {
                ids.windows(2)
                    .zip(distances)
                    .map(|(pair, d)| {
                        Section::new(StationId(pair[0]), StationId(pair[1]), d).unwrap()
                    })
                    .collect()
            })
        })
    }

    fn topology(chain: Vec<Section>) -> Sections {
        let mut iter = chain.into_iter();
        let mut sections = Sections::new(LineId(1), iter.next().unwrap());
        for section in iter {
            sections.add_section(section).unwrap();
        }
        sections
    }

    proptest! {
        /// Ordered stations always hold one more entry than the chain.
        #[test]
        fn ordered_stations_length(chain in valid_chain()) {
            let sections = topology(chain);
            prop_assert_eq!(sections.ordered_stations().len(), sections.len() + 1);
        }

        /// A successful append grows the chain by one and makes the
        /// candidate's down station the terminal.
        #[test]
        fn add_grows_at_tail(chain in valid_chain(), distance in 1u32..100) {
            let mut sections = topology(chain);
            let n = sections.len();
            let tail = sections.last_section().unwrap().down_station();
            let fresh = StationId(1_000);

            sections
                .add_section(Section::new(tail, fresh, distance).unwrap())
                .unwrap();

            prop_assert_eq!(sections.len(), n + 1);
            prop_assert_eq!(sections.last_section().unwrap().down_station(), fresh);
        }

        /// Appending a section whose down station is already in the chain
        /// never succeeds.
        #[test]
        fn revisits_always_rejected(chain in valid_chain(), distance in 1u32..100) {
            let mut sections = topology(chain);
            let tail = sections.last_section().unwrap().down_station();

            for revisit in sections.ordered_stations() {
                if revisit == tail {
                    // A tail -> tail candidate is not constructible at all.
                    prop_assert!(Section::new(tail, revisit, distance).is_err());
                    continue;
                }
                let candidate = Section::new(tail, revisit, distance).unwrap();
                prop_assert!(sections.clone().add_section(candidate).is_err());
            }
        }

        /// Append-then-remove restores the exact prior chain.
        #[test]
        fn add_remove_round_trip(chain in valid_chain(), distance in 1u32..100) {
            let before = topology(chain);
            let tail = before.last_section().unwrap().down_station();
            let fresh = StationId(1_000);

            let mut sections = before.clone();
            sections
                .add_section(Section::new(tail, fresh, distance).unwrap())
                .unwrap();
            sections.remove_section(fresh).unwrap();

            prop_assert_eq!(sections, before);
        }

        /// Reconstruction from any permutation of the rows rebuilds the
        /// identical path order.
        #[test]
        fn from_rows_rebuilds_any_permutation(
            (chain, shuffled) in valid_chain().prop_flat_map(|chain| {
                let shuffled = Just(chain.clone()).prop_shuffle();
                (Just(chain), shuffled)
            })
        ) {
            let expected = topology(chain);
            let rebuilt = Sections::from_rows(LineId(1), shuffled).unwrap();
            prop_assert_eq!(rebuilt.ordered_stations(), expected.ordered_stations());
        }

        /// Removal never drops the chain below one section.
        #[test]
        fn remove_preserves_minimum(chain in valid_chain()) {
            let mut sections = topology(chain);

            loop {
                let tail = sections.last_section().unwrap().down_station();
                match sections.remove_section(tail) {
                    Ok(()) => prop_assert!(!sections.is_empty()),
                    Err(err) => {
                        prop_assert_eq!(err, SectionError::MinimumSectionSize);
                        prop_assert_eq!(sections.len(), 1);
                        break;
                    }
                }
            }
        }
    }
}
