//! The immutable pattern aggregate: notes, sections and metadata.

use crate::error::PatternDataError;
use crate::note::Note;
use serde::{Deserialize, Serialize};

/// Descriptive information about a pattern, not consumed by timing logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternMetadata {
    pub bpm: f64,
    pub time_signature: String,
    pub title: String,
    pub difficulty: String,
}

/// A named, non-overlapping interval used for progress UI only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    pub start_ms: f64,
    pub end_ms: f64,
}

/// Flags a pair of notes sharing `(time_ms, kind)`.
///
/// Duplicates are permitted in a well-formed pattern (per the data model),
/// but callers (loaders, editors) generally want to know about them.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateNote {
    pub first_index: usize,
    pub second_index: usize,
    pub time_ms: f64,
    pub kind: String,
}

/// An immutable, ordered drum pattern synchronized to a recorded track.
///
/// `Pattern` owns no mutable per-session state: whether a note has been
/// triggered or judged lives in the player/judge that processes this
/// pattern, never here, so the same `Pattern` can back multiple concurrent
/// sessions (e.g. replay re-simulation) safely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub metadata: PatternMetadata,
    pub duration_ms: f64,
    notes: Vec<Note>,
    sections: Vec<Section>,
}

impl Pattern {
    /// Builds a pattern, validating the data-model invariants:
    /// - `notes` strictly non-decreasing by `time_ms` (ties keep insertion order).
    /// - `sections` non-overlapping and sorted by `start_ms`.
    ///
    /// Returns the pattern together with any duplicate `(time_ms, kind)` note
    /// pairs found — duplicates are permitted, only flagged.
    pub fn new(
        id: impl Into<String>,
        metadata: PatternMetadata,
        duration_ms: f64,
        notes: Vec<Note>,
        sections: Vec<Section>,
    ) -> Result<(Self, Vec<DuplicateNote>), PatternDataError> {
        for i in 1..notes.len() {
            if notes[i].time_ms < notes[i - 1].time_ms {
                return Err(PatternDataError::NotesNotSorted { at_index: i });
            }
        }

        for section in &sections {
            if section.end_ms < section.start_ms {
                return Err(PatternDataError::InvalidSection {
                    id: section.id.clone(),
                });
            }
        }
        for i in 1..sections.len() {
            if sections[i].start_ms < sections[i - 1].end_ms {
                return Err(PatternDataError::OverlappingSections {
                    first: sections[i - 1].id.clone(),
                    second: sections[i].id.clone(),
                });
            }
        }

        let id = id.into();

        let mut duplicates = Vec::new();
        for i in 1..notes.len() {
            let (a, b) = (&notes[i - 1], &notes[i]);
            if a.time_ms == b.time_ms && a.kind == b.kind {
                duplicates.push(DuplicateNote {
                    first_index: i - 1,
                    second_index: i,
                    time_ms: b.time_ms,
                    kind: b.kind.to_string(),
                });
            }
        }
        if !duplicates.is_empty() {
            log::warn!(
                "pattern '{}' contains {} duplicate note(s)",
                id,
                duplicates.len()
            );
        }

        Ok((
            Self {
                id,
                metadata,
                duration_ms,
                notes,
                sections,
            },
            duplicates,
        ))
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn note(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Index of the section containing `time_ms`, if any.
    pub fn section_at(&self, time_ms: f64) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| time_ms >= s.start_ms && time_ms < s.end_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::DrumKind;

    fn note(ms: f64, kind: DrumKind) -> Note {
        Note::new(ms, kind)
    }

    #[test]
    fn accepts_sorted_notes() {
        let notes = vec![
            note(0.0, DrumKind::Kick),
            note(500.0, DrumKind::Snare),
            note(500.0, DrumKind::Kick),
        ];
        let (pattern, dups) =
            Pattern::new("p1", PatternMetadata::default(), 1000.0, notes, vec![]).unwrap();
        assert_eq!(pattern.len(), 3);
        assert!(dups.is_empty());
    }

    #[test]
    fn rejects_unsorted_notes() {
        let notes = vec![note(500.0, DrumKind::Kick), note(100.0, DrumKind::Snare)];
        let err = Pattern::new("p1", PatternMetadata::default(), 1000.0, notes, vec![])
            .unwrap_err();
        assert_eq!(err, PatternDataError::NotesNotSorted { at_index: 1 });
    }

    #[test]
    fn flags_duplicate_time_and_kind() {
        let notes = vec![note(500.0, DrumKind::Kick), note(500.0, DrumKind::Kick)];
        let (_pattern, dups) =
            Pattern::new("p1", PatternMetadata::default(), 1000.0, notes, vec![]).unwrap();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].time_ms, 500.0);
    }

    #[test]
    fn rejects_overlapping_sections() {
        let sections = vec![
            Section {
                id: "a".into(),
                name: "Intro".into(),
                start_ms: 0.0,
                end_ms: 1000.0,
            },
            Section {
                id: "b".into(),
                name: "Verse".into(),
                start_ms: 900.0,
                end_ms: 2000.0,
            },
        ];
        let err = Pattern::new("p1", PatternMetadata::default(), 2000.0, vec![], sections)
            .unwrap_err();
        assert_eq!(
            err,
            PatternDataError::OverlappingSections {
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn section_at_finds_containing_interval() {
        let sections = vec![Section {
            id: "a".into(),
            name: "Intro".into(),
            start_ms: 0.0,
            end_ms: 1000.0,
        }];
        let (pattern, _) =
            Pattern::new("p1", PatternMetadata::default(), 1000.0, vec![], sections).unwrap();
        assert!(pattern.section_at(500.0).is_some());
        assert!(pattern.section_at(1000.0).is_none());
    }
}
