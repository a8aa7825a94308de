//! A `PatternLoader` reading the JSON-equivalent schema described in the
//! pattern data model from a file on disk.

use engine::{Note, Pattern, PatternMetadata, Section};
use pattern::{LoadError, PatternLoader};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PatternDto {
    id: String,
    #[serde(default)]
    metadata: PatternMetadata,
    duration_ms: f64,
    notes: Vec<Note>,
    #[serde(default)]
    sections: Vec<Section>,
}

pub struct JsonPatternLoader;

impl PatternLoader for JsonPatternLoader {
    fn load(&self, path: &str) -> Result<Pattern, LoadError> {
        let fail = |reason: String| LoadError { path: path.to_string(), reason };

        let bytes = std::fs::read(path).map_err(|e| fail(e.to_string()))?;
        let mut dto: PatternDto = serde_json::from_slice(&bytes).map_err(|e| fail(e.to_string()))?;
        // Notes in the file need not already be ordered; a stable sort here
        // preserves insertion order for ties while giving `Pattern::new` the
        // ascending-by-time_ms ordering it requires.
        dto.notes.sort_by(|a, b| a.time_ms.partial_cmp(&b.time_ms).unwrap());
        let (pattern, duplicates) =
            Pattern::new(dto.id, dto.metadata, dto.duration_ms, dto.notes, dto.sections)
                .map_err(|e| fail(e.to_string()))?;

        if !duplicates.is_empty() {
            log::warn!("{}: {} duplicate note(s) in pattern", path, duplicates.len());
        }
        Ok(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("djentronome-json-loader-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn out_of_order_notes_are_sorted_before_validation() {
        let path = write_temp(
            "unsorted.json",
            r#"{
                "id": "p1",
                "duration_ms": 1000.0,
                "notes": [
                    { "time_ms": 500.0, "kind": "snare" },
                    { "time_ms": 0.0, "kind": "kick" }
                ]
            }"#,
        );

        let pattern = JsonPatternLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(pattern.notes()[0].time_ms, 0.0);
        assert_eq!(pattern.notes()[1].time_ms, 500.0);

        std::fs::remove_file(&path).unwrap();
    }
}
