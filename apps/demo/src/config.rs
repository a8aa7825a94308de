//! Optional TOML overrides for each component's configuration defaults.

use calibration::CalibrationConfig;
use judge::JudgeConfig;
use pattern::PatternPlayerConfig;
use scheduler::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bundles one session's worth of component configuration, loaded from a
/// single TOML file and falling back to each component's own defaults
/// section by section when a table is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub scheduler: SchedulerConfig,
    pub pattern_player: PatternPlayerConfig,
    pub judge: JudgeConfig,
    pub calibration: CalibrationConfig,
}

impl DemoConfig {
    /// Loads overrides from `path`, or returns defaults if the file is
    /// missing or fails to parse.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "failed to parse '{}': {err}, using defaults",
                        path.as_ref().display()
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_from("does-not-exist.toml");
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn partial_overrides_leave_other_tables_at_default() {
        let dir = std::env::temp_dir().join(format!(
            "djentronome-demo-config-test-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[judge]\nperfect_window_ms = 15.0\n").unwrap();

        let config = DemoConfig::load_from(&path);
        assert_eq!(config.judge.perfect_window_ms, 15.0);
        assert_eq!(config.scheduler, SchedulerConfig::default());

        std::fs::remove_file(&path).unwrap();
        std::fs::remove_dir(&dir).unwrap();
    }
}
