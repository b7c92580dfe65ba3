//! Board Configuration
//!
//! Pin wiring, sounds and pacing, loaded from JSON. Every field is optional;
//! anything left out falls back to the stock four-button Raspberry Pi layout.
//!
//! ```json
//! {
//!   "positions": [
//!     { "id": "red",  "sound": "s1", "input_pin": 4,  "output_pin": 27, "unlock_sequence_length": 4 },
//!     { "id": "blue", "sound": "s2", "input_pin": 18, "output_pin": 24, "unlock_sequence_length": 8 }
//!   ],
//!   "failure_sound": "lose",
//!   "sound_dir": "sound",
//!   "timings": { "input_deadline_ms": 2500 }
//! }
//! ```

use crate::board::{Pin, Position, PositionTable};
use crate::game::Timings;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Wiring of one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfig {
    /// Human-readable identifier
    pub id: String,
    /// Sound id, resolved to `<sound_dir>/<sound>.wav`
    pub sound: String,
    /// Button input pin
    pub input_pin: Pin,
    /// Light output pin
    pub output_pin: Pin,
    /// Rounds to win a game started from this button
    pub unlock_sequence_length: usize,
}

impl PositionConfig {
    fn new(id: &str, sound: &str, input_pin: Pin, output_pin: Pin, unlock_sequence_length: usize) -> Self {
        PositionConfig {
            id: id.into(),
            sound: sound.into(),
            input_pin,
            output_pin,
            unlock_sequence_length,
        }
    }
}

/// Complete board description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Positions in slot order
    pub positions: Vec<PositionConfig>,
    /// Sound played on a wrong answer
    pub failure_sound: String,
    /// Directory containing `<sound>.wav` files
    pub sound_dir: Option<PathBuf>,
    /// Game pacing
    pub timings: Timings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            positions: vec![
                PositionConfig::new("s1", "s1", 4, 27, 4),
                PositionConfig::new("s2", "s2", 18, 24, 6),
                PositionConfig::new("s3", "s3", 23, 25, 8),
                PositionConfig::new("s4", "s4", 17, 22, 10),
            ],
            failure_sound: "lose".into(),
            sound_dir: None,
            timings: Timings::default(),
        }
    }
}

impl BoardConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(text)?;
        config.position_table()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
        Self::from_json_str(&text)
    }

    /// Validated position table for this configuration
    pub fn position_table(&self) -> Result<PositionTable> {
        PositionTable::new(
            self.positions
                .iter()
                .map(|p| Position {
                    id: p.id.clone(),
                    sound_id: p.sound.clone(),
                    input_pin: p.input_pin,
                    output_pin: p.output_pin,
                    unlock_sequence_length: p.unlock_sequence_length,
                })
                .collect(),
        )
    }

    /// Every sound the game can request: position sounds, then the failure sound
    pub fn sound_ids(&self) -> Vec<&str> {
        self.positions
            .iter()
            .map(|p| p.sound.as_str())
            .chain(std::iter::once(self.failure_sound.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepeatError;
    use std::io::Write;

    #[test]
    fn test_default_layout() {
        let config = BoardConfig::default();
        let table = config.position_table().unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.input_pins(), vec![4, 18, 23, 17]);
        assert_eq!(table.output_pins(), vec![27, 24, 25, 22]);
        assert_eq!(config.sound_ids(), vec!["s1", "s2", "s3", "s4", "lose"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BoardConfig::from_json_str(r#"{ "failure_sound": "buzz" }"#).unwrap();
        assert_eq!(config.failure_sound, "buzz");
        assert_eq!(config.positions.len(), 4);
        assert_eq!(config.timings, Timings::default());
    }

    #[test]
    fn test_custom_positions() {
        let config = BoardConfig::from_json_str(
            r#"{
                "positions": [
                    { "id": "red", "sound": "r", "input_pin": 5, "output_pin": 6, "unlock_sequence_length": 3 },
                    { "id": "green", "sound": "g", "input_pin": 13, "output_pin": 19, "unlock_sequence_length": 5 }
                ],
                "timings": { "input_deadline_ms": 2500 }
            }"#,
        )
        .unwrap();

        let table = config.position_table().unwrap();
        assert_eq!(table.get(1).id, "green");
        assert_eq!(table.get(1).unlock_sequence_length, 5);
        assert_eq!(config.timings.input_deadline_ms, 2500);
        assert_eq!(config.timings.attract_step_ms, 250);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            BoardConfig::from_json_str(r#"{ "positions": [] }"#),
            Err(RepeatError::Config(_))
        ));
        assert!(matches!(
            BoardConfig::from_json_str(r#"{ "positions": 3 }"#),
            Err(RepeatError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sound_dir": "/opt/repeat/sound" }}"#).unwrap();

        let config = BoardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.sound_dir, Some(PathBuf::from("/opt/repeat/sound")));
        assert!(BoardConfig::from_json_file(Path::new("/nonexistent/repeat.json")).is_err());
    }
}
