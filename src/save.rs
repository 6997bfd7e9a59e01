use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The high-score table keeps only the best entries
const MAX_HIGH_SCORES: usize = 5;

/// On-disk snapshot of a run.
///
/// Restoring brings back the snake's geometry and the score; hazard and
/// collectible positions are written for inspection but re-randomized on
/// load, and timers are not persisted at all.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct SaveState {
    pub(crate) snake_body: Vec<[i16; 2]>,
    pub(crate) snake_direction: [i16; 2],
    pub(crate) fruit_position: [i16; 2],
    pub(crate) big_fruit_position: Option<[i16; 2]>,
    pub(crate) boom_position: Option<[i16; 2]>,
    pub(crate) power_position: Option<[i16; 2]>,
    pub(crate) score: u32,
}

impl SaveState {
    pub(crate) fn write(&self, path: &Path) -> Result<(), SaveError> {
        write_json(self, path)
    }

    /// Read a saved game.  A missing file is an error here: the caller asked
    /// to continue a game that does not exist, and gets to decide what to do
    /// about it.
    pub(crate) fn read(path: &Path) -> Result<SaveState, LoadError> {
        let src = fs_err::read(path).map_err(LoadError::Read)?;
        serde_json::from_slice(&src).map_err(LoadError::Deserialize)
    }
}

/// Persisted list of the best scores, descending, at most five entries
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct HighScores(Vec<u32>);

impl HighScores {
    /// Append a score, then re-sort descending and truncate to the cap
    pub(crate) fn record(&mut self, score: u32) {
        self.0.push(score);
        self.0.sort_unstable_by(|a, b| b.cmp(a));
        self.0.truncate(MAX_HIGH_SCORES);
    }

    /// The best recorded score, or 0 if the table is empty
    pub(crate) fn best(&self) -> u32 {
        self.0.first().copied().unwrap_or(0)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        write_json(self, path)
    }

    /// Read the table from disk.  A missing file is an empty table, not an
    /// error: there is nothing surprising about having no scores yet.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HighScores::default());
            }
            Err(e) => return Err(LoadError::Read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::Deserialize)
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[u32] {
        &self.0
    }
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), SaveError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(SaveError::Mkdir)?;
    }
    let mut src = serde_json::to_string(value).map_err(SaveError::Serialize)?;
    src.push('\n');
    fs_err::write(path, &src).map_err(SaveError::Write)
}

#[derive(Debug, Error)]
pub(crate) enum SaveError {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize game data")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write game data to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read save file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize save file")]
    Deserialize(#[source] serde_json::Error),
    #[error("save file contains an empty snake body")]
    EmptyBody,
    #[error("save file contains invalid direction [{0}, {1}]")]
    Direction(i16, i16),
    #[error("saved snake cell [{0}, {1}] is outside the board")]
    OutOfBounds(i16, i16),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_state() -> SaveState {
        SaveState {
            snake_body: vec![[5, 10], [4, 10], [3, 10]],
            snake_direction: [1, 0],
            fruit_position: [6, 10],
            big_fruit_position: Some([12, 3]),
            boom_position: Some([9, 9]),
            power_position: Some([1, 17]),
            score: 7,
        }
    }

    #[test]
    fn save_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        let state = sample_state();
        state.write(&path).unwrap();
        assert_eq!(SaveState::read(&path).unwrap(), state);
    }

    #[test]
    fn save_state_json_shape() {
        let src = serde_json::to_value(sample_state()).unwrap();
        assert_eq!(src["snake_body"][0], serde_json::json!([5, 10]));
        assert_eq!(src["snake_direction"], serde_json::json!([1, 0]));
        assert_eq!(src["score"], serde_json::json!(7));
    }

    #[test]
    fn missing_save_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SaveState::read(&dir.path().join("savegame.json")),
            Err(LoadError::Read(_))
        ));
    }

    #[test]
    fn malformed_save_state_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savegame.json");
        fs_err::write(&path, "not-json").unwrap();
        assert!(matches!(
            SaveState::read(&path),
            Err(LoadError::Deserialize(_))
        ));
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeply").join("sg.json");
        sample_state().write(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_high_scores_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let scores = HighScores::load(&dir.path().join("high_scores.json")).unwrap();
        assert_eq!(scores, HighScores::default());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn record_sequence_keeps_top_five() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_scores.json");
        // One save per score, reloading each time like the real flow does.
        for score in [10, 30, 20, 5, 40, 25] {
            let mut scores = HighScores::load(&path).unwrap();
            scores.record(score);
            scores.save(&path).unwrap();
        }
        let scores = HighScores::load(&path).unwrap();
        assert_eq!(scores.entries(), [40, 30, 25, 20, 10]);
        assert_eq!(scores.best(), 40);
    }
}
