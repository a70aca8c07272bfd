use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_core::{CursorState, TallyError};
use tally_table::write_atomic;

/// The durable cursor file: `{"row": N}`.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved cursor. A missing or unreadable file resumes at row 2.
    pub fn load(&self) -> CursorState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return CursorState::default(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read progress; starting at the first row");
                return CursorState::default();
            }
        };

        match serde_json::from_str::<CursorState>(&text) {
            Ok(state) => CursorState::new(state.row),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "malformed progress; starting at the first row");
                CursorState::default()
            }
        }
    }

    pub fn save(&self, state: CursorState) -> Result<(), TallyError> {
        let json = serde_json::to_vec(&state)
            .map_err(|e| TallyError::Progress(e.to_string()))?;
        write_atomic(&self.path, &json)
            .map_err(|e| TallyError::Progress(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(row = state.row, "progress saved");
        Ok(())
    }
}
