//! JSON persistence for the task board.
//!
//! One JSON file, rewritten on every mutation. Loading filters out expired
//! tasks and writes the cleaned board back only when something was removed,
//! so a read-only inspection of a fresh board touches nothing.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use super::{now_millis, Board};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no column with id {0:?}")]
    UnknownColumn(String),
    #[error("no task with id {0:?}")]
    UnknownTask(String),
    #[error("cannot determine a data directory for the board file")]
    NoDataDir,
    #[error("board file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("board file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode board: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Handle to the board file.
pub struct BoardStore {
    path: PathBuf,
}

impl BoardStore {
    /// Store at the platform data directory (e.g. `~/.local/share/vizcheck`).
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", "vizcheck").ok_or(StoreError::NoDataDir)?;
        Ok(Self::at(dirs.data_dir().join("board.json")))
    }

    /// Store at an explicit path. Used by tests and the `VIZCHECK_BOARD`
    /// override.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the board, dropping expired tasks. A missing file yields the
    /// starter board. When expiry removed anything, the cleaned board is
    /// persisted immediately.
    pub fn load(&self) -> Result<Board, StoreError> {
        if !self.path.exists() {
            return Ok(Board::starter());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let mut board: Board = serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;

        if board.prune_expired(now_millis()) > 0 {
            self.save(&board)?;
        }
        Ok(board)
    }

    /// Write the whole board out, creating parent directories as needed.
    pub fn save(&self, board: &Board) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(board)?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}
