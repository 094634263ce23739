use std::num::NonZero;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::Deserialize;

use crate::board::Board;
use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::tube::ColorID;

/// Settings of a [`Solver`](crate::solver::Solver).
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    /// Failed attempts after which the search returns to the root, giving up on every opening of the color it was exploring.
    /// `None` searches exhaustively.
    pub break_limit: Option<NonZero<u32>>,
}

/// A puzzle as stored on disk.
///
/// ```toml
/// tubes = [[1, 2, 1, 2], [2, 1, 2, 1], [], []]
///
/// [solver]
/// break_limit = 200
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct PuzzleFile {
    /// Every tube, bottom unit first.
    pub tubes: Vec<Vec<ColorID>>,
    /// Solver settings to use for this puzzle.
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Reasons a puzzle could not be turned into a [`Board`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The puzzle file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        /// Path as given.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The puzzle is not valid TOML or does not have the expected fields.
    #[error("failed to parse puzzle: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// The tubes do not make a valid board.
    #[error("invalid board: {}", .0.iter().join("; "))]
    InvalidBoard(Vec<BuilderInvalidReason>),
    /// A flat cell array whose length is not a multiple of the tube capacity.
    #[error("{0} cells do not divide into whole tubes")]
    RaggedCells(usize),
}

impl PuzzleFile {
    /// Load a puzzle from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parse a puzzle from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The initial board of this puzzle.
    pub fn board(&self) -> Result<Board, ConfigError> {
        BoardBuilder::with_tubes(self.tubes.iter().map(Vec::as_slice))
            .build()
            .map_err(|reasons| ConfigError::InvalidBoard(reasons.clone()))
    }
}
