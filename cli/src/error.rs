//! CLI error handling

use macromate_shared::ProfileError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot tell the draft format of {}; use a .json or .toml file", .0.display())]
    UnknownFormat(PathBuf),

    #[error("Invalid JSON draft: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML draft: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl CliError {
    /// Extra lines worth showing the user below the main message
    pub fn details(&self) -> Vec<String> {
        match self {
            CliError::Profile(err) => err.user_messages(),
            _ => Vec::new(),
        }
    }
}
