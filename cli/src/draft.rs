//! Loading saved onboarding drafts

use crate::error::CliError;
use macromate_shared::OnboardingDraft;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Json,
    Toml,
}

impl DraftFormat {
    /// Pick a format from the file extension, then from the content
    pub fn detect(path: &Path, contents: &str) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Some(DraftFormat::Json),
            Some("toml") => Some(DraftFormat::Toml),
            _ if contents.trim_start().starts_with('{') => Some(DraftFormat::Json),
            _ => None,
        }
    }
}

pub fn parse_draft(contents: &str, format: DraftFormat) -> Result<OnboardingDraft, CliError> {
    let draft = match format {
        DraftFormat::Json => serde_json::from_str(contents)?,
        DraftFormat::Toml => toml::from_str(contents)?,
    };
    Ok(draft)
}

pub fn load_draft(path: &Path) -> Result<OnboardingDraft, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DraftFormat::detect(path, &contents).ok_or_else(|| CliError::UnknownFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), ?format, "loading onboarding draft");
    parse_draft(&contents, format)
}
