use std::fmt;
use std::path::Path;

use crate::error::AppError;

/// Bearer token for the InfoJobs API. Read once at startup and passed
/// explicitly to whatever needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Result<Self, AppError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(AppError::Credential("token is empty".to_string()));
        }
        Ok(Self(token))
    }

    /// Load the token from a text file, ignoring surrounding whitespace.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Credential(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::new(raw)
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
