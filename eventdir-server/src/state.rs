use std::path::PathBuf;

use anyhow::Result;
use eventdir_core::agenda::Agenda;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // We reopen the agenda on each request to pick up filesystem changes
    // (git pulls, review edits). Could add caching with file watching later.
    data_dir: PathBuf,
    review_token: Option<String>,
}

impl AppState {
    pub fn new(agenda: &Agenda) -> Result<Self> {
        // Verify the record directory is readable at startup
        let _ = agenda.events()?;

        Ok(AppState {
            data_dir: agenda.data_path(),
            review_token: agenda.config().review_token.clone(),
        })
    }

    /// State rooted at an explicit directory (tests).
    #[allow(dead_code)]
    pub fn at(data_dir: impl Into<PathBuf>, review_token: Option<String>) -> Self {
        AppState {
            data_dir: data_dir.into(),
            review_token,
        }
    }

    pub fn agenda(&self) -> Agenda {
        Agenda::at(&self.data_dir)
    }

    pub fn review_token(&self) -> Option<&str> {
        self.review_token.as_deref()
    }
}
