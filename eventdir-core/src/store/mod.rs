//! File store for event records.
//!
//! One YAML file per event in a flat directory. The filename stem doubles as
//! the event id.

mod create;
mod delete;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::{find, list};
pub use update::{set_status, update};

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::event::Event;

/// An event record on disk
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub event: Event,
    /// Path to the .yml file
    pub path: PathBuf,
    /// File modification time
    pub modified: Option<DateTime<Utc>>,
}

/// Recognized record file extensions
pub(crate) fn is_record_file(path: &std::path::Path) -> bool {
    path.extension()
        .is_some_and(|e| e == "yml" || e == "yaml")
}
