//! Conversation store access
//!
//! Records live as one JSON file per conversation under a store directory,
//! addressed as `<store>/<id>.json`.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::debug;

use crate::conversation::ConversationRecord;
use crate::error::{ReportError, ReportResult};

pub struct ConversationStore {
    dir: PathBuf,
}

impl ConversationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a given conversation id resolves to.
    pub fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Load and parse one conversation record.
    pub fn load(&self, id: &str) -> ReportResult<ConversationRecord> {
        let path = self.record_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ReportError::InputNotFound {
                    id: id.to_string(),
                    path,
                });
            }
            Err(e) => return Err(ReportError::Io(e)),
        };
        let record: ConversationRecord =
            serde_json::from_str(&raw).map_err(ReportError::InputMalformed)?;
        debug!(
            "loaded conversation {} ({} messages) from {}",
            id,
            record.messages.len(),
            path.display()
        );
        Ok(record)
    }
}
