//! Append-only JSONL conversation log.
//!
//! Every [`ConversationEvent`] becomes one line: the payload's fields plus
//! `type` and an RFC 3339 `timestamp`. Non-object payloads go under `data`.

use raimon_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// [`ConversationLogger`] writing one JSON object per line.
pub struct JsonlConversationLogger {
    writer: Mutex<LineWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parents as needed.
    ///
    /// Returns `None` (after a warning) when the file cannot be opened; the
    /// caller then runs without a conversation log.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(file) => {
                debug!("Conversation log opened at {}", path.display());
                Some(Self {
                    writer: Mutex::new(LineWriter::new(file)),
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                warn!("Conversation log disabled, cannot open {}: {}", path.display(), e);
                None
            }
        }
    }

    fn open(path: &Path) -> std::io::Result<File> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Build the JSON line for `event`. `type` and `timestamp` override payload
/// fields of the same name.
fn encode(event: ConversationEvent, timestamp: String) -> Option<String> {
    let mut record = Map::new();
    match event.payload {
        Value::Object(fields) => record.extend(fields),
        Value::Null => {}
        other => {
            record.insert("data".to_string(), other);
        }
    }
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::from(timestamp));
    serde_json::to_string(&Value::Object(record)).ok()
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Some(line) = encode(event, timestamp) else {
            return;
        };

        // LineWriter flushes on the trailing newline
        if let Ok(mut writer) = self.writer.lock()
            && let Err(e) = writeln!(writer, "{}", line)
        {
            debug!("Conversation log write failed: {}", e);
        }
    }
}
