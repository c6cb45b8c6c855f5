use crate::naming::{LOG_EXTENSION, derive_base_name};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub modified: OffsetDateTime,
}

/// A missing directory is "not found", not an error.
pub fn find_latest(command: &str, log_dir: &Path) -> io::Result<Option<PathBuf>> {
    let entries = list_logs(command, log_dir)?;
    Ok(entries.into_iter().next().map(|entry| entry.path))
}

pub fn list_logs(command: &str, log_dir: &Path) -> io::Result<Vec<LogEntry>> {
    let read_dir = match fs::read_dir(log_dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let prefix = format!("{}_", derive_base_name(command));
    let suffix = format!(".{LOG_EXTENSION}");
    let mut entries = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = dir_entry?;
        let Ok(file_name) = dir_entry.file_name().into_string() else {
            continue;
        };
        if !file_name.starts_with(&prefix) || !file_name.ends_with(&suffix) {
            continue;
        }

        // Entries can vanish between listing and stat.
        let Ok(metadata) = dir_entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .map(OffsetDateTime::from)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH);

        entries.push(LogEntry {
            path: dir_entry.path(),
            file_name,
            size: metadata.len(),
            modified,
        });
    }

    entries.sort_by(newest_first);
    Ok(entries)
}

fn newest_first(a: &LogEntry, b: &LogEntry) -> Ordering {
    b.modified
        .cmp(&a.modified)
        .then_with(|| b.file_name.cmp(&a.file_name))
}
