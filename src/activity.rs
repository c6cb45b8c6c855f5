use crate::naming::{marker_timestamp, now};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const FILE_NAME: &str = "launcher.log";
pub const DEFAULT_TAIL_CHARS: usize = 2000;

#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, message: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| format!("create log directory: {e}"))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| format!("open activity log: {e}"))?;

        writeln!(file, "{} {message}", marker_timestamp(now()))
            .map_err(|e| format!("write activity log: {e}"))
    }

    pub fn tail(&self, max_chars: usize) -> Result<Option<String>, String> {
        let text = match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(format!("read activity log: {err}")),
        };

        if text.is_empty() {
            return Ok(None);
        }

        let count = text.chars().count();
        if count <= max_chars {
            return Ok(Some(text));
        }

        Ok(Some(text.chars().skip(count - max_chars).collect()))
    }
}
