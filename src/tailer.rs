use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub trait LogSink {
    fn append_text(&mut self, text: &str);
    fn clear(&mut self);
}

impl LogSink for String {
    fn append_text(&mut self, text: &str) {
        self.push_str(text);
    }

    fn clear(&mut self) {
        String::clear(self);
    }
}

#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn append_text(&mut self, text: &str) {
        let _ = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush());
    }

    // Written output cannot be taken back.
    fn clear(&mut self) {}
}

#[derive(Debug)]
pub struct LogTailer<S: LogSink> {
    sink: S,
    current: Option<PathBuf>,
    cursor: u64,
    // Trailing bytes of a UTF-8 sequence that has not fully arrived yet.
    pending: Vec<u8>,
}

impl<S: LogSink> LogTailer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
            cursor: 0,
            pending: Vec::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn current_log_file(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    pub fn position(&self) -> u64 {
        self.cursor
    }

    pub fn set_current_log_file(&mut self, path: impl Into<PathBuf>) {
        self.current = Some(path.into());
        self.cursor = 0;
        self.pending.clear();
        self.poll();
    }

    /// Returns how many bytes were consumed; read failures are retried on the
    /// next tick.
    pub fn poll(&mut self) -> u64 {
        let Some(path) = self.current.as_deref() else {
            return 0;
        };

        match read_from(path, self.cursor) {
            Ok(bytes) if bytes.is_empty() => 0,
            Ok(bytes) => {
                let read = bytes.len() as u64;
                self.cursor += read;
                self.emit(&bytes);
                read
            }
            Err(err) => {
                debug!(error = %err, path = %path.display(), "log poll failed");
                0
            }
        }
    }

    pub fn clear_sink(&mut self) {
        self.sink.clear();
    }

    pub fn follow(&mut self, interval: Duration, mut done: impl FnMut() -> bool) {
        loop {
            let finished = done();
            self.poll();
            if finished {
                break;
            }
            thread::sleep(interval);
        }
        self.flush_pending();
    }

    pub fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.sink.append_text(&text);
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
        let complete = complete_prefix_len(&self.pending);
        let rest = self.pending.split_off(complete);
        let ready = std::mem::replace(&mut self.pending, rest);

        if !ready.is_empty() {
            self.sink.append_text(&String::from_utf8_lossy(&ready));
        }
    }
}

fn read_from(path: &Path, offset: u64) -> io::Result<Vec<u8>> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let size = file.metadata()?.len();
    if size <= offset {
        return Ok(Vec::new());
    }

    file.seek(SeekFrom::Start(offset))?;
    let delta = size - offset;
    let mut buf = Vec::with_capacity(usize::try_from(delta).unwrap_or(0));
    file.take(delta).read_to_end(&mut buf)?;
    Ok(buf)
}

fn complete_prefix_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    let lookback = len.min(4);

    for back in 1..=lookback {
        let idx = len - back;
        let byte = bytes[idx];
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }

        let width = match byte {
            b if b & 0b1000_0000 == 0 => 1,
            b if b & 0b1110_0000 == 0b1100_0000 => 2,
            b if b & 0b1111_0000 == 0b1110_0000 => 3,
            b if b & 0b1111_1000 == 0b1111_0000 => 4,
            _ => 1,
        };

        return if back < width { idx } else { len };
    }

    len
}
