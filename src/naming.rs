use regex::Regex;
use std::sync::LazyLock;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

pub const EMPTY_COMMAND: &str = "empty_command";
pub const LOG_EXTENSION: &str = "log";

static UNSAFE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_;-]").expect("valid regex"));

const FILENAME_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");
const MARKER_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const CLOCK_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Only ever contains `[A-Za-z0-9_;-]`.
pub fn derive_base_name(command: &str) -> String {
    let tokens: Vec<&str> = command.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return EMPTY_COMMAND.to_string();
    };

    let joined = if first.to_ascii_lowercase().ends_with(".exe") {
        tokens
            .iter()
            .map(|token| last_segment(token))
            .collect::<Vec<_>>()
            .join("_")
    } else {
        tokens
            .join("_")
            .replace(":\\", "-")
            .replace('\\', "-")
            .replace('/', ";")
    };

    UNSAFE_CHARS_RE.replace_all(&joined, "_").into_owned()
}

fn last_segment(token: &str) -> &str {
    token.rsplit(['\\', '/']).next().unwrap_or(token)
}

pub fn generate_log_filename(command: &str) -> String {
    log_filename_at(command, now())
}

pub fn log_filename_at(command: &str, at: OffsetDateTime) -> String {
    format!(
        "{}_{}.{LOG_EXTENSION}",
        derive_base_name(command),
        format_stamp(at, FILENAME_STAMP)
    )
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

pub fn marker_timestamp(at: OffsetDateTime) -> String {
    format_stamp(at, MARKER_STAMP)
}

pub fn clock_timestamp(at: OffsetDateTime) -> String {
    format_stamp(at, CLOCK_STAMP)
}

fn format_stamp(at: OffsetDateTime, description: &[BorrowedFormatItem<'_>]) -> String {
    at.format(description)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
