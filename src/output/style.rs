use std::sync::atomic::{AtomicBool, Ordering};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(true);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Bold,
    Muted,
    Green,
    Red,
    Yellow,
    Cyan,
    BrightCyan,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Bold => "1",
            Tone::Muted => "2",
            Tone::Green => "32",
            Tone::Red => "31",
            Tone::Yellow => "33",
            Tone::Cyan => "36",
            Tone::BrightCyan => "96",
        }
    }
}

// CLICOLOR_FORCE=1 overrides NO_COLOR, TERM=dumb and --no-color.
pub fn configure(no_color: bool) {
    let forced = std::env::var("CLICOLOR_FORCE").is_ok_and(|value| value == "1");
    let suppressed = no_color
        || std::env::var_os("NO_COLOR").is_some()
        || std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"));

    COLORS_ENABLED.store(forced || !suppressed, Ordering::Relaxed);
}

fn paint(tone: Tone, text: &str) -> String {
    if text.is_empty() || !COLORS_ENABLED.load(Ordering::Relaxed) {
        return text.to_string();
    }

    format!("\x1b[{}m{text}\x1b[0m", tone.sgr())
}

pub fn bold(text: &str) -> String {
    paint(Tone::Bold, text)
}

pub fn muted(text: &str) -> String {
    paint(Tone::Muted, text)
}

pub fn success(text: &str) -> String {
    paint(Tone::Green, text)
}

pub fn failure(text: &str) -> String {
    paint(Tone::Red, text)
}

pub fn warning(text: &str) -> String {
    paint(Tone::Yellow, text)
}

pub fn accent(text: &str) -> String {
    paint(Tone::Cyan, text)
}

pub fn info(text: &str) -> String {
    paint(Tone::BrightCyan, text)
}

pub fn path(text: &str) -> String {
    paint(Tone::BrightCyan, text)
}

pub fn number(text: &str) -> String {
    paint(Tone::BrightCyan, text)
}
