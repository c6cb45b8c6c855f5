mod items;
mod logs;
mod style;

pub use items::{ItemRow, print_commands, print_items};
pub use logs::print_logs;
pub use style::{
    accent, bold, configure, failure, info, muted, number, path, success, warning,
};

pub fn format_duration(duration: std::time::Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1_000 {
        return format!("{ms}ms");
    }

    if ms.is_multiple_of(1_000) {
        return format!("{}s", ms / 1_000);
    }

    format!("{:.3}s", duration.as_secs_f64())
}

pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;

    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    }
}
