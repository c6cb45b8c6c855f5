use crate::locator::LogEntry;
use crate::output::{accent, bold, format_size, info, muted, path};
use std::io::Write;
use time::macros::format_description;

pub fn print_logs(
    mut w: impl Write,
    command: &str,
    base_name: &str,
    entries: &[LogEntry],
) -> std::io::Result<()> {
    if entries.is_empty() {
        writeln!(w, "{} No log file found for {}", info("i"), accent(command))?;
        writeln!(w, "  base name: {}", muted(base_name))?;
        return Ok(());
    }

    writeln!(w, "{} {}", bold("logs for"), accent(command))?;

    for entry in entries {
        let modified = entry
            .modified
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| "-".to_string());

        writeln!(w, "  {}", path(&entry.path.display().to_string()))?;
        writeln!(
            w,
            "    {}  modified (UTC) {}",
            format_size(entry.size),
            modified
        )?;
    }

    Ok(())
}
