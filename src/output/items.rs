use crate::output::{accent, bold, info, muted, number, success};
use std::io::Write;

#[derive(Debug, Clone)]
pub struct ItemRow {
    pub position: usize,
    pub name: String,
    pub path: String,
    pub checked_number: Option<usize>,
    pub last_launch: Option<String>,
}

pub fn print_items(mut w: impl Write, rows: &[ItemRow]) -> std::io::Result<()> {
    if rows.is_empty() {
        writeln!(w, "{} {}", info("i"), muted("No items registered."))?;
        return Ok(());
    }

    for row in rows {
        let label = match row.checked_number {
            Some(order) => format!("{} {}. {}", success("[x]"), order, bold(&row.name)),
            None => format!("[ ] {}", bold(&row.name)),
        };
        writeln!(w, "{:>3}  {label}", number(&row.position.to_string()))?;
        writeln!(w, "     path: {}", accent(&row.path))?;
        if let Some(at) = &row.last_launch {
            writeln!(w, "     last launch: {at}")?;
        }
    }

    Ok(())
}

pub fn print_commands(mut w: impl Write, commands: &[String]) -> std::io::Result<()> {
    if commands.is_empty() {
        writeln!(w, "{} {}", info("i"), muted("No saved commands."))?;
        return Ok(());
    }

    for (idx, command) in commands.iter().enumerate() {
        writeln!(w, "{:>3}  {}", number(&(idx + 1).to_string()), accent(command))?;
    }

    Ok(())
}
