use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_STATE_PATH: &str = "data/launcher_data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub path: PathBuf,
    pub checked_seq: Option<u64>,
    pub last_launch: Option<String>,
}

impl Item {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            checked_seq: None,
            last_launch: None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked_seq.is_some()
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    Checked(usize),
    Unchecked(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Launchpad {
    items: Vec<Item>,
    commands: Vec<String>,
    next_seq: u64,
}

impl Launchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn add_item(&mut self, path: impl Into<PathBuf>) -> Result<usize, String> {
        let path = path.into();
        if self.items.iter().any(|item| item.path == path) {
            return Err(format!("{} is already registered", path.display()));
        }
        self.items.push(Item::new(path));
        Ok(self.items.len() - 1)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Applies a check-box change. Checking an already checked item keeps its
    /// place in the order.
    pub fn apply(&mut self, event: ItemEvent) -> Result<(), String> {
        let (index, checked) = match event {
            ItemEvent::Checked(index) => (index, true),
            ItemEvent::Unchecked(index) => (index, false),
        };

        if index >= self.items.len() {
            return Err(format!("no item at position {}", index + 1));
        }

        if !checked {
            self.items[index].checked_seq = None;
        } else if self.items[index].checked_seq.is_none() {
            self.next_seq += 1;
            self.items[index].checked_seq = Some(self.next_seq);
        }

        Ok(())
    }

    pub fn clear_checked(&mut self) {
        for item in &mut self.items {
            item.checked_seq = None;
        }
    }

    pub fn checked_in_order(&self) -> Vec<usize> {
        let mut checked: Vec<(u64, usize)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.checked_seq.map(|seq| (seq, index)))
            .collect();
        checked.sort_unstable();
        checked.into_iter().map(|(_, index)| index).collect()
    }

    pub fn display_number(&self, index: usize) -> Option<usize> {
        self.checked_in_order()
            .iter()
            .position(|checked| *checked == index)
            .map(|pos| pos + 1)
    }

    pub fn record_launch(&mut self, index: usize, at: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.last_launch = Some(at.into());
        }
    }

    pub fn add_command(&mut self, command: &str) -> Result<usize, String> {
        let command = command.trim();
        if command.is_empty() {
            return Err("command must not be empty".to_string());
        }
        self.commands.push(command.to_string());
        Ok(self.commands.len() - 1)
    }

    pub fn remove_command(&mut self, index: usize) -> Option<String> {
        (index < self.commands.len()).then(|| self.commands.remove(index))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StateFileIn {
    icons: Vec<Value>,
    cmds: Vec<String>,
}

#[derive(Debug, Serialize)]
struct StateFileOut<'a> {
    icons: Vec<(String, bool, Option<&'a str>)>,
    cmds: &'a [String],
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Launchpad, String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Launchpad::new()),
            Err(err) => return Err(format!("read state file: {err}")),
        };

        let raw: StateFileIn =
            serde_json::from_str(&text).map_err(|e| format!("parse state file: {e}"))?;

        let mut pad = Launchpad::new();
        for entry in raw.icons {
            let Some(fields) = entry.as_array() else {
                continue;
            };
            let (Some(path), Some(checked)) = (
                fields.first().and_then(Value::as_str),
                fields.get(1).and_then(Value::as_bool),
            ) else {
                continue;
            };

            let path = PathBuf::from(path);
            if !path.exists() {
                continue;
            }

            let Ok(index) = pad.add_item(path) else {
                continue;
            };
            pad.items[index].last_launch = fields
                .get(2)
                .and_then(Value::as_str)
                .map(str::to_string);
            if checked {
                pad.apply(ItemEvent::Checked(index))?;
            }
        }

        for command in raw.cmds {
            let _ = pad.add_command(&command);
        }

        Ok(pad)
    }

    pub fn save(&self, pad: &Launchpad) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| format!("create state directory: {e}"))?;
        }

        let out = StateFileOut {
            icons: pad
                .items
                .iter()
                .map(|item| {
                    (
                        item.path.display().to_string(),
                        item.is_checked(),
                        item.last_launch.as_deref(),
                    )
                })
                .collect(),
            cmds: &pad.commands,
        };

        let mut bytes =
            serde_json::to_vec_pretty(&out).map_err(|e| format!("serialize state: {e}"))?;
        bytes.push(b'\n');
        fs::write(&self.path, bytes).map_err(|e| format!("write state file: {e}"))
    }
}
