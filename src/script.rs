// src/script.rs

//! Where player commands come from.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

#[cfg(test)]
mod tests;

/// Supplies the next command to play. `None` means the session is over.
pub trait CommandSource {
    fn next_command(&mut self) -> Option<String>;
}

/// Commands read from a file, one per line. Blank lines and `#` comments are
/// skipped when the file is loaded.
pub struct ScriptSource {
    commands: std::vec::IntoIter<String>,
}

impl ScriptSource {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading command script {}", path.display()))?;
        let commands: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        info!(
            "loaded {} command(s) from {}",
            commands.len(),
            path.display()
        );
        Ok(Self {
            commands: commands.into_iter(),
        })
    }

    #[cfg(test)]
    fn from_lines(lines: &[&str]) -> Self {
        Self {
            commands: lines
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl CommandSource for ScriptSource {
    fn next_command(&mut self) -> Option<String> {
        self.commands.next()
    }
}
