// src/pump.rs

//! The output pump: collects one displayable block from the interpreter.
//!
//! The interpreter emits output in bursts and then waits, either at its `>`
//! command prompt or at a pagination pause. The pump reads in short
//! nonblocking slices inside a fixed budget, cleans each chunk through the
//! control-code filter, acknowledges pagination pauses itself, and hands back
//! the accumulated block once the prompt appears or the budget runs out.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, trace};

use crate::ansi;
use crate::os::ChildProcess;

#[cfg(test)]
mod tests;

/// The phrase the interpreter prints when its title screen is up and it is
/// waiting for a keypress before starting the game.
const READY_PHRASE: &str = "Press RETURN or ENTER to begin";

/// How long one read slice waits for output.
const READ_SLICE: Duration = Duration::from_millis(300);

/// Total time allowed for collecting one block.
const DEFAULT_BUDGET: Duration = Duration::from_secs(4);

/// One collected block of interpreter output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Cleaned display text, pagination markers removed.
    pub text: String,
    /// The last status line seen while collecting, if any.
    pub status: Option<String>,
    /// Whether the block ended at the `>` command prompt. When false the
    /// budget ran out and the interpreter may still be thinking.
    pub at_prompt: bool,
}

pub struct OutputPump<C: ChildProcess> {
    child: C,
    budget: Duration,
}

impl<C: ChildProcess> OutputPump<C> {
    pub fn new(child: C) -> Self {
        Self::with_budget(child, DEFAULT_BUDGET)
    }

    pub fn with_budget(child: C, budget: Duration) -> Self {
        Self { child, budget }
    }

    /// Collects the title screen: reads until the interpreter announces it is
    /// waiting to begin, then acknowledges with a blank line. The ready
    /// phrase itself is stripped from the returned text. If the budget runs
    /// out without seeing the phrase, the acknowledgement is sent anyway so a
    /// quiet interpreter still gets unstuck.
    pub fn collect_intro(&mut self) -> Result<Block> {
        let mut block = self.collect_until(|text| text.contains(READY_PHRASE))?;
        block.text = block
            .text
            .lines()
            .filter(|line| !line.contains(READY_PHRASE))
            .collect::<Vec<_>>()
            .join("\n")
            .trim_end()
            .to_string();
        info!("intro collected ({} chars), acknowledging", block.text.len());
        self.child.send_line("")?;
        Ok(block)
    }

    /// Collects one response block, stopping at the `>` prompt or when the
    /// budget is exhausted.
    pub fn collect_block(&mut self) -> Result<Block> {
        self.collect_until(|text| text.trim_end().ends_with('>'))
    }

    /// Sends a player command: single-letter direction abbreviations are
    /// expanded, and the line is sent with a leading space (the interpreter
    /// swallows the first column of echoed input).
    pub fn send_command(&mut self, cmd: &str) -> Result<String> {
        let expanded = expand_direction(cmd.trim()).to_ascii_uppercase();
        debug!("sending command: {expanded:?}");
        self.child.send_line(&format!(" {expanded}"))?;
        Ok(expanded)
    }

    fn collect_until(&mut self, done: impl Fn(&str) -> bool) -> Result<Block> {
        let deadline = Instant::now() + self.budget;
        let mut block = Block::default();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!("read budget exhausted with {} chars", block.text.len());
                return Ok(block);
            }

            let Some(bytes) = self.child.read_available(remaining.min(READ_SLICE))? else {
                continue;
            };

            let raw = String::from_utf8_lossy(&bytes);
            let paginated = ansi::PAGINATION_MARKERS.iter().any(|m| raw.contains(m));
            let cleaned = ansi::clean(&raw);
            if cleaned.status.is_some() {
                block.status = cleaned.status;
            }

            if !cleaned.text.is_empty() {
                if !block.text.is_empty() {
                    block.text.push('\n');
                }
                block.text.push_str(&cleaned.text);
            }

            if paginated {
                trace!("pagination pause, sending blank line");
                self.child.send_line("")?;
                continue;
            }

            if done(&block.text) {
                block.at_prompt = true;
                return Ok(block);
            }
        }
    }
}

/// Expands the classic single-token movement abbreviations. Anything else
/// passes through unchanged.
fn expand_direction(cmd: &str) -> &str {
    match cmd.to_ascii_uppercase().as_str() {
        "N" => "NORTH",
        "S" => "SOUTH",
        "E" => "EAST",
        "W" => "WEST",
        "NE" => "NORTHEAST",
        "NW" => "NORTHWEST",
        "SE" => "SOUTHEAST",
        "SW" => "SOUTHWEST",
        "U" => "UP",
        "D" => "DOWN",
        "Z" => "WAIT",
        "L" => "LOOK",
        _ => cmd,
    }
}
