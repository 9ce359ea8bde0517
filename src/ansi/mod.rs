// src/ansi/mod.rs

//! Control-code filter for the interpreter's raw output stream.
//!
//! The wrapped Z-machine interpreter drives a real terminal, so its output is
//! littered with cursor addressing, charset switches and screen clears. This
//! module reduces that stream to clean display text plus the extracted
//! status-bar line. It deliberately recognizes only the small vocabulary the
//! interpreter actually emits; anything else that looks like an escape
//! sequence is dropped.
//!
//! The filter is not streaming-safe: an escape sequence split across two
//! non-blocking reads loses its ESC byte here and leaks its tail into the
//! next chunk's display text. Callers tolerate the occasional stray fragment;
//! masking it would hide real pacing bugs in the read loop.

use log::trace;


const ESC: char = '\x1b';

/// CSI finals that imply a cursor line move; rewritten to `\n` so paragraph
/// structure survives the stripping.
const LINE_BREAKING_FINALS: &[char] = &['H', 'f', 'A', 'B', 'C', 'D'];

/// The in-game title is rewritten so the status bar cannot be mistaken for
/// the simulator's own branding.
const GAME_TITLE: &str = "Plundered Hearts";
const GAME_TITLE_SUBSTITUTE: &str = "PLLMDERED_HEARTS";

/// Pagination pauses the interpreter prints mid-burst. The pump answers
/// them; they never belong in display text.
pub const PAGINATION_MARKERS: &[&str] =
    &["***MORE***", "[Press RETURN or ENTER to continue.]"];

/// Result of cleaning one raw chunk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cleaned {
    /// Display-ready text: escape-free, status line removed, blank runs
    /// collapsed, trimmed.
    pub text: String,
    /// The status-bar line, if this chunk contained one.
    pub status: Option<String>,
}

/// Cleans a raw output chunk. Idempotent once no escape sequences remain:
/// `clean(clean(x).text)` yields the same text.
pub fn clean(raw: &str) -> Cleaned {
    let mut stripped = strip_escapes(raw);
    for marker in PAGINATION_MARKERS {
        if stripped.contains(marker) {
            stripped = stripped.replace(marker, "");
        }
    }
    let mut status = None;

    let mut filtered: Vec<&str> = Vec::new();
    for line in stripped.trim().lines() {
        let trimmed = line.trim();
        if is_status_line(trimmed) {
            trace!("extracted status line: {trimmed:?}");
            status = Some(trimmed.replace(GAME_TITLE, GAME_TITLE_SUBSTITUTE));
            continue;
        }
        // A line of nothing but digits is parser noise (stray score echo).
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        filtered.push(line);
    }

    // Collapse runs of blank lines to a single blank line.
    let mut lines: Vec<&str> = Vec::new();
    for (i, line) in filtered.iter().enumerate() {
        if line.trim().is_empty() && (i == 0 || filtered[i - 1].trim().is_empty()) {
            continue;
        }
        lines.push(line);
    }

    Cleaned {
        text: lines.join("\n").trim().to_string(),
        status,
    }
}

/// Removes the recognized escape syntaxes from `raw`.
///
/// Four forms are handled: CSI sequences whose final implies a line move
/// (rewritten to `\n`), charset switches `ESC ( A` / `ESC ( B` (dropped),
/// bare `[NNNd` cursor-column directives (dropped), and any other escape
/// sequence (dropped). An ESC cut off by the end of the chunk is dropped
/// along with whatever partial sequence followed it.
fn strip_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    if let Some(final_byte) = consume_csi(&mut chars) {
                        if LINE_BREAKING_FINALS.contains(&final_byte) {
                            out.push('\n');
                        }
                    }
                }
                // Charset switch or any other two-byte sequence: drop both.
                Some(_) => {
                    chars.next();
                }
                None => {}
            }
            continue;
        }
        if ch == '[' {
            if let Some(skipped) = consume_cursor_directive(&mut chars) {
                trace!("dropped cursor directive [{skipped}d");
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Consumes CSI parameter and intermediate bytes, returning the final byte.
/// Returns `None` when the input ends mid-sequence.
fn consume_csi(chars: &mut std::iter::Peekable<std::str::Chars>) -> Option<char> {
    for ch in chars.by_ref() {
        // Parameter bytes 0x30-0x3F and intermediates 0x20-0x2F.
        if matches!(ch, '\x20'..='\x3f') {
            continue;
        }
        return Some(ch);
    }
    None
}

/// Consumes a `NNNd` cursor-column directive (1-3 digits) after a bare `[`,
/// returning the digits, or `None` without consuming anything if the lookahead
/// does not match.
fn consume_cursor_directive(
    chars: &mut std::iter::Peekable<std::str::Chars>,
) -> Option<String> {
    let mut lookahead = chars.clone();
    let mut digits = String::new();
    while digits.len() < 3 {
        match lookahead.peek() {
            Some(c) if c.is_ascii_digit() => {
                digits.push(*c);
                lookahead.next();
            }
            _ => break,
        }
    }
    if digits.is_empty() || lookahead.peek() != Some(&'d') {
        return None;
    }
    lookahead.next();
    *chars = lookahead;
    Some(digits)
}

/// A status line carries both a score and a move counter, case-insensitively,
/// each followed by a number.
fn is_status_line(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    counter_present(&lower, "score:") && counter_present(&lower, "moves:")
}

fn counter_present(lower: &str, label: &str) -> bool {
    let Some(idx) = lower.find(label) else {
        return false;
    };
    lower[idx + label.len()..]
        .trim_start()
        .starts_with(|c: char| c.is_ascii_digit())
}
