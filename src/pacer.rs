// src/pacer.rs

//! The typewriter: feeds text to the grid one unit at a time.
//!
//! Game text is revealed word by word, command echo letter by letter. Each
//! unit costs a delay proportional to the ASCII distance between it and the
//! previous unit's key, clamped to a cadence band, which gives the uneven
//! rhythm of a human typist instead of a metronome. Every unit is bracketed
//! by two presents, the cursor running ahead of the text, and delays are
//! slept in small slices so a quit request interrupts mid-sentence.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::trace;

use crate::audio::AudioSink;
use crate::display::DisplayDriver;
use crate::font::GlyphCache;
use crate::renderer::render;
use crate::term::{Style, TerminalGrid};


/// Longest single sleep slice; bounds quit latency during delays.
const SLEEP_SLICE: Duration = Duration::from_millis(10);

/// Word chunks longer than this get the heavier buzz instead of a click.
const BUZZ_THRESHOLD: usize = 6;

/// Delay band for one typed unit, in seconds: `distance * base` clamped to
/// `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    pub base: f64,
    pub min: f64,
    pub max: f64,
}

impl Cadence {
    /// Cadence for interpreter output, revealed in word chunks.
    pub fn game() -> Self {
        Self {
            base: 1.0 / 60.0,
            min: 1.0 / 240.0,
            max: 1.0 / 30.0,
        }
    }

    /// Cadence for echoing the player's command, letter by letter.
    pub fn echo() -> Self {
        Self {
            base: 0.015,
            min: 0.075,
            max: 0.20,
        }
    }

    /// Delay for one unit. Total over any configuration: non-finite or
    /// negative values are treated as zero and an inverted band is
    /// reordered, so a bad config slows typing down or speeds it up but
    /// never aborts a unit.
    fn delay(&self, distance: u32) -> Duration {
        let base = sane_secs(self.base);
        let lo = sane_secs(self.min).min(sane_secs(self.max));
        let hi = sane_secs(self.min).max(sane_secs(self.max));
        Duration::from_secs_f64((f64::from(distance) * base).clamp(lo, hi))
    }
}

fn sane_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

/// How text is split into typed units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunking {
    /// One character at a time.
    Char,
    /// Newlines alone, then words with their trailing whitespace, then bare
    /// whitespace runs.
    Word,
}

/// Ties the grid, renderer, display and audio together for one typing pass.
pub struct Pacer<'a> {
    pub grid: &'a mut TerminalGrid,
    pub cache: &'a mut GlyphCache,
    pub display: &'a mut dyn DisplayDriver,
    pub audio: &'a mut dyn AudioSink,
}

impl Pacer<'_> {
    /// Types `text` into the grid. Returns `Ok(false)` when the user quit
    /// mid-way; the grid keeps whatever was typed before the interruption.
    pub fn type_out(
        &mut self,
        text: &str,
        style: Style,
        cadence: Cadence,
        chunking: Chunking,
        beep: bool,
    ) -> Result<bool> {
        let chunks = match chunking {
            Chunking::Char => char_chunks(text),
            Chunking::Word => word_chunks(text),
        };
        let total = chunks.len();
        let mut prev = b' ';

        for (i, chunk) in chunks.iter().enumerate() {
            if self.display.poll_quit() {
                return Ok(false);
            }
            // The cursor leads each unit: one frame with it ahead of the
            // text, then the unit lands and a second frame keeps the cursor
            // only while units remain.
            let frame = render(self.grid, self.cache, true);
            self.display.present(&frame)?;
            self.grid.write(chunk, style);
            let frame = render(self.grid, self.cache, i + 1 < total);
            self.display.present(&frame)?;

            let key = key_for(chunk);
            let distance = u32::from(prev.abs_diff(key));
            trace!("typed {chunk:?}, distance {distance}");

            if beep && !matches!(*chunk, "\n" | " " | ">") {
                match chunking {
                    Chunking::Word => {
                        if chunk.chars().count() > BUZZ_THRESHOLD {
                            self.audio.buzz(chunk.as_bytes()[0]);
                        }
                    }
                    Chunking::Char => self.audio.click(key),
                }
            }

            // Line breaks and the prompt land instantly.
            if !matches!(*chunk, "\n" | ">") && !self.sleep_interruptible(cadence.delay(distance)) {
                return Ok(false);
            }
            prev = key;
        }
        Ok(true)
    }

    /// Sleeps in short slices, polling for quit. Returns false on quit.
    fn sleep_interruptible(&mut self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        loop {
            if self.display.poll_quit() {
                return false;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return true;
            }
            std::thread::sleep(remaining.min(SLEEP_SLICE));
        }
    }
}

/// The key a chunk is "typed" with: its last character that is not a line
/// ending, with whitespace folded to the space key.
fn key_for(chunk: &str) -> u8 {
    let ch = chunk
        .chars()
        .rev()
        .find(|c| !matches!(c, '\r' | '\n'))
        .unwrap_or(' ');
    if ch.is_whitespace() || !ch.is_ascii() {
        b' '
    } else {
        ch as u8
    }
}

fn char_chunks(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect()
}

/// Splits into typing units: a lone `\n`, or a word with any whitespace that
/// trails it, or a run of non-newline-led whitespace.
fn word_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let end = if first == '\n' {
            1
        } else if first.is_whitespace() {
            scan(rest, 0, char::is_whitespace)
        } else {
            let word_end = scan(rest, 0, |c| !c.is_whitespace());
            scan(rest, word_end, char::is_whitespace)
        };
        chunks.push(&rest[..end]);
        rest = &rest[end..];
    }
    chunks
}

/// Byte offset of the first char at or after `from` failing `pred`.
fn scan(s: &str, from: usize, pred: impl Fn(char) -> bool) -> usize {
    s[from..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| from + i)
}
