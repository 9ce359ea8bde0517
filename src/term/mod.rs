// src/term/mod.rs

//! The fixed-size scrolling character grid.
//!
//! `TerminalGrid` models a C64-style 78x40 character screen: one status row
//! on top and 39 content rows below it. Rows scroll teletype-fashion, one at
//! a time, and eviction is destructive; there is no scrollback. Styling is
//! row-granular: each content row carries one foreground and one background
//! color, so mixing colors mid-row is not supported.

use log::trace;

use crate::color::{Rgb, C64_BLUE, C64_LIGHT_BLUE, C64_LIGHT_GRAY};
use crate::font::{CELL_H, CELL_W};

#[cfg(test)]
mod tests;

/// Characters per row.
pub const COLS: usize = 78;
/// Total rows including the status row.
pub const ROWS: usize = 40;
/// Rows reserved for the status bar at the top of the screen.
pub const STATUS_ROWS: usize = 1;
/// Scrolling content rows.
pub const CONTENT_ROWS: usize = ROWS - STATUS_ROWS;

/// Logical framebuffer width in pixels, before any display scaling.
pub const LOGICAL_WIDTH: usize = COLS * CELL_W;
/// Logical framebuffer height in pixels, before any display scaling.
pub const LOGICAL_HEIGHT: usize = ROWS * CELL_H;

/// Optional row-style override carried alongside written text. `None` fields
/// leave the row's current color untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Style {
    pub fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            bg: Some(bg),
        }
    }

    fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none()
    }
}

/// The character grid, cursor, and per-row styling.
pub struct TerminalGrid {
    rows: Vec<Vec<char>>,
    row_fg: Vec<Rgb>,
    row_bg: Vec<Rgb>,
    cursor_x: usize,
    cursor_y: usize,
    status_text: String,
    status_bg: Rgb,
    default_fg: Rgb,
    default_bg: Rgb,
}

impl Default for TerminalGrid {
    fn default() -> Self {
        Self::new(C64_LIGHT_GRAY, C64_BLUE)
    }
}

impl TerminalGrid {
    /// Creates a blank grid with the given default row colors.
    pub fn new(default_fg: Rgb, default_bg: Rgb) -> Self {
        Self {
            rows: vec![vec![' '; COLS]; CONTENT_ROWS],
            row_fg: vec![default_fg; CONTENT_ROWS],
            row_bg: vec![default_bg; CONTENT_ROWS],
            cursor_x: 0,
            cursor_y: 0,
            status_text: String::new(),
            status_bg: C64_LIGHT_BLUE,
            default_fg,
            default_bg,
        }
    }

    /// Writes text at the cursor. `\n` breaks the line, `\f` clears the
    /// screen, carriage returns and other non-printables become spaces, and
    /// everything is upper-cased before storage (the font has no lowercase).
    /// Writing past the last column wraps unconditionally; wrapping off the
    /// last row scrolls. A non-plain `style` recolors each row the cursor
    /// touches.
    pub fn write(&mut self, text: &str, style: Style) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    self.newline();
                    self.apply_style(style);
                }
                '\x0c' => {
                    self.clear();
                    self.apply_style(style);
                }
                _ => {
                    self.apply_style(style);
                    let ch = if ch == '\r' || ch.is_control() { ' ' } else { ch };
                    self.rows[self.cursor_y][self.cursor_x] = ch.to_ascii_uppercase();
                    self.cursor_x += 1;
                    if self.cursor_x >= COLS {
                        self.newline();
                        self.apply_style(style);
                    }
                }
            }
        }
    }

    /// Moves the cursor to the start of the next row, scrolling when the
    /// cursor falls off the bottom: the oldest row and its style are
    /// discarded, a blank default-styled row is appended, and the cursor is
    /// pinned to the last row.
    pub fn newline(&mut self) {
        self.cursor_x = 0;
        self.cursor_y += 1;
        if self.cursor_y >= CONTENT_ROWS {
            trace!("scrolling: evicting top row");
            self.rows.remove(0);
            self.rows.push(vec![' '; COLS]);
            self.row_fg.remove(0);
            self.row_fg.push(self.default_fg);
            self.row_bg.remove(0);
            self.row_bg.push(self.default_bg);
            self.cursor_y = CONTENT_ROWS - 1;
        }
    }

    /// Blanks the content area and resets styles and cursor. The status line
    /// is untouched; clear it separately with `set_status("")`.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(' ');
        }
        self.row_fg.fill(self.default_fg);
        self.row_bg.fill(self.default_bg);
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    /// Stores a trimmed, upper-cased copy of the status-bar text.
    pub fn set_status(&mut self, text: &str) {
        self.status_text = text.trim().to_ascii_uppercase();
    }

    /// Recolors the status-bar background.
    pub fn set_status_bg(&mut self, color: Rgb) {
        self.status_bg = color;
    }

    fn apply_style(&mut self, style: Style) {
        if style.is_plain() {
            return;
        }
        if let Some(fg) = style.fg {
            self.row_fg[self.cursor_y] = fg;
        }
        if let Some(bg) = style.bg {
            self.row_bg[self.cursor_y] = bg;
        }
    }

    // --- Accessors used by the renderer and tests ---

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn row(&self, y: usize) -> &[char] {
        &self.rows[y]
    }

    /// The row's text with trailing spaces removed. Test convenience.
    pub fn row_text(&self, y: usize) -> String {
        self.rows[y].iter().collect::<String>().trim_end().to_string()
    }

    pub fn row_fg(&self, y: usize) -> Rgb {
        self.row_fg[y]
    }

    pub fn row_bg(&self, y: usize) -> Rgb {
        self.row_bg[y]
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn status_bg(&self) -> Rgb {
        self.status_bg
    }

    pub fn default_fg(&self) -> Rgb {
        self.default_fg
    }

    pub fn default_bg(&self) -> Rgb {
        self.default_bg
    }

    pub fn content_row_count(&self) -> usize {
        self.rows.len()
    }
}
