// src/font.rs

//! Built-in bitmap font and the tinted glyph cache.
//!
//! The terminal draws from a fixed 256-entry glyph table. Each glyph is a
//! 5x7 pixel pattern centered in an 8x10 cell, the proportions of a late-70s
//! character generator ROM. Only uppercase letterforms exist; the grid
//! upper-cases text before storage, and any code without a pattern renders
//! as the fallback `?` glyph.
//!
//! `GlyphCache` holds pre-rendered ARGB sprites per (code, tint color) pair.
//! Sprites are built lazily the first time a color is requested and kept for
//! the life of the process; the character set is bounded so the cache only
//! ever grows by one sprite sheet per distinct row color.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::color::Rgb;

/// Glyph cell width in pixels.
pub const CELL_W: usize = 8;
/// Glyph cell height in pixels.
pub const CELL_H: usize = 10;

/// Pattern rows are inset one pixel from the cell's top-left corner.
const INSET_X: usize = 1;
const INSET_Y: usize = 1;

/// One glyph as per-row bitmasks; bit `7 - x` covers pixel column `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub rows: [u8; CELL_H],
}

impl GlyphBitmap {
    /// Returns whether the pixel at (x, y) is set.
    #[inline]
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < CELL_W && y < CELL_H && self.rows[y] & (0x80 >> x) != 0
    }
}

const BLANK_GLYPH: GlyphBitmap = GlyphBitmap { rows: [0; CELL_H] };

/// The full 256-entry glyph table, decoded once from the pattern strings.
pub struct GlyphSet {
    glyphs: [GlyphBitmap; 256],
    fallback: GlyphBitmap,
}

/// Process-wide font, decoded on first use.
pub static FONT: Lazy<GlyphSet> = Lazy::new(GlyphSet::builtin);

impl GlyphSet {
    /// Builds the table from the built-in patterns. Codes without a pattern
    /// (control codes, high bytes) get the fallback glyph so that stray bytes
    /// stay visible instead of vanishing.
    fn builtin() -> Self {
        let fallback = decode_pattern(pattern_for('?').expect("fallback pattern present"));
        let mut glyphs = [fallback; 256];
        for (code, glyph) in glyphs.iter_mut().enumerate() {
            let ch = char::from(code as u8);
            if ch == ' ' {
                *glyph = BLANK_GLYPH;
            } else if let Some(pattern) = pattern_for(ch.to_ascii_uppercase()) {
                *glyph = decode_pattern(pattern);
            }
        }
        Self { glyphs, fallback }
    }

    /// Looks up the glyph for a character code. Codes above 255 draw the
    /// fallback glyph.
    pub fn glyph(&self, ch: char) -> &GlyphBitmap {
        match u8::try_from(u32::from(ch)) {
            Ok(code) => &self.glyphs[usize::from(code)],
            Err(_) => &self.fallback,
        }
    }
}

/// A pre-rendered glyph sprite: `CELL_W * CELL_H` ARGB pixels, 0 where
/// transparent.
pub type Sprite = [u32; CELL_W * CELL_H];

/// Lazy map from tint color to a full sprite sheet of 256 rendered glyphs.
#[derive(Default)]
pub struct GlyphCache {
    tints: HashMap<Rgb, Vec<Sprite>>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sprite for `ch` tinted with `color`, rendering the whole
    /// sheet for that color on first request.
    pub fn sprite(&mut self, ch: char, color: Rgb) -> &Sprite {
        let sheet = self
            .tints
            .entry(color)
            .or_insert_with(|| render_sheet(&FONT, color));
        match u8::try_from(u32::from(ch)) {
            Ok(code) => &sheet[usize::from(code)],
            Err(_) => &sheet[usize::from(b'?')],
        }
    }

    /// Number of distinct tint colors rendered so far.
    pub fn tint_count(&self) -> usize {
        self.tints.len()
    }
}

/// Renders every glyph of the set as an ARGB sprite in the given color.
fn render_sheet(font: &GlyphSet, color: Rgb) -> Vec<Sprite> {
    let argb = color.to_argb();
    (0u16..=255)
        .map(|code| {
            let glyph = &font.glyphs[usize::from(code)];
            let mut sprite: Sprite = [0; CELL_W * CELL_H];
            for y in 0..CELL_H {
                for x in 0..CELL_W {
                    if glyph.is_set(x, y) {
                        sprite[y * CELL_W + x] = argb;
                    }
                }
            }
            sprite
        })
        .collect()
}

/// Decodes a 7-line pattern of `'X'`/space into a cell bitmap with the
/// standard inset.
fn decode_pattern(lines: [&str; 7]) -> GlyphBitmap {
    let mut rows = [0u8; CELL_H];
    for (dy, line) in lines.iter().enumerate() {
        for (dx, ch) in line.chars().enumerate() {
            if ch != ' ' {
                rows[INSET_Y + dy] |= 0x80 >> (INSET_X + dx);
            }
        }
    }
    GlyphBitmap { rows }
}

#[rustfmt::skip]
fn pattern_for(ch: char) -> Option<[&'static str; 7]> {
    let pattern = match ch {
        'A' => [" XXX ", "X   X", "X   X", "XXXXX", "X   X", "X   X", "X   X"],
        'B' => ["XXXX ", "X   X", "X   X", "XXXX ", "X   X", "X   X", "XXXX "],
        'C' => [" XXX ", "X   X", "X    ", "X    ", "X    ", "X   X", " XXX "],
        'D' => ["XXXX ", "X   X", "X   X", "X   X", "X   X", "X   X", "XXXX "],
        'E' => ["XXXXX", "X    ", "X    ", "XXXX ", "X    ", "X    ", "XXXXX"],
        'F' => ["XXXXX", "X    ", "X    ", "XXXX ", "X    ", "X    ", "X    "],
        'G' => [" XXX ", "X   X", "X    ", "X XXX", "X   X", "X   X", " XXX "],
        'H' => ["X   X", "X   X", "X   X", "XXXXX", "X   X", "X   X", "X   X"],
        'I' => [" XXX ", "  X  ", "  X  ", "  X  ", "  X  ", "  X  ", " XXX "],
        'J' => ["  XXX", "   X ", "   X ", "   X ", "   X ", "X  X ", " XX  "],
        'K' => ["X   X", "X  X ", "X X  ", "XX   ", "X X  ", "X  X ", "X   X"],
        'L' => ["X    ", "X    ", "X    ", "X    ", "X    ", "X    ", "XXXXX"],
        'M' => ["X   X", "XX XX", "X X X", "X   X", "X   X", "X   X", "X   X"],
        'N' => ["X   X", "XX  X", "X X X", "X  XX", "X   X", "X   X", "X   X"],
        'O' => [" XXX ", "X   X", "X   X", "X   X", "X   X", "X   X", " XXX "],
        'P' => ["XXXX ", "X   X", "X   X", "XXXX ", "X    ", "X    ", "X    "],
        'Q' => [" XXX ", "X   X", "X   X", "X   X", "X X X", "X  X ", " XX X"],
        'R' => ["XXXX ", "X   X", "X   X", "XXXX ", "X X  ", "X  X ", "X   X"],
        'S' => [" XXXX", "X    ", "X    ", " XXX ", "    X", "    X", "XXXX "],
        'T' => ["XXXXX", "  X  ", "  X  ", "  X  ", "  X  ", "  X  ", "  X  "],
        'U' => ["X   X", "X   X", "X   X", "X   X", "X   X", "X   X", " XXX "],
        'V' => ["X   X", "X   X", "X   X", "X   X", "X   X", " X X ", "  X  "],
        'W' => ["X   X", "X   X", "X   X", "X X X", "X X X", "XX XX", "X   X"],
        'X' => ["X   X", "X   X", " X X ", "  X  ", " X X ", "X   X", "X   X"],
        'Y' => ["X   X", "X   X", " X X ", "  X  ", "  X  ", "  X  ", "  X  "],
        'Z' => ["XXXXX", "    X", "   X ", "  X  ", " X   ", "X    ", "XXXXX"],
        '0' => [" XXX ", "X   X", "X  XX", "X X X", "XX  X", "X   X", " XXX "],
        '1' => ["  X  ", " XX  ", "  X  ", "  X  ", "  X  ", "  X  ", " XXX "],
        '2' => [" XXX ", "X   X", "    X", "   X ", "  X  ", " X   ", "XXXXX"],
        '3' => [" XXX ", "X   X", "    X", "  XX ", "    X", "X   X", " XXX "],
        '4' => ["   X ", "  XX ", " X X ", "X  X ", "XXXXX", "   X ", "   X "],
        '5' => ["XXXXX", "X    ", "X    ", "XXXX ", "    X", "    X", "XXXX "],
        '6' => [" XXX ", "X    ", "X    ", "XXXX ", "X   X", "X   X", " XXX "],
        '7' => ["XXXXX", "    X", "   X ", "  X  ", "  X  ", "  X  ", "  X  "],
        '8' => [" XXX ", "X   X", "X   X", " XXX ", "X   X", "X   X", " XXX "],
        '9' => [" XXX ", "X   X", "X   X", " XXXX", "    X", "    X", " XXX "],
        '?' => [" XXX ", "X   X", "    X", "  XX ", "  X  ", "     ", "  X  "],
        '!' => ["  X  ", "  X  ", "  X  ", "  X  ", "  X  ", "     ", "  X  "],
        '.' => ["     ", "     ", "     ", "     ", "     ", " XXX ", " XXX "],
        ',' => ["     ", "     ", "     ", "     ", " XXX ", "   X ", "  X  "],
        ':' => ["     ", "  X  ", "     ", "     ", "  X  ", "     ", "     "],
        ';' => ["     ", "  X  ", "     ", "     ", "  X  ", "  X  ", " X   "],
        '-' => ["     ", "     ", "XXXXX", "     ", "     ", "     ", "     "],
        '_' => ["     ", "     ", "     ", "     ", "     ", "     ", "XXXXX"],
        '\'' => ["  X  ", "  X  ", "  X  ", "     ", "     ", "     ", "     "],
        '"' => [" X X ", " X X ", " X X ", "     ", "     ", "     ", "     "],
        '(' => ["   X ", "  X  ", " X   ", " X   ", " X   ", "  X  ", "   X "],
        ')' => [" X   ", "  X  ", "   X ", "   X ", "   X ", "  X  ", " X   "],
        '/' => ["    X", "   X ", "  X  ", " X   ", "X    ", "     ", "     "],
        '\\' => ["X    ", " X   ", "  X  ", "   X ", "    X", "     ", "     "],
        '+' => ["     ", "  X  ", "  X  ", "XXXXX", "  X  ", "  X  ", "     "],
        '*' => ["X   X", " X X ", "  X  ", "XXXXX", "  X  ", " X X ", "X   X"],
        '<' => ["    X", "   X ", "  X  ", " X   ", "  X  ", "   X ", "    X"],
        '>' => ["X    ", " X   ", "  X  ", "   X ", "  X  ", " X   ", "X    "],
        '[' => [" XXX ", " X   ", " X   ", " X   ", " X   ", " X   ", " XXX "],
        ']' => [" XXX ", "   X ", "   X ", "   X ", "   X ", "   X ", " XXX "],
        '{' => ["   XX", "  X  ", "  X  ", " XX  ", "  X  ", "  X  ", "   XX"],
        '}' => ["XX   ", "  X  ", "  X  ", "  XX ", "  X  ", "  X  ", "XX   "],
        _ => return None,
    };
    Some(pattern)
}
