// src/renderer.rs

//! Rasterizes the character grid into a logical ARGB frame.
//!
//! The frame is always `LOGICAL_WIDTH x LOGICAL_HEIGHT` pixels: the status
//! row on top, content rows below. Scaling to the window happens later in the
//! display layer; this module works in cell units only.

use crate::color::{Rgb, C64_LIGHT_BLUE};
use crate::font::{GlyphCache, CELL_H, CELL_W};
use crate::term::{TerminalGrid, COLS, LOGICAL_HEIGHT, LOGICAL_WIDTH, STATUS_ROWS};


/// One rendered frame of ARGB pixels, row-major.
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    fn new(width: usize, height: usize, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, argb: u32) {
        for row in y..(y + h).min(self.height) {
            let start = row * self.width + x;
            let end = start + w.min(self.width - x);
            self.pixels[start..end].fill(argb);
        }
    }

    /// Blits a glyph sprite at a cell origin, skipping transparent pixels so
    /// the row background shows through.
    fn blit_sprite(&mut self, cell_x: usize, cell_y: usize, sprite: &[u32]) {
        let origin_x = cell_x * CELL_W;
        let origin_y = cell_y * CELL_H;
        for sy in 0..CELL_H {
            for sx in 0..CELL_W {
                let argb = sprite[sy * CELL_W + sx];
                if argb != 0 {
                    self.pixels[(origin_y + sy) * self.width + origin_x + sx] = argb;
                }
            }
        }
    }
}

/// Renders the grid into a fresh logical frame.
///
/// The whole frame starts as the grid's default background. A non-empty
/// status line paints its own background strip across row zero and draws in
/// the default foreground. Content rows paint a background strip only when
/// their color differs from the default, then blit their glyphs in the row
/// foreground. When `show_cursor` is set, the cursor cell is drawn as a
/// solid block.
pub fn render(grid: &TerminalGrid, cache: &mut GlyphCache, show_cursor: bool) -> Frame {
    let mut frame = Frame::new(
        LOGICAL_WIDTH,
        LOGICAL_HEIGHT,
        grid.default_bg().to_argb(),
    );

    if !grid.status_text().is_empty() {
        frame.fill_rect(0, 0, LOGICAL_WIDTH, CELL_H, grid.status_bg().to_argb());
        for (x, ch) in grid.status_text().chars().take(COLS).enumerate() {
            frame.blit_sprite(x, 0, cache.sprite(ch, grid.default_fg()));
        }
    }

    for y in 0..grid.content_row_count() {
        let cell_y = y + STATUS_ROWS;
        if grid.row_bg(y) != grid.default_bg() {
            frame.fill_rect(
                0,
                cell_y * CELL_H,
                LOGICAL_WIDTH,
                CELL_H,
                grid.row_bg(y).to_argb(),
            );
        }
        let fg = grid.row_fg(y);
        for (x, &ch) in grid.row(y).iter().enumerate() {
            if ch != ' ' {
                frame.blit_sprite(x, cell_y, cache.sprite(ch, fg));
            }
        }
    }

    if show_cursor {
        let (cx, cy) = grid.cursor();
        frame.fill_rect(
            cx * CELL_W,
            (cy + STATUS_ROWS) * CELL_H,
            CELL_W,
            CELL_H,
            cursor_color().to_argb(),
        );
    }

    frame
}

fn cursor_color() -> Rgb {
    C64_LIGHT_BLUE
}
