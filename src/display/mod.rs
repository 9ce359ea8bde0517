// src/display/mod.rs

//! Presentation: scaling the logical frame up and putting it on screen.
//!
//! The renderer produces a small logical frame; this module composes it into
//! an output buffer at integer scale with a border, optionally with scanline
//! darkening, and defines the `DisplayDriver` seam between the pacing loop
//! and the actual window. The windowed driver lives in `window`, and a
//! headless driver backs the tests and keeps the simulator functional on
//! machines with no display.

use anyhow::Result;

use crate::renderer::Frame;

pub mod headless;
pub mod window;

#[cfg(test)]
mod tests;

/// How much scanline darkening takes away, per channel, as a divisor shift.
const SCANLINE_SHIFT: u32 = 2;

/// The output surface the pacing loop draws on.
pub trait DisplayDriver {
    /// Composes and shows one frame.
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// Pumps window events and reports whether the user asked to quit.
    /// Called frequently, including inside typing delays, so quitting feels
    /// immediate.
    fn poll_quit(&mut self) -> bool;
}

/// A composed output buffer ready for a window.
pub struct Composed {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// Scales `frame` up by the integer `scale` factor, surrounds it with a
/// `border`-pixel frame of `border_argb`, and optionally darkens the last
/// scaled row of each source row to fake scanlines.
pub fn compose(
    frame: &Frame,
    scale: usize,
    border: usize,
    scanlines: bool,
    border_argb: u32,
) -> Composed {
    let width = frame.width * scale + border * 2;
    let height = frame.height * scale + border * 2;
    let mut pixels = vec![border_argb; width * height];

    for sy in 0..frame.height {
        for repeat in 0..scale {
            let out_y = border + sy * scale + repeat;
            let scanline = scanlines && scale > 1 && repeat == scale - 1;
            let row = &mut pixels[out_y * width..(out_y + 1) * width];
            for sx in 0..frame.width {
                let mut argb = frame.pixel(sx, sy);
                if scanline {
                    argb = darken(argb);
                }
                row[border + sx * scale..border + (sx + 1) * scale].fill(argb);
            }
        }
    }

    Composed {
        width,
        height,
        pixels,
    }
}

/// Largest integer scale that fits the logical frame inside `max_w x max_h`
/// after the border, never below 1.
pub fn fit_scale(frame_w: usize, frame_h: usize, border: usize, max_w: usize, max_h: usize) -> usize {
    let avail_w = max_w.saturating_sub(border * 2);
    let avail_h = max_h.saturating_sub(border * 2);
    (avail_w / frame_w).min(avail_h / frame_h).max(1)
}

fn darken(argb: u32) -> u32 {
    let sub = (argb >> SCANLINE_SHIFT) & 0x003f_3f3f;
    (argb & 0xff00_0000) | ((argb & 0x00ff_ffff) - sub)
}
