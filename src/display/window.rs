// src/display/window.rs

//! The real window, drawn with minifb.

use anyhow::{Context, Result};
use log::info;
use minifb::{Key, Window, WindowOptions};

use super::{compose, fit_scale, DisplayDriver};
use crate::config::DisplayConfig;
use crate::renderer::Frame;
use crate::term::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Largest window we assume fits on screen when deriving the scale factor.
const MAX_AUTO_WIDTH: usize = 1600;
const MAX_AUTO_HEIGHT: usize = 1000;

pub struct MinifbDriver {
    window: Window,
    scale: usize,
    border: usize,
    scanlines: bool,
    border_argb: u32,
}

impl MinifbDriver {
    /// Opens the window sized for the logical frame at the configured scale.
    /// A configured scale of zero picks the largest factor that fits the
    /// configured window bounds, or a conservative screen size when none
    /// are given; a zero bound is treated as absent.
    pub fn new(cfg: &DisplayConfig, border_argb: u32) -> Result<Self> {
        let scale = resolved_scale(cfg);
        let width = LOGICAL_WIDTH * scale + cfg.border * 2;
        let height = LOGICAL_HEIGHT * scale + cfg.border * 2;
        info!("opening {width}x{height} window at scale {scale}");

        let mut window = Window::new(
            &cfg.title,
            width,
            height,
            WindowOptions {
                borderless: cfg.borderless,
                topmost: cfg.topmost,
                ..WindowOptions::default()
            },
        )
        .context("opening display window")?;
        if let Some((x, y)) = cfg.position {
            window.set_position(x, y);
        }
        window.set_target_fps(cfg.target_fps);

        Ok(Self {
            window,
            scale,
            border: cfg.border,
            scanlines: cfg.scanlines,
            border_argb,
        })
    }
}

/// The scale factor the window will use: forced when nonzero, otherwise
/// derived from the configured bounds with zero bounds normalized away.
pub(crate) fn resolved_scale(cfg: &DisplayConfig) -> usize {
    if cfg.scale != 0 {
        return cfg.scale;
    }
    let max_w = cfg.window_width.filter(|&w| w > 0).unwrap_or(MAX_AUTO_WIDTH);
    let max_h = cfg
        .window_height
        .filter(|&h| h > 0)
        .unwrap_or(MAX_AUTO_HEIGHT);
    fit_scale(LOGICAL_WIDTH, LOGICAL_HEIGHT, cfg.border, max_w, max_h)
}

impl DisplayDriver for MinifbDriver {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let composed = compose(
            frame,
            self.scale,
            self.border,
            self.scanlines,
            self.border_argb,
        );
        self.window
            .update_with_buffer(&composed.pixels, composed.width, composed.height)
            .context("presenting frame")
    }

    fn poll_quit(&mut self) -> bool {
        self.window.update();
        !self.window.is_open() || self.window.is_key_down(Key::Escape)
    }
}
