// src/display/headless.rs

//! Display driver with no window: frames are composed and discarded.
//!
//! Used by tests, and as the runtime fallback when no window can be opened.

use anyhow::Result;
use log::debug;

use super::{compose, DisplayDriver};
use crate::renderer::Frame;

pub struct HeadlessDriver {
    scale: usize,
    presented: usize,
    last_dimensions: Option<(usize, usize)>,
    quit_after: Option<usize>,
    polls: usize,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self {
            scale: 1,
            presented: 0,
            last_dimensions: None,
            quit_after: None,
            polls: 0,
        }
    }

    /// Makes `poll_quit` report a quit after it has been called `polls`
    /// times. Test hook for exercising cancellation paths.
    pub fn quit_after(mut self, polls: usize) -> Self {
        self.quit_after = Some(polls);
        self
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn last_dimensions(&self) -> Option<(usize, usize)> {
        self.last_dimensions
    }
}

impl Default for HeadlessDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayDriver for HeadlessDriver {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        let composed = compose(frame, self.scale, 0, false, 0);
        self.last_dimensions = Some((composed.width, composed.height));
        self.presented += 1;
        if self.presented == 1 {
            debug!("headless display active, discarding frames");
        }
        Ok(())
    }

    fn poll_quit(&mut self) -> bool {
        self.polls += 1;
        match self.quit_after {
            Some(limit) => self.polls > limit,
            None => false,
        }
    }
}
