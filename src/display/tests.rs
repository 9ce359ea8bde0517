// src/display/tests.rs

use super::headless::HeadlessDriver;
use super::*;
use crate::font::GlyphCache;
use crate::renderer::render;
use crate::term::{TerminalGrid, LOGICAL_HEIGHT, LOGICAL_WIDTH};

fn checker_frame() -> Frame {
    let mut frame = Frame {
        width: 4,
        height: 3,
        pixels: vec![0xff00_0000; 12],
    };
    frame.pixels[0] = 0xffff_ffff;
    frame.pixels[5] = 0xff12_3456;
    frame
}

fn px(composed: &Composed, x: usize, y: usize) -> u32 {
    composed.pixels[y * composed.width + x]
}

#[test]
fn compose_dimensions_include_scale_and_border() {
    let composed = compose(&checker_frame(), 3, 5, false, 0);
    assert_eq!(composed.width, 4 * 3 + 10);
    assert_eq!(composed.height, 3 * 3 + 10);
    assert_eq!(composed.pixels.len(), composed.width * composed.height);
}

#[test]
fn border_pixels_take_border_color() {
    let border = 0xff22_4466;
    let composed = compose(&checker_frame(), 2, 4, false, border);
    assert_eq!(px(&composed, 0, 0), border);
    assert_eq!(
        px(&composed, composed.width - 1, composed.height - 1),
        border
    );
    // Just inside the border is frame content.
    assert_eq!(px(&composed, 4, 4), 0xffff_ffff);
}

#[test]
fn nearest_scaling_replicates_each_source_pixel() {
    let composed = compose(&checker_frame(), 3, 0, false, 0);
    for dy in 0..3 {
        for dx in 0..3 {
            assert_eq!(px(&composed, dx, dy), 0xffff_ffff);
        }
    }
    // Source pixel (1, 1) lands at scaled block (3..6, 3..6).
    assert_eq!(px(&composed, 4, 4), 0xff12_3456);
}

#[test]
fn scanlines_darken_only_the_last_scaled_row() {
    let composed = compose(&checker_frame(), 2, 0, true, 0);
    let bright = px(&composed, 0, 0);
    let dark = px(&composed, 0, 1);
    assert_eq!(bright, 0xffff_ffff);
    assert_ne!(dark, bright);
    // Darkening keeps the alpha byte intact.
    assert_eq!(dark & 0xff00_0000, 0xff00_0000);
    assert!(dark & 0x00ff_ffff < bright & 0x00ff_ffff);
}

#[test]
fn scanlines_are_skipped_at_scale_one() {
    let frame = checker_frame();
    let plain = compose(&frame, 1, 0, false, 0);
    let lined = compose(&frame, 1, 0, true, 0);
    assert_eq!(plain.pixels, lined.pixels);
}

#[test]
fn fit_scale_picks_largest_integer_factor() {
    assert_eq!(fit_scale(624, 400, 0, 1600, 1000), 2);
    assert_eq!(fit_scale(624, 400, 24, 1300, 900), 2);
    assert_eq!(fit_scale(624, 400, 0, 5000, 850), 2);
    // Never below one, even when the frame is too big to fit.
    assert_eq!(fit_scale(624, 400, 0, 100, 100), 1);
}

#[test]
fn resolved_scale_honors_forced_and_derived_modes() {
    use super::window::resolved_scale;
    use crate::config::DisplayConfig;

    let mut cfg = DisplayConfig::default();
    cfg.scale = 3;
    assert_eq!(resolved_scale(&cfg), 3);

    // Derived from configured bounds.
    cfg.scale = 0;
    cfg.border = 0;
    cfg.window_width = Some(1300);
    cfg.window_height = Some(900);
    assert_eq!(resolved_scale(&cfg), 2);

    // Zero bounds are invalid and fall back to the built-in assumption.
    cfg.window_width = Some(0);
    cfg.window_height = Some(0);
    assert_eq!(resolved_scale(&cfg), 2);

    // Bounds smaller than the frame still give a usable window.
    cfg.window_width = Some(300);
    cfg.window_height = Some(200);
    assert_eq!(resolved_scale(&cfg), 1);
}

#[test]
fn headless_driver_counts_presents_and_scripted_quit() {
    let grid = TerminalGrid::default();
    let mut cache = GlyphCache::new();
    let frame = render(&grid, &mut cache, false);

    let mut driver = HeadlessDriver::new().quit_after(2);
    driver.present(&frame).unwrap();
    driver.present(&frame).unwrap();
    assert_eq!(driver.presented(), 2);
    assert_eq!(
        driver.last_dimensions(),
        Some((LOGICAL_WIDTH, LOGICAL_HEIGHT))
    );
    assert!(!driver.poll_quit());
    assert!(!driver.poll_quit());
    assert!(driver.poll_quit());
}
