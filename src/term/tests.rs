// src/term/tests.rs

//! Unit tests for the character grid: writing, wrapping, scrolling, styling.

use super::*;
use crate::color::{C64_BLACK, C64_WHITE};

fn grid() -> TerminalGrid {
    TerminalGrid::default()
}

#[test]
fn starts_blank_with_cursor_at_origin() {
    let g = grid();
    assert_eq!(g.cursor(), (0, 0));
    assert_eq!(g.content_row_count(), CONTENT_ROWS);
    for y in 0..CONTENT_ROWS {
        assert_eq!(g.row(y).len(), COLS);
        assert!(g.row(y).iter().all(|&c| c == ' '));
    }
}

#[test]
fn writes_uppercase_and_advances_cursor() {
    let mut g = grid();
    g.write("Hello", Style::default());
    assert_eq!(g.row_text(0), "HELLO");
    assert_eq!(g.cursor(), (5, 0));
}

#[test]
fn one_char_at_a_time_matches_whole_string() {
    // End-to-end scenario: "HELLO\n" emitted unit by unit.
    let mut g = grid();
    for ch in "HELLO\n".chars() {
        g.write(&ch.to_string(), Style::default());
    }
    assert_eq!(g.cursor(), (0, 1));
    assert_eq!(g.row_text(0), "HELLO");
    assert!(g.row(0)[5..].iter().all(|&c| c == ' '));
}

#[test]
fn newline_resets_column() {
    let mut g = grid();
    g.write("AB\nCD", Style::default());
    assert_eq!(g.row_text(0), "AB");
    assert_eq!(g.row_text(1), "CD");
    assert_eq!(g.cursor(), (2, 1));
}

#[test]
fn carriage_return_and_controls_become_spaces() {
    let mut g = grid();
    g.write("A\rB\tC", Style::default());
    assert_eq!(g.row(0)[..5], ['A', ' ', 'B', ' ', 'C']);
}

#[test]
fn long_line_wraps_at_column_limit() {
    let mut g = grid();
    let text = "X".repeat(COLS + 3);
    g.write(&text, Style::default());
    assert_eq!(g.cursor(), (3, 1));
    assert!(g.row(0).iter().all(|&c| c == 'X'));
    assert_eq!(g.row_text(1), "XXX");
}

#[test]
fn grid_shape_is_invariant_under_any_write() {
    let mut g = grid();
    g.write(&"wrap me ".repeat(500), Style::default());
    g.write("\n\n\n\x0cafter clear\n", Style::default());
    assert_eq!(g.content_row_count(), CONTENT_ROWS);
    for y in 0..CONTENT_ROWS {
        assert_eq!(g.row(y).len(), COLS);
    }
    let (x, y) = g.cursor();
    assert!(x < COLS);
    assert!(y < CONTENT_ROWS);
}

#[test]
fn overflow_scrolls_and_evicts_oldest_row() {
    let mut g = grid();
    for i in 0..=CONTENT_ROWS {
        g.write(&format!("LINE {i}\n"), Style::default());
    }
    // First line scrolled off; the last written line sits on the final row
    // and the cursor is pinned below it on the same row.
    for y in 0..CONTENT_ROWS {
        assert_ne!(g.row_text(y), "LINE 0");
    }
    assert_eq!(g.row_text(CONTENT_ROWS - 2), format!("LINE {CONTENT_ROWS}"));
    assert_eq!(g.cursor(), (0, CONTENT_ROWS - 1));
}

#[test]
fn last_written_line_lands_on_bottom_row() {
    let mut g = grid();
    for i in 0..CONTENT_ROWS {
        g.write(&format!("LINE {i}\n"), Style::default());
    }
    g.write("LAST", Style::default());
    for y in 0..CONTENT_ROWS {
        assert_ne!(g.row_text(y), "LINE 0");
    }
    assert_eq!(g.row_text(CONTENT_ROWS - 1), "LAST");
}

#[test]
fn scrolling_evicts_row_style_with_the_row() {
    let mut g = grid();
    let loud = Style::new(C64_WHITE, C64_BLACK);
    g.write("styled", loud);
    assert_eq!(g.row_fg(0), C64_WHITE);
    // Fill the screen until the styled row falls off the top.
    for _ in 0..=CONTENT_ROWS {
        g.write("\n", Style::default());
    }
    for y in 0..CONTENT_ROWS {
        assert_eq!(g.row_fg(y), g.default_fg());
        assert_eq!(g.row_bg(y), g.default_bg());
    }
}

#[test]
fn style_is_row_scoped() {
    let mut g = grid();
    g.write("plain\n", Style::default());
    g.write("loud", Style::new(C64_WHITE, C64_BLACK));
    assert_eq!(g.row_fg(0), g.default_fg());
    assert_eq!(g.row_fg(1), C64_WHITE);
    assert_eq!(g.row_bg(1), C64_BLACK);
}

#[test]
fn form_feed_clears_content_but_not_status() {
    let mut g = grid();
    g.set_status("Score: 1 Moves: 2");
    g.write("some text\nmore", Style::new(C64_WHITE, C64_BLACK));
    g.write("\x0c", Style::default());
    assert_eq!(g.cursor(), (0, 0));
    for y in 0..CONTENT_ROWS {
        assert!(g.row(y).iter().all(|&c| c == ' '));
        assert_eq!(g.row_fg(y), g.default_fg());
    }
    assert_eq!(g.status_text(), "SCORE: 1 MOVES: 2");
    g.set_status("");
    assert_eq!(g.status_text(), "");
}

#[test]
fn status_is_trimmed_and_uppercased() {
    let mut g = grid();
    g.set_status("  Score: 10  Moves: 3  ");
    assert_eq!(g.status_text(), "SCORE: 10  MOVES: 3");
}
