// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Structural invariants that must hold after any input.

use super::fixtures::{apply, terminal_80x24};
use crate::term::terminal::Terminal;
use pretty_assertions::assert_eq;

/// A grab-bag of hostile inputs: plain text, wide glyphs, wraps, scrolls,
/// region games, split escapes, and garbage.
fn torture_streams() -> Vec<&'static [u8]> {
    vec![
        b"plain text, nothing special".as_slice(),
        b"\x1b[2J\x1b[H\x1b[31;1mred bold\x1b[0m",
        "漢字テスト wide glyphs".as_bytes(),
        b"\x1b[5;10r\x1b[10;1H\n\n\n\n\n\n\x1b[r",
        b"tabs\there\tand\tthere",
        b"\x1b[?1049hALT\x1b[?1049l",
        b"\xff\xfe garbage \x05\x01",
        b"\x1b[10L\x1b[5M\x1b[3@\x1b[2P\x1b[7X",
        b"wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap \
          wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap wrap",
        b"\x1b]0;title\x07\x1b[8;30;100t\x1bc",
    ]
}

fn check_fragment_invariant(term: &Terminal) {
    let dims = term.dimensions();
    for row_idx in dims.scrollback_top..dims.scrollback_next {
        let Some(row) = term.row(row_idx) else { continue };
        let mut col = 0;
        while col < row.cells.len() {
            let cell = &row.cells[col];
            assert!(
                !cell.attr.fragment,
                "row {row_idx} col {col}: fragment with no head"
            );
            let span = usize::from(cell.attr.columns.max(1));
            for i in 1..span {
                let Some(fragment) = row.cells.get(col + i) else {
                    break;
                };
                assert!(
                    fragment.attr.fragment,
                    "row {row_idx} col {}: continuation not marked fragment",
                    col + i
                );
            }
            col += span;
        }
    }
}

pub mod structural {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_totals_bounded_by_grid() {
        for stream in torture_streams() {
            let mut term = terminal_80x24();
            apply(&mut term, stream);
            let dims = term.dimensions();
            let mut total = 0usize;
            for row_idx in dims.scrollback_top..dims.scrollback_next {
                if let Some(row) = term.row(row_idx) {
                    assert!(
                        row.cells.len() <= dims.cols as usize,
                        "row {row_idx} wider than the grid"
                    );
                    total += row.cells.len();
                }
            }
            let ring_len = (dims.scrollback_next - dims.scrollback_top) as usize;
            assert!(total <= dims.cols as usize * ring_len);
        }
    }

    #[test]
    fn fragments_always_follow_heads() {
        for stream in torture_streams() {
            let mut term = terminal_80x24();
            apply(&mut term, stream);
            check_fragment_invariant(&term);
        }
    }

    #[test]
    fn cursor_stays_in_the_visible_window() {
        for stream in torture_streams() {
            let mut term = terminal_80x24();
            apply(&mut term, stream);
            let (row, col) = term.cursor();
            let delta = term.insert_delta();
            assert!(row >= delta, "cursor above the visible window");
            assert!(row < delta + term.row_count(), "cursor below the window");
            assert!((0..=term.column_count()).contains(&col));
        }
    }

    #[test]
    fn ring_delta_is_monotone() {
        let mut term = Terminal::new(4, 10);
        let mut last_delta = term.dimensions().scrollback_top;
        for _ in 0..50 {
            apply(&mut term, b"line\r\n");
            let delta = term.dimensions().scrollback_top;
            assert!(delta >= last_delta);
            last_delta = delta;
        }
    }
}

pub mod round_trips {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn save_restore_survives_cell_mutations() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b[7;12H\x1b7");
        let saved_relative = (
            term.cursor().0 - term.insert_delta(),
            term.cursor().1,
        );
        apply(&mut term, b"\x1b[2J\x1b[HSCRIBBLE\x1b[5L\x1b[3M");
        apply(&mut term, b"\x1b8");
        let restored_relative = (
            term.cursor().0 - term.insert_delta(),
            term.cursor().1,
        );
        assert_eq!(saved_relative, restored_relative);
    }

    #[test]
    fn full_reset_twice_equals_once() {
        let mut term = terminal_80x24();
        apply(&mut term, b"content\x1b[1m\x1b[5;10r\x1b[?6h");
        apply(&mut term, b"\x1bc");
        let once = (term.cursor(), term.insert_delta(), term.dimensions());
        apply(&mut term, b"\x1bc");
        let twice = (term.cursor(), term.insert_delta(), term.dimensions());
        assert_eq!(once.0, twice.0);
        assert_eq!(once.1, twice.1);
        assert_eq!(once.2.rows, twice.2.rows);
        assert_eq!(once.2.cols, twice.2.cols);
    }
}

pub mod resilience {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn malformed_input_never_wedges_the_pipeline() {
        let mut term = terminal_80x24();
        // Garbage, then a normal print must still work.
        apply(&mut term, b"\xc3\x28\xa0\xa1\xf0\x28\x8c\x28");
        apply(&mut term, b"\x1b[Hok");
        assert!(term.row_text(term.insert_delta()).contains("ok"));
    }

    #[test]
    fn byte_at_a_time_equals_one_shot() {
        let stream: &[u8] = "\x1b[2;3H\x1b[1;31mhi 漢\x1b[0m\x1b[K!".as_bytes();

        let mut one_shot = terminal_80x24();
        apply(&mut one_shot, stream);

        let mut dribble = terminal_80x24();
        for &byte in stream {
            apply(&mut dribble, &[byte]);
        }

        assert_eq!(one_shot.cursor(), dribble.cursor());
        for row in 0..3 {
            assert_eq!(one_shot.row_text(row), dribble.row_text(row), "row {row}");
        }
    }

    #[test]
    fn resize_keeps_cursor_in_bounds() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b[24;80Hcorner");
        term.resize(10, 20);
        let (row, col) = term.cursor();
        assert!(row >= term.insert_delta());
        assert!(row < term.insert_delta() + 10);
        assert!(col < 20);
    }
}
