// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Literal input → expected state scenarios.

use super::fixtures::{apply, char_at, prefilled, terminal_80x24};
use crate::screen::cell::color;
use pretty_assertions::assert_eq;

pub mod plain_text {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hello_world_lands_on_row_zero() {
        let mut term = terminal_80x24();
        apply(&mut term, b"Hello, world!\n");

        let expected = "Hello, world!";
        for (i, ch) in expected.chars().enumerate() {
            assert_eq!(char_at(&term, 0, i as i64), ch, "column {i}");
        }
        // Cells carry the untouched defaults.
        let cell = term.cell(0, 0).unwrap();
        assert!(!cell.attr.bold);
        assert_eq!(cell.attr.fore, color::DEF_FG);

        // The line feed moved the cursor to row 1 without a carriage
        // return.
        let (row, col) = term.cursor();
        assert_eq!(row, 1);
        assert_eq!(col, 13);
        assert_eq!(term.insert_delta(), 0);
    }

    #[test]
    fn ascii_is_one_cell_per_byte() {
        let mut term = terminal_80x24();
        let input: Vec<u8> = (b'a'..=b'z').collect();
        apply(&mut term, &input);
        let (row, col) = term.cursor();
        assert_eq!((row, col), (0, 26));
        let row0 = term.row(0).unwrap();
        assert_eq!(row0.cells.len(), 26);
        for (i, cell) in row0.cells.iter().enumerate() {
            assert_eq!(cell.c, u32::from(input[i]));
            assert_eq!(cell.attr.columns, 1);
            assert!(!cell.attr.fragment);
        }
    }
}

pub mod graphic_rendition {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bold_on_then_off() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b[1mA\x1b[0mB");
        let row = term.row(0).unwrap();
        assert_eq!(row.cells[0].c, u32::from('A'));
        assert!(row.cells[0].attr.bold);
        assert_eq!(row.cells[1].c, u32::from('B'));
        assert!(!row.cells[1].attr.bold);
    }
}

pub mod cursor_and_erase {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cup_then_erase_to_line_end() {
        let mut term = prefilled(24, 80, b'X');
        apply(&mut term, b"\x1b[10;20H\x1b[K");

        for col in 0..19 {
            assert_eq!(char_at(&term, 9, col), 'X', "column {col} should survive");
        }
        for col in 19..80 {
            assert_eq!(char_at(&term, 9, col), ' ', "column {col} should clear");
        }
        assert_eq!(term.cursor(), (9, 19));
        // Neighbouring rows are untouched.
        assert_eq!(char_at(&term, 8, 40), 'X');
        assert_eq!(char_at(&term, 10, 40), 'X');
    }
}

pub mod autowrap {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exactly_eighty_then_one_more() {
        let mut term = terminal_80x24();
        let mut input = vec![b'A'; 80];
        input.push(b'B');
        apply(&mut term, &input);

        let row0 = term.row(0).unwrap();
        assert_eq!(row0.cells.len(), 80);
        assert!(row0.cells.iter().all(|c| c.c == u32::from('A')));
        assert!(row0.soft_wrapped);
        assert_eq!(char_at(&term, 1, 0), 'B');
        assert_eq!(term.cursor(), (1, 1));
    }

    #[test]
    fn wrap_disabled_overstrikes_last_column() {
        let mut term = terminal_80x24();
        let mut input = b"\x1b[?7l".to_vec();
        input.extend(vec![b'A'; 80]);
        input.push(b'B');
        apply(&mut term, &input);
        let row0 = term.row(0).unwrap();
        assert_eq!(row0.cells.len(), 80);
        assert_eq!(char_at(&term, 0, 79), 'B');
        assert!(term.row(1).is_none());
    }
}

pub mod alternate_screen {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn switch_write_switch_back() {
        let mut term = terminal_80x24();
        apply(&mut term, b"before");
        let cursor_before = term.cursor();

        apply(&mut term, b"\x1b[?1049h");
        apply(&mut term, b"ABC");
        // The normal screen's content is invisible from here.
        let alt_top = term.insert_delta();
        assert_eq!(term.row_text(alt_top), "ABC");

        apply(&mut term, b"\x1b[?1049l");
        assert_eq!(term.cursor(), cursor_before);
        assert_eq!(term.row_text(0), "before");
    }
}

pub mod device_status {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cursor_position_report() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b[4;6H\x1b[6n");
        assert_eq!(term.outgoing_drain(), b"\x1b[4;6R");
    }
}

pub mod split_sequences {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_split_across_feeds() {
        let mut term = terminal_80x24();
        apply(&mut term, b"ab\x1b[1");
        // Nothing beyond the text moved yet.
        assert_eq!(term.cursor(), (0, 2));
        apply(&mut term, b"0;5H");
        assert_eq!(term.cursor(), (9, 4));
    }

    #[test]
    fn title_split_across_feeds() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b]2;half a tit");
        apply(&mut term, b"le\x07done");
        let events = term.drain_events();
        assert!(events.contains(&crate::term::events::TermEvent::WindowTitleChanged(
            "half a title".into()
        )));
        assert_eq!(term.row_text(0), "done");
    }
}

pub mod region_laws {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setting_then_resetting_region_equals_never_restricting() {
        let mut term = terminal_80x24();
        apply(&mut term, b"\x1b[5;10r\x1b[1;24r");
        assert!(!term.screen().scrolling_restricted);
    }

    #[test]
    fn decset_47_round_trip_restores_screen_not_content() {
        let mut term = terminal_80x24();
        apply(&mut term, b"one\x1b[?47h\x1b[?47l");
        // Back on the normal screen with its content intact.
        assert_eq!(term.row_text(0), "one");
    }
}
