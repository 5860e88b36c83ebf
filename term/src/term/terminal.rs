// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! The terminal core: byte streams in, grid state and events out.
//!
//! `feed` copies child output into the incoming buffer and arms the update
//! timers; `process_incoming` fragments and decodes the bytes, runs the
//! sequence matcher over the decoded code points, and either dispatches
//! handlers or inserts text into the active screen. Replies to the child
//! accumulate in the outgoing buffer for the host to drain. Everything
//! observable is queued as a [`TermEvent`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use crate::bytebuf::ByteBuffer;
use crate::charset::{CodePoint, Iso2022};
use crate::error::TermError;
use crate::matcher::{MatchTable, TableMatch};
use crate::screen::cell::Cell;
use crate::screen::row::RowData;
use crate::screen::screen::Screen;
use crate::screen::selection::Selection;
use crate::seq::{self, ProcessOutcome};
use crate::termcap::{self, Entry, XTERM_EXTENSIONS};

use super::events::TermEvent;
use super::timers::UpdateTimers;

/// Default scrollback depth in rows.
pub const DEFAULT_SCROLLBACK: usize = 512;

/// Default tab width when the termcap entry carries no `it`.
const DEFAULT_TAB_WIDTH: i64 = 8;

/// Keypad / cursor key personality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    #[default]
    Normal,
    Application,
}

/// Function-key compatibility personality (DEC private modes 1051/1052/
/// 1060/1061). Enabling one implies disabling the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FkeyMode {
    #[default]
    Normal,
    Sun,
    Hp,
    Legacy,
    Vt220,
}

/// The mutually exclusive mouse tracking modes (DEC 9/1000/1001/1002/1003).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseTracking {
    #[default]
    Off,
    SendXyOnClick,
    SendXyOnButton,
    HiliteTracking,
    CellMotionTracking,
    AllMotionTracking,
}

/// Boolean termcap personality flags consulted by the cell layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmulationFlags {
    /// Autowrap (termcap `am`, toggled by DECAWM).
    pub am: bool,
    /// Backspace wraps to the previous row (termcap `bw`).
    pub bw: bool,
    /// xterm-style deferred wrap at the right margin (termcap `xn`).
    pub xn: bool,
}

/// One registered highlight pattern.
#[derive(Debug)]
pub(crate) struct MatchPattern {
    pub tag: i32,
    pub regex: regex::Regex,
    pub cursor_id: Option<i32>,
}

/// Grid geometry snapshot returned by [`Terminal::dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: i64,
    pub cols: i64,
    /// First retained scrollback row.
    pub scrollback_top: i64,
    /// One past the newest row.
    pub scrollback_next: i64,
}

#[derive(Debug)]
pub struct Terminal {
    pub(crate) emulation: String,
    pub(crate) termcap: Entry,
    pub(crate) row_count: i64,
    pub(crate) column_count: i64,
    /// `screens[0]` is the normal screen, `screens[1]` the alternate.
    pub(crate) screens: [Screen; 2],
    pub(crate) active: usize,
    /// One-row reuse cache for evicted / removed rows.
    pub(crate) free_row: Option<RowData>,
    /// Tab stop columns; `None` means no stops at all.
    pub(crate) tabstops: Option<HashSet<i64>>,
    pub(crate) flags: EmulationFlags,
    pub(crate) iso2022: Iso2022,
    pub(crate) matcher: MatchTable,
    pub(crate) incoming: ByteBuffer,
    pub(crate) outgoing: ByteBuffer,
    pub(crate) pending: Vec<CodePoint>,
    pub(crate) events: VecDeque<TermEvent>,
    /// DECSET state snapshots for save-mode / restore-mode.
    pub(crate) dec_saved: HashMap<i64, bool>,
    pub(crate) mouse_tracking: MouseTracking,
    pub(crate) cursor_mode: KeyMode,
    pub(crate) keypad_mode: KeyMode,
    pub(crate) fkey_mode: FkeyMode,
    pub(crate) meta_sends_escape: bool,
    pub(crate) cursor_visible: bool,
    pub(crate) smooth_scroll: bool,
    pub(crate) margin_bell: bool,
    pub(crate) scroll_on_output: bool,
    pub(crate) scrollback_lines: usize,
    pub(crate) text_inserted: bool,
    pub(crate) text_deleted: bool,
    pub(crate) text_modified: bool,
    pub(crate) selection: Selection,
    pub(crate) matches: Vec<MatchPattern>,
    pub(crate) next_match_tag: i32,
    pub(crate) timers: UpdateTimers,
    /// Terminal became unusable (storage exhaustion); only `Eof` remains.
    pub(crate) dead: bool,
}

impl Terminal {
    /// Create an `xterm`-emulating terminal with the given visible grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `cols` is zero.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "terminal geometry must be non-zero");
        let scrollback = DEFAULT_SCROLLBACK.max(rows);
        let mut term = Self {
            emulation: String::new(),
            termcap: Entry::default(),
            row_count: rows as i64,
            column_count: cols as i64,
            screens: [Screen::new(scrollback), Screen::new(rows)],
            active: 0,
            free_row: None,
            tabstops: None,
            flags: EmulationFlags::default(),
            iso2022: Iso2022::new(None),
            matcher: MatchTable::new(),
            incoming: ByteBuffer::new(),
            outgoing: ByteBuffer::new(),
            pending: Vec::new(),
            events: VecDeque::new(),
            dec_saved: HashMap::new(),
            mouse_tracking: MouseTracking::default(),
            cursor_mode: KeyMode::default(),
            keypad_mode: KeyMode::default(),
            fkey_mode: FkeyMode::default(),
            meta_sends_escape: false,
            cursor_visible: true,
            smooth_scroll: false,
            margin_bell: false,
            scroll_on_output: true,
            scrollback_lines: scrollback,
            text_inserted: false,
            text_deleted: false,
            text_modified: false,
            selection: Selection::new(),
            matches: Vec::new(),
            next_match_tag: 0,
            timers: UpdateTimers::new(),
            dead: false,
        };
        term.set_emulation(termcap::DEFAULT_EMULATION)
            .expect("builtin default emulation always present");
        // Construction is not an observable state change.
        term.events.clear();
        term
    }

    // ---------------------------------------------------------------------
    // Emulation / termcap
    // ---------------------------------------------------------------------

    /// Load the termcap entry for `emulation` and rebuild the sequence
    /// matcher from its string capabilities plus the xterm extension table.
    pub fn set_emulation(&mut self, emulation: &str) -> Result<(), TermError> {
        let entry = termcap::find_entry(emulation)
            .ok_or_else(|| TermError::UnknownEmulation(emulation.to_owned()))?;

        let mut matcher = MatchTable::new();
        for (cap, value) in &entry.strings {
            matcher.add(value, cap);
        }
        // Extensions go second: long names win pattern collisions because
        // their handlers use the 1-based wire conventions.
        for &(pattern, name) in XTERM_EXTENSIONS {
            matcher.add(pattern, name);
        }

        self.flags = EmulationFlags {
            am: entry.find_boolean("am"),
            bw: entry.find_boolean("bw"),
            xn: entry.find_boolean("xn"),
        };
        self.matcher = matcher;
        self.termcap = entry;
        let changed = self.emulation != emulation;
        self.emulation = emulation.to_owned();
        self.set_default_tabstops();
        if changed {
            self.emit(TermEvent::EmulationChanged(emulation.to_owned()));
        }
        Ok(())
    }

    #[must_use]
    pub fn emulation(&self) -> &str { &self.emulation }

    /// Reset tab stops to one every `it` columns (default 8).
    pub(crate) fn set_default_tabstops(&mut self) {
        let width = self
            .termcap
            .find_numeric("it")
            .unwrap_or(DEFAULT_TAB_WIDTH)
            .max(1);
        let mut stops = HashSet::new();
        let mut column = 0;
        while column < self.column_count.max(132) {
            stops.insert(column);
            column += width;
        }
        self.tabstops = Some(stops);
    }

    pub(crate) fn get_tabstop(&self, column: i64) -> bool {
        self.tabstops
            .as_ref()
            .is_some_and(|stops| stops.contains(&column))
    }

    pub(crate) fn set_tabstop(&mut self, column: i64) {
        self.tabstops
            .get_or_insert_with(HashSet::new)
            .insert(column);
    }

    pub(crate) fn clear_tabstop(&mut self, column: i64) {
        if let Some(stops) = self.tabstops.as_mut() {
            stops.remove(&column);
        }
    }

    // ---------------------------------------------------------------------
    // Byte streams
    // ---------------------------------------------------------------------

    /// Append child output. Non-blocking: decoding happens on the next
    /// timer fire or explicit [`process_incoming`](Self::process_incoming).
    pub fn feed(&mut self, bytes: &[u8]) {
        if self.dead {
            return;
        }
        self.incoming.append(bytes);
        self.timers.arm(Instant::now());
    }

    /// Queue `bytes` for the child and announce them.
    pub fn feed_child(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.outgoing.append(bytes);
        self.emit(TermEvent::Commit(bytes.len()));
    }

    /// Bytes waiting to be written to the child.
    #[must_use]
    pub fn outgoing_drain(&self) -> &[u8] { self.outgoing.as_slice() }

    /// The host wrote `n` bytes to the child; drop them.
    pub fn outgoing_consume(&mut self, n: usize) { self.outgoing.consume(n); }

    /// The earliest pending timer deadline, for the host's event loop.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> { self.timers.next_deadline() }

    /// Drive the timers at `now`. Returns true when a processing pass ran.
    pub fn fire_timers(&mut self, now: Instant) -> bool {
        if !self.timers.fire(now) {
            return false;
        }
        self.process_incoming();
        if !self.incoming.is_empty() || !self.pending.is_empty() {
            self.timers.rearm_display(now);
        }
        true
    }

    /// The child exited: drain what is buffered, stop the timers, and
    /// report end-of-stream.
    pub fn child_exited(&mut self, status: i32) {
        self.process_incoming();
        self.timers.cancel();
        self.emit(TermEvent::ChildExited(status));
        self.emit(TermEvent::Eof);
    }

    // ---------------------------------------------------------------------
    // The input pipeline
    // ---------------------------------------------------------------------

    /// Decode buffered bytes and apply them to the screen model.
    pub fn process_incoming(&mut self) {
        if self.dead {
            return;
        }

        let cursor_before = self.screen().cursor_current;
        let was_at_bottom = self.screen().scroll_delta == self.screen().insert_delta;

        let codeset_changed = self.iso2022.process(&mut self.incoming, &mut self.pending);
        if codeset_changed {
            let name = self.iso2022.codeset().to_owned();
            self.emit(TermEvent::EncodingChanged(name));
        }

        let mut start = 0;
        while start < self.pending.len() {
            match self.matcher.match_input(&self.pending[start..]) {
                TableMatch::Match {
                    name,
                    consumed,
                    params,
                } => {
                    let outcome = seq::dispatch(self, &name, &params);
                    start += consumed;
                    if outcome == ProcessOutcome::Reenter {
                        // The handler replaced enough state (e.g. the
                        // active screen) that matching must restart on a
                        // fresh pass.
                        self.timers.rearm_display(Instant::now());
                        break;
                    }
                    if outcome == ProcessOutcome::Pause {
                        break;
                    }
                }
                TableMatch::NoMatch => {
                    self.control_permute_fixup(start);
                    let c = self.pending[start];
                    self.insert_char(c, false);
                    start += 1;
                }
                TableMatch::Incomplete => {
                    // The tail may grow into a full sequence; keep it.
                    break;
                }
            }
        }
        // A reset handler may have already emptied the pending array.
        self.pending.drain(..start.min(self.pending.len()));

        if self.screen().cursor_current != cursor_before {
            self.emit(TermEvent::CursorMoved);
        }
        if self.scroll_on_output && was_at_bottom {
            self.scroll_to_bottom();
        }
        self.flush_text_flags();
    }

    /// vttest permute: an unrecognised control character trailing a
    /// printable one is handled first, so the perceived ordering of the
    /// visible text survives the stray control.
    fn control_permute_fixup(&mut self, start: usize) {
        let Some(&c) = self.pending.get(start) else {
            return;
        };
        let Some(&next) = self.pending.get(start + 1) else {
            return;
        };
        if c < 0x20 || !(0x01..0x20).contains(&next) {
            return;
        }
        if matches!(self.matcher.match_input(&[next]), TableMatch::NoMatch) {
            tracing::trace!(control = next, "permuting stray control ahead of printable");
            self.pending.swap(start, start + 1);
        }
    }

    fn flush_text_flags(&mut self) {
        let any = self.text_inserted || self.text_deleted || self.text_modified;
        if self.text_inserted {
            self.emit(TermEvent::TextInserted);
        }
        if self.text_deleted {
            self.emit(TermEvent::TextDeleted);
        }
        if self.text_modified {
            self.emit(TermEvent::TextModified);
        }
        if any {
            self.emit(TermEvent::ContentsChanged);
        }
        self.text_inserted = false;
        self.text_deleted = false;
        self.text_modified = false;
    }

    // ---------------------------------------------------------------------
    // Grid queries
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn row(&self, absolute_row: i64) -> Option<&RowData> {
        self.screen().row_data.get(absolute_row)
    }

    #[must_use]
    pub fn cell(&self, absolute_row: i64, col: i64) -> Option<&Cell> {
        let row = self.row(absolute_row)?;
        row.cells.get(usize::try_from(col).ok()?)
    }

    /// Current cursor as (absolute row, column).
    #[must_use]
    pub fn cursor(&self) -> (i64, i64) {
        let pos = self.screen().cursor_current;
        (pos.row, pos.col)
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            rows: self.row_count,
            cols: self.column_count,
            scrollback_top: self.screen().row_data.delta(),
            scrollback_next: self.screen().row_data.next(),
        }
    }

    #[must_use]
    pub fn row_count(&self) -> i64 { self.row_count }

    #[must_use]
    pub fn column_count(&self) -> i64 { self.column_count }

    /// First visible row of the active screen.
    #[must_use]
    pub fn insert_delta(&self) -> i64 { self.screen().insert_delta }

    /// Viewport top; move it with [`set_scroll_delta`](Self::set_scroll_delta).
    #[must_use]
    pub fn scroll_delta(&self) -> i64 { self.screen().scroll_delta }

    pub fn set_scroll_delta(&mut self, delta: i64) {
        let screen = self.screen_mut();
        let clamped = delta.clamp(screen.row_data.delta(), screen.insert_delta);
        if clamped != screen.scroll_delta {
            screen.scroll_delta = clamped;
            self.emit(TermEvent::AdjustmentChanged);
            self.emit(TermEvent::ContentsChanged);
        }
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        let bottom = self.screen().insert_delta;
        self.set_scroll_delta(bottom);
    }

    // ---------------------------------------------------------------------
    // Geometry and lifecycle
    // ---------------------------------------------------------------------

    /// Change the visible grid size. Applied between processing passes, so
    /// a pending wide-character sequence always completes first.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            return;
        }
        let rows_i = rows as i64;
        let cols_i = cols as i64;
        if rows_i == self.row_count && cols_i == self.column_count {
            return;
        }
        self.row_count = rows_i;
        self.column_count = cols_i;

        // The alternate screen never carries history: its ring capacity
        // tracks the row count exactly.
        let scrollback = self.scrollback_lines.max(rows);
        Self::rebuild_ring(&mut self.screens[0], scrollback);
        Self::rebuild_ring(&mut self.screens[1], rows);

        for screen in &mut self.screens {
            // Keep the viewport anchored and the cursor in bounds.
            let next = screen.row_data.next();
            screen.insert_delta = screen
                .insert_delta
                .clamp(screen.row_data.delta(), (next - rows_i).max(screen.row_data.delta()).max(0));
            screen.cursor_current.row = screen
                .cursor_current
                .row
                .clamp(screen.insert_delta, screen.insert_delta + rows_i - 1);
            screen.cursor_current.col = screen.cursor_current.col.clamp(0, cols_i - 1);
            screen.scroll_delta = screen
                .scroll_delta
                .clamp(screen.row_data.delta(), screen.insert_delta);
            if screen.scrolling_restricted {
                let region = &mut screen.scrolling_region;
                region.start = region.start.clamp(0, rows_i - 1);
                region.end = region.end.clamp(region.start, rows_i - 1);
                if region.start == 0 && region.end == rows_i - 1 {
                    screen.scrolling_restricted = false;
                }
            }
        }

        self.adjust_adjustments();
        self.emit(TermEvent::CharSizeChanged);
        self.emit(TermEvent::ContentsChanged);
    }

    fn rebuild_ring(screen: &mut Screen, new_max: usize) {
        if screen.row_data.max() == new_max {
            return;
        }
        let delta = screen.row_data.delta();
        let mut fresh = crate::ring::Ring::new(new_max, delta);
        let mut position = delta;
        while let Some(row) = screen.row_data.remove(position) {
            fresh.append(row);
            position += 1;
        }
        screen.row_data = fresh;
    }

    /// Change the scrollback depth of the normal screen.
    pub fn set_scrollback_lines(&mut self, lines: usize) {
        self.scrollback_lines = lines;
        let capacity = lines.max(self.row_count as usize);
        Self::rebuild_ring(&mut self.screens[0], capacity);
        self.adjust_adjustments();
    }

    /// Reset terminal state. `full` also clears saved modes, tab stops, the
    /// keypad personality and reopens the converters; `clear_history`
    /// empties the scrollback.
    pub fn reset(&mut self, full: bool, clear_history: bool) {
        self.incoming.clear();
        self.outgoing.clear();
        self.pending.clear();
        self.iso2022.reset();

        if clear_history {
            for screen in &mut self.screens {
                let next = screen.row_data.next();
                screen.row_data.reset(next);
                screen.insert_delta = screen.row_data.delta();
                screen.scroll_delta = screen.insert_delta;
            }
        }
        for screen in &mut self.screens {
            screen.reset_state();
        }
        self.active = 0;

        if full {
            self.dec_saved.clear();
            self.set_default_tabstops();
            self.cursor_mode = KeyMode::Normal;
            self.keypad_mode = KeyMode::Normal;
            self.fkey_mode = FkeyMode::Normal;
            self.mouse_tracking = MouseTracking::Off;
            self.meta_sends_escape = false;
            self.cursor_visible = true;
            let codeset = self.iso2022.native_codeset().to_owned();
            if let Err(err) = self.iso2022.set_codeset(&codeset) {
                tracing::warn!(%err, "reopening native codeset after full reset failed");
            }
            self.selection.clear();
            self.emit(TermEvent::SelectionChanged);
        }
        self.adjust_adjustments();
        self.emit(TermEvent::ContentsChanged);
    }

    // ---------------------------------------------------------------------
    // Encoding
    // ---------------------------------------------------------------------

    /// Switch the child codeset. On failure the previous converter stays
    /// active and the error is reported.
    pub fn set_encoding(&mut self, codeset: &str) -> Result<(), TermError> {
        if codeset == self.iso2022.codeset() {
            return Ok(());
        }
        self.iso2022.set_codeset(codeset)?;
        self.emit(TermEvent::EncodingChanged(codeset.to_owned()));
        Ok(())
    }

    #[must_use]
    pub fn encoding(&self) -> &str { self.iso2022.codeset() }

    // ---------------------------------------------------------------------
    // Match regexes
    // ---------------------------------------------------------------------

    /// Register a highlight pattern checked by [`match_check`](Self::match_check).
    pub fn add_match(&mut self, pattern: &str) -> Result<i32, TermError> {
        let regex = regex::Regex::new(pattern)?;
        let tag = self.next_match_tag;
        self.next_match_tag += 1;
        self.matches.push(MatchPattern {
            tag,
            regex,
            cursor_id: None,
        });
        Ok(tag)
    }

    pub fn remove_match(&mut self, tag: i32) {
        self.matches.retain(|m| m.tag != tag);
    }

    /// Associate a host cursor shape id with a registered pattern.
    pub fn set_match_cursor(&mut self, tag: i32, cursor_id: i32) {
        if let Some(entry) = self.matches.iter_mut().find(|m| m.tag == tag) {
            entry.cursor_id = Some(cursor_id);
        }
    }

    #[must_use]
    pub fn match_cursor(&self, tag: i32) -> Option<i32> {
        self.matches
            .iter()
            .find(|m| m.tag == tag)
            .and_then(|m| m.cursor_id)
    }

    /// Test whether the text under `(row, col)` matches any registered
    /// pattern; returns the owning tag and the matched text.
    #[must_use]
    pub fn match_check(&self, row: i64, col: i64) -> Option<(i32, String)> {
        let text = self.row_text(row);
        let col = usize::try_from(col).ok()?;
        // Byte offset of the addressed column in the extracted text.
        let offset = text
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)?;
        for pattern in &self.matches {
            for found in pattern.regex.find_iter(&text) {
                if found.start() <= offset && offset < found.end() {
                    return Some((pattern.tag, found.as_str().to_owned()));
                }
            }
        }
        None
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    pub(crate) fn emit(&mut self, event: TermEvent) {
        tracing::trace!(event = event.as_ref(), "queueing event");
        self.events.push_back(event);
    }

    /// Pop the oldest queued event.
    pub fn poll_event(&mut self) -> Option<TermEvent> { self.events.pop_front() }

    /// Drain every queued event.
    pub fn drain_events(&mut self) -> Vec<TermEvent> {
        self.events.drain(..).collect()
    }

    /// Mark the terminal unusable (e.g. after the embedder hit resource
    /// exhaustion growing the grid). Only `Eof` follows.
    pub fn mark_unusable(&mut self, reason: &str) {
        tracing::error!(reason, "terminal marked unusable");
        self.dead = true;
        self.timers.cancel();
        self.emit(TermEvent::Eof);
    }
}
