// Copyright (c) 2026 the vt_core authors. Licensed under Apache License, Version 2.0.

//! Escape-sequence matching trie.
//!
//! Patterns are termcap-style byte strings (`\x1b[%i%d;%dH`) whose
//! placeholders are compiled into two generic trie edges: `STRING` (an
//! arbitrary run ended by the next literal) and `NUMBER` (`[0-9;]+`).
//! Matching walks decoded code points; a complete walk yields the result
//! name and bound parameters, a walk that runs out of input on a live node
//! reports "need more", and anything else is ordinary text.

use super::param::{self, Arg, Params};

use crate::charset::CodePoint;

/// Literal children cover ASCII plus the C1 range.
const MAX_LITERAL: usize = 160;
const SLOT_STRING: usize = MAX_LITERAL;
const SLOT_NUMBER: usize = MAX_LITERAL + 1;
const SLOTS: usize = MAX_LITERAL + 2;

fn map_literal(c: CodePoint) -> usize {
    let c = c as usize;
    if c < MAX_LITERAL { c } else { 0 }
}

fn is_numeric(c: CodePoint) -> bool {
    (u32::from('0')..=u32::from('9')).contains(&c) || c == u32::from(';')
}

/// Outcome of matching a code-point prefix against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMatch {
    /// The prefix cannot be a recognised sequence; treat the first code
    /// point as text.
    NoMatch,
    /// The whole input is a valid prefix of at least one sequence; wait for
    /// more bytes.
    Incomplete,
    Match {
        name: String,
        consumed: usize,
        params: Params,
    },
}

#[derive(Debug)]
struct Node {
    result: Option<Box<str>>,
    /// The pattern that produced `result`, replayed for extraction.
    original: Vec<u8>,
    children: Vec<Option<Box<Node>>>,
}

impl Node {
    fn new() -> Self {
        Self {
            result: None,
            original: Vec::new(),
            children: Vec::new(),
        }
    }

    fn child(&self, slot: usize) -> Option<&Node> {
        self.children.get(slot).and_then(|c| c.as_deref())
    }

    fn child_mut(&mut self, slot: usize) -> &mut Node {
        if self.children.is_empty() {
            self.children.resize_with(SLOTS, || None);
        }
        self.children[slot].get_or_insert_with(|| Box::new(Node::new()))
    }
}

/// The matching trie.
#[derive(Debug)]
pub struct MatchTable {
    root: Node,
}

impl Default for MatchTable {
    fn default() -> Self { Self::new() }
}

impl MatchTable {
    #[must_use]
    pub fn new() -> Self { Self { root: Node::new() } }

    /// Register `pattern` to produce `result`. Numeric placeholders are
    /// canonicalised to `%m` first, and adjacent `%m;%m` pairs collapse,
    /// so a single numeric edge accepts a whole `;`-separated run.
    pub fn add(&mut self, pattern: &[u8], result: &str) {
        let mut canonical = pattern.to_vec();
        for variant in [b"%d".as_slice(), b"%2", b"%3"] {
            replace_all(&mut canonical, variant, b"%m");
        }
        while replace_once(&mut canonical, b"%m;%m", b"%m") {}
        add_inner(&mut self.root, &canonical, 0, result);
    }

    /// Match a prefix of `input` against the registered patterns.
    #[must_use]
    pub fn match_input(&self, input: &[CodePoint]) -> TableMatch {
        if input.is_empty() {
            return TableMatch::NoMatch;
        }

        // Fast reject for the usual "not a sequence" case.
        let root = &self.root;
        if root.child(map_literal(input[0])).is_none()
            && root.child(SLOT_STRING).is_none()
            && (!is_numeric(input[0]) || root.child(SLOT_NUMBER).is_none())
        {
            return TableMatch::NoMatch;
        }

        // Prefer the deepest pure-literal walk.
        let mut head = Some(root);
        let mut i = 0;
        while i < input.len() {
            match head {
                Some(node) => head = node.child(map_literal(input[i])),
                None => break,
            }
            i += 1;
        }
        if let Some(node) = head {
            if let Some(result) = &node.result {
                return TableMatch::Match {
                    name: result.to_string(),
                    consumed: i,
                    params: Params::new(),
                };
            }
        }

        // Fall back to the generic walk, collecting argument spans.
        let mut args: Vec<Arg<'_>> = Vec::new();
        match match_inner(root, input, 0, &mut args) {
            Walk::Result { node, consumed } => {
                let name = node.result.as_deref().unwrap_or_default().to_string();
                let params = param::extract(&node.original, &args);
                TableMatch::Match {
                    name,
                    consumed,
                    params,
                }
            }
            Walk::NeedMore => TableMatch::Incomplete,
            Walk::Dead => TableMatch::NoMatch,
        }
    }
}

enum Walk<'t> {
    Result { node: &'t Node, consumed: usize },
    NeedMore,
    Dead,
}

fn match_inner<'t, 'i>(
    node: &'t Node,
    input: &'i [CodePoint],
    offset: usize,
    args: &mut Vec<Arg<'i>>,
) -> Walk<'t> {
    if node.result.is_some() {
        return Walk::Result {
            node,
            consumed: offset,
        };
    }
    if offset == input.len() {
        // Out of data on a live node: the caller must wait for more.
        return Walk::NeedMore;
    }

    // A string disposition swallows everything up to the subtable's next
    // literal (its terminator).
    if let Some(sub) = node.child(SLOT_STRING) {
        let rest = &input[offset..];
        let taken = rest
            .iter()
            .position(|&c| sub.child(map_literal(c)).is_some())
            .unwrap_or(rest.len());
        args.push(Arg::String(&rest[..taken]));
        return match_inner(sub, input, offset + taken, args);
    }

    if is_numeric(input[offset]) {
        if let Some(sub) = node.child(SLOT_NUMBER) {
            let rest = &input[offset..];
            let taken = rest.iter().position(|&c| !is_numeric(c)).unwrap_or(rest.len());
            args.push(Arg::Number(&rest[..taken]));
            return match_inner(sub, input, offset + taken, args);
        }
    }

    if let Some(sub) = node.child(map_literal(input[offset])) {
        args.push(Arg::Char(input[offset]));
        return match_inner(sub, input, offset + 1, args);
    }

    Walk::Dead
}

fn add_inner(node: &mut Node, original: &[u8], pos: usize, result: &str) {
    let pattern = &original[pos..];

    if pattern.is_empty() {
        if let Some(existing) = &node.result {
            if existing.as_ref() != result {
                tracing::debug!(
                    old = existing.as_ref(),
                    new = result,
                    "indistinguishable sequence patterns, overwriting"
                );
            }
        }
        node.result = Some(result.into());
        node.original = original.to_vec();
        return;
    }

    if pattern[0] == b'%' && pattern.len() >= 2 {
        match pattern[1] {
            b'i' => {
                add_inner(node, original, pos + 2, result);
                return;
            }
            b'd' | b'2' | b'm' => {
                add_inner(node.child_mut(SLOT_NUMBER), original, pos + 2, result);
                return;
            }
            b's' => {
                debug_assert!(pattern.len() >= 3, "%s placeholder needs a terminator");
                add_inner(node.child_mut(SLOT_STRING), original, pos + 2, result);
                return;
            }
            b'%' => {
                add_inner(node.child_mut(usize::from(b'%')), original, pos + 2, result);
                return;
            }
            b'+' if pattern.len() >= 3 => {
                // Every literal at or above the addend matches, as does the
                // catch-all slot for code points past the literal range.
                for i in usize::from(pattern[2])..MAX_LITERAL {
                    add_inner(node.child_mut(i), original, pos + 3, result);
                }
                add_inner(node.child_mut(0), original, pos + 3, result);
                return;
            }
            _ => {}
        }
    }

    debug_assert!(
        usize::from(pattern[0]) < MAX_LITERAL,
        "literal byte out of table range"
    );
    add_inner(
        node.child_mut(usize::from(pattern[0]).min(MAX_LITERAL - 1)),
        original,
        pos + 1,
        result,
    );
}

fn replace_all(buf: &mut Vec<u8>, needle: &[u8], replacement: &[u8]) {
    while replace_once(buf, needle, replacement) {}
}

fn replace_once(buf: &mut Vec<u8>, needle: &[u8], replacement: &[u8]) -> bool {
    let Some(at) = buf.windows(needle.len()).position(|w| w == needle) else {
        return false;
    };
    buf.splice(at..at + needle.len(), replacement.iter().copied());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::param::Param;
    use pretty_assertions::assert_eq;

    fn cps(s: &str) -> Vec<CodePoint> { s.chars().map(u32::from).collect() }

    fn table() -> MatchTable {
        let mut t = MatchTable::new();
        t.add(b"\x1b[%mh", "move-cursor");
        t.add(b"\x1b[%d;%d;%dm", "set-graphic-rendition");
        t.add(b"\x1b]3;%s\x07", "set-icon-title");
        t.add(b"ABCD", "abcd");
        t.add(b"ABCDEFG", "abcdefg");
        t
    }

    #[test]
    fn literal_match() {
        let t = table();
        let m = t.match_input(&cps("ABCD"));
        assert_eq!(
            m,
            TableMatch::Match {
                name: "abcd".into(),
                consumed: 4,
                params: Params::new()
            }
        );
    }

    #[test]
    fn shorter_result_wins_over_longer_prefix() {
        let t = table();
        // "ABCDE" heads toward ABCDEFG, but the generic walk stops at the
        // ABCD result and leaves the "E" for the next round.
        let m = t.match_input(&cps("ABCDE"));
        let TableMatch::Match { name, consumed, .. } = m else {
            panic!("expected a match");
        };
        assert_eq!(name, "abcd");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn shorter_prefix_is_incomplete() {
        let t = table();
        assert_eq!(t.match_input(&cps("AB")), TableMatch::Incomplete);
        assert_eq!(t.match_input(&cps("\x1b[3;3")), TableMatch::Incomplete);
    }

    #[test]
    fn numeric_params_bind() {
        let t = table();
        let m = t.match_input(&cps("\x1b[3;4h"));
        let TableMatch::Match {
            name,
            consumed,
            params,
        } = m
        else {
            panic!("expected a match");
        };
        assert_eq!(name, "move-cursor");
        assert_eq!(consumed, 6);
        assert_eq!(params.as_slice(), &[Param::Number(3), Param::Number(4)]);
    }

    #[test]
    fn collapsed_semicolon_runs_bind_every_number() {
        let t = table();
        // %d;%d;%d collapses to one %m edge taking the whole run.
        let m = t.match_input(&cps("\x1b[38;5;17m"));
        let TableMatch::Match { name, params, .. } = m else {
            panic!("expected a match");
        };
        assert_eq!(name, "set-graphic-rendition");
        assert_eq!(
            params.as_slice(),
            &[Param::Number(38), Param::Number(5), Param::Number(17)]
        );
    }

    #[test]
    fn string_param_terminated_by_literal() {
        let t = table();
        let m = t.match_input(&cps("\x1b]3;my title\x07rest"));
        let TableMatch::Match {
            name,
            consumed,
            params,
        } = m
        else {
            panic!("expected a match");
        };
        assert_eq!(name, "set-icon-title");
        assert_eq!(consumed, "\x1b]3;my title\x07".chars().count());
        assert_eq!(params[0], Param::String(cps("my title")));
    }

    #[test]
    fn unterminated_string_needs_more() {
        let t = table();
        assert_eq!(t.match_input(&cps("\x1b]3;my tit")), TableMatch::Incomplete);
    }

    #[test]
    fn garbage_rejects_quickly() {
        let t = table();
        assert_eq!(t.match_input(&cps("hello")), TableMatch::NoMatch);
        assert_eq!(t.match_input(&cps("zzz")), TableMatch::NoMatch);
    }

    #[test]
    fn parameter_char_with_increment() {
        let mut t = MatchTable::new();
        // Mouse report: ESC [ M button x y, coordinates offset by 32 with
        // a one-based correction from %i.
        t.add(b"\x1b[M%+ %i%+ %+ ", "mouse-report");
        let input = [
            0x1b,
            u32::from('['),
            u32::from('M'),
            u32::from(' '),
            u32::from('('),
            u32::from('*'),
        ];
        let TableMatch::Match { name, params, .. } = t.match_input(&input) else {
            panic!("expected a match");
        };
        assert_eq!(name, "mouse-report");
        // button: ' ' - ' ' + 0 = 0; x: '(' - ' ' + 1 = 9; y: '*' - ' ' + 1 = 11.
        assert_eq!(
            params.as_slice(),
            &[Param::Number(0), Param::Number(9), Param::Number(11)]
        );
    }
}
