//! Text pieces tracked through the rule pipeline.
//!
//! A description is split into *open* pieces, which later rules may still
//! rewrite, and *settled* pieces, which are final. Every replacement a rule
//! produces is settled, so no rule ever sees text produced by an earlier one.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Opening of any `@Word[` directive.
static DIRECTIVE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+\[").expect("invalid directive opening regex"));

#[derive(Debug, PartialEq, Eq)]
struct Piece {
    text: String,
    settled: bool,
}

/// Ordered pieces of a description being rewritten.
#[derive(Debug, Default)]
pub(crate) struct Segments {
    pieces: Vec<Piece>,
}

impl Segments {
    /// Split `text` into pieces.
    ///
    /// A directive whose balanced bracket body contains another `@Word[`
    /// directive is settled verbatim up front, so neither it nor the inner
    /// directive is touched by any rule. Directives without a closing bracket
    /// stay open text.
    pub(crate) fn new(text: &str) -> Self {
        let mut pieces = Vec::new();
        let mut cursor = 0;
        let mut search_from = 0;

        while let Some(open) = DIRECTIVE_OPEN.find_at(text, search_from) {
            let bracket = open.end() - 1;
            match closing_bracket(text, bracket) {
                Some(close) if DIRECTIVE_OPEN.is_match(&text[bracket + 1..close]) => {
                    push_piece(&mut pieces, &text[cursor..open.start()], false);
                    push_piece(&mut pieces, &text[open.start()..=close], true);
                    cursor = close + 1;
                    search_from = cursor;
                }
                _ => search_from = open.end(),
            }
        }
        push_piece(&mut pieces, &text[cursor..], false);

        Self { pieces }
    }

    /// Run a single forward pass of `pattern` over every open piece.
    ///
    /// Each match is replaced by `replace(&captures)` and the replacement is
    /// settled. Returns the number of replaced matches.
    pub(crate) fn replace_all<F>(&mut self, pattern: &Regex, mut replace: F) -> usize
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        let mut replaced = 0;
        let mut pieces = Vec::with_capacity(self.pieces.len());

        for piece in std::mem::take(&mut self.pieces) {
            if piece.settled || !pattern.is_match(&piece.text) {
                pieces.push(piece);
                continue;
            }

            let mut last = 0;
            for caps in pattern.captures_iter(&piece.text) {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                push_piece(&mut pieces, &piece.text[last..whole.start()], false);
                push_piece(&mut pieces, replace(&caps), true);
                last = whole.end();
                replaced += 1;
            }
            push_piece(&mut pieces, &piece.text[last..], false);
        }

        self.pieces = pieces;
        replaced
    }

    /// Join all pieces back into one string.
    pub(crate) fn into_string(self) -> String {
        let len = self.pieces.iter().map(|p| p.text.len()).sum();
        self.pieces
            .into_iter()
            .fold(String::with_capacity(len), |mut out, piece| {
                out.push_str(&piece.text);
                out
            })
    }
}

fn push_piece(pieces: &mut Vec<Piece>, text: impl Into<String>, settled: bool) {
    let text = text.into();
    if !text.is_empty() {
        pieces.push(Piece { text, settled });
    }
}

/// Byte index of the `]` balancing the `[` at `open`, if there is one.
fn closing_bracket(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}
