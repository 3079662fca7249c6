//! Smart punctuation.
//!
//! Straight quotes are paired into curly quotes using the same flanking rules
//! as emphasis delimiters, runs of hyphens become en and em dashes and three
//! periods become an ellipsis. Code spans and raw HTML are left alone.

use markly_ast::{Arena, NodeId, NodeType};

const LEFT_SINGLE: char = '\u{2018}';
const RIGHT_SINGLE: char = '\u{2019}';
const LEFT_DOUBLE: char = '\u{201C}';
const RIGHT_DOUBLE: char = '\u{201D}';
const EN_DASH: &str = "\u{2013}";
const EM_DASH: &str = "\u{2014}";
const ELLIPSIS: char = '\u{2026}';

/// Applies smart punctuation to every text node under `doc`.
pub(crate) fn apply(arena: &mut Arena, doc: NodeId) {
    let blocks: Vec<NodeId> = arena
        .walk(doc)
        .filter(|&node| {
            matches!(
                arena.node_type(node),
                NodeType::Paragraph | NodeType::Header | NodeType::TableCell
            )
        })
        .collect();

    for block in blocks {
        apply_to_block(arena, block);
    }
}

/// A character of the block's inline content. `owner` is the index of the
/// text node it belongs to; characters standing in for other inline nodes
/// have none.
#[derive(Debug, Clone, Copy)]
struct Slot {
    owner: Option<usize>,
    ch: char,
}

fn apply_to_block(arena: &mut Arena, block: NodeId) {
    let mut texts = Vec::new();
    let mut stream = Vec::new();

    for node in arena.descendants(block) {
        match arena.node_type(node) {
            NodeType::Text => {
                let owner = Some(texts.len());
                texts.push(node);
                stream.extend(
                    arena
                        .literal(node)
                        .unwrap_or_default()
                        .chars()
                        .map(|ch| Slot { owner, ch }),
                );
            }
            NodeType::SoftBreak | NodeType::LineBreak => stream.push(Slot { owner: None, ch: '\n' }),
            NodeType::Code => {
                stream.push(Slot { owner: None, ch: '`' });
                stream.push(Slot { owner: None, ch: '`' });
            }
            NodeType::HtmlInline => {
                stream.push(Slot { owner: None, ch: '<' });
                stream.push(Slot { owner: None, ch: '>' });
            }
            _ => {}
        }
    }

    if texts.is_empty() {
        return;
    }

    let quotes = pair_quotes(&stream);

    let mut rewritten = vec![String::new(); texts.len()];
    for (slot, quote) in stream.iter().zip(&quotes) {
        if let Some(owner) = slot.owner {
            rewritten[owner].push(quote.unwrap_or(slot.ch));
        }
    }

    for (node, text) in texts.into_iter().zip(rewritten) {
        let text = replace_dashes_and_ellipses(&text);
        if arena.literal(node) != Some(text.as_str()) {
            // Text nodes always accept a literal.
            let _ = arena.set_literal(node, text);
        }
    }
}

/// Resolves every straight quote in `stream` to its curly form.
fn pair_quotes(stream: &[Slot]) -> Vec<Option<char>> {
    let mut result = vec![None; stream.len()];
    let mut openers: Vec<Option<(usize, char)>> = Vec::new();
    // Openers below these stack heights can no longer be matched.
    let mut bottom_single = 0;
    let mut bottom_double = 0;

    for (index, slot) in stream.iter().enumerate() {
        let ch = slot.ch;
        if slot.owner.is_none() || !matches!(ch, '\'' | '"') {
            continue;
        }

        let before = index
            .checked_sub(1)
            .map_or('\n', |prev| stream[prev].ch);
        let after = stream.get(index + 1).map_or('\n', |next| next.ch);
        let (left_flanking, right_flanking) = flanking(before, after);
        let can_open = left_flanking && !right_flanking && before != ']' && before != ')';
        let can_close = right_flanking;

        result[index] = Some(match (ch, can_close) {
            ('\'', _) => RIGHT_SINGLE,
            (_, true) => RIGHT_DOUBLE,
            (_, false) => LEFT_DOUBLE,
        });

        let bottom = if ch == '\'' {
            &mut bottom_single
        } else {
            &mut bottom_double
        };

        if can_close {
            let found = (*bottom..openers.len())
                .rev()
                .find(|&k| openers[k].is_some_and(|(_, c)| c == ch));
            match found {
                Some(k) => {
                    if let Some((opener, _)) = openers[k].take() {
                        result[opener] = Some(if ch == '\'' { LEFT_SINGLE } else { LEFT_DOUBLE });
                    }
                    result[index] = Some(if ch == '\'' { RIGHT_SINGLE } else { RIGHT_DOUBLE });
                }
                None => *bottom = openers.len(),
            }
        } else if can_open {
            openers.push(Some((index, ch)));
        }
    }

    result
}

/// Returns whether a delimiter between `before` and `after` is left- and
/// right-flanking.
fn flanking(before: char, after: char) -> (bool, bool) {
    let left = !after.is_whitespace()
        && (!is_punctuation(after) || before.is_whitespace() || is_punctuation(before));
    let right = !before.is_whitespace()
        && (!is_punctuation(before) || after.is_whitespace() || is_punctuation(after));
    (left, right)
}

fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(ch,
            '\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{FF01}'..='\u{FF0F}')
}

/// Replaces hyphen runs with dashes and `...` with an ellipsis.
fn replace_dashes_and_ellipses(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '-' => {
                let run = chars[i..].iter().take_while(|&&c| c == '-').count();
                if run == 1 {
                    out.push('-');
                } else {
                    let (em, en) = dash_counts(run);
                    for _ in 0..em {
                        out.push_str(EM_DASH);
                    }
                    for _ in 0..en {
                        out.push_str(EN_DASH);
                    }
                }
                i += run;
            }
            '.' if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') => {
                out.push(ELLIPSIS);
                i += 3;
            }
            ch => {
                out.push(ch);
                i += 1;
            }
        }
    }
    out
}

/// Splits a run of hyphens into em and en dashes, preferring em dashes and
/// never leaving a hyphen over.
fn dash_counts(run: usize) -> (usize, usize) {
    if run % 3 == 0 {
        (run / 3, 0)
    } else if run % 2 == 0 {
        (0, run / 2)
    } else if run % 3 == 2 {
        ((run - 2) / 3, 1)
    } else {
        ((run - 4) / 3, 2)
    }
}
