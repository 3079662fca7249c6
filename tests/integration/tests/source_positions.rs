//! Source positions reported for parsed blocks.

use markly::{Document, NodeId, ParseOptions};
use rstest::rstest;

fn document(text: &str) -> Document {
    markly::parse(text, &ParseOptions::default()).expect("Failed to parse")
}

fn lines(doc: &Document, node: NodeId) -> (u32, u32) {
    let position = doc.arena().position(node);
    (position.start.line, position.end.line)
}

fn nth_block(doc: &Document, index: usize) -> NodeId {
    doc.arena()
        .children(doc.root())
        .nth(index)
        .expect("block not found")
}

#[rstest]
#[case::html_comment("<!-- comment -->\n", (1, 1))]
#[case::fenced_code("```\ncode\n```\n", (1, 3))]
#[case::empty_fenced_code("```\n```\n", (1, 2))]
#[case::setext_heading("Title\n=====\n", (1, 2))]
#[case::atx_heading("# Title\n", (1, 1))]
fn test_single_block_lines(#[case] source: &str, #[case] expected: (u32, u32)) {
    let doc = document(source);

    assert_eq!(lines(&doc, nth_block(&doc, 0)), expected);
}

#[test]
fn test_comment_among_blocks() {
    let doc = document("# One\n## Two\n<!-- three -->\n## Four\n# Five\n");

    assert_eq!(doc.arena().children(doc.root()).count(), 5);
    assert_eq!(lines(&doc, nth_block(&doc, 2)), (3, 3));
}

#[test]
fn test_every_node_ends_after_it_starts() {
    let doc = document(
        "# Title\n\nSome *emphasis* and `code`.\n\n- one\n- two\n\n> quote\n\n```rust\nfn main() {}\n```\n",
    );

    for node in doc.arena().descendants(doc.root()) {
        let position = doc.arena().position(node);
        assert!(
            (position.end.line, position.end.column) >= (position.start.line, position.start.column),
            "{} at {position}",
            doc.arena().node_type(node)
        );
    }
}

#[test]
fn test_heading_columns() {
    let doc = document("# Title\n");

    assert_eq!(doc.arena().position(nth_block(&doc, 0)).to_string(), "1:1-1:7");
}
