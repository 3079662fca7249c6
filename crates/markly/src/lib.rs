//! # markly
//!
//! Markdown documents you can parse, edit and render.
//!
//! This crate ties together:
//! - [`markly_ast`] - the node arena, tree mutation and walkers
//! - [`markly_parser`] - Markdown source to tree
//! - [`markly_render`] - HTML, CommonMark and plaintext output, and heading
//!   anchors
//!
//! ## Example
//!
//! ```rust
//! use markly::{Document, ParseOptions, RenderOptions};
//!
//! let mut doc = Document::parse("# Hello\n\nWorld\n", &ParseOptions::default())?;
//! let header = doc.find_header("Hello").unwrap();
//! let fragment = doc.parse_fragment("Goodbye")?;
//! doc.arena_mut().append_before(header, fragment);
//!
//! assert_eq!(
//!     doc.to_html(&RenderOptions::default()),
//!     "<p>Goodbye</p>\n<h1>Hello</h1>\n<p>World</p>\n"
//! );
//! # Ok::<(), markly::Error>(())
//! ```

mod config;
mod document;
mod error;

pub use config::Config;
pub use document::Document;
pub use error::{Error, Result};

pub use markly_ast::{
    Alignment, Arena, AttributeError, Extension, Extensions, ListDelimiter, ListType, Node,
    NodeData, NodeId, NodeType, SourcePosition, WalkEvent,
};
pub use markly_parser::{ParseError, ParseOptions};
pub use markly_render::{
    CommonMarkRenderer, Heading, Headings, HtmlRenderer, PlaintextRenderer, Render, RenderOptions,
};

/// Parses `text` into a [`Document`].
pub fn parse(text: &str, options: &ParseOptions) -> Result<Document> {
    Document::parse(text, options)
}

/// Parses `text` and renders it straight to HTML.
///
/// ```rust
/// use markly::{ParseOptions, RenderOptions};
///
/// let html = markly::render_html("Hi *there*", &ParseOptions::default(), &RenderOptions::default())?;
/// assert_eq!(html, "<p>Hi <em>there</em></p>\n");
/// # Ok::<(), markly::Error>(())
/// ```
pub fn render_html(
    text: &str,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> Result<String> {
    Ok(parse(text, parse_options)?.to_html(render_options))
}

/// [`render_html`] with options loaded from a [`Config`].
pub fn render_html_with_config(text: &str, config: &Config) -> Result<String> {
    render_html(text, &config.parse, &config.render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_html_with_config() {
        let config = Config::from_json(r#"{ "render": { "hard_breaks": true } }"#).unwrap();

        assert_eq!(
            render_html_with_config("foo\nbaz", &config).unwrap(),
            "<p>foo<br />\nbaz</p>\n"
        );
    }

    #[test]
    fn test_strikethrough_by_name() {
        let config = Config::new()
            .with_extension_names(["strikethrough"])
            .unwrap();

        assert_eq!(
            render_html_with_config("~~old~~ new", &config).unwrap(),
            "<p><del>old</del> new</p>\n"
        );
    }
}
