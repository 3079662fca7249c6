//! Render options.

use markly_ast::Extensions;
use serde::{Deserialize, Serialize};

/// Options shared by every renderer.
///
/// Options a renderer has no use for are ignored; `ids` only affects HTML
/// and `width` only the Markdown and plaintext renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Add `data-sourcepos` attributes to block elements.
    pub source_pos: bool,
    /// Render soft line breaks as hard line breaks.
    pub hard_breaks: bool,
    /// Render soft line breaks as spaces.
    pub no_breaks: bool,
    /// Omit raw HTML and blank out dangerous link targets.
    pub safe: bool,
    /// Put the code block language on `<pre lang>` instead of a class.
    pub github_pre_lang: bool,
    /// Keep the rest of the info string in a `data-meta` attribute.
    pub full_info_string: bool,
    /// Align table cells with `style` rather than `align`.
    pub table_prefer_style_attributes: bool,
    /// Wrap Markdown and plaintext output at this column. 0 disables
    /// wrapping.
    pub width: usize,
    /// Wrap each heading and its content in a `<section>` with an anchor id.
    pub ids: bool,
    pub extensions: Extensions,
}

impl RenderOptions {
    /// Wrapping applies only when soft breaks keep their meaning.
    pub(crate) fn allow_wrap(&self) -> bool {
        self.width > 0 && !self.no_breaks && !self.hard_breaks
    }
}
