//! Parse options.

use markly_ast::{Extension, Extensions};
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Options controlling how source text is turned into a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Convert straight quotes to curly quotes, `--` and `---` to dashes and
    /// `...` to an ellipsis.
    pub smart: bool,
    /// Recognise footnote references and definitions.
    pub footnotes: bool,
    /// Only treat `~~text~~` as strikethrough, not `~text~`.
    pub strikethrough_double_tilde: bool,
    /// Enabled syntax extensions.
    pub extensions: Extensions,
}

impl ParseOptions {
    /// Options with every GFM extension and footnotes enabled.
    pub fn gfm() -> Self {
        Self {
            footnotes: true,
            extensions: Extensions::gfm(),
            ..Self::default()
        }
    }

    /// Enables the extensions named in `names`, ignoring ASCII case.
    pub fn with_extension_names<I, S>(mut self, names: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let extension: Extension = name.as_ref().parse().map_err(ParseError::unsupported)?;
            self.extensions.enable(extension);
        }
        Ok(self)
    }

    /// Builds the `markdown` crate options matching these settings.
    pub(crate) fn to_mdast_options(self) -> markdown::ParseOptions {
        let ext = self.extensions;
        markdown::ParseOptions {
            constructs: markdown::Constructs {
                gfm_table: ext.table,
                gfm_autolink_literal: ext.autolink,
                gfm_strikethrough: ext.strikethrough,
                gfm_task_list_item: ext.tasklist,
                gfm_footnote_definition: self.footnotes,
                gfm_label_start_footnote: self.footnotes,
                ..markdown::Constructs::default()
            },
            gfm_strikethrough_single_tilde: !self.strikethrough_double_tilde,
            ..markdown::ParseOptions::default()
        }
    }
}
