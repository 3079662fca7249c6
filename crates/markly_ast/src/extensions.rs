//! GFM syntax extensions.
//!
//! The same extension set is consulted by the parser (which constructs to
//! recognise) and by the HTML renderer (`tagfilter`).

use serde::{Deserialize, Serialize};

/// A single named extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Table,
    Autolink,
    Tagfilter,
    Strikethrough,
    Tasklist,
}

impl Extension {
    pub const ALL: [Extension; 5] = [
        Extension::Table,
        Extension::Autolink,
        Extension::Tagfilter,
        Extension::Strikethrough,
        Extension::Tasklist,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Extension::Table => "table",
            Extension::Autolink => "autolink",
            Extension::Tagfilter => "tagfilter",
            Extension::Strikethrough => "strikethrough",
            Extension::Tasklist => "tasklist",
        }
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Extension {
    type Err = String;

    /// Parses an extension name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extension::ALL
            .iter()
            .copied()
            .find(|ext| ext.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown extension: {s}"))
    }
}

/// Set of enabled extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub table: bool,
    pub autolink: bool,
    pub tagfilter: bool,
    pub strikethrough: bool,
    pub tasklist: bool,
}

impl Extensions {
    /// Every extension enabled, as on github.com.
    pub const fn gfm() -> Self {
        Self {
            table: true,
            autolink: true,
            tagfilter: true,
            strikethrough: true,
            tasklist: true,
        }
    }

    /// Builds a set from extension names.
    pub fn from_names<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for name in names {
            set.enable(name.as_ref().parse()?);
        }
        Ok(set)
    }

    pub fn enable(&mut self, extension: Extension) {
        *self.flag_mut(extension) = true;
    }

    pub fn contains(&self, extension: Extension) -> bool {
        match extension {
            Extension::Table => self.table,
            Extension::Autolink => self.autolink,
            Extension::Tagfilter => self.tagfilter,
            Extension::Strikethrough => self.strikethrough,
            Extension::Tasklist => self.tasklist,
        }
    }

    fn flag_mut(&mut self, extension: Extension) -> &mut bool {
        match extension {
            Extension::Table => &mut self.table,
            Extension::Autolink => &mut self.autolink,
            Extension::Tagfilter => &mut self.tagfilter,
            Extension::Strikethrough => &mut self.strikethrough,
            Extension::Tasklist => &mut self.tasklist,
        }
    }
}
