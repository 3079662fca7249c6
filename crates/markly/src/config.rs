//! Configuration loading.

use std::fs;
use std::path::Path;

use markly_parser::ParseOptions;
use markly_render::RenderOptions;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parse and render options loaded together.
///
/// ```json
/// {
///   "parse": { "smart": true, "extensions": { "table": true } },
///   "render": { "hard_breaks": true }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: ParseOptions,
    pub render: RenderOptions,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid config: {}", e)))
    }

    /// Enables the named extensions for both parsing and rendering.
    pub fn with_extension_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse = self.parse.with_extension_names(names)?;
        self.render.extensions = self.parse.extensions;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "parse": { "smart": true, "extensions": { "table": true } },
            "render": { "hard_breaks": true, "width": 80 }
        }"#;

        let config = Config::from_json(json).unwrap();

        assert!(config.parse.smart);
        assert!(config.parse.extensions.table);
        assert!(!config.parse.footnotes);
        assert!(config.render.hard_breaks);
        assert_eq!(config.render.width, 80);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = Config::from_json(r#"{ "parser": {} }"#);

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = Config::from_json("{ invalid }");

        match result {
            Err(Error::Config(message)) => assert!(message.starts_with("Invalid config")),
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/markly.json");

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_extension_names_apply_to_both_sides() {
        let config = Config::new()
            .with_extension_names(["table", "Strikethrough"])
            .unwrap();

        assert!(config.parse.extensions.table);
        assert!(config.render.extensions.strikethrough);
        assert!(!config.render.extensions.tagfilter);
    }

    #[test]
    fn test_unknown_extension_name() {
        let result = Config::new().with_extension_names(["wiki"]);

        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
