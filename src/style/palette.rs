//! Styles for each semantic role the renderer emits.

use std::path::Path;

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;

use super::StyleSpec;

/// A resolved palette: one [`StyleSpec`] per role.
///
/// Deserializes from a JSON object mapping role names to `fg:bg:attrs`
/// strings. Roles that are missing keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Styles {
    pub user_mention: StyleSpec,
    pub channel_mention: StyleSpec,
    pub special_mention: StyleSpec,
    pub link: StyleSpec,
    pub inline_code: StyleSpec,
    pub code_fence: StyleSpec,
    pub quote_mark: StyleSpec,
    pub quote_text: StyleSpec,
    pub bold: StyleSpec,
    pub italic: StyleSpec,
    pub strikethrough: StyleSpec,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            user_mention: StyleSpec::new().fg(Color::Yellow).bold(),
            channel_mention: StyleSpec::new().fg(Color::LightBlue).bold(),
            special_mention: StyleSpec::new().fg(Color::LightRed).bold(),
            link: StyleSpec::new().fg(Color::Cyan).underline(),
            inline_code: StyleSpec::new().fg(Color::Indexed(209)),
            code_fence: StyleSpec::new().fg(Color::DarkGray),
            quote_mark: StyleSpec::new().fg(Color::DarkGray),
            quote_text: StyleSpec::new().italic(),
            bold: StyleSpec::new().bold(),
            italic: StyleSpec::new().italic(),
            strikethrough: StyleSpec::new().strikethrough(),
        }
    }
}

impl Styles {
    /// Parse a palette from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid style palette")
    }

    /// Load a palette file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read styles {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_emphasis_roles_are_attribute_only() {
        let styles = Styles::default();
        assert_eq!(styles.bold.open_tag(), "[::b]");
        assert_eq!(styles.italic.open_tag(), "[::i]");
        assert_eq!(styles.strikethrough.open_tag(), "[::s]");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let styles = Styles::from_json(r#"{ "user_mention": "green::u" }"#).unwrap();
        assert_eq!(
            styles.user_mention,
            StyleSpec::new().fg(Color::Green).underline()
        );
        assert_eq!(styles.link, Styles::default().link);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Styles::from_json(r#"{ "heading": "red" }"#).is_err());
    }

    #[test]
    fn test_bad_spec_is_rejected() {
        let err = Styles::from_json(r#"{ "link": "red::q" }"#).unwrap_err();
        assert!(format!("{err:#}").contains("unknown attribute"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, r#"{ "bold": "white::b" }"#).unwrap();

        let styles = Styles::load(&path).unwrap();
        assert_eq!(styles.bold, StyleSpec::new().fg(Color::White).bold());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Styles::load(Path::new("/nonexistent/styles.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/styles.json"));
    }
}
