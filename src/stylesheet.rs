//! Stylesheet system for connector stroke colors
//!
//! Connectors name their stroke color symbolically (`stroke-1`, `accent`)
//! and the stylesheet resolves the token to a concrete value at render
//! time. A raw CSS color passes through unchanged, so scenes can mix
//! tokens and literals.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("failed to read stylesheet file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse stylesheet TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic color tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Color mappings: token name -> CSS color
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette: neutral stroke grays with a blue accent
const DEFAULT_PALETTE: &str = r##"
[colors]
# Connector stroke colors
stroke-1 = "#333333"
stroke-2 = "#666666"
stroke-3 = "#999999"

# Accent stroke (highlighted connectors)
accent = "#2196f3"
accent-dark = "#1565c0"

# Shape outlines drawn by the SVG backend
shape-outline = "#666666"

# Endpoint handle fill
handle = "#2196f3"
"##;

impl Stylesheet {
    /// Load stylesheet from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load stylesheet from TOML text
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value.
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a stroke color for drawing: a defined token resolves to
    /// its value, anything else (raw hex, CSS color names) passes through
    /// unchanged.
    pub fn resolve_stroke(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }
        let default = Self::default();
        if let Some(color) = default.resolve(token) {
            return color.to_string();
        }
        token.to_string()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_toml(DEFAULT_PALETTE).expect("default palette should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet() {
        let stylesheet = Stylesheet::default();
        assert!(stylesheet.colors.contains_key("stroke-1"));
        assert!(stylesheet.colors.contains_key("accent"));
        assert!(stylesheet.colors.contains_key("handle"));
    }

    #[test]
    fn test_resolve_existing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("stroke-1"), Some("#333333"));
        assert_eq!(stylesheet.resolve("accent"), Some("#2196f3"));
    }

    #[test]
    fn test_resolve_missing_token() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("nonexistent"), None);
    }

    #[test]
    fn test_resolve_stroke_passes_through_raw_colors() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve_stroke("#ff0000"), "#ff0000");
        assert_eq!(stylesheet.resolve_stroke("crimson"), "crimson");
    }

    #[test]
    fn test_custom_sheet_falls_back_to_default_tokens() {
        let custom = Stylesheet::from_toml(
            r##"
[colors]
stroke-1 = "#000000"
"##,
        )
        .expect("should parse");
        assert_eq!(custom.resolve_stroke("stroke-1"), "#000000");
        // token missing from the custom sheet resolves from the default
        assert_eq!(custom.resolve_stroke("accent"), "#2196f3");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Dark"

[colors]
stroke-1 = "#eeeeee"
"##;
        let stylesheet = Stylesheet::from_toml(toml_str).expect("should parse");
        assert_eq!(stylesheet.name, Some("Dark".to_string()));
        assert_eq!(stylesheet.resolve("stroke-1"), Some("#eeeeee"));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        assert!(Stylesheet::from_toml(invalid).is_err());
    }
}
