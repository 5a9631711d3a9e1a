//! Grammar configuration, loaded from TOML.
//!
//! ```toml
//! max_depth = 8
//! strict = true
//! ```
//!
//! Both keys are optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default bound on parenthesized nesting.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Parser limits and mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Deepest parenthesized nesting the parser accepts.
    pub max_depth: usize,
    /// Report parse errors instead of degrading to `Skip`.
    pub strict: bool,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl GrammarConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse_toml(&content, &path.display().to_string())
    }

    /// Parse from TOML text.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Self::parse_toml(s, "<inline>")
    }

    fn parse_toml(s: &str, path: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                message: "max_depth = 0".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = GrammarConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GrammarConfig::default());
        assert_eq!(cfg.max_depth, 16);
        assert!(!cfg.strict);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = GrammarConfig::from_toml_str("strict = true").unwrap();
        assert!(cfg.strict);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn zero_depth_is_invalid() {
        let err = GrammarConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = GrammarConfig::from_toml_str("max_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("grammar.toml");
        std::fs::write(&path, "max_depth = 4\nstrict = true\n").unwrap();

        let cfg = GrammarConfig::load(&path).unwrap();
        assert_eq!(cfg.max_depth, 4);
        assert!(cfg.strict);
    }

    #[test]
    fn missing_file_reports_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");
        match GrammarConfig::load(&path).unwrap_err() {
            ConfigError::Read { path: p, .. } => assert!(p.ends_with("absent.toml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
