//! Translation settings.
//!
//! Loaded from TOML, per project from `.msc/config.toml`:
//! ```toml
//! indent_width = 4
//! placeholder = "~"
//! strict_brackets = true
//! preserve_comments = false
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Settings for one [`Transpiler`](crate::Transpiler).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranspileConfig {
    /// Spaces per emitted block level.
    pub indent_width: usize,
    /// Argument token meaning "no value provided, use the default".
    pub placeholder: String,
    /// Fail on unbalanced brackets or quotes instead of passing text through.
    pub strict_brackets: bool,
    /// Re-attach stripped `#` comments to the emitted lines.
    pub preserve_comments: bool,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            placeholder: "~".to_string(),
            strict_brackets: true,
            preserve_comments: false,
        }
    }
}

impl TranspileConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring config");
                Self::default()
            }
        }
    }

    /// Load `.msc/config.toml` under a project root.
    pub fn load_project(root: &Path) -> Self {
        Self::load(&root.join(".msc").join("config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.indent_width == 0 {
            return Err(ConfigError::Invalid("indent_width must be at least 1".into()));
        }
        let placeholder = self.placeholder.trim();
        if placeholder.is_empty() || placeholder.contains([',', '(', ')']) {
            return Err(ConfigError::Invalid(format!(
                "placeholder `{}` cannot be used as an argument",
                self.placeholder
            )));
        }
        Ok(())
    }

    pub(crate) fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
