use serde::{Deserialize, Serialize};

use crate::geometry::Size;

// ===== ERRORS =====

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse drag config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize drag config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DragConfig {
    pub ghost: GhostSection,
    pub logging: LoggingSection,
}

impl DragConfig {
    /// Parse and validate; keys absent from `source` keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DragConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ghost.validate()?;
        self.logging.validate()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GhostSection {
    pub min_width: f64,
    pub min_height: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub class_name: String,
    /// Ghost shows a deep copy of the dragged element instead of an empty box
    pub clone_content: bool,
}

impl GhostSection {
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("ghost.min_width", self.min_width), ("ghost.min_height", self.min_height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite non-negative number, got {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid {
                field: "ghost.opacity",
                reason: format!("expected a value between 0 and 1, got {}", self.opacity),
            });
        }
        if self.class_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "ghost.class_name",
                reason: "class name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GhostSection {
    fn default() -> Self {
        Self {
            min_width: 1.0,
            min_height: 1.0,
            opacity: 0.6,
            z_index: 1000,
            class_name: "ghost".to_string(),
            clone_content: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSection {
    /// Log pointer moves during a drag (throttled)
    pub trace_moves: bool,
    pub max_logs_per_window: usize,
    pub log_window: usize,
}

impl LoggingSection {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_window == 0 {
            return Err(ConfigError::Invalid {
                field: "logging.log_window",
                reason: "window must cover at least one call".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            trace_moves: false,
            max_logs_per_window: 5,
            log_window: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = DragConfig::from_toml_str("").unwrap();
        assert_eq!(config, DragConfig::default());
        assert_eq!(config.ghost.min_size(), Size::new(1.0, 1.0));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = DragConfig::from_toml_str(
            r#"
            [ghost]
            opacity = 0.35
            class_name = "card-ghost"

            [logging]
            trace_moves = true
            "#,
        )
        .unwrap();

        assert_eq!(config.ghost.opacity, 0.35);
        assert_eq!(config.ghost.class_name, "card-ghost");
        assert_eq!(config.ghost.z_index, 1000);
        assert!(config.logging.trace_moves);
        assert_eq!(config.logging.max_logs_per_window, 5);
    }

    #[test]
    fn rejects_out_of_range_opacity() {
        let error = DragConfig::from_toml_str("[ghost]\nopacity = 1.5\n").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "ghost.opacity", .. }));
    }

    #[test]
    fn rejects_negative_min_size() {
        let error = DragConfig::from_toml_str("[ghost]\nmin_height = -2.0\n").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "ghost.min_height", .. }));
    }

    #[test]
    fn rejects_blank_class_name_and_zero_window() {
        let error = DragConfig::from_toml_str("[ghost]\nclass_name = \"  \"\n").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "ghost.class_name", .. }));

        let error = DragConfig::from_toml_str("[logging]\nlog_window = 0\n").unwrap_err();
        assert!(matches!(error, ConfigError::Invalid { field: "logging.log_window", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let error = DragConfig::from_toml_str("[ghost\nopacity = ").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = DragConfig::default();
        config.ghost.clone_content = false;
        config.ghost.z_index = 7;

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[ghost]"));
        assert_eq!(DragConfig::from_toml_str(&text).unwrap(), config);
    }
}
