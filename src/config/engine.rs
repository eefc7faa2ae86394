//! Workflow engine configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Behaviour of session creation and compliance repair
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Chain synthesized compliance nodes after the last existing node
    #[serde(default = "default_auto_wire")]
    pub auto_wire_repairs: bool,

    /// Characters of the seed input kept in the input node's description
    #[serde(default = "default_excerpt_chars")]
    pub seed_excerpt_chars: usize,

    /// Title given to sessions created without one
    #[serde(default = "default_title")]
    pub default_title: String,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.seed_excerpt_chars == 0 {
            return Err(ValidationError::InvalidExcerptLength);
        }
        if self.default_title.trim().is_empty() {
            return Err(ValidationError::EmptyDefaultTitle);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_wire_repairs: default_auto_wire(),
            seed_excerpt_chars: default_excerpt_chars(),
            default_title: default_title(),
        }
    }
}

fn default_auto_wire() -> bool {
    true
}

fn default_excerpt_chars() -> usize {
    100
}

fn default_title() -> String {
    "New Workflow".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert!(config.auto_wire_repairs);
        assert_eq!(config.seed_excerpt_chars, 100);
        assert_eq!(config.default_title, "New Workflow");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_excerpt() {
        let config = EngineConfig {
            seed_excerpt_chars: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidExcerptLength));
    }

    #[test]
    fn test_validation_blank_title() {
        let config = EngineConfig {
            default_title: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyDefaultTitle));
    }
}
