//! Regulatory domain of a workflow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Regulatory/business context selecting a compliance catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DomainType {
    Healthcare,
    Finance,
    Education,
    Government,
    Enterprise,
    Productivity,
    #[default]
    Generic,
}

impl DomainType {
    /// All domains in classification tie-break priority order.
    pub const PRIORITY: [DomainType; 7] = [
        DomainType::Healthcare,
        DomainType::Finance,
        DomainType::Government,
        DomainType::Education,
        DomainType::Enterprise,
        DomainType::Productivity,
        DomainType::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Healthcare => "healthcare",
            DomainType::Finance => "finance",
            DomainType::Education => "education",
            DomainType::Government => "government",
            DomainType::Enterprise => "enterprise",
            DomainType::Productivity => "productivity",
            DomainType::Generic => "generic",
        }
    }

    /// Parses a label, failing closed to `Generic` for anything unknown.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(label, "Unknown domain label, using generic catalog");
            DomainType::Generic
        })
    }

    /// Position in the tie-break order (lower wins).
    pub fn priority(&self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|d| d == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DomainType::PRIORITY
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| ValidationError::invalid_format("domain", format!("unknown domain '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_labels_case_insensitively() {
        assert_eq!("Healthcare".parse::<DomainType>().unwrap(), DomainType::Healthcare);
        assert_eq!(" finance ".parse::<DomainType>().unwrap(), DomainType::Finance);
    }

    #[test]
    fn from_label_fails_closed_to_generic() {
        assert_eq!(DomainType::from_label("aerospace"), DomainType::Generic);
        assert_eq!(DomainType::from_label("education"), DomainType::Education);
    }

    #[test]
    fn priority_order_puts_healthcare_first_and_generic_last() {
        assert!(DomainType::Healthcare.priority() < DomainType::Finance.priority());
        assert!(DomainType::Finance.priority() < DomainType::Government.priority());
        assert!(DomainType::Government.priority() < DomainType::Education.priority());
        assert_eq!(DomainType::Generic.priority(), 6);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DomainType::Government).unwrap(), "\"government\"");
    }
}
