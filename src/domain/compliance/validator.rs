//! Compliance validation of a node set against a domain's catalog entry.

use serde::{Deserialize, Serialize};

use crate::domain::workflow::FlowNode;

use super::{catalog, DomainType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingComplianceNode,
}

/// One mandated element the graph lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub compliance_type: String,
    pub label: String,
    pub description: String,
}

/// Result of validating a node set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub is_compliant: bool,
    pub violations: Vec<Violation>,
    pub domain: DomainType,
    pub explanation: String,
}

impl ComplianceResult {
    pub fn missing_types(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.compliance_type.as_str())
    }
}

/// Checks that every compliance tag the domain mandates is carried by a
/// domain-required node.
///
/// Violations come out in catalog order. The function is pure: the same
/// nodes and domain always give the same result.
pub fn validate(nodes: &[FlowNode], domain: DomainType) -> ComplianceResult {
    let requirement = catalog::requirements_for(domain);
    let violations: Vec<Violation> = requirement
        .required_nodes
        .iter()
        .filter(|required| {
            !nodes
                .iter()
                .any(|n| n.satisfied_compliance_type() == Some(required.compliance_type))
        })
        .map(|required| Violation {
            kind: ViolationKind::MissingComplianceNode,
            compliance_type: required.compliance_type.to_string(),
            label: required.label.to_string(),
            description: required.description.to_string(),
        })
        .collect();

    ComplianceResult {
        is_compliant: violations.is_empty(),
        violations,
        domain,
        explanation: requirement.explanation.to_string(),
    }
}
