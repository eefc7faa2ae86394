//! Audit-oriented compliance report for a workflow snapshot.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, WorkflowId};
use crate::domain::workflow::WorkflowState;

use super::catalog;
use super::validator::validate;
use super::DomainType;

/// Weight of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Points deducted from a perfect score of 100.
    pub fn penalty(&self) -> f64 {
        match self {
            Severity::Critical => 25.0,
            Severity::High => 15.0,
            Severity::Medium => 10.0,
            Severity::Low => 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedViolation {
    pub id: String,
    pub severity: Severity,
    pub violation_type: String,
    pub compliance_type: String,
    pub description: String,
    pub regulation: String,
    pub remediation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub workflow_id: WorkflowId,
    pub domain: DomainType,
    pub regulation: String,
    /// 0 to 100.
    pub compliance_score: f64,
    pub violations: Vec<ReportedViolation>,
    pub recommendations: Vec<String>,
    pub generated_at: Timestamp,
}

impl ComplianceReport {
    /// Validates the state's graph and scores the result.
    pub fn assess(state: &WorkflowState) -> Self {
        let domain = state.domain();
        let regulation = catalog::requirements_for(domain).regulation;
        let result = validate(&state.graph().nodes, domain);

        let violations: Vec<ReportedViolation> = result
            .violations
            .iter()
            .enumerate()
            .map(|(i, v)| ReportedViolation {
                id: format!("violation_{}", i),
                severity: Severity::High,
                violation_type: "missing_compliance_node".to_string(),
                compliance_type: v.compliance_type.clone(),
                description: v.description.clone(),
                regulation: regulation.to_string(),
                remediation: format!("Add required {} node", v.label),
            })
            .collect();

        Self {
            workflow_id: *state.id(),
            domain,
            regulation: regulation.to_string(),
            compliance_score: score(&violations),
            recommendations: recommendations(domain, violations.len()),
            violations,
            generated_at: Timestamp::now(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

fn score(violations: &[ReportedViolation]) -> f64 {
    let deducted: f64 = violations.iter().map(|v| v.severity.penalty()).sum();
    (100.0 - deducted).max(0.0)
}

fn recommendations(domain: DomainType, violation_count: usize) -> Vec<String> {
    let mut out = Vec::new();
    if violation_count > 0 {
        out.push(format!(
            "Address {} compliance violations immediately",
            violation_count
        ));
        out.push(format!("Ensure all {} regulatory requirements are met", domain));
    }
    let advice: &[&str] = match domain {
        DomainType::Healthcare => &[
            "Implement PHI redaction for all patient data",
            "Enable comprehensive HIPAA audit logging",
            "Ensure end-to-end encryption for health information",
        ],
        DomainType::Finance => &[
            "Validate PCI-DSS compliance for payment data",
            "Implement fraud detection mechanisms",
            "Enable transaction audit trails",
        ],
        _ => &[],
    };
    out.extend(advice.iter().map(|s| s.to_string()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::autofix::fix;
    use crate::domain::foundation::UserId;
    use crate::domain::workflow::WorkflowGraph;

    fn state(domain: DomainType, graph: WorkflowGraph) -> WorkflowState {
        WorkflowState::new(UserId::new("u1").unwrap(), domain, "Test", None, graph)
    }

    #[test]
    fn empty_healthcare_graph_scores_zero() {
        let report = ComplianceReport::assess(&state(DomainType::Healthcare, WorkflowGraph::default()));
        // six high findings at 15 points each
        assert_eq!(report.violations.len(), 6);
        assert_eq!(report.compliance_score, 10.0);
        assert_eq!(report.regulation, "HIPAA");
        assert_eq!(report.violations[0].remediation, "Add required PHI Redaction node");
    }

    #[test]
    fn score_is_floored_at_zero() {
        let many: Vec<_> = (0..10)
            .map(|i| ReportedViolation {
                id: format!("violation_{}", i),
                severity: Severity::Critical,
                violation_type: "missing_compliance_node".into(),
                compliance_type: "X".into(),
                description: String::new(),
                regulation: String::new(),
                remediation: String::new(),
            })
            .collect();
        assert_eq!(score(&many), 0.0);
    }

    #[test]
    fn compliant_finance_graph_scores_full_with_domain_advice() {
        let graph = fix(&WorkflowGraph::default(), DomainType::Finance).into_owned();
        let report = ComplianceReport::assess(&state(DomainType::Finance, graph));
        assert!(report.is_compliant());
        assert_eq!(report.compliance_score, 100.0);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.regulation, "PCI-DSS");
    }

    #[test]
    fn violations_produce_generic_recommendations() {
        let report = ComplianceReport::assess(&state(DomainType::Education, WorkflowGraph::default()));
        assert_eq!(report.compliance_score, 70.0);
        assert_eq!(
            report.recommendations,
            vec![
                "Address 2 compliance violations immediately".to_string(),
                "Ensure all education regulatory requirements are met".to_string(),
            ]
        );
    }
}
