//! Static per-domain compliance catalog.
//!
//! Each domain maps to the nodes it mandates, optional adjacency hints,
//! restriction text shown to editors, and the primary regulation cited in
//! audit reports. Lookup is a `match`, so it is O(1) and cannot fail; the
//! `generic` entry backs any domain that is not otherwise described.

use serde::Serialize;

use crate::domain::workflow::NodeType;

use super::DomainType;

/// A node a domain mandates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: &'static str,
    pub description: &'static str,
    pub compliance_type: &'static str,
    pub locked: bool,
}

/// Suggested ordering between mandated steps, by slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MandatoryFlow {
    pub from: &'static str,
    pub to: &'static str,
}

/// Everything a domain requires of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceRequirement {
    pub domain: DomainType,
    pub required_nodes: &'static [RequiredNode],
    pub mandatory_flows: &'static [MandatoryFlow],
    pub restrictions: &'static [&'static str],
    pub explanation: &'static str,
    pub regulation: &'static str,
}

impl ComplianceRequirement {
    /// Compliance tags in catalog order.
    pub fn required_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required_nodes.iter().map(|n| n.compliance_type)
    }

    pub fn required_node(&self, compliance_type: &str) -> Option<&'static RequiredNode> {
        self.required_nodes
            .iter()
            .find(|n| n.compliance_type == compliance_type)
    }
}

/// Returns the catalog entry for a domain.
pub fn requirements_for(domain: DomainType) -> &'static ComplianceRequirement {
    match domain {
        DomainType::Healthcare => &HEALTHCARE,
        DomainType::Finance => &FINANCE,
        DomainType::Government => &GOVERNMENT,
        DomainType::Education => &EDUCATION,
        DomainType::Enterprise => &ENTERPRISE,
        DomainType::Productivity => &PRODUCTIVITY,
        DomainType::Generic => &GENERIC,
    }
}

/// Looks up a catalog entry by label; unknown labels get the `generic` entry.
pub fn requirements_for_label(label: &str) -> &'static ComplianceRequirement {
    requirements_for(DomainType::from_label(label))
}

static HEALTHCARE: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Healthcare,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "PHI Redaction",
            description: "Remove or mask Protected Health Information",
            compliance_type: "HIPAA_PHI_REDACTION",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "DISHA Compliance",
            description: "Digital Information Security in Healthcare Act compliance (India)",
            compliance_type: "DISHA_COMPLIANCE",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "HIPAA Audit Log",
            description: "Log all access to patient data",
            compliance_type: "HIPAA_AUDIT",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Clinical Establishment Audit",
            description: "Audit trail for Clinical Establishments Act (India)",
            compliance_type: "CLINICAL_ESTABLISHMENT_AUDIT",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Security,
            label: "Encryption",
            description: "Encrypt data in transit and at rest",
            compliance_type: "HIPAA_ENCRYPTION",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "PDPB Healthcare Data",
            description: "Personal Data Protection Bill compliance for health data (India)",
            compliance_type: "PDPB_HEALTHCARE",
            locked: true,
        },
    ],
    mandatory_flows: &[
        MandatoryFlow { from: "input", to: "phi_redaction" },
        MandatoryFlow { from: "phi_redaction", to: "disha_compliance" },
        MandatoryFlow { from: "disha_compliance", to: "audit_log" },
    ],
    restrictions: &[
        "PHI redaction cannot be removed",
        "DISHA compliance is mandatory for Indian healthcare",
        "Clinical Establishment Act audit required",
        "PDPB healthcare data protection required",
        "Data must be encrypted",
    ],
    explanation: "Healthcare workflows require HIPAA compliance (global) and DISHA/Clinical \
                  Establishments Act compliance (India), plus PDPB data protection.",
    regulation: "HIPAA",
};

static FINANCE: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Finance,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "PCI-DSS Validation",
            description: "Validate payment card data security",
            compliance_type: "PCI_DSS",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Security,
            label: "Fraud Detection",
            description: "Monitor for fraudulent activities",
            compliance_type: "FRAUD_DETECTION",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Transaction Audit",
            description: "Log all financial transactions",
            compliance_type: "FINANCIAL_AUDIT",
            locked: true,
        },
    ],
    mandatory_flows: &[
        MandatoryFlow { from: "input", to: "pci_validation" },
        MandatoryFlow { from: "pci_validation", to: "fraud_detection" },
    ],
    restrictions: &[
        "PCI-DSS validation is mandatory",
        "Fraud detection cannot be bypassed",
        "All transactions must be audited",
    ],
    explanation: "Financial workflows require PCI-DSS compliance, fraud detection, and \
                  comprehensive audit trails.",
    regulation: "PCI-DSS",
};

static GOVERNMENT: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Government,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Security,
            label: "NIST Controls",
            description: "Apply NIST cybersecurity framework controls",
            compliance_type: "NIST_CSF",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "FISMA Compliance",
            description: "Federal Information Security Management Act compliance",
            compliance_type: "FISMA",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Government Audit",
            description: "Comprehensive audit trail for government data",
            compliance_type: "GOV_AUDIT",
            locked: true,
        },
    ],
    mandatory_flows: &[
        MandatoryFlow { from: "input", to: "nist_controls" },
        MandatoryFlow { from: "nist_controls", to: "fisma_compliance" },
    ],
    restrictions: &[
        "NIST controls are mandatory",
        "FISMA compliance cannot be removed",
        "Government audit trail required",
    ],
    explanation: "Government workflows require FISMA compliance, NIST controls, and \
                  comprehensive audit trails.",
    regulation: "FISMA",
};

static EDUCATION: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Education,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Compliance,
            label: "FERPA Protection",
            description: "Protect student educational records",
            compliance_type: "FERPA",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Educational Audit",
            description: "Log access to student records",
            compliance_type: "EDU_AUDIT",
            locked: true,
        },
    ],
    mandatory_flows: &[MandatoryFlow { from: "input", to: "ferpa_protection" }],
    restrictions: &[
        "FERPA protection is mandatory",
        "Student record access must be audited",
    ],
    explanation: "Educational workflows require FERPA compliance to protect student privacy.",
    regulation: "FERPA",
};

static ENTERPRISE: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Enterprise,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Security,
            label: "Enterprise Security",
            description: "Enterprise-grade security controls",
            compliance_type: "ENTERPRISE_SECURITY",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Enterprise Audit",
            description: "Enterprise audit and compliance logging",
            compliance_type: "ENTERPRISE_AUDIT",
            locked: true,
        },
    ],
    mandatory_flows: &[MandatoryFlow { from: "input", to: "enterprise_security" }],
    restrictions: &["Enterprise security controls are mandatory"],
    explanation: "Enterprise workflows require comprehensive security and audit controls.",
    regulation: "SOX",
};

static PRODUCTIVITY: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Productivity,
    required_nodes: &[
        RequiredNode {
            node_type: NodeType::Security,
            label: "Data Encryption",
            description: "Encrypt data in transit and at rest",
            compliance_type: "DATA_ENCRYPTION",
            locked: true,
        },
        RequiredNode {
            node_type: NodeType::Audit,
            label: "Activity Log",
            description: "Log all user activity",
            compliance_type: "ACTIVITY_LOG",
            locked: true,
        },
    ],
    mandatory_flows: &[MandatoryFlow { from: "input", to: "data_encryption" }],
    restrictions: &["Data encryption is mandatory", "Activity log is required"],
    explanation: "Productivity workflows require data encryption and activity logging.",
    regulation: "General Compliance",
};

static GENERIC: ComplianceRequirement = ComplianceRequirement {
    domain: DomainType::Generic,
    required_nodes: &[RequiredNode {
        node_type: NodeType::Security,
        label: "Basic Security",
        description: "Basic data protection measures",
        compliance_type: "BASIC_SECURITY",
        locked: false,
    }],
    mandatory_flows: &[],
    restrictions: &[],
    explanation: "Generic workflows include basic security measures.",
    regulation: "General Compliance",
};
