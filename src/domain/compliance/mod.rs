//! Compliance module.
//!
//! Domain classification, the static per-domain catalog, validation of a
//! graph against that catalog, and automatic repair.
//!
//! Nothing here performs I/O; every function is deterministic for a given
//! rule table and catalog.

pub mod autofix;
pub mod catalog;
pub mod classifier;
mod domain_type;
mod report;
mod validator;

pub use autofix::fix;
pub use catalog::{requirements_for, ComplianceRequirement, MandatoryFlow, RequiredNode};
pub use classifier::{classify, Classification};
pub use domain_type::DomainType;
pub use report::{ComplianceReport, ReportedViolation, Severity};
pub use validator::{validate, ComplianceResult, Violation, ViolationKind};
