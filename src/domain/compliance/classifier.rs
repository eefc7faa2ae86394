//! Keyword/pattern domain classifier.
//!
//! The rules live in one declarative table; [`classify`] is the only code
//! that interprets it. For every domain:
//!
//! ```text
//! score = (keyword hits + pattern hits) / (keywords + patterns)
//! ```
//!
//! The highest score wins, ties go to the domain earlier in
//! [`DomainType::PRIORITY`], and a text with no hits at all is `generic`.
//!
//! The reported confidence is that heuristic ratio. It is not a calibrated
//! probability: a long rule list dilutes it, and a text that names one very
//! specific regulation can still score low.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::DomainType;

/// Rule set for one domain.
pub struct DomainRule {
    pub domain: DomainType,
    /// Matched as whole words, case-insensitively.
    pub keywords: &'static [&'static str],
    /// Regular expressions, matched case-insensitively.
    pub patterns: &'static [&'static str],
}

impl DomainRule {
    pub fn term_count(&self) -> usize {
        self.keywords.len() + self.patterns.len()
    }
}

pub static DOMAIN_RULES: &[DomainRule] = &[
    DomainRule {
        domain: DomainType::Healthcare,
        keywords: &[
            "patient", "medical", "health", "hospital", "doctor", "nurse", "diagnosis",
            "treatment", "prescription", "medication", "surgery", "clinic", "healthcare",
            "phi", "hipaa", "medical record", "patient data", "health information",
            "electronic health record", "ehr", "emr", "radiology", "lab results",
            "disha", "clinical establishment", "indian healthcare",
        ],
        patterns: &[
            r"\b(patient|medical|health)\s+(record|data|information)\b",
            r"\bhipaa\b",
            r"\bphi\b",
            r"\belectronic\s+health\s+record\b",
            r"\bdisha\b",
            r"\bclinical\s+establishment\b",
        ],
    },
    DomainRule {
        domain: DomainType::Finance,
        keywords: &[
            "bank", "financial", "money", "payment", "transaction", "credit", "debit",
            "loan", "mortgage", "investment", "trading", "portfolio", "account",
            "pci", "pci-dss", "financial data", "banking", "fintech", "cryptocurrency",
            "fraud", "aml", "kyc", "compliance", "regulatory", "sox", "gdpr",
        ],
        patterns: &[
            r"\b(financial|banking|payment)\s+(data|information|system)\b",
            r"\bpci[-\s]?dss\b",
            r"\baml\b|\bkyc\b",
            r"\bsox\b|\bsarbanes[-\s]?oxley\b",
        ],
    },
    DomainRule {
        domain: DomainType::Government,
        keywords: &[
            "government", "federal", "state", "municipal", "public", "citizen",
            "fisma", "fedramp", "authority to operate", "ato", "nist", "cybersecurity",
            "classified", "sensitive", "cui", "pii", "privacy act",
        ],
        patterns: &[
            r"\b(government|federal|state)\s+(data|system|information)\b",
            r"\bfisma\b|\bfedramp\b",
            r"\bnist\b",
            r"\bcui\b|\bcontrolled\s+unclassified\s+information\b",
        ],
    },
    DomainRule {
        domain: DomainType::Education,
        keywords: &[
            "student", "education", "school", "university", "college", "academic",
            "ferpa", "educational record", "grade", "transcript", "enrollment",
            "learning", "course", "classroom", "teacher", "professor",
        ],
        patterns: &[
            r"\b(student|educational)\s+(record|data|information)\b",
            r"\bferpa\b",
            r"\bacademic\s+(record|data)\b",
        ],
    },
    DomainRule {
        domain: DomainType::Enterprise,
        keywords: &[
            "enterprise", "corporate", "erp", "crm", "procurement", "vendor", "invoice",
            "employee", "onboarding", "payroll", "hr", "internal control", "sso",
        ],
        patterns: &[
            r"\benterprise\s+(system|data|workflow|application)\b",
            r"\b(erp|crm)\s+(system|integration|data)\b",
            r"\bsingle\s+sign[-\s]?on\b",
        ],
    },
    DomainRule {
        domain: DomainType::Productivity,
        keywords: &[
            "email", "todo", "task", "llm", "ai", "automation", "workflow", "productivity",
            "action items", "to-do", "organize", "schedule", "reminder", "notification",
            "chatgpt", "gpt", "claude", "openai", "assistant", "bot", "nlp", "text processing",
            "summarize", "extract", "parse", "analyze", "generate", "content", "document",
        ],
        patterns: &[
            r"\b(email|emails)\s+(to|into|from)\b",
            r"\b(todo|to-do)\s+(list|items)\b",
            r"\b(action\s+items?|task\s+list)\b",
            r"\b(llm|ai)\s+(app|application|system)\b",
            r"\b(build|create|make)\s+(an?)\s+(app|application|system)\b",
        ],
    },
];

/// Regulatory framework indicators reported alongside the domain.
static FRAMEWORK_INDICATORS: &[(&str, &[&str])] = &[
    ("GDPR", &["gdpr", "data protection", "privacy", "personal data", "consent"]),
    ("SOX", &["sox", "sarbanes", "financial reporting", "internal control"]),
    ("HIPAA", &["hipaa", "health information", "medical", "patient data"]),
    ("PCI", &["pci", "payment card", "credit card", "card data"]),
];

/// Any of these marks the workflow as processing personal data, which brings in GDPR.
static DATA_SUBJECT_TERMS: &[&str] = &["data", "personal", "customer", "employee"];

static APPROVAL_TERMS: &[&str] = &[
    "approval", "review", "document", "contract", "agreement", "sign", "authorize",
    "validate", "quality check",
];

struct CompiledRule {
    domain: DomainType,
    terms: Vec<(&'static str, Regex)>,
}

fn keyword_regex(keyword: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword))).ok()
}

static COMPILED_RULES: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    DOMAIN_RULES
        .iter()
        .map(|rule| {
            let keywords = rule
                .keywords
                .iter()
                .filter_map(|k| keyword_regex(k).map(|re| (*k, re)));
            let patterns = rule
                .patterns
                .iter()
                .filter_map(|p| Regex::new(&format!("(?i){}", p)).ok().map(|re| (*p, re)));
            CompiledRule {
                domain: rule.domain,
                terms: keywords.chain(patterns).collect(),
            }
        })
        .collect()
});

/// Outcome of classifying a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub domain: DomainType,
    /// Hit ratio of the winning rule set, in `[0, 1]`. Not a probability.
    pub confidence: f64,
    /// Keywords and patterns of the winning domain that matched.
    pub evidence: Vec<String>,
    /// Regulatory frameworks the text mentions or the domain implies.
    pub frameworks: Vec<String>,
    pub suggests_approval: bool,
}

/// Hit ratio of one domain's rule set against a text.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainScore {
    pub domain: DomainType,
    pub score: f64,
    pub evidence: Vec<String>,
}

/// Scores `text` against every domain rule set that has at least one hit.
pub fn score_domains(text: &str) -> Vec<DomainScore> {
    DOMAIN_RULES
        .iter()
        .zip(COMPILED_RULES.iter())
        .filter_map(|(rule, compiled)| {
            let evidence: Vec<String> = compiled
                .terms
                .iter()
                .filter(|(_, re)| re.is_match(text))
                .map(|(term, _)| term.to_string())
                .collect();
            if evidence.is_empty() {
                return None;
            }
            Some(DomainScore {
                domain: compiled.domain,
                score: evidence.len() as f64 / rule.term_count() as f64,
                evidence,
            })
        })
        .collect()
}

/// Highest score wins; equal scores go to the higher-priority domain.
pub fn select_winner(scores: Vec<DomainScore>) -> Option<DomainScore> {
    scores.into_iter().reduce(|best, candidate| {
        let better = candidate.score > best.score
            || (candidate.score == best.score
                && candidate.domain.priority() < best.domain.priority());
        if better {
            candidate
        } else {
            best
        }
    })
}

/// Classifies free text into a domain.
pub fn classify(text: &str) -> Classification {
    let (domain, confidence, evidence) = match select_winner(score_domains(text)) {
        Some(winner) => (winner.domain, winner.score, winner.evidence),
        None => (DomainType::Generic, 0.0, Vec::new()),
    };
    let frameworks = detect_frameworks(text, domain);
    let lower = text.to_lowercase();
    let suggests_approval = APPROVAL_TERMS.iter().any(|t| lower.contains(t))
        || matches!(domain, DomainType::Finance | DomainType::Healthcare);

    tracing::debug!(%domain, confidence, hits = evidence.len(), "Classified seed input");

    Classification {
        domain,
        confidence,
        evidence,
        frameworks,
        suggests_approval,
    }
}

fn detect_frameworks(text: &str, domain: DomainType) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = FRAMEWORK_INDICATORS
        .iter()
        .filter(|(_, indicators)| indicators.iter().any(|i| lower.contains(i)))
        .map(|(name, _)| name.to_string())
        .collect();

    let implied = match domain {
        DomainType::Healthcare => Some("HIPAA"),
        DomainType::Finance => Some("SOX"),
        _ => None,
    };
    let handles_personal_data = DATA_SUBJECT_TERMS.iter().any(|t| lower.contains(t));

    for name in implied.into_iter().chain(handles_personal_data.then_some("GDPR")) {
        if !found.iter().any(|f| f == name) {
            found.push(name.to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_record_is_healthcare() {
        let result = classify("store patient record");
        assert_eq!(result.domain, DomainType::Healthcare);
        assert!(result.confidence > 0.0 && result.confidence <= 1.0);
        assert!(result.evidence.contains(&"patient".to_string()));
    }

    #[test]
    fn confidence_is_hit_ratio_of_winning_rule() {
        let result = classify("store patient record");
        let healthcare = &DOMAIN_RULES[0];
        let expected = result.evidence.len() as f64 / healthcare.term_count() as f64;
        assert_eq!(result.confidence, expected);
    }

    #[test]
    fn personal_data_terms_imply_gdpr_once() {
        let result = classify("export customer contact list every week");
        assert_eq!(result.frameworks, vec!["GDPR".to_string()]);

        let explicit = classify("gdpr request for employee records");
        assert_eq!(explicit.frameworks.iter().filter(|f| *f == "GDPR").count(), 1);

        assert!(classify("paint the fence blue").frameworks.is_empty());
    }

    #[test]
    fn payment_fraud_is_finance() {
        let result = classify("check every payment transaction for fraud");
        assert_eq!(result.domain, DomainType::Finance);
        assert!(result.frameworks.contains(&"SOX".to_string()));
    }

    #[test]
    fn no_hits_is_generic_with_zero_confidence() {
        let result = classify("paint the fence blue");
        assert_eq!(result.domain, DomainType::Generic);
        assert_eq!(result.confidence, 0.0);
        assert!(result.evidence.is_empty());
    }

    #[test]
    fn keywords_match_whole_words_only() {
        // "maintain" contains "ai", "philosophy" contains "phi"
        let result = classify("maintain the philosophy");
        assert_eq!(result.domain, DomainType::Generic);
    }

    #[test]
    fn ties_break_by_priority_order() {
        let score = |domain| DomainScore {
            domain,
            score: 0.25,
            evidence: vec![],
        };
        let winner = select_winner(vec![
            score(DomainType::Education),
            score(DomainType::Government),
            score(DomainType::Finance),
        ])
        .unwrap();
        assert_eq!(winner.domain, DomainType::Finance);
    }

    #[test]
    fn higher_score_beats_priority() {
        let winner = select_winner(vec![
            DomainScore { domain: DomainType::Healthcare, score: 0.1, evidence: vec![] },
            DomainScore { domain: DomainType::Education, score: 0.2, evidence: vec![] },
        ])
        .unwrap();
        assert_eq!(winner.domain, DomainType::Education);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "FERPA protected student transcript export";
        assert_eq!(classify(text), classify(text));
        assert_eq!(classify(text).domain, DomainType::Education);
    }

    #[test]
    fn approval_vocabulary_sets_flag() {
        assert!(classify("contract approval for the new supplier").suggests_approval);
        assert!(!classify("paint the fence blue").suggests_approval);
    }

    #[test]
    fn every_rule_pattern_compiles() {
        for (rule, compiled) in DOMAIN_RULES.iter().zip(COMPILED_RULES.iter()) {
            assert_eq!(compiled.terms.len(), rule.term_count(), "{}", rule.domain);
        }
    }
}
