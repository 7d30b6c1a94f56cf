use std::fmt;

/// Coarse document category inferred from lexical cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DocumentType {
    Protocol,
    #[serde(rename = "SOP")]
    Sop,
    Unknown,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Protocol => "Protocol",
            DocumentType::Sop => "SOP",
            DocumentType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-requirement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LikelyAddressed,
    PossiblyMissing,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::LikelyAddressed => "Likely Addressed",
            Verdict::PossiblyMissing => "Possibly Missing",
        }
    }

    pub fn is_addressed(&self) -> bool {
        matches!(self, Verdict::LikelyAddressed)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VerdictItem {
    pub requirement: String,
    pub verdict: Verdict,
    pub match_score: f64,  // Fraction of keywords found, in [0, 1]
    pub matched_keywords: usize,
    pub total_keywords: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistResult {
    pub checklist_key: String,
    pub checklist_name: String,
    pub items: Vec<VerdictItem>, // Same order as the checklist's requirements
    pub confidence: f64,         // Percentage of items addressed, in [0, 100]
}

impl ChecklistResult {
    pub fn addressed_count(&self) -> usize {
        self.items.iter().filter(|i| i.verdict.is_addressed()).count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &VerdictItem> {
        self.items.iter().filter(|i| !i.verdict.is_addressed())
    }
}

/// Audit readiness tier derived from the overall confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessTier {
    High,
    Moderate,
    Low,
}

impl ReadinessTier {
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessTier::High => "high readiness",
            ReadinessTier::Moderate => "moderate readiness",
            ReadinessTier::Low => "low readiness",
        }
    }
}

impl fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChecklistConfidence {
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuditSummary {
    pub confidences: Vec<ChecklistConfidence>, // In selection order
    pub overall_confidence: f64,
    pub tier: ReadinessTier,
}

impl AuditSummary {
    pub fn confidence_for(&self, name: &str) -> Option<f64> {
        self.confidences
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.confidence)
    }
}

/// Full analysis of one uploaded document
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentReport {
    pub filename: String,
    pub document_type: DocumentType,
    pub results: Vec<ChecklistResult>,
    pub summary: Option<AuditSummary>, // None when no checklist was selected
}

/// Outcome for a single document in a batch
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Analyzed(DocumentReport),
    Failed { filename: String, error: String },
}

impl BatchEntry {
    pub fn filename(&self) -> &str {
        match self {
            BatchEntry::Analyzed(report) => &report.filename,
            BatchEntry::Failed { filename, .. } => filename,
        }
    }

    pub fn report(&self) -> Option<&DocumentReport> {
        match self {
            BatchEntry::Analyzed(report) => Some(report),
            BatchEntry::Failed { .. } => None,
        }
    }
}
