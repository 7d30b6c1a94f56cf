pub mod types;

pub use types::{
    AuditSummary, BatchEntry, ChecklistConfidence, ChecklistResult, DocumentReport, DocumentType,
    ReadinessTier, Verdict, VerdictItem,
};
