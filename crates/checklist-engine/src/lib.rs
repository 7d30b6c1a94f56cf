//! Checklist engine: keyword-heuristic gap analysis of clinical trial
//! documents against regulatory checklists.
//!
//! The engine never reads files. Callers hand it extracted text and a
//! selection of checklists; it returns per-requirement verdicts, a
//! confidence per checklist and an overall readiness summary.

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod patterns;
pub mod registry;
pub mod scorer;

use std::fmt::Display;

use shared_types::{BatchEntry, DocumentReport};
use tracing::{debug, warn};

pub use aggregate::{summarize, tier_for};
pub use classifier::classify;
pub use error::{ConfigurationError, EngineError};
pub use registry::{load_definitions, Checklist, ChecklistDefinition, ChecklistRegistry};
pub use scorer::evaluate;

/// GapAnalyzer entry point
pub struct GapAnalyzer<'a> {
    registry: &'a ChecklistRegistry,
}

impl GapAnalyzer<'static> {
    /// Analyzer over the built-in catalog
    pub fn new() -> Self {
        Self {
            registry: ChecklistRegistry::builtin(),
        }
    }
}

impl Default for GapAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> GapAnalyzer<'a> {
    pub fn with_registry(registry: &'a ChecklistRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ChecklistRegistry {
        self.registry
    }

    /// Resolve checklist names against this analyzer's registry
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&'a Checklist>, EngineError> {
        self.registry.select(names)
    }

    /// Classify and score one document against the selected checklists
    pub fn analyze_document(
        &self,
        filename: &str,
        text: &str,
        selection: &[&Checklist],
    ) -> Result<DocumentReport, EngineError> {
        let text_lower = text.to_lowercase();
        let document_type = classifier::classify_lowered(&text_lower);

        let results = selection
            .iter()
            .map(|checklist| scorer::evaluate_lowered(&text_lower, checklist))
            .collect::<Result<Vec<_>, _>>()?;

        let named: Vec<_> = results
            .iter()
            .map(|r| (r.checklist_name.as_str(), r.clone()))
            .collect();
        let summary = summarize(&named);

        debug!(
            filename,
            %document_type,
            checklists = results.len(),
            overall = summary.as_ref().map(|s| s.overall_confidence),
            "Analyzed document"
        );

        Ok(DocumentReport {
            filename: filename.to_string(),
            document_type,
            results,
            summary,
        })
    }

    /// Analyze a batch of documents independently.
    ///
    /// Each entry carries either the extracted text or the error that
    /// prevented extraction. A failed entry is reported in place and never
    /// affects the others; output order matches input order.
    pub fn analyze_batch<I, E>(&self, documents: I, selection: &[&Checklist]) -> Vec<BatchEntry>
    where
        I: IntoIterator<Item = (String, Result<String, E>)>,
        E: Display,
    {
        documents
            .into_iter()
            .map(|(filename, extracted)| {
                let outcome = match extracted {
                    Ok(text) => self
                        .analyze_document(&filename, &text, selection)
                        .map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };

                match outcome {
                    Ok(report) => BatchEntry::Analyzed(report),
                    Err(error) => {
                        warn!(filename = %filename, %error, "Document could not be analyzed");
                        BatchEntry::Failed { filename, error }
                    }
                }
            })
            .collect()
    }
}
