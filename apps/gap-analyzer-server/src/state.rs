//! Application state for the gap analyzer server

use std::sync::Arc;

use checklist_engine::{ChecklistRegistry, EngineError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ChecklistRegistry>,
    /// Checklist keys scored when a request names no standards
    pub default_standards: Arc<Vec<String>>,
    /// Largest decoded upload accepted per document
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Build state, resolving the default selection against the registry.
    ///
    /// An empty `default_standards` selects every registered checklist.
    pub fn new(
        registry: ChecklistRegistry,
        default_standards: &[String],
        max_upload_bytes: usize,
    ) -> Result<Self, EngineError> {
        let defaults: Vec<String> = if default_standards.is_empty() {
            registry.keys().into_iter().map(str::to_string).collect()
        } else {
            registry
                .select(default_standards)?
                .into_iter()
                .map(|c| c.key().to_string())
                .collect()
        };

        Ok(Self {
            registry: Arc::new(registry),
            default_standards: Arc::new(defaults),
            max_upload_bytes,
        })
    }
}
