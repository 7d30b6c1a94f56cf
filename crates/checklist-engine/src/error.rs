//! Error types for the checklist engine

use thiserror::Error;

/// A checklist definition that can never be scored.
///
/// Raised while building a registry, so a bad checklist is rejected at
/// startup rather than during an analysis request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Checklist key must not be blank")]
    BlankKey,

    #[error("Checklist '{0}' has no requirements")]
    EmptyChecklist(String),

    #[error("Checklist '{checklist}' requirement #{index} yields no keywords")]
    BlankRequirement { checklist: String, index: usize },

    #[error("Duplicate checklist key '{0}'")]
    DuplicateKey(String),

    #[error("Checklist '{0}' is already registered under that key or name")]
    DuplicateName(String),

    #[error("Malformed checklist definitions: {0}")]
    Malformed(String),
}

/// Errors returned by scoring and selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Checklist '{0}' has no requirements to score")]
    EmptyChecklist(String),

    #[error("Unknown checklist '{0}'")]
    UnknownChecklist(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
