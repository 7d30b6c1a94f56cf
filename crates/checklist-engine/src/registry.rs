//! Checklist registry
//!
//! Checklists are immutable once built. The built-in catalog is constructed
//! once per process and shared by reference; deployments can layer extra
//! checklists on top via [`ChecklistRegistry::extend`].

use std::collections::HashSet;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::{ConfigurationError, EngineError};

/// ISO 14155 - Clinical investigation of medical devices for human subjects
pub const ISO_14155_REQUIREMENTS: &[&str] = &[
    "Is the protocol approved by an Ethics Committee?",
    "Are informed consent procedures described and compliant?",
    "Are risk-benefit analyses included and clearly documented?",
    "Is there a monitoring plan described?",
    "Are adverse event reporting procedures detailed?",
];

/// FDA 21 CFR Part 812 - Investigational Device Exemptions
pub const FDA_CFR_812_REQUIREMENTS: &[&str] = &[
    "Does the protocol identify the investigational device?",
    "Are investigator responsibilities clearly defined?",
    "Is subject protection adequately addressed?",
    "Does the plan include IRB approval documentation?",
    "Are sponsor responsibilities documented?",
];

/// ICH E6 Good Clinical Practice
pub const ICH_GCP_REQUIREMENTS: &[&str] = &[
    "Is the trial approved by an Institutional Review Board or Independent Ethics Committee?",
    "Is freely given informed consent obtained from every subject before participation?",
    "Are investigator qualifications and responsibilities described?",
    "Are data handling and record keeping procedures defined?",
    "Is a quality management and monitoring approach described?",
    "Are safety reporting procedures for adverse events defined?",
];

/// WMA Declaration of Helsinki
pub const HELSINKI_REQUIREMENTS: &[&str] = &[
    "Is the research protocol submitted to a research ethics committee before the study begins?",
    "Are risks and burdens weighed against the foreseeable benefits to participants?",
    "Is informed consent obtained from each potential participant?",
    "Is the privacy and confidentiality of participant personal information protected?",
    "Is the study registered in a publicly accessible database?",
    "Are post-trial provisions for participants described?",
];

lazy_static! {
    static ref BUILTIN: ChecklistRegistry = ChecklistRegistry::with_checklists(vec![
        Checklist::from_static("iso-14155", "ISO 14155", ISO_14155_REQUIREMENTS),
        Checklist::from_static("fda-21-cfr-812", "FDA 21 CFR Part 812", FDA_CFR_812_REQUIREMENTS),
        Checklist::from_static("ich-gcp", "ICH GCP", ICH_GCP_REQUIREMENTS),
        Checklist::from_static("declaration-of-helsinki", "Declaration of Helsinki", HELSINKI_REQUIREMENTS),
    ])
    .expect("built-in checklist catalog is valid");
}

/// A named, ordered set of requirement statements for one standard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    key: String,
    name: String,
    requirements: Vec<String>,
}

impl Checklist {
    /// Build a checklist, rejecting definitions that could not be scored
    pub fn new<I, S>(
        key: impl Into<String>,
        name: impl Into<String>,
        requirements: I,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigurationError::BlankKey);
        }

        let requirements: Vec<String> = requirements.into_iter().map(Into::into).collect();
        if requirements.is_empty() {
            return Err(ConfigurationError::EmptyChecklist(key));
        }

        if let Some(index) = requirements
            .iter()
            .position(|r| r.split_whitespace().next().is_none())
        {
            return Err(ConfigurationError::BlankRequirement {
                checklist: key,
                index,
            });
        }

        let name = name.into();
        let name = if name.trim().is_empty() {
            key.clone()
        } else {
            name
        };

        Ok(Self {
            key,
            name,
            requirements,
        })
    }

    fn from_static(
        key: &str,
        name: &str,
        requirements: &[&str],
    ) -> Result<Self, ConfigurationError> {
        Self::new(key, name, requirements.iter().copied())
    }

    /// Stable identifier, e.g. "iso-14155"
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name, e.g. "ISO 14155"
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    fn matches(&self, key_or_name: &str) -> bool {
        let wanted = key_or_name.trim();
        self.key.eq_ignore_ascii_case(wanted) || self.name.eq_ignore_ascii_case(wanted)
    }
}

/// On-disk form of a checklist, validated into a [`Checklist`]
#[derive(Debug, Clone, Deserialize)]
pub struct ChecklistDefinition {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub requirements: Vec<String>,
}

impl TryFrom<ChecklistDefinition> for Checklist {
    type Error = ConfigurationError;

    fn try_from(def: ChecklistDefinition) -> Result<Self, Self::Error> {
        Checklist::new(def.key, def.name, def.requirements)
    }
}

/// Parse a JSON array of checklist definitions
pub fn load_definitions(json: &str) -> Result<Vec<Checklist>, ConfigurationError> {
    let defs: Vec<ChecklistDefinition> =
        serde_json::from_str(json).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
    defs.into_iter().map(Checklist::try_from).collect()
}

/// Ordered collection of checklists available for selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistRegistry {
    checklists: Vec<Checklist>,
}

impl ChecklistRegistry {
    /// The built-in catalog of the four supported standards
    pub fn builtin() -> &'static ChecklistRegistry {
        &BUILTIN
    }

    pub fn with_checklists<I>(checklists: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Result<Checklist, ConfigurationError>>,
    {
        let mut registry = Self {
            checklists: Vec::new(),
        };
        for checklist in checklists {
            registry.push(checklist?)?;
        }
        Ok(registry)
    }

    /// New registry with `extra` appended after the existing entries.
    /// Existing entries are untouched.
    pub fn extend<I>(&self, extra: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Checklist>,
    {
        let mut registry = self.clone();
        for checklist in extra {
            registry.push(checklist)?;
        }
        Ok(registry)
    }

    /// Keys and names share one lookup namespace, so neither may collide
    /// with any existing key or name.
    fn push(&mut self, checklist: Checklist) -> Result<(), ConfigurationError> {
        for existing in &self.checklists {
            if existing.key.eq_ignore_ascii_case(&checklist.key) {
                return Err(ConfigurationError::DuplicateKey(checklist.key));
            }
            if existing.matches(&checklist.key) {
                return Err(ConfigurationError::DuplicateName(checklist.key));
            }
            if existing.matches(&checklist.name) {
                return Err(ConfigurationError::DuplicateName(checklist.name));
            }
        }
        self.checklists.push(checklist);
        Ok(())
    }

    /// Case-insensitive lookup by key or display name
    pub fn get(&self, key_or_name: &str) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.matches(key_or_name))
    }

    /// Resolve a selection of names into checklists, in registry order.
    ///
    /// Duplicate names collapse to one entry. Any unknown name fails the
    /// whole selection.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&Checklist>, EngineError> {
        let mut wanted = HashSet::new();
        for name in names {
            let checklist = self
                .get(name.as_ref())
                .ok_or_else(|| EngineError::UnknownChecklist(name.as_ref().to_string()))?;
            wanted.insert(checklist.key.as_str());
        }

        Ok(self
            .checklists
            .iter()
            .filter(|c| wanted.contains(c.key.as_str()))
            .collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checklist> {
        self.checklists.iter()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.checklists.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.checklists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checklists.is_empty()
    }
}
