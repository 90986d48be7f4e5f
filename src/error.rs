use serde::Serialize;

/// Lifecycle of a [`crate::RuleExtractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BuildStatus {
    /// Nothing has been extracted yet.
    Unbuilt,
    /// A final rule set is available.
    Built,
    /// Extraction was skipped; no rule set exists.
    Skipped(SkipReason),
}

impl BuildStatus {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildStatus::Built)
    }
}

/// Why extraction did not run. None of these is fatal; each renders as a
/// human-readable report instead of a rule listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum SkipReason {
    #[error("rules can currently only be extracted from RandomForest, SysFor or ForestPA (got {model})")]
    UnsupportedModel { model: String },

    #[error("use a dataset with more than one attribute (got {attributes})")]
    TrivialDataset { attributes: usize },

    #[error("select at least one criterion by which to select rules (accuracy, coverage, or rule length)")]
    NoCriteriaSelected,

    #[error("RandomForest must print its individual trees (printClassifiers / -print)")]
    IncompatibleSourceModel,

    #[error("the training data has no records, so rule coverage is undefined")]
    EmptyDataset,
}

/// Why a single leaf was dropped during parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeafError {
    #[error("leaf path does not match the {grammar} leaf pattern")]
    NoMatch { grammar: &'static str },

    #[error("invalid count '{text}' in leaf")]
    BadCount { text: String },

    #[error("invalid class distribution '{text}'")]
    BadDistribution { text: String },

    #[error("class label '{label}' is not a value of the class attribute")]
    UnknownClass { label: String },
}

/// Invalid textual option values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown model '{0}' (expected sysfor, forestpa or randomforest)")]
    UnknownModel(String),

    #[error("invalid sort method '{0}' (expected acc, cov or len)")]
    UnknownSortMode(String),
}
