//! Rule extraction from decision-forest dumps.
//!
//! A trained forest prints itself as indentation-encoded text. This crate
//! rebuilds every root-to-leaf path of that text into a [`Rule`], then keeps
//! only the rules that beat their class average on every enabled criterion
//! (accuracy, coverage, rule length). The result is a small, explainable rule
//! set in place of the forest.
//!
//! ```text
//! dump ── grammar (SysFor | ForestPA | RandomForest)
//!          └─ engine::Extractor   -> raw RuleSet + ParseMetrics
//!                 └─ prune zero-accuracy rules (optional)
//!                       └─ engine::select -> per-class intersect, union
//!                             └─ report::render
//! ```
//!
//! Most callers go through [`RuleExtractor`] (stateful, tracks a
//! [`BuildStatus`]) or the pure [`extract_with`].

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod grammars;
mod report;
mod rule;
mod rule_set;

pub use api::{Extraction, ForestDump, MIN_POSITIVE_ACCURACY, Options, RuleExtractor, extract, extract_with};
pub use engine::{ClassSummary, Criteria, Extractor, ParseMetrics, RunMetrics, SelectionMetrics};
pub use error::{BuildStatus, LeafError, ParseError, SkipReason};
pub use report::{render, render_json, render_rules};
pub use rule::Rule;
pub use rule_set::RuleSet;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// --- Source models ------------------------------------------------------------

/// The forest implementations whose dumps can be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelKind {
    SysFor,
    ForestPa,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::SysFor, ModelKind::ForestPa, ModelKind::RandomForest];

    /// Fully qualified class name used by the host toolkit.
    pub fn class_name(self) -> &'static str {
        match self {
            ModelKind::SysFor => "weka.classifiers.trees.SysFor",
            ModelKind::ForestPa => "weka.classifiers.trees.ForestPA",
            ModelKind::RandomForest => "weka.classifiers.trees.RandomForest",
        }
    }

    pub(crate) fn short_name(self) -> &'static str {
        match self {
            ModelKind::SysFor => "sysfor",
            ModelKind::ForestPa => "forestpa",
            ModelKind::RandomForest => "randomforest",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for ModelKind {
    type Err = ParseError;

    /// Accepts the short name (`sysfor`, `forestpa`, `randomforest`, any case)
    /// or the fully qualified class name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ModelKind::ALL
            .into_iter()
            .find(|kind| trimmed == kind.class_name() || trimmed.eq_ignore_ascii_case(kind.short_name()))
            .ok_or_else(|| ParseError::UnknownModel(trimmed.to_string()))
    }
}

// --- Class attribute ------------------------------------------------------------

/// Ordered class labels of the training data, with label -> index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAttribute {
    labels: Vec<String>,
}

impl ClassAttribute {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClassAttribute { labels: labels.into_iter().map(Into::into).collect() }
    }

    pub fn num_values(&self) -> usize {
        self.labels.len()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

// --- Display ordering ----------------------------------------------------------------

/// Sort key for rendered rules.
///
/// Accuracy and coverage sort descending; length sorts ascending since a
/// shorter rule is the better one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SortMode {
    #[default]
    Accuracy,
    Coverage,
    Length,
}

impl FromStr for SortMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "acc" | "accuracy" => Ok(SortMode::Accuracy),
            "cov" | "coverage" => Ok(SortMode::Coverage),
            "len" | "length" => Ok(SortMode::Length),
            other => Err(ParseError::UnknownSortMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_kind_accepts_short_and_qualified_names() {
        assert_eq!("SysFor".parse::<ModelKind>().unwrap(), ModelKind::SysFor);
        assert_eq!("forestpa".parse::<ModelKind>().unwrap(), ModelKind::ForestPa);
        assert_eq!("weka.classifiers.trees.RandomForest".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert!(matches!("weka.classifiers.trees.J48".parse::<ModelKind>(), Err(ParseError::UnknownModel(_))));
    }

    #[test]
    fn sort_mode_parses_option_values() {
        assert_eq!("acc".parse::<SortMode>().unwrap(), SortMode::Accuracy);
        assert_eq!("cov".parse::<SortMode>().unwrap(), SortMode::Coverage);
        assert_eq!("len".parse::<SortMode>().unwrap(), SortMode::Length);
        assert!("size".parse::<SortMode>().is_err());
    }

    #[test]
    fn class_attribute_maps_labels_to_indices() {
        let classes = ClassAttribute::new(["yes", "no"]);
        assert_eq!(classes.num_values(), 2);
        assert_eq!(classes.index_of("no"), Some(1));
        assert_eq!(classes.index_of("maybe"), None);
        assert_eq!(classes.label(0), Some("yes"));
    }
}
