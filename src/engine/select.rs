//! ForEx++ rule selection.
//!
//! For each class value independently:
//!
//! ```text
//! class_rules = rules.filter_by_class(c)
//! selected    = class_rules
//!   ∩ class_rules.filter_accuracy_at_least(mean accuracy)   [ACCURACY]
//!   ∩ class_rules.filter_coverage_at_least(mean coverage)   [COVERAGE]
//!   ∩ class_rules.filter_length_at_most(mean length)        [LENGTH]
//! ```
//!
//! and the final set is the union of the per-class selections in class-index
//! order. Means are taken per class, so a majority class cannot drag the
//! thresholds of a minority class. A selected rule is at least as good as its
//! class average on every enabled criterion at once.

use super::metrics::{ClassSummary, SelectionMetrics};
use crate::RuleSet;
use std::time::Instant;
use tracing::{debug, instrument};

bitflags::bitflags! {
    /// Criteria a rule must meet (relative to its class mean) to be selected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Criteria: u8 {
        /// Accuracy at least the class mean.
        const ACCURACY = 1 << 0;
        /// Coverage at least the class mean.
        const COVERAGE = 1 << 1;
        /// Length at most the class mean.
        const LENGTH   = 1 << 2;
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Criteria::all()
    }
}

/// Select rules class by class. A class without rules selects nothing.
#[instrument(skip(rules), fields(rules = rules.len()))]
pub(crate) fn select(rules: &RuleSet, num_classes: usize, criteria: Criteria) -> (RuleSet, SelectionMetrics) {
    let start = Instant::now();
    let mut metrics = SelectionMetrics::default();
    let mut selected = RuleSet::new();

    for class_index in 0..num_classes {
        let (chosen, summary) = select_class(rules, class_index, criteria);
        debug!(
            class_index,
            candidates = summary.candidates,
            selected = summary.selected,
            mean_accuracy = ?summary.mean_accuracy,
            mean_coverage = ?summary.mean_coverage,
            mean_length = ?summary.mean_length,
            "class selection"
        );
        selected = selected.union(&chosen);
        metrics.classes.push(summary);
    }

    metrics.elapsed = start.elapsed();
    (selected, metrics)
}

fn select_class(rules: &RuleSet, class_index: usize, criteria: Criteria) -> (RuleSet, ClassSummary) {
    let class_rules = rules.filter_by_class(class_index);
    let mut summary = ClassSummary { class_index, candidates: class_rules.len(), ..ClassSummary::default() };

    if class_rules.is_empty() {
        return (class_rules, summary);
    }

    let mut chosen = class_rules.clone();

    if criteria.contains(Criteria::ACCURACY) {
        if let Some(mean) = class_rules.mean_accuracy() {
            chosen = chosen.intersect(&class_rules.filter_accuracy_at_least(mean));
            summary.mean_accuracy = Some(mean);
        }
    }

    if criteria.contains(Criteria::COVERAGE) {
        if let Some(mean) = class_rules.mean_coverage() {
            chosen = chosen.intersect(&class_rules.filter_coverage_at_least(mean));
            summary.mean_coverage = Some(mean);
        }
    }

    if criteria.contains(Criteria::LENGTH) {
        if let Some(mean) = class_rules.mean_length() {
            chosen = chosen.intersect(&class_rules.filter_length_at_most(mean));
            summary.mean_length = Some(mean);
        }
    }

    summary.selected = chosen.len();
    (chosen, summary)
}
