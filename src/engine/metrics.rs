//! Extraction run metrics.
//!
//! Parsing drops leaves silently (a leaf that does not fit its grammar is not
//! an error), so the counts here are the only way to see how much of a dump
//! was actually turned into rules.
//!
//! - `ParseMetrics`: one dump -> raw rule set.
//! - `SelectionMetrics`: per-class thresholds and what survived them.
//! - `RunMetrics`: both, plus pruning and the total time.

use serde::Serialize;
use std::time::Duration;

/// Counts and timing for turning a dump into a raw rule set.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ParseMetrics {
    /// Lines containing the grammar's leaf marker.
    pub leaf_lines: usize,
    /// Leaf lines with no depth-0 ancestor.
    pub orphaned: usize,
    /// Paths that did not match the grammar's leaf pattern (or had bad counts).
    pub unparseable: usize,
    /// Leaves predicting a label outside the class attribute.
    pub unknown_class: usize,
    /// Parsed rules collapsed into an earlier duplicate.
    pub duplicates: usize,
    /// Rules in the raw set.
    pub rules: usize,
    pub elapsed: Duration,
}

impl ParseMetrics {
    /// Leaf lines that did not become a rule for any reason other than
    /// duplication.
    pub fn skipped(&self) -> usize {
        self.orphaned + self.unparseable + self.unknown_class
    }
}

/// What the selection engine did for one class value.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub class_index: usize,
    /// Rules predicting this class before selection.
    pub candidates: usize,
    /// Thresholds used; `None` when the criterion is disabled or the class has
    /// no rules.
    pub mean_accuracy: Option<f64>,
    pub mean_coverage: Option<f64>,
    pub mean_length: Option<f64>,
    pub selected: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SelectionMetrics {
    pub classes: Vec<ClassSummary>,
    pub elapsed: Duration,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    pub parse: ParseMetrics,
    /// Rules removed by the zero-accuracy prune.
    pub pruned: usize,
    pub selection: SelectionMetrics,
    pub total: Duration,
}
