use serde::Serialize;
use std::fmt;

/// Two rules whose accuracy and coverage differ by at most this much (and
/// whose lengths are equal) are duplicates.
pub(crate) const DUPLICATE_TOLERANCE: f64 = 0.001;

/// One root-to-leaf path of a tree, with the statistics of its leaf.
///
/// Rules are immutable once built from parsed text.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    condition: String,
    class_index: usize,
    class_label: String,
    accuracy: f64,
    coverage: f64,
    records: f64,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<Vec<f64>>,
}

/// Raw leaf fields as read from a dump, before statistics are derived.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LeafFields {
    pub condition: String,
    pub class_index: usize,
    pub class_label: String,
    pub records: f64,
    pub misclassified: f64,
    pub length: usize,
    pub distribution: Option<Vec<f64>>,
}

impl Rule {
    /// Derive accuracy and coverage from a leaf.
    ///
    /// Accuracy is 0 for an empty leaf.
    pub(crate) fn from_leaf(leaf: LeafFields, total_records: usize) -> Self {
        let accuracy = if leaf.records != 0.0 { (leaf.records - leaf.misclassified) / leaf.records } else { 0.0 };
        let coverage = leaf.records / total_records as f64;

        Rule {
            condition: leaf.condition,
            class_index: leaf.class_index,
            class_label: leaf.class_label,
            accuracy,
            coverage,
            records: leaf.records,
            length: leaf.length,
            distribution: leaf.distribution,
        }
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Number of training records that reach the leaf (possibly weighted).
    pub fn records(&self) -> f64 {
        self.records
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn distribution(&self) -> Option<&[f64]> {
        self.distribution.as_deref()
    }

    /// Duplicate relation used by every set operation.
    ///
    /// Independent of the condition text: rules from different trees with
    /// matching statistics collapse into one.
    pub fn is_duplicate_of(&self, other: &Rule) -> bool {
        (self.accuracy - other.accuracy).abs() <= DUPLICATE_TOLERANCE
            && (self.coverage - other.coverage).abs() <= DUPLICATE_TOLERANCE
            && self.length == other.length
    }
}

impl fmt::Display for Rule {
    /// `<condition>: <label>. Confidence: 0.800; Coverage: 0.500 (10 records);`
    ///
    /// Numbers are rounded half-up (`0.0625` -> `0.063`, `2.5` -> `3`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}. Confidence: {:.3}; Coverage: {:.3} ({:.0} records);",
            self.condition,
            self.class_label,
            round_half_up(self.accuracy, 3),
            round_half_up(self.coverage, 3),
            round_half_up(self.records, 0)
        )
    }
}

/// Round to `places` decimals, halves rounding up.
pub(crate) fn round_half_up(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale + 0.5).floor() / scale
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a rule directly from its statistics.
    pub(crate) fn rule(condition: &str, class_index: usize, accuracy: f64, coverage: f64, length: usize) -> Rule {
        Rule {
            condition: condition.to_string(),
            class_index,
            class_label: format!("c{class_index}"),
            accuracy,
            coverage,
            records: coverage * 100.0,
            length,
            distribution: None,
        }
    }

    fn leaf(records: f64, misclassified: f64) -> LeafFields {
        LeafFields {
            condition: "a = 1".to_string(),
            class_index: 0,
            class_label: "yes".to_string(),
            records,
            misclassified,
            length: 1,
            distribution: None,
        }
    }

    #[test]
    fn accuracy_and_coverage_follow_leaf_counts() {
        let r = Rule::from_leaf(leaf(10.0, 2.0), 20);
        assert!((r.accuracy() - 0.8).abs() < 1e-12);
        assert!((r.coverage() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_leaf_has_zero_accuracy() {
        let r = Rule::from_leaf(leaf(0.0, 0.0), 20);
        assert_eq!(r.accuracy(), 0.0);
        assert_eq!(r.coverage(), 0.0);
    }

    #[test]
    fn duplicates_ignore_condition_text() {
        let a = rule("x < 1", 0, 0.9, 0.2, 2);
        let b = rule("y > 4", 1, 0.9005, 0.2009, 2);
        assert!(a.is_duplicate_of(&b));
        assert!(b.is_duplicate_of(&a));
    }

    #[test]
    fn duplicates_require_equal_length_and_close_stats() {
        let a = rule("x < 1", 0, 0.9, 0.2, 2);
        assert!(!a.is_duplicate_of(&rule("x < 1", 0, 0.9, 0.2, 3)));
        assert!(!a.is_duplicate_of(&rule("x < 1", 0, 0.902, 0.2, 2)));
        assert!(!a.is_duplicate_of(&rule("x < 1", 0, 0.9, 0.1985, 2)));
    }

    #[test]
    fn display_rounds_ties_up() {
        let weighted = Rule::from_leaf(leaf(2.5, 0.0), 40);
        assert_eq!(weighted.to_string(), "a = 1: yes. Confidence: 1.000; Coverage: 0.063 (3 records);");

        let half = Rule::from_leaf(leaf(0.5, 0.0), 8);
        assert_eq!(half.to_string(), "a = 1: yes. Confidence: 1.000; Coverage: 0.063 (1 records);");
    }

    #[test]
    fn display_matches_report_line() {
        let r = Rule::from_leaf(leaf(10.0, 2.0), 20);
        assert_eq!(r.to_string(), "a = 1: yes. Confidence: 0.800; Coverage: 0.500 (10 records);");
    }
}
