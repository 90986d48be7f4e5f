//! Text and JSON rendering of selected rules.
//!
//! ```text
//! There were a total of 6 rules found by the weka.classifiers.trees.SysFor classifier.
//! 2 ForEx++ Rules Discovered:
//!
//! Rules for class value yes (1 found):
//! outlook = overcast: yes. Confidence: 1.000; Coverage: 0.286 (4 records);
//! ```
//!
//! Groups follow class-index order; inside a group (or in the flat list) rules
//! follow the chosen [`SortMode`], ties keeping parse order.

use crate::{Extraction, ModelKind, Options, Rule, RuleSet, SkipReason, SortMode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Render an extraction: header line, then the selected rules.
pub fn render(extraction: &Extraction, options: &Options) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "There were a total of {} rules found by the {} classifier.",
        extraction.rules_found, extraction.model
    );
    let _ = writeln!(out, "{} ForEx++ Rules Discovered:\n", extraction.rules.len());
    out.push_str(&render_rules(&extraction.rules, options.sort, options.group_by_class));
    out
}

/// Render a rule set, one rule per line, optionally grouped by class.
pub fn render_rules(rules: &RuleSet, sort: SortMode, group_by_class: bool) -> String {
    let mut out = String::new();
    let ordered = rules.sorted(sort);

    if !group_by_class {
        for rule in ordered {
            let _ = writeln!(out, "{rule}");
        }
        return out;
    }

    let mut groups: BTreeMap<usize, Vec<&Rule>> = BTreeMap::new();
    for rule in ordered {
        groups.entry(rule.class_index()).or_default().push(rule);
    }

    for group in groups.values() {
        let label = group.first().map(|r| r.class_label()).unwrap_or_default();
        let _ = writeln!(out, "Rules for class value {} ({} found):", label, group.len());
        for rule in group {
            let _ = writeln!(out, "{rule}");
        }
        out.push_str("\n\n");
    }
    out
}

pub(crate) fn render_skipped(reason: &SkipReason) -> String {
    format!("ForEx++ not built!\n{}.", capitalize(&reason.to_string()))
}

pub(crate) fn render_unbuilt() -> String {
    "ForEx++ not built yet: no forest has been processed.".to_string()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    model: ModelKind,
    rules_found: usize,
    rules_selected: usize,
    skipped_leaves: usize,
    rules: Vec<&'a Rule>,
}

/// Render the selected rules as JSON, sorted by `options.sort`.
pub fn render_json(extraction: &Extraction, options: &Options) -> serde_json::Result<String> {
    let report = JsonReport {
        model: extraction.model,
        rules_found: extraction.rules_found,
        rules_selected: extraction.rules.len(),
        skipped_leaves: extraction.metrics.parse.skipped(),
        rules: extraction.rules.sorted(options.sort),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::rule;
    use crate::RunMetrics;

    fn selected() -> RuleSet {
        [
            rule("b = 1", 1, 0.8, 0.10, 3),
            rule("a = 1", 0, 0.9, 0.05, 2),
            rule("a = 2", 0, 1.0, 0.20, 4),
        ]
        .into_iter()
        .collect()
    }

    fn extraction() -> Extraction {
        Extraction { model: ModelKind::SysFor, rules_found: 9, rules: selected(), metrics: RunMetrics::default() }
    }

    #[test]
    fn flat_list_sorted_by_accuracy() {
        let text = render_rules(&selected(), SortMode::Accuracy, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "a = 2: c0. Confidence: 1.000; Coverage: 0.200 (20 records);",
                "a = 1: c0. Confidence: 0.900; Coverage: 0.050 (5 records);",
                "b = 1: c1. Confidence: 0.800; Coverage: 0.100 (10 records);",
            ]
        );
    }

    #[test]
    fn groups_follow_class_order_and_sort_within() {
        let text = render_rules(&selected(), SortMode::Length, true);
        let expected = "\
Rules for class value c0 (2 found):
a = 1: c0. Confidence: 0.900; Coverage: 0.050 (5 records);
a = 2: c0. Confidence: 1.000; Coverage: 0.200 (20 records);


Rules for class value c1 (1 found):
b = 1: c1. Confidence: 0.800; Coverage: 0.100 (10 records);


";
        assert_eq!(text, expected);
    }

    #[test]
    fn header_reports_found_and_selected_counts() {
        let text = render(&extraction(), &Options { group_by_class: false, ..Options::default() });
        assert!(text.starts_with(
            "There were a total of 9 rules found by the weka.classifiers.trees.SysFor classifier.\n\
             3 ForEx++ Rules Discovered:\n\n"
        ));
    }

    #[test]
    fn skipped_report_names_the_reason() {
        let text = render_skipped(&SkipReason::NoCriteriaSelected);
        assert!(text.starts_with("ForEx++ not built!\nSelect at least one criterion"));
    }

    #[test]
    fn json_lists_sorted_rules() {
        let json = render_json(&extraction(), &Options { sort: SortMode::Coverage, ..Options::default() }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"], "SysFor");
        assert_eq!(value["rules_selected"], 3);
        assert_eq!(value["rules"][0]["condition"], "a = 2");
        assert_eq!(value["rules"][2]["length"], 2);
    }
}
