//! Dump -> raw rule set.
//!
//! ```text
//! Extractor::new(dump, kind)
//!   └─ run(total_records, classes)
//!        ├─ paths::leaf_paths     climb every leaf to its root
//!        ├─ resolve::resolve_leaf split the path into fields
//!        └─ Rule::from_leaf       accuracy / coverage
//! ```
//!
//! Leaves that cannot be resolved are logged and counted, never fatal.

use super::metrics::ParseMetrics;
use super::paths::leaf_paths;
use super::resolve::resolve_leaf;
use crate::error::LeafError;
use crate::grammars::{self, Grammar};
use crate::{ClassAttribute, ModelKind, Rule, RuleSet};
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Parses one dump with the grammar of its source model.
#[derive(Debug)]
pub struct Extractor<'a> {
    dump: &'a str,
    grammar: &'static Grammar,
}

impl<'a> Extractor<'a> {
    pub fn new(dump: &'a str, kind: ModelKind) -> Self {
        Extractor { dump, grammar: grammars::for_model(kind) }
    }

    /// Build the raw rule set. Coverage is relative to `total_records`; with
    /// no records it is undefined and the set is empty.
    #[instrument(skip_all, fields(model = ?self.grammar.kind, total_records = total_records))]
    pub fn run(&self, total_records: usize, classes: &ClassAttribute) -> (RuleSet, ParseMetrics) {
        let start = Instant::now();
        if total_records == 0 {
            warn!("no training records, skipping dump");
            return (RuleSet::new(), ParseMetrics { elapsed: start.elapsed(), ..ParseMetrics::default() });
        }
        let leaves = leaf_paths(self.dump, self.grammar);

        let mut metrics =
            ParseMetrics { leaf_lines: leaves.leaf_lines, orphaned: leaves.orphans, ..ParseMetrics::default() };

        let mut rules: Vec<Rule> = Vec::with_capacity(leaves.paths.len());
        for path in &leaves.paths {
            match resolve_leaf(self.grammar, path, classes) {
                Ok(leaf) => rules.push(Rule::from_leaf(leaf, total_records)),
                Err(err @ LeafError::UnknownClass { .. }) => {
                    metrics.unknown_class += 1;
                    warn!(%err, path = %path, "dropping leaf");
                }
                Err(err) => {
                    metrics.unparseable += 1;
                    warn!(%err, path = %path, "dropping leaf");
                }
            }
        }

        let parsed = rules.len();
        let set: RuleSet = rules.into_iter().collect();
        metrics.duplicates = parsed - set.len();
        metrics.rules = set.len();
        metrics.elapsed = start.elapsed();

        debug!(
            leaf_lines = metrics.leaf_lines,
            rules = metrics.rules,
            duplicates = metrics.duplicates,
            skipped = metrics.skipped(),
            "parsed dump"
        );

        (set, metrics)
    }
}
