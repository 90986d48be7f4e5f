//! Dump grammars.
//!
//! Each supported forest prints its trees in its own textual layout. All of
//! them encode depth through repeated indentation blocks and print one leaf
//! per line, so a grammar is fully described by:
//!
//! - the marker that identifies a leaf line,
//! - the marker counted to get a line's depth,
//! - the pattern of one run of indentation blocks (replaced by `" && "`),
//! - the pattern of a complete root-to-leaf path,
//! - how many conjuncts the leaf assignment itself adds to the rule length.
//!
//! The path reconstruction itself lives in `engine/paths.rs` and is shared.

mod forest_pa;
mod random_forest;
mod sysfor;


use crate::ModelKind;
use regex::Regex;

#[derive(Debug)]
pub(crate) struct Grammar {
    pub kind: ModelKind,
    pub leaf_marker: &'static str,
    pub depth_marker: &'static str,
    pub indent_run: &'static Regex,
    /// Captures `condition`, `label`, `records` and optionally
    /// `misclassified` and `distribution`.
    pub terminal: &'static Regex,
    pub length_offset: usize,
}

impl Grammar {
    pub fn is_leaf(&self, line: &str) -> bool {
        line.contains(self.leaf_marker)
    }

    pub fn depth(&self, line: &str) -> usize {
        line.matches(self.depth_marker).count()
    }
}

pub(crate) fn for_model(kind: ModelKind) -> &'static Grammar {
    match kind {
        ModelKind::SysFor => &sysfor::GRAMMAR,
        ModelKind::ForestPa => &forest_pa::GRAMMAR,
        ModelKind::RandomForest => &random_forest::GRAMMAR,
    }
}
