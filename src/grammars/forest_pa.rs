//! ForestPA trees.
//!
//! ```text
//! outlook = rainy
//! |  windy = TRUE: no(2.0/0.0)
//! |  windy = FALSE: yes(3.0/1.0)
//! ```
//!
//! Leaves are recognised by the slash of their `(records/misclassified)`
//! block and indentation blocks are two spaces wide.

use super::Grammar;
use crate::ModelKind;
use once_cell::sync::Lazy;

pub(crate) static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    grammar! {
        kind: ModelKind::ForestPa,
        leaf: "/",
        depth: "|  ",
        indent: r"(?:\|  )+",
        terminal: r#"^(?P<condition>.+): (?P<label>[a-zA-Z0-9_!@#$%^*~'"&-]+)\((?P<records>[0-9.]+)(?:/(?P<misclassified>[0-9.]+))?\)$"#,
        length_offset: 1,
    }
});
