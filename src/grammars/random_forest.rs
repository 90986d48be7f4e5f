//! RandomForest trees (printed with per-tree output enabled).
//!
//! ```text
//! petallength < 2.45 : Iris-setosa (33/0)
//! petallength >= 2.45
//! |   petalwidth < 1.75 : Iris-versicolor (35/3)
//! |   petalwidth >= 1.75 : Iris-virginica (32/1)
//! ```

use super::Grammar;
use crate::ModelKind;
use once_cell::sync::Lazy;

pub(crate) static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    grammar! {
        kind: ModelKind::RandomForest,
        leaf: "(",
        depth: "|",
        indent: r"(?:\|   )+",
        terminal: r#"^(?P<condition>.+) : (?P<label>[a-zA-Z0-9_!@#$%^*~'"&-]+) \((?P<records>[0-9.]+)(?:/(?P<misclassified>[0-9.]+))?\)$"#,
        length_offset: 1,
    }
});
