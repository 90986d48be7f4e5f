//! SysFor trees.
//!
//! ```text
//! outlook = sunny
//! |   humidity <= 75: yes {yes,2.0;no,0.0} (2.0)
//! |   humidity > 75: no {yes,0.0;no,3.0} (3.0)
//! outlook = overcast: yes {yes,4.0;no,0.0} (4.0/1.0)
//! ```
//!
//! The only grammar that prints a per-leaf class distribution. Rule length is
//! the plain number of conjuncts.

use super::Grammar;
use crate::ModelKind;
use once_cell::sync::Lazy;

pub(crate) static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    grammar! {
        kind: ModelKind::SysFor,
        leaf: "(",
        depth: "|",
        indent: r"(?:\|   )+",
        terminal: r#"^(?P<condition>.+): (?P<label>[a-zA-Z0-9_!@#$%^*~'"&-]+)(?: \{(?P<distribution>[^{}]+)\})? \((?P<records>[0-9.]+)(?:/(?P<misclassified>[0-9.]+))?\)$"#,
    }
});
