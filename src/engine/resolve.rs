//! Leaf resolution.
//!
//! Turns a reconstructed path string into [`LeafFields`] using the grammar's
//! terminal pattern:
//!
//! ```text
//! "a = 1 && b = 2: yes {yes,3.0;no,1.0} (4.0/1.0)"
//!  └─condition──┘  └label┘└distribution┘ └records/misclassified
//! ```
//!
//! A missing `/misclassified` part means the leaf is pure.

use crate::error::LeafError;
use crate::grammars::Grammar;
use crate::rule::LeafFields;
use crate::ClassAttribute;

pub(crate) fn resolve_leaf(grammar: &Grammar, path: &str, classes: &ClassAttribute) -> Result<LeafFields, LeafError> {
    let caps = grammar.terminal.captures(path).ok_or(LeafError::NoMatch { grammar: grammar.kind.short_name() })?;

    let condition = caps["condition"].to_string();
    let label = &caps["label"];
    let records = parse_count(&caps["records"])?;
    let misclassified = match caps.name("misclassified") {
        Some(m) => parse_count(m.as_str())?,
        None => 0.0,
    };
    let distribution = caps.name("distribution").map(|m| parse_distribution(m.as_str(), classes)).transpose()?;
    let class_index = classes.index_of(label).ok_or_else(|| LeafError::UnknownClass { label: label.to_string() })?;
    let length = condition.matches("&&").count() + 1 + grammar.length_offset;

    Ok(LeafFields {
        condition,
        class_index,
        class_label: label.to_string(),
        records,
        misclassified,
        length,
        distribution,
    })
}

fn parse_count(text: &str) -> Result<f64, LeafError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LeafError::BadCount { text: text.to_string() }),
    }
}

/// `yes,3.0;no,1.0` -> `[3.0, 1.0]`, padded with zeros to the class count.
fn parse_distribution(text: &str, classes: &ClassAttribute) -> Result<Vec<f64>, LeafError> {
    let bad = || LeafError::BadDistribution { text: text.to_string() };
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut counts = vec![0.0; classes.num_values()];
    for (slot, entry) in compact.split(';').enumerate() {
        let value = entry.split(',').nth(1).ok_or_else(bad)?;
        let target = counts.get_mut(slot).ok_or_else(bad)?;
        *target = value.parse::<f64>().map_err(|_| bad())?;
    }
    Ok(counts)
}
