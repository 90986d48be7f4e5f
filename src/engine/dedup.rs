//! Hash index for rule-set membership.
//!
//! Rule sets are sets under [`Rule::is_duplicate_of`]: accuracy and coverage
//! within a tolerance, equal length. That relation is not an equivalence, so
//! it cannot be hashed directly. Instead every rule is filed under a
//! `RuleKey` that quantises accuracy and coverage to tolerance-wide buckets.
//! Two duplicates always land in buckets at most one apart on each axis; a
//! lookup probes the surrounding buckets and confirms every candidate with the
//! predicate itself.
//!
//! ## Condition text
//!
//! The condition text never contributes to the key. Mixing it in (for example
//! through a character-sorted copy of the text) would produce a key that
//! disagrees with the duplicate relation in both directions.

use crate::Rule;
use crate::rule::DUPLICATE_TOLERANCE;
use std::collections::HashMap;

/// Buckets probed on each side of a key. One neighbour covers the tolerance;
/// the second absorbs rounding in the quantisation.
const PROBE_RADIUS: i64 = 2;

/// Quantised view of the fields compared by the duplicate relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RuleKey {
    pub(crate) accuracy: i64,
    pub(crate) coverage: i64,
    pub(crate) length: usize,
}

impl RuleKey {
    pub(crate) fn from_rule(rule: &Rule) -> Self {
        RuleKey { accuracy: bucket(rule.accuracy()), coverage: bucket(rule.coverage()), length: rule.length() }
    }

    fn neighbours(self) -> impl Iterator<Item = RuleKey> {
        (-PROBE_RADIUS..=PROBE_RADIUS).flat_map(move |da| {
            (-PROBE_RADIUS..=PROBE_RADIUS).map(move |dc| RuleKey {
                accuracy: self.accuracy.saturating_add(da),
                coverage: self.coverage.saturating_add(dc),
                length: self.length,
            })
        })
    }
}

fn bucket(value: f64) -> i64 {
    (value / DUPLICATE_TOLERANCE).floor() as i64
}

/// Positions of rules in a backing slice, grouped by [`RuleKey`].
#[derive(Debug, Clone, Default)]
pub(crate) struct DedupIndex {
    buckets: HashMap<RuleKey, Vec<usize>>,
}

impl DedupIndex {
    /// Position in `rules` of a duplicate of `rule`, if any.
    pub(crate) fn find(&self, rules: &[Rule], rule: &Rule) -> Option<usize> {
        RuleKey::from_rule(rule)
            .neighbours()
            .filter_map(|key| self.buckets.get(&key))
            .flatten()
            .copied()
            .find(|&pos| rules[pos].is_duplicate_of(rule))
    }

    pub(crate) fn insert(&mut self, rule: &Rule, position: usize) {
        self.buckets.entry(RuleKey::from_rule(rule)).or_default().push(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::tests::rule;

    #[test]
    fn key_ignores_condition_text() {
        let a = rule("x < 1 && y = b", 0, 0.75, 0.1, 3);
        let b = rule("y = b && x < 1", 0, 0.75, 0.1, 3);
        let c = rule("completely different", 1, 0.75, 0.1, 3);
        assert_eq!(RuleKey::from_rule(&a), RuleKey::from_rule(&b));
        assert_eq!(RuleKey::from_rule(&a), RuleKey::from_rule(&c));
    }

    #[test]
    fn finds_duplicates_across_bucket_boundaries() {
        // 0.4999 and 0.5005 sit in different buckets but are within tolerance.
        let stored = vec![rule("a", 0, 0.4999, 0.2, 2)];
        let mut index = DedupIndex::default();
        index.insert(&stored[0], 0);

        assert_eq!(index.find(&stored, &rule("b", 0, 0.5005, 0.2, 2)), Some(0));
        assert_eq!(index.find(&stored, &rule("c", 0, 0.5011, 0.2, 2)), None);
        assert_eq!(index.find(&stored, &rule("d", 0, 0.4999, 0.2, 3)), None);
    }

    #[test]
    fn extreme_statistics_do_not_overflow_the_probe() {
        let stored = vec![rule("huge", 0, 1.0, f64::MAX, 1), rule("tiny", 0, 1.0, -f64::MAX, 1)];
        let mut index = DedupIndex::default();
        index.insert(&stored[0], 0);
        index.insert(&stored[1], 1);

        assert_eq!(index.find(&stored, &rule("huge-again", 1, 1.0, f64::MAX, 1)), Some(0));
        assert_eq!(index.find(&stored, &rule("tiny-again", 1, 1.0, -f64::MAX, 1)), Some(1));
        assert_eq!(index.find(&stored, &rule("nan", 0, 1.0, f64::NAN, 1)), None);
    }
}
