use crate::engine::DedupIndex;
use crate::rule::round_half_up;
use crate::{Rule, SortMode};
use std::cmp::Ordering;

/// A set of rules under [`Rule::is_duplicate_of`].
///
/// Every filter and set operation returns a new set; a set is never modified
/// once it has been handed out. Members keep their insertion order, so
/// iteration (and everything rendered from it) is deterministic. When a rule
/// duplicates one already present, the earlier rule is kept.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    index: DedupIndex,
}

impl RuleSet {
    /// Create an empty `RuleSet`.
    pub fn new() -> Self {
        RuleSet::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Return true if a duplicate of `rule` is a member.
    pub fn contains(&self, rule: &Rule) -> bool {
        self.index.find(&self.rules, rule).is_some()
    }

    // Only used while a set is being built.
    fn insert(&mut self, rule: Rule) -> bool {
        if self.contains(&rule) {
            return false;
        }
        self.index.insert(&rule, self.rules.len());
        self.rules.push(rule);
        true
    }

    // --- Statistics ---------------------------------------------------------

    /// Mean accuracy rounded to five decimals; `None` for an empty set.
    pub fn mean_accuracy(&self) -> Option<f64> {
        self.mean_of(Rule::accuracy)
    }

    /// Mean coverage rounded to five decimals; `None` for an empty set.
    pub fn mean_coverage(&self) -> Option<f64> {
        self.mean_of(Rule::coverage)
    }

    /// Mean rule length rounded to five decimals; `None` for an empty set.
    pub fn mean_length(&self) -> Option<f64> {
        self.mean_of(|r| r.length() as f64)
    }

    fn mean_of(&self, stat: impl Fn(&Rule) -> f64) -> Option<f64> {
        if self.rules.is_empty() {
            return None;
        }
        let mean = self.rules.iter().map(stat).sum::<f64>() / self.rules.len() as f64;
        Some(round5(mean))
    }

    // --- Filters ------------------------------------------------------------

    pub fn filter_accuracy_at_least(&self, threshold: f64) -> RuleSet {
        self.filter(|r| r.accuracy() >= threshold)
    }

    pub fn filter_coverage_at_least(&self, threshold: f64) -> RuleSet {
        self.filter(|r| r.coverage() >= threshold)
    }

    pub fn filter_length_at_most(&self, threshold: f64) -> RuleSet {
        self.filter(|r| r.length() as f64 <= threshold)
    }

    pub fn filter_by_class(&self, class_index: usize) -> RuleSet {
        self.filter(|r| r.class_index() == class_index)
    }

    fn filter(&self, keep: impl Fn(&Rule) -> bool) -> RuleSet {
        self.rules.iter().filter(|r| keep(r)).cloned().collect()
    }

    // --- Set algebra --------------------------------------------------------

    /// Members of `self` that have a duplicate in `other`.
    pub fn intersect(&self, other: &RuleSet) -> RuleSet {
        self.filter(|r| other.contains(r))
    }

    /// Members of `self`, followed by members of `other` not already present.
    pub fn union(&self, other: &RuleSet) -> RuleSet {
        let mut merged = self.clone();
        for rule in &other.rules {
            merged.insert(rule.clone());
        }
        merged
    }

    // --- Ordering -----------------------------------------------------------

    /// Members ordered by `mode`; ties keep insertion order.
    pub fn sorted(&self, mode: SortMode) -> Vec<&Rule> {
        let mut ordered: Vec<&Rule> = self.rules.iter().collect();
        ordered.sort_by(|a, b| compare(mode, a, b));
        ordered
    }
}

fn round5(value: f64) -> f64 {
    round_half_up(value, 5)
}

fn compare(mode: SortMode, a: &Rule, b: &Rule) -> Ordering {
    match mode {
        SortMode::Accuracy => b.accuracy().total_cmp(&a.accuracy()),
        SortMode::Coverage => b.coverage().total_cmp(&a.coverage()),
        SortMode::Length => a.length().cmp(&b.length()),
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl PartialEq for RuleSet {
    /// Set equality: every member of each side has a duplicate in the other.
    fn eq(&self, other: &RuleSet) -> bool {
        self.rules.iter().all(|r| other.contains(r)) && other.rules.iter().all(|r| self.contains(r))
    }
}
