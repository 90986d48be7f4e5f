use crate::engine::{self, Criteria, Extractor, RunMetrics};
use crate::report;
use crate::{BuildStatus, ClassAttribute, ModelKind, RuleSet, SkipReason, SortMode};
use std::time::Instant;
use tracing::{info, instrument};

/// Smallest positive `f64`. Used as the prune floor, it removes exactly the
/// rules whose accuracy is zero.
pub const MIN_POSITIVE_ACCURACY: f64 = f64::from_bits(1);

/// Options that affect selection and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Criteria a rule must meet relative to its class mean. At least one
    /// must be set.
    pub criteria: Criteria,
    /// Remove low-accuracy rules before class means are computed.
    pub prune_zero_accuracy: bool,
    /// Rules with accuracy strictly below this floor are pruned.
    pub prune_floor: f64,
    pub sort: SortMode,
    pub group_by_class: bool,
    /// Append the source dump after the selected rules in the report.
    pub print_forest: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            criteria: Criteria::default(),
            prune_zero_accuracy: true,
            prune_floor: MIN_POSITIVE_ACCURACY,
            sort: SortMode::default(),
            group_by_class: true,
            print_forest: false,
        }
    }
}

/// A trained forest as handed over by the host toolkit.
#[derive(Debug, Clone)]
pub struct ForestDump {
    /// Model identifier, e.g. `sysfor` or `weka.classifiers.trees.ForestPA`.
    pub model: String,
    /// The model's textual self-description.
    pub text: String,
    /// Number of training records; the denominator of rule coverage.
    pub total_records: usize,
    /// Number of attributes in the training data, class included.
    pub num_attributes: usize,
    pub classes: ClassAttribute,
    /// Whether a RandomForest printed its individual trees.
    pub trees_printed: bool,
}

impl ForestDump {
    pub fn new(
        model: impl Into<String>,
        text: impl Into<String>,
        total_records: usize,
        num_attributes: usize,
        classes: ClassAttribute,
    ) -> Self {
        ForestDump {
            model: model.into(),
            text: text.into(),
            total_records,
            num_attributes,
            classes,
            trees_printed: true,
        }
    }

    pub fn with_trees_printed(mut self, printed: bool) -> Self {
        self.trees_printed = printed;
        self
    }
}

/// Outcome of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub model: ModelKind,
    /// Distinct rules found in the forest, before pruning and selection.
    pub rules_found: usize,
    /// The selected rules.
    pub rules: RuleSet,
    pub metrics: RunMetrics,
}

/// Extract rules from `dump` with default [`Options`].
pub fn extract(dump: &ForestDump) -> Result<Extraction, SkipReason> {
    extract_with(dump, &Options::default())
}

/// Extract rules from `dump` and select them according to `options`.
///
/// A pure function of its inputs: the same dump and options always produce
/// the same rules in the same order.
#[instrument(skip_all, fields(model = %dump.model))]
pub fn extract_with(dump: &ForestDump, options: &Options) -> Result<Extraction, SkipReason> {
    let start = Instant::now();
    let kind = check(dump, options)?;

    let (raw, parse) = Extractor::new(&dump.text, kind).run(dump.total_records, &dump.classes);
    let rules_found = raw.len();

    let candidates = if options.prune_zero_accuracy { raw.filter_accuracy_at_least(options.prune_floor) } else { raw };
    let pruned = rules_found - candidates.len();

    let (rules, selection) = engine::select(&candidates, dump.classes.num_values(), options.criteria);

    let metrics = RunMetrics { parse, pruned, selection, total: start.elapsed() };
    info!(rules_found, pruned, selected = rules.len(), skipped_leaves = metrics.parse.skipped(), "extraction done");

    Ok(Extraction { model: kind, rules_found, rules, metrics })
}

/// Decide whether extraction can run.
///
/// When several conditions hold, the most specific wins: an incompatible
/// RandomForest beats missing criteria, which beats a trivial or empty
/// dataset, which beats an unknown model.
fn check(dump: &ForestDump, options: &Options) -> Result<ModelKind, SkipReason> {
    let kind = dump.model.parse::<ModelKind>().ok();

    if kind == Some(ModelKind::RandomForest) && !dump.trees_printed {
        return Err(SkipReason::IncompatibleSourceModel);
    }
    if options.criteria.is_empty() {
        return Err(SkipReason::NoCriteriaSelected);
    }
    if dump.num_attributes < 2 {
        return Err(SkipReason::TrivialDataset { attributes: dump.num_attributes });
    }
    if dump.total_records == 0 {
        return Err(SkipReason::EmptyDataset);
    }
    kind.ok_or_else(|| SkipReason::UnsupportedModel { model: dump.model.clone() })
}

/// Stateful wrapper around [`extract_with`] that remembers the outcome of the
/// last build for reporting.
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    options: Options,
    status: BuildStatus,
    extraction: Option<Extraction>,
    forest: Option<String>,
}

impl Default for RuleExtractor {
    fn default() -> Self {
        RuleExtractor::new(Options::default())
    }
}

impl RuleExtractor {
    pub fn new(options: Options) -> Self {
        RuleExtractor { options, status: BuildStatus::Unbuilt, extraction: None, forest: None }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn status(&self) -> &BuildStatus {
        &self.status
    }

    /// The last successful extraction, if the current status is `Built`.
    pub fn extraction(&self) -> Option<&Extraction> {
        self.extraction.as_ref()
    }

    pub fn rules(&self) -> Option<&RuleSet> {
        self.extraction.as_ref().map(|e| &e.rules)
    }

    /// Run extraction, replacing any previous outcome.
    pub fn build(&mut self, dump: &ForestDump) -> &BuildStatus {
        match extract_with(dump, &self.options) {
            Ok(extraction) => {
                self.extraction = Some(extraction);
                self.forest = self.options.print_forest.then(|| dump.text.clone());
                self.status = BuildStatus::Built;
            }
            Err(reason) => {
                info!(%reason, "extraction skipped");
                self.extraction = None;
                self.forest = None;
                self.status = BuildStatus::Skipped(reason);
            }
        }
        &self.status
    }

    /// Human-readable report: the selected rules, or why there are none.
    pub fn report(&self) -> String {
        match (&self.status, &self.extraction) {
            (BuildStatus::Built, Some(extraction)) => {
                let mut out = report::render(extraction, &self.options);
                if let Some(forest) = &self.forest {
                    out.push('\n');
                    out.push_str(forest);
                }
                out
            }
            (BuildStatus::Skipped(reason), _) => report::render_skipped(reason),
            _ => report::render_unbuilt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSFOR: &str = "\
outlook = sunny
|   humidity <= 75: yes {yes,2.0;no,0.0} (2.0)
|   humidity > 75: no {yes,0.0;no,3.0} (3.0)
outlook = overcast: yes {yes,4.0;no,0.0} (4.0)
outlook = rainy
|   windy = TRUE: no {yes,1.0;no,1.0} (2.0/1.0)
|   windy = FALSE: yes {yes,2.0;no,1.0} (3.0/1.0)
outlook = foggy: no {yes,0.0;no,0.0} (0.0)";

    fn dump(model: &str) -> ForestDump {
        ForestDump::new(model, SYSFOR, 14, 5, ClassAttribute::new(["yes", "no"]))
    }

    #[test]
    fn default_pipeline_selects_per_class() {
        let extraction = extract(&dump("sysfor")).unwrap();
        assert_eq!(extraction.model, ModelKind::SysFor);
        assert_eq!(extraction.rules_found, 6);
        assert_eq!(extraction.metrics.pruned, 1);

        let selected: Vec<&str> = extraction.rules.iter().map(|r| r.condition()).collect();
        assert_eq!(selected, vec!["outlook = overcast", "outlook = sunny && humidity > 75"]);
    }

    #[test]
    fn zero_accuracy_rules_lower_the_means_when_not_pruned() {
        let options = Options { prune_zero_accuracy: false, ..Options::default() };
        let extraction = extract_with(&dump("sysfor"), &options).unwrap();
        assert_eq!(extraction.metrics.pruned, 0);
        let class_no = &extraction.metrics.selection.classes[1];
        assert_eq!(class_no.candidates, 3);
        assert_eq!(class_no.mean_accuracy, Some(0.5));
    }

    #[test]
    fn prune_floor_is_inclusive() {
        let text = "a = 1: yes (2.0/1.0)\na = 2: yes (100.0/51.0)\na = 3: no (4.0)";
        let dump = ForestDump::new("sysfor", text, 200, 3, ClassAttribute::new(["yes", "no"]));
        let options = Options { prune_floor: 0.5, ..Options::default() };

        let extraction = extract_with(&dump, &options).unwrap();
        assert_eq!(extraction.rules_found, 3);
        assert_eq!(extraction.metrics.pruned, 1);
        assert_eq!(extraction.metrics.selection.classes[0].candidates, 1);

        let conditions: Vec<&str> = extraction.rules.iter().map(|r| r.condition()).collect();
        assert_eq!(conditions, vec!["a = 1", "a = 3"]);
    }

    #[test]
    fn skip_reasons() {
        assert_eq!(
            extract(&dump("j48")).unwrap_err(),
            SkipReason::UnsupportedModel { model: "j48".to_string() }
        );

        let mut trivial = dump("sysfor");
        trivial.num_attributes = 1;
        assert_eq!(extract(&trivial).unwrap_err(), SkipReason::TrivialDataset { attributes: 1 });

        let mut empty = dump("sysfor");
        empty.total_records = 0;
        assert_eq!(extract(&empty).unwrap_err(), SkipReason::EmptyDataset);

        let none = Options { criteria: Criteria::empty(), ..Options::default() };
        assert_eq!(extract_with(&dump("sysfor"), &none).unwrap_err(), SkipReason::NoCriteriaSelected);

        let silent_rf = dump("randomforest").with_trees_printed(false);
        assert_eq!(extract(&silent_rf).unwrap_err(), SkipReason::IncompatibleSourceModel);
    }

    #[test]
    fn skip_reason_precedence() {
        let mut both = dump("randomforest").with_trees_printed(false);
        both.num_attributes = 1;
        let none = Options { criteria: Criteria::empty(), ..Options::default() };
        assert_eq!(extract_with(&both, &none).unwrap_err(), SkipReason::IncompatibleSourceModel);

        let mut trivial_unknown = dump("j48");
        trivial_unknown.num_attributes = 1;
        assert_eq!(extract(&trivial_unknown).unwrap_err(), SkipReason::TrivialDataset { attributes: 1 });
    }

    #[test]
    fn extractor_tracks_status() {
        let mut extractor = RuleExtractor::default();
        assert_eq!(extractor.status(), &BuildStatus::Unbuilt);
        assert!(extractor.report().contains("not built"));

        assert!(extractor.build(&dump("sysfor")).is_built());
        assert_eq!(extractor.rules().map(RuleSet::len), Some(2));

        extractor.build(&dump("j48"));
        assert!(matches!(extractor.status(), BuildStatus::Skipped(SkipReason::UnsupportedModel { .. })));
        assert!(extractor.rules().is_none());
        assert!(extractor.report().contains("RandomForest, SysFor or ForestPA"));
    }

    #[test]
    fn print_forest_appends_dump() {
        let mut extractor = RuleExtractor::new(Options { print_forest: true, ..Options::default() });
        extractor.build(&dump("sysfor"));
        assert!(extractor.report().ends_with(SYSFOR));
    }
}
