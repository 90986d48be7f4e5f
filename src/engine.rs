//! Extraction and selection engine.
//!
//! ## How the parts work together
//!
//! ```text
//! dump ── grammars::for_model(kind) ─┐
//!                                   v
//!                     paths::leaf_paths          (paths.rs)
//!                       - find leaf lines
//!                       - climb to the depth-0 ancestor
//!                       - indentation runs -> " && "
//!                                   │
//!                                   v
//!                     resolve::resolve_leaf      (resolve.rs)
//!                       - grammar terminal pattern
//!                       - counts, label, distribution
//!                                   │
//!                                   v
//!                     RuleSet (dedup.rs index)   raw rules
//!                                   │
//!                                   v
//!                     select::select             (select.rs)
//!                       - per-class means
//!                       - intersect criteria, union classes
//! ```
//!
//! ## Responsibilities by module
//!
//! - `paths.rs`: the one grammar-agnostic path reconstruction routine.
//! - `resolve.rs`: path string -> leaf fields, per grammar pattern.
//! - `extract.rs`: [`Extractor`], ties the two together and counts drops.
//! - `dedup.rs`: hash index consistent with the rule duplicate relation.
//! - `select.rs`: the per-class selection and [`Criteria`] flags.
//! - `metrics.rs`: counts and timings surfaced to callers.
//!
//! ## Debugging
//!
//! Every stage emits `tracing` events: dropped leaves at `warn`, per-stage
//! counts and per-class thresholds at `debug`.

#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/paths.rs"]
mod paths;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/select.rs"]
mod select;

pub(crate) use dedup::DedupIndex;
pub use extract::Extractor;
pub use metrics::{ClassSummary, ParseMetrics, RunMetrics, SelectionMetrics};
pub use select::Criteria;
pub(crate) use select::select;
