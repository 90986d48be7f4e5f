mod debug_report;

use anyhow::{Context, Result, bail};
use clap::Parser;
use forestex::{ClassAttribute, Criteria, ForestDump, Options, RuleExtractor, SortMode, render_json};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;

/// Extract a small, explainable rule set from a decision-forest dump.
///
/// Exit codes: 0 when a report was printed (including a report explaining why
/// no rules were extracted), 1 on I/O errors or an empty dump, 2 on invalid
/// arguments.
#[derive(Parser, Debug)]
#[command(name = "forestex")]
#[command(version)]
struct Cli {
    /// Dump file to read; stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Source model: sysfor, forestpa, randomforest or a fully qualified
    /// class name
    #[arg(long, short)]
    model: String,

    /// Number of training records (coverage denominator)
    #[arg(long, short)]
    records: usize,

    /// Number of attributes in the training data, class included
    #[arg(long, short)]
    attributes: usize,

    /// Class values in attribute order, comma separated
    #[arg(long, short, value_delimiter = ',', required = true)]
    classes: Vec<String>,

    /// Sort rules by acc, cov or len
    #[arg(long, default_value = "acc")]
    sort: SortMode,

    /// Print one flat list instead of grouping by class value
    #[arg(long)]
    no_group: bool,

    /// Do not require accuracy at least the class mean
    #[arg(long)]
    no_accuracy: bool,

    /// Do not require coverage at least the class mean
    #[arg(long)]
    no_coverage: bool,

    /// Do not require length at most the class mean
    #[arg(long)]
    no_length: bool,

    /// Keep zero-accuracy rules when computing class means
    #[arg(long)]
    keep_zero: bool,

    /// Append the source dump to the report
    #[arg(long)]
    print_forest: bool,

    /// The RandomForest dump lacks its individual trees
    #[arg(long)]
    summary_dump: bool,

    /// Print the selected rules as JSON
    #[arg(long, conflicts_with = "trace")]
    json: bool,

    /// Print per-stage counts, class thresholds and timings after the report
    #[arg(long)]
    trace: bool,

    /// Force ANSI color in the trace output
    #[arg(long)]
    color: bool,

    /// Disable ANSI color in the trace output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all logging except errors
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let mut criteria = Criteria::all();
        criteria.set(Criteria::ACCURACY, !self.no_accuracy);
        criteria.set(Criteria::COVERAGE, !self.no_coverage);
        criteria.set(Criteria::LENGTH, !self.no_length);

        Options {
            criteria,
            prune_zero_accuracy: !self.keep_zero,
            sort: self.sort,
            group_by_class: !self.no_group,
            print_forest: self.print_forest,
            ..Options::default()
        }
    }

    fn color(&self) -> bool {
        if self.no_color {
            false
        } else {
            self.color || io::stdout().is_terminal()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let text = read_dump(cli.input.as_ref())?;
    let classes = ClassAttribute::new(cli.classes.iter().map(|c| c.trim()));
    let dump = ForestDump::new(&cli.model, text, cli.records, cli.attributes, classes)
        .with_trees_printed(!cli.summary_dump);
    debug!(model = %dump.model, records = dump.total_records, classes = dump.classes.num_values(), "dump loaded");

    let mut extractor = RuleExtractor::new(cli.options());
    extractor.build(&dump);

    match (cli.json, extractor.extraction()) {
        (true, Some(extraction)) => {
            println!("{}", render_json(extraction, extractor.options()).context("serializing rules")?);
        }
        _ => print!("{}", extractor.report()),
    }

    if cli.trace {
        if let Some(extraction) = extractor.extraction() {
            debug_report::print_run(&dump, extraction, cli.color());
        }
    }
    Ok(())
}

fn read_dump(path: Option<&PathBuf>) -> Result<String> {
    let text = match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("reading stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("no forest dump provided");
    }
    Ok(text)
}
