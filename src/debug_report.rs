use forestex::{ClassSummary, Extraction, ForestDump};

/// ANSI styling for the trace, a no-op when colour is off.
mod ansi {
    #[derive(Debug, Clone, Copy)]
    pub enum Style {
        Headline,
        Dim,
        Count,
        Good,
        Key,
        Banner,
        Rule,
    }

    impl Style {
        fn code(self) -> &'static str {
            match self {
                Style::Dim => "2",
                Style::Good => "32",
                Style::Count => "33",
                Style::Key => "34",
                Style::Banner => "1;36",
                Style::Rule => "90",
                Style::Headline => "1;32",
            }
        }
    }

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
            if self.enabled { format!("\x1b[{}m{}\x1b[0m", style.code(), s.as_ref()) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.paint(s, Style::Dim)
        }

        pub fn section(&self, title: &str) -> String {
            self.paint(format!("━━━ {title} ━━━"), Style::Rule)
        }
    }
}

use ansi::{Palette, Style};

pub fn print_run(dump: &ForestDump, extraction: &Extraction, color: bool) {
    let palette = Palette::new(color);
    let title = format!("⚙  Extracting: {} ({} records)", extraction.model, dump.total_records);
    println!("\n{}", palette.paint(title, Style::Banner));

    println!("\n{}", palette.section("Extraction"));
    print_extraction(extraction, &palette);

    println!("\n{}", palette.section("Selection"));
    let classes = &extraction.metrics.selection.classes;
    if classes.iter().all(|c| c.candidates == 0) {
        println!("{}", palette.dim("  No candidate rules"));
        println!("\n{}", palette.paint("Possible reasons:", Style::Count));
        println!("  • Leaf lines did not match the model's dump layout (check --model)");
        println!("  • Leaf labels are not among --classes");
        println!("  • Every rule had zero accuracy and was pruned (try --keep-zero)");
    } else {
        for summary in classes {
            let label = dump.classes.label(summary.class_index).unwrap_or("?");
            print_class(label, summary, &palette);
        }
    }

    let metrics = &extraction.metrics;
    println!("\n{}", palette.section("Timing"));
    println!(
        "  Total: {}  │  Parse: {}  │  Selection: {}",
        palette.paint(format!("{:?}", metrics.total), Style::Good),
        palette.paint(format!("{:?}", metrics.parse.elapsed), Style::Key),
        palette.dim(format!("{:?}", metrics.selection.elapsed)),
    );
    println!();
}

fn print_extraction(extraction: &Extraction, palette: &Palette) {
    let parse = &extraction.metrics.parse;
    let count = |label: &str, n: usize| {
        let value = if n > 0 { palette.paint(n.to_string(), Style::Count) } else { palette.dim(n.to_string()) };
        format!("{} {}", palette.paint(label, Style::Key), value)
    };

    println!(
        "  {}  {}  {}",
        count("leaf lines:", parse.leaf_lines),
        palette.dim("│"),
        palette.paint(format!("✓ {} distinct rules", parse.rules), Style::Good)
    );
    println!(
        "    {}  {}  {}  {}",
        count("orphaned:", parse.orphaned),
        count("unparseable:", parse.unparseable),
        count("unknown class:", parse.unknown_class),
        count("duplicates:", parse.duplicates),
    );
    println!("    {}", count("pruned (below floor):", extraction.metrics.pruned));
    println!(
        "  {} {}",
        palette.paint("selected:", Style::Key),
        palette.paint(extraction.rules.len().to_string(), Style::Headline)
    );
}

fn print_class(label: &str, summary: &ClassSummary, palette: &Palette) {
    let threshold = |value: Option<f64>| match value {
        Some(v) => palette.paint(format!("{v:.5}"), Style::Count),
        None => palette.dim("-"),
    };

    println!(
        "  {} {} {}",
        palette.paint(format!("[{}]", summary.class_index), Style::Rule),
        palette.paint(label, Style::Headline),
        palette.dim(format!("│ {} of {} selected", summary.selected, summary.candidates)),
    );
    if summary.candidates > 0 {
        println!(
            "      {} {}  {} {}  {} {}",
            palette.dim("acc ≥"),
            threshold(summary.mean_accuracy),
            palette.dim("cov ≥"),
            threshold(summary.mean_coverage),
            palette.dim("len ≤"),
            threshold(summary.mean_length),
        );
    }
}
