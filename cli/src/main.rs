//! unoutline CLI - PDF title and outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unoutline::{
    render, CueSet, HeadingStrategy, JsonFormat, OutlineOrder, SourceRegistry, SpanDump,
    Unoutline,
};

/// Container-style defaults used when no directories are given.
const DEFAULT_INPUT: &str = "/app/input";
const DEFAULT_OUTPUT: &str = "/app/output";

#[derive(Parser)]
#[command(name = "unoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer PDF titles and heading outlines as JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF or span dump in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT", env = "UNOUTLINE_INPUT", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output directory for <stem>.json records
        #[arg(value_name = "OUTPUT", env = "UNOUTLINE_OUTPUT", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Infer the outline of a single file
    File {
        /// Input PDF or span dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Write the decoded text spans of a PDF as a span dump
    Dump {
        /// Input PDF
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Options shared by commands that infer outlines.
#[derive(Args)]
struct OutlineArgs {
    /// Ordering of outline entries
    #[arg(long, value_enum, default_value = "page")]
    order: OrderArg,

    /// Cue-phrase rule set
    #[arg(long, value_enum, default_value = "standard")]
    cues: CuesArg,

    /// Heading assignment strategy
    #[arg(long, value_enum, default_value = "statistical")]
    strategy: StrategyArg,

    /// Fail on the first unreadable PDF page
    #[arg(long)]
    strict: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    /// Reading order: page, then level
    Page,
    /// Grouped by level, then page
    Level,
}

impl From<OrderArg> for OutlineOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Page => OutlineOrder::PageMajor,
            OrderArg::Level => OutlineOrder::LevelMajor,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CuesArg {
    /// Appendix headers, phase labels and numbered sections
    Standard,
    /// Digital-library request-for-proposal vocabulary
    Rfp,
    /// No cue phrases; size and style only
    None,
}

impl From<CuesArg> for CueSet {
    fn from(cues: CuesArg) -> Self {
        match cues {
            CuesArg::Standard => CueSet::standard(),
            CuesArg::Rfp => CueSet::digital_library_rfp(),
            CuesArg::None => CueSet::empty(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Body-size baseline, cue phrases and size ratios
    Statistical,
    /// Absolute cutoffs: H1 >= 18pt, H2 >= 14pt, H3 >= 12pt
    Fixed,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON outline record
    Json,
    /// Indented table of contents
    Text,
    /// Markdown list
    Markdown,
}

impl Default for OutlineArgs {
    fn default() -> Self {
        Self {
            order: OrderArg::Page,
            cues: CuesArg::Standard,
            strategy: StrategyArg::Statistical,
            strict: false,
        }
    }
}

impl OutlineArgs {
    fn builder(&self) -> Unoutline {
        let mut builder = Unoutline::new()
            .with_order(self.order.into())
            .with_cues(self.cues.into());
        if self.strategy == StrategyArg::Fixed {
            builder = builder.with_strategy(HeadingStrategy::FixedThresholds(Default::default()));
        }
        if self.strict {
            builder = builder.strict();
        }
        builder
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
            outline,
        }) => cmd_batch(&input, &output, sequential, compact, &outline),
        Some(Commands::File {
            input,
            output,
            format,
            compact,
            outline,
        }) => cmd_file(&input, output.as_deref(), format, compact, &outline),
        Some(Commands::Dump { input, output }) => cmd_dump(&input, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            let input = env_path("UNOUTLINE_INPUT", DEFAULT_INPUT);
            let output = env_path("UNOUTLINE_OUTPUT", DEFAULT_OUTPUT);
            cmd_batch(&input, &output, false, false, &OutlineArgs::default())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    outline: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = outline.builder().with_format(json_format(compact));
    if sequential {
        builder = builder.sequential();
    }
    let runner = builder.batch();

    let paths = runner.collect_inputs(input)?;
    log::debug!("Collected {} inputs from {}", paths.len(), input.display());
    if paths.is_empty() {
        println!("{} {}", "No PDF or span dump files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let items = runner.process_paths_with(&paths, |item| {
        pb.set_message(unoutline::file_stem(&item.path));
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let written = runner.write_records(&items, output)?;
    let failed: Vec<_> = items.iter().filter(|item| !item.is_ok()).collect();

    println!(
        "\n{} {} records written to {}",
        "Done!".green().bold(),
        written.len(),
        output.display()
    );
    for item in &items {
        let marker = if item.is_ok() { "├─".dimmed() } else { "├─".red() };
        println!(
            "  {} {} ({} headings)",
            marker,
            item.output_name(),
            item.document.heading_count()
        );
    }
    if !failed.is_empty() {
        println!(
            "{} {} file(s) could not be read and got fallback records",
            "Warning:".yellow().bold(),
            failed.len()
        );
        for item in failed {
            println!(
                "  {} {}: {}",
                "└─".dimmed(),
                item.path.display(),
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    outline: &OutlineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = outline.builder().extract_file(input)?;

    let content = match format {
        OutputFormat::Json => render::to_json(&doc, json_format(compact))?,
        OutputFormat::Text => render::to_text(&doc),
        OutputFormat::Markdown => render::to_markdown(&doc),
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_dump(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let spans = SourceRegistry::with_defaults().read(input)?;
    let json = serde_json::to_string_pretty(&SpanDump::from_spans(&spans))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} spans to {}",
            "Saved".green(),
            spans.len(),
            path.display()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline inference tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unoutline".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_defaults() {
        let cli = Cli::parse_from(["unoutline", "batch"]);
        match cli.command {
            Some(Commands::Batch {
                input,
                output,
                sequential,
                outline,
                ..
            }) => {
                assert!(!sequential);
                assert!(outline.order == OrderArg::Page);
                // Environment overrides are allowed in CI
                if std::env::var_os("UNOUTLINE_INPUT").is_none() {
                    assert_eq!(input, PathBuf::from("/app/input"));
                }
                if std::env::var_os("UNOUTLINE_OUTPUT").is_none() {
                    assert_eq!(output, PathBuf::from("/app/output"));
                }
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_file_options() {
        let cli = Cli::parse_from([
            "unoutline",
            "file",
            "report.pdf",
            "--format",
            "markdown",
            "--order",
            "level",
            "--cues",
            "rfp",
            "--strategy",
            "fixed",
        ]);
        let Some(Commands::File { format, outline, .. }) = cli.command else {
            panic!("expected file command");
        };
        assert!(format == OutputFormat::Markdown);
        assert_eq!(OutlineOrder::from(outline.order), OutlineOrder::LevelMajor);
        assert!(!CueSet::from(outline.cues).is_empty());
        assert!(outline.strategy == StrategyArg::Fixed);
    }

    #[test]
    fn test_cmd_batch_writes_records() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();

        let cli = Cli::parse_from(["unoutline", "batch", "in", "out"]);
        let Some(Commands::Batch { outline, .. }) = cli.command else {
            panic!("expected batch command");
        };
        cmd_batch(input.path(), output.path(), true, true, &outline).unwrap();

        let record = fs::read_to_string(output.path().join("broken.json")).unwrap();
        assert_eq!(record, r#"{"title":"broken","outline":[]}"#);
    }

    #[test]
    fn test_cmd_batch_missing_input() {
        let output = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["unoutline", "batch", "in", "out"]);
        let Some(Commands::Batch { outline, .. }) = cli.command else {
            panic!("expected batch command");
        };
        let result = cmd_batch(Path::new("/no/such/input"), output.path(), true, false, &outline);
        assert!(result.is_err());
    }
}
