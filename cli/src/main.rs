//! unroll CLI - electoral-roll record extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unroll::render::documents_to_rows_json;
use unroll::{
    gather_sources, DialectChoice, DialectKind, ExtractOptions, ExtractedDocument, JsonFormat,
    LookupTables, PageSource, RollExtractor, SourceDocument, TextFileSource, Vocabulary,
};

#[derive(Parser)]
#[command(name = "unroll")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract voter records from electoral-roll text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from text files or directories to JSON rows
    Extract {
        /// Input text files or directories of .txt files
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Extraction dialect
        #[arg(long, value_enum, default_value = "auto")]
        dialect: DialectArg,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Disable parallel processing
        #[arg(long)]
        sequential: bool,
    },

    /// Show header, dialect and statistics for one document
    Info {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Lookup tables JSON merged over the built-in tables
    #[arg(long, value_name = "FILE", env = "UNROLL_TABLES")]
    tables: Option<PathBuf>,

    /// Vocabulary additions JSON
    #[arg(long, value_name = "FILE", env = "UNROLL_VOCABULARY")]
    vocabulary: Option<PathBuf>,
}

impl ConfigArgs {
    fn apply(&self, mut options: ExtractOptions) -> unroll::Result<ExtractOptions> {
        if let Some(ref path) = self.tables {
            options.tables.merge(LookupTables::from_path(path)?);
        }
        if let Some(ref path) = self.vocabulary {
            options.vocabulary.merge(Vocabulary::from_path(path)?);
        }
        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DialectArg {
    /// Probe each document for field labels
    Auto,
    /// Label-driven extraction
    Labeled,
    /// Positional and keyword heuristics
    Heuristic,
}

impl From<DialectArg> for DialectChoice {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Auto => DialectChoice::Auto,
            DialectArg::Labeled => DialectChoice::Fixed(DialectKind::Labeled),
            DialectArg::Heuristic => DialectChoice::Fixed(DialectKind::Heuristic),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            inputs,
            output,
            config,
            dialect,
            compact,
            sequential,
        } => cmd_extract(
            &inputs,
            output.as_deref(),
            &config,
            dialect,
            compact,
            sequential,
        ),
        Commands::Info { input, config } => cmd_info(&input, &config),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read every source under the inputs, skipping unreadable files.
fn read_documents(inputs: &[PathBuf]) -> Result<Vec<SourceDocument>, Box<dyn std::error::Error>> {
    let mut sources: Vec<TextFileSource> = Vec::new();
    for input in inputs {
        sources.extend(gather_sources(input)?);
    }

    let mut docs = Vec::with_capacity(sources.len());
    for source in &sources {
        match source.document() {
            Ok(doc) => docs.push(doc),
            Err(e) => log::warn!("skipping {}: {}", source.path().display(), e),
        }
    }

    if docs.is_empty() {
        return Err(unroll::Error::Other("no readable text documents".to_string()).into());
    }
    Ok(docs)
}

fn cmd_extract(
    inputs: &[PathBuf],
    output: Option<&Path>,
    config: &ConfigArgs,
    dialect: DialectArg,
    compact: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = config
        .apply(ExtractOptions::new())?
        .with_dialect(dialect.into())
        .with_parallel(!sequential);
    let extractor = RollExtractor::new(options)?;

    let docs = read_documents(inputs)?;

    let pb = ProgressBar::new(docs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut extracted: Vec<ExtractedDocument> = Vec::with_capacity(docs.len());
    for doc in &docs {
        pb.set_message(doc.name.clone());
        extracted.push(extractor.extract(doc));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = documents_to_rows_json(&extracted, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        print_summary(&extracted);
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_summary(docs: &[ExtractedDocument]) {
    println!("{}", "Extraction Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for doc in docs {
        let count = doc.record_count().to_string();
        let count = if doc.is_empty() {
            count.yellow()
        } else {
            count.green()
        };
        println!(
            "  {} {} ({} records, {})",
            "├─".dimmed(),
            doc.name,
            count,
            doc.dialect
        );
    }

    let total: usize = docs.iter().map(ExtractedDocument::record_count).sum();
    println!("  {} {} records total", "└─".dimmed(), total.to_string().bold());
}

fn cmd_info(input: &Path, config: &ConfigArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = config.apply(ExtractOptions::new().sequential())?;
    let extractor = RollExtractor::new(options)?;
    let doc = TextFileSource::new(input).document()?;

    let probe = extractor.probe(&doc);
    let extracted = extractor.extract(&doc);
    let header = &extracted.header;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "State".bold(), header.state_name);
    println!("{}: {}", "Constituency".bold(), header.constituency_display());
    println!("{}: {}", "Booth".bold(), header.booth_display());
    println!("{}: {} ({})", "Dialect".bold(), extracted.dialect, probe);

    let stats = &extracted.stats;

    println!();
    println!("{}", "Extraction Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Records".bold(), stats.record_count);
    println!("{}: {}", "Dropped blocks".bold(), stats.dropped_block_count);
    println!("{}: {}", "Skipped lines".bold(), stats.skipped_line_count);
    println!(
        "{}: {:.1}%",
        "Completeness".bold(),
        stats.completeness() * 100.0
    );

    println!();
    println!("{}", "Unresolved Fields".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Name".bold(), stats.missing_name);
    println!("{}: {}", "Relation".bold(), stats.missing_relation);
    println!("{}: {}", "House number".bold(), stats.missing_house_number);
    println!("{}: {}", "Age".bold(), stats.missing_age);
    println!("{}: {}", "Gender".bold(), stats.missing_gender);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unroll".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Electoral-roll record extraction tool");
    println!();
    println!("License: MIT");
}
