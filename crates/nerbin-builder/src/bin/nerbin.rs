//! Nerbin CLI
//!
//! Converts character-offset NER examples into a binary document store,
//! and inspects or exports existing stores.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nerbin_builder::{BuilderConfig, CorpusBuilder, builtin_dataset, export_iob, load_dataset};
use nerbin_core::{AlignmentMode, DocBin, Language};
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "nerbin")]
#[command(about = "Build NER training corpora from character-offset annotations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize examples, align their entities and write a document store
    Convert {
        /// Language code of the blank pipeline
        #[arg(short, long, env = "NERBIN_LANG", default_value = "en")]
        lang: String,

        /// Dataset file (.json array or .jsonl); the bundled dataset if omitted
        #[arg(short, long, env = "NERBIN_DATA")]
        data: Option<PathBuf>,

        /// How entity offsets are snapped to token boundaries
        #[arg(short, long, env = "NERBIN_ALIGNMENT", default_value_t = AlignmentMode::Strict)]
        alignment: AlignmentMode,

        /// Output path; an existing file is replaced
        #[arg(short, long, env = "NERBIN_OUTPUT", default_value = "train.nerbin")]
        output: PathBuf,
    },
    /// Print the documents and entities of a store
    Inspect {
        /// Store to read
        path: PathBuf,
    },
    /// Export a store as IOB-tagged JSON lines
    ExportIob {
        /// Store to read
        path: PathBuf,

        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_convert(
    lang: &str,
    data: Option<PathBuf>,
    alignment: AlignmentMode,
    output: PathBuf,
) -> Result<()> {
    let language = Language::from_code(lang)?;
    let examples = match &data {
        Some(path) => load_dataset(path)
            .with_context(|| format!("Failed to load dataset {}", path.display()))?,
        None => builtin_dataset().context("Failed to parse bundled dataset")?,
    };
    info!(examples = examples.len(), %language, %alignment, "converting");

    let config = BuilderConfig::new()
        .with_language(language)
        .with_alignment_mode(alignment);
    CorpusBuilder::new(config)?
        .convert(&examples, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn run_inspect(path: PathBuf) -> Result<()> {
    let docbin =
        DocBin::from_disk(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}: {} documents", path.display(), docbin.len())?;
    for (i, doc) in docbin.docs().iter().enumerate() {
        writeln!(out, "[{i}] {:?} ({} tokens)", doc.text(), doc.len())?;
        for span in doc.ents() {
            let text = doc.span_text(span).unwrap_or_default();
            writeln!(out, "    {span} {text:?}")?;
        }
    }
    Ok(())
}

fn run_export(path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let docbin =
        DocBin::from_disk(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let written = match &output {
        Some(file) => {
            let writer = BufWriter::new(
                File::create(file)
                    .with_context(|| format!("Failed to create {}", file.display()))?,
            );
            export_iob(&docbin, writer)?
        }
        None => export_iob(&docbin, io::stdout().lock())?,
    };
    info!(records = written, "exported IOB records");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            lang,
            data,
            alignment,
            output,
        } => run_convert(&lang, data, alignment, output),
        Commands::Inspect { path } => run_inspect(path),
        Commands::ExportIob { path, output } => run_export(path, output),
    }
}
