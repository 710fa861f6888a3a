//! Naive-Bayes CLI
//!
//! The `nb` binary trains a classifier from a corpus file and either runs the
//! corpus's checks or classifies words given on the command line. Payloads go
//! to stdout; logs and errors go to stderr.

use clap::{Args, Parser, Subcommand};
use nb_common::{Error, OutputFormat, Result, StructuredError};
use nb_config::{resolve_settings, Settings, SettingsPath};
use nb_core::exit_codes::ExitCode;
use nb_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use nb_core::{Classification, Classifier, Corpus, CorpusReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Naive-Bayes classifier - train from a corpus, then classify
#[derive(Parser)]
#[command(name = "nb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to classifier.json (overrides NB_SETTINGS and NB_CONFIG_DIR)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a corpus and run its checks
    Check(CheckArgs),

    /// Train a corpus and classify the given words
    Classify(ClassifyArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Corpus JSON file
    corpus: PathBuf,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Corpus JSON file
    corpus: PathBuf,

    /// Pre-tokenized document; none scores class priors only
    words: Vec<String>,
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    words: &'a [String],
    #[serde(flatten)]
    result: &'a Classification,
    posteriors: Vec<f64>,
    ranked: Vec<nb_common::ClassId>,
    margin: Option<f64>,
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            // Help and version text go to stdout; nothing to do if that fails.
            let _ = err.print();
            return code.into();
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };

    let (settings, resolved) = match load_settings(&cli.global) {
        Ok(loaded) => loaded,
        Err(err) => {
            init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));
            return report_error(&cli.global, &err).into();
        }
    };

    init_logging(&LogConfig::resolve(
        &settings.log,
        cli_level,
        cli.global.log_format,
    ));
    debug!(source = %resolved.source, path = ?resolved.path, "settings resolved");

    let outcome = match &cli.command {
        Commands::Check(args) => run_check(&cli.global, &settings, args),
        Commands::Classify(args) => run_classify(&cli.global, &settings, args),
    };

    match outcome {
        Ok(code) => code.into(),
        Err(err) => report_error(&cli.global, &err).into(),
    }
}

fn load_settings(global: &GlobalOpts) -> Result<(Settings, SettingsPath)> {
    if let Some(path) = &global.settings {
        if !path.exists() {
            return Err(Error::Config(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
    }

    let resolved = resolve_settings(global.settings.as_deref());
    let settings = match &resolved.path {
        Some(path) => Settings::load(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?,
        None => Settings::default(),
    };
    Ok((settings, resolved))
}

fn run_check(global: &GlobalOpts, settings: &Settings, args: &CheckArgs) -> Result<ExitCode> {
    let corpus = Corpus::from_file(&args.corpus)?;
    let report = corpus.evaluate(Classifier::with_settings(&settings.classifier))?;

    match global.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Summary => print_report_summary(&report),
    }

    Ok(if report.all_passed() {
        ExitCode::Clean
    } else {
        ExitCode::ChecksFailed
    })
}

fn run_classify(
    global: &GlobalOpts,
    settings: &Settings,
    args: &ClassifyArgs,
) -> Result<ExitCode> {
    let corpus = Corpus::from_file(&args.corpus)?;
    let mut classifier = Classifier::with_settings(&settings.classifier);
    corpus.train_into(&mut classifier)?;
    let result = classifier.classify(&args.words)?;

    match global.format {
        OutputFormat::Json => print_json(&ClassifyOutput {
            words: &args.words,
            result: &result,
            posteriors: result.posteriors(),
            ranked: result.ranked(),
            margin: result.margin(),
        })?,
        OutputFormat::Summary => print_classification_summary(&result),
    }

    Ok(ExitCode::Clean)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report_summary(report: &CorpusReport) {
    for check in &report.checks {
        println!(
            "{} #{} class={} tied={} [{}]",
            if check.passed { "PASS" } else { "FAIL" },
            check.index,
            check.class,
            check.tied,
            check.words.join(" ")
        );
    }
    println!(
        "{} trained, {} forgotten, {} passed, {} failed",
        report.trained, report.forgotten, report.passed, report.failed
    );
}

fn print_classification_summary(result: &Classification) {
    println!("class={} tied={}", result.class, result.tied);
    let posteriors = result.posteriors();
    for class in result.ranked() {
        println!(
            "  {:>4}  score={:.6}  p={:.6}",
            class,
            result.scores[class.index()],
            posteriors[class.index()]
        );
    }
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let code = ExitCode::from(err);
    match global.format {
        OutputFormat::Json => {
            let structured = StructuredError::from(err).with_context("exit_code", code.as_i32());
            eprintln!("{}", structured.to_json());
        }
        OutputFormat::Summary => {
            eprintln!("{}: {}", err.headline(), err);
            eprintln!("  {}", err.remediation());
        }
    }
    code
}
