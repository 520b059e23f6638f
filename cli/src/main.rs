// Line-oriented front end: segment stdin (or a file) line by line, or
// rank keywords per line. Exit codes: 0 success, 1 initialization
// failure, 2 runtime cut failure.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hanseg_core::{Config, KeywordExtractor, Segmenter};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hanseg", about = "Maximum-probability Chinese word segmentation")]
struct Args {
    /// TOML config file carrying the resource paths.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Segmentation dictionary (`WORD FREQ [TAG]` per line). Overrides the
    /// config file.
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Read input lines from this file instead of stdin.
    #[arg(long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Segment each input line and print the tokens joined by '/'.
    Cut,
    /// Print the top keywords of each input line as WORD<TAB>SCORE pairs.
    Keywords {
        /// IDF table (`WORD IDF` per line). Overrides the config file.
        #[arg(long)]
        idf: Option<PathBuf>,

        /// Stop-word list, one token per line. Overrides the config file.
        #[arg(long)]
        stop_words: Option<PathBuf>,

        /// How many keywords to print per line.
        #[arg(long)]
        top_n: Option<usize>,
    },
}

enum Mode {
    Cut(Arc<Segmenter>),
    Keywords { extractor: KeywordExtractor, top_n: usize },
}

fn init(args: &Args) -> Result<Mode> {
    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => Config::default(),
    };

    let dict = args.dict.clone().unwrap_or(config.dict.clone());
    let segmenter = Arc::new(
        Segmenter::new(&dict)
            .with_context(|| format!("failed to load dictionary {}", dict.display()))?,
    );

    match &args.command {
        Command::Cut => Ok(Mode::Cut(segmenter)),
        Command::Keywords {
            idf,
            stop_words,
            top_n,
        } => {
            let Some(idf) = idf.clone().or(config.idf.clone()) else {
                bail!("keywords mode needs --idf or an idf path in the config");
            };
            let Some(stop_words) = stop_words.clone().or(config.stop_words.clone()) else {
                bail!("keywords mode needs --stop-words or a stop_words path in the config");
            };
            let extractor = KeywordExtractor::new(segmenter, &idf, &stop_words)
                .context("failed to load keyword tables")?;
            Ok(Mode::Keywords {
                extractor,
                top_n: top_n.unwrap_or(config.top_n),
            })
        }
    }
}

fn run(mode: &Mode, input: Box<dyn BufRead>) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        if line.is_empty() {
            continue;
        }
        match mode {
            Mode::Cut(segmenter) => {
                let tokens = segmenter.cut(&line)?;
                println!("{}", tokens.join("/"));
            }
            Mode::Keywords { extractor, top_n } => {
                for (word, score) in extractor.extract(&line, *top_n)? {
                    println!("{}\t{:.6}", word, score);
                }
            }
        }
    }
    Ok(())
}

fn open_input(file: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match file {
        Some(path) => {
            let f = std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(f)))
        }
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mode = match init(&args) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("hanseg: {e:#}");
            return ExitCode::from(1);
        }
    };

    // Opening the input file is part of initialization; failing to read a
    // line once running is a runtime failure.
    let input = match open_input(args.file.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("hanseg: {e:#}");
            return ExitCode::from(1);
        }
    };

    match run(&mode, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hanseg: {e:#}");
            ExitCode::from(2)
        }
    }
}
