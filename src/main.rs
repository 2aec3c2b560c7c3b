use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use spellfix::checker::tokenizer::TokenizerKind;
use spellfix::cli::output::{self, ConsoleSink, OutputFormat};
use spellfix::config::Overrides;
use spellfix::{dict, pipeline, CollectingSink, Config, Dictionary, ScanError, SpellScanner};
use std::io;
use std::path::PathBuf;

/// Exit status when the dictionary cannot be loaded.
const EXIT_DICTIONARY: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "spellfix")]
#[command(version, about = "Find common misspellings in a source tree", long_about = None)]
struct Cli {
    /// Files or directories to scan
    #[arg(value_name = "PATHS", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Correction dictionary, one `misspelling->correction[,reason]` per line
    #[arg(short, long, global = true, env = "SPELLFIX_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Tokenizer policy (words, whitespace)
    #[arg(short, long)]
    tokenizer: Option<TokenizerKind>,

    /// Also report rules that are not marked for autofix
    #[arg(short, long)]
    all: bool,

    /// Maximum number of files scanned at once (defaults to the CPU count)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Show debug diagnostics (skipped files, symlinks)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary inspection
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// Show rule counts and malformed lines of the dictionary
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellfix", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(Overrides {
        dictionary: cli.dictionary.clone(),
        tokenizer: cli.tokenizer,
        include_candidates: cli.all,
        jobs: cli.jobs,
    })?;
    let colored = !cli.no_color;

    if let Some(command) = cli.command {
        return handle_command(command, &config, colored);
    }

    // The dictionary is fully built here, before any scan task exists.
    let dictionary = Dictionary::load_from_path(&config.dictionary_path())
        .unwrap_or_else(|e| exit_on_dictionary_error(e));
    if dictionary.is_empty() {
        log::warn!("Dictionary contains no usable rules; nothing will be reported");
    }
    let scanner = SpellScanner::new(dictionary, &config);

    match cli.format {
        OutputFormat::Text => {
            let sink = ConsoleSink::new(colored);
            pipeline::run(&scanner, &cli.paths, config.jobs, &sink)?;
        }
        OutputFormat::Json => {
            let sink = CollectingSink::new();
            let summary = pipeline::run(&scanner, &cli.paths, config.jobs, &sink)?;
            let mut findings = sink.into_findings();
            findings.sort();
            output::print_json(&findings, &summary).context("Failed to serialize findings")?;
        }
    }

    Ok(())
}

fn handle_command(command: Commands, config: &Config, colored: bool) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::Info => {
                if let Err(e) = dict::manager::show_info(&config.dictionary_path(), colored) {
                    exit_on_dictionary_error(e);
                }
            }
        },
    }
    Ok(())
}

fn exit_on_dictionary_error(err: ScanError) -> ! {
    log::error!("{}", err);
    std::process::exit(EXIT_DICTIONARY);
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
