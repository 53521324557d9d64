//! xcmcp CLI
//!
//! Reads a captured build or test log and prints the structured result.

mod logging;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use xcmcp::config::{user_config_path, EffectiveSettings, PROJECT_CONFIG_FILE};
use xcmcp::results::Xcresulttool;

#[derive(Parser)]
#[command(name = "xcmcp")]
#[command(about = "Interpret captured Xcode and SwiftPM build/test output", version)]
struct Cli {
    /// Path to project config file (default: .xcmcp.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Ceiling on waiting for the result bundle, in milliseconds
    #[arg(long, global = true)]
    max_wait_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract errors and warnings from beautified build output
    Build {
        /// Log file, or - for stdin
        log: PathBuf,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Categorize the output of a failed command
    Classify {
        /// Log file, or - for stdin
        log: PathBuf,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Summarize a test run
    Test {
        /// Log file, or - for stdin
        log: PathBuf,

        /// Result bundle path passed to xcodebuild -resultBundlePath
        #[arg(long)]
        result_bundle: Option<PathBuf>,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Print the effective settings and their sources
    Config,
}

fn main() {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    let effective = load_settings(cli.config.as_deref(), cli.max_wait_ms);

    match cli.command {
        Commands::Build { log, human } => run_build(&effective, &log, human),
        Commands::Classify { log, human } => run_classify(&effective, &log, human),
        Commands::Test {
            log,
            result_bundle,
            human,
        } => run_test(&effective, &log, result_bundle.as_deref(), human),
        Commands::Config => print_json(&effective),
    }
}

fn load_settings(config_path: Option<&Path>, max_wait_ms: Option<u64>) -> EffectiveSettings {
    if let Some(path) = config_path {
        if !path.exists() {
            eprintln!("Config file not found: {}", path.display());
            process::exit(1);
        }
    }
    let project = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    let user = user_config_path();
    let cli_overrides = max_wait_ms.map(|ms| serde_json::json!({"test_results": {"max_wait_ms": ms}}));

    match EffectiveSettings::build(user.as_deref(), Some(&project), cli_overrides) {
        Ok(effective) => effective,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn run_build(effective: &EffectiveSettings, log: &Path, human: bool) {
    let output = read_log(log);
    let parsed = effective.settings.build_output_parser().parse(&output);

    if human {
        println!("{}", parsed.to_human());
    } else {
        print_json(&parsed);
    }

    if parsed.has_errors() {
        process::exit(1);
    }
}

fn run_classify(effective: &EffectiveSettings, log: &Path, human: bool) {
    let classifier = match effective.settings.classifier() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    let output = read_log(log);

    match classifier.classify(&output) {
        Some(error) if human => println!("{}", error.to_human()),
        Some(error) => print_json(&error),
        None => {
            eprintln!("Build failed; no specific cause recognized");
            process::exit(2);
        }
    }
}

fn run_test(effective: &EffectiveSettings, log: &Path, result_bundle: Option<&Path>, human: bool) {
    let output = read_log(log);
    let parser = effective.settings.test_result_parser(Xcresulttool::default());
    let result = parser.parse(&output, result_bundle);

    if human {
        println!("{}", result.to_human());
    } else {
        print_json(&result);
    }

    if !result.success {
        process::exit(1);
    }
}

fn read_log(path: &Path) -> String {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        fs::read(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    };
    match contents {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            process::exit(1);
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
