use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use attestguard::check::{Checker, Severity};
use attestguard::config::{Config, CONFIG_FILE_NAME};
use attestguard::digest;
use attestguard::error::GuardError;
use attestguard::output::OutputFormat;
use attestguard::CheckOptions;

#[derive(Parser)]
#[command(
    name = "attestguard",
    about = "Structural validator for in-toto attestations",
    version,
    author
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate attestation statements in a file or directory
    Check {
        /// A .json or .jsonl file, or a directory of them
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Minimum severity to fail (info, warning, error)
        #[arg(long)]
        fail_on: Option<String>,

        /// Directory with subject artifacts; verifies their sha256 digests
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List digest algorithms with a known output length
    ListAlgorithms {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// List every finding code the checker can emit
    ListCodes {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .attestguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Check {
            path,
            config,
            format,
            fail_on,
            artifacts,
            output,
        } => cmd_check(path, config, format, fail_on, artifacts, output),
        Commands::ListAlgorithms { format } => cmd_list_algorithms(format),
        Commands::ListCodes { format } => cmd_list_codes(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_check(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_on_str: Option<String>,
    artifacts: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<i32, GuardError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        tracing::warn!(format = %format_str, "unknown format, using console");
        OutputFormat::Console
    });

    let fail_on = match fail_on_str {
        Some(s) => Some(
            Severity::from_str_lenient(&s)
                .ok_or_else(|| GuardError::Config(format!("unknown severity '{s}'")))?,
        ),
        None => None,
    };

    let options = CheckOptions {
        config_path: config,
        fail_on_override: fail_on,
        artifacts_dir: artifacts,
    };

    let report = attestguard::check(&path, &options)?;
    let rendered = attestguard::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // 0 = pass, 1 = findings at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_list_algorithms(format_str: String) -> Result<i32, GuardError> {
    let algorithms: Vec<(&str, usize)> = digest::known_algorithms().collect();

    match format_str.as_str() {
        "json" => {
            let map: serde_json::Map<String, serde_json::Value> = algorithms
                .iter()
                .map(|(name, len)| ((*name).to_owned(), serde_json::Value::from(*len)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        _ => {
            println!("{:<14} {:>5} {:>9}", "ALGORITHM", "BYTES", "HEX CHARS");
            println!("{}", "-".repeat(30));
            for (name, len) in &algorithms {
                println!("{:<14} {:>5} {:>9}", name, len, len * 2);
            }
        }
    }

    Ok(0)
}

fn cmd_list_codes(format_str: String) -> Result<i32, GuardError> {
    let codes = Checker::list_codes();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&codes)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<36} {:<9} DESCRIPTION", "CODE", "SEVERITY");
            println!("{}", "-".repeat(90));
            for code in &codes {
                println!(
                    "{:<36} {:<9} {}",
                    code.code,
                    code.default_severity.to_string(),
                    code.description,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, GuardError> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {CONFIG_FILE_NAME}");

    Ok(0)
}
