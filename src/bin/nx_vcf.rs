//! NX-VCF CLI
//!
//! Command-line front end for phone validation and vCard export.
//!
//! Usage:
//!   cargo run --features cli --bin nx_vcf -- validate "+254 712 345 678" 0712345678
//!   cargo run --features cli --bin nx_vcf -- format "+254 712-345-678"
//!   cargo run --features cli --bin nx_vcf -- generate --input contacts.json --out-dir exports
//!   cargo run --features cli --bin nx_vcf -- generate --input - --stdout < contacts.json
//!   cargo run --features cli --bin nx_vcf -- progress --count 42
//!
//! Settings come from `NX_VCF_*` variables (a `.env` file is honored); flags
//! override them.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use nx_vcf::export::{export_to_dir, read_contacts, read_contacts_file};
use nx_vcf::{phone, AppConfig, ContactCardGenerator, RegistrationProgress};

#[derive(Parser, Debug)]
#[command(name = "nx_vcf")]
#[command(about = "Validate phone numbers and export registered contacts as vCards")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check numbers against the supported calling codes
    Validate {
        /// Phone numbers to check
        #[arg(required = true)]
        phones: Vec<String>,
    },

    /// Print a number reduced to its digits
    Format { phone: String },

    /// Generate a VCF from a JSON contact export
    Generate {
        /// Contact export (bare array or {"contacts": [...]}); "-" reads stdin
        #[arg(long, short = 'i')]
        input: String,

        /// Directory to save into (default: NX_VCF_OUTPUT_DIR or ".")
        #[arg(long, short = 'o')]
        out_dir: Option<PathBuf>,

        /// Filename to save as (default: NX_VCF_FILENAME or nutterx_contacts.vcf)
        #[arg(long, short = 'f')]
        filename: Option<String>,

        /// Print the document instead of saving it
        #[arg(long)]
        stdout: bool,
    },

    /// Show registration progress toward the target
    Progress {
        /// Registered contacts so far
        #[arg(long, short = 'c')]
        count: u64,

        /// Target count (default: NX_VCF_TARGET_COUNT or 150)
        #[arg(long, short = 't')]
        target: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env().context("Invalid NX_VCF_* configuration")?;

    match args.command {
        Command::Validate { phones } => Ok(validate(&phones)),
        Command::Format { phone } => {
            println!("{}", phone::format(&phone));
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            input,
            out_dir,
            filename,
            stdout,
        } => generate(config, &input, out_dir, filename, stdout),
        Command::Progress {
            count,
            target,
            json,
        } => {
            let progress = RegistrationProgress::new(count, target.unwrap_or(config.target_count));
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else if progress.is_complete() {
                println!("{} {}", "COMPLETE".green().bold(), progress);
            } else {
                println!(
                    "{} {} ({} to go)",
                    "IN PROGRESS".yellow().bold(),
                    progress,
                    progress.remaining()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(phones: &[String]) -> ExitCode {
    let mut rejected = 0usize;

    for raw in phones {
        match phone::check(raw) {
            Ok(rule) => println!(
                "{} {} -> {} ({})",
                "OK".green().bold(),
                raw,
                phone::format(raw),
                rule.country
            ),
            Err(reason) => {
                rejected += 1;
                println!("{} {}: {}", "REJECTED".red().bold(), raw, reason);
            }
        }
    }

    if rejected == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn generate(
    mut config: AppConfig,
    input: &str,
    out_dir: Option<PathBuf>,
    filename: Option<String>,
    stdout: bool,
) -> Result<ExitCode> {
    let contacts = if input == "-" {
        read_contacts(io::stdin().lock()).context("Failed to read contacts from stdin")?
    } else {
        read_contacts_file(Path::new(input))
            .with_context(|| format!("Failed to read contacts from {}", input))?
    };

    if stdout {
        let document = ContactCardGenerator::with_options(config.card_options()).generate(&contacts);
        print!("{}", document);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(dir) = out_dir {
        config.output_dir = dir;
    }
    if let Some(filename) = filename {
        config.filename = filename;
    }

    let summary = export_to_dir(&config, &contacts)
        .with_context(|| format!("Failed to save {}", config.filename))?;

    println!(
        "{} {} card(s) written to {} ({} duplicate(s) skipped)",
        "SAVED".green().bold(),
        summary.cards,
        summary.path.display(),
        summary.duplicates()
    );
    Ok(ExitCode::SUCCESS)
}
