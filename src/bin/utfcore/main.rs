//! utfcore CLI tool for validating, transcoding and generating Unicode text.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod text_generators;
mod text_validate;
mod transcode;

use text_validate::exit_codes;

#[derive(Debug, Parser)]
#[command(name = "utfcore")]
#[command(about = "UTF-8 / UTF-16 validation and transcoding toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate files for UTF-8 compliance
    Validate(text_validate::ValidateUtf8Args),
    /// Convert text between UTF-8 and UTF-16
    Transcode(transcode::TranscodeArgs),
    /// Generate synthetic UTF-8 text for benchmarking and testing
    Generate(GenerateText),
}

/// Generate synthetic UTF-8 text for benchmarking and testing
#[derive(Debug, Parser)]
struct GenerateText {
    /// Size of text to generate (supports b, kb, mb, gb - case insensitive)
    /// Examples: 1024, 1kb, 512MB, 2Gb
    #[arg(value_parser = parse_size)]
    size: usize,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text pattern to generate
    #[arg(short, long, default_value = "mixed")]
    pattern: text_generators::Utf8Pattern,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Verify the generated text is valid UTF-8 (not for `corrupt`)
    #[arg(long)]
    verify: bool,
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    // Try parsing as plain number first
    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    // Parse with unit suffix
    let (num_str, unit) = if s.ends_with("gb") {
        (s.trim_end_matches("gb"), 1024 * 1024 * 1024)
    } else if s.ends_with("mb") {
        (s.trim_end_matches("mb"), 1024 * 1024)
    } else if s.ends_with("kb") {
        (s.trim_end_matches("kb"), 1024)
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .map(|n| n * unit)
        .map_err(|_| format!("Invalid number in size: '{}'", s))
}

fn generate(args: GenerateText) -> Result<i32> {
    let text = text_generators::generate_utf8(args.size, args.pattern, args.seed);

    if args.verify {
        if let Err(err) = utfcore::text::validate_utf8(&text) {
            anyhow::bail!("generated text is not valid UTF-8: {}", err);
        }
        eprintln!("✓ UTF-8 validated successfully");
    }

    let output = args.output.as_deref();
    if let Err(e) = transcode::write_output(output, &text) {
        eprintln!("error: {}: {}", transcode::output_name(output), e);
        return Ok(exit_codes::IO_ERROR);
    }
    if let Some(path) = output {
        eprintln!("✓ Wrote {} bytes to {}", text.len(), path.display());
    }

    Ok(exit_codes::SUCCESS)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = match cli.command {
        Command::Validate(args) => text_validate::run(args)?,
        Command::Transcode(args) => transcode::run(args)?,
        Command::Generate(args) => generate(args)?,
    };

    std::process::exit(code);
}
