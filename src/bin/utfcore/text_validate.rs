//! CLI handler for the `validate` command.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use utfcore::text::validate::{strip_bom, validate_utf8};
use utfcore::text::{Bom, DecodeError, Utf8Error};

/// Validate text files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateUtf8Args {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Treat a leading byte order mark as an error
    #[arg(long)]
    pub reject_bom: bool,
}

/// How validation results are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// rustc-style diagnostics on stderr
    Text,
    /// One JSON object per input on stdout
    Json,
}

/// Exit codes shared by all commands.
pub mod exit_codes {
    /// Input is valid.
    pub const SUCCESS: i32 = 0;
    /// Input is invalid (validation or decode error).
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    line_num: &'static str,
    caret: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                line_num: colors::LINE_NUM,
                caret: colors::CARET,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                line_num: "",
                caret: "",
                message: "",
                reset: "",
            }
        }
    }
}

/// Result of validating one input, as printed by `--format json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    file: &'a str,
    valid: bool,
    bom: Option<Bom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Utf8Error>,
}

/// Outcome of checking one input.
#[derive(Debug)]
enum Finding {
    Valid,
    Invalid(Utf8Error),
    UnwantedBom,
}

/// Run the validate command.
pub fn run(args: ValidateUtf8Args) -> Result<i32> {
    // Determine color output
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };

    let scheme = ColorScheme::new(use_color);

    if args.files.is_empty() {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read from stdin")?;

        return validate_input(&input, "<stdin>", &args, &scheme);
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let filename = path.to_string_lossy();
                let result = validate_input(&input, &filename, &args, &scheme)?;
                if result == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        scheme.error,
                        scheme.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    if any_io_error {
        Ok(exit_codes::IO_ERROR)
    } else if any_invalid {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn check(input: &[u8], reject_bom: bool) -> (Option<Bom>, Finding) {
    let (bom, _) = strip_bom(input);
    // Only the UTF-8 mark is part of a UTF-8 stream; FF FE / FE FF fail validation below
    let bom = bom.filter(|b| *b == Bom::Utf8);

    let finding = match validate_utf8(input) {
        Err(err) => Finding::Invalid(err),
        Ok(()) if reject_bom && bom.is_some() => Finding::UnwantedBom,
        Ok(()) => Finding::Valid,
    };
    (bom, finding)
}

/// Validate a single input and report the outcome.
fn validate_input(
    input: &[u8],
    filename: &str,
    args: &ValidateUtf8Args,
    scheme: &ColorScheme,
) -> Result<i32> {
    let (bom, finding) = check(input, args.reject_bom);

    if !args.quiet {
        match args.format {
            ReportFormat::Json => {
                let report = Report {
                    file: filename,
                    valid: matches!(finding, Finding::Valid),
                    bom,
                    error: match &finding {
                        Finding::Invalid(err) => Some(*err),
                        _ => None,
                    },
                };
                let line = serde_json::to_string(&report).context("failed to serialize report")?;
                println!("{}", line);
            }
            ReportFormat::Text => match &finding {
                Finding::Valid => {}
                Finding::Invalid(err) => print_error(err, input, filename, scheme),
                Finding::UnwantedBom => eprintln!(
                    "{}error{}: {}: starts with a UTF-8 byte order mark",
                    scheme.error, scheme.reset, filename
                ),
            },
        }
    }

    match finding {
        Finding::Valid => Ok(exit_codes::SUCCESS),
        Finding::Invalid(_) | Finding::UnwantedBom => Ok(exit_codes::INVALID),
    }
}

/// Print a formatted error message with context snippet.
fn print_error(err: &Utf8Error, input: &[u8], filename: &str, scheme: &ColorScheme) {
    eprintln!(
        "{}error{}: {}",
        scheme.error,
        scheme.reset,
        format_error_kind(&err.kind, err.offset, input)
    );

    eprintln!(
        "  {}--> {}:{}:{}{}",
        scheme.location, filename, err.line, err.column, scheme.reset
    );

    if let Some(snippet) = get_error_snippet(input, err.line, err.column) {
        // Line number gutter is at least 3 wide
        let line_num_width = err.line.to_string().len().max(3);
        let blank_padding = " ".repeat(line_num_width + 2);

        eprintln!("{}{}|{}", blank_padding, scheme.line_num, scheme.reset);

        eprintln!(
            " {}{:>width$}{} {}|{} {}",
            scheme.line_num,
            err.line,
            scheme.reset,
            scheme.line_num,
            scheme.reset,
            snippet.line_content,
            width = line_num_width
        );

        let padding = " ".repeat(snippet.caret_offset);
        let hint = match err.kind.hint() {
            Some(h) => format!(" {}{}{}", scheme.message, h, scheme.reset),
            None => String::new(),
        };
        eprintln!(
            "{}{}|{} {}{}^{}{}",
            blank_padding,
            scheme.line_num,
            scheme.reset,
            padding,
            scheme.caret,
            scheme.reset,
            hint
        );
    }

    eprintln!();
}

/// Format the error kind as a human-readable message.
fn format_error_kind(kind: &DecodeError, offset: usize, input: &[u8]) -> String {
    match input.get(offset) {
        Some(byte) if *kind != DecodeError::NotEnoughRoom => {
            format!("{} (byte 0x{:02X})", kind, byte)
        }
        _ => kind.to_string(),
    }
}

/// A single line of context around an error.
struct ErrorSnippet {
    /// The content of the line containing the error.
    line_content: String,
    /// Number of spaces before the caret.
    caret_offset: usize,
}

/// Extract the line an error sits on, truncated around the error column.
fn get_error_snippet(input: &[u8], line: usize, column: usize) -> Option<ErrorSnippet> {
    let raw = input.split(|&b| b == b'\n').nth(line - 1)?;
    // Everything before the error column is valid, so only the tail is lossy
    let error_col = column.saturating_sub(1);
    let before = String::from_utf8_lossy(&raw[..error_col.min(raw.len())]);
    let after = String::from_utf8_lossy(&raw[error_col.min(raw.len())..]);

    let max_width = 80;
    let before_chars = before.chars().count();
    let (head, caret_offset) = if before_chars > max_width / 2 {
        let skip = before_chars - max_width / 2;
        let kept: String = before.chars().skip(skip).collect();
        (format!("...{}", kept), max_width / 2 + 3)
    } else {
        (before.into_owned(), before_chars)
    };

    let tail: String = after.chars().take(max_width / 2).collect();
    let ellipsis = if after.chars().count() > max_width / 2 {
        "..."
    } else {
        ""
    };

    Some(ErrorSnippet {
        line_content: format!("{}{}{}", head, tail, ellipsis),
        caret_offset,
    })
}
