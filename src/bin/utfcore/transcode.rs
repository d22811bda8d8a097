//! CLI handler for the `transcode` command.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use utfcore::text::convert::{replace_invalid, utf8_to_utf32};
use utfcore::text::unicode::REPLACEMENT_CHARACTER;
use utfcore::text::utf16::{code_points16, decode_one16, encode16_one};
use utfcore::text::utf8::encode_one;
use utfcore::text::validate::sniff_bom;
use utfcore::text::{Bom, Utf16Error, Utf8Error};

use crate::text_validate::exit_codes;

/// Convert text between UTF-8 and UTF-16.
#[derive(Debug, Parser)]
pub struct TranscodeArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Input encoding; `auto` detects a byte order mark and falls back to UTF-8
    #[arg(long, value_enum, default_value = "auto")]
    pub from: SourceEncoding,

    /// Output encoding
    #[arg(long, value_enum, default_value = "utf8")]
    pub to: Encoding,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a byte order mark for the output encoding
    #[arg(long)]
    pub bom: bool,

    /// Replace invalid sequences with U+FFFD instead of failing
    #[arg(long)]
    pub lossy: bool,
}

/// A concrete text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[value(name = "utf8")]
    Utf8,
    #[value(name = "utf16le")]
    Utf16Le,
    #[value(name = "utf16be")]
    Utf16Be,
}

impl Encoding {
    fn bom(self) -> Bom {
        match self {
            Self::Utf8 => Bom::Utf8,
            Self::Utf16Le => Bom::Utf16Le,
            Self::Utf16Be => Bom::Utf16Be,
        }
    }
}

/// Input encoding as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceEncoding {
    Auto,
    #[value(name = "utf8")]
    Utf8,
    #[value(name = "utf16le")]
    Utf16Le,
    #[value(name = "utf16be")]
    Utf16Be,
}

impl SourceEncoding {
    fn resolve(self, input: &[u8]) -> Encoding {
        match self {
            Self::Auto => match sniff_bom(input) {
                Some(Bom::Utf16Le) => Encoding::Utf16Le,
                Some(Bom::Utf16Be) => Encoding::Utf16Be,
                Some(Bom::Utf8) | None => Encoding::Utf8,
            },
            Self::Utf8 => Encoding::Utf8,
            Self::Utf16Le => Encoding::Utf16Le,
            Self::Utf16Be => Encoding::Utf16Be,
        }
    }
}

/// Why the input could not be decoded.
#[derive(Debug, PartialEq, Eq)]
enum InputError {
    Utf8(Utf8Error),
    Utf16(Utf16Error),
    OddLength(usize),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8(err) => write!(f, "invalid UTF-8: {}", err),
            Self::Utf16(err) => write!(f, "invalid UTF-16: {}", err),
            Self::OddLength(len) => write!(f, "UTF-16 input has odd length ({} bytes)", len),
        }
    }
}

/// Run the transcode command.
pub fn run(args: TranscodeArgs) -> Result<i32> {
    let name = args
        .input
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    let input = match read_input(args.input.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {}: {}", name, e);
            return Ok(exit_codes::IO_ERROR);
        }
    };

    let from = args.from.resolve(&input);
    let code_points = match decode(&input, from, args.lossy) {
        Ok(cps) => cps,
        Err(err) => {
            eprintln!("error: {}: {}", name, err);
            return Ok(exit_codes::INVALID);
        }
    };

    let output = encode(&code_points, args.to, args.bom);
    if let Err(e) = write_output(args.output.as_deref(), &output) {
        eprintln!("error: {}: {}", output_name(args.output.as_deref()), e);
        return Ok(exit_codes::IO_ERROR);
    }

    Ok(exit_codes::SUCCESS)
}

/// Decode `input` to code points, dropping a leading byte order mark for `from`.
fn decode(input: &[u8], from: Encoding, lossy: bool) -> Result<Vec<u32>, InputError> {
    let bom = from.bom();
    let body = input.strip_prefix(bom.bytes()).unwrap_or(input);

    match from {
        Encoding::Utf8 => decode_utf8(body, lossy),
        Encoding::Utf16Le => decode_utf16(body, u16::from_le_bytes, lossy),
        Encoding::Utf16Be => decode_utf16(body, u16::from_be_bytes, lossy),
    }
}

fn decode_utf8(body: &[u8], lossy: bool) -> Result<Vec<u32>, InputError> {
    let mut code_points = Vec::with_capacity(body.len());
    if lossy {
        let mut repaired = Vec::with_capacity(body.len());
        replace_invalid(body, REPLACEMENT_CHARACTER, &mut repaired);
        utf8_to_utf32(&repaired, &mut code_points).map_err(InputError::Utf8)?;
    } else {
        utf8_to_utf32(body, &mut code_points).map_err(InputError::Utf8)?;
    }
    Ok(code_points)
}

fn decode_utf16(
    body: &[u8],
    from_bytes: fn([u8; 2]) -> u16,
    lossy: bool,
) -> Result<Vec<u32>, InputError> {
    let pairs = body.chunks_exact(2);
    let dangling = !pairs.remainder().is_empty();
    if dangling && !lossy {
        return Err(InputError::OddLength(body.len()));
    }
    let units: Vec<u16> = pairs.map(|p| from_bytes([p[0], p[1]])).collect();

    if !lossy {
        return code_points16(&units)
            .collect::<Result<Vec<_>, _>>()
            .map_err(InputError::Utf16);
    }

    let mut code_points = Vec::with_capacity(units.len());
    let mut cursor = units.iter();
    while !cursor.as_slice().is_empty() {
        match decode_one16(&mut cursor) {
            Ok(cp) => code_points.push(cp),
            Err(_) => {
                // Drop one unit and resync; a trail after a lone lead is retried
                code_points.push(REPLACEMENT_CHARACTER);
                cursor.next();
            }
        }
    }
    if dangling {
        code_points.push(REPLACEMENT_CHARACTER);
    }
    Ok(code_points)
}

/// Encode code points, optionally behind the target's byte order mark.
fn encode(code_points: &[u32], to: Encoding, bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(code_points.len() * 2);
    if bom {
        out.extend_from_slice(to.bom().bytes());
    }

    match to {
        Encoding::Utf8 => {
            for &cp in code_points {
                encode_one(cp, &mut out);
            }
        }
        Encoding::Utf16Le | Encoding::Utf16Be => {
            let mut units = Vec::with_capacity(code_points.len());
            for &cp in code_points {
                encode16_one(cp, &mut units);
            }
            for unit in units {
                let bytes = if to == Encoding::Utf16Le {
                    unit.to_le_bytes()
                } else {
                    unit.to_be_bytes()
                };
                out.extend_from_slice(&bytes);
            }
        }
    }
    out
}

fn read_input(path: Option<&Path>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write `data` to `path`, or to stdout when there is none.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

/// How an output destination is named in diagnostics.
pub fn output_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string())
}
