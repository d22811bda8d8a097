//! UTF-8 text generators for benchmarking and testing.
//!
//! Code points are drawn from pattern-specific ranges and encoded with the
//! library encoder, so generated output is valid UTF-8 by construction
//! (except for the `corrupt` pattern, which injects broken sequences).

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use utfcore::text::unicode::is_code_point_valid;
use utfcore::text::utf8::{encode_one, encoded_len};

/// Seed used when none is given, so runs are reproducible by default.
const DEFAULT_SEED: u64 = 0x5EED_0F_7E17;

/// Soft line length; a newline is inserted once a line reaches it.
const LINE_WIDTH: usize = 80;

/// Pattern types for UTF-8 text generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Utf8Pattern {
    /// Printable ASCII (1-byte sequences)
    Ascii,
    /// Latin-1 Supplement and Latin Extended (2-byte sequences)
    Latin,
    /// CJK Unified Ideographs (3-byte sequences)
    Cjk,
    /// Emoji and pictographs (4-byte sequences)
    Emoji,
    /// Realistic mix: ~70% ASCII, 20% 2-byte, 8% 3-byte, 2% 4-byte
    Mixed,
    /// Uniform mix of all sequence lengths (1-4 bytes)
    AllLengths,
    /// Any valid code point, uniformly over the whole code space
    Supplementary,
    /// All lengths with invalid sequences injected every few hundred bytes
    Corrupt,
}

/// Broken sequences injected by [`Utf8Pattern::Corrupt`].
const CORRUPTIONS: [&[u8]; 6] = [
    &[0x80],                   // bare continuation byte
    &[0xFF],                   // never valid
    &[0xC0, 0x80],             // overlong U+0000
    &[0xED, 0xA0, 0x80],       // surrogate U+D800
    &[0xF4, 0x90, 0x80, 0x80], // above U+10FFFF
    &[0xE2, 0x82, b' '],       // missing continuation
];

/// Generate UTF-8 text of exactly `target_size` bytes.
///
/// Text is broken into lines of roughly 80 bytes and padded with spaces when
/// the next code point would not fit.
pub fn generate_utf8(target_size: usize, pattern: Utf8Pattern, seed: Option<u64>) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED));
    let mut result = Vec::with_capacity(target_size);
    let mut line_start = 0;
    let mut next_corruption = rng.gen_range(64..256);

    while result.len() < target_size {
        if result.len() - line_start >= LINE_WIDTH {
            result.push(b'\n');
            line_start = result.len();
            continue;
        }

        if pattern == Utf8Pattern::Corrupt && result.len() >= next_corruption {
            let bad = CORRUPTIONS[rng.gen_range(0..CORRUPTIONS.len())];
            if result.len() + bad.len() > target_size {
                break;
            }
            result.extend_from_slice(bad);
            next_corruption = result.len() + rng.gen_range(64..256);
            continue;
        }

        let cp = pick_code_point(&mut rng, pattern);
        if result.len() + encoded_len(cp) > target_size {
            break;
        }
        encode_one(cp, &mut result);
    }

    // Pad with ASCII if needed
    result.resize(target_size, b' ');
    result
}

fn pick_code_point(rng: &mut ChaCha8Rng, pattern: Utf8Pattern) -> u32 {
    match pattern {
        Utf8Pattern::Ascii => rng.gen_range(0x20..0x7F),
        Utf8Pattern::Latin => rng.gen_range(0xC0..=0x24F),
        Utf8Pattern::Cjk => rng.gen_range(0x4E00..=0x9FFF),
        Utf8Pattern::Emoji => rng.gen_range(0x1F300..=0x1F64F),
        Utf8Pattern::Mixed => match rng.gen_range(0..100) {
            0..=69 => rng.gen_range(0x20..0x7F),
            70..=89 => rng.gen_range(0xC0..=0x24F),
            90..=97 => rng.gen_range(0x4E00..=0x9FFF),
            _ => rng.gen_range(0x1F300..=0x1F64F),
        },
        Utf8Pattern::AllLengths | Utf8Pattern::Corrupt => {
            let range = match rng.gen_range(1..=4) {
                1 => 0x20..=0x7E,
                2 => 0x80..=0x7FF,
                3 => 0x800..=0xFFFF,
                _ => 0x10000..=0x10FFFF,
            };
            random_valid(rng, range)
        }
        Utf8Pattern::Supplementary => random_valid(rng, 0..=0x10FFFF),
    }
}

/// Draw from `range` until the value is not a surrogate.
fn random_valid(rng: &mut ChaCha8Rng, range: std::ops::RangeInclusive<u32>) -> u32 {
    loop {
        let cp = rng.gen_range(range.clone());
        if is_code_point_valid(cp) {
            return cp;
        }
    }
}
