//! Helpers for presenting a compression result to the user.

use crate::encode::OutputFormat;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Most decimals `format_bytes` will print, matching JS `toFixed`.
pub const MAX_DECIMALS: usize = 100;

/// Human-readable byte count using base-1024 units.
///
/// Trailing zeros after the decimal point are dropped, so `1536` with two
/// decimals is `"1.5 KB"` and `1024` is `"1 KB"`. `decimals` is capped at
/// [`MAX_DECIMALS`].
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let decimals = decimals.min(MAX_DECIMALS);

    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut number = format!("{value:.decimals$}");
    if number.contains('.') {
        let trimmed = number.trim_end_matches('0').trim_end_matches('.').len();
        number.truncate(trimmed);
    }
    format!("{number} {}", UNITS[exponent])
}

/// Download name for a compressed file: `<stem>_optimized.<ext>`.
///
/// The stem is everything before the last dot. A name without a dot has no
/// stem, and an empty stem becomes `image`.
pub fn output_file_name(original: &str, format: OutputFormat) -> String {
    let stem = match original.rfind('.') {
        Some(dot) => &original[..dot],
        None => "",
    };
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{stem}_optimized.{}", format.extension())
}
