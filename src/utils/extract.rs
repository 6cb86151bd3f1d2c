use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Index of the number taken from a command's output when none is configured:
/// the last one, since benchmarks tend to print their result at the end.
pub const DEFAULT_INDEX: i64 = -1;

// ASCII digits only, so that every match parses as an f64
static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-+]?[0-9]*\.[0-9]+|[-+]?[0-9]+").expect("number pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no number could be parsed from the output")]
    NoNumber,
    #[error("index {index} is out of range, the output contains {count} number(s)")]
    IndexOutOfRange { index: i64, count: usize },
}

/// All numeric literals in `text`, left to right.
pub fn find_numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Picks one number out of free-form `text`.
///
/// `index` follows the usual negative indexing convention: `0` is the first
/// number, `-1` the last one.
pub fn extract_number(text: &str, index: i64) -> Result<f64, ExtractError> {
    let numbers = find_numbers(text);
    if numbers.is_empty() {
        return Err(ExtractError::NoNumber);
    }

    let count = numbers.len();
    let position = if index < 0 {
        i64::try_from(count).ok().map(|count| count + index)
    } else {
        Some(index)
    };

    position
        .and_then(|position| usize::try_from(position).ok())
        .and_then(|position| numbers.get(position).copied())
        .ok_or(ExtractError::IndexOutOfRange { index, count })
}
