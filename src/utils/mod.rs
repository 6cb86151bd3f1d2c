mod aggregation;
mod extract;

pub use aggregation::{mean, series_means};
pub use extract::{extract_number, find_numbers, ExtractError, DEFAULT_INDEX};
