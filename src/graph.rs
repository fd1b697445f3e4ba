//! Fixed-width text bar graphs.
//!
//! The memory and disk reports use different conventions and both are kept:
//! [`ratio_bar`] truncates and never fails, [`percent_bar`] rounds half to
//! even and rejects values outside `0..=100`.

use thiserror::Error;

pub const DEFAULT_LENGTH: usize = 20;

const RATIO_FILL: char = '#';
const PERCENT_FILL: char = '=';
const EMPTY: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraphError {
    #[error("percent must be between 0.0 and 100.0, got {0}")]
    PercentOutOfRange(f64),
}

/// Bar for a ratio in `0.0..=1.0`, filled with `#`.
///
/// The filled count is `trunc(ratio * length)`. Out-of-range ratios are
/// clamped so the result is always `length` characters.
pub fn ratio_bar(ratio: f64, length: usize) -> String {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    let filled = (ratio * length as f64) as usize;
    fill(filled, length, RATIO_FILL)
}

/// Bar for a percentage in `0.0..=100.0`, filled with `=`.
///
/// The filled count is `percent / 100 * length` rounded half to even.
pub fn percent_bar(percent: f64, length: usize) -> Result<String, GraphError> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(GraphError::PercentOutOfRange(percent));
    }
    let filled = (percent / 100.0 * length as f64).round_ties_even() as usize;
    Ok(fill(filled, length, PERCENT_FILL))
}

fn fill(filled: usize, length: usize, mark: char) -> String {
    let filled = filled.min(length);
    let mut bar = String::with_capacity(length);
    bar.extend(std::iter::repeat_n(mark, filled));
    bar.extend(std::iter::repeat_n(EMPTY, length - filled));
    bar
}
