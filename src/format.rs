pub const DEFAULT_DECIMAL_PLACES: usize = 2;

const KIB_SUFFIXES: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
const BYTE_SUFFIXES: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Formats a kibibyte count, moving up a unit only while the value is
/// strictly greater than 1024. Exactly 1024 KiB stays `1024.00 KiB`.
pub fn kibibytes_to_human(kibibytes: u64, decimal_places: usize) -> String {
    let mut value = kibibytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < KIB_SUFFIXES.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.decimal_places$} {}", KIB_SUFFIXES[unit])
}

/// Formats a byte count, moving up a unit while the value is at least 1024.
pub fn bytes_to_human(bytes: u64, decimal_places: usize) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_SUFFIXES.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.decimal_places$} {}", BYTE_SUFFIXES[unit])
}
