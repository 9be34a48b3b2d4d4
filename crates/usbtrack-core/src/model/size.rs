/// Size formatting utilities — human-readable byte counts.
///
/// All capacities are `u64` bytes. Floating point is only used
/// at the display-formatting boundary.

/// Units walked by [`format_size`]; anything still >= 1024 TB is shown in PB.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count into a human-readable string with appropriate unit.
///
/// Uses binary units (1 KB = 1024 B). The value is divided by 1024 until it
/// drops below 1024, and always carries two decimals: `1023` becomes
/// `"1023.00 B"`, `1024` becomes `"1.00 KB"`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Format an event or device count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
