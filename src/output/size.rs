//! Human-readable byte sizes.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary (1024-based) units and two decimals.
///
/// The largest unit keeping the value below 1024 is chosen; anything at
/// or above 1024 TB is shown in PB.
///
/// # Examples
///
/// ```
/// use mediadupe::output::format_size;
///
/// assert_eq!(format_size(0), "0.00 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1_073_741_824), "1.00 GB");
/// ```
#[must_use]
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
