//! Brazilian-locale number parsing.

/// Parse a number written with `.` as thousands separator and `,` as
/// decimal separator (e.g. `"1.234.567,89"` → `1234567.89`).
///
/// Every `.` is removed and every `,` becomes `.` before parsing, so a plain
/// `"1234.5"` reads as `12345`. Returns `None` for blank or unparsable text
/// and for non-finite results.
pub fn parse_locale_number(text: &str) -> Option<f64> {
    let normalized: String = text
        .trim()
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
