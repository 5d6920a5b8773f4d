//! Size-profile calculation.
//!
//! Apparel charts publish even-numbered sizes only, so the raw girth measurement
//! (bust for jackets, pant waist for pants) is normalized to the nearest even
//! integer before the fit preferences are appended. The length/width preferences
//! are labels, not measurements, and pass through untouched.

/// Normalizes a raw measurement string to the nearest even integer.
///
/// Returns `None` when the input does not parse as a number; callers omit the
/// numeric component of the label instead of substituting a default. Odd values
/// sit exactly between two chart sizes and resolve to the lower one.
pub fn round_to_nearest_even(value: &str) -> Option<i64> {
    let num: f64 = value.trim().parse().ok()?;

    // "inf" and "NaN" parse as floats but are not chart sizes
    if !num.is_finite() {
        return None;
    }

    let lower = (num / 2.0).floor() * 2.0;
    let upper = (num / 2.0).ceil() * 2.0;

    if num - lower <= upper - num {
        Some(lower as i64)
    } else {
        Some(upper as i64)
    }
}

/// Builds the published jacket size, e.g. `"38 Slim, Regular"`.
///
/// When the bust measurement is unparseable the label degrades to just the
/// preference tokens rather than failing the submission.
pub fn format_jacket_size(bust: &str, length_pref: &str, width_pref: &str) -> String {
    format_size(bust, length_pref, width_pref)
}

/// Builds the published pant size from the pant waist. Same contract as
/// [`format_jacket_size`].
pub fn format_pant_size(pant_waist: &str, length_pref: &str, width_pref: &str) -> String {
    format_size(pant_waist, length_pref, width_pref)
}

fn format_size(measurement: &str, length_pref: &str, width_pref: &str) -> String {
    match round_to_nearest_even(measurement) {
        Some(even) => format!("{even} {length_pref}, {width_pref}"),
        None => format!("{length_pref}, {width_pref}"),
    }
}
