//! Fixed-precision rounding for converted magnitudes

/// Round `value` to `precision` decimal places, ties away from zero.
///
/// When `10^precision` (or the scaled value) is not representable the
/// input is returned unchanged rather than producing NaN or infinity.
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(i32::MAX as u32) as i32);
    let scaled = value * factor;

    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }

    scaled.round() / factor
}

/// Round and render with the shortest decimal text that reads back as the
/// same number (`37.5`, `2`, `26.66667`).
pub fn format_rounded(value: f64, precision: u32) -> String {
    let rounded = round(value, precision);

    // Avoid printing "-0" for tiny negative inputs rounded to zero
    if rounded == 0.0 {
        return "0".to_string();
    }

    format!("{}", rounded)
}
