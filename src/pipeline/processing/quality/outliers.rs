/// Tukey IQR fences for a set of numeric values.
///
/// Quartiles are positional, not interpolated: q1 is the sorted value at
/// index n/4 and q3 the value at index 3n/4. Fewer than four values cannot
/// support a fence, so the bounds come back unbounded and reject nothing.
pub fn outlier_bounds(values: &[f64]) -> (f64, f64) {
    if values.len() < 4 {
        return (f64::NEG_INFINITY, f64::INFINITY);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = sorted[sorted.len() / 4];
    let q3 = sorted[(sorted.len() * 3) / 4];
    let iqr = q3 - q1;

    (q1 - 1.5 * iqr, q3 + 1.5 * iqr)
}
