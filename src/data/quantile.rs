use crate::error::EmptyInputError;

// ---------------------------------------------------------------------------
// Percentile of a magnitude sample
// ---------------------------------------------------------------------------

/// Percentile `p` (in `0..=100`) of `values`.
///
/// Works on a sorted copy; `values` is left untouched. The position is
/// `(n - 1) * p / 100`. An integral position returns that order statistic;
/// a fractional one returns the lower neighbour without interpolating, which
/// keeps bucket boundaries on values that actually occur in the feed.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, EmptyInputError> {
    if values.is_empty() {
        return Err(EmptyInputError);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let p = p.clamp(0.0, 100.0);
    let index = (sorted.len() - 1) as f64 * p / 100.0;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if upper == lower {
        return Ok(sorted[lower]);
    }
    // Adjacent order statistics: no interpolation.
    Ok(sorted[lower])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(percentile(&[], 50.0), Err(EmptyInputError));
    }

    #[test]
    fn extremes_are_min_and_max() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.0), Ok(1.0));
        assert_eq!(percentile(&v, 100.0), Ok(4.0));
    }

    #[test]
    fn median_of_odd_length_hits_exact_index() {
        assert_eq!(percentile(&[5.0, 1.0, 3.0, 2.0, 4.0], 50.0), Ok(3.0));
    }

    #[test]
    fn median_of_even_length_takes_lower_neighbour() {
        // index 1.5 -> lower order statistic, no averaging
        assert_eq!(percentile(&[4.0, 3.0, 2.0, 1.0], 50.0), Ok(2.0));
    }

    #[test]
    fn caller_buffer_is_not_reordered() {
        let v = vec![3.0, 1.0, 2.0];
        let _ = percentile(&v, 50.0);
        assert_eq!(v, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn single_value_is_every_percentile() {
        for p in [0.0, 12.5, 50.0, 100.0] {
            assert_eq!(percentile(&[2.7], p), Ok(2.7));
        }
    }
}
