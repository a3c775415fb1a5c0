pub struct StatsHelper;

impl StatsHelper {
    /// Arithmetic mean; `None` for an empty sequence.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Absolute successive differences of absolute values, with the
    /// first element defined as zero.
    pub fn abs_diff_series(values: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(values.len());
        let mut prev: Option<f64> = None;
        for &value in values {
            let current = value.abs();
            out.push(match prev {
                Some(p) => (current - p).abs(),
                None => 0.0,
            });
            prev = Some(current);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(StatsHelper::mean(&[]), None);
    }

    #[test]
    fn mean_handles_single_value() {
        assert_eq!(StatsHelper::mean(&[4.0]), Some(4.0));
    }

    #[test]
    fn abs_diff_series_first_element_is_zero() {
        assert_eq!(StatsHelper::abs_diff_series(&[-700.0]), vec![0.0]);
    }

    #[test]
    fn abs_diff_series_works_on_magnitudes() {
        // Signs are stripped before differencing.
        let diffs = StatsHelper::abs_diff_series(&[-800.0, -650.0, 650.0]);
        assert_eq!(diffs, vec![0.0, 150.0, 0.0]);
    }
}
