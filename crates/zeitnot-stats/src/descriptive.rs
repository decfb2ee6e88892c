//! Zero-guarded means and rates.
//!
//! Every function in this module treats an empty dataset as "no data"
//! and returns `None` rather than producing NaN or panicking. Callers
//! that aggregate nullable observations (clock annotations may be
//! missing per ply) can feed whatever is present and let the `Option`
//! carry the distinction between "zero" and "unknown".

/// Arithmetic mean of the values, or `None` when the iterator is empty.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<I>(values: I) -> Option<f32>
where
    I: IntoIterator<Item = f32>,
{
    let mut acc = RunningMean::default();
    for value in values {
        acc.push(value);
    }
    acc.mean()
}

/// `count / total` as a fraction, or `None` when `total` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rate(count: u32, total: u32) -> Option<f32> {
    if total == 0 {
        None
    } else {
        Some(count as f32 / total as f32)
    }
}

/// Single-pass mean accumulator.
///
/// # Examples
///
/// ```
/// use zeitnot_stats::descriptive::RunningMean;
///
/// let mut acc = RunningMean::default();
/// assert_eq!(acc.mean(), None);
/// acc.push(2.0);
/// acc.push(4.0);
/// assert_eq!(acc.mean(), Some(3.0));
/// assert_eq!(acc.sum(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningMean {
    sum: f32,
    count: u32,
}

impl RunningMean {
    /// Adds one observation.
    pub fn push(&mut self, value: f32) {
        self.sum += value;
        self.count += 1;
    }

    /// Sum of all observations so far (0 when empty).
    #[must_use]
    pub fn sum(&self) -> f32 {
        self.sum
    }

    /// Number of observations so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of the observations, or `None` when none were pushed.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> Option<f32> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean([1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn rate_guards_zero_denominator() {
        assert_eq!(rate(5, 0), None);
        assert_eq!(rate(1, 4), Some(0.25));
        assert_eq!(rate(0, 4), Some(0.0));
    }

    #[test]
    fn running_mean_accumulates() {
        let mut acc = RunningMean::default();
        for v in [10.0, 20.0, 30.0] {
            acc.push(v);
        }
        assert_eq!(acc.count(), 3);
        assert_eq!(acc.sum(), 60.0);
        assert_eq!(acc.mean(), Some(20.0));
    }
}
