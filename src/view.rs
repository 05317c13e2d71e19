//! Data ranges.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Smallest range covering every finite value, if any.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut range: Option<Self> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Range anchored at zero whose upper bound carries `headroom` extra
    /// fraction above `max`.
    pub fn zero_based_with_headroom(max: f64, headroom: f64) -> Self {
        Self::new(0.0, max * (1.0 + headroom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_skips_non_finite() {
        let range = Range::from_values([3.0, f64::NAN, -1.0, 7.5, f64::INFINITY]).unwrap();
        assert_eq!(range, Range::new(-1.0, 7.5));
        assert!(Range::from_values(std::iter::empty()).is_none());
    }

    #[test]
    fn headroom_extends_upper_bound() {
        let range = Range::zero_based_with_headroom(500.0, 0.1);
        assert_eq!(range.min, 0.0);
        assert!((range.max - 550.0).abs() < 1e-9);
    }
}
