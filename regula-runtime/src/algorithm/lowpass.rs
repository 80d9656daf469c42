/// Exponential smoothing of an input signal.
///
/// The filter keeps no history of its own. The caller passes the previous
/// (already smoothed) value with every sample, which lets the controller share
/// a single input history between the filter and the derivative term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpSmoothing {
    /// Smoothing factor.
    ///
    /// Increasing this factor will favor the current sample over the
    /// previous trend. At zero the input is ignored entirely.
    alpha: f32,
}

impl ExpSmoothing {
    /// Construct the filter.
    ///
    /// Returns `None` unless `alpha` lies in `[0, 1]`.
    pub fn new(alpha: f32) -> Option<Self> {
        if crate::math::within(alpha, 0.0, 1.0) {
            Some(Self { alpha })
        } else {
            None
        }
    }

    /// Smoothing factor.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Blend the next value with the previous estimate.
    #[inline]
    pub fn blend(&self, value: f32, previous: f32) -> f32 {
        (self.alpha * value) + ((1.0 - self.alpha) * previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_range() {
        assert!(ExpSmoothing::new(0.0).is_some());
        assert!(ExpSmoothing::new(1.0).is_some());
        assert!(ExpSmoothing::new(0.3).is_some());
        assert!(ExpSmoothing::new(-1.0).is_none());
        assert!(ExpSmoothing::new(1.5).is_none());
        assert!(ExpSmoothing::new(f32::NAN).is_none());
    }

    #[test]
    fn test_blend_extremes() {
        let hold = ExpSmoothing::new(0.0).unwrap();
        assert_eq!(hold.blend(100.0, 3.0), 3.0);

        let pass = ExpSmoothing::new(1.0).unwrap();
        assert_eq!(pass.blend(100.0, 3.0), 100.0);
    }

    #[test]
    fn test_blend_converges() {
        let filter = ExpSmoothing::new(0.5).unwrap();

        let mut estimate = 0.0;
        for _ in 0..32 {
            estimate = filter.blend(10.0, estimate);
        }

        let tolerance = 0.001;
        assert!((estimate - 10.0).abs() < tolerance);
    }
}
