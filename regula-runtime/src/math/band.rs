/// Closed interval on the real line.
///
/// A band is used both for the acceptance range around the target and for
/// the output clamp. The lower bound never exceeds the upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    min: f32,
    max: f32,
}

impl Band {
    /// Construct a band from its bounds.
    ///
    /// Returns `None` if `max` is less than `min`.
    pub fn new(min: f32, max: f32) -> Option<Self> {
        if max < min {
            None
        } else {
            Some(Self { min, max })
        }
    }

    /// Construct a zero width band.
    #[inline]
    pub fn point(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Construct a band of `radius` on either side of `center`.
    ///
    /// Returns `None` for a negative radius.
    #[inline]
    pub fn symmetric(center: f32, radius: f32) -> Option<Self> {
        Self::new(center - radius, center + radius)
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Test if the value lies inside the band, bounds included.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        super::within(value, self.min, self.max)
    }

    /// Return the value inside the band nearest to `value`.
    #[inline]
    pub fn contain(&self, value: f32) -> f32 {
        super::contain(value, self.min, self.max)
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.min, self.max)
    }
}
