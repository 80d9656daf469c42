use std::{error, fmt};

/// Configuration rejected by `PidConfig::validate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A numeric field is NaN or infinite.
    NonFinite(&'static str, f32),
    /// The scale factor is zero.
    ZeroScale,
    /// The upper target bound is below the lower bound.
    InvertedTargetRange(f32, f32),
    /// The upper output bound is below the lower bound.
    InvertedOutputRange(f32, f32),
    /// The input filter gain lies outside `[0, 1]`.
    FilterGainOutOfRange(f32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonFinite(field, value) => write!(f, "{} is not finite: {}", field, value),
            Error::ZeroScale => write!(f, "scale must be nonzero"),
            Error::InvertedTargetRange(min, max) => {
                write!(f, "target range is inverted: [{}, {}]", min, max)
            }
            Error::InvertedOutputRange(min, max) => {
                write!(f, "output range is inverted: [{}, {}]", min, max)
            }
            Error::FilterGainOutOfRange(gain) => {
                write!(f, "input filter gain must lie in [0, 1]: {}", gain)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
