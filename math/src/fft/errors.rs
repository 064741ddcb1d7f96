use core::fmt;

/// Errors raised by the NTT/FFT toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FFTError {
    /// A transform was asked to run over a domain whose length is not a
    /// power of two.
    LengthNotPowerOfTwo(usize),
    /// The supplied root does not have the exact order the transform needs.
    RootOrderMismatch,
    /// `fast_interpolate`/`Polynomial::interpolate` was given a domain with
    /// repeated points.
    NonUniqueDomain,
}

impl fmt::Display for FFTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FFTError::LengthNotPowerOfTwo(n) => write!(f, "length {n} is not a power of two"),
            FFTError::RootOrderMismatch => write!(f, "root does not have the required order"),
            FFTError::NonUniqueDomain => write!(f, "domain points are not unique"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FFTError {}
