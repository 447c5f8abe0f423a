use thiserror::Error;

/// A formula hit a zero (or non-finite) denominator.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("Numeric fault while computing {quantity}: zero or non-finite denominator")]
pub struct NumericError {
    pub quantity: &'static str,
}

impl NumericError {
    pub const fn new(quantity: &'static str) -> Self {
        Self { quantity }
    }
}

/// Returns `Err` unless `denominator` is finite and non-zero.
#[inline]
pub(crate) fn check_denominator(
    denominator: f64,
    quantity: &'static str,
) -> Result<f64, NumericError> {
    if denominator == 0.0 || !denominator.is_finite() {
        Err(NumericError::new(quantity))
    } else {
        Ok(denominator)
    }
}
