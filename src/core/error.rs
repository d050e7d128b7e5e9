use thiserror::Error;

/// Rejection raised while normalizing a raw profile. The engine itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    #[error("horizonYears must be >= 1, got {value}")]
    NonPositiveHorizon { value: f64 },
    #[error("{field} must be >= 0, got {value}")]
    NegativeAge { field: &'static str, value: f64 },
    #[error("{field} is required")]
    MissingRequiredField { field: &'static str },
    #[error("{field} must be a finite number")]
    NonFiniteNumber { field: &'static str },
    #[error("{field} must be > -100%, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
}

impl InvalidInputError {
    /// Stable identifier for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            InvalidInputError::NonPositiveHorizon { .. } => "non_positive_horizon",
            InvalidInputError::NegativeAge { .. } => "negative_age",
            InvalidInputError::MissingRequiredField { .. } => "missing_required_field",
            InvalidInputError::NonFiniteNumber { .. } => "non_finite_number",
            InvalidInputError::RateOutOfRange { .. } => "rate_out_of_range",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            InvalidInputError::NonPositiveHorizon { .. } => "horizonYears",
            InvalidInputError::NegativeAge { field, .. }
            | InvalidInputError::MissingRequiredField { field }
            | InvalidInputError::NonFiniteNumber { field }
            | InvalidInputError::RateOutOfRange { field, .. } => *field,
        }
    }
}
