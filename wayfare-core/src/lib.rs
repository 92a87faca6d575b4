pub mod ids;
pub mod payment;
pub mod supplier;

pub use ids::{IdGenerator, TimeRandomIdGenerator};
pub use payment::{choose_payment_provider, PaymentDecision, PaymentProvider};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatchError { expected: String, found: String },
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    pub fn currency_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::CurrencyMismatchError {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Stable machine-readable name, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::ValidationError(_) => "validation_error",
            CoreError::CurrencyMismatchError { .. } => "currency_mismatch_error",
            CoreError::ConfigurationError(_) => "configuration_error",
        }
    }
}

impl From<wayfare_shared::InvalidCurrency> for CoreError {
    fn from(err: wayfare_shared::InvalidCurrency) -> Self {
        CoreError::ValidationError(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_and_messages() {
        let err = CoreError::currency_mismatch("AUD", "USD");
        assert_eq!(err.kind(), "currency_mismatch_error");
        assert_eq!(err.to_string(), "Currency mismatch: expected AUD, found USD");

        let err: CoreError = "dollars".parse::<wayfare_shared::CurrencyCode>().unwrap_err().into();
        assert_eq!(err.kind(), "validation_error");
    }
}
