use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product `{product_id}` is not in the catalog")]
    ProductNotFound { product_id: ProductId },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable, machine-readable class used by operator-facing output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::ProductNotFound { .. }) => "product_not_found",
            Self::Domain(DomainError::InvariantViolation(_)) => "cart_invariant",
            Self::Persistence(_) => "persistence",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::ProductNotFound { .. }) => {
                "The requested product does not exist. Check the product id and try again."
            }
            Self::Domain(DomainError::InvariantViolation(_)) => {
                "The cart could not be updated because its contents are inconsistent."
            }
            Self::Persistence(_) => "The cart could not be loaded or saved. Please retry shortly.",
            Self::Configuration(_) => "An unexpected configuration error occurred.",
        }
    }
}
