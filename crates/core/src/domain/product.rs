use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub price: Decimal,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, price: Decimal) -> Result<Self, DomainError> {
        let id = id.into();
        if id.0.trim().is_empty() {
            return Err(DomainError::InvariantViolation("product id must not be blank".to_owned()));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::InvariantViolation(format!(
                "product `{id}` has negative price {price}"
            )));
        }

        Ok(Self { id, price })
    }
}
