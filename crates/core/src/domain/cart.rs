use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;
use crate::errors::DomainError;
use crate::pricing::cart_total;

/// One product in a cart. `price` is the unit price captured when the product was first added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

impl CartLine {
    pub fn subtotal(&self) -> Result<Decimal, DomainError> {
        self.price.checked_mul(Decimal::from(self.quantity)).ok_or_else(|| {
            DomainError::InvariantViolation(format!(
                "subtotal of `{}` overflows ({} x {})",
                self.product_id, self.quantity, self.price
            ))
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cart whose total is derived from `lines`, rejecting lines that break the cart
    /// invariants.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, DomainError> {
        let cart = Self::with_lines(lines)?;
        cart.validate()?;
        Ok(cart)
    }

    pub(crate) fn with_lines(lines: Vec<CartLine>) -> Result<Self, DomainError> {
        let total = cart_total(&lines)?;
        Ok(Self { lines, total })
    }

    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::with_capacity(self.lines.len());

        for line in &self.lines {
            if !seen.insert(&line.product_id) {
                return Err(DomainError::InvariantViolation(format!(
                    "cart contains product `{}` more than once",
                    line.product_id
                )));
            }
            if line.quantity == 0 {
                return Err(DomainError::InvariantViolation(format!(
                    "cart line `{}` has zero quantity",
                    line.product_id
                )));
            }
            if line.price < Decimal::ZERO {
                return Err(DomainError::InvariantViolation(format!(
                    "cart line `{}` has negative price {}",
                    line.product_id, line.price
                )));
            }
        }

        let expected = cart_total(&self.lines)?;
        if self.total != expected {
            return Err(DomainError::InvariantViolation(format!(
                "cart total {} does not match line sum {expected}",
                self.total
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    use super::{Cart, CartLine};

    fn line(product_id: &str, quantity: u32, price: Decimal) -> CartLine {
        CartLine { product_id: ProductId(product_id.to_owned()), quantity, price }
    }

    #[test]
    fn from_lines_derives_total() {
        let cart = Cart::from_lines(vec![
            line("mustard", 1, Decimal::new(25, 1)),
            line("ketchup", 2, Decimal::new(2, 0)),
        ])
        .expect("valid lines");

        assert_eq!(cart.total, Decimal::new(65, 1));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn empty_cart_is_valid() {
        let cart = Cart::empty();
        cart.validate().expect("empty cart");
        assert!(cart.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[test]
    fn rejects_duplicate_products() {
        let error = Cart::from_lines(vec![
            line("mustard", 1, Decimal::new(25, 1)),
            line("mustard", 1, Decimal::new(25, 1)),
        ])
        .expect_err("duplicate product");

        assert!(matches!(error, DomainError::InvariantViolation(ref message) if message.contains("more than once")));
    }

    #[test]
    fn rejects_zero_quantity() {
        let error = Cart::from_lines(vec![line("mustard", 0, Decimal::new(25, 1))])
            .expect_err("zero quantity");
        assert!(matches!(error, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn rejects_stale_total() {
        let cart = Cart {
            lines: vec![line("mustard", 1, Decimal::new(25, 1))],
            total: Decimal::new(3, 0),
        };

        assert!(cart.validate().is_err());
    }

    #[test]
    fn total_comparison_ignores_scale() {
        let cart = Cart {
            lines: vec![line("ketchup", 1, Decimal::new(2, 0))],
            total: Decimal::new(200, 2),
        };

        cart.validate().expect("2.00 equals 2");
    }

    #[test]
    fn rejects_subtotal_overflow() {
        let cart = Cart { lines: vec![line("gold", 2, Decimal::MAX)], total: Decimal::MAX };

        let error = cart.validate().expect_err("overflowing subtotal");
        assert!(matches!(error, DomainError::InvariantViolation(ref message) if message.contains("gold")));
    }
}
