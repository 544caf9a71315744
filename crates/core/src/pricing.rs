use rust_decimal::Decimal;

use crate::domain::cart::CartLine;
use crate::errors::DomainError;

/// Flat unit pricing: sum of `price * quantity` over every line.
pub fn cart_total(lines: &[CartLine]) -> Result<Decimal, DomainError> {
    lines.iter().try_fold(Decimal::ZERO, |total, line| {
        total.checked_add(line.subtotal()?).ok_or_else(|| {
            DomainError::InvariantViolation(format!(
                "cart total overflows after adding line `{}`",
                line.product_id
            ))
        })
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::{cart::CartLine, product::ProductId};
    use crate::errors::DomainError;

    use super::cart_total;

    #[test]
    fn empty_lines_total_zero() {
        assert_eq!(cart_total(&[]), Ok(Decimal::ZERO));
    }

    #[test]
    fn sums_quantity_times_price() {
        let lines = vec![
            CartLine {
                product_id: ProductId("mustard".to_owned()),
                quantity: 3,
                price: Decimal::new(25, 1),
            },
            CartLine {
                product_id: ProductId("ketchup".to_owned()),
                quantity: 2,
                price: Decimal::new(199, 2),
            },
        ];

        assert_eq!(cart_total(&lines), Ok(Decimal::new(1148, 2)));
    }

    #[test]
    fn overflowing_sum_is_an_invariant_violation() {
        let lines = vec![
            CartLine { product_id: ProductId("gold".to_owned()), quantity: 1, price: Decimal::MAX },
            CartLine {
                product_id: ProductId("platinum".to_owned()),
                quantity: 1,
                price: Decimal::MAX,
            },
        ];

        assert!(matches!(
            cart_total(&lines),
            Err(DomainError::InvariantViolation(ref message)) if message.contains("platinum")
        ));
    }
}
