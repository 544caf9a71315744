use crate::catalog::PriceLookup;
use crate::domain::cart::{Cart, CartLine};
use crate::domain::product::ProductId;
use crate::errors::DomainError;

/// Returns a new cart with one more unit of `product_id`.
///
/// A product already in the cart has its quantity incremented in place, keeping its captured
/// price and position. Any other product is appended at quantity 1 with its current catalog
/// price. The input cart is left untouched.
pub fn add_product_to_cart<L>(
    cart: &Cart,
    catalog: &L,
    product_id: &ProductId,
) -> Result<Cart, DomainError>
where
    L: PriceLookup + ?Sized,
{
    let price = catalog
        .lookup(product_id)
        .ok_or_else(|| DomainError::ProductNotFound { product_id: product_id.clone() })?;

    let mut lines = cart.lines.clone();
    match lines.iter_mut().find(|line| &line.product_id == product_id) {
        Some(line) => {
            line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
                DomainError::InvariantViolation(format!(
                    "quantity of `{product_id}` cannot exceed {}",
                    u32::MAX
                ))
            })?;
        }
        None => lines.push(CartLine { product_id: product_id.clone(), quantity: 1, price }),
    }

    Cart::with_lines(lines)
}
