use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use shopcart_core::add_to_cart::add_product_to_cart;
use shopcart_core::catalog::Catalog;
use shopcart_core::domain::cart::Cart;
use shopcart_core::domain::product::ProductId;
use shopcart_core::errors::{ApplicationError, DomainError};

use crate::repositories::{
    CartRepository, InMemoryCartRepository, InMemoryProductRepository, ProductRepository,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProductToCartRequest {
    pub product_id: ProductId,
}

impl AddProductToCartRequest {
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self { product_id: product_id.into() }
    }
}

/// Owns one cart and replaces it with the result of every dispatched operation.
pub struct CartStore {
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
    dispatch_lock: Mutex<()>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::default()),
            Arc::new(InMemoryCartRepository::default()),
        )
    }
}

impl CartStore {
    pub fn new(products: Arc<dyn ProductRepository>, carts: Arc<dyn CartRepository>) -> Self {
        Self { products, carts, dispatch_lock: Mutex::new(()) }
    }

    pub async fn add_product_to_cart(
        &self,
        request: AddProductToCartRequest,
    ) -> Result<Cart, ApplicationError> {
        let _dispatch = self.dispatch_lock.lock().await;

        let current = self.carts.load().await?;
        let product = self.products.find_by_id(&request.product_id).await?;
        let catalog: Catalog = product.into_iter().collect();

        let next = match add_product_to_cart(&current, &catalog, &request.product_id) {
            Ok(next) => next,
            Err(error) => {
                if let DomainError::ProductNotFound { product_id } = &error {
                    warn!(
                        event_name = "cart.product_not_found",
                        product_id = %product_id,
                        "product is not in the catalog; cart left unchanged"
                    );
                }
                return Err(error.into());
            }
        };

        self.carts.save(next.clone()).await?;

        let quantity = next.line(&request.product_id).map(|line| line.quantity).unwrap_or_default();
        info!(
            event_name = "cart.product_added",
            product_id = %request.product_id,
            quantity,
            line_count = next.lines.len(),
            total = %next.total,
            "product added to cart"
        );

        Ok(next)
    }

    pub async fn select_cart(&self) -> Result<Cart, ApplicationError> {
        Ok(self.carts.load().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use shopcart_core::domain::cart::{Cart, CartLine};
    use shopcart_core::domain::product::{Product, ProductId};
    use shopcart_core::errors::{ApplicationError, DomainError};

    use crate::repositories::{InMemoryCartRepository, InMemoryProductRepository};

    use super::{AddProductToCartRequest, CartStore};

    fn line(product_id: &str, quantity: u32, price: Decimal) -> CartLine {
        CartLine { product_id: ProductId::from(product_id), quantity, price }
    }

    fn store_with(cart: Cart) -> CartStore {
        let products = InMemoryProductRepository::with_products([
            Product::new("mustard", Decimal::new(25, 1)).expect("mustard"),
            Product::new("ketchup", Decimal::new(2, 0)).expect("ketchup"),
        ]);
        CartStore::new(Arc::new(products), Arc::new(InMemoryCartRepository::with_cart(cart)))
    }

    #[tokio::test]
    async fn adding_mustard_to_an_empty_cart() {
        let store = store_with(Cart::empty());

        store
            .add_product_to_cart(AddProductToCartRequest::new("mustard"))
            .await
            .expect("add mustard");

        let cart = store.select_cart().await.expect("select cart");
        assert_eq!(cart, Cart::from_lines(vec![line("mustard", 1, Decimal::new(25, 1))]).expect("cart"));
        assert_eq!(cart.total, Decimal::new(25, 1));
    }

    #[tokio::test]
    async fn adding_ketchup_to_a_cart_holding_mustard() {
        let store = store_with(
            Cart::from_lines(vec![line("mustard", 1, Decimal::new(25, 1))]).expect("seed"),
        );

        store
            .add_product_to_cart(AddProductToCartRequest::new("ketchup"))
            .await
            .expect("add ketchup");

        let cart = store.select_cart().await.expect("select cart");
        assert_eq!(
            cart.lines,
            vec![line("mustard", 1, Decimal::new(25, 1)), line("ketchup", 1, Decimal::new(2, 0))]
        );
        assert_eq!(cart.total, Decimal::new(45, 1));
    }

    #[tokio::test]
    async fn adding_a_second_ketchup() {
        let store = store_with(
            Cart::from_lines(vec![
                line("mustard", 1, Decimal::new(25, 1)),
                line("ketchup", 1, Decimal::new(2, 0)),
            ])
            .expect("seed"),
        );

        store
            .add_product_to_cart(AddProductToCartRequest::new("ketchup"))
            .await
            .expect("add ketchup");

        let cart = store.select_cart().await.expect("select cart");
        assert_eq!(
            cart.lines,
            vec![line("mustard", 1, Decimal::new(25, 1)), line("ketchup", 2, Decimal::new(2, 0))]
        );
        assert_eq!(cart.total, Decimal::new(65, 1));
    }

    #[tokio::test]
    async fn unknown_product_leaves_stored_cart_unchanged() {
        let seed = Cart::from_lines(vec![line("mustard", 1, Decimal::new(25, 1))]).expect("seed");
        let store = store_with(seed.clone());

        let error = store
            .add_product_to_cart(AddProductToCartRequest::new("mayo"))
            .await
            .expect_err("mayo is not listed");

        assert_eq!(
            error,
            ApplicationError::Domain(DomainError::ProductNotFound {
                product_id: ProductId::from("mayo")
            })
        );
        assert_eq!(store.select_cart().await.expect("select cart"), seed);
    }

    #[tokio::test]
    async fn concurrent_dispatches_are_serialized() {
        let store = Arc::new(store_with(Cart::empty()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.add_product_to_cart(AddProductToCartRequest::new("ketchup")).await
            }));
        }
        for handle in handles {
            handle.await.expect("task joined").expect("add ketchup");
        }

        let cart = store.select_cart().await.expect("select cart");
        assert_eq!(cart.lines, vec![line("ketchup", 16, Decimal::new(2, 0))]);
        assert_eq!(cart.total, Decimal::new(32, 0));
    }

    #[tokio::test]
    async fn default_store_has_empty_catalog() {
        let store = CartStore::default();

        let error = store
            .add_product_to_cart(AddProductToCartRequest::new("mustard"))
            .await
            .expect_err("nothing listed");

        assert_eq!(error.error_class(), "product_not_found");
        assert!(store.select_cart().await.expect("select cart").is_empty());
    }
}
