use std::collections::HashMap;

use tokio::sync::RwLock;

use shopcart_core::domain::cart::Cart;
use shopcart_core::domain::product::{Product, ProductId};

use super::{CartRepository, ProductRepository, RepositoryError};

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products =
            products.into_iter().map(|product| (product.id.0.clone(), product)).collect();
        Self { products: RwLock::new(products) }
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.get(&id.0).cloned())
    }

    async fn save(&self, product: Product) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        products.insert(product.id.0.clone(), product);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        let mut listed = products.values().cloned().collect::<Vec<_>>();
        listed.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(listed)
    }
}

#[derive(Default)]
pub struct InMemoryCartRepository {
    cart: RwLock<Cart>,
}

impl InMemoryCartRepository {
    pub fn with_cart(cart: Cart) -> Self {
        Self { cart: RwLock::new(cart) }
    }
}

#[async_trait::async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn load(&self) -> Result<Cart, RepositoryError> {
        Ok(self.cart.read().await.clone())
    }

    async fn save(&self, cart: Cart) -> Result<(), RepositoryError> {
        *self.cart.write().await = cart;
        Ok(())
    }
}
