use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shopcart_core::domain::cart::Cart;

use super::{CartRepository, RepositoryError};

/// Stores the cart as a JSON document. A missing file reads as an empty cart.
pub struct JsonFileCartRepository {
    path: PathBuf,
}

impl JsonFileCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RepositoryError {
        RepositoryError::Io { path: self.path.clone(), source }
    }
}

#[async_trait::async_trait]
impl CartRepository for JsonFileCartRepository {
    async fn load(&self) -> Result<Cart, RepositoryError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Cart::empty()),
            Err(error) => return Err(self.io_error(error)),
        };

        let cart = serde_json::from_str::<Cart>(&raw).map_err(|error| {
            RepositoryError::Decode(format!("`{}`: {error}", self.path.display()))
        })?;
        cart.validate().map_err(|error| {
            RepositoryError::Decode(format!("`{}`: {error}", self.path.display()))
        })?;

        Ok(cart)
    }

    async fn save(&self, cart: Cart) -> Result<(), RepositoryError> {
        let encoded = serde_json::to_string_pretty(&cart)
            .map_err(|error| RepositoryError::Encode(error.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|error| self.io_error(error))?;
        }
        tokio::fs::write(&self.path, encoded).await.map_err(|error| self.io_error(error))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use shopcart_core::domain::cart::{Cart, CartLine};
    use shopcart_core::domain::product::ProductId;

    use crate::repositories::{CartRepository, JsonFileCartRepository, RepositoryError};

    #[tokio::test]
    async fn missing_file_loads_empty_cart() {
        let dir = TempDir::new().expect("temp dir");
        let repo = JsonFileCartRepository::new(dir.path().join("cart.json"));

        assert_eq!(repo.load().await.expect("load"), Cart::empty());
    }

    #[tokio::test]
    async fn saved_cart_is_reloaded_with_order_preserved() {
        let dir = TempDir::new().expect("temp dir");
        let repo = JsonFileCartRepository::new(dir.path().join("nested/cart.json"));
        let cart = Cart::from_lines(vec![
            CartLine {
                product_id: ProductId::from("mustard"),
                quantity: 1,
                price: Decimal::new(25, 1),
            },
            CartLine {
                product_id: ProductId::from("ketchup"),
                quantity: 2,
                price: Decimal::new(2, 0),
            },
        ])
        .expect("cart");

        repo.save(cart.clone()).await.expect("save");
        let reloaded = repo.load().await.expect("load");

        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.lines[0].product_id, ProductId::from("mustard"));
    }

    #[tokio::test]
    async fn inconsistent_state_file_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("cart.json");
        std::fs::write(
            &path,
            r#"{"lines":[{"product_id":"mustard","quantity":1,"price":"2.5"}],"total":"9"}"#,
        )
        .expect("write state");

        let error = JsonFileCartRepository::new(path).load().await.expect_err("stale total");
        assert!(matches!(error, RepositoryError::Decode(ref message) if message.contains("total")));
    }

    #[tokio::test]
    async fn malformed_state_file_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json").expect("write state");

        let error = JsonFileCartRepository::new(path).load().await.expect_err("bad json");
        assert!(matches!(error, RepositoryError::Decode(_)));
    }
}
