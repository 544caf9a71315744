use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use shopcart_core::domain::cart::Cart;
use shopcart_core::domain::product::{Product, ProductId};
use shopcart_core::errors::ApplicationError;

pub mod file;
pub mod memory;

pub use file::JsonFileCartRepository;
pub use memory::{InMemoryCartRepository, InMemoryProductRepository};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error on `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<RepositoryError> for ApplicationError {
    fn from(value: RepositoryError) -> Self {
        ApplicationError::Persistence(value.to_string())
    }
}

/// Product source consulted by the cart store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
    async fn save(&self, product: Product) -> Result<(), RepositoryError>;
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;
}

/// Holds the single current cart owned by a store.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn load(&self) -> Result<Cart, RepositoryError>;
    async fn save(&self, cart: Cart) -> Result<(), RepositoryError>;
}
