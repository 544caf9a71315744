pub mod catalog_file;
pub mod repositories;
pub mod store;

pub use catalog_file::{load_catalog, CatalogFileError};
pub use repositories::{
    CartRepository, InMemoryCartRepository, InMemoryProductRepository, JsonFileCartRepository,
    ProductRepository, RepositoryError,
};
pub use store::{AddProductToCartRequest, CartStore};
