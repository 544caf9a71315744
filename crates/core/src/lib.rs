pub mod add_to_cart;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use add_to_cart::add_product_to_cart;
pub use catalog::{Catalog, PriceLookup};
pub use domain::cart::{Cart, CartLine};
pub use domain::product::{Product, ProductId};
pub use errors::{ApplicationError, DomainError};
