use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use shopcart_core::domain::product::{Product, ProductId};
use shopcart_core::errors::DomainError;

use crate::repositories::InMemoryProductRepository;

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("could not read catalog file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("catalog file lists product `{0}` more than once")]
    DuplicateProduct(ProductId),
    #[error("invalid catalog entry: {0}")]
    InvalidProduct(#[from] DomainError),
}

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    price: Decimal,
}

/// Parses a TOML catalog of `[[products]]` tables with `id` and `price` keys.
pub fn parse_catalog(raw: &str, path: &Path) -> Result<Vec<Product>, CatalogFileError> {
    let document = toml::from_str::<CatalogDocument>(raw)
        .map_err(|source| CatalogFileError::Parse { path: path.to_path_buf(), source })?;

    let mut seen = HashSet::with_capacity(document.products.len());
    let mut products = Vec::with_capacity(document.products.len());
    for entry in document.products {
        let product = Product::new(entry.id, entry.price)?;
        if !seen.insert(product.id.clone()) {
            return Err(CatalogFileError::DuplicateProduct(product.id));
        }
        products.push(product);
    }

    Ok(products)
}

pub async fn load_catalog(path: &Path) -> Result<InMemoryProductRepository, CatalogFileError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogFileError::Read { path: path.to_path_buf(), source })?;
    let products = parse_catalog(&raw, path)?;

    info!(
        event_name = "catalog.loaded",
        catalog_path = %path.display(),
        product_count = products.len(),
        "product catalog loaded"
    );

    Ok(InMemoryProductRepository::with_products(products))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use shopcart_core::domain::product::ProductId;

    use crate::repositories::ProductRepository;

    use super::{load_catalog, parse_catalog, CatalogFileError};

    const CONDIMENTS: &str = r#"
[[products]]
id = "mustard"
price = "2.5"

[[products]]
id = "ketchup"
price = 2
"#;

    #[test]
    fn parses_string_and_integer_prices() {
        let products = parse_catalog(CONDIMENTS, Path::new("catalog.toml")).expect("catalog");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Decimal::new(25, 1));
        assert_eq!(products[1].price, Decimal::new(2, 0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = "[[products]]\nid = \"mustard\"\nprice = \"1\"\n\n[[products]]\nid = \"mustard\"\nprice = \"2\"\n";
        let error = parse_catalog(raw, Path::new("catalog.toml")).expect_err("duplicate");

        assert!(matches!(error, CatalogFileError::DuplicateProduct(ref id) if id.0 == "mustard"));
    }

    #[test]
    fn rejects_negative_prices() {
        let raw = "[[products]]\nid = \"mustard\"\nprice = \"-1\"\n";
        let error = parse_catalog(raw, Path::new("catalog.toml")).expect_err("negative");

        assert!(matches!(error, CatalogFileError::InvalidProduct(_)));
    }

    #[test]
    fn empty_document_is_an_empty_catalog() {
        let products = parse_catalog("", Path::new("catalog.toml")).expect("empty catalog");
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn load_catalog_fills_repository() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, CONDIMENTS).expect("write catalog");

        let repo = load_catalog(&path).await.expect("load catalog");
        let ketchup = repo.find_by_id(&ProductId::from("ketchup")).await.expect("find");

        assert_eq!(ketchup.map(|product| product.price), Some(Decimal::new(2, 0)));
    }

    #[tokio::test]
    async fn missing_catalog_file_is_a_read_error() {
        let dir = TempDir::new().expect("temp dir");
        let error = load_catalog(&dir.path().join("absent.toml")).await.expect_err("missing");

        assert!(matches!(error, CatalogFileError::Read { .. }));
    }
}
