use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId};

/// Read-only price lookup consumed by cart operations.
pub trait PriceLookup {
    fn lookup(&self, product_id: &ProductId) -> Option<Decimal>;
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl PriceLookup for Catalog {
    fn lookup(&self, product_id: &ProductId) -> Option<Decimal> {
        self.find(product_id).map(|product| product.price)
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
