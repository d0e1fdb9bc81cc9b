use crate::models::{Category, Product};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// The stock catalog shipped inside the binary
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// On-disk catalog layout
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// The immutable product catalog
///
/// Loaded once at startup and never mutated afterwards. Everything else in
/// the crate (search, recommendations, the CLI) borrows from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog that ships with the binary
    pub fn embedded() -> Result<Self> {
        let catalog = Self::from_json(EMBEDDED_CATALOG)?;
        debug!("Loaded embedded catalog: {} products", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from an alternative JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!("Loaded catalog from {}: {} products", path.display(), catalog.len());
        Ok(catalog)
    }

    /// Parse and validate a catalog from raw JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self {
            categories: file.categories,
            products: file.products,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Sanity-check the catalog before anything else gets to use it
    fn validate(&self) -> Result<()> {
        let category_ids: HashSet<&str> =
            self.categories.iter().map(|c| c.id.as_str()).collect();
        let mut seen_ids = HashSet::new();

        for product in &self.products {
            if !seen_ids.insert(product.id.as_str()) {
                return Err(Error::Catalog(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            if !category_ids.contains(product.category.as_str()) {
                return Err(Error::Catalog(format!(
                    "product {} references unknown category {}",
                    product.id, product.category
                )));
            }
            if product.wattage_options.is_empty() {
                return Err(Error::Catalog(format!(
                    "product {} has no wattage options",
                    product.id
                )));
            }
            if product.wattage_options.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::Catalog(format!(
                    "product {} wattage options not strictly ascending",
                    product.id
                )));
            }
        }
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id
    pub fn product(&self, id: &str) -> Result<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All products in a category, in catalog order
    pub fn by_category<'a>(&'a self, category_id: &str) -> Vec<&'a Product> {
        self.products
            .iter()
            .filter(|p| p.category == category_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.categories().is_empty());
    }

    #[test]
    fn test_product_lookup() {
        let catalog = Catalog::embedded().unwrap();
        let product = catalog.product("led-bulb-classic").unwrap();
        assert_eq!(product.name, "Classic LED Bulb");

        assert!(matches!(
            catalog.product("no-such-product"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::embedded().unwrap();
        let bulbs = catalog.by_category("led-bulbs");
        assert!(!bulbs.is_empty());
        assert!(bulbs.iter().all(|p| p.category == "led-bulbs"));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"{
            "categories": [{ "id": "led-bulbs", "name": "LED Bulbs" }],
            "products": [
                {
                    "id": "dup", "name": "A", "category": "led-bulbs",
                    "shortDescription": "x", "images": [],
                    "wattageOptions": [9], "colorTemperatures": [],
                    "applicationTypes": [], "bisCertified": false
                },
                {
                    "id": "dup", "name": "B", "category": "led-bulbs",
                    "shortDescription": "y", "images": [],
                    "wattageOptions": [12], "colorTemperatures": [],
                    "applicationTypes": [], "bisCertified": false
                }
            ]
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_unsorted_wattages() {
        let json = r#"{
            "categories": [{ "id": "led-bulbs", "name": "LED Bulbs" }],
            "products": [
                {
                    "id": "p1", "name": "A", "category": "led-bulbs",
                    "shortDescription": "x", "images": [],
                    "wattageOptions": [12, 9], "colorTemperatures": [],
                    "applicationTypes": [], "bisCertified": false
                }
            ]
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_wattage_range_display() {
        let catalog = Catalog::embedded().unwrap();
        let product = catalog.product("led-bulb-classic").unwrap();
        assert_eq!(product.wattage_range(), "7W - 12W");
    }
}
