//! Shelf scenario loader from TOML
//!
//! ```toml
//! shelf_id = "produce-01"
//!
//! [[products]]
//! product_id = "apple-gala"
//! name = "Gala Apples"
//! quantity = 24
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use shelfsim_domain::model::{Product, Shelf, ShelfItem};
use shelfsim_types::{Error, Result, ScenarioError};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One product line in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProduct {
    pub product_id: String,
    pub name: String,
    /// True quantity on the shelf; negative values are clamped to zero
    #[serde(default)]
    pub quantity: i64,
}

/// A shelf and the products the camera is configured to look for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub shelf_id: String,
    pub products: Vec<ScenarioProduct>,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        let scenario = Self::load_from_str(&content)?;
        info!(
            "Loaded scenario {} with {} products from {}",
            scenario.shelf_id,
            scenario.products.len(),
            path.display()
        );
        Ok(scenario)
    }

    /// Load a scenario from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(toml_content)?;
        scenario.check_products()?;
        Ok(scenario)
    }

    /// Built-in produce shelf used when no scenario file is given
    pub fn demo() -> Self {
        let line = |product_id: &str, name: &str, quantity: i64| ScenarioProduct {
            product_id: product_id.to_string(),
            name: name.to_string(),
            quantity,
        };
        Self {
            shelf_id: "produce-aisle-3".to_string(),
            products: vec![
                line("apple-gala", "Gala Apples", 24),
                line("banana-cavendish", "Cavendish Bananas", 18),
                line("lettuce-romaine", "Romaine Lettuce", 6),
                line("tomato-vine", "Vine Tomatoes", 12),
                line("avocado-hass", "Hass Avocados", 0),
            ],
        }
    }

    /// Render the scenario in the same TOML layout `load_from_str` reads
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn check_products(&self) -> std::result::Result<(), ScenarioError> {
        if self.products.is_empty() {
            return Err(ScenarioError::NoProducts);
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.product_id.as_str()) {
                return Err(ScenarioError::DuplicateProduct(product.product_id.clone()));
            }
        }
        Ok(())
    }

    /// Build the shelf and the configured product list
    pub fn build(&self) -> Result<(Shelf, Vec<Product>)> {
        self.check_products()?;

        let mut shelf = Shelf::new(self.shelf_id.as_str())?;
        let mut products = Vec::with_capacity(self.products.len());
        for line in &self.products {
            let product = Product::new(line.product_id.as_str(), line.name.as_str())?;
            shelf.add_item(ShelfItem::new(product.clone(), line.quantity));
            products.push(product);
        }
        Ok((shelf, products))
    }
}

/// Parse a `PRODUCT_ID=QTY` quantity override
pub fn parse_quantity_override(spec: &str) -> std::result::Result<(String, i64), ScenarioError> {
    let invalid = || ScenarioError::InvalidOverride(spec.to_string());
    let (product_id, quantity) = spec.split_once('=').ok_or_else(invalid)?;
    let product_id = product_id.trim();
    if product_id.is_empty() {
        return Err(invalid());
    }
    let quantity = quantity.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((product_id.to_string(), quantity))
}
