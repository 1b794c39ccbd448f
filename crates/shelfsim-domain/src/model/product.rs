//! Product definition

use serde::Serialize;
use shelfsim_types::ValidationError;

/// A product that can be stocked on a shelf
///
/// Only built through [`Product::new`], so it is serialize-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    product_id: String,
    name: String,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let product_id = product_id.into();
        let name = name.into();
        if product_id.is_empty() {
            return Err(ValidationError::EmptyProductId);
        }
        if name.is_empty() {
            return Err(ValidationError::EmptyProductName);
        }
        Ok(Self { product_id, name })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
