//! Shelf holding items keyed by product ID

use std::collections::BTreeMap;

use log::{info, warn};
use serde::Serialize;
use shelfsim_types::ValidationError;

use super::{ForeignObject, ShelfItem};

/// A monitored shelf
#[derive(Debug, Clone, Serialize)]
pub struct Shelf {
    shelf_id: String,
    items: BTreeMap<String, ShelfItem>,
    foreign_objects_detected: Vec<ForeignObject>,
}

impl Shelf {
    pub fn new(shelf_id: impl Into<String>) -> Result<Self, ValidationError> {
        let shelf_id = shelf_id.into();
        if shelf_id.is_empty() {
            return Err(ValidationError::EmptyShelfId);
        }
        Ok(Self {
            shelf_id,
            items: BTreeMap::new(),
            foreign_objects_detected: Vec::new(),
        })
    }

    pub fn shelf_id(&self) -> &str {
        &self.shelf_id
    }

    /// Add an item, replacing any existing item with the same product ID
    pub fn add_item(&mut self, item: ShelfItem) {
        info!(
            "Added item {} to shelf {}",
            item.product().name(),
            self.shelf_id
        );
        self.items
            .insert(item.product().product_id().to_string(), item);
    }

    pub fn get_item(&self, product_id: &str) -> Option<&ShelfItem> {
        self.items.get(product_id)
    }

    pub fn get_item_mut(&mut self, product_id: &str) -> Option<&mut ShelfItem> {
        self.items.get_mut(product_id)
    }

    /// Items ordered by product ID
    pub fn items(&self) -> impl Iterator<Item = &ShelfItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Update the actual quantity of an item, clamped to zero
    ///
    /// Returns false and leaves the shelf untouched if the product is unknown.
    pub fn update_item_quantity(&mut self, product_id: &str, new_quantity: i64) -> bool {
        let Some(item) = self.items.get_mut(product_id) else {
            warn!(
                "Product ID {} not found on shelf {}",
                product_id, self.shelf_id
            );
            return false;
        };
        let old_quantity = item.actual_quantity();
        item.set_actual_quantity(new_quantity);
        info!(
            "Updated {} quantity from {} to {}",
            item.product().name(),
            old_quantity,
            item.actual_quantity()
        );
        true
    }

    pub fn foreign_objects(&self) -> &[ForeignObject] {
        &self.foreign_objects_detected
    }

    pub fn add_foreign_object(&mut self, foreign_object: ForeignObject) {
        self.foreign_objects_detected.push(foreign_object);
    }

    pub fn clear_foreign_objects(&mut self) {
        self.foreign_objects_detected.clear();
    }

    /// Sum of actual quantities across all items
    pub fn get_total_items(&self) -> u64 {
        self.items
            .values()
            .map(|item| u64::from(item.actual_quantity()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use shelfsim_types::ForeignObjectType;

    fn shelf() -> Shelf {
        let mut shelf = Shelf::new("produce-01").unwrap();
        shelf.add_item(ShelfItem::new(
            Product::new("apple-gala", "Gala Apples").unwrap(),
            24,
        ));
        shelf.add_item(ShelfItem::new(
            Product::new("banana", "Bananas").unwrap(),
            6,
        ));
        shelf
    }

    #[test]
    fn test_empty_shelf_id_rejected() {
        assert_eq!(Shelf::new("").unwrap_err(), ValidationError::EmptyShelfId);
    }

    #[test]
    fn test_get_item_and_total() {
        let shelf = shelf();
        assert_eq!(shelf.len(), 2);
        assert_eq!(shelf.get_item("banana").unwrap().actual_quantity(), 6);
        assert!(shelf.get_item("kiwi").is_none());
        assert_eq!(shelf.get_total_items(), 30);
    }

    #[test]
    fn test_add_item_replaces_same_id() {
        let mut shelf = shelf();
        shelf.add_item(ShelfItem::new(
            Product::new("banana", "Organic Bananas").unwrap(),
            2,
        ));
        assert_eq!(shelf.len(), 2);
        assert_eq!(shelf.get_item("banana").unwrap().product().name(), "Organic Bananas");
        assert_eq!(shelf.get_total_items(), 26);
    }

    #[test]
    fn test_update_item_quantity() {
        let mut shelf = shelf();
        assert!(shelf.update_item_quantity("banana", 12));
        assert_eq!(shelf.get_item("banana").unwrap().actual_quantity(), 12);

        assert!(shelf.update_item_quantity("banana", -3));
        assert_eq!(shelf.get_item("banana").unwrap().actual_quantity(), 0);
    }

    #[test]
    fn test_update_unknown_product_leaves_shelf_unchanged() {
        let mut shelf = shelf();
        assert!(!shelf.update_item_quantity("kiwi", 5));
        assert_eq!(shelf.len(), 2);
        assert_eq!(shelf.get_total_items(), 30);
    }

    #[test]
    fn test_clear_foreign_objects() {
        let mut shelf = shelf();
        shelf.add_foreign_object(
            ForeignObject::new(ForeignObjectType::UnknownDebris, (10, 10), 0.7).unwrap(),
        );
        assert_eq!(shelf.foreign_objects().len(), 1);
        shelf.clear_foreign_objects();
        assert!(shelf.foreign_objects().is_empty());
    }
}
