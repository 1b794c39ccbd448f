//! Domain model types

pub mod bounding_box;
pub mod foreign_object;
pub mod product;
pub mod quality;
pub mod shelf;
pub mod shelf_item;

pub use bounding_box::BoundingBox;
pub use foreign_object::ForeignObject;
pub use product::Product;
pub use quality::QualityAssessment;
pub use shelf::Shelf;
pub use shelf_item::{Detection, DetectionUpdate, ShelfItem};
