//! Print-stock domain module.
//!
//! The nested stock tree (font → kit → category → size → item), its fixed
//! schema, typed path traversal and the two write commands. Pure domain logic:
//! no IO, no HTTP, no storage.

pub mod command;
pub mod path;
pub mod schema;
pub mod stock;

pub use command::{SetItem, SetSizeGroup, StockCommand};
pub use path::{GroupPath, ItemPath};
pub use schema::seed_tree;
pub use stock::{Category, Font, FontStock, Kit, KitStock, SizeClass, SizeGroup, Status, StockTree};
