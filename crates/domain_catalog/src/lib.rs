//! Menu Catalog Domain
//!
//! The catalog is the read-mostly list of dishes a restaurant sells. The
//! ordering core only ever consumes already-resolved [`MenuItem`] values;
//! this crate owns their shape, their validation rules, and the
//! [`MenuCatalogPort`] through which they are fetched and maintained.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_catalog::{InMemoryMenuCatalog, MenuCatalogPort, MenuQuery};
//!
//! let catalog = InMemoryMenuCatalog::with_items(sample_menu());
//! let veg_mains = catalog
//!     .find_items(MenuQuery::by_category("Mains").veg_only())
//!     .await?;
//! ```

pub mod menu;
pub mod ports;

pub use menu::{Dietary, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem};
pub use ports::{InMemoryMenuCatalog, MenuCatalogPort, MenuQuery};
