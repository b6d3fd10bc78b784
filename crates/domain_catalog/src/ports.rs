//! Menu Catalog Port
//!
//! The `MenuCatalogPort` trait is everything the order desk needs from a
//! menu source. The catalog is injected by the caller; nothing in the
//! workspace keeps a process-wide menu.
//!
//! - **In-memory adapter**: [`InMemoryMenuCatalog`], for demos, tests, and
//!   single-terminal deployments
//! - **Remote adapter**: a backend menu service, implemented outside this crate

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use validator::Validate;

use core_kernel::{DomainPort, PortError};

use crate::menu::{Dietary, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem};

/// Query parameters for filtering the menu
#[derive(Debug, Clone, Default)]
pub struct MenuQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Dietary classification
    pub dietary: Option<Dietary>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
    /// Only items that can currently be ordered
    pub active_only: bool,
}

impl MenuQuery {
    /// Orderable items across all categories
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Default::default()
        }
    }

    /// Orderable items of one category
    pub fn by_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            active_only: true,
            ..Default::default()
        }
    }

    /// Narrows to vegetarian dishes
    pub fn veg_only(mut self) -> Self {
        self.dietary = Some(Dietary::Veg);
        self
    }

    /// Narrows by free-text search
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Returns true if `item` satisfies every present filter
    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.active_only && !item.active {
            return false;
        }
        if let Some(ref category) = self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(dietary) = self.dietary {
            if item.dietary != dietary {
                return false;
            }
        }
        if let Some(ref text) = self.search {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !item.name.to_lowercase().contains(&needle)
                && !item.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Port for reading and maintaining the menu
#[async_trait]
pub trait MenuCatalogPort: DomainPort {
    /// Returns every item, active or not, ordered by id
    async fn list_items(&self) -> Result<Vec<MenuItem>, PortError>;

    /// Returns the items matching `query`, ordered by id
    async fn find_items(&self, query: MenuQuery) -> Result<Vec<MenuItem>, PortError>;

    /// Retrieves one item
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if no item has this id
    async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, PortError>;

    /// Validates and stores a new item, assigning its id
    async fn add_item(&self, request: NewMenuItem) -> Result<MenuItem, PortError>;

    /// Applies a typed partial update
    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, PortError>;

    /// Enables or disables ordering of an item
    async fn set_active(&self, id: MenuItemId, active: bool) -> Result<MenuItem, PortError> {
        self.update_item(
            id,
            MenuItemUpdate {
                active: Some(active),
                ..Default::default()
            },
        )
        .await
    }

    /// Removes an item from the catalog
    async fn delete_item(&self, id: MenuItemId) -> Result<(), PortError>;

    /// Distinct categories in first-seen id order
    async fn categories(&self) -> Result<Vec<String>, PortError> {
        let mut categories: Vec<String> = Vec::new();
        for item in self.list_items().await? {
            if !categories.contains(&item.category) {
                categories.push(item.category);
            }
        }
        Ok(categories)
    }
}

/// Reports the alphabetically first invalid field
fn validation_error(errors: validator::ValidationErrors) -> PortError {
    let field = errors.field_errors().keys().min().map(|f| f.to_string());
    PortError::Validation {
        message: errors.to_string(),
        field,
    }
}

/// Menu held in process memory
///
/// Ids are assigned as one past the largest id present.
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    items: RwLock<BTreeMap<MenuItemId, MenuItem>>,
}

impl InMemoryMenuCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with `items`
    ///
    /// A later item replaces an earlier one with the same id.
    pub fn with_items(items: impl IntoIterator<Item = MenuItem>) -> Self {
        let items = items.into_iter().map(|item| (item.id, item)).collect();
        Self {
            items: RwLock::new(items),
        }
    }
}

impl DomainPort for InMemoryMenuCatalog {}

#[async_trait]
impl MenuCatalogPort for InMemoryMenuCatalog {
    async fn list_items(&self) -> Result<Vec<MenuItem>, PortError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_items(&self, query: MenuQuery) -> Result<Vec<MenuItem>, PortError> {
        let items = self.items.read().await;
        Ok(items.values().filter(|item| query.matches(item)).cloned().collect())
    }

    async fn get_item(&self, id: MenuItemId) -> Result<MenuItem, PortError> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("MenuItem", id))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn add_item(&self, request: NewMenuItem) -> Result<MenuItem, PortError> {
        request.validate().map_err(validation_error)?;

        let mut items = self.items.write().await;
        let next = items
            .keys()
            .next_back()
            .map(|id| id.0.checked_add(1))
            .unwrap_or(Some(1))
            .ok_or_else(|| PortError::internal("menu item ids exhausted"))?;
        let item = request.into_item(MenuItemId(next));
        items.insert(item.id, item.clone());

        info!(id = %item.id, "Menu item added");
        Ok(item)
    }

    #[instrument(skip(self, update))]
    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, PortError> {
        update.validate().map_err(validation_error)?;

        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("MenuItem", id))?;
        update.apply_to(item);

        debug!(active = item.active, price = %item.price, "Menu item updated");
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, id: MenuItemId) -> Result<(), PortError> {
        self.items
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Menu item deleted"))
            .ok_or_else(|| PortError::not_found("MenuItem", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    fn item(id: u32, name: &str, category: &str, dietary: Dietary, active: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::new(dec!(100), Currency::INR),
            description: String::new(),
            dietary,
            prep_time_minutes: 10,
            active,
        }
    }

    fn catalog() -> InMemoryMenuCatalog {
        InMemoryMenuCatalog::with_items(vec![
            item(1, "Biryani", "Mains", Dietary::NonVeg, true),
            item(3, "Dal Makhani", "Mains", Dietary::Veg, true),
            item(4, "Garlic Naan", "Breads", Dietary::Veg, false),
        ])
    }

    #[tokio::test]
    async fn test_get_item_and_not_found() {
        let catalog = catalog();
        assert_eq!(catalog.get_item(MenuItemId(1)).await.unwrap().name, "Biryani");

        let err = catalog.get_item(MenuItemId(99)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_active_veg_mains() {
        let catalog = catalog();
        let found = catalog
            .find_items(MenuQuery::by_category("Mains").veg_only())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dal Makhani");
    }

    #[tokio::test]
    async fn test_active_query_hides_disabled_items() {
        let catalog = catalog();
        let active = catalog.find_items(MenuQuery::active()).await.unwrap();
        assert!(active.iter().all(|i| i.active));
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let catalog = catalog();
        let found = catalog
            .find_items(MenuQuery::default().search("NAAN"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, MenuItemId(4));
    }

    #[tokio::test]
    async fn test_add_assigns_next_id() {
        let catalog = catalog();
        let added = catalog
            .add_item(NewMenuItem::new("Samosa", "Appetizers", Money::new(dec!(80), Currency::INR)))
            .await
            .unwrap();
        assert_eq!(added.id, MenuItemId(5));

        let empty = InMemoryMenuCatalog::new();
        let first = empty
            .add_item(NewMenuItem::new("Lassi", "Beverages", Money::new(dec!(120), Currency::INR)))
            .await
            .unwrap();
        assert_eq!(first.id, MenuItemId(1));
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_request() {
        let catalog = catalog();
        let err = catalog
            .add_item(NewMenuItem::new("", "Mains", Money::new(dec!(80), Currency::INR)))
            .await
            .unwrap_err();
        match err {
            PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("name")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert_eq!(catalog.list_items().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_validation_reports_alphabetically_first_field() {
        let catalog = catalog();
        for _ in 0..8 {
            let err = catalog
                .add_item(NewMenuItem::new("", "", Money::new(dec!(-1), Currency::INR)))
                .await
                .unwrap_err();
            match err {
                PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("category")),
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_set_active_and_delete() {
        let catalog = catalog();
        let enabled = catalog.set_active(MenuItemId(4), true).await.unwrap();
        assert!(enabled.active);

        catalog.delete_item(MenuItemId(4)).await.unwrap();
        assert!(catalog.get_item(MenuItemId(4)).await.unwrap_err().is_not_found());
        assert!(catalog.delete_item(MenuItemId(4)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_categories_in_id_order() {
        let catalog = catalog();
        assert_eq!(catalog.categories().await.unwrap(), vec!["Mains", "Breads"]);
    }
}
