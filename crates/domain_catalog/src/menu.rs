//! Menu items and the typed requests that create or change them

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::Money;

/// Catalog identifier of a menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        MenuItemId(id)
    }
}

/// Dietary classification shown on the menu card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    Veg,
    NonVeg,
}

impl Dietary {
    pub fn is_veg(&self) -> bool {
        matches!(self, Dietary::Veg)
    }
}

/// A dish as listed in the catalog
///
/// Values handed to the ordering core are snapshots: later catalog edits
/// never reach an invoice that already holds a line for the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub description: String,
    pub dietary: Dietary,
    /// Kitchen preparation time
    pub prep_time_minutes: u32,
    /// Inactive items stay in the catalog but cannot be ordered
    pub active: bool,
}

impl MenuItem {
    pub fn is_veg(&self) -> bool {
        self.dietary.is_veg()
    }
}

/// Request for adding a dish to the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewMenuItem {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Money,
    #[serde(default)]
    pub description: String,
    pub dietary: Dietary,
    #[validate(range(max = 240))]
    pub prep_time_minutes: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl NewMenuItem {
    /// Creates an active, veg request with no description and no prep time
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            description: String::new(),
            dietary: Dietary::Veg,
            prep_time_minutes: 0,
            active: true,
        }
    }

    pub fn with_dietary(mut self, dietary: Dietary) -> Self {
        self.dietary = dietary;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_minutes = minutes;
        self
    }

    /// Turns the request into a catalog entry under the given id
    pub fn into_item(self, id: MenuItemId) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
            dietary: self.dietary,
            prep_time_minutes: self.prep_time_minutes,
            active: self.active,
        }
    }
}

/// Partial update of a catalog entry
///
/// Every editable field is listed explicitly; `None` leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Money>,
    pub description: Option<String>,
    pub dietary: Option<Dietary>,
    #[validate(range(max = 240))]
    pub prep_time_minutes: Option<u32>,
    pub active: Option<bool>,
}

impl MenuItemUpdate {
    /// An update that only changes the price
    pub fn price(price: Money) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }

    /// Returns true if the update would change nothing
    pub fn is_empty(&self) -> bool {
        let MenuItemUpdate {
            name,
            category,
            price,
            description,
            dietary,
            prep_time_minutes,
            active,
        } = self;
        name.is_none()
            && category.is_none()
            && price.is_none()
            && description.is_none()
            && dietary.is_none()
            && prep_time_minutes.is_none()
            && active.is_none()
    }

    /// Writes the present fields onto `item`
    pub fn apply_to(self, item: &mut MenuItem) {
        let MenuItemUpdate {
            name,
            category,
            price,
            description,
            dietary,
            prep_time_minutes,
            active,
        } = self;

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(category) = category {
            item.category = category;
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(description) = description {
            item.description = description;
        }
        if let Some(dietary) = dietary {
            item.dietary = dietary;
        }
        if let Some(minutes) = prep_time_minutes {
            item.prep_time_minutes = minutes;
        }
        if let Some(active) = active {
            item.active = active;
        }
    }
}

fn default_active() -> bool {
    true
}

fn validate_price(price: &Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        let mut error = ValidationError::new("negative_price");
        error.message = Some("price must not be negative".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn biryani_request() -> NewMenuItem {
        NewMenuItem::new("Biryani", "Mains", Money::new(dec!(250), Currency::INR))
            .with_dietary(Dietary::NonVeg)
            .with_description("Fragrant rice dish")
            .with_prep_time(20)
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(biryani_request().validate().is_ok());
    }

    #[test]
    fn test_free_item_is_valid() {
        let water = NewMenuItem::new("Water", "Beverages", Money::zero(Currency::INR));
        assert!(water.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut request = biryani_request();
        request.name = String::new();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut request = biryani_request();
        request.price = Money::new(dec!(-1), Currency::INR);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_into_item_copies_fields() {
        let item = biryani_request().into_item(MenuItemId(1));
        assert_eq!(item.id, MenuItemId(1));
        assert_eq!(item.name, "Biryani");
        assert!(!item.is_veg());
        assert!(item.active);
        assert_eq!(item.prep_time_minutes, 20);
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut item = biryani_request().into_item(MenuItemId(1));
        let update = MenuItemUpdate {
            price: Some(Money::new(dec!(275), Currency::INR)),
            active: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut item);

        assert_eq!(item.price.amount(), dec!(275));
        assert!(!item.active);
        assert_eq!(item.name, "Biryani");
        assert_eq!(item.category, "Mains");
    }

    #[test]
    fn test_default_update_is_empty() {
        assert!(MenuItemUpdate::default().is_empty());
        assert!(MenuItemUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_blank_name() {
        let update = MenuItemUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_dietary_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Dietary::NonVeg).unwrap(), "\"non-veg\"");
        assert_eq!(serde_json::to_string(&MenuItemId(7)).unwrap(), "7");
    }
}
