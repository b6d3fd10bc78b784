//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests only specify the fields they care about.

use core_kernel::{Currency, Money};
use domain_catalog::{Dietary, MenuItem, MenuItemId, NewMenuItem};
use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for catalog menu items
#[derive(Debug, Clone)]
pub struct MenuItemBuilder {
    id: MenuItemId,
    name: String,
    category: String,
    price: Money,
    description: String,
    dietary: Dietary,
    prep_time_minutes: u32,
    active: bool,
}

impl Default for MenuItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuItemBuilder {
    /// Creates a builder for an active ₹100 veg main
    pub fn new() -> Self {
        Self {
            id: MenuItemId(1),
            name: "House Special".to_string(),
            category: "Mains".to_string(),
            price: Money::new(dec!(100), Currency::INR),
            description: String::new(),
            dietary: Dietary::Veg,
            prep_time_minutes: 15,
            active: true,
        }
    }

    /// Creates a builder with a random name and description
    pub fn random() -> Self {
        let words: Vec<String> = Words(1..3).fake();
        Self::new()
            .with_name(words.join(" "))
            .with_description(Sentence(3..8).fake::<String>())
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = MenuItemId(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets an INR price
    pub fn with_price(mut self, amount: Decimal) -> Self {
        self.price = Money::new(amount, Currency::INR);
        self
    }

    pub fn with_money(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn non_veg(mut self) -> Self {
        self.dietary = Dietary::NonVeg;
        self
    }

    pub fn with_prep_time(mut self, minutes: u32) -> Self {
        self.prep_time_minutes = minutes;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn build(self) -> MenuItem {
        MenuItem {
            id: self.id,
            name: self.name,
            category: self.category,
            price: self.price,
            description: self.description,
            dietary: self.dietary,
            prep_time_minutes: self.prep_time_minutes,
            active: self.active,
        }
    }

    /// Builds a catalog add request; the id is assigned by the catalog
    pub fn build_request(self) -> NewMenuItem {
        let mut request = NewMenuItem::new(self.name, self.category, self.price)
            .with_dietary(self.dietary)
            .with_description(self.description)
            .with_prep_time(self.prep_time_minutes);
        request.active = self.active;
        request
    }
}
