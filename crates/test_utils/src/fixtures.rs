//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the catalog and ordering domains. The sample
//! menu is fixed so that expected totals can be written down by hand.

use std::sync::Arc;

use core_kernel::{Currency, Money};
use domain_catalog::{Dietary, InMemoryMenuCatalog, MenuItem, MenuItemId};
use domain_ordering::{InMemoryOrderHistory, OrderDesk, OrderingConfig};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Price of one Biryani
    pub fn inr_250() -> Money {
        Money::new(dec!(250), Currency::INR)
    }

    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A price in another currency for mismatch tests
    pub fn usd_5() -> Money {
        Money::new(dec!(5), Currency::USD)
    }
}

/// Well-known item ids of the sample menu
pub struct MenuIds;

impl MenuIds {
    pub const BIRYANI: MenuItemId = MenuItemId(1);
    pub const BUTTER_CHICKEN: MenuItemId = MenuItemId(2);
    pub const DAL_MAKHANI: MenuItemId = MenuItemId(3);
    pub const GARLIC_NAAN: MenuItemId = MenuItemId(4);
    pub const PANEER_TIKKA: MenuItemId = MenuItemId(5);
    pub const SAMOSA: MenuItemId = MenuItemId(6);
    pub const GULAB_JAMUN: MenuItemId = MenuItemId(7);
    pub const MANGO_LASSI: MenuItemId = MenuItemId(8);
    pub const CHOLE_BHATURE: MenuItemId = MenuItemId(9);
    pub const TANDOORI_CHICKEN: MenuItemId = MenuItemId(10);
}

/// Fixture for the sample restaurant menu
pub struct MenuFixtures;

impl MenuFixtures {
    /// The ten-dish sample menu, all active
    pub fn sample_menu() -> Vec<MenuItem> {
        use Dietary::{NonVeg, Veg};

        [
            (1, "Biryani", "Mains", dec!(250), "Fragrant rice dish", NonVeg, 20),
            (2, "Butter Chicken", "Mains", dec!(320), "Creamy chicken curry", NonVeg, 15),
            (3, "Dal Makhani", "Mains", dec!(180), "Creamy lentil curry", Veg, 20),
            (4, "Garlic Naan", "Breads", dec!(60), "Soft naan with garlic", Veg, 5),
            (5, "Paneer Tikka", "Appetizers", dec!(200), "Grilled cottage cheese", Veg, 10),
            (6, "Samosa", "Appetizers", dec!(80), "Crispy pastry with potato", Veg, 8),
            (7, "Gulab Jamun", "Desserts", dec!(100), "Sweet milk solids", Veg, 12),
            (8, "Mango Lassi", "Beverages", dec!(120), "Sweet yogurt drink", Veg, 3),
            (9, "Chole Bhature", "Mains", dec!(180), "Chickpea curry with fried bread", Veg, 18),
            (10, "Tandoori Chicken", "Appetizers", dec!(280), "Spiced grilled chicken", NonVeg, 25),
        ]
        .into_iter()
        .map(|(id, name, category, price, description, dietary, prep)| MenuItem {
            id: MenuItemId(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::new(price, Currency::INR),
            description: description.to_string(),
            dietary,
            prep_time_minutes: prep,
            active: true,
        })
        .collect()
    }

    /// Looks up a dish of the sample menu
    ///
    /// # Panics
    ///
    /// Panics if `id` is not on the sample menu
    pub fn dish(id: MenuItemId) -> MenuItem {
        Self::sample_menu()
            .into_iter()
            .find(|item| item.id == id)
            .unwrap_or_else(|| panic!("menu item {id} is not on the sample menu"))
    }

    pub fn biryani() -> MenuItem {
        Self::dish(MenuIds::BIRYANI)
    }

    pub fn garlic_naan() -> MenuItem {
        Self::dish(MenuIds::GARLIC_NAAN)
    }

    /// In-memory catalog seeded with the sample menu
    pub fn catalog() -> Arc<InMemoryMenuCatalog> {
        Arc::new(InMemoryMenuCatalog::with_items(Self::sample_menu()))
    }
}

/// Fixture for a fully wired order desk
pub struct DeskFixtures;

impl DeskFixtures {
    /// Default-configured desk over the sample menu
    ///
    /// Returns the catalog and history too so tests can inspect or change
    /// them behind the desk's back.
    pub fn desk() -> (OrderDesk, Arc<InMemoryMenuCatalog>, Arc<InMemoryOrderHistory>) {
        let catalog = MenuFixtures::catalog();
        let history = Arc::new(InMemoryOrderHistory::new());
        let desk = OrderDesk::from_config(&OrderingConfig::default(), catalog.clone(), history.clone())
            .expect("default configuration is valid");
        (desk, catalog, history)
    }
}
