//! Property-Based Test Generators
//!
//! Proptest strategies for menu items and for sequences of cart edits.

use core_kernel::{Currency, Money};
use domain_catalog::MenuItem;
use domain_ordering::{InvoiceAggregator, OrderingError};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::MenuItemBuilder;

/// Strategy for catalog prices in paise, zero included
pub fn price_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..100_000i64
}

/// Strategy for INR menu prices
pub fn inr_price_strategy() -> impl Strategy<Value = Money> {
    price_minor_strategy().prop_map(|paise| Money::from_minor(paise, Currency::INR))
}

/// Strategy for GST percentages in steps of 0.25%
pub fn tax_percent_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=112u32).prop_map(|quarters| Decimal::new(i64::from(quarters) * 25, 2))
}

/// Strategy for a small menu with distinct ids
pub fn menu_strategy() -> impl Strategy<Value = Vec<MenuItem>> {
    prop::collection::vec(inr_price_strategy(), 1..8).prop_map(|prices| {
        prices
            .into_iter()
            .enumerate()
            .map(|(index, price)| {
                MenuItemBuilder::new()
                    .with_id(index as u32 + 1)
                    .with_name(format!("Dish {}", index + 1))
                    .with_money(price)
                    .build()
            })
            .collect()
    })
}

/// Coupon codes worth trying: the defaults, a miss and the empty code
pub fn coupon_code_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("WELCOME10"),
        Just("SAVE10"),
        Just("SAVE15"),
        Just("save10"),
        Just("EXPIRED"),
        Just(""),
    ]
}

/// One edit a customer or waiter can make to the cart
///
/// Item positions are indexes into the menu, taken modulo its length.
#[derive(Debug, Clone)]
pub enum CartOp {
    Add { item: usize, quantity: u32 },
    Remove { item: usize },
    SetQuantity { item: usize, quantity: i64 },
    Note { item: usize, note: String },
    Coupon(&'static str),
    Clear,
}

impl CartOp {
    /// Applies the edit; bad input such as a zero quantity is reported,
    /// not panicked on
    pub fn apply(&self, cart: &mut InvoiceAggregator, menu: &[MenuItem]) -> Result<(), OrderingError> {
        let pick = |index: usize| &menu[index % menu.len()];
        let id = |index: usize| pick(index).id;

        match self {
            CartOp::Add { item, quantity } => cart.add_item(pick(*item), *quantity),
            CartOp::Remove { item } => cart.remove_item(id(*item)).map(|_| ()),
            CartOp::SetQuantity { item, quantity } => cart.update_quantity(id(*item), *quantity).map(|_| ()),
            CartOp::Note { item, note } => {
                cart.update_note(id(*item), note.clone());
                Ok(())
            }
            CartOp::Coupon(code) => cart.apply_coupon(code).map(|_| ()),
            CartOp::Clear => {
                cart.clear();
                Ok(())
            }
        }
    }
}

/// Strategy for a single cart edit, weighted towards adds
pub fn cart_op_strategy() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        4 => (any::<usize>(), 0u32..6).prop_map(|(item, quantity)| CartOp::Add { item, quantity }),
        2 => any::<usize>().prop_map(|item| CartOp::Remove { item }),
        2 => (any::<usize>(), -3i64..10).prop_map(|(item, quantity)| CartOp::SetQuantity { item, quantity }),
        1 => (any::<usize>(), "[a-z ]{0,16}").prop_map(|(item, note)| CartOp::Note { item, note }),
        2 => coupon_code_strategy().prop_map(CartOp::Coupon),
        1 => Just(CartOp::Clear),
    ]
}

/// Strategy for a session of cart edits
pub fn cart_session_strategy() -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(cart_op_strategy(), 1..50)
}
