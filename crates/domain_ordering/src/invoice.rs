//! The in-progress invoice and its line items
//!
//! An [`Invoice`] can only be changed through the
//! [`InvoiceAggregator`](crate::aggregator::InvoiceAggregator); everything
//! here is read-only to the outside so totals cannot go stale.

use chrono::{DateTime, Utc};
use serde::Serialize;

use core_kernel::{Currency, InvoiceId, Money, MoneyError, Rate};
use domain_catalog::{MenuItem, MenuItemId};

use crate::pricing::PricingPolicy;

/// One catalog item plus quantity and kitchen note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    menu_item_id: MenuItemId,
    name: String,
    unit_price: Money,
    quantity: u32,
    note_for_kitchen: Option<String>,
    line_total: Money,
}

impl LineItem {
    /// Snapshots name and price from the catalog entry
    pub(crate) fn snapshot(item: &MenuItem, quantity: u32) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            note_for_kitchen: None,
            line_total: Money::zero(item.price.currency()),
        }
    }

    pub fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    /// Name as it was when the item was first added
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price as it was when the item was first added
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn note_for_kitchen(&self) -> Option<&str> {
        self.note_for_kitchen.as_deref()
    }

    /// `unit_price × quantity`
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub(crate) fn set_note(&mut self, note: Option<String>) {
        self.note_for_kitchen = note;
    }
}

/// A coupon that produced a non-zero discount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedCoupon {
    pub code: String,
    pub rate: Rate,
}

/// The order a customer or waiter is building
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    currency: Currency,
    line_items: Vec<LineItem>,
    applied_coupon: Option<AppliedCoupon>,
    subtotal: Money,
    discount: Money,
    tax: Money,
    total: Money,
    created_at: DateTime<Utc>,
}

impl Invoice {
    pub(crate) fn open(currency: Currency) -> Self {
        Self {
            id: InvoiceId::new(),
            currency,
            line_items: Vec::new(),
            applied_coupon: None,
            subtotal: Money::zero(currency),
            discount: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Line items in the order they were first added
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Looks up the line for a menu item
    pub fn line(&self, id: MenuItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|line| line.menu_item_id == id)
    }

    /// Code of the coupon currently discounting this invoice
    pub fn applied_coupon(&self) -> Option<&str> {
        self.applied_coupon.as_ref().map(|c| c.code.as_str())
    }

    /// Discount rate in effect, zero without a coupon
    pub fn coupon_rate(&self) -> Rate {
        self.applied_coupon.as_ref().map(|c| c.rate).unwrap_or(Rate::ZERO)
    }

    /// Sum of `unit_price × quantity` over all lines
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    /// GST on the discounted subtotal
    pub fn tax(&self) -> Money {
        self.tax
    }

    /// `subtotal − discount + tax`
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of distinct dishes
    pub fn line_count(&self) -> usize {
        self.line_items.len()
    }

    /// Number of portions across all lines
    pub fn item_count(&self) -> u64 {
        self.line_items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub(crate) fn line_mut(&mut self, id: MenuItemId) -> Option<&mut LineItem> {
        self.line_items.iter_mut().find(|line| line.menu_item_id == id)
    }

    pub(crate) fn applied(&self) -> Option<&AppliedCoupon> {
        self.applied_coupon.as_ref()
    }

    /// Replaces lines and coupon with an already priced state
    pub(crate) fn install(&mut self, priced: Priced) {
        let Priced {
            line_items,
            applied_coupon,
            totals,
        } = priced;
        self.line_items = line_items;
        self.applied_coupon = applied_coupon;
        self.subtotal = totals.subtotal;
        self.discount = totals.discount;
        self.tax = totals.tax;
        self.total = totals.total;
    }
}

/// Derived amounts of an invoice
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Totals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Lines and coupon with totals computed, ready to be installed
#[derive(Debug, Clone)]
pub(crate) struct Priced {
    pub line_items: Vec<LineItem>,
    pub applied_coupon: Option<AppliedCoupon>,
    pub totals: Totals,
}

impl Priced {
    /// Prices a candidate state without touching the live invoice
    ///
    /// The discount is always `subtotal × coupon rate`, so it tracks the
    /// subtotal as lines change and can never exceed it.
    pub fn compute(
        mut line_items: Vec<LineItem>,
        applied_coupon: Option<AppliedCoupon>,
        policy: &PricingPolicy,
    ) -> Result<Self, MoneyError> {
        let mut subtotal = Money::zero(policy.currency());
        for line in &mut line_items {
            line.line_total = line.unit_price.times(line.quantity)?;
            subtotal = subtotal.checked_add(&line.line_total)?;
        }

        let rate = applied_coupon.as_ref().map(|c| c.rate).unwrap_or(Rate::ZERO);
        let discount = rate.checked_apply(&subtotal)?;
        let taxable = subtotal.checked_sub(&discount)?;
        let tax = policy.tax_on(&taxable)?;
        let total = taxable.checked_add(&tax)?;

        Ok(Self {
            line_items,
            applied_coupon,
            totals: Totals {
                subtotal,
                discount,
                tax,
                total,
            },
        })
    }
}
