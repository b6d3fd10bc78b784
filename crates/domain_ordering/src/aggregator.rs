//! Invoice Aggregator
//!
//! Owns the invoice of one order in progress and keeps its totals
//! consistent with its line items on every change.
//!
//! # States
//!
//! The aggregator is either **Absent** (no invoice) or **Active** (an
//! invoice with at least one line). The first successful
//! [`add_item`](InvoiceAggregator::add_item) opens an invoice with a fresh
//! id; removing the last line, driving its quantity to zero, or
//! [`clear`](InvoiceAggregator::clear) returns to Absent.
//!
//! # Failure policy
//!
//! Operations that target a line (remove, quantity, note) or the whole
//! invoice (coupon) are silent no-ops when the invoice is Absent or the
//! line does not exist; their return value says whether anything changed.
//! Only genuinely bad input is an error: a zero quantity or a negative or
//! foreign-currency price on `add_item`, and arithmetic overflow. A failed
//! operation leaves the invoice exactly as it was.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cart = InvoiceAggregator::default();
//! cart.add_item(&biryani, 2)?;
//! cart.apply_coupon("SAVE10")?;
//! let invoice = cart.snapshot().expect("active");
//! assert_eq!(invoice.total().amount(), dec!(504));
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::MoneyError;
use domain_catalog::{MenuItem, MenuItemId};

use crate::coupon::{CouponResolver, CouponTable};
use crate::error::OrderingError;
use crate::invoice::{AppliedCoupon, Invoice, LineItem, Priced};
use crate::pricing::PricingPolicy;

/// Builds one invoice at a time
pub struct InvoiceAggregator {
    invoice: Option<Invoice>,
    policy: PricingPolicy,
    coupons: Arc<dyn CouponResolver>,
}

impl InvoiceAggregator {
    /// Creates an aggregator in the Absent state
    pub fn new(policy: PricingPolicy, coupons: Arc<dyn CouponResolver>) -> Self {
        Self {
            invoice: None,
            policy,
            coupons,
        }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Returns true while an invoice is open
    pub fn is_active(&self) -> bool {
        self.invoice.is_some()
    }

    /// Borrows the current invoice
    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }

    /// Returns an owned copy of the current invoice
    pub fn snapshot(&self) -> Option<Invoice> {
        self.invoice.clone()
    }

    /// Portions in the cart, zero when Absent
    pub fn item_count(&self) -> u64 {
        self.invoice.as_ref().map(Invoice::item_count).unwrap_or(0)
    }

    /// Adds `quantity` portions of `item`
    ///
    /// Merges into the existing line for the item if there is one;
    /// otherwise appends a line whose name and unit price are copied from
    /// `item` now and never refreshed.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero or the merged quantity overflows
    /// - `InvalidPrice` if the catalog price is negative
    /// - `Money(CurrencyMismatch)` if the item is priced in another currency
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32) -> Result<(), OrderingError> {
        if quantity == 0 {
            warn!(item = %item.id, "Rejected add with zero quantity");
            return Err(OrderingError::InvalidQuantity {
                item: item.id,
                quantity: 0,
            });
        }
        if item.price.currency() != self.policy.currency() {
            warn!(item = %item.id, currency = %item.price.currency(), "Rejected add in foreign currency");
            return Err(MoneyError::CurrencyMismatch(
                self.policy.currency().to_string(),
                item.price.currency().to_string(),
            )
            .into());
        }
        if item.price.is_negative() {
            warn!(item = %item.id, "Rejected add with negative price");
            return Err(OrderingError::InvalidPrice(item.id));
        }

        let mut lines = self.current_lines();
        match lines.iter_mut().find(|line| line.menu_item_id() == item.id) {
            Some(line) => {
                let merged = line.quantity().checked_add(quantity).ok_or(
                    OrderingError::InvalidQuantity {
                        item: item.id,
                        quantity: i64::from(line.quantity()) + i64::from(quantity),
                    },
                )?;
                line.set_quantity(merged);
            }
            None => lines.push(LineItem::snapshot(item, quantity)),
        }

        let coupon = self.current_coupon();
        self.commit(lines, coupon)?;
        debug!(item = %item.id, quantity, "Item added");
        Ok(())
    }

    /// Removes the line for `id`, returning it
    ///
    /// Returns `Ok(None)` if there is no such line. Removing the last line
    /// closes the invoice.
    pub fn remove_item(&mut self, id: MenuItemId) -> Result<Option<LineItem>, OrderingError> {
        let mut lines = self.current_lines();
        let Some(position) = lines.iter().position(|line| line.menu_item_id() == id) else {
            return Ok(None);
        };
        let removed = lines.remove(position);

        let coupon = self.current_coupon();
        self.commit(lines, coupon)?;
        debug!(item = %id, "Item removed");
        Ok(Some(removed))
    }

    /// Sets the quantity of the line for `id`
    ///
    /// A quantity of zero or less removes the line. Returns `Ok(false)` if
    /// there is no such line.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` if `quantity` does not fit a line item.
    pub fn update_quantity(&mut self, id: MenuItemId, quantity: i64) -> Result<bool, OrderingError> {
        if quantity <= 0 {
            return Ok(self.remove_item(id)?.is_some());
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| OrderingError::InvalidQuantity { item: id, quantity })?;

        let mut lines = self.current_lines();
        let Some(line) = lines.iter_mut().find(|line| line.menu_item_id() == id) else {
            return Ok(false);
        };
        line.set_quantity(quantity);

        let coupon = self.current_coupon();
        self.commit(lines, coupon)?;
        debug!(item = %id, quantity, "Quantity updated");
        Ok(true)
    }

    /// Sets the kitchen note on the line for `id`
    ///
    /// A blank note clears it. Totals are unaffected. Returns false if
    /// there is no such line.
    pub fn update_note(&mut self, id: MenuItemId, note: impl Into<String>) -> bool {
        let Some(line) = self.invoice.as_mut().and_then(|invoice| invoice.line_mut(id)) else {
            return false;
        };

        let note = note.into();
        let note = if note.trim().is_empty() { None } else { Some(note) };
        debug!(item = %id, has_note = note.is_some(), "Kitchen note updated");
        line.set_note(note);
        true
    }

    /// Applies a coupon code to the open invoice
    ///
    /// An unknown code clears any previous coupon and zeroes the discount.
    /// Returns `Ok(false)` when there is no invoice.
    ///
    /// # Errors
    ///
    /// `InvalidCouponRate` if the resolver returns a rate outside [0, 1).
    pub fn apply_coupon(&mut self, code: &str) -> Result<bool, OrderingError> {
        if self.invoice.is_none() {
            return Ok(false);
        }

        let rate = self.coupons.resolve(code);
        if !rate.is_fractional_discount() {
            return Err(OrderingError::InvalidCouponRate {
                code: code.to_string(),
                rate: rate.to_string(),
            });
        }
        let coupon = (!rate.is_zero()).then(|| AppliedCoupon {
            code: code.to_string(),
            rate,
        });
        let known = coupon.is_some();

        let lines = self.current_lines();
        self.commit(lines, coupon)?;
        if known {
            debug!(code, %rate, "Coupon applied");
        } else {
            debug!(code, "Unknown coupon, discount cleared");
        }
        Ok(true)
    }

    /// Discards the invoice unconditionally, returning what was there
    pub fn clear(&mut self) -> Option<Invoice> {
        let discarded = self.invoice.take();
        if let Some(ref invoice) = discarded {
            info!(invoice = %invoice.id(), "Invoice cleared");
        }
        discarded
    }

    fn current_lines(&self) -> Vec<LineItem> {
        self.invoice
            .as_ref()
            .map(|invoice| invoice.line_items().to_vec())
            .unwrap_or_default()
    }

    fn current_coupon(&self) -> Option<AppliedCoupon> {
        self.invoice.as_ref().and_then(|invoice| invoice.applied().cloned())
    }

    /// Prices the candidate state and installs it only if pricing succeeds
    fn commit(&mut self, lines: Vec<LineItem>, coupon: Option<AppliedCoupon>) -> Result<(), OrderingError> {
        if lines.is_empty() {
            if let Some(invoice) = self.invoice.take() {
                info!(invoice = %invoice.id(), "Last item removed, invoice closed");
            }
            return Ok(());
        }

        let priced = Priced::compute(lines, coupon, &self.policy)?;
        let currency = self.policy.currency();
        let invoice = self.invoice.get_or_insert_with(|| {
            let invoice = Invoice::open(currency);
            info!(invoice = %invoice.id(), "Invoice opened");
            invoice
        });
        invoice.install(priced);
        Ok(())
    }
}

impl Default for InvoiceAggregator {
    /// INR at 12% GST with the default coupon table
    fn default() -> Self {
        Self::new(PricingPolicy::default(), Arc::new(CouponTable::default()))
    }
}

impl fmt::Debug for InvoiceAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceAggregator")
            .field("invoice", &self.invoice)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
