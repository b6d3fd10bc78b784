//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than a bare `assert_eq!`.

use core_kernel::Money;
use domain_ordering::{Invoice, InvoiceAggregator, PricingPolicy};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts the headline amounts of an invoice
pub fn assert_invoice_totals(
    invoice: &Invoice,
    subtotal: Decimal,
    discount: Decimal,
    tax: Decimal,
    total: Decimal,
) {
    let actual = (
        invoice.subtotal().amount(),
        invoice.discount().amount(),
        invoice.tax().amount(),
        invoice.total().amount(),
    );
    assert_eq!(
        actual,
        (subtotal, discount, tax, total),
        "Invoice {} totals (subtotal, discount, tax, total) do not match",
        invoice.id()
    );
}

/// Asserts every consistency rule an invoice must satisfy
///
/// # Panics
///
/// Panics with the violated rule if:
/// - there are no lines, or two lines for the same menu item
/// - a line has a zero quantity or a stale line total
/// - subtotal, discount, tax or total disagree with the lines and rates
pub fn assert_invoice_invariants(invoice: &Invoice, policy: &PricingPolicy) {
    assert!(invoice.line_count() > 0, "Active invoice {} has no lines", invoice.id());

    let mut subtotal = Decimal::ZERO;
    for (index, line) in invoice.line_items().iter().enumerate() {
        assert!(line.quantity() >= 1, "Line {} has zero quantity", line.menu_item_id());
        assert_eq!(
            line.line_total().amount(),
            line.unit_price().amount() * Decimal::from(line.quantity()),
            "Line {} total is stale",
            line.menu_item_id()
        );
        assert!(
            invoice.line_items()[..index]
                .iter()
                .all(|earlier| earlier.menu_item_id() != line.menu_item_id()),
            "Menu item {} appears on more than one line",
            line.menu_item_id()
        );
        subtotal += line.line_total().amount();
    }

    assert_eq!(invoice.subtotal().amount(), subtotal, "Subtotal is not the sum of the lines");

    let discount = invoice.discount().amount();
    assert_eq!(
        discount,
        subtotal * invoice.coupon_rate().as_decimal(),
        "Discount does not follow the coupon rate"
    );
    assert!(
        discount >= Decimal::ZERO && discount <= subtotal,
        "Discount {} outside [0, {}]",
        discount,
        subtotal
    );

    let taxable = subtotal - discount;
    assert_eq!(
        invoice.tax().amount(),
        taxable * policy.tax_rate().as_decimal(),
        "Tax is not charged on the discounted subtotal"
    );
    assert_eq!(
        invoice.total().amount(),
        taxable + invoice.tax().amount(),
        "Total is not subtotal - discount + tax"
    );
}

/// Asserts the aggregator's state is consistent, Absent or Active
pub fn assert_aggregator_consistent(aggregator: &InvoiceAggregator) {
    match aggregator.invoice() {
        Some(invoice) => assert_invoice_invariants(invoice, aggregator.policy()),
        None => assert_eq!(aggregator.item_count(), 0, "Absent aggregator reports items"),
    }
}
