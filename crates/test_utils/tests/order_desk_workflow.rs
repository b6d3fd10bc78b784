//! End-to-end tests across catalog, ordering and order history
//!
//! These use the shared fixtures so the expected amounts can be checked
//! against the sample menu by hand.

use std::sync::Arc;

use core_kernel::{Currency, Rate};
use domain_catalog::{MenuCatalogPort, MenuItemId, MenuQuery};
use domain_ordering::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::*;

mod waiter_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_table_order_from_menu_to_kitchen() {
        init_test_tracing();
        let (mut desk, _catalog, history) = DeskFixtures::desk();

        desk.add_menu_item(MenuIds::BIRYANI, 2).await.unwrap();
        desk.add_menu_item(MenuIds::GARLIC_NAAN, 3).await.unwrap();
        desk.aggregator_mut().update_note(MenuIds::BIRYANI, "medium spicy");
        desk.aggregator_mut().apply_coupon("SAVE15").unwrap();

        let invoice = desk.aggregator().snapshot().unwrap();
        assert_invoice_totals(&invoice, dec!(680), dec!(102), dec!(69.36), dec!(647.36));
        assert_invoice_invariants(&invoice, desk.aggregator().policy());

        let receipt = desk.submit(OrderChannel::Waiter { table_number: 2 }).await.unwrap();
        assert_eq!(receipt.total.to_string(), "₹647.36");
        assert!(!desk.aggregator().is_active());

        let order = history.get_order(receipt.order_id).await.unwrap();
        let line = order.submission.invoice.line(MenuIds::BIRYANI).unwrap();
        assert_eq!(line.note_for_kitchen(), Some("medium spicy"));
        assert_eq!(order.status, OrderStatus::Pending);

        history.update_status(receipt.order_id, OrderStatus::Preparing).await.unwrap();
        assert_eq!(history.kitchen_queue().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_next_order_starts_fresh_invoice() {
        init_test_tracing();
        let (mut desk, _catalog, history) = DeskFixtures::desk();

        desk.add_menu_item(MenuIds::SAMOSA, 2).await.unwrap();
        let first = desk.submit(OrderChannel::Customer).await.unwrap();

        desk.add_menu_item(MenuIds::MANGO_LASSI, 1).await.unwrap();
        let invoice = desk.aggregator().invoice().unwrap();
        assert_ne!(invoice.id(), first.invoice_id);
        assert!(invoice.applied_coupon().is_none());
        assert_eq!(invoice.subtotal().amount(), dec!(120));

        let second = desk.submit(OrderChannel::Customer).await.unwrap();
        let orders: Vec<_> = history.list_orders().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(orders, vec![first.order_id, second.order_id]);
        assert_eq!(desk.activities().of_kind(ActivityKind::Bill).count(), 2);
    }

    #[tokio::test]
    async fn test_switched_off_dish_cannot_be_ordered() {
        let (mut desk, catalog, _history) = DeskFixtures::desk();
        catalog.set_active(MenuIds::TANDOORI_CHICKEN, false).await.unwrap();

        let err = desk.add_menu_item(MenuIds::TANDOORI_CHICKEN, 1).await.unwrap_err();
        assert!(matches!(err, OrderingError::ItemUnavailable(MenuIds::TANDOORI_CHICKEN)));

        let active = catalog.find_items(MenuQuery::active()).await.unwrap();
        assert_eq!(active.len(), 9);
    }

    #[tokio::test]
    async fn test_dish_added_to_catalog_can_be_ordered() {
        let (mut desk, catalog, _history) = DeskFixtures::desk();
        let request = MenuItemBuilder::random()
            .with_category("Specials")
            .with_price(dec!(150))
            .build_request();

        let created = catalog.add_item(request).await.unwrap();
        assert_eq!(created.id, MenuItemId(11));

        desk.add_menu_item(created.id, 2).await.unwrap();
        let line = desk.aggregator().invoice().unwrap().line(created.id).unwrap().clone();
        assert_eq!(line.name(), created.name);
        assert_eq!(line.line_total().amount(), dec!(300));
    }

    #[tokio::test]
    async fn test_dish_added_switched_off_is_unavailable() {
        let (mut desk, catalog, _history) = DeskFixtures::desk();
        let request = MenuItemBuilder::random()
            .with_category("Specials")
            .non_veg()
            .inactive()
            .build_request();

        let created = catalog.add_item(request).await.unwrap();
        assert!(!created.active);
        assert!(!created.is_veg());

        let err = desk.add_menu_item(created.id, 1).await.unwrap_err();
        assert!(matches!(err, OrderingError::ItemUnavailable(id) if id == created.id));

        let veg = catalog.find_items(MenuQuery::default().veg_only()).await.unwrap();
        assert!(veg.iter().all(|item| item.id != created.id));
    }

    #[tokio::test]
    async fn test_dish_priced_in_foreign_currency_is_rejected() {
        let (mut desk, catalog, _history) = DeskFixtures::desk();
        let request = MenuItemBuilder::new()
            .with_name("Imported Burger")
            .with_money(MoneyFixtures::usd_5())
            .build_request();
        let created = catalog.add_item(request).await.unwrap();

        desk.add_menu_item(MenuIds::BIRYANI, 1).await.unwrap();
        let before = desk.aggregator().snapshot();

        let err = desk.add_menu_item(created.id, 1).await.unwrap_err();
        assert!(matches!(err, OrderingError::Money(_)));
        assert_eq!(desk.aggregator().snapshot(), before);
    }

    #[tokio::test]
    async fn test_record_activity_for_housekeeping() {
        let (mut desk, _catalog, _history) = DeskFixtures::desk();

        desk.record_activity("Table 4 cleaned", ActivityKind::Cleaning);

        let event = desk.activities().latest().unwrap();
        assert_eq!(event.kind, ActivityKind::Cleaning);
        assert_eq!(event.message, "Table 4 cleaned");

        desk.add_menu_item(MenuIds::PANEER_TIKKA, 1).await.unwrap();
        desk.submit(OrderChannel::Waiter { table_number: 4 }).await.unwrap();

        let kinds: Vec<_> = desk.activities().iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![ActivityKind::Bill, ActivityKind::Cleaning]);
        assert_eq!(desk.activities().of_kind(ActivityKind::Cleaning).count(), 1);
    }

    #[tokio::test]
    async fn test_configured_desk() {
        let config = OrderingConfig {
            tax_rate_percent: dec!(5),
            activity_capacity: 2,
            coupons: vec![CouponConfig {
                code: "STAFF".to_string(),
                percent: dec!(50),
            }],
            ..Default::default()
        };
        let history = Arc::new(InMemoryOrderHistory::new());
        let mut desk = OrderDesk::from_config(&config, MenuFixtures::catalog(), history.clone()).unwrap();

        for _ in 0..3 {
            desk.add_menu_item(MenuIds::DAL_MAKHANI, 1).await.unwrap();
            desk.aggregator_mut().apply_coupon("STAFF").unwrap();
            assert!(desk.aggregator_mut().apply_coupon("SAVE10").is_ok());
            desk.aggregator_mut().apply_coupon("STAFF").unwrap();

            let invoice = desk.aggregator().invoice().unwrap();
            assert_invoice_totals(invoice, dec!(180), dec!(90), dec!(4.5), dec!(94.5));
            desk.submit(OrderChannel::Customer).await.unwrap();
        }

        assert_eq!(history.len().await, 3);
        assert_eq!(desk.activities().len(), 2);
    }

    #[tokio::test]
    async fn test_desks_share_one_history() {
        let history = Arc::new(InMemoryOrderHistory::new());
        let catalog = MenuFixtures::catalog();

        let mut handles = Vec::new();
        for table_number in 1..=4 {
            let mut desk =
                OrderDesk::from_config(&OrderingConfig::default(), catalog.clone(), history.clone()).unwrap();
            handles.push(tokio::spawn(async move {
                desk.add_menu_item(MenuIds::CHOLE_BHATURE, table_number).await.unwrap();
                desk.submit(OrderChannel::Waiter { table_number }).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let orders = history.list_orders().await.unwrap();
        assert_eq!(orders.len(), 4);
        assert!(orders
            .iter()
            .all(|order| matches!(order.submission.channel, OrderChannel::Waiter { .. })));
    }
}

mod cart_tests {
    use super::*;

    #[test]
    fn test_sample_dishes_snapshot_catalog_prices() {
        let mut cart = InvoiceAggregator::default();
        cart.add_item(&MenuFixtures::biryani(), 1).unwrap();
        cart.add_item(&MenuFixtures::garlic_naan(), 2).unwrap();

        let invoice = cart.invoice().unwrap();
        assert_eq!(invoice.line(MenuIds::BIRYANI).unwrap().unit_price(), MoneyFixtures::inr_250());
        assert_eq!(invoice.discount(), MoneyFixtures::inr_zero());
        assert_invoice_totals(invoice, dec!(370), dec!(0), dec!(44.4), dec!(414.4));
        assert_aggregator_consistent(&cart);
    }

    #[test]
    fn test_emptied_cart_reports_no_items() {
        let mut cart = InvoiceAggregator::default();
        cart.add_item(&MenuFixtures::garlic_naan(), 3).unwrap();
        cart.update_quantity(MenuIds::GARLIC_NAAN, 0).unwrap();

        assert!(cart.invoice().is_none());
        assert_aggregator_consistent(&cart);
    }
}

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_random_sessions_keep_invoice_consistent(
            menu in menu_strategy(),
            tax_percent in tax_percent_strategy(),
            session in cart_session_strategy(),
        ) {
            let policy = PricingPolicy::new(Currency::INR, Rate::from_percentage(tax_percent)).unwrap();
            let mut cart = InvoiceAggregator::new(policy, Arc::new(CouponTable::default()));

            for op in &session {
                let before = cart.snapshot();
                match op.apply(&mut cart, &menu) {
                    Ok(()) => {}
                    Err(OrderingError::InvalidQuantity { quantity: 0, .. }) => {
                        prop_assert_eq!(cart.snapshot(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other}"),
                }
                assert_aggregator_consistent(&cart);
            }
        }

        #[test]
        fn prop_display_rounds_to_paise(price in inr_price_strategy(), qty in 1u32..20) {
            let dish = MenuItemBuilder::new().with_money(price).build();
            let mut cart = InvoiceAggregator::default();
            cart.add_item(&dish, qty).unwrap();
            cart.apply_coupon("SAVE15").unwrap();

            let total = cart.invoice().unwrap().total();
            let shown = total.to_string();
            let decimals = shown.rsplit('.').next().unwrap();
            prop_assert_eq!(decimals.len(), 2);
            assert_money_approx_eq(&total.round_to_currency(), &total, dec!(0.005));
        }
    }
}
