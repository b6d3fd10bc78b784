//! Core Kernel - Foundational types for the order desk
//!
//! This crate provides the building blocks shared by the catalog and
//! ordering domains:
//! - Money and rates with precise decimal arithmetic
//! - Strongly typed identifiers
//! - The error type every port adapter reports through

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::{InvoiceId, OrderId, ActivityId};
pub use ports::{PortError, DomainPort};
