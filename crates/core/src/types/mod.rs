//! Core types for Fournil.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod delivery_date;
pub mod email;
pub mod id;
pub mod order_number;
pub mod price;
pub mod role;
pub mod status;

pub use delivery_date::{DeliveryDate, DeliveryDateError};
pub use email::{Email, EmailError};
pub use id::*;
pub use order_number::{OrderNumber, OrderNumberError, next_sequence};
pub use price::Price;
pub use role::StaffRole;
pub use status::{AccountingKind, OrderStatus};
