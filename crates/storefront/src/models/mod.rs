//! Domain models for the storefront.

pub mod cart;
pub mod client;
pub mod order;

pub use cart::{Cart, CartItem, session_keys};
pub use client::Client;
pub use order::{NewOrder, Order, OrderItem};
