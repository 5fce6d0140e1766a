//! Order domain types for the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fournil_core::{ClientId, DeliveryDate, OrderId, OrderNumber, OrderStatus, Price};

/// A persisted customer order.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Human-readable order number (`DD-MM-NN`).
    pub number: OrderNumber,
    /// Date the client picks the order up.
    pub delivery: DeliveryDate,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Client who placed the order.
    pub client_id: ClientId,
    /// Ordered items.
    pub items: Vec<OrderItem>,
    /// Order total.
    pub total: Price,
    /// Free-form note from the client.
    pub note: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Data for persisting an order at checkout completion.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Date the client picks the order up.
    pub delivery: DeliveryDate,
    /// Client who placed the order.
    pub client_id: ClientId,
    /// Ordered items, snapshotted from the CMS.
    pub items: Vec<OrderItem>,
    /// Order total charged to the payment provider.
    pub total: Price,
    /// Payment intent that paid for this order.
    pub payment_intent_id: String,
    /// Free-form note from the client.
    pub note: Option<String>,
}

/// One line of an order.
///
/// Stored as JSONB on the order row; snapshots everything needed to bake
/// and bill without a catalog lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// CMS slug of the product.
    pub product_slug: String,
    /// Product name at order time.
    pub name: String,
    /// Unit price at order time, in euro cents.
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Line total.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        Price::from_cents(self.unit_price_cents).times(self.quantity)
    }
}
