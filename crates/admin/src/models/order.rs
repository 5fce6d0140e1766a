//! Order domain types for the back-office.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fournil_core::{ClientId, DeliveryDate, OrderId, OrderNumber, OrderStatus, Price};

/// A customer order as seen from the back-office.
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
    /// Client name, denormalized for listings.
    pub client_name: String,
    /// Client email, denormalized for listings.
    pub client_email: String,
    /// Ordered items.
    pub items: Vec<OrderItem>,
    /// Order total.
    pub total: Price,
    /// Free-form note from the client ("no sesame please").
    pub note: Option<String>,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// One line of an order.
///
/// Stored as JSONB on the order row; the catalog lives in the CMS, so the
/// line snapshots everything needed to bake and bill without a catalog
/// lookup.
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
