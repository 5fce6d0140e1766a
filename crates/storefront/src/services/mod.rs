//! Service layer for the storefront.

pub mod email;
pub mod payment;

pub use email::{EmailError, EmailService};
pub use payment::{PaymentClient, PaymentError, PaymentIntent, PaymentIntentStatus};
