//! Domain models for the admin back-office.

pub mod accounting;
pub mod client;
pub mod meeting;
pub mod order;
pub mod session;
pub mod staff_user;

pub use accounting::{AccountingEntry, MonthSummary, NewAccountingEntry};
pub use client::Client;
pub use meeting::{Meeting, NewMeeting};
pub use order::{Order, OrderItem};
pub use session::{CurrentStaff, session_keys};
pub use staff_user::StaffUser;
