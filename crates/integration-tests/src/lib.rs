//! Integration tests for Fournil.
//!
//! # Test Categories
//!
//! - `access_guard` - Cross-crate checks of the admin access guard
//! - `order_numbering` - Order-number allocation arithmetic and formats
//! - `admin_http` - Live-server HTTP tests (ignored by default; need a
//!   running back-office and database)
//!
//! # Running
//!
//! ```bash
//! cargo test -p fournil-integration-tests
//!
//! # Live-server tests
//! cargo run -p fournil-admin &
//! cargo test -p fournil-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
