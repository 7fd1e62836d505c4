//! Order placement, ownership-checked reads and admin status updates.
//!
//! Line items are price snapshots: the unit price is copied from the catalog
//! when the order is placed and never follows later catalog edits.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::OrderService;
