//! Dish catalog: public menu reads plus admin-side creation and updates.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::CatalogService;
