//! Customer auth: three-layer architecture (domain, repository, service).
//!
//! Password registration/login, federated sign-in upsert and bearer-token
//! resolution live here; the HTTP layer only parses and maps errors.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
