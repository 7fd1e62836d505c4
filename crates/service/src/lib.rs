//! Service layer: business operations on top of `models`, independent of the web framework.
//! - Each domain has a repository trait, an in-memory `mock` and a sea-orm implementation.
//! - Services hold `Arc<dyn Repository>` so the HTTP layer can be tested without a database.
//! - All failures use the shared [`errors::ServiceError`] taxonomy.

pub mod errors;
pub mod token;
pub mod auth;
pub mod admin_auth;
pub mod catalog;
pub mod orders;
#[cfg(test)]
pub mod test_support;
