//! Shared building blocks for the kitchen workspace: logging setup, the JSON
//! response envelope and small wire types used by every HTTP surface.

pub mod response;
pub mod types;
pub mod utils;

pub use response::ApiEnvelope;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
