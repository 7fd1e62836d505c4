use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

/// One logged-in admin.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub email: String,
}

/// In-process session table keyed by session id. Entries expire after the
/// configured TTL; expiry housekeeping is done by the cache itself.
#[derive(Clone)]
pub struct SessionStore {
    inner: Cache<String, AdminSession>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder().max_capacity(10_000).time_to_live(ttl).build();
        Self { inner }
    }

    /// Start a session and return its id.
    pub async fn create(&self, email: &str) -> String {
        let sid = Uuid::new_v4().simple().to_string();
        let session = AdminSession { email: email.to_string() };
        self.inner.insert(sid.clone(), session).await;
        sid
    }

    pub async fn get(&self, sid: &str) -> Option<AdminSession> {
        self.inner.get(sid).await
    }

    pub async fn destroy(&self, sid: &str) {
        self.inner.invalidate(sid).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_get_destroy() {
        let store = SessionStore::new(Duration::from_secs(60));
        let sid = store.create("admin@kitchen.test").await;
        assert_eq!(store.get(&sid).await.map(|s| s.email), Some("admin@kitchen.test".to_string()));
        store.destroy(&sid).await;
        assert!(store.get(&sid).await.is_none());
    }

    #[tokio::test]
    async fn sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(50));
        let sid = store.create("admin@kitchen.test").await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.get(&sid).await.is_none());
    }

    #[tokio::test]
    async fn unknown_sid_is_absent() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.get("nope").await.is_none());
    }
}
