use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory admin sessions keyed by a random id.
///
/// Sessions do not survive a restart. A TTL too long to represent as an
/// `Instant` never expires.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Option<Instant>>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Open a session and return its id.
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        guard.retain(|_, expires_at| !is_expired(*expires_at, now));
        guard.insert(id.clone(), now.checked_add(self.ttl));
        id
    }

    pub async fn is_valid(&self, id: &str) -> bool {
        let mut guard = self.inner.lock().await;
        match guard.get(id) {
            Some(expires_at) if !is_expired(*expires_at, Instant::now()) => true,
            Some(_) => {
                guard.remove(id);
                false
            }
            None => false,
        }
    }

    pub async fn revoke(&self, id: &str) {
        self.inner.lock().await.remove(id);
    }
}

fn is_expired(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.is_some_and(|at| at <= now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_validate_revoke() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await;

        assert!(store.is_valid(&id).await);
        assert!(!store.is_valid("forged").await);

        store.revoke(&id).await;
        assert!(!store.is_valid(&id).await);
    }

    #[tokio::test]
    async fn sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(10));
        let id = store.create().await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!store.is_valid(&id).await);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_ne!(store.create().await, store.create().await);
    }

    #[tokio::test]
    async fn unrepresentable_ttl_never_expires() {
        let store = SessionStore::new(Duration::MAX);
        let id = store.create().await;
        assert!(store.is_valid(&id).await);

        store.create().await;
        assert!(store.is_valid(&id).await);
    }
}
