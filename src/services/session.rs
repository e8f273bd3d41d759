use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::Session;

/// In-memory session store keyed by user email or caller address.
///
/// Concurrency discipline: whole-map mutual exclusion. A request copies the
/// session out, mutates it, and puts it back, so two concurrent messages for
/// the same key are last-writer-wins. Sessions live for the process lifetime;
/// there is no expiry.
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Session> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: &str, session: Session) {
        self.inner.lock().unwrap().insert(key.to_string(), session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stage;

    #[test]
    fn test_get_unknown_key_is_none() {
        let store = SessionStore::new();
        assert!(store.get("nobody@example.com").is_none());
    }

    #[test]
    fn test_sessions_are_isolated_by_key() {
        let store = SessionStore::new();

        let mut a = Session::new();
        a.stage = Stage::AwaitingTime;
        a.data.date = Some("08.11.2025".to_string());
        store.put("a@example.com", a);

        store.put("b@example.com", Session::new());

        let a = store.get("a@example.com").unwrap();
        let b = store.get("b@example.com").unwrap();
        assert_eq!(a.stage, Stage::AwaitingTime);
        assert_eq!(a.data.date.as_deref(), Some("08.11.2025"));
        assert_eq!(b.stage, Stage::Start);
        assert!(b.data.date.is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let store = SessionStore::new();
        store.put("k", Session::new());

        let mut updated = Session::new();
        updated.stage = Stage::Completed;
        store.put("k", updated);

        assert_eq!(store.get("k").unwrap().stage, Stage::Completed);
    }
}
