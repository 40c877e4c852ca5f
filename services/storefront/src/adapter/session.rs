use std::collections::HashMap;
use std::sync::RwLock;

/// Read side of the session storage owned by the UI host. Values are
/// written by the login flow and cleared on logout, this crate only
/// reads them.
pub trait AbstractSessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    items: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut guard) = self.items.write() {
            let _old = guard.insert(key.to_string(), value.to_string());
        }
    }
    pub fn remove_item(&self, key: &str) -> Option<String> {
        self.items.write().ok().and_then(|mut g| g.remove(key))
    }
    pub fn clear(&self) {
        if let Ok(mut guard) = self.items.write() {
            guard.clear();
        }
    }
}

impl AbstractSessionStore for InMemorySessionStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok().and_then(|g| g.get(key).cloned())
    }
}
