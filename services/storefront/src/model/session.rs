use crate::adapter::session::AbstractSessionStore;
use crate::constant::session_keys;

/// Credentials of the current user, materialized before navigation so the
/// guard never has to read ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    role: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: Option<String>, role: Option<String>) -> Self {
        // empty strings left by a half-finished logout count as absent
        let token = token.filter(|t| !t.is_empty());
        let role = role.filter(|r| !r.is_empty());
        Self { token, role }
    }

    pub fn load(store: &dyn AbstractSessionStore) -> Self {
        Self::new(
            store.get_item(session_keys::TOKEN),
            store.get_item(session_keys::ROLE),
        )
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
