//! Capability checks against the session.

use async_trait::async_trait;
use tower_sessions::Session;

use super::AccessControl;

/// Session key holding the administrator flag, set by the host at login.
const SESSION_IS_ADMIN: &str = "is_admin";

/// Reads the host-managed admin flag from the session. An administrator
/// holds every capability this feature asks about.
#[derive(Debug, Default)]
pub struct SessionAccessControl;

impl SessionAccessControl {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccessControl for SessionAccessControl {
    async fn caller_can(&self, session: &Session, _capability: &str) -> bool {
        session
            .get::<bool>(SESSION_IS_ADMIN)
            .await
            .ok()
            .flatten()
            .unwrap_or(false)
    }
}

/// Grants every capability.
#[derive(Debug, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessControl for AllowAll {
    async fn caller_can(&self, _session: &Session, _capability: &str) -> bool {
        true
    }
}

/// Denies every capability.
#[derive(Debug, Default)]
pub struct DenyAll;

#[async_trait]
impl AccessControl for DenyAll {
    async fn caller_can(&self, _session: &Session, _capability: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::host::MANAGE_TYPES;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn anonymous_session_holds_no_capability() {
        let session = test_session();
        assert!(
            !SessionAccessControl::new()
                .caller_can(&session, MANAGE_TYPES)
                .await
        );
    }

    #[tokio::test]
    async fn admin_flag_grants_capability() {
        let session = test_session();
        let _ = session.insert(SESSION_IS_ADMIN, true).await;
        assert!(
            SessionAccessControl::new()
                .caller_can(&session, MANAGE_TYPES)
                .await
        );
    }
}
