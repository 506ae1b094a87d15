use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tripwise_core::repository::TOKEN_KEY;
use tripwise_core::{AuthError, KeyValueStore};

use crate::auth::{AuthService, Credentials};

pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Authentication state of the running client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: String) -> Self {
        Self { token: Some(token) }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Owns the session and gates access to protected views.
///
/// A stored token is trusted as-is on restore; nothing here checks expiry.
pub struct SessionGuard {
    auth: Arc<dyn AuthService>,
    store: Arc<dyn KeyValueStore>,
    login_timeout: Duration,
    session: RwLock<Session>,
    // At most one login in flight
    login_lock: Mutex<()>,
}

impl SessionGuard {
    /// Build a guard from whatever token the store already holds
    pub async fn restore(
        auth: Arc<dyn AuthService>,
        store: Arc<dyn KeyValueStore>,
        login_timeout: Duration,
    ) -> Self {
        let session = match store.get(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => {
                info!("Restored stored session");
                Session::with_token(token)
            }
            Ok(_) => Session::anonymous(),
            Err(e) => {
                warn!("Could not read stored session, starting signed out: {}", e);
                Session::anonymous()
            }
        };

        Self {
            auth,
            store,
            login_timeout,
            session: RwLock::new(session),
            login_lock: Mutex::new(()),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let _in_flight = self.login_lock.lock().await;
        let credentials = Credentials::new(username, password);

        let token = match tokio::time::timeout(self.login_timeout, self.auth.authenticate(&credentials)).await {
            Ok(Ok(token)) => token,
            Ok(Err(e)) => {
                info!("Login for {} failed: {}", username, e);
                return Err(e);
            }
            Err(_) => {
                warn!("Login for {} timed out after {:?}", username, self.login_timeout);
                return Err(AuthError::Transport);
            }
        };

        self.store.set(TOKEN_KEY, &token).await.map_err(|e| {
            error!("Failed to persist session token: {}", e);
            AuthError::Storage(e.to_string())
        })?;

        *self.write_session() = Session::with_token(token);
        info!("User {} logged in", username);
        Ok(())
    }

    /// Always leaves the guard signed out, even if the store cannot be cleared
    pub async fn logout(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY).await {
            warn!("Failed to clear stored session token: {}", e);
        }
        *self.write_session() = Session::anonymous();
        info!("User logged out");
    }

    pub fn is_authorized(&self) -> bool {
        self.read_session().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.read_session().token().map(str::to_string)
    }

    pub fn session(&self) -> Session {
        self.read_session().clone()
    }

    fn read_session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_session(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tripwise_core::RepoResult;

    /// In-memory slots that can be told to fail writes
    #[derive(Default)]
    struct Slots {
        token: std::sync::Mutex<Option<String>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl KeyValueStore for Slots {
        async fn get(&self, _key: &str) -> RepoResult<Option<String>> {
            Ok(self.token.lock().unwrap().clone())
        }

        async fn set(&self, _key: &str, value: &str) -> RepoResult<()> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            *self.token.lock().unwrap() = Some(value.to_string());
            Ok(())
        }

        async fn remove(&self, _key: &str) -> RepoResult<()> {
            *self.token.lock().unwrap() = None;
            Ok(())
        }
    }

    struct FixedAuth {
        result: Result<String, AuthError>,
        delay: Duration,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FixedAuth {
        fn new(result: Result<String, AuthError>) -> Self {
            Self::delayed(result, Duration::ZERO)
        }

        fn delayed(result: Result<String, AuthError>, delay: Duration) -> Self {
            Self {
                result,
                delay,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthService for FixedAuth {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<String, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    async fn guard_with(auth: Arc<FixedAuth>, store: Arc<Slots>) -> SessionGuard {
        SessionGuard::restore(auth, store, DEFAULT_LOGIN_TIMEOUT).await
    }

    #[tokio::test]
    async fn test_restore_trusts_stored_token() {
        let store = Arc::new(Slots::default());
        *store.token.lock().unwrap() = Some("stored".to_string());

        let guard = guard_with(Arc::new(FixedAuth::new(Err(AuthError::Transport))), store).await;
        assert!(guard.is_authorized());
        assert_eq!(guard.token().as_deref(), Some("stored"));
    }

    #[tokio::test]
    async fn test_login_success_persists_token() {
        let store = Arc::new(Slots::default());
        let guard = guard_with(Arc::new(FixedAuth::new(Ok("tok".to_string()))), store.clone()).await;
        assert!(!guard.is_authorized());

        guard.login("rahul", "secret").await.unwrap();

        assert!(guard.is_authorized());
        assert_eq!(guard.session(), Session::with_token("tok".to_string()));
        assert_eq!(store.token.lock().unwrap().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_rejection_leaves_store_untouched() {
        let store = Arc::new(Slots::default());
        let auth = Arc::new(FixedAuth::new(Err(AuthError::Rejected("bad creds".to_string()))));
        let guard = guard_with(auth, store.clone()).await;

        let err = guard.login("rahul", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "bad creds");
        assert!(!guard.is_authorized());
        assert!(store.token.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_signed_out() {
        let store = Arc::new(Slots {
            fail_writes: true,
            ..Slots::default()
        });
        let guard = guard_with(Arc::new(FixedAuth::new(Ok("tok".to_string()))), store).await;

        let err = guard.login("rahul", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
        assert!(!guard.is_authorized());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let store = Arc::new(Slots::default());
        let guard = guard_with(Arc::new(FixedAuth::new(Ok("tok".to_string()))), store.clone()).await;
        guard.login("rahul", "secret").await.unwrap();

        guard.logout().await;

        assert!(!guard.is_authorized());
        assert!(guard.token().is_none());
        assert!(store.token.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_times_out() {
        let auth = Arc::new(FixedAuth::delayed(Ok("late".to_string()), Duration::from_secs(5)));
        let guard = SessionGuard::restore(auth, Arc::new(Slots::default()), Duration::from_millis(50)).await;

        let err = guard.login("rahul", "secret").await.unwrap_err();
        assert_eq!(err, AuthError::Transport);
        assert!(!guard.is_authorized());
    }

    #[tokio::test]
    async fn test_concurrent_logins_are_serialized() {
        let auth = Arc::new(FixedAuth::delayed(Ok("tok".to_string()), Duration::from_millis(30)));
        let guard = guard_with(auth.clone(), Arc::new(Slots::default())).await;

        let (first, second) = tokio::join!(guard.login("a", "1"), guard.login("b", "2"));
        first.unwrap();
        second.unwrap();

        assert_eq!(auth.calls.load(Ordering::SeqCst), 2);
        assert_eq!(auth.max_in_flight.load(Ordering::SeqCst), 1);
    }
}
