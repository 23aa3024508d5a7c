use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;

use super::{ProviderFuture, Session, SessionProvider, SessionUser};
use crate::config::{DemoAccount, ProviderConfig};
use crate::error::ProviderError;

/// In-process session provider.
///
/// Holds a fixed account list, simulates network latency with tokio timers,
/// and supports failure injection. Counters record how many calls were made
/// so callers can check the one-query-per-mount contract.
pub struct MemorySessionProvider {
    accounts: Vec<DemoAccount>,
    latency: Duration,
    fail_get_session: AtomicBool,
    fail_sign_out: AtomicBool,
    current: Mutex<Option<Session>>,
    changes: watch::Sender<Option<SessionUser>>,
    session_queries: AtomicUsize,
    sign_out_calls: AtomicUsize,
}

impl std::fmt::Debug for MemorySessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySessionProvider")
            .field("accounts", &self.accounts.len())
            .field("latency", &self.latency)
            .field("session_queries", &self.session_queries())
            .finish_non_exhaustive()
    }
}

impl MemorySessionProvider {
    pub fn new(accounts: Vec<DemoAccount>, latency: Duration) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            accounts,
            latency,
            fail_get_session: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            current: Mutex::new(None),
            changes,
            session_queries: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        let provider = Self::new(config.accounts.clone(), config.latency());
        provider.set_fail_get_session(config.fail_get_session);
        provider.set_fail_sign_out(config.fail_sign_out);
        provider
    }

    /// Replaces the current session (as if another tab signed in or out).
    pub fn set_session(&self, session: Option<Session>) {
        let user = session.as_ref().map(|s| s.user.clone());
        *self.current() = session;
        self.changes.send_replace(user);
    }

    pub fn set_fail_get_session(&self, fail: bool) {
        self.fail_get_session.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Number of `get_session` calls made so far.
    pub fn session_queries(&self) -> usize {
        self.session_queries.load(Ordering::SeqCst)
    }

    /// Number of `sign_out` calls made so far.
    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn current_session(&self) -> Option<Session> {
        self.current().clone()
    }

    fn current(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn find_account(&self, email: &str, password: &str) -> Option<&DemoAccount> {
        let email = email.trim();
        self.accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email) && account.password == password)
    }
}

impl SessionProvider for MemorySessionProvider {
    fn get_session(&self) -> ProviderFuture<'_, Result<Option<Session>, ProviderError>> {
        Box::pin(async move {
            self.session_queries.fetch_add(1, Ordering::SeqCst);
            self.simulate_latency().await;
            if self.fail_get_session.load(Ordering::SeqCst) {
                return Err(ProviderError::Unavailable(
                    "session lookup failed".to_string(),
                ));
            }
            Ok(self.current_session())
        })
    }

    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> ProviderFuture<'a, Result<Session, ProviderError>> {
        Box::pin(async move {
            self.simulate_latency().await;
            let account = self
                .find_account(email, password)
                .ok_or(ProviderError::InvalidCredentials)?;
            let session = Session::active(SessionUser::new(
                account.email.clone(),
                account.display_name.clone(),
            ));
            self.set_session(Some(session.clone()));
            Ok(session)
        })
    }

    fn sign_out(&self) -> ProviderFuture<'_, Result<(), ProviderError>> {
        Box::pin(async move {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            self.simulate_latency().await;
            if self.fail_sign_out.load(Ordering::SeqCst) {
                return Err(ProviderError::Unavailable("sign-out rejected".to_string()));
            }
            self.set_session(None);
            Ok(())
        })
    }

    fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemorySessionProvider {
        MemorySessionProvider::new(
            vec![DemoAccount {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
                display_name: Some("Dana Lee".to_string()),
            }],
            Duration::from_millis(300),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_session_counts_queries() {
        let provider = provider();
        assert_eq!(provider.get_session().await, Ok(None));
        assert_eq!(provider.get_session().await, Ok(None));
        assert_eq!(provider.session_queries(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_matches_case_insensitive_email() {
        let provider = provider();
        let session = provider.sign_in(" A@B.com ", "pw").await.unwrap();
        assert!(session.active);
        assert_eq!(session.user.display_name(), "Dana Lee");
        assert_eq!(provider.get_session().await, Ok(Some(session)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_rejects_wrong_password() {
        let provider = provider();
        assert_eq!(
            provider.sign_in("a@b.com", "nope").await,
            Err(ProviderError::InvalidCredentials)
        );
        assert_eq!(provider.current_session(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscription_sees_sign_in_and_out() {
        let provider = provider();
        let mut rx = provider.subscribe();
        assert_eq!(*rx.borrow_and_update(), None);

        provider.sign_in("a@b.com", "pw").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|u| u.email.clone()),
            Some("a@b.com".to_string())
        );

        provider.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_injection() {
        let provider = provider();
        provider.set_session(Some(Session::active(SessionUser::new("a@b.com", None))));
        provider.set_fail_get_session(true);
        provider.set_fail_sign_out(true);

        assert!(provider.get_session().await.is_err());
        assert!(provider.sign_out().await.is_err());
        assert_eq!(provider.sign_out_calls(), 1);
        // A failed sign-out leaves the provider's session in place.
        assert!(provider.current_session().is_some());
    }
}
