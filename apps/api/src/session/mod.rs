//! Session manager — explicitly constructed and dependency-injected, with an
//! `init()`/`dispose()` lifecycle instead of ambient global state. Holds the
//! current identity, drives the sign-in/up/out transitions, and notifies
//! registered observers on every change. Every registration returns a
//! `SubscriptionHandle`; dropping or unsubscribing it guarantees no dangling
//! callback after teardown.

pub mod handlers;

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tracing::warn;

use crate::errors::AppError;
use crate::gateway::{AuthError, Gateway, GatewayError};
use crate::models::session::{Session, SessionUser};

/// Lifecycle: `Uninitialized → Loading → { Authenticated, Anonymous }`.
/// Demo mode lands directly on `Anonymous` (no automatic sign-in).
#[derive(Debug, Clone)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Authenticated(Session),
    Anonymous,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Uninitialized => "uninitialized",
            SessionPhase::Loading => "loading",
            SessionPhase::Authenticated(_) => "authenticated",
            SessionPhase::Anonymous => "anonymous",
        };
        f.write_str(name)
    }
}

type Listener = Arc<dyn Fn(&SessionPhase) + Send + Sync>;

struct Inner {
    phase: SessionPhase,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
}

pub struct SessionManager {
    gateway: Arc<dyn Gateway>,
    inner: Arc<Mutex<Inner>>,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            inner: Arc::new(Mutex::new(Inner {
                phase: SessionPhase::Uninitialized,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
        }
    }

    /// Resolves the initial phase. In demo mode this is `Anonymous` without
    /// touching the gateway; in live mode the stored session decides. A
    /// failed lookup degrades to `Anonymous` with a warning rather than
    /// refusing to start.
    pub async fn init(&self) {
        self.set_phase(SessionPhase::Loading);

        if self.gateway.offline() {
            self.set_phase(SessionPhase::Anonymous);
            return;
        }

        let phase = match self.gateway.current_session().await {
            Ok(Some(session)) => SessionPhase::Authenticated(session),
            Ok(None) => SessionPhase::Anonymous,
            Err(e) => {
                warn!("Initial session lookup failed: {e}");
                SessionPhase::Anonymous
            }
        };
        self.set_phase(phase);
    }

    pub fn phase(&self) -> SessionPhase {
        lock_inner(&self.inner).phase.clone()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        match self.phase() {
            SessionPhase::Authenticated(session) => Some(session.user),
            _ => None,
        }
    }

    /// The authenticated caller, or `Unauthorized` for anyone else.
    pub fn require_user(&self) -> Result<SessionUser, AppError> {
        self.current_user().ok_or(AppError::Unauthorized)
    }

    /// Held state changes only on success; a bad-credentials failure is
    /// returned as a value and leaves the phase untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.gateway.sign_in(email, password).await?;
        self.set_phase(SessionPhase::Authenticated(session.clone()));
        Ok(session)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<Session, AuthError> {
        let session = self.gateway.sign_up(email, password, nickname).await?;
        self.set_phase(SessionPhase::Authenticated(session.clone()));
        Ok(session)
    }

    /// Always lands on `Anonymous` locally, even when the remote sign-out
    /// fails; the error still propagates for reporting.
    pub async fn sign_out(&self) -> Result<(), GatewayError> {
        let result = self.gateway.sign_out().await;
        self.set_phase(SessionPhase::Anonymous);
        result
    }

    /// Registers an observer for phase changes. The returned handle must be
    /// kept alive for as long as notifications are wanted; dropping it
    /// unsubscribes.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionPhase) + Send + Sync + 'static,
    ) -> SubscriptionHandle {
        let mut inner = lock_inner(&self.inner);
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        SubscriptionHandle {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Tears the manager down: drops every listener and resets the phase.
    /// Outstanding handles become inert.
    pub fn dispose(&self) {
        let mut inner = lock_inner(&self.inner);
        inner.listeners.clear();
        inner.phase = SessionPhase::Uninitialized;
    }

    fn set_phase(&self, phase: SessionPhase) {
        // Listeners run outside the lock so they may re-enter the manager.
        let listeners: Vec<Listener> = {
            let mut inner = lock_inner(&self.inner);
            inner.phase = phase.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(&phase);
        }
    }
}

/// Unsubscribe token for a registered session observer.
pub struct SubscriptionHandle {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl SubscriptionHandle {
    pub fn unsubscribe(self) {
        // Removal happens in Drop.
    }

    fn remove(&self) {
        if let Some(inner) = self.inner.upgrade() {
            lock_inner(&inner).listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.remove();
    }
}

fn lock_inner(inner: &Mutex<Inner>) -> std::sync::MutexGuard<'_, Inner> {
    // Listeners and phase writes cannot panic while holding the lock, so a
    // poisoned mutex only ever means a panicking test; recover the guard.
    match inner.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::demo::DemoGateway;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(DemoGateway::new()))
    }

    #[tokio::test]
    async fn init_in_demo_mode_lands_on_anonymous() {
        let sessions = manager();
        assert!(matches!(sessions.phase(), SessionPhase::Uninitialized));
        sessions.init().await;
        assert!(matches!(sessions.phase(), SessionPhase::Anonymous));
        assert!(sessions.current_user().is_none());
    }

    #[tokio::test]
    async fn sign_in_updates_phase_only_on_success() {
        let sessions = manager();
        sessions.init().await;

        assert!(sessions.sign_in("kein-email", "pw").await.is_err());
        assert!(matches!(sessions.phase(), SessionPhase::Anonymous));

        sessions.sign_in("demo@example.com", "pw").await.unwrap();
        assert!(matches!(sessions.phase(), SessionPhase::Authenticated(_)));
        assert_eq!(
            sessions.current_user().unwrap().email,
            "demo@example.com"
        );

        sessions.sign_out().await.unwrap();
        assert!(matches!(sessions.phase(), SessionPhase::Anonymous));
    }

    #[tokio::test]
    async fn observers_stop_firing_after_unsubscribe() {
        let sessions = manager();
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = calls.clone();
        let handle = sessions.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        sessions.init().await; // Loading + Anonymous
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        handle.unsubscribe();
        sessions.sign_in("demo@example.com", "pw").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dispose_drops_listeners_and_resets_phase() {
        let sessions = manager();
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = calls.clone();
        let _handle = sessions.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        sessions.dispose();
        assert!(matches!(sessions.phase(), SessionPhase::Uninitialized));

        sessions.init().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
