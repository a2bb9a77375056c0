//! Session lifecycle: credential exchange, durable restore, and teardown.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, warn};
use url::Url;

use shared::{
    domain::{Role, Session},
    error::ApiErrorBody,
    protocol::{RegisterRequest, TokenResponse},
};
use storage::{Storage, StoredCredentials};

use crate::{
    error::{AuthError, RegisterError},
    transport::endpoint_url,
};

/// Durable persistence for session credentials. Injected explicitly so
/// nothing in the call graph reaches for ambient global state.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<StoredCredentials>>;
    async fn save(&self, credentials: &StoredCredentials) -> anyhow::Result<()>;
    async fn clear(&self) -> anyhow::Result<()>;
}

/// Store backed by the sqlite credential slot.
pub struct SqliteCredentialStore {
    storage: Storage,
}

impl SqliteCredentialStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn load(&self) -> anyhow::Result<Option<StoredCredentials>> {
        self.storage.load_credentials().await
    }

    async fn save(&self, credentials: &StoredCredentials) -> anyhow::Result<()> {
        self.storage.save_credentials(credentials).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.storage.clear_credentials().await
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> anyhow::Result<Option<StoredCredentials>> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> anyhow::Result<()> {
        *self.inner.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.inner.lock().await = None;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    LoggedIn(Session),
    LoggedOut,
    /// The server rejected the token mid-session; the session was cleared
    /// and the user must re-authenticate.
    Expired,
}

/// Seam through which fetch components force session teardown when a
/// read observes an authorization-expired response.
#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn invalidate(&self);
}

pub struct SessionManager {
    http: Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(base_url: Url, store: Arc<dyn CredentialStore>) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            http: Client::new(),
            base_url,
            store,
            current: RwLock::new(None),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Reads persisted credentials without touching the network. Call once
    /// at process start. A record with an empty token or an unrecognized
    /// role is discarded rather than restored.
    pub async fn restore(&self) -> Option<Session> {
        let stored = match self.store.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => return None,
            Err(err) => {
                warn!("session: credential store read failed: {err:#}");
                return None;
            }
        };

        if stored.token.is_empty() {
            warn!("session: persisted token is empty; discarding credentials");
            let _ = self.store.clear().await;
            return None;
        }

        let Ok(role) = stored.role.parse::<Role>() else {
            warn!(
                role = %stored.role,
                "session: persisted role not recognized; discarding credentials"
            );
            let _ = self.store.clear().await;
            return None;
        };

        let session = Session {
            token: stored.token,
            role,
            display_name: stored.display_name,
        };
        *self.current.write().await = Some(session.clone());
        info!(role = ?session.role, "session: restored from persisted credentials");
        Some(session)
    }

    /// Exchanges username/password for a session and persists it so
    /// [`SessionManager::restore`] can recover it after a restart.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(endpoint_url(&self.base_url, "token"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|err| AuthError::ServerUnavailable(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                return Err(AuthError::InvalidCredentials)
            }
            status => {
                return Err(AuthError::ServerUnavailable(format!(
                    "token endpoint returned {status}"
                )))
            }
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthError::ServerUnavailable(format!("malformed token response: {err}")))?;

        if body.access_token.is_empty() {
            return Err(AuthError::ServerUnavailable(
                "token response carried an empty access_token".into(),
            ));
        }

        let session = Session {
            token: body.access_token,
            role: body.role,
            display_name: body.name,
        };

        if let Err(err) = self
            .store
            .save(&StoredCredentials {
                token: session.token.clone(),
                role: session.role.as_str().to_string(),
                display_name: session.display_name.clone(),
            })
            .await
        {
            warn!("session: failed to persist credentials: {err:#}");
        }

        *self.current.write().await = Some(session.clone());
        info!(role = ?session.role, "session: login succeeded");
        let _ = self.events.send(SessionEvent::LoggedIn(session.clone()));
        Ok(session)
    }

    /// Creates a new customer account. On success the caller must still
    /// log in separately; no session is created here.
    pub async fn register(&self, profile: &RegisterRequest) -> Result<(), RegisterError> {
        let response = self
            .http
            .post(endpoint_url(&self.base_url, "register"))
            .json(profile)
            .send()
            .await
            .map_err(|err| RegisterError::ServerUnavailable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!("session: registration accepted");
            return Ok(());
        }

        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            let detail = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => status.to_string(),
            };
            return Err(RegisterError::Validation(detail));
        }

        Err(RegisterError::ServerUnavailable(format!(
            "register endpoint returned {status}"
        )))
    }

    /// Clears persisted credentials and the in-memory session. Never fails:
    /// store errors are logged and swallowed.
    pub async fn logout(&self) {
        info!("session: logout");
        self.teardown(SessionEvent::LoggedOut).await;
    }

    async fn teardown(&self, event: SessionEvent) {
        if let Err(err) = self.store.clear().await {
            warn!("session: failed to clear persisted credentials: {err:#}");
        }
        *self.current.write().await = None;
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl SessionGuard for SessionManager {
    async fn invalidate(&self) {
        info!("session: authorization expired; clearing session");
        self.teardown(SessionEvent::Expired).await;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
