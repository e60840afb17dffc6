use crate::{
    api::DynPortalApi,
    errors::{AuthError, ClientError},
};
use shared::domain::{responses::UserResponse, role::Role};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub type SessionUser = UserResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    /// True until the first session check has answered.
    pub loading: bool,
}

impl AuthState {
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// When set, a login that yields a different role is undone.
    pub role: Option<Role>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: None,
        }
    }

    pub fn expecting(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Read-only view of the provider's state. Always yields the latest value.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    rx: watch::Receiver<AuthState>,
}

impl AuthHandle {
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Waits for the next state change. `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<AuthState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

impl From<watch::Receiver<AuthState>> for AuthHandle {
    fn from(rx: watch::Receiver<AuthState>) -> Self {
        Self { rx }
    }
}

/// Sole owner of "who is logged in".
pub struct AuthProvider {
    api: DynPortalApi,
    tx: watch::Sender<AuthState>,
    /// Bumped by every login and logout. A session check only publishes
    /// if no login or logout finished while it was in flight.
    epoch: AtomicU64,
}

impl AuthProvider {
    pub fn new(api: DynPortalApi) -> Self {
        let (tx, _) = watch::channel(AuthState::loading());
        Self {
            api,
            tx,
            epoch: AtomicU64::new(0),
        }
    }

    fn publish(&self, state: AuthState) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.tx.send_replace(state);
    }

    pub fn state(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> AuthHandle {
        AuthHandle::from(self.tx.subscribe())
    }

    /// Asks the server who is logged in. Any failure reads as logged out.
    /// Superseded by a login or logout that lands first, in which case the
    /// current state is returned untouched.
    pub async fn check_session(&self) -> AuthState {
        let started = self.epoch.load(Ordering::SeqCst);

        let state = match self.api.me().await {
            Ok(Some(user)) if user.active => AuthState::signed_in(user),
            Ok(_) => AuthState::anonymous(),
            Err(e) => {
                warn!("Session check failed, treating as logged out: {e}");
                AuthState::anonymous()
            }
        };

        let published = self.tx.send_if_modified(|current| {
            if self.epoch.load(Ordering::SeqCst) != started {
                return false;
            }
            *current = state.clone();
            true
        });

        if published {
            state
        } else {
            debug!("Discarding session check overtaken by login or logout");
            self.state()
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, ClientError> {
        let user = self
            .api
            .login(&credentials.username, &credentials.password)
            .await?;

        if !user.active {
            self.discard_server_session().await;
            return Err(AuthError::InactiveAccount.into());
        }

        if let Some(expected) = credentials.role
            && user.role != expected
        {
            warn!(
                "{} signed in as {} where {expected} was expected",
                user.username, user.role
            );
            self.discard_server_session().await;
            return Err(AuthError::WrongRole {
                expected,
                actual: user.role,
            }
            .into());
        }

        info!("Signed in as {} ({})", user.username, user.role);
        self.publish(AuthState::signed_in(user.clone()));

        Ok(user)
    }

    /// Local state is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.api.logout().await;
        self.publish(AuthState::anonymous());

        if let Err(e) = &result {
            warn!("Server logout failed, local session cleared anyway: {e}");
        }

        result
    }

    async fn discard_server_session(&self) {
        if let Err(e) = self.api.logout().await {
            warn!("Failed to drop rejected server session: {e}");
        }
        self.publish(AuthState::anonymous());
    }
}
