use tollgate_store::StoreClient;

use crate::service::{PasswordHasher, Result, ServiceConfig, TokenService};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub store: StoreClient,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub token_service: TokenService,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Loads the session secret once; it stays fixed for the lifetime of
    /// the returned state and all its clones.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let session_keys = config.load_session_keys().await?;

        Ok(Self::new(StoreClient::new(), TokenService::new(session_keys)))
    }

    /// Assembles application state from already constructed services.
    pub fn new(store: StoreClient, token_service: TokenService) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_service,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(store: StoreClient);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(token_service: TokenService);
