//! Authentication gate and route-level enforcement.
//!
//! [`authenticate_request`] runs for every request and never rejects: it
//! binds an [`AuthState`] when a valid bearer token resolves to a known
//! principal, and otherwise records an [`AuthFailure`] (or nothing) and
//! passes the request on. [`require_authentication`] is layered on
//! protected routes and turns a missing identity into `401`.

use aide::axum::ApiRouter;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::response::Response;
use tollgate_store::StoreClient;
use tollgate_store::query::PrincipalRepository;

use crate::extract::{AuthFailure, AuthIdentity, AuthState, bearer_token};
use crate::service::{AuthError, ServiceState, TokenService};
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION as TRACING_TARGET;

/// Extension trait for [`ApiRouter`] to apply authentication middleware.
pub trait RouterAuthExt<S> {
    /// Runs the authentication gate for every route of this router.
    ///
    /// Requests are never rejected here; see [`with_required_authentication`].
    ///
    /// [`with_required_authentication`]: RouterAuthExt::with_required_authentication
    fn with_authentication(self, state: ServiceState) -> Self;

    /// Rejects requests to routes of this router that carry no identity.
    ///
    /// Applied as a route layer, so unmatched paths still fall through to
    /// the fallback handler.
    fn with_required_authentication(self) -> Self;
}

impl<S> RouterAuthExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_authentication(self, state: ServiceState) -> Self {
        self.layer(from_fn_with_state(state, authenticate_request))
    }

    fn with_required_authentication(self) -> Self {
        self.route_layer(from_fn(require_authentication))
    }
}

/// Resolves the bearer token of a request into an identity.
///
/// Binds [`AuthState`] on success. When a token was presented but did not
/// resolve, binds [`AuthFailure`] instead. Always calls the next service.
pub async fn authenticate_request(
    State(token_service): State<TokenService>,
    State(store): State<StoreClient>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return next.run(request).await;
    };

    match resolve_identity(&token_service, &store, &token).await {
        Ok(Some(identity)) => {
            tracing::debug!(
                target: TRACING_TARGET,
                principal_id = %identity.principal_id,
                username = %identity.username,
                "Request authenticated"
            );
            request.extensions_mut().insert(AuthState(identity));
        }
        Ok(None) => {}
        Err(auth_error) => {
            tracing::debug!(
                target: TRACING_TARGET,
                reason = auth_error.as_str(),
                path = %request.uri().path(),
                "Bearer token did not resolve to an identity"
            );
            request.extensions_mut().insert(AuthFailure(auth_error));
        }
    }

    next.run(request).await
}

/// Validates a token and looks up its subject.
///
/// Returns `Ok(None)` when the store fails, which leaves the request
/// unauthenticated without blaming the token.
async fn resolve_identity(
    token_service: &TokenService,
    store: &StoreClient,
    token: &str,
) -> Result<Option<AuthIdentity>, AuthError> {
    let username = token_service.validate(token)?;

    match store.find_principal_by_username(&username).await {
        Ok(Some(principal)) => Ok(Some(AuthIdentity::from_principal(&principal))),
        Ok(None) => Err(AuthError::PrincipalNotFound),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %error,
                username = %username,
                "Principal lookup failed during authentication"
            );
            Ok(None)
        }
    }
}

/// Requires an identity bound by the authentication gate.
///
/// Rejection is delegated to the [`AuthState`] extractor, which picks the
/// error from the recorded [`AuthFailure`].
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
