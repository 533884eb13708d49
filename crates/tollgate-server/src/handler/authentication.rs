//! Registration and login handlers.
//!
//! Both routes are public. Login answers unknown usernames and wrong
//! passwords identically; only the logs tell them apart.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use tollgate_store::StoreClient;
use tollgate_store::query::PrincipalRepository;

use super::request::{Login, Register};
use super::response::{ErrorResponse, LoginResponse};
use crate::extract::{Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::{AuthError, PasswordHasher, ServiceState, TokenService};
use crate::utility::tracing_targets::TRACING_TARGET_HANDLER_AUTH as TRACING_TARGET;

/// Exchanges a username and password for a session token.
#[tracing::instrument(skip_all)]
async fn login(
    State(store): State<StoreClient>,
    State(password_hasher): State<PasswordHasher>,
    State(token_service): State<TokenService>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "Login attempt"
    );

    let principal = store.find_principal_by_username(&request.username).await?;

    let Some(principal) = principal else {
        // Keeps the response time close to a wrong-password attempt.
        password_hasher.verify_dummy_password(&request.password);

        tracing::debug!(
            target: TRACING_TARGET,
            username = %request.username,
            "Login failed: unknown username"
        );
        return Err(AuthError::AuthenticationFailed.into());
    };

    if let Err(error) = password_hasher.verify_password(&request.password, &principal.password_hash)
    {
        if error.kind() == ErrorKind::Unauthorized {
            tracing::debug!(
                target: TRACING_TARGET,
                username = %request.username,
                principal_id = %principal.id,
                "Login failed: wrong password"
            );
        }
        return Err(error);
    }

    let token = token_service.issue(&principal.username)?;

    tracing::info!(
        target: TRACING_TARGET,
        principal_id = %principal.id,
        "Login successful"
    );

    Ok((StatusCode::OK, Json(LoginResponse::new(token))))
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Log in")
        .description(
            "Verifies the credentials and returns a session token valid for one hour. \
             Send it as `Authorization: Bearer <token>` on protected routes.",
        )
        .response::<200, Json<LoginResponse>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Registers a new principal.
#[tracing::instrument(skip_all)]
async fn register(
    State(store): State<StoreClient>,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<Register>,
) -> Result<StatusCode> {
    tracing::trace!(
        target: TRACING_TARGET,
        username = %request.username,
        "Registration attempt"
    );

    if store.username_exists(&request.username).await? {
        tracing::debug!(
            target: TRACING_TARGET,
            username = %request.username,
            "Registration failed: username already taken"
        );
        return Err(AuthError::UsernameTaken.into());
    }

    let password_hash = password_hasher.hash_password(&request.password)?;

    // A concurrent registration may still win the race; the store rejects
    // the loser with a unique violation that maps to the same error.
    let principal = store
        .create_principal(request.into_model(password_hash))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        principal_id = %principal.id,
        username = %principal.username,
        "Principal registered"
    );

    Ok(StatusCode::CREATED)
}

fn register_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Register")
        .description("Creates a new principal. Usernames are unique and case-sensitive.")
        .response::<201, ()>()
        .response::<400, Json<ErrorResponse>>()
}

/// Returns a [`ApiRouter`] with all related routes.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/auth/login", post_with(login, login_docs))
        .api_route("/auth/register", post_with(register, register_docs))
        .with_path_items(|item| item.tag("Authentication"))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use futures::future::join_all;
    use serde_json::{Value, json};

    use crate::handler::authentication::routes;
    use crate::handler::response::LoginResponse;
    use crate::handler::test::{
        create_test_server_with_router, create_test_server_with_state, create_test_state,
    };

    #[tokio::test]
    async fn register_then_login() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_state| routes()).await?;
        let credentials = json!({ "username": "alice", "password": "pw" });

        let response = server.post("/auth/register").json(&credentials).await;
        response.assert_status(StatusCode::CREATED);
        assert!(response.text().is_empty());

        let response = server.post("/auth/login").json(&credentials).await;
        response.assert_status_ok();
        let body: LoginResponse = response.json();
        assert_eq!(body.token.split('.').count(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(routes(), state.clone()).await?;
        let credentials = json!({ "username": "alice", "password": "pw" });

        let response = server.post("/auth/register").json(&credentials).await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .post("/auth/register")
            .json(&json!({ "username": "alice", "password": "other" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["name"], "bad_request");
        assert_eq!(body["resource"], "principal");

        assert_eq!(state.store.principal_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_registrations_create_one_principal() -> anyhow::Result<()> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(routes(), state.clone()).await?;

        let attempts = (0..8).map(|i| {
            server
                .post("/auth/register")
                .json(&json!({ "username": "alice", "password": format!("pw-{i}") }))
                .into_future()
        });
        let statuses: Vec<StatusCode> = join_all(attempts)
            .await
            .iter()
            .map(|response| response.status_code())
            .collect();

        let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
        assert_eq!(created, 1);
        assert!(
            statuses
                .iter()
                .all(|s| *s == StatusCode::CREATED || *s == StatusCode::BAD_REQUEST)
        );
        assert_eq!(state.store.principal_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_state| routes()).await?;

        server
            .post("/auth/register")
            .json(&json!({ "username": "alice", "password": "pw" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/auth/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["name"], "unauthorized");
        assert!(body.get("token").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_matches_wrong_password() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_state| routes()).await?;

        server
            .post("/auth/register")
            .json(&json!({ "username": "alice", "password": "pw" }))
            .await
            .assert_status(StatusCode::CREATED);

        let wrong_password: Value = server
            .post("/auth/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await
            .json();

        let response = server
            .post("/auth/login")
            .json(&json!({ "username": "mallory", "password": "wrong" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let unknown_user: Value = response.json();

        assert_eq!(wrong_password, unknown_user);
        Ok(())
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_state| routes()).await?;

        for username in ["alice", "Alice"] {
            server
                .post("/auth/register")
                .json(&json!({ "username": username, "password": "pw" }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_bodies_are_bad_requests() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_state| routes()).await?;

        let empty_username = json!({ "username": "", "password": "pw" });
        let long_password = json!({ "username": "alice", "password": "p".repeat(257) });
        let missing_field = json!({ "username": "alice" });

        for body in [empty_username, long_password, missing_field] {
            server
                .post("/auth/register")
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
            server
                .post("/auth/login")
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        Ok(())
    }
}
