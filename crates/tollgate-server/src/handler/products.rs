//! Product catalog handlers.
//!
//! Every route here requires an authenticated principal.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use tollgate_store::StoreClient;
use tollgate_store::query::ProductRepository;
use uuid::Uuid;

use super::request::CreateProduct;
use super::response::{ErrorResponse, Product, Products};
use crate::extract::{AuthState, Json, ValidateJson};
use crate::handler::Result;
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_HANDLER_PRODUCTS as TRACING_TARGET;

/// Lists all products in creation order.
#[tracing::instrument(skip_all, fields(principal_id = %auth_state.principal_id))]
async fn list_products(
    State(store): State<StoreClient>,
    auth_state: AuthState,
) -> Result<(StatusCode, Json<Products>)> {
    let products: Products = store
        .list_products()
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        product_count = products.len(),
        "Listed products"
    );

    Ok((StatusCode::OK, Json(products)))
}

fn list_products_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List products")
        .description("Returns every product in the catalog, oldest first.")
        .response::<200, Json<Products>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Creates a new product and returns its identifier.
#[tracing::instrument(skip_all, fields(principal_id = %auth_state.principal_id))]
async fn create_product(
    State(store): State<StoreClient>,
    auth_state: AuthState,
    ValidateJson(request): ValidateJson<CreateProduct>,
) -> Result<(StatusCode, Json<Uuid>)> {
    let product = store.create_product(request.into_model()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        product_id = %product.id,
        created_by = %auth_state.username,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(product.id)))
}

fn create_product_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create product")
        .description(
            "Adds a product to the catalog. The price, sent as a string or number, is a \
             non-negative decimal with at most eight integer and two fractional digits.",
        )
        .response::<201, Json<Uuid>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<ErrorResponse>>()
}

/// Returns a [`ApiRouter`] with all related routes.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/products",
            get_with(list_products, list_products_docs)
                .post_with(create_product, create_product_docs),
        )
        .with_path_items(|item| item.tag("Products"))
}

#[cfg(test)]
mod test {
    use axum::http::header::AUTHORIZATION;
    use axum::http::{HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::handler::products::routes;
    use crate::handler::response::Products;
    use crate::handler::test::{
        create_test_principal, create_test_server_with_state, create_test_state,
    };
    use crate::middleware::RouterAuthExt;
    use crate::service::ServiceState;

    async fn create_server() -> anyhow::Result<(TestServer, ServiceState)> {
        let state = create_test_state()?;
        let router = routes()
            .with_required_authentication()
            .with_authentication(state.clone());
        let server = create_test_server_with_state(router, state.clone()).await?;
        Ok((server, state))
    }

    fn bearer(token: &str) -> anyhow::Result<HeaderValue> {
        Ok(HeaderValue::from_str(&format!("Bearer {token}"))?)
    }

    #[tokio::test]
    async fn create_then_list_products() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;
        let token = create_test_principal(&state, "alice").await?;

        let mut ids = Vec::new();
        for (name, price) in [("Widget", "19.99"), ("Gadget", "5"), ("Gizmo", "0.5")] {
            let response = server
                .post("/products")
                .add_header(AUTHORIZATION, bearer(&token)?)
                .json(&json!({ "name": name, "price": price }))
                .await;
            response.assert_status(StatusCode::CREATED);
            ids.push(response.json::<Uuid>());
        }

        let response = server
            .get("/products")
            .add_header(AUTHORIZATION, bearer(&token)?)
            .await;
        response.assert_status_ok();

        let products: Products = response.json();
        let listed: Vec<Uuid> = products.iter().map(|product| product.id).collect();
        assert_eq!(listed, ids);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].price.to_string(), "19.99");

        Ok(())
    }

    #[tokio::test]
    async fn numeric_prices_are_accepted() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;
        let token = create_test_principal(&state, "alice").await?;

        let response = server
            .post("/products")
            .add_header(AUTHORIZATION, bearer(&token)?)
            .json(&json!({ "name": "Widget", "price": 19.99 }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let products: Products = server
            .get("/products")
            .add_header(AUTHORIZATION, bearer(&token)?)
            .await
            .json();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price.to_string(), "19.99");

        Ok(())
    }

    #[tokio::test]
    async fn empty_catalog_lists_nothing() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;
        let token = create_test_principal(&state, "alice").await?;

        let response = server
            .get("/products")
            .add_header(AUTHORIZATION, bearer(&token)?)
            .await;
        response.assert_status_ok();
        assert!(response.json::<Products>().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_products_are_rejected() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;
        let token = create_test_principal(&state, "alice").await?;

        let invalid = [
            json!({ "name": "", "price": "1.00" }),
            json!({ "name": "Widget", "price": "-1.00" }),
            json!({ "name": "Widget", "price": "1.001" }),
            json!({ "name": "Widget", "price": "123456789" }),
            json!({ "name": "Widget", "price": "1e9" }),
            json!({ "name": "Widget", "price": "1e10000000" }),
            json!({ "name": "Widget", "price": 1.001 }),
            json!({ "name": "Widget", "price": -5 }),
            json!({ "name": "Widget", "price": "cheap" }),
            json!({ "name": "Widget" }),
        ];

        for body in invalid {
            let response = server
                .post("/products")
                .add_header(AUTHORIZATION, bearer(&token)?)
                .json(&body)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }

        assert_eq!(state.store.product_count().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn products_require_authentication() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;

        let response = server.get("/products").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["name"], "missing_auth_token");

        let response = server
            .post("/products")
            .json(&json!({ "name": "Widget", "price": "1.00" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        assert_eq!(state.store.product_count().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn token_for_unknown_principal_is_rejected() -> anyhow::Result<()> {
        let (server, state) = create_server().await?;
        let token = state.token_service.issue("ghost")?;

        let response = server
            .get("/products")
            .add_header(AUTHORIZATION, bearer(&token)?)
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["name"], "unauthorized");

        Ok(())
    }
}
