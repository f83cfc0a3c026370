//! Item endpoints
//!
//! Each handler performs exactly one store operation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::repos::Item;
use crate::http::error::ApiError;
use crate::http::extractors::{ItemBody, ValidItemId};
use crate::http::state::AppState;
use crate::models::{ItemId, WriteAction};

/// GET /items - list all items, ascending by id
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store().list().await?;
    Ok(Json(items))
}

/// GET /items/{id} - get a single item
async fn get_item(
    State(state): State<AppState>,
    ValidItemId(id): ValidItemId,
) -> Result<Json<Item>, ApiError> {
    let item = state.store().get(id).await?;
    Ok(Json(item))
}

/// POST /items - create a new item
async fn create_item(
    State(state): State<AppState>,
    ItemBody(payload): ItemBody,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let fields = payload.validate(WriteAction::Create)?;
    let item = state.store().create(fields).await?;

    tracing::info!(id = item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /items/{id} - replace name and description
///
/// The body is checked before the id so a missing field is always a 400.
async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ItemBody(payload): ItemBody,
) -> Result<Json<Item>, ApiError> {
    let fields = payload.validate(WriteAction::Update)?;
    let id = ItemId::parse(&raw_id)?;

    let item = state.store().update(id, fields).await?;
    tracing::info!(id = item.id, "item updated");
    Ok(Json(item))
}

/// DELETE /items/{id} - delete an item
async fn delete_item(
    State(state): State<AppState>,
    ValidItemId(id): ValidItemId,
) -> Result<StatusCode, ApiError> {
    state.store().delete(id).await?;

    tracing::info!(%id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::{DbError, ItemStore, MemoryItemStore};
    use crate::http::server::build_router;
    use crate::http::state::AppState;
    use crate::models::{ItemFields, ItemId};

    use super::*;

    fn app() -> Router {
        build_router(AppState::new(Arc::new(MemoryItemStore::new())), false)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_returns_201_with_id() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/items",
            Some(json!({"name": "Widget", "description": "A small widget"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "name": "Widget", "description": "A small widget"})
        );
    }

    #[tokio::test]
    async fn create_requires_both_fields() {
        let app = app();
        for body in [
            json!({"name": "Widget"}),
            json!({"description": "no name"}),
            json!({"name": "", "description": "empty name"}),
            json!({"name": "Widget", "description": null}),
        ] {
            let response = send(&app, Method::POST, "/api/items", Some(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await,
                json!({"error": "Name and description are required"})
            );
        }

        let list = send(&app, Method::GET, "/api/items", None).await;
        assert_eq!(body_json(list).await, json!([]));
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let app = app();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/items")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Invalid JSON body"})
        );

        let wrong_type = send(
            &app,
            Method::POST,
            "/api/items",
            Some(json!({"name": 5, "description": "x"})),
        )
        .await;
        assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);

        let no_content_type = Request::builder()
            .method(Method::POST)
            .uri("/api/items")
            .body(Body::from(r#"{"name":"a","description":"b"}"#))
            .unwrap();
        let response = app.clone().oneshot(no_content_type).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_unknown_is_404() {
        let response = send(&app(), Method::GET, "/api/items/42", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"message": "Item not found"})
        );
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = app();
        for (method, body) in [
            (Method::GET, None),
            (Method::DELETE, None),
            (Method::PUT, Some(json!({"name": "a", "description": "b"}))),
        ] {
            let response = send(&app, method, "/api/items/abc", body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await,
                json!({"error": "Invalid item id"})
            );
        }
    }

    #[tokio::test]
    async fn update_missing_field_is_400_regardless_of_id() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/items",
            Some(json!({"name": "Widget", "description": "A small widget"})),
        )
        .await;

        for uri in ["/api/items/1", "/api/items/999", "/api/items/abc"] {
            let response = send(&app, Method::PUT, uri, Some(json!({"name": "Renamed"}))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                body_json(response).await,
                json!({"error": "Name and description are required for update"})
            );
        }

        let unchanged = send(&app, Method::GET, "/api/items/1", None).await;
        assert_eq!(body_json(unchanged).await["name"], "Widget");
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/items",
            Some(json!({"name": "Widget", "description": "A small widget"})),
        )
        .await;

        let response = send(
            &app,
            Method::PUT,
            "/api/items/1",
            Some(json!({"name": "Gadget", "description": "A bigger gadget"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "name": "Gadget", "description": "A bigger gadget"})
        );

        let missing = send(
            &app,
            Method::PUT,
            "/api/items/2",
            Some(json!({"name": "Gadget", "description": "A bigger gadget"})),
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let app = app();
        send(
            &app,
            Method::POST,
            "/api/items",
            Some(json!({"name": "Widget", "description": "A small widget"})),
        )
        .await;

        let first = send(&app, Method::DELETE, "/api/items/1", None).await;
        assert_eq!(first.status(), StatusCode::NO_CONTENT);
        let bytes = to_bytes(first.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());

        let second = send(&app, Method::DELETE, "/api/items/1", None).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(second).await,
            json!({"message": "Item not found"})
        );
    }

    /// Store whose every call fails like a lost connection
    struct BrokenStore;

    #[async_trait]
    impl ItemStore for BrokenStore {
        async fn list(&self) -> Result<Vec<Item>, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn get(&self, _id: ItemId) -> Result<Item, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _fields: ItemFields) -> Result<Item, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn update(&self, _id: ItemId, _fields: ItemFields) -> Result<Item, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn delete(&self, _id: ItemId) -> Result<(), DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn store_failures_are_generic_500s() {
        let app = build_router(AppState::new(Arc::new(BrokenStore)), false);
        let item = json!({"name": "a", "description": "b"});

        for (method, uri, body) in [
            (Method::GET, "/api/items", None),
            (Method::GET, "/api/items/1", None),
            (Method::POST, "/api/items", Some(item.clone())),
            (Method::PUT, "/api/items/1", Some(item)),
            (Method::DELETE, "/api/items/1", None),
        ] {
            let response = send(&app, method, uri, body).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                json!({
                    "error": "Internal Server Error",
                    "details": "an internal error occurred"
                })
            );
        }
    }

    #[tokio::test]
    async fn validation_precedes_store_access() {
        // A broken store proves invalid input never reaches it.
        let app = build_router(AppState::new(Arc::new(BrokenStore)), false);

        let response = send(&app, Method::POST, "/api/items", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::GET, "/api/items/-1", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
