//! REST surface over a [`PromptStore`].
//!
//! ```text
//! GET    /health
//! GET    /categories
//! GET    /prompts              ?search=&category=&tags=a,b&favorites=true
//! POST   /prompts
//! GET    /prompts/highlights
//! GET    /prompts/stats
//! GET    /prompts/{id}
//! PUT    /prompts/{id}
//! PATCH  /prompts/{id}
//! DELETE /prompts/{id}
//! POST   /prompts/{id}/use
//! ```

pub mod error;
pub mod handlers;

use crate::config::Config;
use crate::core::traits::PromptStore;
use crate::utils::error::{AppError, AppResult};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ErrorBody;

/// Store handle shared by every request
pub type SharedStore = Arc<dyn PromptStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

/// Build the router without CORS
pub fn router(store: SharedStore) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/categories", get(handlers::categories))
        .route(
            "/prompts",
            get(handlers::list_prompts).post(handlers::create_prompt),
        )
        .route("/prompts/highlights", get(handlers::highlights))
        .route("/prompts/stats", get(handlers::stats))
        .route(
            "/prompts/{id}",
            get(handlers::get_prompt)
                .put(handlers::replace_prompt)
                .patch(handlers::patch_prompt)
                .delete(handlers::delete_prompt),
        )
        .route("/prompts/{id}/use", post(handlers::mark_prompt_used))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router with the layers selected by the server configuration
pub fn app(store: SharedStore, config: &Config) -> Router {
    let app = router(store);
    if config.server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(cors)
    } else {
        app
    }
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config, store: SharedStore) -> AppResult<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Io(format!("Failed to bind {}: {}", addr, e)))?;

    let cors_status = if config.server.enable_cors {
        "enabled"
    } else {
        "disabled"
    };
    info!("Ready - listening on {} (CORS {})", addr, cors_status);

    serve_with_listener(listener, app(store, config), shutdown_signal()).await
}

pub async fn serve_with_listener<F>(listener: TcpListener, app: Router, shutdown: F) -> AppResult<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::Io(format!("HTTP server error: {}", e)))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Category, Prompt};
    use crate::core::state::Highlights;
    use crate::core::store::MemoryStore;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(Arc::new(MemoryStore::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, body: Value) -> Prompt {
        let response = send(app, Method::POST, "/prompts", Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_create_returns_defaults() {
        let app = test_app();
        let prompt = create(&app, json!({"title": " Draft ", "content": "Write it"})).await;

        assert_eq!(prompt.title, "Draft");
        assert_eq!(prompt.category, Category::Other);
        assert_eq!(prompt.use_count, 0);
        assert_eq!(prompt.last_used, prompt.created_at);
    }

    #[tokio::test]
    async fn test_create_wire_shape() {
        let app = test_app();
        let response = send(
            &app,
            Method::POST,
            "/prompts",
            Some(json!({"title": "t", "content": "c", "category": "Coding", "tags": ["a"], "isFavorite": true})),
        )
        .await;
        let value: Value = json_body(response).await;

        assert!(value["id"].is_string());
        assert_eq!(value["category"], "Coding");
        assert_eq!(value["isFavorite"], true);
        assert_eq!(value["useCount"], 0);
        assert!(value.get("_id").is_none());
        assert!(value.get("__v").is_none());
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let app = test_app();

        let response = send(&app, Method::POST, "/prompts", Some(json!({"content": "c"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = json_body(response).await;
        assert!(body.error.contains("title"));

        let response = send(
            &app,
            Method::POST,
            "/prompts",
            Some(json!({"title": "t", "content": "c", "tags": "not-a-list"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::POST, "/prompts", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_replace_versus_patch() {
        let app = test_app();
        let prompt = create(
            &app,
            json!({"title": "t", "content": "c", "category": "Coding", "tags": ["x"]}),
        )
        .await;
        let uri = format!("/prompts/{}", prompt.id);

        let response = send(&app, Method::PATCH, &uri, Some(json!({"isFavorite": true}))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let patched: Prompt = json_body(response).await;
        assert!(patched.is_favorite);
        assert_eq!(patched.tags, vec!["x"]);
        assert_eq!(patched.category, Category::Coding);

        let response = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"title": "new", "content": "body"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let replaced: Prompt = json_body(response).await;
        assert!(replaced.tags.is_empty());
        assert_eq!(replaced.category, Category::Other);
        assert!(!replaced.is_favorite);

        let response = send(&app, Method::PUT, &uri, Some(json!({"title": "only"}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, Method::PATCH, &uri, Some(json!({"content": ""}))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_object_bodies_are_rejected() {
        let app = test_app();
        let prompt = create(&app, json!({"title": "t", "content": "c"})).await;
        let uri = format!("/prompts/{}", prompt.id);

        for (method, uri) in [
            (Method::POST, "/prompts"),
            (Method::PUT, uri.as_str()),
            (Method::PATCH, uri.as_str()),
        ] {
            let response = send(&app, method.clone(), uri, Some(json!(["t", "c"]))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, uri);
            let body: ErrorBody = json_body(response).await;
            assert!(body.error.contains("JSON object"));
        }

        let response = send(&app, Method::PATCH, &uri, Some(json!("isFavorite"))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let all: Vec<Prompt> = json_body(send(&app, Method::GET, "/prompts", None).await).await;
        assert_eq!(all, vec![prompt]);
    }

    #[tokio::test]
    async fn test_use_endpoint_increments() {
        let app = test_app();
        let prompt = create(&app, json!({"title": "t", "content": "c"})).await;
        let uri = format!("/prompts/{}/use", prompt.id);

        send(&app, Method::POST, &uri, None).await;
        let response = send(&app, Method::POST, &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let used: Prompt = json_body(response).await;
        assert_eq!(used.use_count, 2);
        assert!(used.last_used >= prompt.last_used);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let app = test_app();
        let prompt = create(&app, json!({"title": "t", "content": "c"})).await;
        let uri = format!("/prompts/{}", prompt.id);

        let response = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        for method in [Method::DELETE, Method::GET, Method::PATCH] {
            let body = (method == Method::PATCH).then(|| json!({"isFavorite": true}));
            let response = send(&app, method, &uri, body).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        let response = send(&app, Method::POST, "/prompts/nope/use", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_order_and_query_filters() {
        let app = test_app();
        let a = create(
            &app,
            json!({"title": "A", "content": "first", "category": "Coding", "tags": ["x", "y"]}),
        )
        .await;
        let b = create(
            &app,
            json!({"title": "B", "content": "second", "category": "Writing", "tags": ["x"]}),
        )
        .await;

        let all: Vec<Prompt> = json_body(send(&app, Method::GET, "/prompts", None).await).await;
        assert_eq!(
            all.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec![b.id.as_str(), a.id.as_str()]
        );

        let both_tags: Vec<Prompt> =
            json_body(send(&app, Method::GET, "/prompts?tags=x,y", None).await).await;
        assert_eq!(both_tags.len(), 1);
        assert_eq!(both_tags[0].id, a.id);

        let coding: Vec<Prompt> =
            json_body(send(&app, Method::GET, "/prompts?category=Coding", None).await).await;
        assert_eq!(coding.len(), 1);

        let search: Vec<Prompt> =
            json_body(send(&app, Method::GET, "/prompts?search=X", None).await).await;
        assert_eq!(search.len(), 2);

        let response = send(&app, Method::GET, "/prompts?favorites=maybe", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_highlights_and_stats() {
        let app = test_app();
        let fav = create(&app, json!({"title": "fav", "content": "c", "isFavorite": true})).await;
        let used = create(&app, json!({"title": "used", "content": "c"})).await;
        send(&app, Method::POST, &format!("/prompts/{}/use", used.id), None).await;

        let highlights: Highlights =
            json_body(send(&app, Method::GET, "/prompts/highlights", None).await).await;
        assert_eq!(highlights.favorites.len(), 1);
        assert_eq!(highlights.favorites[0].id, fav.id);
        assert_eq!(highlights.frequent[0].id, used.id);

        let stats: Value = json_body(send(&app, Method::GET, "/prompts/stats", None).await).await;
        assert_eq!(stats["totalPrompts"], 2);
        assert_eq!(stats["totalUses"], 1);
    }

    #[tokio::test]
    async fn test_health_and_categories() {
        let app = test_app();
        let health: Value = json_body(send(&app, Method::GET, "/health", None).await).await;
        assert_eq!(health["status"], "ok");

        let categories: Vec<String> =
            json_body(send(&app, Method::GET, "/categories", None).await).await;
        assert_eq!(categories.len(), 8);
        assert_eq!(categories.last().map(String::as_str), Some("Other"));
    }
}
