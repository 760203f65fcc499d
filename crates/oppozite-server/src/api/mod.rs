mod seo;

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use oppozite_core::AppConfig;
use oppozite_storefront::StorefrontClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::document::DocumentFetcher;
use crate::middleware::{request_id, RequestId};

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storefront: Arc<StorefrontClient>,
    pub documents: Arc<DocumentFetcher>,
}

impl AppState {
    /// Builds the outbound clients from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let storefront = StorefrontClient::from_config(&config)?;
        let documents = DocumentFetcher::new(config.fetch_timeout_secs, &config.user_agent)?;
        Ok(Self {
            config,
            storefront: Arc::new(storefront),
            documents: Arc::new(documents),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/seo", get(seo::social_preview));

    if let Some(dir) = state.config.static_dir.as_ref() {
        tracing::info!(dir = %dir.display(), "serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
