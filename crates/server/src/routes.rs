pub mod products;

use axum::{routing::get, Json, Router};
use service::product::ProductService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{types::Health, GREETING};

use crate::openapi::ApiDoc;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

#[utoipa::path(get, path = "/", tag = "root", responses((status = 200, description = "Greeting", body = String)))]
pub async fn greet() -> Json<&'static str> {
    Json(GREETING)
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: greeting, health, product CRUD and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let products = Router::new()
        .route("/products", get(products::list).post(products::create))
        .route("/products/", get(products::list).post(products::create))
        .route(
            "/products/:id",
            get(products::get)
                .put(products::replace)
                .patch(products::patch)
                .delete(products::delete),
        );

    Router::new()
        .route("/", get(greet))
        .route("/health", get(health))
        .merge(products)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
