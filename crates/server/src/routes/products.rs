use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use service::product::{Product, ProductPatch};

use common::types::{Detail, Message};

use crate::{errors::JsonApiError, routes::AppState};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_UPDATED: &str = "Product updated";
pub const PRODUCT_DELETED: &str = "product deleted";
pub const NO_PRODUCT_WITH_ID: &str = "no product with this id";

/// `{"message": ..., "product": ...}` returned by update and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMessage {
    pub message: String,
    pub product: Product,
}

impl ProductMessage {
    fn new(message: &str, product: Product) -> Self {
        Self { message: message.to_string(), product }
    }
}

fn not_found<T: Serialize>(body: T) -> Response {
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[utoipa::path(
    get, path = "/products/", tag = "products",
    responses((status = 200, description = "All products ordered by id", body = [crate::openapi::ProductDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    Ok(Json(state.products.list_all().await?))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response, JsonApiError> {
    match state.products.get(id).await? {
        Some(p) => Ok(Json(p).into_response()),
        None => Ok(not_found(Detail::new(PRODUCT_NOT_FOUND))),
    }
}

#[utoipa::path(
    post, path = "/products/", tag = "products",
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ProductDoc),
        (status = 409, description = "Id already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<Product>,
) -> Result<Json<Product>, JsonApiError> {
    Ok(Json(state.products.create(input).await?))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductDoc,
    responses(
        (status = 200, description = "Product updated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<Product>,
) -> Result<Response, JsonApiError> {
    Ok(updated_response(state.products.replace(id, input).await?))
}

#[utoipa::path(
    patch, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::ProductPatchDoc,
    responses(
        (status = 200, description = "Product updated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductPatch>,
) -> Result<Response, JsonApiError> {
    Ok(updated_response(state.products.patch(id, input).await?))
}

fn updated_response(updated: Option<Product>) -> Response {
    match updated {
        Some(p) => Json(ProductMessage::new(PRODUCT_UPDATED, p)).into_response(),
        None => not_found(Message::new(PRODUCT_NOT_FOUND)),
    }
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "No product with this id")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response, JsonApiError> {
    match state.products.delete(id).await? {
        Some(p) => Ok(Json(ProductMessage::new(PRODUCT_DELETED, p)).into_response()),
        None => Ok(not_found(Message::new(NO_PRODUCT_WITH_ID))),
    }
}
