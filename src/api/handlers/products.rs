//! Product catalog handlers
//!
//! Create and update accept multipart form data: scalar fields plus repeated
//! `photos` file parts. Uploaded files are written to the upload store first;
//! only their stored filenames reach the database.

use crate::api::handlers::AppState;
use crate::auth::models::MessageResponse;
use crate::core::error::{KicksError, Result};
use crate::db::models::Product;
use crate::db::repository::{ProductUpdate, Repository};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

/// Scalar product fields plus stored photo filenames parsed from a multipart body
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    category: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    photos: Vec<String>,
}

async fn parse_product_form(state: &AppState, mut multipart: Multipart) -> Result<ProductForm> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| KicksError::ValidationError(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                form.name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| KicksError::ValidationError(e.to_string()))?,
                )
            }
            "category" => {
                form.category = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| KicksError::ValidationError(e.to_string()))?,
                )
            }
            "description" => {
                form.description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| KicksError::ValidationError(e.to_string()))?,
                )
            }
            "price" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| KicksError::ValidationError(e.to_string()))?;
                let price = raw.trim().parse::<f64>().map_err(|_| {
                    KicksError::ValidationError(format!("Invalid price: '{}'", raw))
                })?;
                form.price = Some(price);
            }
            "photos" => {
                let original_name = field
                    .file_name()
                    .unwrap_or("photo")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| KicksError::ValidationError(e.to_string()))?;
                let stored = state.uploads.save(&original_name, &data).await?;
                form.photos.push(stored);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Handler for POST /api/products - Create a product with photo uploads
pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = parse_product_form(&state, multipart).await?;

    let name = form
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| KicksError::ValidationError("name is required".to_string()))?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name,
        category: form.category,
        description: form.description,
        price: form.price.unwrap_or(0.0),
        photos: form.photos,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.product_repo.create(&product).await?;

    tracing::info!(product_id = %product.id, photos = product.photos.len(), "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /api/products - List all products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.product_repo.find_all().await?;
    Ok(Json(products))
}

/// Handler for GET /api/products/:id - Fetch one product
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = state
        .product_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| KicksError::NotFound(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// Handler for PUT /api/products/:id - Update scalar fields and append new photos
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Product>> {
    let form = parse_product_form(&state, multipart).await?;

    let fields = ProductUpdate {
        name: form.name,
        category: form.category,
        description: form.description,
        price: form.price,
    };

    let product = state
        .product_repo
        .update_with_photos(&id, fields, form.photos)
        .await?;

    tracing::info!(product_id = %product.id, "Product updated");

    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id - Delete a product and its stored photos
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let product = state
        .product_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| KicksError::NotFound(format!("Product {} not found", id)))?;

    state.product_repo.delete(&id).await?;

    // Keep the upload directory in step with the photo list
    for photo in &product.photos {
        state.uploads.remove(photo).await?;
    }

    tracing::info!(product_id = %id, "Product deleted");

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Response for a single-photo deletion
#[derive(Debug, Serialize)]
pub struct DeletePhotoResponse {
    pub message: String,
    pub product: Product,
}

/// Handler for DELETE /api/products/:id/photo/:photo_name - Remove one photo
pub async fn delete_product_photo(
    State(state): State<AppState>,
    Path((id, photo_name)): Path<(String, String)>,
) -> Result<Json<DeletePhotoResponse>> {
    let product = state.product_repo.remove_photo(&id, &photo_name).await?;

    // A file that is already gone is a warned no-op, not a failure
    state.uploads.remove(&photo_name).await?;

    tracing::info!(product_id = %id, photo = %photo_name, "Product photo deleted");

    Ok(Json(DeletePhotoResponse {
        message: "Photo deleted successfully".to_string(),
        product,
    }))
}
