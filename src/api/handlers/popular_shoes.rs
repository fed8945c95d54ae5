//! Featured storefront photo handlers

use crate::api::handlers::AppState;
use crate::auth::models::MessageResponse;
use crate::core::error::{KicksError, Result};
use crate::db::models::PopularShoe;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// Handler for GET /api/popular-shoes - List featured shoes
pub async fn list_popular_shoes(State(state): State<AppState>) -> Result<Json<Vec<PopularShoe>>> {
    let shoes = state.popular_shoe_repo.find_all().await?;
    Ok(Json(shoes))
}

/// Handler for POST /api/popular-shoes - Add a featured shoe photo
pub async fn create_popular_shoe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut photo_url = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| KicksError::ValidationError(e.to_string()))?
    {
        if field.name() == Some("photo") {
            let original_name = field.file_name().unwrap_or("photo").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| KicksError::ValidationError(e.to_string()))?;
            photo_url = Some(state.uploads.save(&original_name, &data).await?);
            break;
        }
    }

    let photo_url = photo_url
        .ok_or_else(|| KicksError::ValidationError("No photo uploaded".to_string()))?;

    let shoe = PopularShoe {
        id: Uuid::new_v4().to_string(),
        photo_url,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.popular_shoe_repo.create(&shoe).await?;

    tracing::info!(shoe_id = %shoe.id, "Popular shoe added");

    Ok((StatusCode::CREATED, Json(shoe)))
}

/// Handler for DELETE /api/popular-shoes/:id - Remove a featured shoe
pub async fn delete_popular_shoe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let shoe = state
        .popular_shoe_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| KicksError::NotFound(format!("Popular shoe {} not found", id)))?;

    state.popular_shoe_repo.delete(&id).await?;
    state.uploads.remove(&shoe.photo_url).await?;

    tracing::info!(shoe_id = %id, "Popular shoe deleted");

    Ok(Json(MessageResponse {
        message: "Popular shoe deleted successfully".to_string(),
    }))
}
