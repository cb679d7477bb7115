//! Breed handlers

use axum::{extract::State, Json};

use domain_cattery::BreedView;

use crate::error::ApiError;
use crate::AppState;

/// GET /breeds
pub async fn list_breeds(State(state): State<AppState>) -> Result<Json<Vec<BreedView>>, ApiError> {
    Ok(Json(state.breeds.list_breeds().await?))
}
