//! Kitten handlers
//!
//! Handlers only unwrap the request and hand it to [`KittenService`]; the
//! service decides what "missing" means and [`ApiError`] decides the status.
//!
//! [`KittenService`]: domain_cattery::KittenService

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use core_kernel::{BreedId, KittenId};
use domain_cattery::{KittenCreate, KittenPatch, KittenUpdate, KittenView};

use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::AppState;

/// Query string of the list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct KittenListQuery {
    #[serde(default, alias = "breedId")]
    pub breed_id: Option<i32>,
}

/// GET /kittens
pub async fn list_kittens(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<KittenListQuery>,
) -> Result<Json<Vec<KittenView>>, ApiError> {
    let breed_id = query.breed_id.map(BreedId::new);
    Ok(Json(state.kittens.list_kittens(breed_id).await?))
}

/// GET /kittens/:id
pub async fn get_kitten(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<KittenView>, ApiError> {
    Ok(Json(state.kittens.get_kitten(KittenId::new(id)).await?))
}

/// POST /kittens
pub async fn create_kitten(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<KittenCreate>,
) -> Result<Json<KittenView>, ApiError> {
    let kitten = state.kittens.create_kitten(body).await?;
    info!(kitten_id = %kitten.id, breed_id = %kitten.breed_id, "Kitten created");
    Ok(Json(kitten))
}

/// PUT /kittens/:id
///
/// Every field is required and every field is overwritten.
pub async fn update_kitten(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(body): ValidatedJson<KittenUpdate>,
) -> Result<Json<KittenView>, ApiError> {
    Ok(Json(state.kittens.update_kitten(KittenId::new(id), body).await?))
}

/// PATCH /kittens/:id
///
/// Only the fields present in the body are overwritten.
pub async fn patch_kitten(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(body): ValidatedJson<KittenPatch>,
) -> Result<Json<KittenView>, ApiError> {
    Ok(Json(state.kittens.patch_kitten(KittenId::new(id), body).await?))
}

/// DELETE /kittens/:id
pub async fn delete_kitten(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<bool>, ApiError> {
    let id = KittenId::new(id);
    state.kittens.delete_kitten(id).await?;
    info!(kitten_id = %id, "Kitten deleted");
    Ok(Json(true))
}
