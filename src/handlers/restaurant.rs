use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::catalog::{self, Restaurant};
use crate::error::ApiError;
use crate::locations;

use super::{AppState, LocationView, connect};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/menu/{restaurant_id}", get(menu))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantSummary {
    /// Catalog identifier, used in menu and order paths
    pub id: String,
    /// Display name
    pub name: String,
    /// Image asset reference
    pub image: String,
    /// Short description
    pub description: String,
    /// Average rating
    pub rating: f32,
    /// Delivery estimate, e.g. "15-20 min"
    pub delivery_time: String,
}

/// The ordering form context: restaurant, full menu, and the delivery
/// locations currently offered. `error` is set when a rejected submission
/// is bounced back to this view.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuView {
    pub restaurant_id: String,
    pub restaurant: Restaurant,
    pub locations: Vec<LocationView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Restaurant directory", body = [RestaurantSummary]),
    ),
    tag = "restaurants"
)]
#[instrument]
pub async fn home() -> Json<Vec<RestaurantSummary>> {
    Json(
        catalog::all()
            .iter()
            .map(|restaurant| RestaurantSummary {
                id: restaurant.id.clone(),
                name: restaurant.name.clone(),
                image: restaurant.image.clone(),
                description: restaurant.description.clone(),
                rating: restaurant.rating,
                delivery_time: restaurant.delivery_time.clone(),
            })
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/menu/{restaurant_id}",
    params(
        ("restaurant_id" = String, Path, description = "Restaurant catalog identifier")
    ),
    responses(
        (status = 200, description = "Menu and active delivery locations", body = MenuView),
        (status = 303, description = "Unknown restaurant, redirected to the directory"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn menu(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Response, ApiError> {
    let Some(restaurant) = catalog::find(&restaurant_id) else {
        return Ok(Redirect::to("/").into_response());
    };

    let conn = &mut connect(&state.config)?;
    let locations = locations::list_active(conn).map_err(|_| ApiError::Database)?;

    Ok(Json(MenuView {
        restaurant_id,
        restaurant: restaurant.clone(),
        locations: locations.into_iter().map(LocationView::from).collect(),
        error: None,
    })
    .into_response())
}
