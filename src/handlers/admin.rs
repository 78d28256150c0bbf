use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Json, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::locations::{self, CreateLocationOutcome};
use crate::orders;

use super::{AppState, LocationView, OrderView, connect};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", post(login).get(dashboard))
        .route("/admin/add_location", post(add_location))
        .route("/admin/location/{location_id}/toggle", post(toggle_location))
        .route("/admin/location/{location_id}/delete", post(delete_location))
        .route("/admin/update_status", post(update_status))
        .route("/admin/delete_order", post(delete_order))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLocationForm {
    pub name: String,
    #[serde(default)]
    pub short_code: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusForm {
    pub order_id: i32,
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteOrderForm {
    pub order_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardView {
    pub orders: Vec<OrderView>,
    pub locations: Vec<LocationView>,
}

fn load_dashboard(state: &AppState) -> Result<Json<DashboardView>, ApiError> {
    let conn = &mut connect(&state.config)?;
    let orders = orders::list_all(conn).map_err(|_| ApiError::Database)?;
    let locations = locations::list_all(conn).map_err(|_| ApiError::Database)?;

    Ok(Json(DashboardView {
        orders: orders.into_iter().map(OrderView::from).collect(),
        locations: locations.into_iter().map(LocationView::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/dashboard",
    request_body(
        content = LoginForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Dashboard with all orders and locations", body = DashboardView),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiErrorResponse),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<DashboardView>, ApiError> {
    if form.username != state.config.admin_username
        || form.password != state.config.admin_password
    {
        warn!("rejected admin login for {:?}", form.username);
        return Err(ApiError::InvalidCredentials);
    }
    load_dashboard(&state)
}

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard with all orders and locations", body = DashboardView),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardView>, ApiError> {
    load_dashboard(&state)
}

#[utoipa::path(
    post,
    path = "/admin/add_location",
    request_body(
        content = AddLocationForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Back to the dashboard; blank names and constraint violations are silently ignored"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn add_location(
    State(state): State<AppState>,
    Form(form): Form<AddLocationForm>,
) -> Result<Redirect, ApiError> {
    let conn = &mut connect(&state.config)?;
    match locations::create(conn, &form.name, form.short_code.as_deref())
        .map_err(|_| ApiError::Database)?
    {
        CreateLocationOutcome::Created => info!(name = %form.name, "location added"),
        CreateLocationOutcome::BlankName => debug!("ignoring location with blank name"),
        CreateLocationOutcome::ConstraintViolation => {
            warn!(name = %form.name, "location insert hit a storage constraint, ignored")
        }
    }
    Ok(Redirect::to("/admin/dashboard"))
}

#[utoipa::path(
    post,
    path = "/admin/location/{location_id}/toggle",
    params(
        ("location_id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 303, description = "Back to the dashboard; unknown ids are a no-op"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn toggle_location(
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let conn = &mut connect(&state.config)?;
    locations::toggle_active(conn, location_id).map_err(|_| ApiError::Database)?;
    Ok(Redirect::to("/admin/dashboard"))
}

#[utoipa::path(
    post,
    path = "/admin/location/{location_id}/delete",
    params(
        ("location_id" = i32, Path, description = "Location id")
    ),
    responses(
        (status = 303, description = "Back to the dashboard; orders keep their dangling reference"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<i32>,
) -> Result<Redirect, ApiError> {
    let conn = &mut connect(&state.config)?;
    locations::delete_location(conn, location_id).map_err(|_| ApiError::Database)?;
    Ok(Redirect::to("/admin/dashboard"))
}

#[utoipa::path(
    post,
    path = "/admin/update_status",
    request_body(
        content = UpdateStatusForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Back to the dashboard; any status string is accepted"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Form(form): Form<UpdateStatusForm>,
) -> Result<Redirect, ApiError> {
    let conn = &mut connect(&state.config)?;
    orders::update_status(conn, form.order_id, &form.status).map_err(|_| ApiError::Database)?;
    Ok(Redirect::to("/admin/dashboard"))
}

#[utoipa::path(
    post,
    path = "/admin/delete_order",
    request_body(
        content = DeleteOrderForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Back to the dashboard; unknown ids are a no-op"),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "admin"
)]
#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Form(form): Form<DeleteOrderForm>,
) -> Result<Redirect, ApiError> {
    let conn = &mut connect(&state.config)?;
    orders::delete_order(conn, form.order_id).map_err(|_| ApiError::Database)?;
    Ok(Redirect::to("/admin/dashboard"))
}
