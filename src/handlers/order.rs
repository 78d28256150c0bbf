use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::catalog;
use crate::error::ApiError;
use crate::locations;
use crate::orders;
use crate::pricing::{self, OrderSubmission, PricingError};

use super::restaurant::MenuView;
use super::{AppState, LocationView, OrderView, connect};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/order/{restaurant_id}", post(place_order))
        .route("/api/order_status", post(order_status))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderConfirmation {
    #[serde(flatten)]
    pub order: OrderView,
    /// Display name of the delivery location at order time
    pub location_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderStatusRequest {
    pub student_id: String,
    pub phone: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderStatusView {
    pub student_id: String,
    pub phone: String,
    pub orders: Vec<OrderView>,
}

/// Order form submission. Besides the requester fields and `location_id`,
/// the form carries one quantity field per menu item, keyed
/// `"{category}_{item}"`; those keys are passed through to pricing as-is.
#[utoipa::path(
    post,
    path = "/order/{restaurant_id}",
    params(
        ("restaurant_id" = String, Path, description = "Restaurant catalog identifier")
    ),
    responses(
        (status = 200, description = "Order placed", body = OrderConfirmation),
        (status = 303, description = "Unknown restaurant, redirected to the directory"),
        (status = 422, description = "Submission rejected; menu context returned with the error message", body = MenuView),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state, fields))]
pub async fn place_order(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Form(mut fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let Some(restaurant) = catalog::find(&restaurant_id) else {
        return Ok(Redirect::to("/").into_response());
    };

    let submission = OrderSubmission {
        name: fields.remove("name").unwrap_or_default(),
        student_id: fields.remove("student_id").unwrap_or_default(),
        phone: fields.remove("phone").unwrap_or_default(),
        location_id: fields.remove("location_id"),
        quantities: fields,
    };

    let conn = &mut connect(&state.config)?;
    match pricing::build_order(restaurant, &submission, conn) {
        Ok(draft) => {
            let order = orders::create_order(conn, &draft).map_err(|e| {
                error!("failed to persist order: {e}");
                ApiError::Database
            })?;
            info!(order_id = order.id, total = order.total, "order received");
            Ok(Json(OrderConfirmation {
                order: order.into(),
                location_name: draft.location_name,
            })
            .into_response())
        }
        Err(PricingError::Rejected(rejection)) => {
            let locations = locations::list_active(conn).map_err(|_| ApiError::Database)?;
            let view = MenuView {
                restaurant_id,
                restaurant: restaurant.clone(),
                locations: locations.into_iter().map(LocationView::from).collect(),
                error: Some(rejection.to_string()),
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
        }
        Err(PricingError::Storage(e)) => {
            error!("order validation failed: {e}");
            Err(ApiError::Database)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/order_status",
    request_body(
        content = OrderStatusRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Orders matching the requester", body = OrderStatusView),
        (status = 500, description = "Database error", body = crate::error::ApiErrorResponse),
    ),
    tag = "orders"
)]
#[instrument(skip(state, request))]
pub async fn order_status(
    State(state): State<AppState>,
    Form(request): Form<OrderStatusRequest>,
) -> Result<Json<OrderStatusView>, ApiError> {
    let conn = &mut connect(&state.config)?;
    let matching = orders::list_for_requester(conn, &request.student_id, &request.phone)
        .map_err(|_| ApiError::Database)?;

    Ok(Json(OrderStatusView {
        student_id: request.student_id,
        phone: request.phone,
        orders: matching.into_iter().map(OrderView::from).collect(),
    }))
}
