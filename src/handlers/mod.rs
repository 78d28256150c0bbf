pub mod admin;
pub mod order;
pub mod restaurant;

// Re-export routers for easier importing
pub use admin::router as admin_router;
pub use order::router as order_router;
pub use restaurant::router as restaurant_router;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{LineItem, Location, Order};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

/// Opens the per-request database connection. Every handler gets its own
/// connection, dropped when the response is produced.
pub(crate) fn connect(config: &Config) -> Result<SqliteConnection, ApiError> {
    crate::establish_connection(&config.database_url).map_err(|e| {
        error!("failed to open database: {e}");
        ApiError::Database
    })
}

// Shared view models

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationView {
    /// Unique identifier for the location
    pub id: i32,
    /// Display name shown to students
    pub name: String,
    /// Optional short code, e.g. a building abbreviation
    pub short_code: Option<String>,
    /// Whether students may currently order to this location
    pub is_active: bool,
}

impl From<Location> for LocationView {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            short_code: location.short_code,
            is_active: location.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    /// Unique identifier for the order
    pub id: i32,
    /// Restaurant display name as it was at order time
    pub restaurant: String,
    /// Requester name
    pub name: String,
    /// Requester student id
    pub student_id: String,
    /// Requester phone number
    pub phone: String,
    /// Ordered items keyed by item name
    pub order_items: BTreeMap<String, LineItem>,
    /// Order total, the sum of the line-item subtotals
    pub total: f64,
    /// Current status string
    pub status: String,
    /// Server-side creation time
    pub order_time: NaiveDateTime,
    /// Delivery location id; may reference a since-deleted location
    pub location_id: Option<i32>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let order_items = order.line_items();
        Self {
            id: order.id,
            restaurant: order.restaurant,
            name: order.name,
            student_id: order.student_id,
            phone: order.phone,
            order_items,
            total: order.total,
            status: order.status,
            order_time: order.order_time,
            location_id: order.location_id,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::home,
        restaurant::menu,
        order::place_order,
        order::order_status,
        admin::login,
        admin::dashboard,
        admin::add_location,
        admin::toggle_location,
        admin::delete_location,
        admin::update_status,
        admin::delete_order,
    ),
    components(
        schemas(
            crate::catalog::Restaurant,
            crate::catalog::MenuCategory,
            crate::catalog::MenuItem,
            crate::models::LineItem,
            crate::error::ApiErrorResponse,
            LocationView,
            OrderView,
            restaurant::RestaurantSummary,
            restaurant::MenuView,
            order::OrderConfirmation,
            order::OrderStatusRequest,
            order::OrderStatusView,
            admin::LoginForm,
            admin::AddLocationForm,
            admin::UpdateStatusForm,
            admin::DeleteOrderForm,
            admin::DashboardView
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant directory and menus"),
        (name = "orders", description = "Order submission and status lookup"),
        (name = "admin", description = "Password-gated dashboard operations")
    ),
    info(
        title = "Campus Eats",
        description = "Campus food ordering service",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
