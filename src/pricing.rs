use std::collections::{BTreeMap, HashMap};

use diesel::prelude::*;
use thiserror::Error;

use crate::catalog::Restaurant;
use crate::locations;
use crate::models::LineItem;
use crate::orders::INITIAL_STATUS;

/// Raw order form content as submitted by a student. Quantity fields are
/// keyed `"{category}_{item}"`; anything else in the map is ignored.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub name: String,
    pub student_id: String,
    pub phone: String,
    pub location_id: Option<String>,
    pub quantities: HashMap<String, String>,
}

/// A priced, validated order that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub restaurant: String,
    pub name: String,
    pub student_id: String,
    pub phone: String,
    pub items: BTreeMap<String, LineItem>,
    pub total: f64,
    pub status: String,
    pub location_id: i32,
    pub location_name: String,
}

/// Why a submission was turned away. Each variant's message is shown to the
/// student inline, with the menu form context preserved for a retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("Please select a delivery location (admin-approved).")]
    MissingLocation,
    #[error("Invalid delivery location selected.")]
    InvalidLocation,
    #[error("Selected delivery location is not available.")]
    LocationUnavailable,
    #[error("Please select at least one item to order.")]
    EmptyOrder,
}

#[derive(Error, Debug)]
pub enum PricingError {
    #[error(transparent)]
    Rejected(#[from] OrderRejection),
    #[error("Unexpected storage error")]
    Storage(#[from] diesel::result::Error),
}

/// Prices and validates a submission against the restaurant's menu.
///
/// The delivery location is checked first: it must be supplied, parse as an
/// id, and resolve to an active location. Quantities are then read for every
/// (category, item) pair on the menu; absent, unparsable, zero or negative
/// values mean "not ordered" and are skipped silently. At least one line
/// item must remain. Nothing is persisted here.
pub fn build_order(
    restaurant: &Restaurant,
    submission: &OrderSubmission,
    conn: &mut SqliteConnection,
) -> Result<OrderDraft, PricingError> {
    let raw_location = submission
        .location_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if raw_location.is_empty() {
        return Err(OrderRejection::MissingLocation.into());
    }
    let location_id = raw_location
        .parse::<i32>()
        .map_err(|_| OrderRejection::InvalidLocation)?;
    let location = locations::find(conn, location_id)?
        .filter(|location| location.is_active)
        .ok_or(OrderRejection::LocationUnavailable)?;

    let mut items = BTreeMap::new();
    for category in &restaurant.menu {
        for menu_item in &category.items {
            let field = format!("{}_{}", category.name, menu_item.name);
            let quantity = submission
                .quantities
                .get(&field)
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .unwrap_or(0);
            if quantity > 0 {
                items.insert(
                    menu_item.name.clone(),
                    LineItem {
                        quantity,
                        price: menu_item.price,
                        subtotal: menu_item.price * f64::from(quantity),
                    },
                );
            }
        }
    }
    if items.is_empty() {
        return Err(OrderRejection::EmptyOrder.into());
    }
    let total = items.values().map(|item| item.subtotal).sum();

    Ok(OrderDraft {
        restaurant: restaurant.name.clone(),
        name: submission.name.clone(),
        student_id: submission.student_id.clone(),
        phone: submission.phone.clone(),
        items,
        total,
        status: INITIAL_STATUS.to_string(),
        location_id,
        location_name: location.name,
    })
}
