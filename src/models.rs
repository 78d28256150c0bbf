use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::{locations, orders};

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = locations)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub short_code: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = locations)]
pub struct NewLocation<'a> {
    pub name: &'a str,
    pub short_code: Option<&'a str>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = orders)]
pub struct Order {
    pub id: i32,
    pub restaurant: String,
    pub name: String,
    pub student_id: String,
    pub phone: String,
    pub items: String,
    pub total: f64,
    pub status: String,
    pub order_time: NaiveDateTime,
    pub location_id: Option<i32>,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = orders)]
pub struct NewOrder<'a> {
    pub restaurant: &'a str,
    pub name: &'a str,
    pub student_id: &'a str,
    pub phone: &'a str,
    pub items: &'a str,
    pub total: f64,
    pub status: &'a str,
    pub order_time: NaiveDateTime,
    pub location_id: Option<i32>,
}

/// One ordered item as it is stored inside the `orders.items` JSON column.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LineItem {
    pub quantity: i32,
    pub price: f64,
    pub subtotal: f64,
}

impl Order {
    /// Decodes the stored line-item mapping. A row whose `items` column is
    /// empty or not valid JSON reads as an empty mapping instead of failing.
    pub fn line_items(&self) -> BTreeMap<String, LineItem> {
        serde_json::from_str(&self.items).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order_with_items(items: &str) -> Order {
        Order {
            id: 1,
            restaurant: "Nalambagam Canteen".to_string(),
            name: "Priya".to_string(),
            student_id: "99bce1234".to_string(),
            phone: "9876543210".to_string(),
            items: items.to_string(),
            total: 20.0,
            status: "Received".to_string(),
            order_time: Utc::now().naive_utc(),
            location_id: Some(1),
        }
    }

    #[test]
    fn line_items_round_trip() {
        let order =
            order_with_items(r#"{"Tea":{"quantity":2,"price":10.0,"subtotal":20.0}}"#);
        let items = order.line_items();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items["Tea"],
            LineItem {
                quantity: 2,
                price: 10.0,
                subtotal: 20.0,
            }
        );
    }

    #[test]
    fn malformed_items_degrade_to_empty() {
        assert!(order_with_items("not json").line_items().is_empty());
        assert!(order_with_items("").line_items().is_empty());
        assert!(order_with_items("[1, 2, 3]").line_items().is_empty());
    }
}
