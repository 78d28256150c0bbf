use chrono::Utc;
use diesel::{delete, insert_into, prelude::*, update};

use crate::models::{NewOrder, Order};
use crate::pricing::OrderDraft;
use crate::schema::orders;

/// Status every order starts in. Admins may overwrite it with any string;
/// there is no closed set of statuses.
pub const INITIAL_STATUS: &str = "Received";

/// Persists a validated draft, stamping the server-side creation time, and
/// returns the stored row including its generated id.
pub fn create_order(conn: &mut SqliteConnection, draft: &OrderDraft) -> QueryResult<Order> {
    let items = serde_json::to_string(&draft.items).expect("line items serialize to JSON");
    let row = NewOrder {
        restaurant: &draft.restaurant,
        name: &draft.name,
        student_id: &draft.student_id,
        phone: &draft.phone,
        items: &items,
        total: draft.total,
        status: &draft.status,
        order_time: Utc::now().naive_utc(),
        location_id: Some(draft.location_id),
    };
    insert_into(orders::table)
        .values(&row)
        .returning(Order::as_returning())
        .get_result(conn)
}

/// Self-service status lookup: exact equality on both fields, newest first.
pub fn list_for_requester(
    conn: &mut SqliteConnection,
    student_id: &str,
    phone: &str,
) -> QueryResult<Vec<Order>> {
    orders::table
        .filter(orders::student_id.eq(student_id))
        .filter(orders::phone.eq(phone))
        .order((orders::order_time.desc(), orders::id.desc()))
        .select(Order::as_select())
        .load(conn)
}

/// Admin listing, newest first, unfiltered.
pub fn list_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Order>> {
    orders::table
        .order((orders::order_time.desc(), orders::id.desc()))
        .select(Order::as_select())
        .load(conn)
}

/// Overwrites the status unconditionally. Any string is accepted; an
/// unknown id updates zero rows and is not an error.
pub fn update_status(
    conn: &mut SqliteConnection,
    order_id: i32,
    status: &str,
) -> QueryResult<usize> {
    update(orders::table.find(order_id))
        .set(orders::status.eq(status))
        .execute(conn)
}

pub fn delete_order(conn: &mut SqliteConnection, order_id: i32) -> QueryResult<usize> {
    delete(orders::table.find(order_id)).execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations;
    use crate::models::LineItem;
    use diesel_migrations::MigrationHarness;
    use std::collections::BTreeMap;

    fn setup_database() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(crate::MIGRATIONS).unwrap();
        conn
    }

    fn draft(student_id: &str, phone: &str, location_id: i32) -> OrderDraft {
        let mut items = BTreeMap::new();
        items.insert(
            "Tea".to_string(),
            LineItem {
                quantity: 2,
                price: 10.0,
                subtotal: 20.0,
            },
        );
        OrderDraft {
            restaurant: "Nalambagam Canteen".to_string(),
            name: "Priya".to_string(),
            student_id: student_id.to_string(),
            phone: phone.to_string(),
            items,
            total: 20.0,
            status: INITIAL_STATUS.to_string(),
            location_id,
            location_name: "Library".to_string(),
        }
    }

    #[test]
    fn create_and_read_back_round_trips_line_items() {
        let conn = &mut setup_database();
        let created = create_order(conn, &draft("99bce1234", "9876543210", 1)).unwrap();
        assert!(created.id > 0);
        assert_eq!(created.status, "Received");

        let read = list_all(conn).unwrap().remove(0);
        assert_eq!(read.id, created.id);
        assert_eq!(read.total, 20.0);
        let items = read.line_items();
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
    fn requester_listing_matches_both_fields_exactly() {
        let conn = &mut setup_database();
        let first = create_order(conn, &draft("99bce1234", "9876543210", 1)).unwrap();
        let second = create_order(conn, &draft("99bce1234", "9876543210", 1)).unwrap();
        create_order(conn, &draft("99bce1234", "1112223334", 1)).unwrap();
        create_order(conn, &draft("99bce9999", "9876543210", 1)).unwrap();

        let mine = list_for_requester(conn, "99bce1234", "9876543210").unwrap();
        let ids: Vec<_> = mine.iter().map(|o| o.id).collect();
        assert_eq!(ids, [second.id, first.id]);

        // no partial or case-normalized matching
        assert!(list_for_requester(conn, "99BCE1234", "9876543210")
            .unwrap()
            .is_empty());
        assert!(list_for_requester(conn, "99bce123", "9876543210")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn status_accepts_arbitrary_strings() {
        let conn = &mut setup_database();
        let order = create_order(conn, &draft("99bce1234", "9876543210", 1)).unwrap();

        assert_eq!(
            update_status(conn, order.id, "Out for delivery (gate 3)").unwrap(),
            1
        );
        let read = list_all(conn).unwrap().remove(0);
        assert_eq!(read.status, "Out for delivery (gate 3)");
    }

    #[test]
    fn update_and_delete_of_unknown_ids_are_no_ops() {
        let conn = &mut setup_database();
        assert_eq!(update_status(conn, 4242, "Ready").unwrap(), 0);
        assert_eq!(delete_order(conn, 4242).unwrap(), 0);
    }

    #[test]
    fn delete_removes_the_order() {
        let conn = &mut setup_database();
        let order = create_order(conn, &draft("99bce1234", "9876543210", 1)).unwrap();
        assert_eq!(delete_order(conn, order.id).unwrap(), 1);
        assert!(list_all(conn).unwrap().is_empty());
    }

    #[test]
    fn deleting_a_location_leaves_a_dangling_reference() {
        let conn = &mut setup_database();
        locations::create(conn, "Library", None).unwrap();
        let location_id = locations::list_all(conn).unwrap()[0].id;

        let order = create_order(conn, &draft("99bce1234", "9876543210", location_id)).unwrap();
        assert_eq!(locations::delete_location(conn, location_id).unwrap(), 1);

        let read = list_all(conn).unwrap().remove(0);
        assert_eq!(read.id, order.id);
        assert_eq!(read.location_id, Some(location_id));
    }
}
