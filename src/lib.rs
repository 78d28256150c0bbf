use diesel::prelude::*;
use diesel::result::ConnectionError;
use diesel::sql_query;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod locations;
pub mod models;
pub mod orders;
pub mod pricing;
pub mod schema;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, ConnectionError> {
    SqliteConnection::establish(database_url)
}

#[derive(QueryableByName)]
struct TableColumn {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

/// Databases created before delivery locations existed lack the
/// `orders.location_id` column. Adds it in place when missing; runs on
/// every startup and is idempotent.
pub fn ensure_location_id_column(conn: &mut SqliteConnection) -> QueryResult<()> {
    let columns = sql_query("PRAGMA table_info(orders)").load::<TableColumn>(conn)?;
    if !columns.iter().any(|column| column.name == "location_id") {
        sql_query("ALTER TABLE orders ADD COLUMN location_id INTEGER DEFAULT NULL")
            .execute(conn)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel_migrations::MigrationHarness;

    #[test]
    fn location_id_column_is_added_to_legacy_orders_table() {
        let conn = &mut SqliteConnection::establish(":memory:").unwrap();
        sql_query(
            "CREATE TABLE orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                restaurant TEXT NOT NULL,
                name TEXT NOT NULL,
                student_id TEXT NOT NULL,
                phone TEXT NOT NULL,
                items TEXT NOT NULL,
                total REAL NOT NULL,
                status TEXT NOT NULL DEFAULT 'Received',
                order_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(conn)
        .unwrap();
        sql_query(
            "INSERT INTO orders (restaurant, name, student_id, phone, items, total)
             VALUES ('Nalambagam Canteen', 'Priya', '99bce1234', '9876543210', '{}', 10.0)",
        )
        .execute(conn)
        .unwrap();

        ensure_location_id_column(conn).unwrap();
        ensure_location_id_column(conn).unwrap();

        let columns = sql_query("PRAGMA table_info(orders)")
            .load::<TableColumn>(conn)
            .unwrap();
        assert!(columns.iter().any(|c| c.name == "location_id"));

        // pre-existing rows survive with a NULL location
        let rows = schema::orders::table
            .select(models::Order::as_select())
            .load(conn)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location_id, None);
    }

    #[test]
    fn schema_check_is_a_no_op_on_migrated_databases() {
        let conn = &mut SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(MIGRATIONS).unwrap();
        ensure_location_id_column(conn).unwrap();
    }
}
