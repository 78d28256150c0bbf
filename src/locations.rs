use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error};
use diesel::{delete, insert_into, prelude::*, update};

use crate::models::{Location, NewLocation};
use crate::schema::locations;

/// Result of an attempted location insert. Blank names and storage
/// constraint violations are regular outcomes here, not errors: the admin
/// form flow treats both as a silent no-op.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateLocationOutcome {
    Created,
    BlankName,
    ConstraintViolation,
}

pub fn create(
    conn: &mut SqliteConnection,
    name: &str,
    short_code: Option<&str>,
) -> QueryResult<CreateLocationOutcome> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(CreateLocationOutcome::BlankName);
    }
    let short_code = short_code.map(str::trim).filter(|code| !code.is_empty());

    let row = NewLocation {
        name,
        short_code,
        is_active: true,
        created_at: Utc::now().naive_utc(),
    };
    match insert_into(locations::table).values(&row).execute(conn) {
        Ok(_) => Ok(CreateLocationOutcome::Created),
        Err(Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => Ok(CreateLocationOutcome::ConstraintViolation),
        Err(e) => Err(e),
    }
}

pub fn find(conn: &mut SqliteConnection, location_id: i32) -> QueryResult<Option<Location>> {
    locations::table
        .find(location_id)
        .select(Location::as_select())
        .first(conn)
        .optional()
}

/// Locations offered to students while ordering, alphabetical by name.
pub fn list_active(conn: &mut SqliteConnection) -> QueryResult<Vec<Location>> {
    locations::table
        .filter(locations::is_active.eq(true))
        .order(locations::name.asc())
        .select(Location::as_select())
        .load(conn)
}

/// Admin listing, newest-created first.
pub fn list_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Location>> {
    locations::table
        .order((locations::created_at.desc(), locations::id.desc()))
        .select(Location::as_select())
        .load(conn)
}

/// Flips `is_active` in place. A missing id updates zero rows and is not an
/// error. Returns the number of rows touched.
pub fn toggle_active(conn: &mut SqliteConnection, location_id: i32) -> QueryResult<usize> {
    update(locations::table.find(location_id))
        .set(locations::is_active.eq(diesel::dsl::not(locations::is_active)))
        .execute(conn)
}

/// Removes the location. Orders referencing it keep their `location_id`
/// value as a dangling reference; there is no cascade.
pub fn delete_location(conn: &mut SqliteConnection, location_id: i32) -> QueryResult<usize> {
    delete(locations::table.find(location_id)).execute(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel_migrations::MigrationHarness;

    fn setup_database() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        conn.run_pending_migrations(crate::MIGRATIONS).unwrap();
        conn
    }

    #[test]
    fn create_trims_and_stores_blank_short_code_as_null() {
        let conn = &mut setup_database();
        assert_eq!(
            create(conn, "  Girls Hostel  ", Some("  ")).unwrap(),
            CreateLocationOutcome::Created
        );
        let all = list_all(conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Girls Hostel");
        assert_eq!(all[0].short_code, None);
        assert!(all[0].is_active);
    }

    #[test]
    fn create_blank_name_is_a_no_op() {
        let conn = &mut setup_database();
        assert_eq!(
            create(conn, "   ", Some("GH")).unwrap(),
            CreateLocationOutcome::BlankName
        );
        assert!(list_all(conn).unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_are_permitted() {
        let conn = &mut setup_database();
        create(conn, "Library", None).unwrap();
        assert_eq!(
            create(conn, "Library", None).unwrap(),
            CreateLocationOutcome::Created
        );
        assert_eq!(list_all(conn).unwrap().len(), 2);
    }

    #[test]
    fn active_listing_is_alphabetical_and_filtered() {
        let conn = &mut setup_database();
        create(conn, "Library", Some("LIB")).unwrap();
        create(conn, "Admin Block", Some("AB")).unwrap();
        create(conn, "Boys Hostel", Some("BH")).unwrap();

        let boys = list_active(conn)
            .unwrap()
            .into_iter()
            .find(|l| l.name == "Boys Hostel")
            .unwrap();
        toggle_active(conn, boys.id).unwrap();

        let names: Vec<_> = list_active(conn).unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["Admin Block", "Library"]);
    }

    #[test]
    fn admin_listing_is_newest_first() {
        let conn = &mut setup_database();
        create(conn, "Library", None).unwrap();
        create(conn, "Admin Block", None).unwrap();
        let names: Vec<_> = list_all(conn).unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, ["Admin Block", "Library"]);
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let conn = &mut setup_database();
        create(conn, "Library", None).unwrap();
        let id = list_all(conn).unwrap()[0].id;

        assert_eq!(toggle_active(conn, id).unwrap(), 1);
        assert!(!find(conn, id).unwrap().unwrap().is_active);
        assert_eq!(toggle_active(conn, id).unwrap(), 1);
        assert!(find(conn, id).unwrap().unwrap().is_active);
    }

    #[test]
    fn toggle_unknown_id_is_a_no_op() {
        let conn = &mut setup_database();
        assert_eq!(toggle_active(conn, 4242).unwrap(), 0);
        assert!(list_all(conn).unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let conn = &mut setup_database();
        assert_eq!(delete_location(conn, 4242).unwrap(), 0);
    }
}
