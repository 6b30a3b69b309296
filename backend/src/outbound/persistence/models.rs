//! Internal Diesel row structs for the `books` table.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values through validated constructors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::books;

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[expect(dead_code, reason = "schema field for auditing support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for auditing support")]
    pub updated_at: DateTime<Utc>,
}

/// Projection used by owner-scoped reads.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
}

/// Insertable struct for creating book records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub genre: &'a str,
}

/// Changeset applied by updates; ownership never changes.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
pub(crate) struct BookUpdate<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub genre: &'a str,
}
