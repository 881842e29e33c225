//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{affinity_scores, products};

/// Insertable row of an affinity map.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = affinity_scores)]
pub struct NewScoreRow<'a> {
    pub store_key: &'a str,
    pub member: i64,
    pub score: i64,
}

/// Database row for a catalog product.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Decimal price stored as its canonical string form.
    pub price: String,
    pub available: bool,
}
