//! SQLite product catalog.
//!
//! Stands in for the storefront's product table so the engine can resolve
//! ranked IDs to records without the full storefront.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::adapter::outbound::sqlite::database::connection::{checkout, DbPool};
use crate::adapter::outbound::sqlite::database::model::ProductRow;
use crate::adapter::outbound::sqlite::database::schema::products;
use crate::domain::{Product, ProductId};
use crate::error::{Error, Result};
use crate::port::outbound::catalog::Catalog;

fn id_to_sql(id: ProductId) -> Result<i64> {
    i64::try_from(id.get())
        .map_err(|_| Error::Database(format!("product id {id} exceeds SQLite integer range")))
}

/// SQLite-backed catalog over the `products` table.
pub struct SqliteCatalog {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteCatalog {
    /// Create a new SQLite catalog with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(product: &Product) -> Result<ProductRow> {
        Ok(ProductRow {
            id: id_to_sql(product.id)?,
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price.to_string(),
            available: product.available,
        })
    }

    fn from_row(row: ProductRow) -> Result<Product> {
        let id = u64::try_from(row.id)
            .map_err(|_| Error::Parse(format!("negative product id {}", row.id)))?;
        let price = Decimal::from_str(&row.price)
            .map_err(|e| Error::Parse(format!("price of product {id}: {e}")))?;

        Ok(Product {
            id: ProductId::new(id),
            name: row.name,
            slug: row.slug,
            price,
            available: row.available,
        })
    }

    /// Save a product, replacing it if it exists.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn save(&self, product: &Product) -> Result<()> {
        let row = Self::to_row(product)?;
        let mut conn = checkout(&self.pool)?;

        diesel::replace_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    /// List every product ordered by ID.
    ///
    /// # Errors
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list(&self) -> Result<Vec<Product>> {
        let mut conn = checkout(&self.pool)?;

        let rows: Vec<ProductRow> = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }
}

impl Catalog for SqliteCatalog {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids
            .iter()
            .copied()
            .map(id_to_sql)
            .collect::<Result<Vec<i64>>>()?;
        let mut conn = checkout(&self.pool)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(ids))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn product_ids(&self) -> Result<Vec<ProductId>> {
        let mut conn = checkout(&self.pool)?;

        let ids: Vec<i64> = products::table
            .select(products::id)
            .order(products::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        ids.into_iter()
            .map(|id| {
                u64::try_from(id)
                    .map(ProductId::new)
                    .map_err(|_| Error::Parse(format!("negative product id {id}")))
            })
            .collect()
    }
}
