//! Load step: five normalized tables → MySQL, all or nothing.
//!
//! Products load first through an upsert keyed on SKU (only price,
//! availability, and stock_levels are overwritten on conflict); the other
//! four tables are plain batch inserts. Everything runs in a single
//! transaction: one failed row rolls back the whole batch. Running two loads
//! concurrently is unsupported; the transaction gives per-run atomicity and
//! nothing more.

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use diesel::sql_types::{Double, Integer, Text};

use crate::error::PipelineError;
use crate::schema;
use crate::transform::NormalizedTables;

/// Insert-or-update statement for one product, keyed on the SKU unique index.
/// `product_type` and `sku` are preserved on conflict.
pub const PRODUCT_UPSERT: &str = "INSERT INTO products \
     (product_type, sku, price, availability, stock_levels) \
     VALUES (?, ?, ?, ?, ?) \
     ON DUPLICATE KEY UPDATE \
     price = VALUES(price), \
     availability = VALUES(availability), \
     stock_levels = VALUES(stock_levels)";

/// Row counts written by one load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub products: usize,
    pub suppliers: usize,
    pub sales: usize,
    pub logistics: usize,
    pub production: usize,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.products + self.suppliers + self.sales + self.logistics + self.production
    }
}

/// Load all five tables inside one transaction.
///
/// A constraint breach (absent FK target, duplicate key) maps to
/// [`PipelineError::Constraint`]; any error rolls the entire batch back.
pub fn load_all(
    conn: &mut MysqlConnection,
    tables: &NormalizedTables,
) -> Result<LoadReport, PipelineError> {
    let report = conn.transaction::<_, PipelineError, _>(|conn| {
        // products first: the other tables reference products.sku
        for product in &tables.products {
            diesel::sql_query(PRODUCT_UPSERT)
                .bind::<Text, _>(&product.product_type)
                .bind::<Text, _>(&product.sku)
                .bind::<Double, _>(product.price)
                .bind::<Integer, _>(product.availability)
                .bind::<Integer, _>(product.stock_levels)
                .execute(conn)?;
        }

        let suppliers = diesel::insert_into(schema::suppliers::table)
            .values(&tables.suppliers)
            .execute(conn)?;

        let sales = diesel::insert_into(schema::sales::table)
            .values(&tables.sales)
            .execute(conn)?;

        let logistics = diesel::insert_into(schema::logistics::table)
            .values(&tables.logistics)
            .execute(conn)?;

        let production = diesel::insert_into(schema::production::table)
            .values(&tables.production)
            .execute(conn)?;

        Ok(LoadReport {
            products: tables.products.len(),
            suppliers,
            sales,
            logistics,
            production,
        })
    })?;

    tracing::info!(
        products = report.products,
        suppliers = report.suppliers,
        sales = report.sales,
        logistics = report.logistics,
        production = report.production,
        "load committed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_preserves_identity_columns() {
        // on conflict only the mutable attributes are overwritten
        assert!(PRODUCT_UPSERT.contains("price = VALUES(price)"));
        assert!(PRODUCT_UPSERT.contains("availability = VALUES(availability)"));
        assert!(PRODUCT_UPSERT.contains("stock_levels = VALUES(stock_levels)"));
        assert!(!PRODUCT_UPSERT.contains("sku = VALUES"));
        assert!(!PRODUCT_UPSERT.contains("product_type = VALUES"));
    }

    #[test]
    fn test_load_report_total() {
        let report = LoadReport {
            products: 100,
            suppliers: 5,
            sales: 100,
            logistics: 100,
            production: 100,
        };
        assert_eq!(report.total(), 405);
    }
}
