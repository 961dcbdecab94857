//! Idempotent schema creation.
//!
//! `CREATE DATABASE IF NOT EXISTS` runs against a server-level connection
//! (no database selected); the five `CREATE TABLE IF NOT EXISTS` statements
//! run in one transaction with `products` first, since the three per-record
//! tables declare foreign keys against `products.sku`. Safe to re-run; any
//! DDL failure rolls back and surfaces as [`PipelineError::Schema`] with no
//! retry.

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;

use crate::config::DbConfig;
use crate::error::PipelineError;

/// Table DDL in foreign-key dependency order
pub const TABLE_DDL: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS products (
        id INT AUTO_INCREMENT PRIMARY KEY,
        product_type VARCHAR(50) NOT NULL,
        sku VARCHAR(50) NOT NULL UNIQUE,
        price DOUBLE NOT NULL,
        availability INT NOT NULL,
        stock_levels INT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS suppliers (
        id INT AUTO_INCREMENT PRIMARY KEY,
        supplier_name VARCHAR(100) NOT NULL,
        location VARCHAR(100) NOT NULL,
        lead_time INT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS sales (
        id INT AUTO_INCREMENT PRIMARY KEY,
        sku VARCHAR(50) NOT NULL,
        products_sold INT NOT NULL,
        revenue_generated DOUBLE NOT NULL,
        customer_demographics VARCHAR(50) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (sku) REFERENCES products(sku)
    )",
    "CREATE TABLE IF NOT EXISTS logistics (
        id INT AUTO_INCREMENT PRIMARY KEY,
        sku VARCHAR(50) NOT NULL,
        shipping_times INT NOT NULL,
        shipping_carrier VARCHAR(100) NOT NULL,
        shipping_costs DOUBLE NOT NULL,
        transportation_mode VARCHAR(50) NOT NULL,
        route VARCHAR(50) NOT NULL,
        total_costs DOUBLE NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (sku) REFERENCES products(sku)
    )",
    "CREATE TABLE IF NOT EXISTS production (
        id INT AUTO_INCREMENT PRIMARY KEY,
        sku VARCHAR(50) NOT NULL,
        production_volumes INT NOT NULL,
        manufacturing_lead_time INT NOT NULL,
        manufacturing_costs DOUBLE NOT NULL,
        inspection_results VARCHAR(50) NOT NULL,
        defect_rates DOUBLE NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (sku) REFERENCES products(sku)
    )",
];

/// Create the database if it does not exist
pub fn create_database(config: &DbConfig) -> Result<(), PipelineError> {
    let mut conn = MysqlConnection::establish(&config.server_url())
        .map_err(|e| PipelineError::Connection(e.to_string()))?;

    diesel::sql_query(format!(
        "CREATE DATABASE IF NOT EXISTS `{}`",
        config.database
    ))
    .execute(&mut conn)
    .map_err(|e| PipelineError::Schema(e.to_string()))?;

    tracing::info!(database = %config.database, "database created or verified");
    Ok(())
}

/// Create the five tables if absent, products first
pub fn create_tables(conn: &mut MysqlConnection) -> Result<(), PipelineError> {
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        for ddl in TABLE_DDL {
            diesel::sql_query(ddl).execute(conn)?;
        }
        Ok(())
    })
    .map_err(|e| PipelineError::Schema(e.to_string()))?;

    tracing::info!(tables = TABLE_DDL.len(), "tables created or verified");
    Ok(())
}
