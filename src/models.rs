//! Row structs for the five normalized tables.
//!
//! Each struct carries the data columns only; `id` and `created_at` stay on
//! the database side (auto-increment and default timestamp). The same struct
//! serves as the transformer output, the loader input (`Insertable`), and the
//! metric engine input (`Selectable` read back without the bookkeeping
//! columns).

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{logistics, production, products, sales, suppliers};

/// One product, unique by SKU
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Product {
    pub product_type: String,
    pub sku: String,
    pub price: f64,
    pub availability: i32,
    pub stock_levels: i32,
}

/// One supplier, unique by name
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = suppliers)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Supplier {
    pub supplier_name: String,
    pub location: String,
    pub lead_time: i32,
}

/// One sale event; SKUs repeat across sales
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Sale {
    pub sku: String,
    pub products_sold: i32,
    pub revenue_generated: f64,
    pub customer_demographics: String,
}

/// Shipping record for a SKU
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = logistics)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Logistics {
    pub sku: String,
    pub shipping_times: i32,
    pub shipping_carrier: String,
    pub shipping_costs: f64,
    pub transportation_mode: String,
    pub route: String,
    pub total_costs: f64,
}

/// Manufacturing record for a SKU
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = production)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Production {
    pub sku: String,
    pub production_volumes: i32,
    pub manufacturing_lead_time: i32,
    pub manufacturing_costs: f64,
    pub inspection_results: String,
    pub defect_rates: f64,
}
