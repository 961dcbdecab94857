//! OTIF metric engine.
//!
//! Rebuilds the denormalized view by left-joining sales with products,
//! logistics, and production on SKU, then derives three indicators per row:
//!
//! - `on_time`: shipping time at or under the median shipping time of the
//!   row's transportation mode (medians computed over the whole joined set,
//!   not per row),
//! - `in_full`: stock level covers the units sold, inclusive at equality,
//! - `otif`: both.
//!
//! A sale whose SKU has no logistics or production match keeps its row with
//! `None` in the affected fields; such rows count in every denominator and
//! never in the OTIF numerator. The computation never fails on missing
//! joins.

use std::collections::HashMap;

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use serde::Serialize;

use crate::error::PipelineError;
use crate::models::{Logistics, Product, Production, Sale};
use crate::schema;

/// One sale, denormalized with its product, logistics, and production
/// attributes and the derived OTIF indicators. Never persisted; recomputed
/// from the store on every dashboard startup.
#[derive(Debug, Clone, Serialize)]
pub struct MetricRow {
    pub sku: String,
    pub products_sold: i32,
    pub revenue_generated: f64,
    pub customer_demographics: String,

    pub product_type: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<i32>,
    pub stock_levels: Option<i32>,

    pub shipping_times: Option<i32>,
    pub shipping_carrier: Option<String>,
    pub shipping_costs: Option<f64>,
    pub transportation_mode: Option<String>,
    pub route: Option<String>,
    pub total_costs: Option<f64>,

    pub production_volumes: Option<i32>,
    pub manufacturing_lead_time: Option<i32>,
    pub manufacturing_costs: Option<f64>,
    pub inspection_results: Option<String>,
    pub defect_rates: Option<f64>,

    pub expected_shipping_time: Option<f64>,
    pub on_time: Option<bool>,
    pub in_full: Option<bool>,
    pub otif: Option<bool>,
}

/// Derive the full metric row set from the five tables. Pure; the database
/// shell is [`load_dataset`].
pub fn derive_metrics(
    sales: &[Sale],
    products: &[Product],
    logistics: &[Logistics],
    production: &[Production],
) -> Vec<MetricRow> {
    let product_by_sku: HashMap<&str, &Product> = products
        .iter()
        .map(|p| (p.sku.as_str(), p))
        .collect();

    let mut logistics_by_sku: HashMap<&str, Vec<&Logistics>> = HashMap::new();
    for record in logistics {
        logistics_by_sku
            .entry(record.sku.as_str())
            .or_default()
            .push(record);
    }

    let mut production_by_sku: HashMap<&str, Vec<&Production>> = HashMap::new();
    for record in production {
        production_by_sku
            .entry(record.sku.as_str())
            .or_default()
            .push(record);
    }

    // pass 1: left join; several logistics/production matches for one SKU
    // multiply the joined rows, an unmatched side joins as None
    let mut rows = Vec::with_capacity(sales.len());
    for sale in sales {
        let product = product_by_sku.get(sale.sku.as_str()).copied();
        let logistics_matches = left_matches(&logistics_by_sku, &sale.sku);
        let production_matches = left_matches(&production_by_sku, &sale.sku);

        for shipment in &logistics_matches {
            for run in &production_matches {
                rows.push(joined_row(sale, product, *shipment, *run));
            }
        }
    }

    // pass 2: per-transportation-mode median shipping time over the joined set
    let expected_by_mode = expected_shipping_times(&rows);

    for row in &mut rows {
        row.expected_shipping_time = row
            .transportation_mode
            .as_deref()
            .and_then(|mode| expected_by_mode.get(mode))
            .copied();

        row.on_time = match (row.shipping_times, row.expected_shipping_time) {
            (Some(actual), Some(expected)) => Some(f64::from(actual) <= expected),
            _ => None,
        };

        row.otif = match (row.on_time, row.in_full) {
            (Some(on_time), Some(in_full)) => Some(on_time && in_full),
            _ => None,
        };
    }

    rows
}

/// Read the five tables and derive the metric row set
pub fn load_dataset(conn: &mut MysqlConnection) -> Result<Vec<MetricRow>, PipelineError> {
    let products = schema::products::table
        .select(Product::as_select())
        .load::<Product>(conn)?;
    let sales = schema::sales::table
        .select(Sale::as_select())
        .load::<Sale>(conn)?;
    let logistics = schema::logistics::table
        .select(Logistics::as_select())
        .load::<Logistics>(conn)?;
    let production = schema::production::table
        .select(Production::as_select())
        .load::<Production>(conn)?;

    let rows = derive_metrics(&sales, &products, &logistics, &production);
    tracing::info!(rows = rows.len(), sales = sales.len(), "metric dataset derived");

    Ok(rows)
}

fn left_matches<'a, T>(by_sku: &HashMap<&str, Vec<&'a T>>, sku: &str) -> Vec<Option<&'a T>> {
    match by_sku.get(sku) {
        Some(matches) => matches.iter().map(|m| Some(*m)).collect(),
        None => vec![None],
    }
}

fn joined_row(
    sale: &Sale,
    product: Option<&Product>,
    shipment: Option<&Logistics>,
    run: Option<&Production>,
) -> MetricRow {
    let stock_levels = product.map(|p| p.stock_levels);

    MetricRow {
        sku: sale.sku.clone(),
        products_sold: sale.products_sold,
        revenue_generated: sale.revenue_generated,
        customer_demographics: sale.customer_demographics.clone(),

        product_type: product.map(|p| p.product_type.clone()),
        price: product.map(|p| p.price),
        availability: product.map(|p| p.availability),
        stock_levels,

        shipping_times: shipment.map(|l| l.shipping_times),
        shipping_carrier: shipment.map(|l| l.shipping_carrier.clone()),
        shipping_costs: shipment.map(|l| l.shipping_costs),
        transportation_mode: shipment.map(|l| l.transportation_mode.clone()),
        route: shipment.map(|l| l.route.clone()),
        total_costs: shipment.map(|l| l.total_costs),

        production_volumes: run.map(|p| p.production_volumes),
        manufacturing_lead_time: run.map(|p| p.manufacturing_lead_time),
        manufacturing_costs: run.map(|p| p.manufacturing_costs),
        inspection_results: run.map(|p| p.inspection_results.clone()),
        defect_rates: run.map(|p| p.defect_rates),

        expected_shipping_time: None,
        on_time: None,
        in_full: stock_levels.map(|stock| stock >= sale.products_sold),
        otif: None,
    }
}

/// Median shipping time per transportation mode across the joined rows
fn expected_shipping_times(rows: &[MetricRow]) -> HashMap<String, f64> {
    let mut times_by_mode: HashMap<&str, Vec<i32>> = HashMap::new();
    for row in rows {
        if let (Some(mode), Some(time)) = (row.transportation_mode.as_deref(), row.shipping_times) {
            times_by_mode.entry(mode).or_default().push(time);
        }
    }

    times_by_mode
        .into_iter()
        .map(|(mode, mut times)| {
            times.sort_unstable();
            (mode.to_string(), median(&times))
        })
        .collect()
}

/// Median of a non-empty sorted slice; even lengths average the two middles
fn median(sorted: &[i32]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        f64::from(sorted[mid])
    } else {
        f64::from(sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(sku: &str, sold: i32) -> Sale {
        Sale {
            sku: sku.to_string(),
            products_sold: sold,
            revenue_generated: 1000.0,
            customer_demographics: "Unknown".to_string(),
        }
    }

    fn product(sku: &str, stock: i32) -> Product {
        Product {
            product_type: "haircare".to_string(),
            sku: sku.to_string(),
            price: 10.0,
            availability: 40,
            stock_levels: stock,
        }
    }

    fn shipment(sku: &str, mode: &str, time: i32) -> Logistics {
        Logistics {
            sku: sku.to_string(),
            shipping_times: time,
            shipping_carrier: "Carrier B".to_string(),
            shipping_costs: 3.0,
            transportation_mode: mode.to_string(),
            route: "Route A".to_string(),
            total_costs: 200.0,
        }
    }

    fn run(sku: &str, defects: f64) -> Production {
        Production {
            sku: sku.to_string(),
            production_volumes: 500,
            manufacturing_lead_time: 20,
            manufacturing_costs: 45.0,
            inspection_results: "Pass".to_string(),
            defect_rates: defects,
        }
    }

    #[test]
    fn test_on_time_against_per_mode_median() {
        // Air shipping times [2,3,4,10] -> median 3.5
        let sales: Vec<Sale> = (0..4).map(|i| sale(&format!("SKU{}", i), 10)).collect();
        let products: Vec<Product> = (0..4).map(|i| product(&format!("SKU{}", i), 50)).collect();
        let logistics = vec![
            shipment("SKU0", "Air", 2),
            shipment("SKU1", "Air", 3),
            shipment("SKU2", "Air", 4),
            shipment("SKU3", "Air", 10),
        ];
        let production: Vec<Production> = (0..4).map(|i| run(&format!("SKU{}", i), 0.2)).collect();

        let rows = derive_metrics(&sales, &products, &logistics, &production);

        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert_eq!(row.expected_shipping_time, Some(3.5));
        }
        assert_eq!(rows[1].on_time, Some(true)); // 3 <= 3.5
        assert_eq!(rows[2].on_time, Some(false)); // 4 > 3.5
        assert_eq!(rows[3].on_time, Some(false));
    }

    #[test]
    fn test_medians_are_per_mode() {
        let sales = vec![sale("SKU0", 1), sale("SKU1", 1), sale("SKU2", 1)];
        let products = vec![product("SKU0", 5), product("SKU1", 5), product("SKU2", 5)];
        let logistics = vec![
            shipment("SKU0", "Air", 2),
            shipment("SKU1", "Air", 8),
            shipment("SKU2", "Sea", 30),
        ];
        let production = vec![run("SKU0", 0.1), run("SKU1", 0.1), run("SKU2", 0.1)];

        let rows = derive_metrics(&sales, &products, &logistics, &production);

        assert_eq!(rows[0].expected_shipping_time, Some(5.0));
        assert_eq!(rows[2].expected_shipping_time, Some(30.0));
        assert_eq!(rows[2].on_time, Some(true));
    }

    #[test]
    fn test_in_full_boundary_at_equality() {
        let sales = vec![sale("SKU0", 50), sale("SKU1", 51)];
        let products = vec![product("SKU0", 50), product("SKU1", 50)];
        let logistics = vec![shipment("SKU0", "Air", 1), shipment("SKU1", "Air", 1)];
        let production = vec![run("SKU0", 0.1), run("SKU1", 0.1)];

        let rows = derive_metrics(&sales, &products, &logistics, &production);

        assert_eq!(rows[0].in_full, Some(true)); // stock == sold
        assert_eq!(rows[1].in_full, Some(false)); // sold exceeds stock by one
    }

    #[test]
    fn test_otif_requires_both() {
        let sales = vec![sale("SKU0", 10), sale("SKU1", 100)];
        let products = vec![product("SKU0", 50), product("SKU1", 50)];
        let logistics = vec![shipment("SKU0", "Air", 1), shipment("SKU1", "Air", 2)];
        let production = vec![run("SKU0", 0.1), run("SKU1", 0.1)];

        let rows = derive_metrics(&sales, &products, &logistics, &production);

        // median of [1,2] = 1.5
        assert_eq!(rows[0].otif, Some(true));
        assert_eq!(rows[1].otif, Some(false)); // on time but not in full
    }

    #[test]
    fn test_missing_joins_yield_none_not_failure() {
        let sales = vec![sale("SKU0", 10)];
        let products = vec![product("SKU0", 50)];

        let rows = derive_metrics(&sales, &products, &[], &[]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.shipping_times, None);
        assert_eq!(row.defect_rates, None);
        assert_eq!(row.on_time, None);
        assert_eq!(row.in_full, Some(true));
        assert_eq!(row.otif, None);
    }

    #[test]
    fn test_unknown_product_leaves_in_full_unknown() {
        let sales = vec![sale("SKU9", 10)];
        let logistics = vec![shipment("SKU9", "Air", 1)];

        let rows = derive_metrics(&sales, &[], &logistics, &[]);

        assert_eq!(rows[0].in_full, None);
        assert_eq!(rows[0].on_time, Some(true));
        assert_eq!(rows[0].otif, None);
    }

    #[test]
    fn test_duplicate_matches_multiply_rows() {
        let sales = vec![sale("SKU0", 10)];
        let products = vec![product("SKU0", 50)];
        let logistics = vec![shipment("SKU0", "Air", 1), shipment("SKU0", "Sea", 20)];
        let production = vec![run("SKU0", 0.1)];

        let rows = derive_metrics(&sales, &products, &logistics, &production);

        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3]), 3.0);
        assert_eq!(median(&[2, 3, 4, 10]), 3.5);
        assert_eq!(median(&[1, 2, 3]), 2.0);
    }
}
