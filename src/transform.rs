//! Transform step: flat raw table → five normalized row sets.
//!
//! Pure and deterministic: the same [`RawTable`] always yields the same
//! [`NormalizedTables`]. Source columns are selected and renamed per target
//! table; products and suppliers are deduplicated by their natural key
//! keeping the first occurrence, while sales/logistics/production keep one
//! row per source record.

use std::collections::HashSet;

use crate::error::PipelineError;
use crate::models::{Logistics, Product, Production, Sale, Supplier};
use crate::table::RawTable;

/// Source → target column pairs, per target table
pub const PRODUCT_COLUMNS: &[(&str, &str)] = &[
    ("Product type", "product_type"),
    ("SKU", "sku"),
    ("Price", "price"),
    ("Availability", "availability"),
    ("Stock levels", "stock_levels"),
];

pub const SUPPLIER_COLUMNS: &[(&str, &str)] = &[
    ("Supplier name", "supplier_name"),
    ("Location", "location"),
    ("Lead time", "lead_time"),
];

pub const SALE_COLUMNS: &[(&str, &str)] = &[
    ("SKU", "sku"),
    ("Number of products sold", "products_sold"),
    ("Revenue generated", "revenue_generated"),
    ("Customer demographics", "customer_demographics"),
];

pub const LOGISTICS_COLUMNS: &[(&str, &str)] = &[
    ("SKU", "sku"),
    ("Shipping times", "shipping_times"),
    ("Shipping carriers", "shipping_carrier"),
    ("Shipping costs", "shipping_costs"),
    ("Transportation modes", "transportation_mode"),
    ("Routes", "route"),
    ("Costs", "total_costs"),
];

pub const PRODUCTION_COLUMNS: &[(&str, &str)] = &[
    ("SKU", "sku"),
    ("Production volumes", "production_volumes"),
    ("Manufacturing lead time", "manufacturing_lead_time"),
    ("Manufacturing costs", "manufacturing_costs"),
    ("Inspection results", "inspection_results"),
    ("Defect rates", "defect_rates"),
];

/// The five normalized row sets produced from one flat table
#[derive(Debug, Clone, Default)]
pub struct NormalizedTables {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub sales: Vec<Sale>,
    pub logistics: Vec<Logistics>,
    pub production: Vec<Production>,
}

/// Split the flat table into the five normalized tables.
///
/// Fails with [`PipelineError::Parse`] naming the column and row when a
/// source column is missing or a numeric cell does not parse.
pub fn transform(raw: &RawTable) -> Result<NormalizedTables, PipelineError> {
    let mut tables = NormalizedTables::default();

    let mut seen_skus = HashSet::new();
    let mut seen_suppliers = HashSet::new();

    for row in 0..raw.len() {
        let sku = text_cell(raw, row, "SKU")?;

        // products: first occurrence per SKU wins
        if seen_skus.insert(sku.clone()) {
            tables.products.push(Product {
                product_type: text_cell(raw, row, "Product type")?,
                sku: sku.clone(),
                price: float_cell(raw, row, "Price")?,
                availability: int_cell(raw, row, "Availability")?,
                stock_levels: int_cell(raw, row, "Stock levels")?,
            });
        }

        // suppliers: first occurrence per name wins
        let supplier_name = text_cell(raw, row, "Supplier name")?;
        if seen_suppliers.insert(supplier_name.clone()) {
            tables.suppliers.push(Supplier {
                supplier_name,
                location: text_cell(raw, row, "Location")?,
                lead_time: int_cell(raw, row, "Lead time")?,
            });
        }

        tables.sales.push(Sale {
            sku: sku.clone(),
            products_sold: int_cell(raw, row, "Number of products sold")?,
            revenue_generated: float_cell(raw, row, "Revenue generated")?,
            customer_demographics: text_cell(raw, row, "Customer demographics")?,
        });

        tables.logistics.push(Logistics {
            sku: sku.clone(),
            shipping_times: int_cell(raw, row, "Shipping times")?,
            shipping_carrier: text_cell(raw, row, "Shipping carriers")?,
            shipping_costs: float_cell(raw, row, "Shipping costs")?,
            transportation_mode: text_cell(raw, row, "Transportation modes")?,
            route: text_cell(raw, row, "Routes")?,
            total_costs: float_cell(raw, row, "Costs")?,
        });

        tables.production.push(Production {
            sku,
            production_volumes: int_cell(raw, row, "Production volumes")?,
            manufacturing_lead_time: int_cell(raw, row, "Manufacturing lead time")?,
            manufacturing_costs: float_cell(raw, row, "Manufacturing costs")?,
            inspection_results: text_cell(raw, row, "Inspection results")?,
            defect_rates: float_cell(raw, row, "Defect rates")?,
        });
    }

    Ok(tables)
}

fn text_cell(raw: &RawTable, row: usize, column: &str) -> Result<String, PipelineError> {
    raw.value(row, column)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            PipelineError::parse(
                format!("column '{}', row {}", column, row + 1),
                "source column not found",
            )
        })
}

fn int_cell(raw: &RawTable, row: usize, column: &str) -> Result<i32, PipelineError> {
    let cell = text_cell(raw, row, column)?;
    cell.parse::<i32>().map_err(|_| {
        PipelineError::parse(
            format!("column '{}', row {}", column, row + 1),
            format!("'{}' is not an integer", cell),
        )
    })
}

fn float_cell(raw: &RawTable, row: usize, column: &str) -> Result<f64, PipelineError> {
    let cell = text_cell(raw, row, column)?;
    cell.parse::<f64>().map_err(|_| {
        PipelineError::parse(
            format!("column '{}', row {}", column, row + 1),
            format!("'{}' is not a number", cell),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_HEADERS: &[&str] = &[
        "Product type",
        "SKU",
        "Price",
        "Availability",
        "Number of products sold",
        "Revenue generated",
        "Customer demographics",
        "Stock levels",
        "Lead time",
        "Supplier name",
        "Location",
        "Production volumes",
        "Manufacturing lead time",
        "Manufacturing costs",
        "Inspection results",
        "Defect rates",
        "Transportation modes",
        "Routes",
        "Costs",
        "Shipping times",
        "Shipping carriers",
        "Shipping costs",
    ];

    #[allow(clippy::too_many_arguments)]
    fn source_row(
        product_type: &str,
        sku: &str,
        supplier: &str,
        sold: i32,
        stock: i32,
        mode: &str,
        carrier: &str,
        shipping_time: i32,
    ) -> Vec<String> {
        vec![
            product_type.into(),
            sku.into(),
            "69.81".into(),
            "55".into(),
            sold.to_string(),
            "8662.0".into(),
            "Non-binary".into(),
            stock.to_string(),
            "7".into(),
            supplier.into(),
            "Mumbai".into(),
            "215".into(),
            "29".into(),
            "46.28".into(),
            "Pending".into(),
            "0.23".into(),
            mode.into(),
            "Route B".into(),
            "187.75".into(),
            shipping_time.to_string(),
            carrier.into(),
            "2.96".into(),
        ]
    }

    fn sample_table() -> RawTable {
        let mut table = RawTable::new(SOURCE_HEADERS.iter().copied());
        table
            .push_row(source_row("haircare", "SKU0", "Supplier 3", 802, 58, "Air", "Carrier B", 4))
            .unwrap();
        table
            .push_row(source_row("skincare", "SKU1", "Supplier 3", 736, 53, "Road", "Carrier A", 2))
            .unwrap();
        // repeated SKU and supplier: dedup targets collapse, per-record targets keep
        table
            .push_row(source_row("haircare", "SKU0", "Supplier 1", 8, 100, "Air", "Carrier B", 6))
            .unwrap();
        table
    }

    #[test]
    fn test_products_deduplicated_by_sku() {
        let tables = transform(&sample_table()).unwrap();

        assert_eq!(tables.products.len(), 2);
        let skus: Vec<&str> = tables.products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["SKU0", "SKU1"]);
        // first occurrence wins
        assert_eq!(tables.products[0].stock_levels, 58);
    }

    #[test]
    fn test_suppliers_deduplicated_by_name() {
        let tables = transform(&sample_table()).unwrap();

        let names: Vec<&str> = tables
            .suppliers
            .iter()
            .map(|s| s.supplier_name.as_str())
            .collect();
        assert_eq!(names, vec!["Supplier 3", "Supplier 1"]);
    }

    #[test]
    fn test_per_record_tables_keep_every_row() {
        let tables = transform(&sample_table()).unwrap();

        assert_eq!(tables.sales.len(), 3);
        assert_eq!(tables.logistics.len(), 3);
        assert_eq!(tables.production.len(), 3);
        assert_eq!(tables.sales[2].sku, "SKU0");
        assert_eq!(tables.sales[2].products_sold, 8);
    }

    #[test]
    fn test_deterministic() {
        let table = sample_table();
        let first = transform(&table).unwrap();
        let second = transform(&table).unwrap();

        assert_eq!(first.products, second.products);
        assert_eq!(first.sales, second.sales);
    }

    #[test]
    fn test_missing_source_column() {
        let mut table = RawTable::new(["SKU", "Price"]);
        table
            .push_row(vec!["SKU0".into(), "69.81".into()])
            .unwrap();

        let err = transform(&table).unwrap_err();
        match err {
            PipelineError::Parse { context, .. } => {
                assert!(context.contains("Product type"));
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_numeric_cell() {
        let mut table = RawTable::new(SOURCE_HEADERS.iter().copied());
        let mut row = source_row("haircare", "SKU0", "Supplier 3", 1, 1, "Air", "Carrier B", 4);
        row[2] = "not-a-price".into();
        table.push_row(row).unwrap();

        let err = transform(&table).unwrap_err();
        match err {
            PipelineError::Parse { context, reason } => {
                assert!(context.contains("Price"));
                assert!(reason.contains("not-a-price"));
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }
}
