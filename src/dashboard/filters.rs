//! Categorical filters over the metric row set.
//!
//! Three independent dropdown filters (product category, shipping carrier,
//! transportation mode), each defaulting to `ALL` which disables it. Rows
//! whose field is unknown (missing join) only survive the `ALL` setting.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricRow;

/// Sentinel filter value meaning "no filtering on this dimension"
pub const ALL: &str = "ALL";

/// The three dashboard filter selections, as sent by the page
#[derive(Debug, Clone, Deserialize)]
pub struct FilterParams {
    #[serde(default = "all_value")]
    pub category: String,
    #[serde(default = "all_value")]
    pub carrier: String,
    #[serde(default = "all_value")]
    pub transport: String,
}

fn all_value() -> String {
    ALL.to_string()
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            category: all_value(),
            carrier: all_value(),
            transport: all_value(),
        }
    }
}

impl FilterParams {
    pub fn matches(&self, row: &MetricRow) -> bool {
        dimension_matches(&self.category, row.product_type.as_deref())
            && dimension_matches(&self.carrier, row.shipping_carrier.as_deref())
            && dimension_matches(&self.transport, row.transportation_mode.as_deref())
    }
}

fn dimension_matches(selected: &str, value: Option<&str>) -> bool {
    selected == ALL || value == Some(selected)
}

/// Rows surviving the current filter selections
pub fn apply<'a>(rows: &'a [MetricRow], filters: &FilterParams) -> Vec<&'a MetricRow> {
    rows.iter().filter(|row| filters.matches(row)).collect()
}

/// Distinct values per filter dimension, for populating the dropdowns
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub carriers: Vec<String>,
    pub transport_modes: Vec<String>,
}

pub fn filter_options(rows: &[MetricRow]) -> FilterOptions {
    FilterOptions {
        categories: distinct(rows, |row| row.product_type.as_deref()),
        carriers: distinct(rows, |row| row.shipping_carrier.as_deref()),
        transport_modes: distinct(rows, |row| row.transportation_mode.as_deref()),
    }
}

fn distinct<F>(rows: &[MetricRow], field: F) -> Vec<String>
where
    F: Fn(&MetricRow) -> Option<&str>,
{
    let mut values: Vec<String> = rows
        .iter()
        .filter_map(|row| field(row).map(|v| v.to_string()))
        .collect();
    values.sort();
    values.dedup();
    values
}
