//! KPI and chart aggregation over the filtered metric rows.
//!
//! Every aggregate degrades to zero/empty on a degenerate filtered set; no
//! division ever reaches a zero denominator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dashboard::filters::{self, FilterParams};
use crate::metrics::MetricRow;

/// The four KPI card values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_units_sold: i64,
    /// Share of filtered rows with `otif = true`, in percent; 0 on an empty set
    pub otif_pct: f64,
    /// Mean defect rate over rows where it is known; 0 when none are
    pub avg_defect_rate: f64,
}

/// Labels and values for one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Everything the page needs for one filter selection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub row_count: usize,
    pub kpis: Kpis,
    pub revenue_by_category: ChartSeries,
    pub otif_pct_by_category: ChartSeries,
    pub avg_shipping_cost_by_carrier: ChartSeries,
    pub avg_defect_rate_by_category: ChartSeries,
}

/// One synchronous recomputation over the full in-memory dataset
pub fn dashboard_view(rows: &[MetricRow], params: &FilterParams) -> DashboardView {
    let filtered = filters::apply(rows, params);

    DashboardView {
        row_count: filtered.len(),
        kpis: kpis(&filtered),
        revenue_by_category: group_sum(&filtered, category, |row| Some(row.revenue_generated)),
        otif_pct_by_category: group_otif_pct(&filtered),
        avg_shipping_cost_by_carrier: group_mean(&filtered, carrier, |row| row.shipping_costs),
        avg_defect_rate_by_category: group_mean(&filtered, category, |row| row.defect_rates),
    }
}

pub fn kpis(filtered: &[&MetricRow]) -> Kpis {
    let total_revenue = filtered.iter().map(|row| row.revenue_generated).sum();
    let total_units_sold = filtered.iter().map(|row| i64::from(row.products_sold)).sum();

    let otif_true = filtered.iter().filter(|row| row.otif == Some(true)).count();
    let otif_pct = percentage(otif_true, filtered.len());

    let known_defects: Vec<f64> = filtered.iter().filter_map(|row| row.defect_rates).collect();
    let avg_defect_rate = mean(&known_defects);

    Kpis {
        total_revenue,
        total_units_sold,
        otif_pct,
        avg_defect_rate,
    }
}

fn category(row: &MetricRow) -> Option<&str> {
    row.product_type.as_deref()
}

fn carrier(row: &MetricRow) -> Option<&str> {
    row.shipping_carrier.as_deref()
}

fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn group_sum<K, V>(filtered: &[&MetricRow], key: K, value: V) -> ChartSeries
where
    K: Fn(&MetricRow) -> Option<&str>,
    V: Fn(&MetricRow) -> Option<f64>,
{
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for &row in filtered {
        if let (Some(label), Some(v)) = (key(row), value(row)) {
            *sums.entry(label.to_string()).or_insert(0.0) += v;
        }
    }
    into_series(sums)
}

fn group_mean<K, V>(filtered: &[&MetricRow], key: K, value: V) -> ChartSeries
where
    K: Fn(&MetricRow) -> Option<&str>,
    V: Fn(&MetricRow) -> Option<f64>,
{
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for &row in filtered {
        if let (Some(label), Some(v)) = (key(row), value(row)) {
            let entry = acc.entry(label.to_string()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    into_series(
        acc.into_iter()
            .map(|(label, (sum, count))| (label, sum / count as f64))
            .collect(),
    )
}

/// OTIF percentage per category; rows with unknown OTIF stay in the
/// denominator of their category
fn group_otif_pct(filtered: &[&MetricRow]) -> ChartSeries {
    let mut acc: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for &row in filtered {
        if let Some(label) = category(row) {
            let entry = acc.entry(label.to_string()).or_insert((0, 0));
            if row.otif == Some(true) {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
    }
    into_series(
        acc.into_iter()
            .map(|(label, (hits, total))| (label, percentage(hits, total)))
            .collect(),
    )
}

fn into_series(groups: BTreeMap<String, f64>) -> ChartSeries {
    let mut labels = Vec::with_capacity(groups.len());
    let mut values = Vec::with_capacity(groups.len());
    for (label, value) in groups {
        labels.push(label);
        values.push(value);
    }
    ChartSeries { labels, values }
}
