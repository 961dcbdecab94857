//! The dashboard page.
//!
//! One static HTML document: three dropdown filters, a KPI block, and four
//! bar charts. Filter changes re-fetch `/api/dashboard` and redraw; all
//! aggregation happens server-side.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Supply Chain Dashboard</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
<style>
  body { background: #f8f9fa; color: #2c3e50; font-family: sans-serif; margin: 0; padding: 20px; }
  h1 { text-align: center; margin-bottom: 4px; }
  h3 { text-align: center; color: #3498db; margin-top: 0; }
  .filters { display: flex; gap: 3%; margin-bottom: 30px; }
  .filters div { flex: 1; }
  .filters label { font-weight: bold; display: block; margin-bottom: 4px; }
  .filters select { width: 100%; padding: 6px; }
  .kpis { display: flex; gap: 2%; margin-bottom: 30px; }
  .kpi { flex: 1; background: white; border-radius: 10px; padding: 20px; text-align: center; }
  .kpi h4 { margin: 0 0 8px; }
  .kpi h2 { margin: 0; }
  .kpi .revenue { color: #2ecc71; }
  .kpi .units { color: #3498db; }
  .kpi .otif-ok { color: #2ecc71; }
  .kpi .otif-bad { color: #e74c3c; }
  .kpi .defects { color: #f39c12; }
  .charts { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
  .chart { background: white; border-radius: 10px; padding: 16px; }
</style>
</head>
<body>
<h1>Supply Chain Dashboard</h1>
<h3>OTIF delivery analytics</h3>

<div class="filters">
  <div>
    <label for="category">Product category</label>
    <select id="category"><option value="ALL">All</option></select>
  </div>
  <div>
    <label for="carrier">Carrier</label>
    <select id="carrier"><option value="ALL">All</option></select>
  </div>
  <div>
    <label for="transport">Transport mode</label>
    <select id="transport"><option value="ALL">All</option></select>
  </div>
</div>

<div class="kpis">
  <div class="kpi"><h4>Total revenue</h4><h2 class="revenue" id="kpi-revenue">-</h2></div>
  <div class="kpi"><h4>Units sold</h4><h2 class="units" id="kpi-units">-</h2></div>
  <div class="kpi"><h4>OTIF %</h4><h2 id="kpi-otif">-</h2></div>
  <div class="kpi"><h4>Avg defect rate</h4><h2 class="defects" id="kpi-defects">-</h2></div>
</div>

<div class="charts">
  <div class="chart"><canvas id="chart-revenue"></canvas></div>
  <div class="chart"><canvas id="chart-otif"></canvas></div>
  <div class="chart"><canvas id="chart-carrier"></canvas></div>
  <div class="chart"><canvas id="chart-defects"></canvas></div>
</div>

<script>
const charts = {};

function drawChart(id, title, series, color) {
  if (charts[id]) {
    charts[id].data.labels = series.labels;
    charts[id].data.datasets[0].data = series.values;
    charts[id].update();
    return;
  }
  charts[id] = new Chart(document.getElementById(id), {
    type: 'bar',
    data: {
      labels: series.labels,
      datasets: [{ label: title, data: series.values, backgroundColor: color }],
    },
    options: { plugins: { legend: { display: false }, title: { display: true, text: title } } },
  });
}

function selections() {
  return {
    category: document.getElementById('category').value,
    carrier: document.getElementById('carrier').value,
    transport: document.getElementById('transport').value,
  };
}

async function refresh() {
  const params = new URLSearchParams(selections());
  const view = await (await fetch('/api/dashboard?' + params)).json();

  document.getElementById('kpi-revenue').textContent =
    '$' + view.kpis.total_revenue.toLocaleString(undefined, { maximumFractionDigits: 0 });
  document.getElementById('kpi-units').textContent =
    view.kpis.total_units_sold.toLocaleString();
  const otif = document.getElementById('kpi-otif');
  otif.textContent = view.kpis.otif_pct.toFixed(1) + '%';
  otif.className = view.kpis.otif_pct >= 95 ? 'otif-ok' : 'otif-bad';
  document.getElementById('kpi-defects').textContent =
    view.kpis.avg_defect_rate.toFixed(2) + '%';

  drawChart('chart-revenue', 'Revenue by category', view.revenue_by_category, '#3498db');
  drawChart('chart-otif', 'OTIF % by category', view.otif_pct_by_category, '#2ecc71');
  drawChart('chart-carrier', 'Avg shipping cost by carrier', view.avg_shipping_cost_by_carrier, '#e74c3c');
  drawChart('chart-defects', 'Avg defect rate by category', view.avg_defect_rate_by_category, '#f39c12');
}

function populate(select, values) {
  for (const value of values) {
    const option = document.createElement('option');
    option.value = value;
    option.textContent = value;
    select.appendChild(option);
  }
}

async function init() {
  const options = await (await fetch('/api/filters')).json();
  populate(document.getElementById('category'), options.categories);
  populate(document.getElementById('carrier'), options.carriers);
  populate(document.getElementById('transport'), options.transport_modes);

  for (const id of ['category', 'carrier', 'transport']) {
    document.getElementById(id).addEventListener('change', refresh);
  }
  await refresh();
}

init();
</script>
</body>
</html>
"#;
