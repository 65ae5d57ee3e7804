//! HTML assembly for the report pages.
//!
//! Pages are plain string templates with placeholder substitution; chart
//! data is serialized to JSON and handed to Chart.js on the client. Every
//! decision (which record, which neighbors, which message) was already made
//! by the dataset core; this module only renders.

use serde::Serialize;

use crate::dataset::Neighbors;

/// Shared page shell; `{{TITLE}}`, `{{INNER}}` and `{{NAV}}` are filled in
/// per page.
const PAGE_SHELL: &str = r#"<!doctype html><html><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{TITLE}}</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<style>
body{margin:0;font-family:system-ui,"Segoe UI",Roboto,Arial,sans-serif;background:#0f1115;color:#e6e9f2}
header{background:#151822;padding:12px 0}
header .wrap{max-width:1100px;margin:auto;padding:0 22px}
header .title{font-size:1.2rem;font-weight:600}
main{max-width:1100px;margin:auto;padding:22px}
footer{text-align:center;padding:16px;color:#6b7089}
.grid{display:grid;gap:16px}
.cols-2{grid-template-columns:1fr 1fr}
.card{background:#151822;border-radius:12px;padding:18px}
.heading{margin-top:0}
.muted{color:#9aa0b5}
.nav{margin-top:16px}
.btn{display:inline-block;background:#23283a;color:#e6e9f2;text-decoration:none;padding:8px 12px;border-radius:8px;margin-right:8px}
.btn.primary{background:#7aa2f7;color:#0f1115}
.btn.green{background:#8bd5ca;color:#0f1115}
.btn.red{background:#f38ba8;color:#0f1115}
.portrait{max-width:100%;border-radius:12px}
.minmax-list{margin-top:.5rem;padding-left:1.25rem}
.minmax-list li{margin:.15rem 0;color:#cdd3e1}
@media(max-width:800px){.cols-2{grid-template-columns:1fr}}
</style>
</head><body>
<header><div class="wrap"><div class="title">{{TITLE}}</div></div></header>
<main>
{{INNER}}
<div class="nav">{{NAV}}</div>
</main>
<footer>Drug Use Dynamic Viewer</footer>
</body></html>"#;

/// Chart.js bootstrap for pie charts.
const PIE_SCRIPT: &str = r#"<script>
new Chart(document.getElementById('{{CANVAS}}'), {
  type: 'pie',
  data: {
    labels: {{LABELS}},
    datasets: [{
      label: '{{SERIES}}',
      data: {{DATA}},
      backgroundColor: {{COLORS}},
      borderColor: '#0f1115',
      borderWidth: 2
    }]
  },
  options: { responsive: true, plugins: { legend: { position: 'bottom', labels: { color: '#cdd3e1' } } } }
});
</script>"#;

/// Chart.js bootstrap for bar charts.
const BAR_SCRIPT: &str = r#"<script>
new Chart(document.getElementById('{{CANVAS}}'), {
  type: 'bar',
  data: {
    labels: {{LABELS}},
    datasets: [{
      label: '{{SERIES}}',
      data: {{DATA}},
      backgroundColor: {{COLORS}}
    }]
  },
  options: {
    responsive: true,
    plugins: { legend: { labels: { color: '#cdd3e1' } } },
    scales: {
      x: { ticks: { color: '#cdd3e1' }, grid: { color: 'rgba(255,255,255,0.08)' } },
      y: { ticks: { color: '#cdd3e1' }, grid: { color: 'rgba(255,255,255,0.08)' } }
    }
  }
});
</script>"#;

const PALETTE: &[&str] = &[
    "#7aa2f7", "#8bd5ca", "#ffd166", "#f38ba8", "#cba6f7", "#94e2d5", "#fab387", "#f2cdcd",
    "#b4befe", "#89b4fa", "#74c7ec", "#a6e3a1", "#f9e2af",
];

fn page(title: &str, inner: &str, nav: &str) -> String {
    PAGE_SHELL
        .replace("{{TITLE}}", title)
        .replace("{{INNER}}", inner)
        .replace("{{NAV}}", nav)
}

/// Minimal HTML escaping for interpolated user-supplied text.
fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

fn colors_for(n: usize) -> Vec<&'static str> {
    (0..n).map(|i| PALETTE[i % PALETTE.len()]).collect()
}

fn chart(template: &str, canvas: &str, series: &str, entries: &[(String, f64)]) -> String {
    let labels: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    template
        .replace("{{CANVAS}}", canvas)
        .replace("{{SERIES}}", series)
        .replace("{{LABELS}}", &json(&labels))
        .replace("{{DATA}}", &json(&values))
        .replace("{{COLORS}}", &json(&colors_for(entries.len())))
}

fn nav_row(route: &str, neighbors: &Neighbors, accent: &str) -> String {
    let mut nav = String::new();
    if let Some(prev) = &neighbors.prev {
        nav.push_str(&format!(
            r#"<a class="btn {accent}" href="/{route}/{key}">&larr; Prev</a>"#,
            key = escape(prev)
        ));
    }
    if let Some(next) = &neighbors.next {
        nav.push_str(&format!(
            r#"<a class="btn {accent}" href="/{route}/{key}">Next &rarr;</a>"#,
            key = escape(next)
        ));
    }
    nav.push_str(r#" <a class="btn primary" href="/">Home</a>"#);
    nav
}

fn min_max_list(entries: &[(String, f64)]) -> String {
    let min = entries.iter().min_by(|a, b| a.1.total_cmp(&b.1));
    let max = entries.iter().max_by(|a, b| a.1.total_cmp(&b.1));
    match (min, max) {
        (Some((min_label, min_value)), Some((max_label, max_value))) => format!(
            r#"<ul class="minmax-list">
<li><strong>Minimum:</strong> {min_value}% ({min_label})</li>
<li><strong>Maximum:</strong> {max_value}% ({max_label})</li>
</ul>"#,
            min_label = escape(min_label),
            max_label = escape(max_label),
        ),
        _ => String::new(),
    }
}

/// `alt` is expected to be escaped already.
fn portrait(image: Option<&str>, alt: &str) -> String {
    match image {
        Some(path) => format!(
            r#"<p><img class="portrait" src="/static/img/{path}" alt="{alt}"></p>"#
        ),
        None => String::new(),
    }
}

pub fn home(first_age: &str, first_category: &str) -> String {
    let inner = format!(
        r#"<section class="grid cols-2">
<div class="card" style="text-align:center">
<h2 class="heading">Welcome</h2>
<p class="muted">Explore national substance use data with dynamic, interactive visualizations.</p>
<p>
<a class="btn green" href="/age/{first_age}">Start: By Age</a>
<a class="btn primary" href="/drug_type/{first_category}">Start: By Drug Type</a>
<a class="btn red" href="/drug_frequency/{first_category}">Start: By Frequency</a>
</p>
</div>
<div class="card">
<h3 class="heading">Navigation</h3>
<p class="muted">Each page displays both text and graphical data. Use Prev and Next to move through entries, or return Home anytime.</p>
</div>
</section>"#
    );
    let nav = format!(
        r#"<a class="btn" href="/age/{first_age}">Ages</a><a class="btn" href="/drug_type/{first_category}">Types</a><a class="btn" href="/drug_frequency/{first_category}">Frequencies</a>"#
    );
    page("Drug Use Dynamic Viewer", &inner, &nav)
}

pub fn age(
    key: &str,
    usage: &[(String, f64)],
    image: Option<&str>,
    neighbors: &Neighbors,
) -> String {
    let key = escape(key);
    let title = format!("Age {key}");
    let inner = format!(
        r#"<section class="grid cols-2">
<div class="card">
<h2 class="heading">Age {key} &bull; Weighted Use</h2>
<canvas id="ageChart"></canvas>
</div>
<div class="card">
<h3 class="heading">About this view</h3>
<p class="muted">The pie chart shows weighted drug-use percentages for age {key}. Slice size corresponds to prevalence.</p>
{minmax}
{portrait}
</div>
</section>
{script}"#,
        minmax = min_max_list(usage),
        portrait = portrait(image, &title),
        script = chart(PIE_SCRIPT, "ageChart", "Drug Usage (%)", usage),
    );
    page(&title, &inner, &nav_row("age", neighbors, "green"))
}

pub fn category(
    key: &str,
    usage: &[(String, f64)],
    image: Option<&str>,
    neighbors: &Neighbors,
) -> String {
    let key = escape(key);
    let title = format!("Drug Type {key}");
    let inner = format!(
        r#"<section class="grid cols-2">
<div class="card">
<h2 class="heading">{key} &bull; Usage by Age</h2>
<canvas id="drugChart"></canvas>
</div>
<div class="card">
<h3 class="heading">About this view</h3>
<p class="muted">The pie chart shows the weighted usage of {key} across ages. Larger slices indicate higher prevalence within that age.</p>
{minmax}
{portrait}
</div>
</section>
{script}"#,
        minmax = min_max_list(usage),
        portrait = portrait(image, &title),
        script = chart(PIE_SCRIPT, "drugChart", "Usage by Age (%)", usage),
    );
    page(&title, &inner, &nav_row("drug_type", neighbors, "primary"))
}

pub fn frequency(key: &str, frequencies: &[(String, f64)], neighbors: &Neighbors) -> String {
    let key = escape(key);
    let title = format!("Drug Frequency {key}");
    let inner = format!(
        r#"<section class="card">
<h2 class="heading">Frequency for {key} by Age</h2>
<canvas id="freqChart"></canvas>
</section>
{script}"#,
        script = chart(BAR_SCRIPT, "freqChart", "Median uses per year", frequencies),
    );
    page(&title, &inner, &nav_row("drug_frequency", neighbors, "red"))
}

pub fn error(title: &str, message: &str, route: &str, neighbors: &Neighbors) -> String {
    let inner = format!(
        r#"<section class="card">
<h2 class="heading">Oops</h2>
<p class="muted">{message}</p>
</section>"#,
        message = escape(message),
    );
    page(&escape(title), &inner, &nav_row(route, neighbors, ""))
}

pub fn not_found(path: &str) -> String {
    format!(
        r#"<h1>404 Not Found</h1><p>{path}</p><p><a href="/">Home</a></p>"#,
        path = escape(path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_data_is_embedded_as_json() {
        let usage = vec![("cocaine".to_string(), 2.5), ("alcohol".to_string(), 60.0)];
        let html = age("20", &usage, None, &Neighbors::none());
        assert!(html.contains(r#"["cocaine","alcohol"]"#));
        assert!(html.contains("[2.5,60.0]"));
    }

    #[test]
    fn nav_links_follow_the_neighbors() {
        let neighbors = Neighbors {
            prev: Some("19".to_string()),
            next: None,
        };
        let html = age("20", &[], None, &neighbors);
        assert!(html.contains(r#"href="/age/19""#));
        assert!(!html.contains("Next &rarr;"));
    }

    #[test]
    fn raw_keys_are_escaped() {
        let html = error(
            "Age <script>",
            "No data available for age \"<script>\".",
            "age",
            &Neighbors::none(),
        );
        assert!(!html.contains("<script></script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
