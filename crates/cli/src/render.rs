use stockdash_core::domain::dashboard::{ChartSeries, DashboardView, MetricTable, QuoteMetric};

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    render_header(&mut out, view);
    render_quote_strip(&mut out, &view.quote_strip);
    for table in &view.tables {
        render_table(&mut out, table);
    }
    render_chart_bank(&mut out, "Valuation Metrics", &view.valuation_charts);
    render_chart_bank(&mut out, "Growth Metrics", &view.growth_charts);

    out
}

fn render_header(out: &mut String, view: &DashboardView) {
    match &view.profile {
        Some(profile) => {
            out.push_str(&format!("{}  {}\n", view.ticker, profile.company_name));
            let sector_line = [profile.sector.as_deref(), profile.industry.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" / ");
            if !sector_line.is_empty() {
                out.push_str(&sector_line);
                out.push('\n');
            }
            if let Some(description) = &profile.description {
                out.push_str(description);
                out.push('\n');
            }
        }
        None => {
            out.push_str(&view.ticker);
            out.push('\n');
        }
    }
    out.push('\n');
}

fn render_quote_strip(out: &mut String, strip: &[QuoteMetric]) {
    if strip.is_empty() {
        return;
    }

    let width = strip.iter().map(|m| m.label.len()).max().unwrap_or(0);
    for metric in strip {
        out.push_str(&format!("{:width$}  {}\n", metric.label, metric.value));
    }
    out.push('\n');
}

fn render_table(out: &mut String, table: &MetricTable) {
    out.push_str(&table.title);
    out.push('\n');

    let width = table.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in &table.rows {
        out.push_str(&format!("  {:width$}  {}\n", row.label, row.value));
    }
    out.push('\n');
}

fn render_chart_bank(out: &mut String, title: &str, charts: &[ChartSeries]) {
    // A bank with no values at all renders nothing rather than a bare header.
    if charts.iter().all(|c| c.points.is_empty() && c.ttm.is_none()) {
        return;
    }

    out.push_str(title);
    out.push('\n');

    let width = charts.iter().map(|c| c.title.len()).max().unwrap_or(0);
    for chart in charts {
        if chart.points.is_empty() && chart.ttm.is_none() {
            continue;
        }

        let mut cells: Vec<String> = chart
            .points
            .iter()
            .map(|p| format!("{} {:.2}", p.label, p.value))
            .collect();
        if let Some(ttm) = chart.ttm {
            cells.push(format!("TTM {ttm:.2}"));
        }

        out.push_str(&format!("  {:width$}  {}\n", chart.title, cells.join(" | ")));
    }
    out.push('\n');
}
