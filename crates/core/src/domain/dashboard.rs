use crate::domain::stock::{
    CompanyProfile, GrowthMetrics, KeyMetrics, KeyMetricsTtm, Quote, Rating, StockData,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub ticker: String,
    pub generated_at: DateTime<Utc>,
    pub profile: Option<ProfileCard>,
    pub quote_strip: Vec<QuoteMetric>,
    pub tables: Vec<MetricTable>,
    pub valuation_charts: Vec<ChartSeries>,
    pub growth_charts: Vec<ChartSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCard {
    pub company_name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteMetric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricTable {
    pub title: String,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
    // Trailing-twelve-month value overlaid on the annual history.
    pub ttm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

type MetricOf = fn(&KeyMetrics) -> Option<f64>;
type TtmOf = fn(&KeyMetricsTtm) -> Option<f64>;
type GrowthOf = fn(&GrowthMetrics) -> Option<f64>;

const VALUATION_SERIES: [(&str, MetricOf, TtmOf); 6] = [
    ("Rev/Share", |m| m.rev_per_share, |t| t.rev_per_share_ttm),
    ("PE Ratio", |m| m.pe_ratio, |t| t.pe_ratio_ttm),
    ("FCF/Share", |m| m.fcf_per_share, |t| t.fcf_per_share_ttm),
    ("EV/EBITDA", |m| m.ev_over_ebitda, |t| t.ev_over_ebitda_ttm),
    ("EV/FCF", |m| m.ev_to_fcf, |t| t.ev_to_fcf_ttm),
    ("FCF Yield", |m| m.fcf_yield, |t| t.fcf_yield_ttm),
];

const GROWTH_SERIES: [(&str, GrowthOf); 5] = [
    ("Rev Growth", |g| g.rev_growth),
    ("EPS Growth", |g| g.eps_growth),
    ("DPS Growth", |g| g.dps_growth),
    ("FCF Growth", |g| g.fcf_growth),
    ("Debt Growth", |g| g.debt_growth),
];

impl DashboardView {
    // Reshapes a validated record set for display. Every lookup is defensive:
    // validated sections may legitimately be empty lists, and optional fields
    // render as "N/A" rather than dropping their row.
    pub fn build(ticker: &str, data: &StockData) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            generated_at: Utc::now(),
            profile: data.profile.first().map(ProfileCard::from_profile),
            quote_strip: data.quote.first().map(quote_strip).unwrap_or_default(),
            tables: metric_tables(data),
            valuation_charts: valuation_charts(&data.key_metrics, data.key_metrics_ttm.first()),
            growth_charts: growth_charts(&data.growth),
        }
    }
}

impl ProfileCard {
    fn from_profile(profile: &CompanyProfile) -> Self {
        Self {
            company_name: profile.company_name.clone(),
            sector: profile.sector.clone(),
            industry: profile.industry.clone(),
            description: profile.description.clone(),
            image: profile.image.clone(),
        }
    }
}

fn quote_strip(quote: &Quote) -> Vec<QuoteMetric> {
    vec![
        strip_metric("Price", Some(fmt_usd(quote.price))),
        strip_metric("Change Percent", quote.change_percent.map(fmt_percent)),
        strip_metric("52w Low", Some(fmt_usd(quote.year_low))),
        strip_metric("52w High", Some(fmt_usd(quote.year_high))),
        strip_metric("Avg Volume", quote.vol_avg.map(fmt_millions)),
        strip_metric("Market Cap", Some(fmt_billions(quote.market_cap))),
        strip_metric("EPS", quote.eps.map(fmt_number)),
        strip_metric("Shares", Some(fmt_billions(quote.shares_outstanding))),
        strip_metric(
            "Earning Date",
            Some(quote.earning_date.chars().take(10).collect()),
        ),
    ]
}

fn metric_tables(data: &StockData) -> Vec<MetricTable> {
    let quote = data.quote.first();
    let ttm = data.key_metrics_ttm.first();
    let growth = latest_growth(&data.growth);
    let rating = latest_rating(&data.ratings);

    vec![
        MetricTable {
            title: "Valuation".to_string(),
            rows: vec![
                row("PE Ratio (TTM)", quote.and_then(|q| q.pe).map(fmt_thousands)),
                row(
                    "EV/EBITDA (TTM)",
                    ttm.and_then(|t| t.ev_over_ebitda_ttm).map(fmt_thousands),
                ),
                row(
                    "Price/Sales (TTM)",
                    ttm.and_then(|t| t.pts_ratio_ttm).map(fmt_thousands),
                ),
                row(
                    "Price/Book (TTM)",
                    ttm.and_then(|t| t.ptb_ratio_ttm).map(fmt_thousands),
                ),
            ],
        },
        MetricTable {
            title: "Cash Flow".to_string(),
            rows: vec![
                row(
                    "FCF Yield (TTM)",
                    ttm.and_then(|t| t.fcf_yield_ttm)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
                row(
                    "Price/FCF (TTM)",
                    ttm.and_then(|t| t.pfcf_ratio_ttm).map(fmt_thousands),
                ),
                row(
                    "EV/FCF (TTM)",
                    ttm.and_then(|t| t.ev_to_fcf_ttm).map(fmt_thousands),
                ),
                row(
                    "FCF/Share (TTM)",
                    ttm.and_then(|t| t.fcf_per_share_ttm).map(fmt_thousands),
                ),
            ],
        },
        MetricTable {
            title: "Growth".to_string(),
            rows: vec![
                row(
                    "5Y Rev Growth/Share",
                    growth
                        .and_then(|g| g.five_y_rev_growth_per_share)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
                row(
                    "5Y NI Growth/Share",
                    growth
                        .and_then(|g| g.five_y_ni_growth_per_share)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
                row(
                    "5Y Div Growth/Share",
                    growth
                        .and_then(|g| g.five_y_dps_growth_per_share)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
                row(
                    "5Y OCF Growth/Share",
                    growth
                        .and_then(|g| g.five_y_opcf_growth_per_share)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
            ],
        },
        MetricTable {
            title: "Dividend".to_string(),
            rows: vec![
                // Already percentage-scaled on the provider side.
                row(
                    "Div Yield (TTM)",
                    ttm.and_then(|t| t.dvd_yield_pct_ttm).map(fmt_percent),
                ),
                row(
                    "Div/Share (TTM)",
                    ttm.and_then(|t| t.dvd_per_share_ttm).map(fmt_thousands),
                ),
                row(
                    "Payout Ratio (TTM)",
                    ttm.and_then(|t| t.payout_ratio_ttm)
                        .map(|v| fmt_percent(v * 100.0)),
                ),
            ],
        },
        MetricTable {
            title: "Rating".to_string(),
            rows: vec![
                row("Date", rating.map(|r| r.date.clone())),
                row("Rating", rating.map(|r| r.rating.clone())),
                row("Score", rating.map(|r| r.score.to_string())),
                row("Recommendation", rating.map(|r| r.recommendation.clone())),
            ],
        },
    ]
}

fn valuation_charts(key_metrics: &[KeyMetrics], ttm: Option<&KeyMetricsTtm>) -> Vec<ChartSeries> {
    let mut history: Vec<&KeyMetrics> = key_metrics.iter().collect();
    history.sort_by_key(|m| sort_key(&m.date));

    VALUATION_SERIES
        .iter()
        .map(|&(title, value_of, ttm_of)| {
            let points = history
                .iter()
                .copied()
                .filter_map(|m| {
                    value_of(m).map(|value| ChartPoint {
                        label: year_label(&m.date),
                        value,
                    })
                })
                .collect();
            ChartSeries {
                title: title.to_string(),
                points,
                ttm: ttm.and_then(ttm_of),
            }
        })
        .collect()
}

fn growth_charts(growth: &[GrowthMetrics]) -> Vec<ChartSeries> {
    let mut history: Vec<&GrowthMetrics> = growth.iter().collect();
    history.sort_by_key(|g| sort_key(&g.date));

    GROWTH_SERIES
        .iter()
        .map(|&(title, value_of)| {
            let points = history
                .iter()
                .copied()
                .filter_map(|g| {
                    value_of(g).map(|value| ChartPoint {
                        label: year_label(&g.date),
                        value: round2(value * 100.0),
                    })
                })
                .collect();
            ChartSeries {
                title: title.to_string(),
                points,
                ttm: None,
            }
        })
        .collect()
}

// The provider serves records newest-first, but that ordering is not part of
// its contract; latest-record picks and chart ordering go by the date field.
fn latest_growth(records: &[GrowthMetrics]) -> Option<&GrowthMetrics> {
    records.iter().max_by_key(|g| sort_key(&g.date))
}

fn latest_rating(records: &[Rating]) -> Option<&Rating> {
    records.iter().max_by_key(|r| sort_key(&r.date))
}

fn sort_key(date: &str) -> (Option<NaiveDate>, String) {
    (parse_date(date), date.to_string())
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn year_label(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%Y").to_string(),
        None => date.to_string(),
    }
}

fn strip_metric(label: &str, value: Option<String>) -> QuoteMetric {
    QuoteMetric {
        label: label.to_string(),
        value: value.unwrap_or_else(|| "N/A".to_string()),
    }
}

fn row(label: &str, value: Option<String>) -> TableRow {
    TableRow {
        label: label.to_string(),
        value: value.unwrap_or_else(|| "N/A".to_string()),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn fmt_usd(value: f64) -> String {
    format!("${}", fmt_thousands(value))
}

fn fmt_percent(value: f64) -> String {
    format!("{}%", fmt_thousands(value))
}

fn fmt_millions(value: f64) -> String {
    format!("{:.2}M", value / 1_000_000.0)
}

fn fmt_billions(value: f64) -> String {
    format!("{:.2}B", value / 1_000_000_000.0)
}

fn fmt_number(value: f64) -> String {
    format!("{value:.2}")
}

// Two decimals with comma-grouped thousands, e.g. 2750.5 -> "2,750.50".
fn fmt_thousands(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let Some((int_part, frac_part)) = formatted.split_once('.') else {
        // NaN and infinities have no decimal point; pass them through.
        return formatted;
    };

    let digits = int_part.trim_start_matches('-');
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if int_part.starts_with('-') { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> StockData {
        serde_json::from_value(json!({
            "profile": [{
                "symbol": "AAPL",
                "beta": 1.28,
                "range": "124.17-198.23",
                "company_name": "Apple Inc.",
                "sector": "Technology",
                "industry": "Consumer Electronics",
                "description": "Apple Inc. designs smartphones.",
                "image": "https://example.com/AAPL.png"
            }],
            "quote": [{
                "symbol": "AAPL",
                "price": 175.84,
                "change_percent": 0.75,
                "year_high": 198.23,
                "year_low": 124.17,
                "market_cap": 2750000000000.0_f64,
                "vol_avg": 55000000,
                "eps": 6.13,
                "pe": 28.7,
                "earning_date": "2024-01-25T21:00:00.000+0000",
                "shares_outstanding": 15600000000.0_f64
            }],
            "ratings": [
                {
                    "symbol": "AAPL", "date": "2023-06-01", "rating": "A",
                    "score": 4, "recommendation": "Buy",
                    "dcf_score": 4, "dcf_rec": "Buy",
                    "roe_score": 4, "roe_rec": "Buy",
                    "roa_score": 4, "roa_rec": "Buy",
                    "de_score": 4, "de_rec": "Buy",
                    "pe_score": 4, "pe_rec": "Buy",
                    "pb_score": 4, "pb_rec": "Buy"
                },
                {
                    "symbol": "AAPL", "date": "2024-01-25", "rating": "S",
                    "score": 5, "recommendation": "Strong Buy",
                    "dcf_score": 5, "dcf_rec": "Strong Buy",
                    "roe_score": 5, "roe_rec": "Strong Buy",
                    "roa_score": 4, "roa_rec": "Buy",
                    "de_score": 5, "de_rec": "Strong Buy",
                    "pe_score": 2, "pe_rec": "Sell",
                    "pb_score": 1, "pb_rec": "Strong Sell"
                }
            ],
            "key_metrics_ttm": [{
                "rev_per_share_ttm": 24.34,
                "net_income_per_share_ttm": 6.38,
                "fcf_per_share_ttm": 6.54,
                "pe_ratio_ttm": 28.7,
                "ev_over_ebitda_ttm": 22.16,
                "ev_to_fcf_ttm": 27.05,
                "fcf_yield_ttm": 0.0369,
                "pts_ratio_ttm": 7.22,
                "ptb_ratio_ttm": 44.14,
                "pfcf_ratio_ttm": 26.87,
                "dvd_yield_pct_ttm": 0.54,
                "dvd_per_share_ttm": 0.96,
                "payout_ratio_ttm": 0.1547
            }],
            "key_metrics": [
                {
                    "symbol": "AAPL", "date": "2021-09-30",
                    "rev_per_share": 21.9, "fcf_per_share": 5.57,
                    "pe_ratio": 26.2, "ev_over_ebitda": 20.5,
                    "ev_to_fcf": 26.4, "fcf_yield": 0.0398
                },
                {
                    "symbol": "AAPL", "date": "2019-09-30",
                    "rev_per_share": 14.1, "fcf_per_share": 3.2,
                    "pe_ratio": 20.8, "ev_over_ebitda": 14.8,
                    "ev_to_fcf": 19.5, "fcf_yield": 0.0521
                },
                {
                    "symbol": "AAPL", "date": "2020-09-30",
                    "rev_per_share": 15.7, "fcf_per_share": 4.2,
                    "pe_ratio": 34.3, "ev_over_ebitda": 25.2,
                    "ev_to_fcf": 28.1, "fcf_yield": 0.0354
                }
            ],
            "growth": [
                {
                    "symbol": "AAPL", "date": "2023-09-30",
                    "rev_growth": -0.0280, "eps_growth": 0.0005,
                    "dps_growth": 0.0435, "fcf_growth": -0.0656,
                    "debt_growth": -0.0445,
                    "five_y_rev_growth_per_share": 0.8102,
                    "five_y_ni_growth_per_share": 1.0152,
                    "five_y_dps_growth_per_share": 0.4843,
                    "five_y_opcf_growth_per_share": 0.8124
                },
                {
                    "symbol": "AAPL", "date": "2022-09-30",
                    "rev_growth": 0.0779, "eps_growth": 0.0889,
                    "dps_growth": 0.0566, "fcf_growth": 0.1989,
                    "debt_growth": -0.0045,
                    "five_y_rev_growth_per_share": 0.7513,
                    "five_y_ni_growth_per_share": 1.2461,
                    "five_y_dps_growth_per_share": 0.5080,
                    "five_y_opcf_growth_per_share": 0.7901
                }
            ]
        }))
        .unwrap()
    }

    fn empty_data() -> StockData {
        StockData {
            profile: Vec::new(),
            quote: Vec::new(),
            ratings: Vec::new(),
            key_metrics_ttm: Vec::new(),
            key_metrics: Vec::new(),
            growth: Vec::new(),
        }
    }

    #[test]
    fn formats_grouped_dollar_amounts() {
        assert_eq!(fmt_thousands(175.84), "175.84");
        assert_eq!(fmt_thousands(2750.5), "2,750.50");
        assert_eq!(fmt_thousands(1234567.891), "1,234,567.89");
        assert_eq!(fmt_thousands(-1234.5), "-1,234.50");
        assert_eq!(fmt_thousands(999.999), "1,000.00");
        assert_eq!(fmt_usd(175.84), "$175.84");
    }

    #[test]
    fn builds_quote_strip_in_display_order() {
        let view = DashboardView::build("aapl", &sample_data());

        let labels: Vec<&str> = view.quote_strip.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Price",
                "Change Percent",
                "52w Low",
                "52w High",
                "Avg Volume",
                "Market Cap",
                "EPS",
                "Shares",
                "Earning Date"
            ]
        );

        let values: Vec<&str> = view.quote_strip.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values[0], "$175.84");
        assert_eq!(values[1], "0.75%");
        assert_eq!(values[4], "55.00M");
        assert_eq!(values[5], "2750.00B");
        assert_eq!(values[7], "15.60B");
        assert_eq!(values[8], "2024-01-25");

        assert_eq!(view.ticker, "AAPL");
    }

    #[test]
    fn renders_placeholders_for_missing_optionals() {
        let mut data = sample_data();
        data.quote[0].change_percent = None;
        data.quote[0].eps = None;
        data.quote[0].vol_avg = None;

        let view = DashboardView::build("AAPL", &data);
        let by_label = |label: &str| {
            view.quote_strip
                .iter()
                .find(|m| m.label == label)
                .map(|m| m.value.clone())
        };

        assert_eq!(by_label("Change Percent").as_deref(), Some("N/A"));
        assert_eq!(by_label("EPS").as_deref(), Some("N/A"));
        assert_eq!(by_label("Avg Volume").as_deref(), Some("N/A"));
        assert_eq!(by_label("Price").as_deref(), Some("$175.84"));
    }

    #[test]
    fn builds_the_five_metric_tables() {
        let view = DashboardView::build("AAPL", &sample_data());

        let titles: Vec<&str> = view.tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Valuation", "Cash Flow", "Growth", "Dividend", "Rating"]
        );

        let valuation = &view.tables[0];
        assert_eq!(valuation.rows[0].label, "PE Ratio (TTM)");
        assert_eq!(valuation.rows[0].value, "28.70");

        let cash_flow = &view.tables[1];
        assert_eq!(cash_flow.rows[0].label, "FCF Yield (TTM)");
        assert_eq!(cash_flow.rows[0].value, "3.69%");

        let growth = &view.tables[2];
        assert_eq!(growth.rows[0].value, "81.02%");

        let dividend = &view.tables[3];
        assert_eq!(dividend.rows[0].value, "0.54%");
        assert_eq!(dividend.rows[2].value, "15.47%");
    }

    #[test]
    fn picks_the_latest_rating_by_date_not_position() {
        // sample_data lists the older rating first.
        let view = DashboardView::build("AAPL", &sample_data());
        let rating = &view.tables[4];

        assert_eq!(rating.rows[0].value, "2024-01-25");
        assert_eq!(rating.rows[1].value, "S");
        assert_eq!(rating.rows[2].value, "5");
        assert_eq!(rating.rows[3].value, "Strong Buy");
    }

    #[test]
    fn sorts_valuation_chart_points_by_year() {
        let view = DashboardView::build("AAPL", &sample_data());

        assert_eq!(view.valuation_charts.len(), 6);
        let rev = &view.valuation_charts[0];
        assert_eq!(rev.title, "Rev/Share");

        let labels: Vec<&str> = rev.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2019", "2020", "2021"]);
        assert_eq!(rev.points[0].value, 14.1);
        assert_eq!(rev.ttm, Some(24.34));
    }

    #[test]
    fn scales_growth_chart_values_to_percent() {
        let view = DashboardView::build("AAPL", &sample_data());

        assert_eq!(view.growth_charts.len(), 5);
        let rev_growth = &view.growth_charts[0];
        assert_eq!(rev_growth.title, "Rev Growth");

        // Sorted ascending by date: 2022 then 2023, values scaled x100.
        assert_eq!(rev_growth.points[0].value, 7.79);
        assert_eq!(rev_growth.points[1].value, -2.8);
        assert!(rev_growth.ttm.is_none());
    }

    #[test]
    fn skips_chart_points_for_missing_values() {
        let mut data = sample_data();
        data.key_metrics[1].rev_per_share = None; // the 2019 record

        let view = DashboardView::build("AAPL", &data);
        let labels: Vec<&str> = view.valuation_charts[0]
            .points
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["2020", "2021"]);
    }

    #[test]
    fn builds_a_degraded_view_from_empty_sections() {
        let view = DashboardView::build("ZZZZ", &empty_data());

        assert!(view.profile.is_none());
        assert!(view.quote_strip.is_empty());
        assert_eq!(view.tables.len(), 5);
        assert!(view
            .tables
            .iter()
            .flat_map(|t| &t.rows)
            .all(|r| r.value == "N/A"));
        assert!(view.valuation_charts.iter().all(|c| c.points.is_empty()));
        assert!(view.growth_charts.iter().all(|c| c.points.is_empty()));
    }
}
