use crate::domain::stock::{
    CompanyProfile, GrowthMetrics, KeyMetrics, KeyMetricsTtm, Quote, Rating, StockData,
};
use crate::ingest::error::StockDataError;
use crate::ingest::types::{MetricKind, RecordSet};
use serde::de::DeserializeOwned;
use serde_json::Value;

// All-or-nothing: every record of every section is checked and the problems
// are reported together, so a caller never sees a partially validated set.
pub fn validate_records(records: &RecordSet) -> Result<StockData, StockDataError> {
    let mut problems = Vec::new();

    let profile = validate_section::<CompanyProfile>(records, MetricKind::Profile, &mut problems);
    let quote = validate_section::<Quote>(records, MetricKind::Quote, &mut problems);
    let ratings = validate_section::<Rating>(records, MetricKind::Rating, &mut problems);
    let key_metrics_ttm =
        validate_section::<KeyMetricsTtm>(records, MetricKind::KeyMetricsTtm, &mut problems);
    let key_metrics =
        validate_section::<KeyMetrics>(records, MetricKind::KeyMetrics, &mut problems);
    let growth =
        validate_section::<GrowthMetrics>(records, MetricKind::FinancialGrowth, &mut problems);

    if !problems.is_empty() {
        return Err(StockDataError::Validation { problems });
    }

    Ok(StockData {
        profile,
        quote,
        ratings,
        key_metrics_ttm,
        key_metrics,
        growth,
    })
}

fn validate_section<T: DeserializeOwned>(
    records: &RecordSet,
    kind: MetricKind,
    problems: &mut Vec<String>,
) -> Vec<T> {
    let name = kind.canonical_name();

    let Some(payload) = records.section(kind) else {
        problems.push(format!("{name}: endpoint returned no usable data"));
        return Vec::new();
    };

    let Value::Array(rows) = payload else {
        problems.push(format!("{name}: expected a JSON array of records"));
        return Vec::new();
    };

    let mut out = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        match serde_json::from_value::<T>(row.clone()) {
            Ok(record) => out.push(record),
            Err(err) => problems.push(format!("{name}[{idx}]: {err}")),
        }
    }
    out
}
