use crate::ingest::error::StockDataError;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKind {
    Profile,
    Rating,
    Quote,
    KeyMetricsTtm,
    KeyMetrics,
    FinancialGrowth,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Profile,
        MetricKind::Rating,
        MetricKind::Quote,
        MetricKind::KeyMetricsTtm,
        MetricKind::KeyMetrics,
        MetricKind::FinancialGrowth,
    ];

    // URL path segment on the FMP side.
    pub fn path_segment(self) -> &'static str {
        match self {
            MetricKind::Profile => "profile",
            MetricKind::Rating => "rating",
            MetricKind::Quote => "quote",
            MetricKind::KeyMetricsTtm => "key-metrics-ttm",
            MetricKind::KeyMetrics => "key-metrics",
            MetricKind::FinancialGrowth => "financial-growth",
        }
    }

    // Key under which this endpoint's records appear in the assembled set and
    // in serialized output.
    pub fn canonical_name(self) -> &'static str {
        match self {
            MetricKind::Profile => "profile",
            MetricKind::Rating => "ratings",
            MetricKind::Quote => "quote",
            MetricKind::KeyMetricsTtm => "key_metrics_ttm",
            MetricKind::KeyMetrics => "key_metrics",
            MetricKind::FinancialGrowth => "growth",
        }
    }

    // Historical endpoints serve one record per fiscal year and need the
    // period query parameter; the rest are point-in-time.
    pub fn annual_period(self) -> bool {
        matches!(self, MetricKind::KeyMetrics | MetricKind::FinancialGrowth)
    }
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub kind: MetricKind,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct EndpointResult {
    pub kind: MetricKind,
    // None when the endpoint failed. A failed endpoint never aborts its siblings.
    pub payload: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct RecordSet {
    sections: BTreeMap<MetricKind, Option<Value>>,
}

impl RecordSet {
    pub fn from_results(results: Vec<EndpointResult>) -> Result<Self, StockDataError> {
        let mut sections = BTreeMap::new();
        for result in results {
            if sections.insert(result.kind, result.payload).is_some() {
                return Err(StockDataError::Assembly {
                    detail: format!("duplicate result for {}", result.kind.canonical_name()),
                });
            }
        }

        for kind in MetricKind::ALL {
            if !sections.contains_key(&kind) {
                return Err(StockDataError::Assembly {
                    detail: format!("missing result for {}", kind.canonical_name()),
                });
            }
        }

        Ok(Self { sections })
    }

    pub fn section(&self, kind: MetricKind) -> Option<&Value> {
        self.sections.get(&kind).and_then(|payload| payload.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(|payload| match payload {
            None => true,
            Some(Value::Array(rows)) => rows.is_empty(),
            Some(_) => false,
        })
    }
}
