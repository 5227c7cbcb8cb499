use serde::{Deserialize, Serialize};

// Serde aliases accept the provider's camelCase field names; serialization
// always emits the canonical snake_case names, so validated output fed back
// through validation parses identically.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub beta: f64,
    pub range: String,
    #[serde(alias = "companyName")]
    pub company_name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    #[serde(alias = "changesPercentage")]
    pub change_percent: Option<f64>,
    #[serde(alias = "yearHigh")]
    pub year_high: f64,
    #[serde(alias = "yearLow")]
    pub year_low: f64,
    #[serde(alias = "marketCap")]
    pub market_cap: f64,
    // FMP serves share and volume counts as integers or floats depending on
    // the symbol; f64 covers both and the consumers only scale for display.
    #[serde(alias = "avgVolume")]
    pub vol_avg: Option<f64>,
    pub eps: Option<f64>,
    pub pe: Option<f64>,
    #[serde(alias = "earningsAnnouncement")]
    pub earning_date: String,
    #[serde(alias = "sharesOutstanding")]
    pub shares_outstanding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub symbol: String,
    pub date: String,
    pub rating: String,
    #[serde(alias = "ratingScore")]
    pub score: i32,
    #[serde(alias = "ratingRecommendation")]
    pub recommendation: String,
    #[serde(alias = "ratingDetailsDCFScore")]
    pub dcf_score: i32,
    #[serde(alias = "ratingDetailsDCFRecommendation")]
    pub dcf_rec: String,
    #[serde(alias = "ratingDetailsROEScore")]
    pub roe_score: i32,
    #[serde(alias = "ratingDetailsROERecommendation")]
    pub roe_rec: String,
    #[serde(alias = "ratingDetailsROAScore")]
    pub roa_score: i32,
    #[serde(alias = "ratingDetailsROARecommendation")]
    pub roa_rec: String,
    #[serde(alias = "ratingDetailsDEScore")]
    pub de_score: i32,
    #[serde(alias = "ratingDetailsDERecommendation")]
    pub de_rec: String,
    #[serde(alias = "ratingDetailsPEScore")]
    pub pe_score: i32,
    #[serde(alias = "ratingDetailsPERecommendation")]
    pub pe_rec: String,
    #[serde(alias = "ratingDetailsPBScore")]
    pub pb_score: i32,
    #[serde(alias = "ratingDetailsPBRecommendation")]
    pub pb_rec: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetricsTtm {
    #[serde(alias = "revenuePerShareTTM")]
    pub rev_per_share_ttm: Option<f64>,
    #[serde(alias = "netIncomePerShareTTM")]
    pub net_income_per_share_ttm: Option<f64>,
    #[serde(alias = "freeCashFlowPerShareTTM")]
    pub fcf_per_share_ttm: Option<f64>,
    #[serde(alias = "peRatioTTM")]
    pub pe_ratio_ttm: Option<f64>,
    #[serde(alias = "enterpriseValueOverEBITDATTM")]
    pub ev_over_ebitda_ttm: Option<f64>,
    #[serde(alias = "evToFreeCashFlowTTM")]
    pub ev_to_fcf_ttm: Option<f64>,
    #[serde(alias = "freeCashFlowYieldTTM")]
    pub fcf_yield_ttm: Option<f64>,
    #[serde(alias = "priceToSalesRatioTTM")]
    pub pts_ratio_ttm: Option<f64>,
    #[serde(alias = "ptbRatioTTM")]
    pub ptb_ratio_ttm: Option<f64>,
    #[serde(alias = "pfcfRatioTTM")]
    pub pfcf_ratio_ttm: Option<f64>,
    // Already a percentage on the provider side, unlike the fraction-valued yields.
    #[serde(alias = "dividendYieldPercentageTTM")]
    pub dvd_yield_pct_ttm: Option<f64>,
    #[serde(alias = "dividendPerShareTTM")]
    pub dvd_per_share_ttm: Option<f64>,
    #[serde(alias = "payoutRatioTTM")]
    pub payout_ratio_ttm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub symbol: String,
    pub date: String,
    #[serde(alias = "revenuePerShare")]
    pub rev_per_share: Option<f64>,
    #[serde(alias = "freeCashFlowPerShare")]
    pub fcf_per_share: Option<f64>,
    #[serde(alias = "peRatio")]
    pub pe_ratio: Option<f64>,
    #[serde(alias = "enterpriseValueOverEBITDA")]
    pub ev_over_ebitda: Option<f64>,
    #[serde(alias = "evToFreeCashFlow")]
    pub ev_to_fcf: Option<f64>,
    #[serde(alias = "freeCashFlowYield")]
    pub fcf_yield: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub symbol: String,
    pub date: String,
    #[serde(alias = "revenueGrowth")]
    pub rev_growth: Option<f64>,
    #[serde(alias = "epsdilutedGrowth")]
    pub eps_growth: Option<f64>,
    #[serde(alias = "dividendsperShareGrowth")]
    pub dps_growth: Option<f64>,
    #[serde(alias = "freeCashFlowGrowth")]
    pub fcf_growth: Option<f64>,
    #[serde(alias = "debtGrowth")]
    pub debt_growth: Option<f64>,
    #[serde(alias = "fiveYRevenueGrowthPerShare")]
    pub five_y_rev_growth_per_share: Option<f64>,
    #[serde(alias = "fiveYNetIncomeGrowthPerShare")]
    pub five_y_ni_growth_per_share: Option<f64>,
    #[serde(alias = "fiveYDividendperShareGrowthPerShare")]
    pub five_y_dps_growth_per_share: Option<f64>,
    #[serde(alias = "fiveYOperatingCFGrowthPerShare")]
    pub five_y_opcf_growth_per_share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub profile: Vec<CompanyProfile>,
    pub quote: Vec<Quote>,
    pub ratings: Vec<Rating>,
    pub key_metrics_ttm: Vec<KeyMetricsTtm>,
    pub key_metrics: Vec<KeyMetrics>,
    pub growth: Vec<GrowthMetrics>,
}
