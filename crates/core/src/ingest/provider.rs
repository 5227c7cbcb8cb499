use crate::domain::stock::StockData;
use anyhow::Result;

#[async_trait::async_trait]
pub trait StockDataProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_stock_data(&self, ticker: &str) -> Result<StockData>;
}
