use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockdash_core::domain::dashboard::DashboardView;
use stockdash_core::ingest::error::StockDataError;
use stockdash_core::ingest::fmp::FmpClient;
use stockdash_core::ingest::provider::StockDataProvider;

mod render;

#[derive(Debug, Parser)]
#[command(name = "stockdash_cli")]
struct Args {
    /// Stock ticker symbol, e.g. AAPL.
    ticker: String,

    /// Print the validated records as JSON instead of the dashboard.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let client = FmpClient::from_settings(&settings)?;

    match run(&client, &args).await {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<StockDataError>() {
            Some(StockDataError::NoData { ticker }) => {
                println!("No data available for {ticker}. Check the ticker symbol.");
                Ok(())
            }
            _ => {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "dashboard run failed");
                Err(err)
            }
        },
    }
}

async fn run(client: &FmpClient, args: &Args) -> anyhow::Result<()> {
    let ticker = args.ticker.trim().to_uppercase();
    let data = client.fetch_stock_data(&ticker).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let view = DashboardView::build(&ticker, &data);
    print!("{}", render::render_dashboard(&view));
    Ok(())
}

fn init_sentry(settings: &stockdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
