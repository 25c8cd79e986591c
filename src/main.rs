use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobdatasets::auth::Credential;
use jobdatasets::charts::{plot_salary_heatmap, plot_salary_range_by_group};
use jobdatasets::collectors::runner::JOBS_FILE;
use jobdatasets::collectors::{FetchOptions, InfoJobsClient, ensure_datasets};
use jobdatasets::config::{Command, Config};
use jobdatasets::models::table::Table;
use jobdatasets::transform::prepare_salaries;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("jobdatasets=info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    match config.resolved_command() {
        Command::Fetch => {
            let credential = Credential::from_file(&config.api_key_file)?;
            let client = InfoJobsClient::new(&config.base_url, credential, &config.country)?;
            let options = FetchOptions {
                page_size: config.page_size,
                max_page_retries: config.max_page_retries,
            };
            let report = ensure_datasets(&client, &config.data_dir, &options).await?;
            tracing::info!("Datasets ready: {report:?}");
        }
        Command::PlotRange { group_by, output } => {
            let table = load_prepared(&config)?;
            plot_salary_range_by_group(&table, &group_by, &output)?;
            tracing::info!("Chart written to {}", output.display());
        }
        Command::PlotHeatmap {
            group_by,
            title,
            output,
        } => {
            let table = load_prepared(&config)?;
            plot_salary_heatmap(&table, &group_by, &title, &output)?;
            tracing::info!("Chart written to {}", output.display());
        }
    }

    Ok(())
}

fn load_prepared(config: &Config) -> anyhow::Result<Table> {
    let path = config.data_dir.join(JOBS_FILE);
    let table = Table::read_csv(&path).map_err(|e| {
        anyhow::anyhow!("Failed to load {}: {e} (run `jobdatasets fetch` first)", path.display())
    })?;
    let prepared = prepare_salaries(table);
    tracing::info!("Loaded {} offers with salary data", prepared.len());
    Ok(prepared)
}
