use std::path::PathBuf;

use clap::Parser;

use crate::charts::{DEFAULT_HEATMAP_GROUP, DEFAULT_HEATMAP_TITLE, DEFAULT_RANGE_GROUP};
use crate::collectors::infojobs::DEFAULT_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobdatasets", about = "Fetch, cache and chart InfoJobs offer datasets")]
pub struct Config {
    /// File containing the InfoJobs bearer token
    #[arg(long, env = "INFOJOBS_API_KEY_FILE", default_value = "api-key.txt")]
    pub api_key_file: PathBuf,

    /// Directory holding the cached CSV datasets
    #[arg(long, env = "JOBDATASETS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// InfoJobs API base URL
    #[arg(long, env = "INFOJOBS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Country filter applied to every offer page
    #[arg(long, env = "INFOJOBS_COUNTRY", default_value = "espana")]
    pub country: String,

    /// Offers requested per page
    #[arg(long, default_value = "50")]
    pub page_size: u32,

    /// Extra attempts for a page whose body lacks the offers list
    #[arg(long, default_value = "5")]
    pub max_page_retries: u32,

    /// Emit logs as JSON lines
    #[arg(long, env = "JOBDATASETS_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Download the offer and country datasets unless already cached (default)
    Fetch,
    /// Box plots of annual min/max salary per group
    PlotRange {
        /// Column to group offers by
        #[arg(long, default_value = DEFAULT_RANGE_GROUP)]
        group_by: String,

        /// SVG file to write
        #[arg(long, default_value = "salary_range.svg")]
        output: PathBuf,
    },
    /// Heatmaps of mean annual min/max salary per group
    PlotHeatmap {
        /// Column to group offers by
        #[arg(long, default_value = DEFAULT_HEATMAP_GROUP)]
        group_by: String,

        /// Chart title
        #[arg(long, default_value = DEFAULT_HEATMAP_TITLE)]
        title: String,

        /// SVG file to write
        #[arg(long, default_value = "salary_heatmap.svg")]
        output: PathBuf,
    },
}

impl Config {
    /// Resolve the command, defaulting to Fetch if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Fetch)
    }
}
