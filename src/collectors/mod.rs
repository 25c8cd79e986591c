// Collectors fetch the raw offer and country datasets from a remote source.
// The runner drives pagination and caching; sources only do single requests.

pub mod infojobs;
pub mod runner;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::offer::{OfferPage, Record};

pub use infojobs::InfoJobsClient;
pub use runner::{CacheOutcome, DatasetsReport, FetchOptions, Progress, ensure_datasets};

/// Trait that all offer sources must implement.
/// Each call is exactly one request; retries and accumulation belong to the runner.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch one 1-based page of offers. A body without an offers list is
    /// `OfferPage::Malformed`, not an error.
    async fn fetch_offer_page(&self, page: u32, page_size: u32) -> Result<OfferPage, AppError>;

    /// Fetch the country reference dictionary.
    async fn fetch_countries(&self) -> Result<Vec<Record>, AppError>;
}
