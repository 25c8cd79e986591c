use std::fmt;
use std::path::Path;

use crate::collectors::OfferSource;
use crate::error::AppError;
use crate::models::offer::{OfferPage, Record};
use crate::models::table::Table;

pub const JOBS_FILE: &str = "jobs_dataset.csv";
pub const COUNTRIES_FILE: &str = "country_dataset.csv";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Offers requested per page (`maxResults`).
    pub page_size: u32,
    /// Extra attempts allowed for a page whose body lacks the offers list.
    pub max_page_retries: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_page_retries: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// File already existed and was reused without any request.
    Cached,
    Fetched { rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetsReport {
    pub offers: CacheOutcome,
    pub countries: CacheOutcome,
}

/// Running count reported after each page of the offer listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub page: u32,
    pub pages: u32,
    pub accumulated: usize,
    pub total: u64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {}/{}: {}/{} offers",
            self.page, self.pages, self.accumulated, self.total
        )
    }
}

/// Make sure both cached datasets exist under `output_dir`, fetching whichever
/// is missing. An existing file is trusted as-is. Each file is written
/// atomically, so an aborted run never leaves a partial cache behind.
pub async fn ensure_datasets(
    source: &dyn OfferSource,
    output_dir: &Path,
    options: &FetchOptions,
) -> Result<DatasetsReport, AppError> {
    tokio::fs::create_dir_all(output_dir).await?;

    let jobs_path = output_dir.join(JOBS_FILE);
    let offers = if tokio::fs::try_exists(&jobs_path).await? {
        tracing::info!("The jobs dataset is already cached at {}", jobs_path.display());
        CacheOutcome::Cached
    } else {
        tracing::info!("Getting the jobs dataset from the offers API...");
        let records = collect_offers(source, options, &mut |progress: Progress| {
            tracing::info!("{progress}")
        })
        .await?;
        let rows = records.len();
        Table::from_records(records).write_csv_atomic(&jobs_path)?;
        tracing::info!("Saved {rows} offers to {}", jobs_path.display());
        CacheOutcome::Fetched { rows }
    };

    let countries_path = output_dir.join(COUNTRIES_FILE);
    let countries = if tokio::fs::try_exists(&countries_path).await? {
        tracing::info!(
            "The country dataset is already cached at {}",
            countries_path.display()
        );
        CacheOutcome::Cached
    } else {
        tracing::info!("Getting the country dataset from the dictionary API...");
        let records = source.fetch_countries().await?;
        let rows = records.len();
        Table::from_records(records).write_csv_atomic(&countries_path)?;
        tracing::info!("Saved {rows} countries to {}", countries_path.display());
        CacheOutcome::Fetched { rows }
    };

    Ok(DatasetsReport { offers, countries })
}

/// Walk every page in order and accumulate the offers. Page 1 doubles as the
/// discovery request: its `totalResults` fixes the page count.
async fn collect_offers(
    source: &dyn OfferSource,
    options: &FetchOptions,
    on_progress: &mut (dyn FnMut(Progress) + Send),
) -> Result<Vec<Record>, AppError> {
    let page_size = options.page_size.max(1);

    let (first, total) = fetch_page(source, 1, options, true).await?;
    let total = total.unwrap_or_default();
    let pages = u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
    if pages == 0 {
        tracing::info!("Offers API reports no results");
        return Ok(Vec::new());
    }

    let mut offers = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
    offers.extend(first);
    on_progress(Progress {
        page: 1,
        pages,
        accumulated: offers.len(),
        total,
    });

    for page in 2..=pages {
        let (items, _) = fetch_page(source, page, options, false).await?;
        offers.extend(items);
        on_progress(Progress {
            page,
            pages,
            accumulated: offers.len(),
            total,
        });
    }

    Ok(offers)
}

/// Request one page, re-requesting the same index while the body is malformed.
/// Transport and HTTP status errors are returned immediately.
async fn fetch_page(
    source: &dyn OfferSource,
    page: u32,
    options: &FetchOptions,
    require_total: bool,
) -> Result<(Vec<Record>, Option<u64>), AppError> {
    let attempts = options.max_page_retries.saturating_add(1);
    for attempt in 1..=attempts {
        match source.fetch_offer_page(page, options.page_size.max(1)).await? {
            OfferPage::Offers {
                offers,
                total_results,
            } if !require_total || total_results.is_some() => {
                return Ok((offers, total_results));
            }
            _ => {
                tracing::warn!("Page {page} came back without offers (attempt {attempt}/{attempts})");
            }
        }
    }
    Err(AppError::MalformedPage { page, attempts })
}
