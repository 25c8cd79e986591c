use async_trait::async_trait;
use serde_json::Value;

use crate::auth::Credential;
use crate::collectors::OfferSource;
use crate::error::AppError;
use crate::models::offer::{OfferPage, Record, records_from_array};

pub const DEFAULT_BASE_URL: &str = "https://api.infojobs.net/api";
const OFFERS_PATH: &str = "/9/offer";
const COUNTRIES_PATH: &str = "/1/dictionary/country";

/// InfoJobs REST client. Authenticates every request with the bearer token.
pub struct InfoJobsClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
    country: String,
}

impl InfoJobsClient {
    pub fn new(
        base_url: impl Into<String>,
        credential: Credential,
        country: impl Into<String>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("jobdatasets/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential,
            country: country.into(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<u8>, AppError> {
        let url = format!("{}{path}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(self.credential.token())
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(AppError::Status {
                endpoint: path.to_string(),
                status: resp.status(),
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl OfferSource for InfoJobsClient {
    async fn fetch_offer_page(&self, page: u32, page_size: u32) -> Result<OfferPage, AppError> {
        let query = [
            ("page", page.to_string()),
            ("maxResults", page_size.to_string()),
            ("country", self.country.clone()),
        ];
        let body = self.get(OFFERS_PATH, &query).await?;
        Ok(OfferPage::from_body(&body))
    }

    async fn fetch_countries(&self) -> Result<Vec<Record>, AppError> {
        let body = self.get(COUNTRIES_PATH, &[]).await?;
        let data: Value = serde_json::from_slice(&body).map_err(|e| AppError::InvalidBody {
            endpoint: COUNTRIES_PATH.to_string(),
            reason: e.to_string(),
        })?;
        Ok(records_from_array(data))
    }
}
