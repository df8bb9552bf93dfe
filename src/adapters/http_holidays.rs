use crate::domain::model::{parse_date, HolidaySet};
use crate::domain::ports::HolidayProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Datelike;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Accepts both `["2025-01-01", ...]` and `[{"date": "2025-01-01", "recurring": false}, ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HolidayEntry {
    Date(String),
    Record {
        date: String,
        #[serde(default)]
        recurring: bool,
    },
}

/// Loads holidays with a GET against a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpHolidayProvider {
    client: Client,
    url: String,
    extra: HolidaySet,
}

impl HttpHolidayProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(10))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            extra: HolidaySet::default(),
        })
    }

    /// Local holidays merged into every fetched set, and served alone when the
    /// endpoint cannot be reached.
    pub fn with_extra(mut self, extra: HolidaySet) -> Self {
        self.extra = extra;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_entries(&self) -> Result<Vec<HolidayEntry>> {
        tracing::debug!("Fetching holidays from: {}", self.url());
        let response = self.client.get(self.url()).send().await?;
        tracing::debug!("Holiday source status: {}", response.status());

        Ok(response.error_for_status()?.json().await?)
    }
}

#[async_trait]
impl HolidayProvider for HttpHolidayProvider {
    async fn holidays(&self) -> Result<HolidaySet> {
        let entries = match self.fetch_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                // 遠端失敗時仍保留設定檔中的假日
                tracing::warn!(
                    "⚠️ Holiday source {} unavailable, using {} local holidays: {}",
                    self.url(),
                    self.extra.len(),
                    e
                );
                return Ok(self.extra.clone());
            }
        };

        let mut holidays = HolidaySet::new();
        for entry in entries {
            match entry {
                HolidayEntry::Date(raw) | HolidayEntry::Record {
                    date: raw,
                    recurring: false,
                } => {
                    holidays.insert(parse_date(&raw)?);
                }
                HolidayEntry::Record {
                    date,
                    recurring: true,
                } => {
                    let parsed = parse_date(&date)?;
                    holidays.insert_recurring(parsed.month(), parsed.day())?;
                }
            }
        }

        holidays.extend(&self.extra);
        tracing::info!("📅 Loaded {} holidays from {}", holidays.len(), self.url());
        Ok(holidays)
    }
}
