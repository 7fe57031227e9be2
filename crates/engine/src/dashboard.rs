use chrono::{DateTime, Utc};
use cryptocharger_core::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::collect::collect_observations;
use crate::pivot::{pivot, TableError};

/// One refresh worth of data for the presentation surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub title: String,
    pub fetched_at: DateTime<Utc>,
    pub table: PriceTable,
    pub notices: Vec<Notice>,
}

/// The configured fetch → pivot pipeline.
///
/// Adapters and pairs are fixed at construction and only read afterwards.
pub struct Dashboard {
    title: String,
    adapters: Vec<Box<dyn ExchangeAdapter>>,
    pairs: Vec<Pair>,
    transport: Arc<dyn HttpTransport>,
}

impl Dashboard {
    pub fn new(
        title: impl Into<String>,
        adapters: Vec<Box<dyn ExchangeAdapter>>,
        pairs: Vec<Pair>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            title: title.into(),
            adapters,
            pairs,
            transport,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn adapters(&self) -> &[Box<dyn ExchangeAdapter>] {
        &self.adapters
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Fetch every (exchange, pair) price and pivot the results.
    pub async fn refresh(&self) -> Result<Snapshot, TableError> {
        let fetched_at = Utc::now();
        let (observations, notices) =
            collect_observations(&self.adapters, &self.pairs, self.transport.as_ref()).await;
        let table = pivot(&observations)?;

        info!(
            rows = table.rows.len(),
            columns = table.columns.len(),
            notices = notices.len(),
            "Dashboard refreshed"
        );

        Ok(Snapshot {
            title: self.title.clone(),
            fetched_at,
            table,
            notices,
        })
    }
}
