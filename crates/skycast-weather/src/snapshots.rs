//! Quick-glance current conditions for the whole favorites list.
//!
//! Cities are fetched concurrently under a fixed in-flight cap, but the
//! result sequence is assembled by input position: the UI binds rows by
//! index, so completion order must never reorder it. A city that fails to
//! resolve is dropped from the result, not replaced by a placeholder.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::condition::BackgroundKey;
use crate::provider::WeatherClient;
use crate::types::{truncate_temp, CurrentReport, FavoriteSnapshot, Units};

/// Cap on simultaneous provider requests per batch (provider rate limits).
pub const MAX_IN_FLIGHT: usize = 4;

#[derive(Debug, Clone)]
pub struct FavoritesAggregator {
    client: Arc<WeatherClient>,
}

impl FavoritesAggregator {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        Self { client }
    }

    /// Fetch one snapshot per city, in input order, omitting failures.
    pub async fn fetch_snapshots(
        &self,
        cities: &[String],
        units: Units,
        cancel: &CancellationToken,
    ) -> Vec<FavoriteSnapshot> {
        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
        let mut tasks = JoinSet::new();

        for (index, city) in cities.iter().enumerate() {
            let client = self.client.clone();
            let city = city.clone();
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return None;
                };
                match client.fetch_current(&city, units, &cancel).await {
                    Ok(report) => Some((index, snapshot_from(report))),
                    Err(e) => {
                        // Per-item fault: the batch carries on without it
                        tracing::debug!("Skipping favorite {}: {}", city, e);
                        None
                    }
                }
            });
        }

        let mut slots: Vec<Option<FavoriteSnapshot>> = vec![None; cities.len()];
        while let Some(joined) = tasks.join_next().await {
            if let Ok(Some((index, snapshot))) = joined {
                slots[index] = Some(snapshot);
            }
        }

        slots.into_iter().flatten().collect()
    }
}

fn snapshot_from(report: CurrentReport) -> FavoriteSnapshot {
    let sample = report.sample;
    let background = BackgroundKey::for_conditions(&sample.condition_main, &sample.icon_code);

    FavoriteSnapshot {
        city_name: report.city,
        temperature: truncate_temp(sample.temp),
        condition: sample.condition_main,
        background,
    }
}
