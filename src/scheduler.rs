use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::cache::{CacheKey, ResourceCache};
use crate::cms::{CmsClient, CmsError};
use crate::config::Config;
use crate::retry::RetryConfig;

/// Initialize and start the scheduler that refreshes layout resources
pub async fn start_scheduler(
    config: Arc<Config>,
    cms: CmsClient,
    cache: Arc<ResourceCache>,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Background refreshes can afford longer backoff than page requests
    let cms = cms.with_retry(RetryConfig::background_refresh());

    for time in &config.refresh_times {
        let cron_expr = time_to_cron(time)?;
        info!("Scheduling layout refresh at {} UTC (cron: {})", time, cron_expr);

        let cms_clone = cms.clone();
        let cache_clone = Arc::clone(&cache);

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _l| {
            let cms = cms_clone.clone();
            let cache = Arc::clone(&cache_clone);

            Box::pin(async move {
                info!("⏰ Scheduled layout refresh triggered");
                if let Err(e) = refresh_layout(&cms, &cache).await {
                    error!("Scheduled layout refresh failed: {}", e);
                }
            })
        })
        .with_context(|| format!("Failed to create refresh job for {}", time))?;

        scheduler.add(job).await?;
    }

    scheduler.start().await?;
    info!("✓ Scheduler started ({} refresh times)", config.refresh_times.len());

    Ok(scheduler)
}

/// Convert time string (HH:MM, UTC) to a daily cron expression
fn time_to_cron(time: &str) -> Result<String> {
    let (hour, minute) = time
        .trim()
        .split_once(':')
        .with_context(|| format!("Invalid time format: {}. Expected HH:MM", time))?;

    let hour: u8 = hour
        .parse()
        .with_context(|| format!("Invalid hour in {}", time))?;
    let minute: u8 = minute
        .parse()
        .with_context(|| format!("Invalid minute in {}", time))?;

    if hour > 23 || minute > 59 {
        anyhow::bail!("Time out of range: {}. Expected 00:00-23:59", time);
    }

    // Cron format: "second minute hour day month day_of_week"
    Ok(format!("0 {} {} * * *", minute, hour))
}

/// Re-fetch company info and menus and replace the cached copies.
///
/// Both fetches run concurrently. A failed fetch leaves the previously
/// cached value in place.
pub async fn refresh_layout(cms: &CmsClient, cache: &ResourceCache) -> Result<(), CmsError> {
    info!("Refreshing layout resources");

    let (company, menus): (Arc<Value>, Arc<Value>) = futures::future::try_join(
        cache.refresh(CacheKey::CompanyInfo, || cms.company_info()),
        cache.refresh(CacheKey::Menus, || cms.menus()),
    )
    .await?;

    info!(
        "✓ Layout refreshed ({} menu entries, company {})",
        menus.as_array().map(Vec::len).unwrap_or(0),
        if company.is_object() { "ok" } else { "empty" }
    );
    Ok(())
}
