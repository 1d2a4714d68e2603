//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! These run independently of the pending-review poller (which has its own
//! 60-second loop). The scheduler carries the slow housekeeping jobs.

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::audit::models::AuditLog;

/// Audit entries older than this are pruned nightly.
const AUDIT_RETENTION_DAYS: i64 = 180;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Nightly audit prune - runs at 03:15 UTC
    let prune_pool = pool.clone();
    let prune_job = Job::new_async("0 15 3 * * *", move |_uuid, _lock| {
        let pool = prune_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_audit_prune(&pool).await {
                tracing::error!("Audit prune task failed: {}", e);
            }
        })
    })?;

    scheduler.add(prune_job).await?;
    scheduler.start().await?;

    tracing::info!("Scheduled tasks started (nightly audit prune)");
    Ok(scheduler)
}

/// Delete audit entries past the retention window.
async fn run_audit_prune(pool: &PgPool) -> Result<()> {
    tracing::info!("Running audit prune task");

    let removed = AuditLog::prune_older_than_days(AUDIT_RETENTION_DAYS, pool).await?;

    tracing::info!("Audit prune complete: removed {} entries", removed);
    Ok(())
}
