// handlers/stats.rs - GET /stats dashboard counters

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::stores::stats::{PlatformStats, StatsStore};

/// Partner organizations shown on the dashboard; not store-backed
const PARTNER_COUNT: i64 = 12;

/// GET /stats - distinct-user counts and totals for the dashboard. Any
/// failing aggregate fails the whole response; there are no partial results.
pub async fn dashboard() -> ApiResult<PlatformStats> {
    let store = StatsStore::new().await?;
    let stats = store.gather(PARTNER_COUNT).await?;

    Ok(ApiResponse::success(stats))
}
