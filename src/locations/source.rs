use crate::locations::error::LocationSourceError;
use crate::types::location::Location;
use async_trait::async_trait;

/// Supplies the set of locations to poll.
///
/// Called once at the start of every cycle. Implementations may return a different set each
/// time; the workflow never caches the result across cycles.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn all_locations(&self) -> Result<Vec<Location>, LocationSourceError>;
}
