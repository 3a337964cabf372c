use async_trait::async_trait;

use crate::types::NewsResponse;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news provider
    fn name(&self) -> &str;

    /// Fetches the latest headlines matching `query`. An empty query is sent as-is.
    async fn latest(&self, query: &str) -> Result<NewsResponse>;
}
