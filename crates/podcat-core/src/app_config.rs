/// Runtime configuration for the catalog aggregation client.
///
/// All values come from `PODCAT_*` environment variables (see
/// `config.rs` for defaults). The API token is required; everything
/// else has a sensible default.
#[derive(Clone)]
pub struct AppConfig {
    /// Bearer token sent on every upstream request.
    pub api_token: String,
    /// Base URL of the upstream API. Overridable so tests can point at
    /// a local mock server.
    pub api_base_url: String,
    /// Value of the `X-Api-Version` header.
    pub api_version: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Number of blueprint aggregations run concurrently per batch.
    /// Sized so one batch's worst-case in-flight requests stay under
    /// the upstream rate ceiling. `1` selects sequential mode.
    pub batch_size: usize,
    /// Pause between batches, in milliseconds.
    pub inter_batch_delay_ms: u64,
    /// Pause between aggregations in sequential mode (`batch_size == 1`).
    pub sequential_delay_ms: u64,
    /// Optional truncation of the catalog for bounded runs. `0` means
    /// process the full catalog.
    pub catalog_limit: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_token", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("batch_size", &self.batch_size)
            .field("inter_batch_delay_ms", &self.inter_batch_delay_ms)
            .field("sequential_delay_ms", &self.sequential_delay_ms)
            .field("catalog_limit", &self.catalog_limit)
            .finish()
    }
}
