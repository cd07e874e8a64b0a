use std::time::Duration;

/// Which try-on backend a [`TryOnManager`](crate::TryOnManager) prefers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Always use the rule-based compositor
    #[default]
    Local,
    /// Use the remote garment-synthesis service when one is attached
    Remote,
}

/// Configuration options for try-on requests
///
/// The placement table constants are not configurable; this only controls
/// backend selection, remote job polling and input preparation.
#[derive(Clone, Debug, PartialEq)]
pub struct TryOnConfig {
    /// Preferred backend
    pub provider: Provider,

    /// Delay between two polls of a pending remote job
    pub poll_interval: Duration,

    /// Number of polls after which a pending remote job is abandoned
    pub max_poll_attempts: u32,

    /// Run the local compositor when the remote path fails
    pub fallback_to_local: bool,

    /// Prefix for object-storage keys of uploaded inputs
    pub key_prefix: String,

    /// Inputs larger than this on either side are downscaled before
    /// compositing. `None` keeps the original size.
    pub max_input_dimension: Option<u32>,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Local,
            poll_interval: Duration::from_secs(3),
            max_poll_attempts: 60,
            fallback_to_local: true,
            key_prefix: "tryon".to_string(),
            max_input_dimension: Some(1200),
        }
    }
}

impl TryOnConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn set_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn set_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    pub fn set_fallback_to_local(mut self, fallback: bool) -> Self {
        self.fallback_to_local = fallback;
        self
    }

    pub fn set_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn set_max_input_dimension(mut self, dimension: Option<u32>) -> Self {
        self.max_input_dimension = dimension;
        self
    }
}
