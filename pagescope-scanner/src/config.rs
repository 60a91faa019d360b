use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!(
    "Pagescope/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/pagescope/pagescope)"
);

/// Tuning knobs for [`crate::Analyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timeout for fetching the analyzed page itself.
    pub fetch_timeout: Duration,
    /// Timeout for each link reachability probe.
    pub probe_timeout: Duration,
    /// Maximum number of probes in flight at once.
    pub probe_workers: usize,
    /// Upper bound on the whole link-probing phase. Probes still running
    /// when it passes count as inaccessible.
    pub link_deadline: Option<Duration>,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            probe_workers: 10,
            link_deadline: Some(Duration::from_secs(60)),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// The subset of [`AnalyzerConfig`] the link analyzer needs.
#[derive(Debug, Clone, Copy)]
pub struct ProbeLimits {
    pub timeout: Duration,
    pub workers: usize,
    pub deadline: Option<Duration>,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        AnalyzerConfig::default().probe_limits()
    }
}

impl AnalyzerConfig {
    pub fn probe_limits(&self) -> ProbeLimits {
        ProbeLimits {
            timeout: self.probe_timeout,
            workers: self.probe_workers.max(1),
            deadline: self.link_deadline,
        }
    }
}
